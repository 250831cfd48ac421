use crate::document::{Document, DocumentError};
use crate::models::PaperFile;
use relative_path::RelativePathBuf;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid papers directory: {0}")]
    InvalidPapersDir(String),
    #[error("Unreadable document: {0}")]
    Document(#[from] DocumentError),
}

/// Load a file from disk into a [`Document`], rejecting invalid UTF-8
pub fn read_document(path: &Path) -> Result<Document, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    let document = Document::from_bytes(&bytes)?;
    log::debug!("loaded {} ({} bytes)", path.display(), document.len());
    Ok(document)
}

/// Scan for markdown files in the papers directory
pub fn scan_markdown_files(papers_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !papers_root.exists() {
        return Err(IoError::InvalidPapersDir(
            "papers directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(papers_root, &mut files)?;
    files.sort();
    Ok(files)
}

/// List every paper under the root, sorted by relative path
pub fn list_papers(papers_root: &Path) -> Result<Vec<PaperFile>, IoError> {
    let files = scan_markdown_files(papers_root)?;
    let mut papers: Vec<PaperFile> = files
        .iter()
        .filter_map(|path| path.strip_prefix(papers_root).ok())
        .filter_map(|relative| RelativePathBuf::from_path(relative).ok())
        .map(PaperFile::new)
        .collect();
    papers.sort();
    Ok(papers)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_papers_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidPapersDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
