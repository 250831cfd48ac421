use relative_path::{RelativePath, RelativePathBuf};

/// A markdown paper in the papers folder, addressed by its relative path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PaperFile {
    relative_path: RelativePathBuf,
    display_name: String,
    display_path: String,
}

impl PaperFile {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let display_name = relative_path
            .file_stem()
            .unwrap_or("Untitled")
            .to_string();
        let display_path = {
            let path_str = relative_path.as_str();
            path_str.strip_suffix(".md").unwrap_or(path_str).to_string()
        };

        Self {
            relative_path,
            display_name,
            display_path,
        }
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// File name without the .md extension
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Relative path without the .md extension, for list entries and titles
    pub fn display_path(&self) -> &str {
        &self.display_path
    }
}

impl From<&str> for PaperFile {
    fn from(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_extension_for_display() {
        let paper = PaperFile::from("2024/retrieval.md");
        assert_eq!(paper.display_name(), "retrieval");
        assert_eq!(paper.display_path(), "2024/retrieval");
        assert_eq!(paper.relative_path().as_str(), "2024/retrieval.md");
    }

    #[test]
    fn sorts_by_path() {
        let mut papers = vec![PaperFile::from("b.md"), PaperFile::from("a/z.md")];
        papers.sort();
        assert_eq!(papers[0].display_path(), "a/z");
    }
}
