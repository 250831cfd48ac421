pub mod paper_file;

pub use paper_file::PaperFile;
