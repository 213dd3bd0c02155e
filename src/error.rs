use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PrepError {
    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("data directory path is not valid UTF-8: {}", .0.display())]
    #[diagnostic(help("pass a --data-dir made of UTF-8 path components"))]
    InvalidDataDir(PathBuf),

    #[error("download request failed: {0}")]
    Http(String),

    #[error("server returned status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("archive error: {0}")]
    Archive(String),

    #[error("archive {archive} has no member {member}")]
    #[diagnostic(help("the archive may be incomplete; rerun with --force to download it again"))]
    MissingArchiveMember { member: String, archive: String },
}

impl PrepError {
    /// Process exit status for this error, 1 when unclassified.
    pub fn exit_code(&self) -> u8 {
        match self {
            PrepError::InvalidDataDir(_) => 2,
            PrepError::Http(_) | PrepError::HttpStatus { .. } => 3,
            PrepError::Archive(_) | PrepError::MissingArchiveMember { .. } => 4,
            PrepError::Filesystem(_) => 1,
        }
    }
}
