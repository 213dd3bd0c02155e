use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::domain::Dataset;
use crate::error::PrepError;

pub const ESM1B_UNPACK_DIR: &str = "esm1b-predictions";
pub const UNIPROT_TABLE: &str = "000_uniprot_df.csv";
/// Location of the UniProt table inside the ESM1b archive.
pub const UNIPROT_TABLE_MEMBER: &str = "content/000_uniprot_df.csv";

/// Paths of every artifact under one data directory.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: Utf8PathBuf,
}

impl DataLayout {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn artifact_path(&self, dataset: Dataset) -> Utf8PathBuf {
        self.root.join(dataset.file_name())
    }

    pub fn alphamissense_path(&self) -> Utf8PathBuf {
        self.artifact_path(Dataset::AlphaMissense)
    }

    pub fn esm1b_archive_path(&self) -> Utf8PathBuf {
        self.artifact_path(Dataset::Esm1b)
    }

    pub fn esm1b_unpack_dir(&self) -> Utf8PathBuf {
        self.root.join(ESM1B_UNPACK_DIR)
    }

    pub fn esm1b_nested_table_path(&self) -> Utf8PathBuf {
        self.esm1b_unpack_dir().join(UNIPROT_TABLE_MEMBER)
    }

    /// Sibling of the unpack directory.
    pub fn uniprot_table_path(&self) -> Utf8PathBuf {
        self.root.join(UNIPROT_TABLE)
    }

    pub fn exists(&self, path: &Utf8Path) -> bool {
        path.as_std_path().exists()
    }

    /// Creates the data directory and its parents. Returns `true` when it had to be created.
    pub fn ensure_root(&self) -> Result<bool, PrepError> {
        if self.exists(&self.root) {
            return Ok(false);
        }
        fs::create_dir_all(self.root.as_std_path())
            .map_err(|err| PrepError::Filesystem(format!("create {}: {err}", self.root)))?;
        Ok(true)
    }
}
