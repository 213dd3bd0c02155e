use std::path::PathBuf;

use camino::Utf8PathBuf;

use crate::error::PrepError;
use crate::layout::DataLayout;

pub const DEFAULT_DATA_DIR: &str = "./raw-data";

/// Settings for one run. Fixed once resolved.
#[derive(Debug, Clone)]
pub struct PrepareConfig {
    pub data_dir: Utf8PathBuf,
    pub force: bool,
}

impl PrepareConfig {
    pub fn new(data_dir: PathBuf, force: bool) -> Result<Self, PrepError> {
        let data_dir = Utf8PathBuf::from_path_buf(data_dir).map_err(PrepError::InvalidDataDir)?;
        Ok(Self { data_dir, force })
    }

    pub fn layout(&self) -> DataLayout {
        DataLayout::new(self.data_dir.clone())
    }
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            data_dir: Utf8PathBuf::from(DEFAULT_DATA_DIR),
            force: false,
        }
    }
}
