use std::time::{Duration, Instant};

use camino::Utf8Path;
use serde::Serialize;

use crate::config::PrepareConfig;
use crate::domain::{Action, Dataset};
use crate::error::PrepError;
use crate::fs_util;
use crate::http::DatasetClient;
use crate::layout::{DataLayout, UNIPROT_TABLE_MEMBER};

#[derive(Debug, Clone, Serialize)]
pub struct PrepareResult {
    pub data_dir: String,
    pub created_data_dir: bool,
    pub items: Vec<DatasetOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetOutcome {
    pub dataset: Dataset,
    pub download: Action,
    pub unpack: Option<Action>,
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressLevel {
    Debug,
    Info,
    Warn,
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub level: ProgressLevel,
    pub message: String,
    pub elapsed: Option<Duration>,
}

impl ProgressEvent {
    pub fn debug(message: impl Into<String>) -> Self {
        Self {
            level: ProgressLevel::Debug,
            message: message.into(),
            elapsed: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ProgressLevel::Info,
            message: message.into(),
            elapsed: None,
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            level: ProgressLevel::Warn,
            message: message.into(),
            elapsed: None,
        }
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = Some(elapsed);
        self
    }
}

/// Receives the log lines of a run.
pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

pub struct Preparer<C: DatasetClient> {
    config: PrepareConfig,
    layout: DataLayout,
    client: C,
}

impl<C: DatasetClient> Preparer<C> {
    pub fn new(config: PrepareConfig, client: C) -> Self {
        let layout = config.layout();
        Self {
            config,
            layout,
            client,
        }
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// Bootstraps the data directory, then prepares AlphaMissense and ESM1b in that order.
    /// The first error aborts the run.
    pub fn run(&self, sink: &dyn ProgressSink) -> Result<PrepareResult, PrepError> {
        let created_data_dir = self.ensure_data_dir(sink)?;
        let alphamissense = self.prepare_alphamissense(sink)?;
        let esm1b = self.prepare_esm1b(sink)?;
        sink.event(ProgressEvent::info("Data preparation complete!"));

        Ok(PrepareResult {
            data_dir: self.layout.root().to_string(),
            created_data_dir,
            items: vec![alphamissense, esm1b],
        })
    }

    pub fn ensure_data_dir(&self, sink: &dyn ProgressSink) -> Result<bool, PrepError> {
        if self.layout.exists(self.layout.root()) {
            return Ok(false);
        }
        sink.event(ProgressEvent::info("Creating data directory."));
        self.layout.ensure_root()
    }

    pub fn prepare_alphamissense(
        &self,
        sink: &dyn ProgressSink,
    ) -> Result<DatasetOutcome, PrepError> {
        let dataset = Dataset::AlphaMissense;
        let path = self.layout.alphamissense_path();
        let exists = self.layout.exists(&path);

        // Force suppresses this download rather than repeating it, unlike ESM1b.
        if self.config.force || exists {
            if !exists {
                sink.event(ProgressEvent::warn(format!(
                    "--force skips the {dataset} download even though {path} is missing"
                )));
            }
            sink.event(ProgressEvent::info(format!(
                "{dataset} data already downloaded."
            )));
            return Ok(DatasetOutcome {
                dataset,
                download: if exists {
                    Action::Present
                } else {
                    Action::Skipped
                },
                unpack: None,
                paths: vec![path.to_string()],
            });
        }

        self.download(dataset, &path, sink)?;
        Ok(DatasetOutcome {
            dataset,
            download: Action::Downloaded,
            unpack: None,
            paths: vec![path.to_string()],
        })
    }

    pub fn prepare_esm1b(&self, sink: &dyn ProgressSink) -> Result<DatasetOutcome, PrepError> {
        let dataset = Dataset::Esm1b;
        let archive = self.layout.esm1b_archive_path();

        let download = if self.config.force || !self.layout.exists(&archive) {
            self.download(dataset, &archive, sink)?;
            Action::Downloaded
        } else {
            sink.event(ProgressEvent::info(format!(
                "{dataset} data already downloaded."
            )));
            Action::Present
        };

        sink.event(ProgressEvent::info(format!("Unpacking {dataset} data...")));
        let unpack_dir = self.layout.esm1b_unpack_dir();
        let table = self.layout.uniprot_table_path();
        let unpack = if self.config.force || !self.layout.exists(&unpack_dir) {
            let start = Instant::now();
            let written =
                fs_util::extract_zip_atomic(archive.as_std_path(), unpack_dir.as_std_path())?;
            sink.event(ProgressEvent::debug(format!(
                "extracted {written} files into {unpack_dir}"
            )));

            let nested = self.layout.esm1b_nested_table_path();
            if !self.layout.exists(&nested) {
                return Err(PrepError::MissingArchiveMember {
                    member: UNIPROT_TABLE_MEMBER.to_string(),
                    archive: archive.to_string(),
                });
            }
            fs_util::move_file(nested.as_std_path(), table.as_std_path())?;
            sink.event(ProgressEvent::info("Done.").with_elapsed(start.elapsed()));
            Action::Unpacked
        } else {
            if !self.layout.exists(&table) {
                sink.event(ProgressEvent::warn(format!(
                    "{unpack_dir} exists but {table} is missing; rerun with --force to restore it"
                )));
            }
            sink.event(ProgressEvent::info("Done."));
            Action::Present
        };

        Ok(DatasetOutcome {
            dataset,
            download,
            unpack: Some(unpack),
            paths: vec![archive.to_string(), unpack_dir.to_string(), table.to_string()],
        })
    }

    fn download(
        &self,
        dataset: Dataset,
        destination: &Utf8Path,
        sink: &dyn ProgressSink,
    ) -> Result<(), PrepError> {
        sink.event(ProgressEvent::info(format!(
            "Downloading {dataset} dataset..."
        )));
        let start = Instant::now();
        let info = self
            .client
            .download(dataset.source_url(), destination.as_std_path())?;
        let elapsed = start.elapsed();
        sink.event(ProgressEvent::debug(format!(
            "wrote {} bytes to {destination}",
            info.bytes
        )));
        sink.event(ProgressEvent::info("Done.").with_elapsed(elapsed));
        Ok(())
    }
}
