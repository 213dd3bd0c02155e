use std::io::{self, Write};

use serde::Serialize;

use crate::app::{PrepareResult, ProgressEvent, ProgressLevel, ProgressSink};

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_prepare(result: &PrepareResult) -> io::Result<()> {
        Self::print_json(result)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

/// Forwards run events to whichever `tracing` subscriber is active.
pub struct LogSink;

impl ProgressSink for LogSink {
    fn event(&self, event: ProgressEvent) {
        let elapsed_ms = event.elapsed.map(|elapsed| elapsed.as_millis() as u64);
        match (event.level, elapsed_ms) {
            (ProgressLevel::Debug, _) => tracing::debug!("{}", event.message),
            (ProgressLevel::Info, Some(elapsed_ms)) => {
                tracing::info!(elapsed_ms, "{}", event.message)
            }
            (ProgressLevel::Info, None) => tracing::info!("{}", event.message),
            (ProgressLevel::Warn, _) => tracing::warn!("{}", event.message),
        }
    }
}
