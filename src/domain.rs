use std::fmt;

use serde::Serialize;

pub const ALPHAMISSENSE_URL: &str =
    "https://zenodo.org/records/8360242/files/AlphaMissense_aa_substitutions.tsv.gz?download=1";
pub const ESM1B_URL: &str = "https://huggingface.co/spaces/ntranoslab/esm_variants/resolve/main/ALL_hum_isoforms_ESM1b_LLR.zip";

/// The two prediction sets this tool prepares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    AlphaMissense,
    Esm1b,
}

impl Dataset {
    pub fn id(&self) -> &'static str {
        match self {
            Dataset::AlphaMissense => "alphamissense",
            Dataset::Esm1b => "esm1b",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dataset::AlphaMissense => "AlphaMissense",
            Dataset::Esm1b => "ESM1b",
        }
    }

    pub fn source_url(&self) -> &'static str {
        match self {
            Dataset::AlphaMissense => ALPHAMISSENSE_URL,
            Dataset::Esm1b => ESM1B_URL,
        }
    }

    /// File name of the downloaded artifact inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::AlphaMissense => "AlphaMissense_aa_substitutions.tsv.gz",
            Dataset::Esm1b => "ALL_hum_isoforms_ESM1b_LLR.zip",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What a run did to an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Downloaded,
    Present,
    Skipped,
    Unpacked,
}
