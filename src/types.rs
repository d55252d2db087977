use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the SAM text is encoded into BAM.
#[derive(clap::ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Pipe into an external `samtools view` process
    #[default]
    #[value(name = "samtools")]
    Samtools,
    /// Encode in-process through htslib
    #[value(name = "htslib")]
    Htslib,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Samtools => write!(f, "samtools"),
            Backend::Htslib => write!(f, "htslib"),
        }
    }
}
