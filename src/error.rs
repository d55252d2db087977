use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Terminal failure kinds of a conversion run.
///
/// Every kind aborts the run; nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputOpen,
    Decode,
    SinkOpen,
    SinkWrite,
    HeaderFile,
    EncoderExit,
    Config,
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to open input {}", path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed record {record} in {}: {message}", path.display())]
    Decode {
        path: PathBuf,
        /// 1-based ordinal of the record being parsed when the failure occurred.
        record: u64,
        message: String,
    },

    #[error("alignment encoder unavailable: {message}")]
    SinkOpen {
        message: String,
        #[source]
        source: Option<io::Error>,
    },

    #[error("failed writing to the alignment encoder")]
    SinkWrite(#[source] io::Error),

    #[error("failed to read header file {}", path.display())]
    HeaderFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("alignment encoder exited unsuccessfully: {0}")]
    EncoderExit(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::InputOpen { .. } => ErrorKind::InputOpen,
            ConvertError::Decode { .. } => ErrorKind::Decode,
            ConvertError::SinkOpen { .. } => ErrorKind::SinkOpen,
            ConvertError::SinkWrite(_) => ErrorKind::SinkWrite,
            ConvertError::HeaderFile { .. } => ErrorKind::HeaderFile,
            ConvertError::EncoderExit(_) => ErrorKind::EncoderExit,
            ConvertError::Config(_) => ErrorKind::Config,
        }
    }

    /// True when the encoder stopped consuming input mid-stream.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, ConvertError::SinkWrite(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let err = ConvertError::SinkWrite(io::Error::from(io::ErrorKind::BrokenPipe));
        assert_eq!(err.kind(), ErrorKind::SinkWrite);
        assert!(err.is_broken_pipe());

        let err = ConvertError::Config("threads must be at least 1".to_string());
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(!err.is_broken_pipe());
    }

    #[test]
    fn test_decode_message_names_record() {
        let err = ConvertError::Decode {
            path: PathBuf::from("reads.fq"),
            record: 3,
            message: "quality length 4 does not match sequence length 5".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("record 3"));
        assert!(text.contains("reads.fq"));
    }
}
