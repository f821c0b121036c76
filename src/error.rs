use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions raised while generating a resume.
///
/// None of these are retried: the run aborts and the error is surfaced to the
/// invoker. Loader failures always happen before the output directory is
/// touched.
#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("record '{record}' not found at {}", path.display())]
    MissingFile { record: String, path: PathBuf },

    #[error("record '{record}' is malformed: {reason}")]
    MalformedData { record: String, reason: String },

    #[error("I/O failure at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to assemble document package: {0}")]
    Package(#[from] zip::result::ZipError),
}

impl ResumeError {
    pub fn malformed(record: impl Into<String>, reason: impl Into<String>) -> Self {
        ResumeError::MalformedData {
            record: record.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ResumeError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ResumeResult<T> = Result<T, ResumeError>;
