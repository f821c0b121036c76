use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{ResumeError, ResumeResult};

use super::ResumeRecords;

const RECORD_EXTENSION: &str = "json";

/// The fixed set of record files read from the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordName {
    PersonalInfo,
    Summary,
    Skills,
    Experience,
    Education,
    Certifications,
    SectionLabels,
}

impl RecordName {
    pub const ALL: [RecordName; 7] = [
        RecordName::PersonalInfo,
        RecordName::Summary,
        RecordName::Skills,
        RecordName::Experience,
        RecordName::Education,
        RecordName::Certifications,
        RecordName::SectionLabels,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordName::PersonalInfo => "personal-info",
            RecordName::Summary => "summary",
            RecordName::Skills => "skills",
            RecordName::Experience => "experience",
            RecordName::Education => "education",
            RecordName::Certifications => "certifications",
            RecordName::SectionLabels => "section-labels",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{RECORD_EXTENSION}", self.as_str())
    }
}

/// Reads and parses a single record from `data_dir`.
pub fn load_record<T: DeserializeOwned>(data_dir: &Path, record: RecordName) -> ResumeResult<T> {
    let path = data_dir.join(record.file_name());
    let data = match fs::read_to_string(&path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ResumeError::MissingFile {
                record: record.as_str().into(),
                path,
            })
        }
        Err(err) => return Err(ResumeError::io(path, err)),
    };
    debug!(record = record.as_str(), bytes = data.len(), "read record");
    serde_json::from_str(&data)
        .map_err(|err| ResumeError::malformed(record.as_str(), err.to_string()))
}

/// Loads every record or none of them.
///
/// The first missing or malformed record aborts the load; nothing else in the
/// run has happened yet at that point.
pub fn load_records(data_dir: &Path) -> ResumeResult<ResumeRecords> {
    let records = ResumeRecords {
        personal_info: load_record(data_dir, RecordName::PersonalInfo)?,
        summary: load_record(data_dir, RecordName::Summary)?,
        skills: load_record(data_dir, RecordName::Skills)?,
        experience: load_record(data_dir, RecordName::Experience)?,
        education: load_record(data_dir, RecordName::Education)?,
        certifications: load_record(data_dir, RecordName::Certifications)?,
        section_labels: load_record(data_dir, RecordName::SectionLabels)?,
    };
    info!(
        data_dir = %data_dir.display(),
        records = RecordName::ALL.len(),
        "loaded resume records"
    );
    Ok(records)
}
