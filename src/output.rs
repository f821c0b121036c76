//! Versioned output files.
//!
//! Every run writes a new `<Name>_Resume_<N>.<ext>` next to the previous ones;
//! an existing file is never replaced.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::error::{ResumeError, ResumeResult};

const NAME_SEPARATOR: char = '_';
const RESUME_SUFFIX: &str = "Resume";

/// Where a generated document landed and what was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDescriptor {
    pub path: PathBuf,
    pub version: u32,
    pub size_bytes: u64,
    pub checksum: String,
}

/// `"jane doe"` becomes `Jane_Doe_Resume`.
pub fn base_filename(person_name: &str) -> String {
    let joined = person_name.replace(' ', &NAME_SEPARATOR.to_string());
    format!("{}{NAME_SEPARATOR}{RESUME_SUFFIX}", title_case(&joined))
}

/// Upper-cases the first letter of every letter run and lower-cases the rest.
fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(ch);
            previous_is_letter = false;
        }
    }
    result
}

/// Smallest `N >= 1` for which `<base>_<N>.<extension>` is absent from `dir`.
pub fn next_available_path(dir: &Path, base: &str, extension: &str) -> (PathBuf, u32) {
    let mut version = 1;
    loop {
        let path = dir.join(format!("{base}{NAME_SEPARATOR}{version}.{extension}"));
        if !path.exists() {
            return (path, version);
        }
        debug!(path = %path.display(), "version taken");
        version += 1;
    }
}

/// Writes `bytes` to the next free versioned path under `dir`.
///
/// The directory is created when missing. The file is opened with
/// create-new semantics, so a file that appears between the existence check
/// and the write makes this fail instead of being overwritten. A failed write
/// removes the file it created, leaving the version free for the next run.
pub fn write_document(
    dir: &Path,
    person_name: &str,
    extension: &str,
    bytes: &[u8],
) -> ResumeResult<OutputDescriptor> {
    fs::create_dir_all(dir).map_err(|err| ResumeError::io(dir, err))?;
    let base = base_filename(person_name);
    let (path, version) = next_available_path(dir, &base, extension);

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|err| ResumeError::io(&path, err))?;
    let written = file.write_all(bytes).and_then(|_| file.sync_all());
    drop(file);
    discard_on_error(&path, written)?;

    let checksum = format!("{:x}", Sha256::digest(bytes));
    info!(
        path = %path.display(),
        version,
        size_bytes = bytes.len(),
        checksum = %checksum,
        "wrote resume"
    );
    Ok(OutputDescriptor {
        path,
        version,
        size_bytes: bytes.len() as u64,
        checksum,
    })
}

/// Removes a partially written `path` when `written` failed.
fn discard_on_error(path: &Path, written: io::Result<()>) -> ResumeResult<()> {
    let Err(err) = written else {
        return Ok(());
    };
    if let Err(cleanup) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %cleanup, "could not remove partial output");
    }
    Err(ResumeError::io(path, err))
}
