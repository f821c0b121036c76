use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use resumegen::{GenerateOptions, GeneratorConfig, RenderVariant};
use serde_json::{json, Value};
use tempfile::TempDir;

/// A throwaway run root with a `data/` directory of record files.
pub struct IntegrationHarness {
    workspace: TempDir,
}

impl IntegrationHarness {
    pub fn new() -> Self {
        let workspace = TempDir::new().expect("failed to create temp workspace");
        fs::create_dir_all(workspace.path().join("data")).expect("failed to create data dir");
        Self { workspace }
    }

    /// Harness pre-populated with a complete, company-grouped record set.
    pub fn with_sample_records() -> Self {
        let harness = Self::new();
        for (record, value) in sample_records() {
            harness.write_record(record, &value);
        }
        harness
    }

    pub fn root(&self) -> &Path {
        self.workspace.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root().join("data")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root().join("generated")
    }

    pub fn write_record(&self, record: &str, value: &Value) {
        let body = serde_json::to_string_pretty(value).expect("failed to encode record");
        fs::write(self.data_dir().join(format!("{record}.json")), body)
            .expect("failed to write record");
    }

    pub fn remove_record(&self, record: &str) {
        fs::remove_file(self.data_dir().join(format!("{record}.json")))
            .expect("failed to remove record");
    }

    pub fn options(&self, variant: RenderVariant) -> GenerateOptions {
        let config = GeneratorConfig {
            variant,
            ..GeneratorConfig::default()
        };
        GenerateOptions::from_config(&config, self.root())
    }

    pub fn generated_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = match fs::read_dir(self.output_dir()) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .collect(),
            Err(_) => Vec::new(),
        };
        files.sort();
        files
    }
}

/// Reads one part of a generated package as UTF-8.
pub fn read_part(path: &Path, part: &str) -> String {
    let file = fs::File::open(path).expect("failed to open package");
    let mut archive = zip::ZipArchive::new(file).expect("generated file is not a zip package");
    let mut entry = archive.by_name(part).expect("part missing from package");
    let mut contents = String::new();
    entry
        .read_to_string(&mut contents)
        .expect("part is not UTF-8");
    contents
}

pub fn sample_records() -> Vec<(&'static str, Value)> {
    vec![
        (
            "personal-info",
            json!({
                "name": "Grace Hopper",
                "email": "grace@example.org",
                "phone": "555-0100",
                "location": "Arlington, VA",
                "linkedin": "https://www.linkedin.com/in/grace",
                "github": "https://github.com/grace"
            }),
        ),
        (
            "summary",
            json!({ "text": "Compiler pioneer with decades of systems experience." }),
        ),
        (
            "skills",
            json!({
                "categories": [
                    { "category": "Languages:", "items": "COBOL, FLOW-MATIC" },
                    { "category": "Leadership:", "items": "Standards committees" }
                ]
            }),
        ),
        (
            "experience",
            json!({
                "companies": [
                    {
                        "company": "Remington Rand",
                        "location": "Philadelphia, PA",
                        "roles": [
                            {
                                "title": "Senior Mathematician",
                                "date": "1949 - 1952",
                                "bullets": [
                                    "Built the first working compiler",
                                    "Led the UNIVAC programming team"
                                ]
                            }
                        ]
                    }
                ],
                "earlier_career": {
                    "title": "Harvard Computation Lab",
                    "description": "Programmed the Mark I during wartime service."
                }
            }),
        ),
        (
            "education",
            json!({
                "degrees": [
                    { "degree": "PhD Mathematics", "institution": "Yale University" }
                ]
            }),
        ),
        (
            "certifications",
            json!({
                "certifications": [
                    "Naval Reserve Officer | Computer Sciences Man of the Year",
                    "Distinguished Service Medal"
                ]
            }),
        ),
        (
            "section-labels",
            json!({
                "professional_summary": "Professional Summary",
                "key_skills": "Key Skills",
                "professional_experience": "Professional Experience",
                "earlier_career": "Earlier Career",
                "education": "Education",
                "certifications": "Certifications"
            }),
        ),
    ]
}

mod cli;
mod generate_end_to_end;
mod record_errors;
