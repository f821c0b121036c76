//! Typed resume records.
//!
//! Each record maps to one file in the data directory. Records are loaded
//! once per run, never mutated, and dropped when the run ends. Every string
//! that reaches the rendered document comes from exactly one field below.

pub mod loader;

pub use loader::{load_record, load_records, RecordName};

use serde::{Deserialize, Serialize};

/// Contact block shown in the first-page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: String,
}

/// Skill lines in rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsData {
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub company: String,
    pub location: String,
    pub roles: Vec<Role>,
}

/// A role that carries its own employer, used by the flat history shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRole {
    pub title: String,
    pub company: String,
    pub location: String,
    pub date: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlierCareer {
    pub title: String,
    pub description: String,
}

/// Primary work history in one of the two accepted shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkHistory {
    ByCompany(Vec<Company>),
    Flat(Vec<FlatRole>),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ExperienceFile")]
pub struct ExperienceData {
    pub history: WorkHistory,
    pub earlier_career: Option<EarlierCareer>,
    pub additional_companies: Vec<Company>,
}

impl ExperienceData {
    /// True when the earlier-career section has anything to show.
    pub fn has_earlier_career(&self) -> bool {
        self.earlier_career.is_some() || !self.additional_companies.is_empty()
    }
}

/// On-disk layout of `experience.json` before the shape is resolved.
#[derive(Debug, Deserialize)]
struct ExperienceFile {
    #[serde(default)]
    companies: Option<Vec<Company>>,
    #[serde(default)]
    roles: Option<Vec<FlatRole>>,
    #[serde(default)]
    earlier_career: Option<EarlierCareer>,
    #[serde(default)]
    additional_companies: Vec<Company>,
}

impl TryFrom<ExperienceFile> for ExperienceData {
    type Error = String;

    fn try_from(file: ExperienceFile) -> Result<Self, Self::Error> {
        let history = match (file.companies, file.roles) {
            (Some(companies), None) => WorkHistory::ByCompany(companies),
            (None, Some(roles)) => WorkHistory::Flat(roles),
            (Some(_), Some(_)) => {
                return Err(
                    "both 'companies' and 'roles' are present; supply exactly one history shape"
                        .into(),
                )
            }
            (None, None) => return Err("expected either 'companies' or 'roles'".into()),
        };
        Ok(Self {
            history,
            earlier_career: file.earlier_career,
            additional_companies: file.additional_companies,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degree {
    pub degree: String,
    pub institution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationData {
    pub degrees: Vec<Degree>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationsData {
    pub certifications: Vec<String>,
}

/// Display strings for every section heading. All keys are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLabels {
    pub professional_summary: String,
    pub key_skills: String,
    pub professional_experience: String,
    pub earlier_career: String,
    pub education: String,
    pub certifications: String,
}

/// Everything one generation run consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeRecords {
    pub personal_info: PersonalInfo,
    pub summary: Summary,
    pub skills: SkillsData,
    pub experience: ExperienceData,
    pub education: EducationData,
    pub certifications: CertificationsData,
    pub section_labels: SectionLabels,
}
