//! Turns loaded records into a styled [`Document`].
//!
//! [`ResumeBuilder`] owns the document under construction and is handed to
//! each section renderer in turn. Section order is fixed by
//! [`ResumeBuilder::render`]; the outline it records is what tests and logs
//! use to confirm that order.

pub mod layout;
pub mod sections;

use tracing::debug;

use crate::document::{Document, PageSetup, Paragraph, ParagraphFormat, Run};
use crate::records::ResumeRecords;
use crate::style::StyleConfig;

pub use layout::{flatten_certifications, grid_rows};

/// Resume sections in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Header,
    Summary,
    Skills,
    Experience,
    EarlierCareer,
    Education,
    Certifications,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Summary => "summary",
            SectionKind::Skills => "skills",
            SectionKind::Experience => "experience",
            SectionKind::EarlierCareer => "earlier_career",
            SectionKind::Education => "education",
            SectionKind::Certifications => "certifications",
        }
    }
}

/// One rendered section; the header carries no heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub kind: SectionKind,
    pub heading: Option<String>,
}

/// Finished document plus the sections it contains, in order.
#[derive(Debug, Clone)]
pub struct RenderedResume {
    pub document: Document,
    pub outline: Vec<OutlineEntry>,
}

impl RenderedResume {
    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.outline.iter().map(|entry| entry.kind).collect()
    }

    pub fn headings(&self) -> Vec<&str> {
        self.outline
            .iter()
            .filter_map(|entry| entry.heading.as_deref())
            .collect()
    }
}

pub struct ResumeBuilder {
    style: StyleConfig,
    document: Document,
    outline: Vec<OutlineEntry>,
}

impl ResumeBuilder {
    pub fn new(style: StyleConfig) -> Self {
        let document = Document::new(PageSetup::letter(style.margins), style.font.clone());
        Self {
            style,
            document,
            outline: Vec::new(),
        }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Renders every section top to bottom and returns the finished artifact.
    pub fn render(mut self, records: &ResumeRecords) -> RenderedResume {
        let labels = &records.section_labels;
        sections::render_header(&mut self, &records.personal_info);
        sections::render_summary(&mut self, &labels.professional_summary, &records.summary);
        sections::render_skills(&mut self, &labels.key_skills, &records.skills);
        sections::render_experience(
            &mut self,
            &labels.professional_experience,
            &records.experience,
        );
        if records.experience.has_earlier_career() {
            sections::render_earlier_career(&mut self, &labels.earlier_career, &records.experience);
        }
        sections::render_education(&mut self, &labels.education, &records.education);
        sections::render_certifications(&mut self, &labels.certifications, &records.certifications);
        self.finish()
    }

    /// Records a section without a heading paragraph.
    pub fn begin_section(&mut self, kind: SectionKind) {
        debug!(section = kind.as_str(), "rendering section");
        self.outline.push(OutlineEntry {
            kind,
            heading: None,
        });
    }

    /// Appends the styled heading that opens a labelled section.
    pub fn add_section_heading(&mut self, kind: SectionKind, label: &str) {
        let heading = &self.style.heading;
        let text = layout::apply_case(label, heading.uppercase);
        let mut format =
            ParagraphFormat::default().spacing(heading.space_before, heading.space_after);
        format.shading = heading.background;
        let mut paragraph = Paragraph::with_format(format);
        paragraph.push_run(
            Run::new(text.clone())
                .bold()
                .size(heading.size)
                .color(heading.foreground),
        );
        self.document.add_paragraph(paragraph);
        debug!(section = kind.as_str(), heading = %text, "rendering section");
        self.outline.push(OutlineEntry {
            kind,
            heading: Some(text),
        });
    }

    pub fn finish(self) -> RenderedResume {
        RenderedResume {
            document: self.document,
            outline: self.outline,
        }
    }
}
