//! Presentation policy for the rendered resume.
//!
//! A single renderer consumes a [`StyleConfig`]; the named variants below
//! supply every font size, color, spacing and column width as constants.
//! Nothing here is derived from the loaded records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::{FontSpec, Inches, Margins, Pt, Rgb};

/// Named styling presets selectable from config or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderVariant {
    /// Dense one-page layout with a three-column contact header.
    #[default]
    Compact,
    /// Centered contact lines and shaded section headings.
    Classic,
    /// Three-column header with light heading bands.
    Banner,
}

impl RenderVariant {
    pub const ALL: [RenderVariant; 3] = [
        RenderVariant::Compact,
        RenderVariant::Classic,
        RenderVariant::Banner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderVariant::Compact => "compact",
            RenderVariant::Classic => "classic",
            RenderVariant::Banner => "banner",
        }
    }
}

impl fmt::Display for RenderVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderVariant {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        RenderVariant::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                format!("unknown variant '{value}' (expected compact, classic or banner)")
            })
    }
}

/// How the contact block is laid out in the first-page header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderLayout {
    /// Email/phone | name | profile links, in fixed-width columns.
    Table3Col { columns: [Inches; 3] },
    /// Name on its own centered line, contact details centered below.
    InlineCentered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderStyle {
    pub layout: HeaderLayout,
    pub name_size: Pt,
    pub name_color: Rgb,
    pub uppercase_name: bool,
    pub contact_size: Pt,
    pub link_color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadingStyle {
    pub size: Pt,
    pub foreground: Rgb,
    pub background: Option<Rgb>,
    pub uppercase: bool,
    pub space_before: Pt,
    pub space_after: Pt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceStyle {
    pub company_size: Pt,
    pub company_color: Rgb,
    pub company_space_before: Pt,
    pub role_size: Pt,
    pub role_color: Rgb,
    /// Title column, date column.
    pub role_columns: [Inches; 2],
    pub subline_space_after: Pt,
    pub bullet_size: Pt,
    pub bullet_indent: Inches,
    pub bullet_line_spacing: f32,
}

/// How each degree is laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EducationLayout {
    /// Bold degree followed by ", institution" on one line.
    Inline,
    /// Degree and institution in fixed-width columns.
    Table { columns: [Inches; 2] },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CertificationStyle {
    pub columns: [Inches; 2],
    pub size: Pt,
    pub marker: &'static str,
}

/// Complete styling policy for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub variant: RenderVariant,
    pub margins: Margins,
    pub font: FontSpec,
    pub header: HeaderStyle,
    pub heading: HeadingStyle,
    pub experience: ExperienceStyle,
    pub education: EducationLayout,
    pub certifications: CertificationStyle,
}

const SLATE: Rgb = Rgb(46, 64, 83);
const NAVY: Rgb = Rgb(0, 51, 102);
const LINK_BLUE: Rgb = Rgb(0, 102, 204);
const WHITE: Rgb = Rgb(255, 255, 255);
const PALE_BLUE: Rgb = Rgb(217, 226, 243);

impl StyleConfig {
    pub fn for_variant(variant: RenderVariant) -> Self {
        match variant {
            RenderVariant::Compact => Self::compact(),
            RenderVariant::Classic => Self::classic(),
            RenderVariant::Banner => Self::banner(),
        }
    }

    fn compact() -> Self {
        Self {
            variant: RenderVariant::Compact,
            margins: Margins {
                top: Inches(0.2),
                bottom: Inches(0.2),
                left: Inches(0.5),
                right: Inches(0.5),
            },
            font: FontSpec {
                family: "Arial".into(),
                size: Pt(8.0),
            },
            header: HeaderStyle {
                layout: HeaderLayout::Table3Col {
                    columns: [Inches(2.0), Inches(3.5), Inches(2.0)],
                },
                name_size: Pt(18.0),
                name_color: SLATE,
                uppercase_name: true,
                contact_size: Pt(8.0),
                link_color: LINK_BLUE,
            },
            heading: HeadingStyle {
                size: Pt(9.0),
                foreground: SLATE,
                background: None,
                uppercase: true,
                space_before: Pt(3.0),
                space_after: Pt(0.0),
            },
            experience: ExperienceStyle {
                company_size: Pt(9.0),
                company_color: NAVY,
                company_space_before: Pt(2.0),
                role_size: Pt(9.0),
                role_color: SLATE,
                role_columns: [Inches(5.5), Inches(2.0)],
                subline_space_after: Pt(1.0),
                bullet_size: Pt(8.0),
                bullet_indent: Inches(0.25),
                bullet_line_spacing: 1.0,
            },
            education: EducationLayout::Inline,
            certifications: CertificationStyle {
                columns: [Inches(3.75), Inches(3.75)],
                size: Pt(8.0),
                marker: "• ",
            },
        }
    }

    fn classic() -> Self {
        Self {
            variant: RenderVariant::Classic,
            margins: Margins {
                top: Inches(0.5),
                bottom: Inches(0.5),
                left: Inches(0.5),
                right: Inches(0.5),
            },
            font: FontSpec {
                family: "Calibri".into(),
                size: Pt(10.0),
            },
            header: HeaderStyle {
                layout: HeaderLayout::InlineCentered,
                name_size: Pt(20.0),
                name_color: SLATE,
                uppercase_name: false,
                contact_size: Pt(9.0),
                link_color: LINK_BLUE,
            },
            heading: HeadingStyle {
                size: Pt(11.0),
                foreground: WHITE,
                background: Some(SLATE),
                uppercase: true,
                space_before: Pt(6.0),
                space_after: Pt(2.0),
            },
            experience: ExperienceStyle {
                company_size: Pt(10.5),
                company_color: NAVY,
                company_space_before: Pt(4.0),
                role_size: Pt(10.0),
                role_color: SLATE,
                role_columns: [Inches(5.5), Inches(2.0)],
                subline_space_after: Pt(2.0),
                bullet_size: Pt(9.5),
                bullet_indent: Inches(0.25),
                bullet_line_spacing: 1.0,
            },
            education: EducationLayout::Inline,
            certifications: CertificationStyle {
                columns: [Inches(3.75), Inches(3.75)],
                size: Pt(9.5),
                marker: "• ",
            },
        }
    }

    fn banner() -> Self {
        Self {
            variant: RenderVariant::Banner,
            margins: Margins {
                top: Inches(0.4),
                bottom: Inches(0.4),
                left: Inches(0.6),
                right: Inches(0.6),
            },
            font: FontSpec {
                family: "Arial".into(),
                size: Pt(9.0),
            },
            header: HeaderStyle {
                layout: HeaderLayout::Table3Col {
                    columns: [Inches(2.0), Inches(3.3), Inches(2.0)],
                },
                name_size: Pt(18.0),
                name_color: NAVY,
                uppercase_name: true,
                contact_size: Pt(8.5),
                link_color: LINK_BLUE,
            },
            heading: HeadingStyle {
                size: Pt(10.0),
                foreground: NAVY,
                background: Some(PALE_BLUE),
                uppercase: true,
                space_before: Pt(4.0),
                space_after: Pt(1.0),
            },
            experience: ExperienceStyle {
                company_size: Pt(10.0),
                company_color: NAVY,
                company_space_before: Pt(3.0),
                role_size: Pt(9.5),
                role_color: SLATE,
                role_columns: [Inches(5.3), Inches(2.0)],
                subline_space_after: Pt(1.0),
                bullet_size: Pt(9.0),
                bullet_indent: Inches(0.25),
                bullet_line_spacing: 1.0,
            },
            education: EducationLayout::Table {
                columns: [Inches(4.3), Inches(3.0)],
            },
            certifications: CertificationStyle {
                columns: [Inches(3.65), Inches(3.65)],
                size: Pt(9.0),
                marker: "• ",
            },
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::for_variant(RenderVariant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageSetup;

    #[test]
    fn variant_names_round_trip_through_from_str() {
        for variant in RenderVariant::ALL {
            assert_eq!(variant.as_str().parse::<RenderVariant>(), Ok(variant));
        }
        assert_eq!("Classic".parse::<RenderVariant>(), Ok(RenderVariant::Classic));
        assert!("glossy".parse::<RenderVariant>().is_err());
    }

    #[test]
    fn tables_fit_inside_the_text_width() {
        for variant in RenderVariant::ALL {
            let style = StyleConfig::for_variant(variant);
            let available = PageSetup::letter(style.margins).text_width().0 + 0.001;
            let role: f32 = style.experience.role_columns.iter().map(|w| w.0).sum();
            let certs: f32 = style.certifications.columns.iter().map(|w| w.0).sum();
            assert!(role <= available, "{variant}: role line {role} > {available}");
            assert!(certs <= available, "{variant}: certifications {certs} > {available}");
            if let EducationLayout::Table { columns } = style.education {
                let education: f32 = columns.iter().map(|w| w.0).sum();
                assert!(education <= available, "{variant}: education {education} > {available}");
            }
            if let HeaderLayout::Table3Col { columns } = style.header.layout {
                let header: f32 = columns.iter().map(|w| w.0).sum();
                assert!(header <= available, "{variant}: header {header} > {available}");
            }
        }
    }

    #[test]
    fn compact_is_the_default_variant() {
        let style = StyleConfig::default();
        assert_eq!(style.variant, RenderVariant::Compact);
        assert_eq!(style.font.family, "Arial");
        assert!(style.heading.background.is_none());
    }
}
