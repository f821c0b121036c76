//! One rendering routine per resume section.
//!
//! Each routine reads only the record slice it is given and appends to the
//! builder's document. Styling comes from the builder's [`StyleConfig`].
//!
//! [`StyleConfig`]: crate::style::StyleConfig

use crate::document::{
    Alignment, Block, Paragraph, ParagraphFormat, Pt, Run, Table, VerticalAlignment,
};
use crate::records::{
    CertificationsData, Company, EducationData, ExperienceData, PersonalInfo, SkillsData, Summary,
    WorkHistory,
};
use crate::style::{EducationLayout, HeaderLayout};

use super::layout::{apply_case, flatten_certifications, grid_rows};
use super::{ResumeBuilder, SectionKind};

const LINKEDIN_CAPTION: &str = "LinkedIn";
const GITHUB_CAPTION: &str = "GitHub";
const INLINE_SEPARATOR: &str = " | ";

pub fn render_header(builder: &mut ResumeBuilder, info: &PersonalInfo) {
    builder.begin_section(SectionKind::Header);
    let header = builder.style().header.clone();
    let name = apply_case(&info.name, header.uppercase_name);
    let contact = |text: &str| Run::new(text).size(header.contact_size);
    let link = |text: &str| {
        Run::new(text)
            .size(header.contact_size)
            .color(header.link_color)
            .underline()
    };
    let name_run = Run::new(name)
        .bold()
        .size(header.name_size)
        .color(header.name_color);

    let document = builder.document_mut();
    document.properties.title = format!("{} Resume", info.name);
    document.properties.creator = info.name.clone();

    match header.layout {
        HeaderLayout::Table3Col { columns } => {
            let mut table = Table::new(1, columns.to_vec());
            if let Some(cell) = table.cell_mut(0, 0) {
                cell.vertical_alignment = Some(VerticalAlignment::Center);
                let paragraph = cell.paragraph_mut();
                paragraph.format.alignment = Some(Alignment::Left);
                paragraph
                    .push_hyperlink(format!("mailto:{}", info.email), link(&info.email))
                    .push_break()
                    .push_run(contact(&info.phone));
            }
            if let Some(cell) = table.cell_mut(0, 1) {
                cell.vertical_alignment = Some(VerticalAlignment::Center);
                let paragraph = cell.paragraph_mut();
                paragraph.format.alignment = Some(Alignment::Center);
                paragraph
                    .push_run(name_run)
                    .push_break()
                    .push_run(contact(&info.location));
            }
            if let Some(cell) = table.cell_mut(0, 2) {
                cell.vertical_alignment = Some(VerticalAlignment::Center);
                let paragraph = cell.paragraph_mut();
                paragraph.format.alignment = Some(Alignment::Right);
                paragraph
                    .push_hyperlink(info.linkedin.as_str(), link(LINKEDIN_CAPTION))
                    .push_run(contact(INLINE_SEPARATOR))
                    .push_hyperlink(info.github.as_str(), link(GITHUB_CAPTION));
            }
            document.add_header_block(Block::Table(table));
        }
        HeaderLayout::InlineCentered => {
            let mut name_line =
                Paragraph::with_format(ParagraphFormat::tight().align(Alignment::Center));
            name_line.push_run(name_run);
            document.add_header_block(Block::Paragraph(name_line));

            let mut contact_line =
                Paragraph::with_format(ParagraphFormat::tight().align(Alignment::Center));
            contact_line
                .push_run(contact(&info.location))
                .push_run(contact(INLINE_SEPARATOR))
                .push_run(contact(&info.phone))
                .push_run(contact(INLINE_SEPARATOR))
                .push_hyperlink(format!("mailto:{}", info.email), link(&info.email))
                .push_run(contact(INLINE_SEPARATOR))
                .push_hyperlink(info.linkedin.as_str(), link(LINKEDIN_CAPTION))
                .push_run(contact(INLINE_SEPARATOR))
                .push_hyperlink(info.github.as_str(), link(GITHUB_CAPTION));
            document.add_header_block(Block::Paragraph(contact_line));
        }
    }
}

pub fn render_summary(builder: &mut ResumeBuilder, label: &str, summary: &Summary) {
    builder.add_section_heading(SectionKind::Summary, label);
    let mut format = ParagraphFormat::default().align(Alignment::Justify);
    format.space_after = Some(Pt(0.0));
    let mut paragraph = Paragraph::with_format(format);
    paragraph.push_run(Run::new(summary.text.as_str()));
    builder.document_mut().add_paragraph(paragraph);
}

pub fn render_skills(builder: &mut ResumeBuilder, label: &str, skills: &SkillsData) {
    builder.add_section_heading(SectionKind::Skills, label);
    for skill in &skills.categories {
        let mut paragraph =
            Paragraph::with_format(ParagraphFormat::tight().align(Alignment::Justify));
        paragraph
            .push_run(Run::new(format!("{} ", skill.category)).bold())
            .push_run(Run::new(skill.items.as_str()));
        builder.document_mut().add_paragraph(paragraph);
    }
}

pub fn render_experience(builder: &mut ResumeBuilder, label: &str, experience: &ExperienceData) {
    builder.add_section_heading(SectionKind::Experience, label);
    match &experience.history {
        WorkHistory::ByCompany(companies) => {
            for company in companies {
                add_company(builder, company);
            }
        }
        WorkHistory::Flat(roles) => {
            for role in roles {
                let employer = format!("{}{INLINE_SEPARATOR}{}", role.company, role.location);
                add_role_line(builder, &role.title, &role.date, Some(employer.as_str()));
                add_bullets(builder, &role.bullets);
            }
        }
    }
}

/// Free-text earlier career entry first, then any additional companies.
pub fn render_earlier_career(
    builder: &mut ResumeBuilder,
    label: &str,
    experience: &ExperienceData,
) {
    builder.add_section_heading(SectionKind::EarlierCareer, label);
    if let Some(earlier) = &experience.earlier_career {
        let style = builder.style().experience.clone();
        let mut title = Paragraph::with_format(
            ParagraphFormat::tight().spacing(style.company_space_before, Pt(0.0)),
        );
        title.push_run(
            Run::new(earlier.title.as_str())
                .bold()
                .size(style.role_size)
                .color(style.role_color),
        );
        builder.document_mut().add_paragraph(title);

        let mut description =
            Paragraph::with_format(ParagraphFormat::tight().align(Alignment::Justify));
        description.push_run(Run::new(earlier.description.as_str()));
        builder.document_mut().add_paragraph(description);
    }
    for company in &experience.additional_companies {
        add_company(builder, company);
    }
}

pub fn render_education(builder: &mut ResumeBuilder, label: &str, education: &EducationData) {
    builder.add_section_heading(SectionKind::Education, label);
    let layout = builder.style().education;
    match layout {
        EducationLayout::Inline => {
            for degree in &education.degrees {
                let mut paragraph = Paragraph::with_format(ParagraphFormat::tight());
                paragraph
                    .push_run(Run::new(degree.degree.as_str()).bold())
                    .push_run(Run::new(format!(", {}", degree.institution)));
                builder.document_mut().add_paragraph(paragraph);
            }
        }
        EducationLayout::Table { columns } => {
            if education.degrees.is_empty() {
                return;
            }
            let mut table = Table::new(education.degrees.len(), columns.to_vec());
            for (row, degree) in education.degrees.iter().enumerate() {
                if let Some(cell) = table.cell_mut(row, 0) {
                    let paragraph = cell.paragraph_mut();
                    paragraph.format = ParagraphFormat::tight();
                    paragraph.push_run(Run::new(degree.degree.as_str()).bold());
                }
                if let Some(cell) = table.cell_mut(row, 1) {
                    let paragraph = cell.paragraph_mut();
                    paragraph.format = ParagraphFormat::tight().align(Alignment::Right);
                    paragraph.push_run(Run::new(degree.institution.as_str()));
                }
            }
            builder.document_mut().add_table(table);
        }
    }
}

/// Lays certifications out in a two-column grid, row-major.
pub fn render_certifications(
    builder: &mut ResumeBuilder,
    label: &str,
    certifications: &CertificationsData,
) {
    builder.add_section_heading(SectionKind::Certifications, label);
    let style = builder.style().certifications.clone();
    let entries = flatten_certifications(&certifications.certifications);
    let rows = grid_rows(&entries, style.columns.len());
    if rows.is_empty() {
        return;
    }
    let mut table = Table::new(rows.len(), style.columns.to_vec());
    for (row_index, row) in rows.iter().enumerate() {
        for (column, entry) in row.iter().enumerate() {
            let (Some(entry), Some(cell)) = (entry, table.cell_mut(row_index, column)) else {
                continue;
            };
            let paragraph = cell.paragraph_mut();
            paragraph.format = ParagraphFormat::tight();
            paragraph.push_run(Run::new(format!("{}{entry}", style.marker)).size(style.size));
        }
    }
    builder.document_mut().add_table(table);
}

fn add_company(builder: &mut ResumeBuilder, company: &Company) {
    let style = builder.style().experience.clone();
    let mut paragraph = Paragraph::with_format(
        ParagraphFormat::tight().spacing(style.company_space_before, Pt(0.0)),
    );
    paragraph.push_run(
        Run::new(format!(
            "{}{INLINE_SEPARATOR}{}",
            company.company, company.location
        ))
        .bold()
        .size(style.company_size)
        .color(style.company_color),
    );
    builder.document_mut().add_paragraph(paragraph);
    for role in &company.roles {
        add_role_line(builder, &role.title, &role.date, None);
        add_bullets(builder, &role.bullets);
    }
}

/// Title on the left, date on the right, optional italic employer line below.
fn add_role_line(builder: &mut ResumeBuilder, title: &str, date: &str, employer: Option<&str>) {
    let style = builder.style().experience.clone();
    let mut table = Table::new(1, style.role_columns.to_vec());
    if let Some(cell) = table.cell_mut(0, 0) {
        let paragraph = cell.paragraph_mut();
        paragraph.format = ParagraphFormat::tight();
        paragraph.push_run(
            Run::new(title)
                .bold()
                .size(style.role_size)
                .color(style.role_color),
        );
    }
    if let Some(cell) = table.cell_mut(0, 1) {
        cell.vertical_alignment = Some(VerticalAlignment::Center);
        let paragraph = cell.paragraph_mut();
        paragraph.format = ParagraphFormat::tight().align(Alignment::Right);
        paragraph.push_run(Run::new(date).bold().size(style.role_size));
    }
    builder.document_mut().add_table(table);

    if let Some(employer) = employer {
        let mut format = ParagraphFormat::default();
        format.space_after = Some(style.subline_space_after);
        let mut paragraph = Paragraph::with_format(format);
        paragraph.push_run(Run::new(employer).italic());
        builder.document_mut().add_paragraph(paragraph);
    }
}

fn add_bullets(builder: &mut ResumeBuilder, bullets: &[String]) {
    let style = builder.style().experience.clone();
    for bullet in bullets {
        let mut format = ParagraphFormat::tight().align(Alignment::Justify);
        format.list_bullet = true;
        format.line_spacing = Some(style.bullet_line_spacing);
        format.left_indent = Some(style.bullet_indent);
        let mut paragraph = Paragraph::with_format(format);
        paragraph.push_run(Run::new(bullet.as_str()).size(style.bullet_size));
        builder.document_mut().add_paragraph(paragraph);
    }
}
