//! In-memory page-layout document.
//!
//! This is the artifact the section renderers append to. It mirrors the small
//! capability set a word-processing engine offers: page margins, a default
//! font, styled paragraphs made of runs and hyperlinks, fixed-width tables and
//! a header region that appears on the first page only. Nothing here touches
//! the filesystem; see [`docx`] for serialization.

pub mod docx;

pub use docx::to_docx_bytes;

use chrono::{DateTime, Utc};

/// Length in typographic points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pt(pub f32);

impl Pt {
    /// Half-points, the unit WordprocessingML uses for font sizes.
    pub fn half_points(self) -> u32 {
        (self.0 * 2.0).round() as u32
    }

    /// Twentieths of a point, used for spacing.
    pub fn twips(self) -> u32 {
        (self.0 * 20.0).round() as u32
    }
}

/// Length in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inches(pub f32);

impl Inches {
    pub fn twips(self) -> u32 {
        (self.0 * 1440.0).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Inches,
    pub bottom: Inches,
    pub left: Inches,
    pub right: Inches,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub width: Inches,
    pub height: Inches,
    pub margins: Margins,
    /// Distance from the page edge to the header region.
    pub header_distance: Inches,
}

impl PageSetup {
    /// US Letter with the given margins.
    pub fn letter(margins: Margins) -> Self {
        Self {
            width: Inches(8.5),
            height: Inches(11.0),
            margins,
            header_distance: Inches(0.5),
        }
    }

    /// Width between the left and right margins.
    pub fn text_width(&self) -> Inches {
        Inches(self.width.0 - self.margins.left.0 - self.margins.right.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: Pt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

/// A run of uniformly formatted text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub size: Option<Pt>,
    pub color: Option<Rgb>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn size(mut self, size: Pt) -> Self {
        self.size = Some(size);
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(Run),
    /// Line break inside the paragraph.
    Break,
    Hyperlink { url: String, run: Run },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphFormat {
    pub alignment: Option<Alignment>,
    pub space_before: Option<Pt>,
    pub space_after: Option<Pt>,
    /// Multiple of single line spacing.
    pub line_spacing: Option<f32>,
    pub left_indent: Option<Inches>,
    /// Render with the bulleted-list paragraph style.
    pub list_bullet: bool,
    /// Background fill behind the whole paragraph.
    pub shading: Option<Rgb>,
}

impl ParagraphFormat {
    /// Zero spacing above and below, the default for dense resume lines.
    pub fn tight() -> Self {
        Self {
            space_before: Some(Pt(0.0)),
            space_after: Some(Pt(0.0)),
            ..Self::default()
        }
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn spacing(mut self, before: Pt, after: Pt) -> Self {
        self.space_before = Some(before);
        self.space_after = Some(after);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub inlines: Vec<Inline>,
    pub format: ParagraphFormat,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: ParagraphFormat) -> Self {
        Self {
            inlines: Vec::new(),
            format,
        }
    }

    pub fn push_run(&mut self, run: Run) -> &mut Self {
        self.inlines.push(Inline::Text(run));
        self
    }

    pub fn push_break(&mut self) -> &mut Self {
        self.inlines.push(Inline::Break);
        self
    }

    pub fn push_hyperlink(&mut self, url: impl Into<String>, run: Run) -> &mut Self {
        self.inlines.push(Inline::Hyperlink {
            url: url.into(),
            run,
        });
        self
    }

    /// Visible text with breaks rendered as `\n`.
    pub fn text(&self) -> String {
        self.inlines
            .iter()
            .map(|inline| match inline {
                Inline::Text(run) | Inline::Hyperlink { run, .. } => run.text.as_str(),
                Inline::Break => "\n",
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inlines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
    pub vertical_alignment: Option<VerticalAlignment>,
}

impl Cell {
    fn blank() -> Self {
        Self {
            paragraphs: vec![Paragraph::new()],
            vertical_alignment: None,
        }
    }

    /// The cell's first paragraph, which always exists.
    pub fn paragraph_mut(&mut self) -> &mut Paragraph {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph::new());
        }
        &mut self.paragraphs[0]
    }

    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table whose column widths never change with content.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub column_widths: Vec<Inches>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates `rows` rows of blank cells, one per column width.
    pub fn new(rows: usize, column_widths: Vec<Inches>) -> Self {
        let columns = column_widths.len();
        Self {
            rows: (0..rows)
                .map(|_| (0..columns).map(|_| Cell::blank()).collect())
                .collect(),
            column_widths,
        }
    }

    pub fn columns(&self) -> usize {
        self.column_widths.len()
    }

    pub fn width(&self) -> Inches {
        Inches(self.column_widths.iter().map(|w| w.0).sum())
    }

    /// Mutable access to a cell; `None` when out of range.
    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|cells| cells.get_mut(column))
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Cell texts in row-major order, one per line.
    pub fn text(&self) -> String {
        self.rows
            .iter()
            .flatten()
            .map(Cell::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

impl Block {
    pub fn text(&self) -> String {
        match self {
            Block::Paragraph(paragraph) => paragraph.text(),
            Block::Table(table) => table.text(),
        }
    }
}

/// Package metadata written to the core properties part.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentProperties {
    pub title: String,
    pub creator: String,
    pub created: DateTime<Utc>,
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            title: String::new(),
            creator: String::new(),
            created: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page: PageSetup,
    pub default_font: FontSpec,
    pub properties: DocumentProperties,
    first_page_header: Vec<Block>,
    body: Vec<Block>,
}

impl Document {
    pub fn new(page: PageSetup, default_font: FontSpec) -> Self {
        Self {
            page,
            default_font,
            properties: DocumentProperties::default(),
            first_page_header: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(Block::Paragraph(paragraph));
    }

    pub fn add_table(&mut self, table: Table) {
        self.body.push(Block::Table(table));
    }

    /// Appends to the header shown only on the first page.
    pub fn add_header_block(&mut self, block: Block) {
        self.first_page_header.push(block);
    }

    pub fn body(&self) -> &[Block] {
        &self.body
    }

    pub fn first_page_header(&self) -> &[Block] {
        &self.first_page_header
    }
}
