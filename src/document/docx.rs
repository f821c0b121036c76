//! WordprocessingML (`.docx`) serialization.
//!
//! A `.docx` file is a zip package of XML parts. The parts are assembled as
//! strings, then written into an in-memory archive so nothing reaches disk
//! until the output writer commits the bytes.

use std::io::{Cursor, Write};

use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ResumeResult;

use super::{
    Alignment, Block, Cell, Document, Inline, Paragraph, ParagraphFormat, Run, Table,
    VerticalAlignment,
};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_TYPE_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const LIST_BULLET_STYLE: &str = "ListBullet";
const BULLET_NUM_ID: u32 = 1;

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const HEADER_PART: &str = "word/header1.xml";

/// Serializes `document` into the bytes of a `.docx` package.
pub fn to_docx_bytes(document: &Document) -> ResumeResult<Vec<u8>> {
    let has_header = !document.first_page_header().is_empty();

    let mut body_rels = Relationships::new();
    body_rels.add_internal("styles", "styles.xml");
    body_rels.add_internal("numbering", "numbering.xml");
    body_rels.add_internal("settings", "settings.xml");
    let header_rel = if has_header {
        Some(body_rels.add_internal("header", "header1.xml"))
    } else {
        None
    };

    let mut header_rels = Relationships::new();
    let header_xml = if has_header {
        let mut xml = String::new();
        xml.push_str(XML_DECL);
        xml.push_str(&format!(r#"<w:hdr xmlns:w="{W_NS}" xmlns:r="{R_NS}">"#));
        write_blocks(&mut xml, document.first_page_header(), &mut header_rels);
        xml.push_str("</w:hdr>");
        Some(xml)
    } else {
        None
    };

    let document_xml = document_xml(document, &mut body_rels, header_rel.as_deref());

    let cursor = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(cursor);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut parts: Vec<(&str, String)> = vec![
        ("[Content_Types].xml", content_types_xml(has_header)),
        ("_rels/.rels", package_rels_xml()),
        ("docProps/core.xml", core_properties_xml(document)),
        ("docProps/app.xml", app_properties_xml()),
        (DOCUMENT_PART, document_xml),
        ("word/_rels/document.xml.rels", body_rels.to_xml()),
        ("word/styles.xml", styles_xml(document)),
        ("word/numbering.xml", numbering_xml()),
        ("word/settings.xml", settings_xml()),
    ];
    if let Some(header_xml) = header_xml {
        parts.push((HEADER_PART, header_xml));
        parts.push(("word/_rels/header1.xml.rels", header_rels.to_xml()));
    }

    for (name, xml) in parts {
        zip.start_file(name, options)?;
        zip.write_all(xml.as_bytes()).map_err(ZipError::from)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Relationship table for a single part; ids are assigned in insertion order.
struct Relationships {
    entries: Vec<Relationship>,
}

struct Relationship {
    id: String,
    kind: &'static str,
    target: String,
    external: bool,
}

impl Relationships {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn next_id(&self) -> String {
        format!("rId{}", self.entries.len() + 1)
    }

    fn add_internal(&mut self, kind: &'static str, target: &str) -> String {
        let id = self.next_id();
        self.entries.push(Relationship {
            id: id.clone(),
            kind,
            target: target.into(),
            external: false,
        });
        id
    }

    fn add_hyperlink(&mut self, url: &str) -> String {
        if let Some(existing) = self
            .entries
            .iter()
            .find(|rel| rel.external && rel.target == url)
        {
            return existing.id.clone();
        }
        let id = self.next_id();
        self.entries.push(Relationship {
            id: id.clone(),
            kind: "hyperlink",
            target: url.into(),
            external: true,
        });
        id
    }

    fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECL);
        xml.push_str(&format!(r#"<Relationships xmlns="{REL_NS}">"#));
        for rel in &self.entries {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{REL_TYPE_BASE}/{}" Target="{}""#,
                rel.id,
                rel.kind,
                escape_xml(&rel.target)
            ));
            if rel.external {
                xml.push_str(r#" TargetMode="External""#);
            }
            xml.push_str("/>");
        }
        xml.push_str("</Relationships>");
        xml
    }
}

fn document_xml(document: &Document, rels: &mut Relationships, header_rel: Option<&str>) -> String {
    let page = &document.page;
    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push_str(&format!(
        r#"<w:document xmlns:w="{W_NS}" xmlns:r="{R_NS}"><w:body>"#
    ));
    write_blocks(&mut xml, document.body(), rels);
    xml.push_str("<w:sectPr>");
    if let Some(id) = header_rel {
        xml.push_str(&format!(r#"<w:headerReference w:type="first" r:id="{id}"/>"#));
    }
    xml.push_str(&format!(
        r#"<w:pgSz w:w="{}" w:h="{}"/>"#,
        page.width.twips(),
        page.height.twips()
    ));
    xml.push_str(&format!(
        r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="{}" w:footer="{}" w:gutter="0"/>"#,
        page.margins.top.twips(),
        page.margins.right.twips(),
        page.margins.bottom.twips(),
        page.margins.left.twips(),
        page.header_distance.twips(),
        page.header_distance.twips(),
    ));
    if header_rel.is_some() {
        xml.push_str("<w:titlePg/>");
    }
    xml.push_str("</w:sectPr></w:body></w:document>");
    xml
}

fn write_blocks(xml: &mut String, blocks: &[Block], rels: &mut Relationships) {
    for block in blocks {
        match block {
            Block::Paragraph(paragraph) => write_paragraph(xml, paragraph, rels),
            Block::Table(table) => write_table(xml, table, rels),
        }
    }
    // A story must end with a paragraph for Word to accept it.
    if matches!(blocks.last(), Some(Block::Table(_))) {
        xml.push_str("<w:p/>");
    }
}

fn write_paragraph(xml: &mut String, paragraph: &Paragraph, rels: &mut Relationships) {
    xml.push_str("<w:p>");
    write_paragraph_properties(xml, &paragraph.format);
    for inline in &paragraph.inlines {
        match inline {
            Inline::Text(run) => write_run(xml, run),
            Inline::Break => xml.push_str("<w:r><w:br/></w:r>"),
            Inline::Hyperlink { url, run } => {
                let id = rels.add_hyperlink(url);
                xml.push_str(&format!(r#"<w:hyperlink r:id="{id}">"#));
                write_run(xml, run);
                xml.push_str("</w:hyperlink>");
            }
        }
    }
    xml.push_str("</w:p>");
}

fn write_paragraph_properties(xml: &mut String, format: &ParagraphFormat) {
    let mut props = String::new();
    if format.list_bullet {
        props.push_str(&format!(r#"<w:pStyle w:val="{LIST_BULLET_STYLE}"/>"#));
    }
    if let Some(fill) = format.shading {
        props.push_str(&format!(
            r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
            fill.hex()
        ));
    }
    if format.space_before.is_some()
        || format.space_after.is_some()
        || format.line_spacing.is_some()
    {
        props.push_str("<w:spacing");
        if let Some(before) = format.space_before {
            props.push_str(&format!(r#" w:before="{}""#, before.twips()));
        }
        if let Some(after) = format.space_after {
            props.push_str(&format!(r#" w:after="{}""#, after.twips()));
        }
        if let Some(line) = format.line_spacing {
            props.push_str(&format!(
                r#" w:line="{}" w:lineRule="auto""#,
                (line * 240.0).round() as u32
            ));
        }
        props.push_str("/>");
    }
    if let Some(indent) = format.left_indent {
        props.push_str(&format!(r#"<w:ind w:left="{}"/>"#, indent.twips()));
    }
    if let Some(alignment) = format.alignment {
        props.push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment_value(alignment)));
    }
    if !props.is_empty() {
        xml.push_str("<w:pPr>");
        xml.push_str(&props);
        xml.push_str("</w:pPr>");
    }
}

fn write_run(xml: &mut String, run: &Run) {
    xml.push_str("<w:r>");
    let mut props = String::new();
    if run.bold {
        props.push_str("<w:b/>");
    }
    if run.italic {
        props.push_str("<w:i/>");
    }
    if let Some(color) = run.color {
        props.push_str(&format!(r#"<w:color w:val="{}"/>"#, color.hex()));
    }
    if let Some(size) = run.size {
        let half_points = size.half_points();
        props.push_str(&format!(
            r#"<w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/>"#
        ));
    }
    if run.underline {
        props.push_str(r#"<w:u w:val="single"/>"#);
    }
    if !props.is_empty() {
        xml.push_str("<w:rPr>");
        xml.push_str(&props);
        xml.push_str("</w:rPr>");
    }
    write_run_text(xml, &run.text);
    xml.push_str("</w:r>");
}

/// Line breaks become `<w:br/>` and tabs `<w:tab/>`; `\r\n` counts as one break.
fn write_run_text(xml: &mut String, text: &str) {
    let mut segment = String::new();
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        let marker = match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                "<w:br/>"
            }
            '\n' => "<w:br/>",
            '\t' => "<w:tab/>",
            _ => {
                segment.push(ch);
                continue;
            }
        };
        push_text(xml, &segment);
        segment.clear();
        xml.push_str(marker);
    }
    push_text(xml, &segment);
}

fn push_text(xml: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    xml.push_str(&format!(r#"<w:t xml:space="preserve">{}</w:t>"#, escape_xml(text)));
}

fn write_table(xml: &mut String, table: &Table, rels: &mut Relationships) {
    xml.push_str("<w:tbl><w:tblPr>");
    xml.push_str(&format!(
        r#"<w:tblW w:w="{}" w:type="dxa"/>"#,
        table.width().twips()
    ));
    xml.push_str(r#"<w:tblLayout w:type="fixed"/><w:tblLook w:val="04A0"/></w:tblPr><w:tblGrid>"#);
    for width in &table.column_widths {
        xml.push_str(&format!(r#"<w:gridCol w:w="{}"/>"#, width.twips()));
    }
    xml.push_str("</w:tblGrid>");
    for row in &table.rows {
        xml.push_str("<w:tr>");
        for (cell, width) in row.iter().zip(&table.column_widths) {
            write_cell(xml, cell, width.twips(), rels);
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
}

fn write_cell(xml: &mut String, cell: &Cell, width_twips: u32, rels: &mut Relationships) {
    xml.push_str("<w:tc><w:tcPr>");
    xml.push_str(&format!(r#"<w:tcW w:w="{width_twips}" w:type="dxa"/>"#));
    if let Some(alignment) = cell.vertical_alignment {
        let value = match alignment {
            VerticalAlignment::Top => "top",
            VerticalAlignment::Center => "center",
            VerticalAlignment::Bottom => "bottom",
        };
        xml.push_str(&format!(r#"<w:vAlign w:val="{value}"/>"#));
    }
    xml.push_str("</w:tcPr>");
    if cell.paragraphs.is_empty() {
        xml.push_str("<w:p/>");
    }
    for paragraph in &cell.paragraphs {
        write_paragraph(xml, paragraph, rels);
    }
    xml.push_str("</w:tc>");
}

fn alignment_value(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
        Alignment::Justify => "both",
    }
}

fn content_types_xml(has_header: bool) -> String {
    const WML: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml";
    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    for (part, kind) in [
        ("/word/document.xml", "document.main"),
        ("/word/styles.xml", "styles"),
        ("/word/numbering.xml", "numbering"),
        ("/word/settings.xml", "settings"),
    ] {
        xml.push_str(&format!(
            r#"<Override PartName="{part}" ContentType="{WML}.{kind}+xml"/>"#
        ));
    }
    if has_header {
        xml.push_str(&format!(
            r#"<Override PartName="/{HEADER_PART}" ContentType="{WML}.header+xml"/>"#
        ));
    }
    xml.push_str(r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#);
    xml.push_str(r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#);
    xml.push_str("</Types>");
    xml
}

fn package_rels_xml() -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push_str(&format!(r#"<Relationships xmlns="{REL_NS}">"#));
    xml.push_str(&format!(
        r#"<Relationship Id="rId1" Type="{REL_TYPE_BASE}/officeDocument" Target="word/document.xml"/>"#
    ));
    xml.push_str(r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#);
    xml.push_str(&format!(
        r#"<Relationship Id="rId3" Type="{REL_TYPE_BASE}/extended-properties" Target="docProps/app.xml"/>"#
    ));
    xml.push_str("</Relationships>");
    xml
}

fn core_properties_xml(document: &Document) -> String {
    let props = &document.properties;
    let created = props.created.format("%Y-%m-%dT%H:%M:%SZ");
    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(&props.title)));
    xml.push_str(&format!(
        "<dc:creator>{}</dc:creator>",
        escape_xml(&props.creator)
    ));
    xml.push_str(&format!(
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{created}</dcterms:created>"#
    ));
    xml.push_str(&format!(
        r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{created}</dcterms:modified>"#
    ));
    xml.push_str("</cp:coreProperties>");
    xml
}

fn app_properties_xml() -> String {
    format!(
        r#"{XML_DECL}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>{} {}</Application></Properties>"#,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

fn styles_xml(document: &Document) -> String {
    let font = escape_xml(&document.default_font.family);
    let size = document.default_font.size.half_points();
    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push_str(&format!(r#"<w:styles xmlns:w="{W_NS}">"#));
    xml.push_str(&format!(
        r#"<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}" w:eastAsia="{font}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr></w:rPrDefault><w:pPrDefault/></w:docDefaults>"#
    ));
    xml.push_str(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#);
    xml.push_str(&format!(
        r#"<w:style w:type="paragraph" w:styleId="{LIST_BULLET_STYLE}"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="{BULLET_NUM_ID}"/></w:numPr><w:ind w:left="360" w:hanging="360"/></w:pPr></w:style>"#
    ));
    xml.push_str(r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>"#);
    xml.push_str("</w:styles>");
    xml
}

fn numbering_xml() -> String {
    format!(
        concat!(
            r#"{decl}<w:numbering xmlns:w="{ns}">"#,
            r#"<w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/>"#,
            r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/>"#,
            r#"<w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum>"#,
            r#"<w:num w:numId="{num}"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#
        ),
        decl = XML_DECL,
        ns = W_NS,
        num = BULLET_NUM_ID
    )
}

fn settings_xml() -> String {
    format!(
        r#"{XML_DECL}<w:settings xmlns:w="{W_NS}"><w:defaultTabStop w:val="720"/><w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat></w:settings>"#
    )
}

/// Escapes text for inclusion in XML content or attribute values.
///
/// Characters outside the XML 1.0 `Char` production are dropped.
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars().filter(|ch| is_xml_char(*ch)) {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}
