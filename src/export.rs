//! `.docx` export of a finished post.
//!
//! The body is converted line by line (markdown headings and `**bold**` lines
//! become headings, everything else a paragraph) and packed into a minimal
//! WordprocessingML package.

use chrono::{SecondsFormat, Utc};
use quick_xml::escape::escape;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::models::blog::BlogPost;

pub const DOCX_MIME_SUBTYPE: &str = "vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug)]
pub struct ExportError(pub String);

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(e: zip::result::ZipError) -> Self {
        ExportError(format!("zip error: {}", e))
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError(format!("write error: {}", e))
    }
}

// ── Document model ────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Heading { level: u8, text: String },
    Paragraph(String),
    Rule,
}

/// Header (title, meta, tags, rule) followed by the converted body.
pub fn blocks(post: &BlogPost) -> Vec<Block> {
    let mut out = vec![
        Block::Title(post.title.clone()),
        Block::Paragraph(format!("Meta Description: {}", post.meta_description)),
        Block::Paragraph(format!("Tags: {}", post.tag_list().join(", "))),
        Block::Rule,
    ];
    out.extend(post.body.lines().filter_map(body_line));
    out
}

fn body_line(line: &str) -> Option<Block> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let hashes = line.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) {
        let rest = &line[hashes..];
        if rest.is_empty() || rest.starts_with(' ') {
            return Some(Block::Heading {
                level: hashes as u8,
                text: rest.trim().to_string(),
            });
        }
    }

    if line.len() > 4 && line.starts_with("**") && line.ends_with("**") {
        return Some(Block::Heading {
            level: 2,
            text: line.replace("**", "").trim().to_string(),
        });
    }

    Some(Block::Paragraph(line.to_string()))
}

// ── OOXML ─────────────────────────────────────────────

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

pub fn to_docx(post: &BlogPost) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, String); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", PACKAGE_RELS.to_string()),
        ("docProps/core.xml", core_properties(post)),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
        ("word/styles.xml", styles()),
        ("word/document.xml", document(&blocks(post))),
    ];

    for (name, xml) in &parts {
        zip.start_file(*name, options)?;
        zip.write_all(xml.as_bytes())?;
    }

    let cursor = zip.finish()?;
    let bytes = cursor.into_inner();
    log::info!("[export] Built docx for \"{}\" ({} bytes)", post.title, bytes.len());
    Ok(bytes)
}

/// Attachment filename derived from the post title.
pub fn filename(post: &BlogPost) -> String {
    let stem = slug::slugify(&post.title);
    if stem.is_empty() {
        "blog.docx".to_string()
    } else {
        format!("{}.docx", stem)
    }
}

fn document(blocks: &[Block]) -> String {
    let mut body = String::new();
    for block in blocks {
        match block {
            Block::Title(text) => body.push_str(&paragraph(Some("Title"), text)),
            Block::Heading { level, text } => {
                body.push_str(&paragraph(Some(&format!("Heading{}", level)), text))
            }
            Block::Paragraph(text) => body.push_str(&paragraph(None, text)),
            Block::Rule => body.push_str(
                r#"<w:p><w:pPr><w:pBdr><w:bottom w:val="single" w:sz="6" w:space="1" w:color="auto"/></w:pBdr></w:pPr></w:p>"#,
            ),
        }
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        W_NS, body
    )
}

fn paragraph(style: Option<&str>, text: &str) -> String {
    let props = match style {
        Some(s) => format!(r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#, s),
        None => String::new(),
    };
    format!(
        r#"<w:p>{}<w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        props,
        xml_escape(text)
    )
}

fn styles() -> String {
    let mut defs = String::from(
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:rPr><w:sz w:val="22"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:after="240"/></w:pPr><w:rPr><w:b/><w:sz w:val="52"/></w:rPr></w:style>"#,
    );
    for level in 1..=6u8 {
        let size = 36 - (level as u32 - 1) * 4;
        defs.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{l}"><w:name w:val="heading {l}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="{o}"/></w:pPr><w:rPr><w:b/><w:sz w:val="{s}"/></w:rPr></w:style>"#,
            l = level,
            o = level - 1,
            s = size
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{}">{}</w:styles>"#,
        W_NS, defs
    )
}

fn core_properties(post: &BlogPost) -> String {
    let created = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{}</dc:title><dc:subject>{}</dc:subject><cp:keywords>{}</cp:keywords><dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created></cp:coreProperties>"#,
        xml_escape(&post.title),
        xml_escape(&post.meta_description),
        xml_escape(&post.tags),
        created
    )
}

/// Escape text for XML. Line breaks and tabs become spaces, and anything
/// outside the XML 1.0 character range is dropped.
fn xml_escape(text: &str) -> String {
    let legal: String = text
        .chars()
        .filter_map(|ch| match ch {
            '\t' | '\n' | '\r' => Some(' '),
            '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}' => Some(ch),
            _ => None,
        })
        .collect();
    escape(legal.as_str()).into_owned()
}
