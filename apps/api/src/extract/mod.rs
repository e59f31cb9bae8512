//! Text extraction for uploaded resume files.
//!
//! Turns raw upload bytes into plain text for the cleaning pipeline.
//! PDF parsing goes through `pdf-extract`; DOCX is a zip container whose
//! `word/document.xml` carries the text runs; TXT must be valid UTF-8.

use std::io::{Cursor, Read};

use thiserror::Error;

/// Shortest extracted text we accept from a PDF. Anything below this is
/// almost always a scanned image with no text layer.
const MIN_PDF_TEXT_LEN: usize = 10;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file type '{0}' (allowed: pdf, docx, doc, txt)")]
    UnsupportedType(String),

    #[error("PDF text extraction failed: {0}. Ensure the PDF contains extractable text and is not a scanned image")]
    Pdf(String),

    #[error("DOCX parsing failed: {0}")]
    Docx(String),

    #[error("file is not valid UTF-8 text")]
    InvalidUtf8,

    #[error("extracted text is empty")]
    Empty,
}

/// Supported upload formats, inferred from the uploaded filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Txt,
}

impl FileType {
    /// Maps a filename extension to a supported type. `doc` is routed
    /// through the DOCX reader, matching what clients actually upload.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "pdf" => Ok(FileType::Pdf),
            "docx" | "doc" => Ok(FileType::Docx),
            "txt" => Ok(FileType::Txt),
            other => Err(ExtractError::UnsupportedType(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Docx => "docx",
            FileType::Txt => "txt",
        }
    }
}

/// Extracts plain text from upload bytes.
///
/// CPU-bound and synchronous; callers in async context should wrap this in
/// `spawn_blocking`.
pub fn extract_text(bytes: &[u8], file_type: FileType) -> Result<String, ExtractError> {
    let text = match file_type {
        FileType::Pdf => extract_pdf(bytes)?,
        FileType::Docx => extract_docx(bytes)?,
        FileType::Txt => extract_txt(bytes)?,
    };
    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(text)
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    if text.trim().len() < MIN_PDF_TEXT_LEN {
        return Err(ExtractError::Pdf(
            "extraction yielded insufficient content".to_string(),
        ));
    }
    Ok(text)
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut document = archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Docx(format!("missing word/document.xml: {e}")))?;
    let mut xml = String::new();
    document
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    Ok(document_xml_text(&xml))
}

fn extract_txt(bytes: &[u8]) -> Result<String, ExtractError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| ExtractError::InvalidUtf8)
}

/// Pulls the visible text out of a WordprocessingML document: one line per
/// `<w:p>` paragraph, `<w:t>` run contents concatenated within it.
fn document_xml_text(xml: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut rest = xml;

    while let Some(tag_start) = rest.find('<') {
        let after_tag = &rest[tag_start + 1..];
        let Some(tag_end) = after_tag.find('>') else {
            break;
        };
        let tag = &after_tag[..tag_end];
        rest = &after_tag[tag_end + 1..];

        if tag == "w:p" || tag.starts_with("w:p ") {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else if tag == "/w:p" {
            paragraphs.push(std::mem::take(&mut current));
        } else if tag == "w:t" || tag.starts_with("w:t ") {
            // Run text is everything up to the closing tag.
            if let Some(close) = rest.find("</w:t>") {
                current.push_str(&decode_entities(&rest[..close]));
                rest = &rest[close + "</w:t>".len()..];
            }
        } else if tag == "w:tab/" {
            current.push('\t');
        } else if tag == "w:br/" || tag == "w:cr/" {
            current.push('\n');
        }
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs.retain(|p| !p.trim().is_empty());
    paragraphs.join("\n")
}

/// Decodes the five predefined XML entities.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_type_from_filename() {
        assert_eq!(FileType::from_filename("resume.pdf").unwrap(), FileType::Pdf);
        assert_eq!(FileType::from_filename("Resume.PDF").unwrap(), FileType::Pdf);
        assert_eq!(
            FileType::from_filename("cv.docx").unwrap(),
            FileType::Docx
        );
        assert_eq!(FileType::from_filename("old.doc").unwrap(), FileType::Docx);
        assert_eq!(FileType::from_filename("notes.txt").unwrap(), FileType::Txt);
    }

    #[test]
    fn test_file_type_rejects_unknown_extensions() {
        assert!(matches!(
            FileType::from_filename("resume.png"),
            Err(ExtractError::UnsupportedType(ext)) if ext == "png"
        ));
        assert!(matches!(
            FileType::from_filename("no_extension"),
            Err(ExtractError::UnsupportedType(ext)) if ext.is_empty()
        ));
    }

    #[test]
    fn test_txt_extraction() {
        let text = extract_text(b"  Jane Doe\nSoftware Engineer  ", FileType::Txt).unwrap();
        assert_eq!(text, "Jane Doe\nSoftware Engineer");
    }

    #[test]
    fn test_txt_rejects_invalid_utf8() {
        let err = extract_text(&[0xff, 0xfe, 0x00], FileType::Txt).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidUtf8));
    }

    #[test]
    fn test_txt_rejects_empty() {
        let err = extract_text(b"   \n  ", FileType::Txt).unwrap_err();
        assert!(matches!(err, ExtractError::Empty));
    }

    #[test]
    fn test_document_xml_text_paragraphs_and_runs() {
        let xml = r#"<?xml version="1.0"?><w:document><w:body>
            <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
            <w:p><w:r><w:t xml:space="preserve">Software </w:t></w:r><w:r><w:t>Engineer</w:t></w:r></w:p>
            <w:p/>
            <w:p><w:r><w:t>Skills &amp; Tools</w:t></w:r></w:p>
        </w:body></w:document>"#;
        assert_eq!(
            document_xml_text(xml),
            "Jane Doe\nSoftware Engineer\nSkills & Tools"
        );
    }

    #[test]
    fn test_document_xml_text_breaks_and_tabs() {
        let xml = "<w:p><w:r><w:t>one</w:t><w:tab/><w:t>two</w:t><w:br/><w:t>three</w:t></w:r></w:p>";
        assert_eq!(document_xml_text(xml), "one\ttwo\nthree");
    }

    #[test]
    fn test_docx_extraction_from_archive() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            let options: zip::write::SimpleFileOptions = Default::default();
            writer.start_file("word/document.xml", options).unwrap();
            writer
                .write_all(
                    b"<w:document><w:body><w:p><w:r><w:t>Hello resume</w:t></w:r></w:p></w:body></w:document>",
                )
                .unwrap();
            writer.finish().unwrap();
        }
        let bytes = buffer.into_inner();
        let text = extract_text(&bytes, FileType::Docx).unwrap();
        assert_eq!(text, "Hello resume");
    }

    #[test]
    fn test_docx_rejects_non_zip_bytes() {
        let err = extract_text(b"definitely not a zip", FileType::Docx).unwrap_err();
        assert!(matches!(err, ExtractError::Docx(_)));
    }
}
