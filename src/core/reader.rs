use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::Context;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::errors::CoreError;

/// Load the full text of a resume document, dispatching on file extension.
///
/// PDFs go through `pdf-extract` page by page; DOCX files are unzipped and
/// their paragraphs pulled out of `word/document.xml`; anything else is read
/// as plain text. Image-only PDFs produce empty (or garbage) text rather
/// than an error.
pub async fn read_document(path: &str) -> Result<String, CoreError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(CoreError::FileNotFound {
                path: path.to_string(),
            });
        }
        Err(err) => return Err(CoreError::Extraction(err.into())),
    };

    let extension = Path::new(path)
        .extension()
        .and_then(|v| v.to_str())
        .map(|v| v.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => extract_pdf_text(&bytes).map_err(CoreError::Extraction),
        "docx" => extract_docx_text(&bytes).map_err(CoreError::Extraction),
        _ => Ok(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

/// Pages are joined with a newline so the last line of one page cannot run
/// into the first line of the next.
fn extract_pdf_text(data: &[u8]) -> anyhow::Result<String> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(data)
        .context("failed to extract text from PDF")?;
    Ok(pages.join("\n"))
}

fn extract_docx_text(data: &[u8]) -> anyhow::Result<String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(data)).context("not a valid docx archive")?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .context("docx has no word/document.xml")?
        .read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut paragraphs: Vec<String> = Vec::new();
    let mut paragraph = String::new();
    let mut in_paragraph = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:p" => {
                in_paragraph = true;
                paragraph.clear();
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => {
                if !paragraph.trim().is_empty() {
                    paragraphs.push(paragraph.trim().to_string());
                }
                in_paragraph = false;
            }
            Ok(Event::Empty(e))
                if in_paragraph && matches!(e.name().as_ref(), b"w:br" | b"w:tab") =>
            {
                paragraph.push(' ');
            }
            Ok(Event::Text(e)) if in_paragraph => {
                paragraph.push_str(&e.xml_content()?);
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err.into()),
            _ => {}
        }

        buf.clear();
    }

    Ok(paragraphs.join("\n"))
}
