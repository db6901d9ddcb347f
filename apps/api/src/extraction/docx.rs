//! DOCX raw-text reader.
//!
//! A DOCX file is a ZIP archive; the body lives in `word/document.xml`.
//! Text runs (`w:t`) are concatenated, `w:tab` becomes a tab, `w:br`/`w:cr`
//! a newline, and each paragraph ends with a newline. Formatting is ignored.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::ExtractionError;

const DOCUMENT_XML: &str = "word/document.xml";

pub async fn extract_raw_text(path: &Path) -> Result<String, ExtractionError> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let file = File::open(&path)?;
        read_docx_text(file)
    })
    .await
    .map_err(|e| ExtractionError::Docx(format!("DOCX reader aborted: {e}")))?
}

pub fn read_docx_text<R: Read + Seek>(reader: R) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(reader)
        .map_err(|e| ExtractionError::Docx(format!("Failed to open DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| ExtractionError::Docx(format!("{DOCUMENT_XML} not found: {e}")))?
        .read_to_string(&mut xml)?;

    document_xml_to_text(&xml)
}

fn document_xml_to_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text = true;
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" | b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref t)) if in_text => {
                let unescaped = t
                    .unescape()
                    .map_err(|e| ExtractionError::Docx(format!("Bad text node: {e}")))?;
                text.push_str(&unescaped);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractionError::Docx(format!(
                    "Malformed {DOCUMENT_XML} at position {}: {e}",
                    reader.buffer_position()
                )))
            }
        }
        buf.clear();
    }

    Ok(text)
}
