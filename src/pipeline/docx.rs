//! DOCX extractor: body text from `word/document.xml`.
//!
//! A DOCX file is a ZIP package; the main body lives in one WordprocessingML
//! part. The XML is streamed with quick-xml and flattened the same way the
//! usual docx-to-text routines do it:
//!
//! * elements are matched by their qualified `w:` name, so DrawingML
//!   `<a:p>`/`<a:t>` embedded in the body contribute nothing
//! * text comes only from `<w:t>` elements, in document order
//! * every `<w:p>` starts with a blank line (`"\n\n"`)
//! * `<w:tab/>` inside a run becomes `\t`, `<w:br/>` and `<w:cr/>` become `\n`
//! * the result is trimmed
//!
//! Tables flatten into their cell paragraphs; images contribute nothing.
//! Headers, footers and page counts are not produced.

use crate::error::ResumeError;
use crate::output::{ExtractionResult, FileInfo};
use crate::pipeline::dispatch::DocumentFormat;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fmt::Display;
use std::io::{BufRead, BufReader, Cursor};
use zip::ZipArchive;

/// Package part holding the main document body.
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";

const PARAGRAPH_BREAK: &str = "\n\n";

/// Extract the body text of a DOCX package.
///
/// A package that cannot be opened at all (not a ZIP, no main part) is an
/// unexpected failure; a main part whose XML is malformed is an extraction
/// failure.
pub fn extract_docx(content: &[u8]) -> Result<ExtractionResult, ResumeError> {
    let mut archive = ZipArchive::new(Cursor::new(content))
        .map_err(|e| ResumeError::Unexpected(format!("unreadable docx package: {e}")))?;

    let part = archive.by_name(MAIN_DOCUMENT_PART).map_err(|e| {
        ResumeError::Unexpected(format!("docx package has no {MAIN_DOCUMENT_PART}: {e}"))
    })?;

    let raw_text = body_text(BufReader::new(part))?;

    Ok(ExtractionResult {
        raw_text,
        file_info: FileInfo::Docx,
    })
}

/// Flatten a WordprocessingML document part into plain text.
pub(crate) fn body_text<R: BufRead>(xml: R) -> Result<String, ResumeError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::with_capacity(1024);
    let mut text = String::with_capacity(8192);

    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => text.push_str(PARAGRAPH_BREAK),
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                name => push_run_break(&mut text, name, in_run),
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" => text.push_str(PARAGRAPH_BREAK),
                name => push_run_break(&mut text, name, in_run),
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let s = e.unescape().map_err(|err| malformed(&reader, err))?;
                text.push_str(&s);
            }
            Ok(Event::CData(e)) if in_text => {
                text.push_str(&String::from_utf8_lossy(&e));
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(malformed(&reader, err)),
            _ => {}
        }
        buf.clear();
    }

    Ok(text.trim().to_string())
}

/// Tabs and line breaks only count inside a run; `<w:tab>` also appears in
/// paragraph properties as a tab-stop definition.
fn push_run_break(text: &mut String, name: &[u8], in_run: bool) {
    if !in_run {
        return;
    }
    match name {
        b"w:tab" => text.push('\t'),
        b"w:br" | b"w:cr" => text.push('\n'),
        _ => {}
    }
}

fn malformed<R>(reader: &Reader<R>, err: impl Display) -> ResumeError {
    ResumeError::Extraction {
        format: DocumentFormat::Docx,
        detail: format!(
            "malformed {MAIN_DOCUMENT_PART} near byte {}: {err}",
            reader.buffer_position()
        ),
    }
}
