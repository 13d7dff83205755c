//! Recipe text to PDF.
//!
//! [`export`] turns plain text into a paginated PDF using the built-in
//! Helvetica font, and [`read_lines`] parses a document back into its text
//! rows. Layout is pure ([`layout`]); only [`writer`] and [`reader`] touch
//! `lopdf`.

use thiserror::Error;

pub mod encoding;
pub mod layout;
pub mod metrics;
pub mod reader;
pub mod writer;

pub use layout::PageSetup;

/// File name offered for the downloaded document.
pub const DOWNLOAD_FILE_NAME: &str = "ai_recipes.pdf";

/// MIME type of the downloaded document.
pub const MIME_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error(
        "Character {ch:?} (U+{code:04X}) on line {line} is outside the PDF font's single-byte character set",
        code = code_point(.ch)
    )]
    Encoding { ch: char, line: usize },
    #[error("PDF write error: {0}")]
    Write(String),
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Document is encrypted")]
    Encrypted,
}

fn code_point(ch: &char) -> u32 {
    u32::from(*ch)
}

/// Export text as a PDF with the default A4 setup.
pub fn export(text: &str) -> Result<Vec<u8>, PdfError> {
    export_with(text, &PageSetup::A4)
}

/// Export text as a PDF.
///
/// The text is split on `\n` (a trailing `\r` is dropped from each line) and
/// every line flows into its own multi-line cell. Fails with
/// [`PdfError::Encoding`] on the first character the font cannot show.
pub fn export_with(text: &str, setup: &PageSetup) -> Result<Vec<u8>, PdfError> {
    let normalized = encoding::normalize(text);

    let lines = normalized
        .split('\n')
        .enumerate()
        .map(|(idx, line)| encoding::encode_line(line.strip_suffix('\r').unwrap_or(line), idx + 1))
        .collect::<Result<Vec<_>, _>>()?;

    let pages = layout::layout(&lines, setup);
    writer::write_document(&pages, setup)
}

/// Parse PDF bytes and return every text row, in page order.
///
/// Blank rows carry no text object and are not returned.
pub fn read_lines(bytes: &[u8]) -> Result<Vec<String>, PdfError> {
    let doc = reader::LoadedDocument::load_bytes(bytes)?;
    Ok(doc.page_rows()?.into_iter().flatten().collect())
}

/// Number of pages in a PDF.
pub fn page_count(bytes: &[u8]) -> Result<usize, PdfError> {
    Ok(reader::LoadedDocument::load_bytes(bytes)?.page_count())
}
