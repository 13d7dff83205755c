use lopdf::content::Content;
use lopdf::Object;

use crate::encoding;
use crate::PdfError;

/// A parsed document, held only long enough to inspect it.
pub struct LoadedDocument {
    doc: lopdf::Document,
}

impl LoadedDocument {
    /// Parse a PDF from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self, PdfError> {
        let doc = lopdf::Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(PdfError::Encrypted);
        }

        Ok(Self { doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text rows of each page, in page order.
    pub fn page_rows(&self) -> Result<Vec<Vec<String>>, PdfError> {
        self.doc
            .get_pages()
            .values()
            .map(|&page_id| {
                let data = self
                    .doc
                    .get_page_content(page_id)
                    .map_err(|e| PdfError::Parse(format!("cannot get page content: {}", e)))?;
                rows_from_content(&data)
            })
            .collect()
    }
}

/// Decode a content stream and return the text shown by each text-showing
/// operator, one entry per `Tj`/`TJ`.
fn rows_from_content(data: &[u8]) -> Result<Vec<String>, PdfError> {
    let content = Content::decode(data)
        .map_err(|e| PdfError::Parse(format!("content stream decode error: {}", e)))?;

    let rows = content
        .operations
        .iter()
        .filter_map(|op| match op.operator.as_str() {
            "Tj" => op.operands.first().and_then(string_bytes).map(encoding::decode),
            "TJ" => op.operands.first().and_then(|arr| match arr {
                Object::Array(items) => {
                    let bytes: Vec<u8> = items
                        .iter()
                        .filter_map(string_bytes)
                        .flat_map(|b| b.iter().copied())
                        .collect();
                    Some(encoding::decode(&bytes))
                }
                _ => None,
            }),
            _ => None,
        })
        .collect();

    Ok(rows)
}

fn string_bytes(obj: &Object) -> Option<&[u8]> {
    match obj {
        Object::String(bytes, _) => Some(bytes.as_slice()),
        _ => None,
    }
}
