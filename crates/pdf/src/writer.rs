use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::layout::{Page, PageSetup, PT_PER_MM};
use crate::PdfError;

/// Resource name of the single font used on every page.
const FONT_RESOURCE: &str = "F1";

/// Producer string written to the Info dictionary.
const PRODUCER: &str = concat!("recipegen pdf ", env!("CARGO_PKG_VERSION"));

/// Serialize laid-out pages into PDF bytes.
pub fn write_document(pages: &[Page], setup: &PageSetup) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page, setup),
        };
        let encoded = content
            .encode()
            .map_err(|e| PdfError::Write(format!("content stream encode error: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(setup.page_width * PT_PER_MM),
                Object::Real(setup.page_height * PT_PER_MM),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(creation_date()),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| PdfError::Write(e.to_string()))?;
    Ok(bytes)
}

/// One `BT … ET` text object per non-blank row.
fn page_operations(page: &Page, setup: &PageSetup) -> Vec<Operation> {
    let font_mm = setup.font_size_mm();
    let mut ops = Vec::new();

    for row in page.rows.iter().filter(|r| !r.text.is_empty()) {
        // Baseline sits slightly below the vertical centre of the row.
        let baseline_mm = row.y + 0.5 * setup.row_height + 0.3 * font_mm;
        let x_pt = row.x * PT_PER_MM;
        let y_pt = (setup.page_height - baseline_mm) * PT_PER_MM;

        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![FONT_RESOURCE.into(), Object::Real(setup.font_size_pt)],
        ));
        ops.push(Operation::new(
            "Td",
            vec![Object::Real(x_pt), Object::Real(y_pt)],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(row.text.clone(), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    ops
}

/// PDF date string for the current local time, e.g. `D:20250101120000`.
fn creation_date() -> String {
    chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string()
}
