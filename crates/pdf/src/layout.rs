//! Page layout: flow encoded lines into fixed-height rows across pages.
//!
//! Every input line becomes a full-width multi-line cell. A cell wraps at the
//! last space that fits, or mid-word when a single word is wider than the row.
//! A new page starts whenever the next row would cross the page-break trigger.
//! All measurements are in millimetres from the top-left corner.

use crate::metrics::text_width;

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Page geometry and font settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    /// Rows may not extend below `page_height - margin_bottom`.
    pub margin_bottom: f32,
    /// Horizontal padding inside a cell.
    pub cell_margin: f32,
    pub font_size_pt: f32,
    pub row_height: f32,
}

impl PageSetup {
    /// A4 portrait, 1 cm margins, 2 cm break margin, Helvetica 12 pt in 10 mm rows.
    pub const A4: Self = PageSetup {
        page_width: 210.0,
        page_height: 297.0,
        margin_left: 10.0,
        margin_top: 10.0,
        margin_right: 10.0,
        margin_bottom: 20.0,
        cell_margin: 1.0,
        font_size_pt: 12.0,
        row_height: 10.0,
    };

    pub fn font_size_mm(&self) -> f32 {
        self.font_size_pt / PT_PER_MM
    }

    /// Usable text width inside a full-width cell, in 1/1000 em.
    fn max_text_width(&self) -> u32 {
        let cell_width = self.page_width - self.margin_left - self.margin_right;
        let text_mm = cell_width - 2.0 * self.cell_margin;
        (text_mm * 1000.0 / self.font_size_mm()) as u32
    }

    fn break_trigger(&self) -> f32 {
        self.page_height - self.margin_bottom
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::A4
    }
}

/// One row of text at a position on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Left edge of the text.
    pub x: f32,
    /// Top edge of the row.
    pub y: f32,
    /// Encoded text; empty for blank lines.
    pub text: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub rows: Vec<Row>,
}

/// Split one encoded line into the runs that fit on a row each.
pub fn wrap_line(line: &[u8], max_width: u32) -> Vec<Vec<u8>> {
    if line.is_empty() {
        return vec![Vec::new()];
    }

    let mut runs = Vec::new();
    let mut start = 0;
    let mut last_space: Option<usize> = None;
    let mut width = 0u32;
    let mut i = 0;

    while i < line.len() {
        let byte = line[i];
        if byte == b' ' {
            last_space = Some(i);
        }
        width += text_width(&[byte]);

        if width > max_width {
            match last_space {
                Some(space) if space > start => {
                    runs.push(line[start..space].to_vec());
                    i = space + 1;
                }
                _ => {
                    // Always make progress, even if one glyph is wider than the row.
                    if i == start {
                        i += 1;
                    }
                    runs.push(line[start..i].to_vec());
                }
            }
            start = i;
            last_space = None;
            width = 0;
            continue;
        }

        i += 1;
    }

    if start < line.len() || runs.is_empty() {
        runs.push(line[start..].to_vec());
    }

    runs
}

/// Lay out encoded lines onto pages. Always returns at least one page.
pub fn layout(lines: &[Vec<u8>], setup: &PageSetup) -> Vec<Page> {
    let max_width = setup.max_text_width();
    let x = setup.margin_left + setup.cell_margin;

    let mut pages = vec![Page::default()];
    let mut y = setup.margin_top;

    for line in lines {
        for run in wrap_line(line, max_width) {
            if y + setup.row_height > setup.break_trigger() {
                pages.push(Page::default());
                y = setup.margin_top;
            }
            if let Some(page) = pages.last_mut() {
                page.rows.push(Row { x, y, text: run });
            }
            y += setup.row_height;
        }
    }

    pages
}
