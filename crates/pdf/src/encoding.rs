//! Single-byte text encoding for the built-in Helvetica font.
//!
//! Core PDF fonts only address 256 glyphs, so every character of the exported
//! text must map to one WinAnsiEncoding byte. That covers Latin-1 plus the
//! typographic punctuation models like to emit (curly quotes, dashes,
//! ellipsis). Anything else, such as Devanagari from a Hindi translation, is an
//! [`PdfError::Encoding`].

use unicode_normalization::UnicodeNormalization;

use crate::PdfError;

/// WinAnsiEncoding bytes 0x80..=0x9F and the characters they stand for.
/// Unassigned codes (0x81, 0x8D, 0x8F, 0x90, 0x9D) are absent.
const WIN_ANSI_HIGH: &[(u8, char)] = &[
    (0x80, '\u{20AC}'),
    (0x82, '\u{201A}'),
    (0x83, '\u{0192}'),
    (0x84, '\u{201E}'),
    (0x85, '\u{2026}'),
    (0x86, '\u{2020}'),
    (0x87, '\u{2021}'),
    (0x88, '\u{02C6}'),
    (0x89, '\u{2030}'),
    (0x8A, '\u{0160}'),
    (0x8B, '\u{2039}'),
    (0x8C, '\u{0152}'),
    (0x8E, '\u{017D}'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201C}'),
    (0x94, '\u{201D}'),
    (0x95, '\u{2022}'),
    (0x96, '\u{2013}'),
    (0x97, '\u{2014}'),
    (0x98, '\u{02DC}'),
    (0x99, '\u{2122}'),
    (0x9A, '\u{0161}'),
    (0x9B, '\u{203A}'),
    (0x9C, '\u{0153}'),
    (0x9E, '\u{017E}'),
    (0x9F, '\u{0178}'),
];

/// Normalize text before encoding.
///
/// NFC folds combining sequences ("e" + U+0301) into precomposed Latin-1
/// characters, and ligatures are spelled out.
pub fn normalize(text: &str) -> String {
    let mut result: String = text.nfc().collect();

    let ligatures = [
        ("\u{FB00}", "ff"),
        ("\u{FB01}", "fi"),
        ("\u{FB02}", "fl"),
        ("\u{FB03}", "ffi"),
        ("\u{FB04}", "ffl"),
    ];
    for (lig, replacement) in &ligatures {
        result = result.replace(lig, replacement);
    }

    result
}

/// Map one character to its WinAnsiEncoding byte.
pub fn encode_char(ch: char) -> Option<u8> {
    match ch as u32 {
        0x00..=0x7F | 0xA0..=0xFF => Some(ch as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(_, c)| *c == ch)
            .map(|(byte, _)| *byte),
    }
}

/// Encode one line of text. `line` is the 1-based line number used in errors.
pub fn encode_line(text: &str, line: usize) -> Result<Vec<u8>, PdfError> {
    text.chars()
        .map(|ch| encode_char(ch).ok_or(PdfError::Encoding { ch, line }))
        .collect()
}

/// Decode WinAnsiEncoding bytes back into text.
pub fn decode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => WIN_ANSI_HIGH
                .iter()
                .find(|(byte, _)| *byte == b)
                .map(|(_, c)| *c)
                .unwrap_or('\u{FFFD}'),
            _ => b as char,
        })
        .collect()
}
