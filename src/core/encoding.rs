//! Document Encoding Detection and Conversion
//!
//! The dictionary releases ship as UTF-8, but UTF-16 input (detected by BOM or
//! by the `<` byte pattern) is converted so the tokenizer only ever sees UTF-8.

use std::borrow::Cow;

use crate::error::{ParseError, Position, Result};

/// Encoding of a raw document, detected from its first bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl XmlEncoding {
    /// Detect encoding from byte order mark or initial bytes
    pub fn detect(input: &[u8]) -> Self {
        match input {
            [0xFF, 0xFE, ..] | [b'<', 0x00, ..] => XmlEncoding::Utf16Le,
            [0xFE, 0xFF, ..] | [0x00, b'<', ..] => XmlEncoding::Utf16Be,
            _ => XmlEncoding::Utf8,
        }
    }
}

/// Convert raw document bytes into a validated UTF-8 string
///
/// UTF-8 input is borrowed and a UTF-8 BOM is dropped. Invalid UTF-8 is
/// reported with the position of the first bad byte.
pub fn decode(input: &[u8]) -> Result<Cow<'_, str>> {
    match XmlEncoding::detect(input) {
        XmlEncoding::Utf8 => {
            let bytes = input.strip_prefix(&[0xEF, 0xBB, 0xBF][..]).unwrap_or(input);
            std::str::from_utf8(bytes).map(Cow::Borrowed).map_err(|e| {
                let position = Position::locate(bytes, e.valid_up_to());
                ParseError::malformed("invalid UTF-8 sequence").at(position)
            })
        }
        XmlEncoding::Utf16Le => decode_utf16(input, [0xFF, 0xFE], u16::from_le_bytes, "LE").map(Cow::Owned),
        XmlEncoding::Utf16Be => decode_utf16(input, [0xFE, 0xFF], u16::from_be_bytes, "BE").map(Cow::Owned),
    }
}

fn decode_utf16(input: &[u8], bom: [u8; 2], unit: fn([u8; 2]) -> u16, label: &str) -> Result<String> {
    let bytes = input.strip_prefix(&bom[..]).unwrap_or(input);

    if !bytes.len().is_multiple_of(2) {
        return Err(ParseError::malformed(format!("invalid UTF-16 {label}: odd number of bytes")));
    }

    let code_units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| unit([chunk[0], chunk[1]]))
        .collect();

    String::from_utf16(&code_units).map_err(|e| ParseError::malformed(format!("invalid UTF-16 {label}: {e}")))
}
