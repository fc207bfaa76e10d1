// Encoding utilities

use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};

/// ID3v2 text encoding byte
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextEncoding {
    Iso8859_1 = 0,
    Utf16 = 1,
    Utf16BE = 2,
    Utf8 = 3,
}

impl TextEncoding {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => TextEncoding::Utf16,
            2 => TextEncoding::Utf16BE,
            3 => TextEncoding::Utf8,
            _ => TextEncoding::Iso8859_1,
        }
    }
}

/// Decode text with specified encoding
pub fn decode_text(data: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Iso8859_1 => WINDOWS_1252.decode(data).0.into_owned(),
        TextEncoding::Utf16 => {
            // Detect BOM
            if data.len() < 2 {
                String::new()
            } else if data[0..2] == [0xFF, 0xFE] {
                UTF_16LE.decode(&data[2..]).0.into_owned()
            } else if data[0..2] == [0xFE, 0xFF] {
                UTF_16BE.decode(&data[2..]).0.into_owned()
            } else {
                UTF_16LE.decode(data).0.into_owned()
            }
        }
        TextEncoding::Utf16BE => UTF_16BE.decode(data).0.into_owned(),
        TextEncoding::Utf8 => UTF_8.decode(data).0.into_owned(),
    }
}

/// Decode a fixed-width Latin-1 field, stopping at the first NUL
pub fn decode_latin1_field(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    WINDOWS_1252.decode(&bytes[..end]).0.trim().to_string()
}
