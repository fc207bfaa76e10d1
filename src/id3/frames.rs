// ID3v2 frame definitions and parsers

use crate::utils::encoding::{decode_text, TextEncoding};
use crate::utils::io::{be_u32, synchsafe_u32};

/// Common ID3v2.3/2.4 frame identifiers
pub mod frame_ids {
    pub const TITLE: &str = "TIT2"; // Title/songname/content description
    pub const ARTIST: &str = "TPE1"; // Lead performer(s)/Soloist(s)
    pub const ALBUM: &str = "TALB"; // Album/Movie/Show title
    pub const YEAR: &str = "TYER"; // Year (2.3)
    pub const RECORDING_TIME: &str = "TDRC"; // Recording time (2.4)
    pub const TRACK: &str = "TRCK"; // Track number/Position in set
    pub const GENRE: &str = "TCON"; // Content type
    pub const COMMENT: &str = "COMM"; // Comments
    pub const LYRICS: &str = "USLT"; // Unsynchronised lyrics
}

/// ID3v2.2 three-character identifiers
pub mod frame_ids_v22 {
    pub const TITLE: &str = "TT2";
    pub const ARTIST: &str = "TP1";
    pub const ALBUM: &str = "TAL";
    pub const YEAR: &str = "TYE";
    pub const TRACK: &str = "TRK";
    pub const GENRE: &str = "TCO";
    pub const COMMENT: &str = "COM";
    pub const LYRICS: &str = "ULT";
}

// ID3v2.4 frame format flags
const FLAG_UNSYNCHRONISED: u16 = 0x0002;
const FLAG_DATA_LENGTH: u16 = 0x0001;

/// ID3v2 frame structure
#[derive(Debug, Clone, PartialEq)]
pub struct Id3Frame {
    pub frame_id: String,
    pub flags: u16,
    pub data: Vec<u8>,
}

impl Id3Frame {
    /// Decoded value of a text, comment or lyrics frame.
    pub fn text(&self) -> Option<String> {
        let id = self.frame_id.as_str();
        let value = if id == frame_ids::COMMENT
            || id == frame_ids_v22::COMMENT
            || id == frame_ids::LYRICS
            || id == frame_ids_v22::LYRICS
        {
            decode_comment_frame(&self.data)
        } else if id.starts_with('T') && id != "TXXX" && id != "TXX" {
            decode_text_frame(&self.data)
        } else {
            return None;
        };

        Some(value)
    }
}

/// Parse the frames of an ID3v2 tag body (extended header already skipped).
///
/// Stops at padding or at the first frame that does not fit.
pub fn parse_frames(body: &[u8], major_version: u8) -> Vec<Id3Frame> {
    let (id_len, header_len) = if major_version == 2 { (3, 6) } else { (4, 10) };

    let mut frames = Vec::new();
    let mut pos = 0;

    while pos + header_len <= body.len() {
        let head = &body[pos..pos + header_len];

        // Padding
        if head[0] == 0 {
            break;
        }

        let frame_id = String::from_utf8_lossy(&head[..id_len]).into_owned();
        let size = match major_version {
            2 => u32::from_be_bytes([0, head[3], head[4], head[5]]),
            3 => be_u32(head, 4),
            _ => synchsafe_u32(&head[4..8]),
        } as usize;
        let flags = if major_version == 2 {
            0
        } else {
            u16::from_be_bytes([head[8], head[9]])
        };

        let start = pos + header_len;
        let end = match start.checked_add(size) {
            Some(end) if end <= body.len() => end,
            _ => {
                tracing::warn!(frame = %frame_id, size, "ID3v2 frame runs past the tag, ignoring the rest");
                break;
            }
        };

        let mut data = &body[start..end];
        if major_version == 4 && flags & FLAG_DATA_LENGTH != 0 && data.len() >= 4 {
            data = &data[4..];
        }
        let data = if major_version == 4 && flags & FLAG_UNSYNCHRONISED != 0 {
            remove_unsynchronisation(data)
        } else {
            data.to_vec()
        };

        frames.push(Id3Frame {
            frame_id,
            flags,
            data,
        });
        pos = end;
    }

    frames
}

/// Undo unsynchronisation: every `FF 00` becomes `FF`.
pub fn remove_unsynchronisation(data: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(data.len());
    let mut previous = 0u8;
    for &byte in data {
        if !(previous == 0xFF && byte == 0x00) {
            output.push(byte);
        }
        previous = byte;
    }
    output
}

/// Decode text frame data.
///
/// Only the first value of a multi-value (NUL separated) frame is returned.
pub fn decode_text_frame(data: &[u8]) -> String {
    if data.is_empty() {
        return String::new();
    }

    let encoding = TextEncoding::from_byte(data[0]);
    first_value(&decode_text(&data[1..], encoding))
}

/// Decode COMM/USLT data: encoding, 3-byte language, description, text.
pub fn decode_comment_frame(data: &[u8]) -> String {
    if data.len() < 4 {
        return String::new();
    }

    let encoding = TextEncoding::from_byte(data[0]);
    let decoded = decode_text(&data[4..], encoding);

    // Description and text are NUL separated; the text is what we want
    match decoded.split_once('\0') {
        Some((_, text)) => clean(text),
        None => clean(&decoded),
    }
}

fn first_value(decoded: &str) -> String {
    clean(decoded.split('\0').next().unwrap_or_default())
}

fn clean(text: &str) -> String {
    text.trim_matches(|c: char| c == '\0' || c == '\u{feff}').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_frame() {
        assert_eq!(decode_text_frame(b"\x00Hello\x00"), "Hello");
        assert_eq!(decode_text_frame(b"\x03One\x00Two"), "One");
        assert_eq!(decode_text_frame(&[0x01, 0xFF, 0xFE, b'O', 0, b'k', 0]), "Ok");
        assert_eq!(decode_text_frame(&[]), "");
    }

    #[test]
    fn test_decode_comment_frame() {
        assert_eq!(decode_comment_frame(b"\x00engdesc\x00the text"), "the text");
        assert_eq!(decode_comment_frame(b"\x00eng\x00plain"), "plain");
        assert_eq!(decode_comment_frame(b"\x00en"), "");
    }

    #[test]
    fn test_parse_frames_v23_with_padding() {
        let mut body = Vec::new();
        body.extend_from_slice(b"TIT2");
        body.extend_from_slice(&6u32.to_be_bytes());
        body.extend_from_slice(&[0, 0]);
        body.extend_from_slice(b"\x00Title");
        body.extend_from_slice(&[0u8; 16]);

        let frames = parse_frames(&body, 3);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].frame_id, "TIT2");
        assert_eq!(frames[0].text().as_deref(), Some("Title"));
    }

    #[test]
    fn test_parse_frames_v22() {
        let mut body = Vec::new();
        body.extend_from_slice(b"TT2\x00\x00\x04");
        body.extend_from_slice(b"\x00Abc");

        let frames = parse_frames(&body, 2);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].frame_id, "TT2");
        assert_eq!(frames[0].text().as_deref(), Some("Abc"));
    }

    #[test]
    fn test_parse_frames_truncated() {
        let mut body = Vec::new();
        body.extend_from_slice(b"TALB");
        body.extend_from_slice(&100u32.to_be_bytes());
        body.extend_from_slice(&[0, 0]);
        body.extend_from_slice(b"\x00short");

        assert!(parse_frames(&body, 3).is_empty());
    }

    #[test]
    fn test_remove_unsynchronisation() {
        assert_eq!(remove_unsynchronisation(&[0xFF, 0x00, 0xE0, 0x01]), vec![0xFF, 0xE0, 0x01]);
    }
}
