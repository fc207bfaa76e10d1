// ID3v2 tag implementation

use std::io::{Read, Seek};

use super::frames::{parse_frames, remove_unsynchronisation, Id3Frame};
use crate::error::{Result, TagError};
use crate::utils::io::{be_u32, read_block_at, synchsafe_u32};

// Header flags
const FLAG_UNSYNCHRONISATION: u8 = 0x80;
const FLAG_EXTENDED_HEADER: u8 = 0x40;
const FLAG_FOOTER: u8 = 0x10;

/// ID3v2 header structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Id3v2Header {
    pub version: (u8, u8),
    pub flags: u8,
    /// Size of the tag body, excluding header and footer
    pub size: u32,
}

impl Id3v2Header {
    pub const HEADER_SIZE: usize = 10;
    const ID: [u8; 3] = [b'I', b'D', b'3'];

    /// Parse a 10-byte ID3v2 header, `None` when the identifier is absent
    pub fn parse(buffer: &[u8]) -> Option<Self> {
        if buffer.len() < Self::HEADER_SIZE || buffer[0..3] != Self::ID {
            return None;
        }

        // Synchsafe size bytes never have the top bit set
        if buffer[6..10].iter().any(|&b| b & 0x80 != 0) {
            return None;
        }

        Some(Id3v2Header {
            version: (buffer[3], buffer[4]),
            flags: buffer[5],
            size: synchsafe_u32(&buffer[6..10]),
        })
    }

    pub fn has_footer(&self) -> bool {
        self.version.0 >= 4 && self.flags & FLAG_FOOTER != 0
    }

    /// Bytes the tag occupies on disk, header and footer included
    pub fn total_size(&self) -> u64 {
        let footer = if self.has_footer() { Self::HEADER_SIZE as u64 } else { 0 };
        Self::HEADER_SIZE as u64 + self.size as u64 + footer
    }
}

/// ID3v2 tag structure
#[derive(Debug, Clone, PartialEq)]
pub struct Id3v2Tag {
    pub header: Id3v2Header,
    pub frames: Vec<Id3Frame>,
}

impl Default for Id3v2Tag {
    fn default() -> Self {
        Id3v2Tag {
            header: Id3v2Header {
                version: (4, 0),
                flags: 0,
                size: 0,
            },
            frames: Vec::new(),
        }
    }
}

impl Id3v2Tag {
    /// Read the ID3v2 tag starting at `offset`.
    ///
    /// Returns the tag and the number of bytes it occupies, or `None` when
    /// there is no tag at that position.
    pub fn read_at<R: Read + Seek>(
        reader: &mut R,
        offset: u64,
        stream_len: u64,
    ) -> Result<Option<(Self, u64)>> {
        let buffer = read_block_at(reader, offset, Id3v2Header::HEADER_SIZE)?;
        let header = match Id3v2Header::parse(&buffer) {
            Some(h) => h,
            None => return Ok(None),
        };

        if !(2..=4).contains(&header.version.0) {
            return Err(TagError::Id3v2Version(header.version.0).into());
        }

        let total_size = header.total_size();
        if offset + total_size > stream_len {
            return Err(TagError::Id3v2PastEnd { offset }.into());
        }

        let body = read_block_at(
            reader,
            offset + Id3v2Header::HEADER_SIZE as u64,
            header.size as usize,
        )?;

        Ok(Some((Self::parse(header, body), total_size)))
    }

    fn parse(header: Id3v2Header, body: Vec<u8>) -> Self {
        let major = header.version.0;

        // Before 2.4 unsynchronisation applies to the whole tag body
        let body = if major < 4 && header.flags & FLAG_UNSYNCHRONISATION != 0 {
            remove_unsynchronisation(&body)
        } else {
            body
        };

        let frames_start = if major >= 3 && header.flags & FLAG_EXTENDED_HEADER != 0 {
            Self::extended_header_len(&body, major)
        } else {
            0
        };

        let frames = match body.get(frames_start..) {
            Some(frames_data) => parse_frames(frames_data, major),
            None => Vec::new(),
        };

        Id3v2Tag { header, frames }
    }

    fn extended_header_len(body: &[u8], major: u8) -> usize {
        if body.len() < 4 {
            return body.len();
        }

        if major == 3 {
            // Size excludes the 4 size bytes themselves
            be_u32(body, 0) as usize + 4
        } else {
            synchsafe_u32(&body[0..4]) as usize
        }
    }

    /// First frame with the given identifier
    pub fn frame(&self, frame_id: &str) -> Option<&Id3Frame> {
        self.frames.iter().find(|f| f.frame_id == frame_id)
    }

    /// Decoded text of the first frame with the given identifier
    pub fn text(&self, frame_id: &str) -> Option<String> {
        self.frame(frame_id)
            .and_then(Id3Frame::text)
            .filter(|text| !text.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
