// APE tag support
//
// APEv2 tags sit at the end of a file (before any ID3v1 tag) and are found
// through their footer.
//
// APE Tag Structure:
// - Optional header (32 bytes, same layout as the footer)
// - Tag items (variable count)
//   - Value size: (4 bytes, little-endian)
//   - Item flags: (4 bytes, little-endian)
//   - Key: ASCII string (null-terminated)
//   - Value: (value size bytes)
// - Footer (32 bytes):
//   - Signature: "APETAGEX" (8 bytes)
//   - Version: 1000 or 2000 (4 bytes)
//   - Tag size: items + footer, header excluded (4 bytes)
//   - Item count: (4 bytes)
//   - Flags: (4 bytes)
//   - Reserved: (8 bytes)

use std::io::{Read, Seek};

use crate::error::{Result, TagError};
use crate::utils::io::{le_u32, read_block_at};

pub const APE_SIGNATURE: &[u8; 8] = b"APETAGEX";
pub const APE_VERSION: u32 = 2000;
pub const APE_FOOTER_SIZE: usize = 32;

/// APE tag flags
pub mod flags {
    pub const CONTAINS_HEADER: u32 = 0x80000000;
    pub const CONTAINS_FOOTER: u32 = 0x40000000;
    pub const IS_HEADER: u32 = 0x20000000;
    pub const READ_ONLY: u32 = 0x00000001;
    pub const ITEM_TYPE_MASK: u32 = 0x00000006;
}

/// APE tag footer (or header; both share the layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApeTagFooter {
    pub version: u32,
    pub tag_size: u32,
    pub item_count: u32,
    pub flags: u32,
}

impl ApeTagFooter {
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < APE_FOOTER_SIZE || !data.starts_with(APE_SIGNATURE) {
            return None;
        }

        Some(ApeTagFooter {
            version: le_u32(data, 8),
            tag_size: le_u32(data, 12),
            item_count: le_u32(data, 16),
            flags: le_u32(data, 20),
        })
    }

    pub fn has_header(&self) -> bool {
        self.flags & flags::CONTAINS_HEADER != 0
    }

    /// Bytes the tag occupies on disk, header included
    pub fn total_size(&self) -> u64 {
        let header = if self.has_header() { APE_FOOTER_SIZE as u64 } else { 0 };
        self.tag_size as u64 + header
    }
}

/// What an APE item value holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApeItemKind {
    Text,
    Binary,
    Locator,
    Reserved,
}

/// APE tag item
#[derive(Debug, Clone, PartialEq)]
pub struct ApeTagItem {
    pub flags: u32,
    pub key: String,
    pub value: Vec<u8>,
}

impl ApeTagItem {
    pub fn kind(&self) -> ApeItemKind {
        match (self.flags & flags::ITEM_TYPE_MASK) >> 1 {
            0 => ApeItemKind::Text,
            1 => ApeItemKind::Binary,
            2 => ApeItemKind::Locator,
            _ => ApeItemKind::Reserved,
        }
    }

    /// UTF-8 value for text and locator items
    pub fn text(&self) -> Option<String> {
        match self.kind() {
            ApeItemKind::Text | ApeItemKind::Locator => {
                Some(String::from_utf8_lossy(&self.value).trim_end_matches('\0').to_string())
            }
            _ => None,
        }
    }
}

/// APE tag
#[derive(Debug, Clone, PartialEq)]
pub struct ApeTag {
    pub version: u32,
    pub items: Vec<ApeTagItem>,
}

impl Default for ApeTag {
    fn default() -> Self {
        ApeTag {
            version: APE_VERSION,
            items: Vec::new(),
        }
    }
}

impl ApeTag {
    /// Read the APE tag whose footer ends at `end`.
    ///
    /// Returns the tag and the number of bytes it occupies, or `None` when
    /// no footer is present.
    pub fn read_before<R: Read + Seek>(reader: &mut R, end: u64) -> Result<Option<(Self, u64)>> {
        if end < APE_FOOTER_SIZE as u64 {
            return Ok(None);
        }

        let footer_data = read_block_at(reader, end - APE_FOOTER_SIZE as u64, APE_FOOTER_SIZE)?;
        let footer = match ApeTagFooter::parse(&footer_data) {
            Some(f) => f,
            None => return Ok(None),
        };

        if (footer.tag_size as usize) < APE_FOOTER_SIZE || footer.total_size() > end {
            return Err(TagError::ApeSize {
                size: footer.tag_size,
                stream_len: end,
            }
            .into());
        }

        let items_len = footer.tag_size as usize - APE_FOOTER_SIZE;
        let items_data = read_block_at(reader, end - footer.tag_size as u64, items_len)?;
        let items = Self::parse_items(&items_data, footer.item_count)?;

        Ok(Some((
            ApeTag {
                version: footer.version,
                items,
            },
            footer.total_size(),
        )))
    }

    fn parse_items(data: &[u8], count: u32) -> std::result::Result<Vec<ApeTagItem>, TagError> {
        let mut items = Vec::new();
        let mut pos = 0usize;

        for index in 0..count {
            let past_end = TagError::ApeItemPastEnd { index };

            if pos + 8 > data.len() {
                return Err(past_end);
            }
            let value_size = le_u32(data, pos) as usize;
            let item_flags = le_u32(data, pos + 4);
            pos += 8;

            let key_len = data[pos..]
                .iter()
                .position(|&b| b == 0)
                .ok_or(past_end.clone())?;
            let key = String::from_utf8_lossy(&data[pos..pos + key_len]).into_owned();
            pos += key_len + 1;

            let value_end = pos.checked_add(value_size).ok_or(past_end.clone())?;
            if value_end > data.len() {
                return Err(past_end);
            }

            items.push(ApeTagItem {
                flags: item_flags,
                key,
                value: data[pos..value_end].to_vec(),
            });
            pos = value_end;
        }

        Ok(items)
    }

    /// Item lookup; APE keys are case-insensitive
    pub fn item(&self, key: &str) -> Option<&ApeTagItem> {
        self.items.iter().find(|item| item.key.eq_ignore_ascii_case(key))
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.item(key)
            .and_then(ApeTagItem::text)
            .filter(|text| !text.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
