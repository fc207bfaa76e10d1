//! Tag kinds, the tag variant and the start/end tag regions of a file

pub mod placement;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::ape::ApeTag;
use crate::field_mapping::{FieldMappings, StandardField};
use crate::id3::{Id3v1Tag, Id3v2Tag};

/// Kinds of tag a caller can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TagKind {
    /// Frame-based tag at the start of the file
    Id3v2,
    /// Simple fixed-size tag at the end of the file
    Id3v1,
    /// Extended item-based tag at the end of the file
    Ape,
    /// String-keyed comment block; never stored in a TTA file
    Xiph,
}

impl TagKind {
    pub const ALL: [TagKind; 4] = [TagKind::Id3v2, TagKind::Id3v1, TagKind::Ape, TagKind::Xiph];

    pub fn name(self) -> &'static str {
        match self {
            TagKind::Id3v2 => "ID3v2",
            TagKind::Id3v1 => "ID3v1",
            TagKind::Ape => "APE",
            TagKind::Xiph => "Xiph",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TagKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown tag kind `{s}` (expected id3v2, id3v1, ape or xiph)"))
    }
}

/// Where in the file a tag physically lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Region {
    Start,
    End,
}

/// A tag of one of the kinds a TTA file can hold
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Id3v2(Id3v2Tag),
    Id3v1(Id3v1Tag),
    Ape(ApeTag),
}

impl Tag {
    /// A new empty tag, `None` for kinds without an implementation
    pub fn empty(kind: TagKind) -> Option<Tag> {
        match kind {
            TagKind::Id3v2 => Some(Tag::Id3v2(Id3v2Tag::default())),
            TagKind::Id3v1 => Some(Tag::Id3v1(Id3v1Tag::default())),
            TagKind::Ape => Some(Tag::Ape(ApeTag::default())),
            TagKind::Xiph => None,
        }
    }

    pub fn kind(&self) -> TagKind {
        match self {
            Tag::Id3v2(_) => TagKind::Id3v2,
            Tag::Id3v1(_) => TagKind::Id3v1,
            Tag::Ape(_) => TagKind::Ape,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Tag::Id3v2(tag) => tag.is_empty(),
            Tag::Id3v1(tag) => tag.is_empty(),
            Tag::Ape(tag) => tag.is_empty(),
        }
    }

    /// Value of a standard field, `None` when absent or blank
    pub fn get(&self, field: StandardField) -> Option<String> {
        match self {
            Tag::Id3v2(tag) => FieldMappings::to_id3v2(field, tag.header.version.0)
                .iter()
                .find_map(|id| tag.text(id)),
            Tag::Ape(tag) => tag.text(FieldMappings::to_ape(field)),
            Tag::Id3v1(tag) => {
                let value = match field {
                    StandardField::Title => tag.title.clone(),
                    StandardField::Artist => tag.artist.clone(),
                    StandardField::Album => tag.album.clone(),
                    StandardField::Year => tag.year.clone(),
                    StandardField::Comment => tag.comment.clone(),
                    StandardField::Track => tag.track?.to_string(),
                    StandardField::Genre => tag.genre_name()?.to_string(),
                    StandardField::Lyrics => return None,
                };
                Some(value).filter(|v| !v.is_empty())
            }
        }
    }
}

/// The tags physically located in one region of a file, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct TagRegion {
    region: Region,
    offset: u64,
    length: u64,
    tags: Vec<Tag>,
}

impl TagRegion {
    pub fn new(region: Region, offset: u64, length: u64) -> Self {
        Self::with_tags(region, offset, length, Vec::new())
    }

    pub fn with_tags(region: Region, offset: u64, length: u64, tags: Vec<Tag>) -> Self {
        TagRegion {
            region,
            offset,
            length,
            tags,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Byte offset of the region in the file
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Bytes the region's tags occupied when the file was read
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn end(&self) -> u64 {
        self.offset + self.length
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn contains(&self, kind: TagKind) -> bool {
        self.tags.iter().any(|tag| tag.kind() == kind)
    }

    pub fn get(&self, kind: TagKind) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.kind() == kind)
    }

    pub fn get_mut(&mut self, kind: TagKind) -> Option<&mut Tag> {
        self.tags.iter_mut().find(|tag| tag.kind() == kind)
    }

    /// Add a tag at its conventional position within the region.
    ///
    /// At the start a new tag goes first. At the end an ID3v1 tag is always
    /// last, so other tags go before it.
    pub fn insert(&mut self, tag: Tag) -> &mut Tag {
        let index = match self.region {
            Region::Start => 0,
            Region::End => match self.tags.last() {
                Some(Tag::Id3v1(_)) if tag.kind() != TagKind::Id3v1 => self.tags.len() - 1,
                _ => self.tags.len(),
            },
        };

        self.tags.insert(index, tag);
        &mut self.tags[index]
    }
}
