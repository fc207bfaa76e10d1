// TTA file handle: tag region indexing and the read lifecycle

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use super::header::{StreamHeader, EXTENDED_HEADER_SIZE};
use super::properties::Properties;
use crate::ape::ApeTag;
use crate::error::{Error, Result};
use crate::id3::{Id3v1Tag, Id3v2Tag};
use crate::tag::{placement, Region, Tag, TagKind, TagRegion};
use crate::utils::io::{read_block_at, stream_len};

/// How much to read when a file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadStyle {
    /// Index tags only; the stream header is cached but not decoded
    TagsOnly,
    /// Index tags and compute audio properties
    #[default]
    Average,
}

/// Progress of the read lifecycle of one open handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ReadPhase {
    #[default]
    Unopened,
    /// Header block cached, start tag ensured
    HeaderRead,
    /// End tag ensured
    FullyIndexed,
    /// Properties decoded from the cached header block
    PropertiesComputed,
    /// Handle closed, cached blocks released
    Closed,
}

/// Per-handle cached read state
#[derive(Debug, Default)]
pub struct ReadState {
    phase: ReadPhase,
    header_block: Option<Vec<u8>>,
}

impl ReadState {
    pub fn phase(&self) -> ReadPhase {
        self.phase
    }

    pub fn header_block(&self) -> Option<&[u8]> {
        self.header_block.as_deref()
    }

    /// Move forward to `next`; moving backwards is ignored
    fn advance(&mut self, next: ReadPhase) {
        if next > self.phase {
            tracing::debug!(from = ?self.phase, to = ?next, "read phase");
            self.phase = next;
        }
    }

    /// A cached block is reused when properties are not wanted
    fn needs_header(&self, style: ReadStyle) -> bool {
        self.header_block.is_none() || style != ReadStyle::TagsOnly
    }

    fn store_header(&mut self, block: Vec<u8>) {
        self.header_block = Some(block);
    }

    fn release(&mut self) {
        self.header_block = None;
        self.advance(ReadPhase::Closed);
    }
}

/// An open TTA stream with its tag regions and audio properties
#[derive(Debug)]
pub struct TtaFile<R> {
    reader: R,
    state: ReadState,
    start: TagRegion,
    end: TagRegion,
    properties: Option<Properties>,
}

impl TtaFile<BufReader<File>> {
    /// Open a TTA file from disk
    pub fn open<P: AsRef<Path>>(path: P, style: ReadStyle) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), ?style, "opening TTA file");
        Self::read_from(BufReader::new(file), style)
    }
}

impl<R: Read + Seek> TtaFile<R> {
    /// Index the tags of a stream and run the read lifecycle
    pub fn read_from(mut reader: R, style: ReadStyle) -> Result<Self> {
        let len = stream_len(&mut reader)?;
        let start = index_start(&mut reader, len)?;
        let end = index_end(&mut reader, start.end(), len)?;

        tracing::debug!(
            stream_len = len,
            audio_start = start.end(),
            audio_end = end.offset(),
            start_tags = start.tags().len(),
            end_tags = end.tags().len(),
            "indexed tag regions"
        );

        let mut file = TtaFile {
            reader,
            state: ReadState::default(),
            start,
            end,
            properties: None,
        };

        file.read_start(style)?;
        file.read_end();
        if style == ReadStyle::Average {
            file.read_properties()?;
        }

        Ok(file)
    }

    /// Re-run the header read on this handle.
    ///
    /// With `TagsOnly` and a cached header block this does nothing; with
    /// `Average` the block is read again and properties are recomputed.
    pub fn refresh(&mut self, style: ReadStyle) -> Result<()> {
        self.read_start(style)?;
        if style == ReadStyle::Average {
            self.read_properties()?;
        }
        Ok(())
    }

    fn read_start(&mut self, style: ReadStyle) -> Result<()> {
        if !self.state.needs_header(style) {
            tracing::trace!("header block cached, skipping read");
            return Ok(());
        }

        // Read past the nominal header size so the version 2 layout fits
        let block = read_block_at(&mut self.reader, self.start.end(), EXTENDED_HEADER_SIZE)?;
        self.state.store_header(block);

        self.get_tag(TagKind::Id3v2, true);
        self.state.advance(ReadPhase::HeaderRead);
        Ok(())
    }

    fn read_end(&mut self) {
        self.get_tag(TagKind::Id3v1, true);
        self.state.advance(ReadPhase::FullyIndexed);
    }

    fn read_properties(&mut self) -> Result<()> {
        let (audio_start, audio_end) = self.audio_range();
        let block = self.state.header_block().unwrap_or_default();

        let header = StreamHeader::decode(block, audio_end - audio_start)?;
        self.properties = Some(Properties::from(&header));
        self.state.advance(ReadPhase::PropertiesComputed);
        Ok(())
    }

    /// Release cached state and hand back the reader
    pub fn close(self) -> R {
        let TtaFile {
            reader, mut state, ..
        } = self;
        state.release();
        reader
    }
}

impl<R> TtaFile<R> {
    /// Existing tag of `kind`, or a new empty one in its mandated region
    /// when `allow_create` is set and the kind can be created.
    pub fn get_tag(&mut self, kind: TagKind, allow_create: bool) -> Option<&mut Tag> {
        placement::resolve(kind, allow_create, &mut self.start, &mut self.end)
    }

    /// Existing tag of `kind` in either region
    pub fn tag(&self, kind: TagKind) -> Option<&Tag> {
        self.start.get(kind).or_else(|| self.end.get(kind))
    }

    /// All tags in file order
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.start.tags().iter().chain(self.end.tags())
    }

    /// `None` until properties have been computed
    pub fn properties(&self) -> Option<&Properties> {
        self.properties.as_ref()
    }

    /// Byte range of the audio stream, tag regions excluded
    pub fn audio_range(&self) -> (u64, u64) {
        (self.start.end(), self.end.offset())
    }

    pub fn start_tags(&self) -> &TagRegion {
        &self.start
    }

    pub fn end_tags(&self) -> &TagRegion {
        &self.end
    }

    pub fn state(&self) -> &ReadState {
        &self.state
    }
}

/// Consecutive ID3v2 tags at the start of the stream
fn index_start<R: Read + Seek>(reader: &mut R, len: u64) -> Result<TagRegion> {
    let mut tags = Vec::new();
    let mut offset = 0u64;

    loop {
        match Id3v2Tag::read_at(reader, offset, len) {
            Ok(Some((tag, size))) => {
                tracing::debug!(offset, size, frames = tag.frames.len(), "found ID3v2 tag");
                tags.push(Tag::Id3v2(tag));
                offset += size;
            }
            Ok(None) => break,
            Err(Error::Tag(e)) => {
                tracing::warn!(offset, error = %e, "skipping malformed ID3v2 tag");
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(TagRegion::with_tags(Region::Start, 0, offset, tags))
}

/// ID3v1 and APE tags at the end of the stream, never reaching below `floor`
fn index_end<R: Read + Seek>(reader: &mut R, floor: u64, len: u64) -> Result<TagRegion> {
    let mut tags = Vec::new();
    let mut offset = len;

    if offset >= floor + Id3v1Tag::TAG_SIZE as u64 {
        if let Some(tag) = Id3v1Tag::read_at_end(reader, offset)? {
            tracing::debug!(offset = offset - Id3v1Tag::TAG_SIZE as u64, "found ID3v1 tag");
            tags.push(Tag::Id3v1(tag));
            offset -= Id3v1Tag::TAG_SIZE as u64;
        }
    }

    match ApeTag::read_before(reader, offset) {
        Ok(Some((tag, size))) if offset - size >= floor => {
            tracing::debug!(offset = offset - size, size, items = tag.items.len(), "found APE tag");
            tags.insert(0, Tag::Ape(tag));
            offset -= size;
        }
        Ok(Some(_)) => {
            tracing::warn!(offset, "APE tag overlaps the start of the stream, ignoring it");
        }
        Ok(None) => {}
        Err(Error::Tag(e)) => {
            tracing::warn!(offset, error = %e, "skipping malformed APE tag");
        }
        Err(e) => return Err(e),
    }

    Ok(TagRegion::with_tags(Region::End, offset, len - offset, tags))
}
