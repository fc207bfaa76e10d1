// ID3v1 tag implementation

use std::io::{Read, Seek};

use crate::field_mapping::ValueConverter;
use crate::utils::encoding::decode_latin1_field;
use crate::utils::io::read_block_at;

/// ID3v1 tag structure
#[derive(Debug, Clone, PartialEq)]
pub struct Id3v1Tag {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub comment: String,
    pub track: Option<u8>,
    pub genre: u8,
}

impl Default for Id3v1Tag {
    fn default() -> Self {
        Id3v1Tag {
            title: String::new(),
            artist: String::new(),
            album: String::new(),
            year: String::new(),
            comment: String::new(),
            track: None,
            // 255 means "no genre"; 0 is Blues
            genre: Self::NO_GENRE,
        }
    }
}

impl Id3v1Tag {
    pub const TAG_SIZE: usize = 128;
    const TAG_ID: [u8; 3] = [b'T', b'A', b'G'];
    const NO_GENRE: u8 = 255;

    /// Read an ID3v1 tag occupying the 128 bytes before `end`.
    pub fn read_at_end<R: Read + Seek>(reader: &mut R, end: u64) -> std::io::Result<Option<Self>> {
        if end < Self::TAG_SIZE as u64 {
            return Ok(None);
        }

        let buffer = read_block_at(reader, end - Self::TAG_SIZE as u64, Self::TAG_SIZE)?;
        if buffer.len() < Self::TAG_SIZE || buffer[0..3] != Self::TAG_ID {
            return Ok(None);
        }

        Ok(Some(Self::parse(&buffer)))
    }

    /// Parse ID3v1 tag from a 128-byte buffer
    fn parse(buffer: &[u8]) -> Self {
        let title = decode_latin1_field(&buffer[3..33]);
        let artist = decode_latin1_field(&buffer[33..63]);
        let album = decode_latin1_field(&buffer[63..93]);
        let year = decode_latin1_field(&buffer[93..97]);

        // ID3v1.1 stores the track number in the last comment byte
        let (comment, track) = if buffer[125] == 0 && buffer[126] != 0 {
            (decode_latin1_field(&buffer[97..125]), Some(buffer[126]))
        } else {
            (decode_latin1_field(&buffer[97..127]), None)
        };

        Id3v1Tag {
            title,
            artist,
            album,
            year,
            comment,
            track,
            genre: buffer[127],
        }
    }

    pub fn genre_name(&self) -> Option<&'static str> {
        ValueConverter::parse_genre_id3v1(self.genre)
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.artist.is_empty()
            && self.album.is_empty()
            && self.year.is_empty()
            && self.comment.is_empty()
            && self.track.is_none()
            && self.genre_name().is_none()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;

    pub(crate) fn id3v1_bytes(title: &str, artist: &str, track: u8, genre: u8) -> Vec<u8> {
        let mut buffer = vec![0u8; Id3v1Tag::TAG_SIZE];
        buffer[0..3].copy_from_slice(b"TAG");
        buffer[3..3 + title.len()].copy_from_slice(title.as_bytes());
        buffer[33..33 + artist.len()].copy_from_slice(artist.as_bytes());
        buffer[93..97].copy_from_slice(b"1999");
        buffer[97..104].copy_from_slice(b"comment");
        buffer[126] = track;
        buffer[127] = genre;
        buffer
    }

    #[test]
    fn test_read_at_end() {
        let mut data = vec![0xAAu8; 64];
        data.extend(id3v1_bytes("Title", "Artist", 3, 17));
        let end = data.len() as u64;

        let tag = Id3v1Tag::read_at_end(&mut Cursor::new(data), end).unwrap().unwrap();
        assert_eq!(tag.title, "Title");
        assert_eq!(tag.artist, "Artist");
        assert_eq!(tag.year, "1999");
        assert_eq!(tag.comment, "comment");
        assert_eq!(tag.track, Some(3));
        assert_eq!(tag.genre_name(), Some("Rock"));
        assert!(!tag.is_empty());
    }

    #[test]
    fn test_missing_tag() {
        let data = vec![0u8; 200];
        assert!(Id3v1Tag::read_at_end(&mut Cursor::new(data), 200).unwrap().is_none());
        assert!(Id3v1Tag::read_at_end(&mut Cursor::new(vec![0u8; 10]), 10).unwrap().is_none());
    }

    #[test]
    fn test_default_is_empty() {
        let tag = Id3v1Tag::default();
        assert!(tag.is_empty());
        assert_eq!(tag.genre_name(), None);
    }
}
