// Unified metadata field mapping system
//
// The tag kinds found in TTA files name the same fields differently:
// - ID3v2: Frame IDs (TIT2, TPE1, TALB, etc.; TT2, TP1, TAL in 2.2)
// - APE: Item keys (Title, Artist, Album, etc.)
// - ID3v1: Fixed struct fields
//
// This module standardizes field access across tag kinds.

use std::str::FromStr;

use serde::Serialize;

use crate::id3::frames::{frame_ids, frame_ids_v22};

/// Standard metadata fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardField {
    Title,
    Artist,
    Album,
    Year,
    Track,
    Genre,
    Comment,
    Lyrics,
}

impl StandardField {
    pub const ALL: [StandardField; 8] = [
        StandardField::Title,
        StandardField::Artist,
        StandardField::Album,
        StandardField::Year,
        StandardField::Track,
        StandardField::Genre,
        StandardField::Comment,
        StandardField::Lyrics,
    ];

    /// Get standard field name (lowercase)
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardField::Title => "title",
            StandardField::Artist => "artist",
            StandardField::Album => "album",
            StandardField::Year => "year",
            StandardField::Track => "track",
            StandardField::Genre => "genre",
            StandardField::Comment => "comment",
            StandardField::Lyrics => "lyrics",
        }
    }
}

impl FromStr for StandardField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StandardField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown field `{s}`"))
    }
}

/// Format-specific field mappings
pub struct FieldMappings;

impl FieldMappings {
    // APE item keys
    pub const APE_TITLE: &str = "Title";
    pub const APE_ARTIST: &str = "Artist";
    pub const APE_ALBUM: &str = "Album";
    pub const APE_YEAR: &str = "Year";
    pub const APE_TRACK: &str = "Track";
    pub const APE_GENRE: &str = "Genre";
    pub const APE_COMMENT: &str = "Comment";
    pub const APE_LYRICS: &str = "Lyrics";

    /// ID3v2 frame IDs for a standard field, most preferred first.
    ///
    /// `major_version` 2 selects the three-character identifiers.
    pub fn to_id3v2(field: StandardField, major_version: u8) -> &'static [&'static str] {
        if major_version == 2 {
            return match field {
                StandardField::Title => &[frame_ids_v22::TITLE],
                StandardField::Artist => &[frame_ids_v22::ARTIST],
                StandardField::Album => &[frame_ids_v22::ALBUM],
                StandardField::Year => &[frame_ids_v22::YEAR],
                StandardField::Track => &[frame_ids_v22::TRACK],
                StandardField::Genre => &[frame_ids_v22::GENRE],
                StandardField::Comment => &[frame_ids_v22::COMMENT],
                StandardField::Lyrics => &[frame_ids_v22::LYRICS],
            };
        }

        match field {
            StandardField::Title => &[frame_ids::TITLE],
            StandardField::Artist => &[frame_ids::ARTIST],
            StandardField::Album => &[frame_ids::ALBUM],
            // Also support legacy TYER
            StandardField::Year => &[frame_ids::RECORDING_TIME, frame_ids::YEAR],
            StandardField::Track => &[frame_ids::TRACK],
            StandardField::Genre => &[frame_ids::GENRE],
            StandardField::Comment => &[frame_ids::COMMENT],
            StandardField::Lyrics => &[frame_ids::LYRICS],
        }
    }

    /// Get APE item key for a standard field
    pub fn to_ape(field: StandardField) -> &'static str {
        match field {
            StandardField::Title => Self::APE_TITLE,
            StandardField::Artist => Self::APE_ARTIST,
            StandardField::Album => Self::APE_ALBUM,
            StandardField::Year => Self::APE_YEAR,
            StandardField::Track => Self::APE_TRACK,
            StandardField::Genre => Self::APE_GENRE,
            StandardField::Comment => Self::APE_COMMENT,
            StandardField::Lyrics => Self::APE_LYRICS,
        }
    }
}

/// Metadata value converter for handling format-specific value formats
pub struct ValueConverter;

impl ValueConverter {
    /// Name of a numeric ID3v1 genre
    pub fn parse_genre_id3v1(genre_id: u8) -> Option<&'static str> {
        ID3V1_GENRES.get(genre_id as usize).copied()
    }
}

const ID3V1_GENRES: [&str; 80] = [
    "Blues",
    "Classic Rock",
    "Country",
    "Dance",
    "Disco",
    "Funk",
    "Grunge",
    "Hip-Hop",
    "Jazz",
    "Metal",
    "New Age",
    "Oldies",
    "Other",
    "Pop",
    "R&B",
    "Rap",
    "Reggae",
    "Rock",
    "Techno",
    "Industrial",
    "Alternative",
    "Ska",
    "Death Metal",
    "Pranks",
    "Soundtrack",
    "Euro-Techno",
    "Ambient",
    "Trip-Hop",
    "Vocal",
    "Jazz+Funk",
    "Fusion",
    "Trance",
    "Classical",
    "Instrumental",
    "Acid",
    "House",
    "Game",
    "Sound Clip",
    "Gospel",
    "Noise",
    "AlternRock",
    "Bass",
    "Soul",
    "Punk",
    "Space",
    "Meditative",
    "Instrumental Pop",
    "Instrumental Rock",
    "Ethnic",
    "Gothic",
    "Darkwave",
    "Techno-Industrial",
    "Electronic",
    "Pop-Folk",
    "Eurodance",
    "Dream",
    "Southern Rock",
    "Comedy",
    "Cult",
    "Gangsta",
    "Top 40",
    "Christian Rap",
    "Pop/Funk",
    "Jungle",
    "Native American",
    "Cabaret",
    "New Wave",
    "Psychadelic",
    "Rave",
    "Showtunes",
    "Trailer",
    "Lo-Fi",
    "Tribal",
    "Acid Punk",
    "Acid Jazz",
    "Polka",
    "Retro",
    "Musical",
    "Rock & Roll",
    "Hard Rock",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_field_parsing() {
        assert_eq!("title".parse::<StandardField>(), Ok(StandardField::Title));
        assert_eq!("TITLE".parse::<StandardField>(), Ok(StandardField::Title));
        assert_eq!("TiTlE".parse::<StandardField>(), Ok(StandardField::Title));
        assert!("unknown".parse::<StandardField>().is_err());
    }

    #[test]
    fn test_field_mapping() {
        assert_eq!(FieldMappings::to_id3v2(StandardField::Title, 3), &["TIT2"]);
        assert_eq!(FieldMappings::to_id3v2(StandardField::Title, 2), &["TT2"]);
        assert_eq!(FieldMappings::to_id3v2(StandardField::Year, 4), &["TDRC", "TYER"]);
        assert_eq!(FieldMappings::to_ape(StandardField::Title), "Title");
    }

    #[test]
    fn test_id3v1_genres() {
        assert_eq!(ValueConverter::parse_genre_id3v1(0), Some("Blues"));
        assert_eq!(ValueConverter::parse_genre_id3v1(17), Some("Rock"));
        assert_eq!(ValueConverter::parse_genre_id3v1(79), Some("Hard Rock"));
        assert_eq!(ValueConverter::parse_genre_id3v1(255), None);
    }
}
