mod common;

use std::io::Cursor;

use common::{ape, ape_footer, id3v1, id3v2, tta1_header, tta2_header, StreamBuilder};
use tta_tag::{
    Error, HeaderError, ReadPhase, ReadStyle, Region, StandardField, TagKind, TtaFile,
};

fn kinds(tags: &[tta_tag::Tag]) -> Vec<TagKind> {
    tags.iter().map(|tag| tag.kind()).collect()
}

#[test]
fn test_tags_in_both_regions() {
    let builder = StreamBuilder::new(tta1_header(2, 16, 44100, 441_000))
        .front(id3v2(&[("TIT2", "Front Title"), ("TPE1", "Front Artist")]))
        .audio_len(100_000)
        .back(ape(&[("Title", "Ape Title"), ("Genre", "Ambient")]))
        .back(id3v1("V1 Title", "V1 Artist", 7, 17));
    let front_len = builder.front_len();

    let file = TtaFile::read_from(builder.build(), ReadStyle::Average).unwrap();

    assert_eq!(file.audio_range(), (front_len, front_len + 100_000));
    assert_eq!(kinds(file.start_tags().tags()), vec![TagKind::Id3v2]);
    assert_eq!(kinds(file.end_tags().tags()), vec![TagKind::Ape, TagKind::Id3v1]);
    assert_eq!(file.end_tags().offset(), front_len + 100_000);

    let id3v2 = file.tag(TagKind::Id3v2).unwrap();
    assert_eq!(id3v2.get(StandardField::Title).as_deref(), Some("Front Title"));
    assert_eq!(id3v2.get(StandardField::Artist).as_deref(), Some("Front Artist"));

    let ape = file.tag(TagKind::Ape).unwrap();
    assert_eq!(ape.get(StandardField::Title).as_deref(), Some("Ape Title"));
    assert_eq!(ape.get(StandardField::Genre).as_deref(), Some("Ambient"));

    let id3v1 = file.tag(TagKind::Id3v1).unwrap();
    assert_eq!(id3v1.get(StandardField::Artist).as_deref(), Some("V1 Artist"));
    assert_eq!(id3v1.get(StandardField::Track).as_deref(), Some("7"));
    assert_eq!(id3v1.get(StandardField::Genre).as_deref(), Some("Rock"));
}

#[test]
fn test_properties_use_audio_range_length() {
    let file = StreamBuilder::new(tta1_header(2, 16, 44100, 441_000))
        .front(id3v2(&[("TIT2", "x")]))
        .audio_len(100_000)
        .back(id3v1("", "", 0, 255))
        .build();

    let file = TtaFile::read_from(file, ReadStyle::Average).unwrap();
    let properties = file.properties().unwrap();

    // 100000 bytes * 8 / 10 s / 1000
    assert_eq!(properties.bitrate, 80);
    assert_eq!(properties.sample_rate, 44100);
    assert_eq!(properties.channels, 2);
    assert_eq!(properties.bits_per_sample, 16);
    assert_eq!(properties.version, 1);
    assert_eq!(properties.description(), "TTA Audio, Version 1");
    assert_eq!(file.state().phase(), ReadPhase::PropertiesComputed);
}

#[test]
fn test_version_2_header() {
    let file = StreamBuilder::new(tta2_header(2, 16, 44100, 44100, 500))
        .audio_len(1_000_000)
        .build();

    let file = TtaFile::read_from(file, ReadStyle::Average).unwrap();
    let properties = file.properties().unwrap();

    assert_eq!(properties.version, 2);
    assert_eq!(properties.sample_frames, 44100);
    assert_eq!(properties.bitrate, 16);
    // Duration comes from the frame count, not the stored length
    assert!(properties.duration.as_secs() > 46_000);
}

#[test]
fn test_created_tags_go_to_mandated_regions() {
    let file = StreamBuilder::new(tta1_header(1, 8, 8000, 8000))
        .audio_len(2048)
        .build();
    let mut file = TtaFile::read_from(file, ReadStyle::Average).unwrap();

    // Opening ensures an ID3v2 tag at the start and an ID3v1 tag at the end
    assert_eq!(kinds(file.start_tags().tags()), vec![TagKind::Id3v2]);
    assert_eq!(kinds(file.end_tags().tags()), vec![TagKind::Id3v1]);

    assert!(file.get_tag(TagKind::Ape, false).is_none());
    let ape = file.get_tag(TagKind::Ape, true).unwrap();
    assert_eq!(ape.kind(), TagKind::Ape);
    assert!(ape.is_empty());

    assert_eq!(kinds(file.end_tags().tags()), vec![TagKind::Ape, TagKind::Id3v1]);
    assert_eq!(file.end_tags().region(), Region::End);
    assert_eq!(file.start_tags().tags().len(), 1);

    // Nothing is written, the audio range is unchanged
    assert_eq!(file.audio_range(), (0, 2048));
}

#[test]
fn test_existing_tag_is_returned_not_recreated() {
    let file = StreamBuilder::new(tta1_header(1, 8, 8000, 8000))
        .audio_len(2048)
        .back(ape(&[("Artist", "Someone")]))
        .build();
    let mut file = TtaFile::read_from(file, ReadStyle::TagsOnly).unwrap();

    for allow_create in [false, true] {
        let tag = file.get_tag(TagKind::Ape, allow_create).unwrap();
        assert_eq!(tag.get(StandardField::Artist).as_deref(), Some("Someone"));
    }
    assert_eq!(kinds(file.end_tags().tags()), vec![TagKind::Ape, TagKind::Id3v1]);
}

#[test]
fn test_string_keyed_kind_is_unsupported() {
    let file = StreamBuilder::new(tta1_header(1, 8, 8000, 8000))
        .audio_len(512)
        .build();
    let mut file = TtaFile::read_from(file, ReadStyle::Average).unwrap();

    assert!(file.get_tag(TagKind::Xiph, true).is_none());
    assert!(file.get_tag(TagKind::Xiph, false).is_none());
    assert_eq!(file.start_tags().tags().len(), 1);
    assert_eq!(file.end_tags().tags().len(), 1);
}

#[test]
fn test_consecutive_id3v2_tags() {
    let first = id3v2(&[("TIT2", "One")]);
    let second = id3v2(&[("TALB", "Two")]);
    let front_len = (first.len() + second.len()) as u64;

    let file = StreamBuilder::new(tta1_header(2, 16, 44100, 44100))
        .front(first)
        .front(second)
        .audio_len(4096)
        .build();
    let file = TtaFile::read_from(file, ReadStyle::Average).unwrap();

    assert_eq!(file.start_tags().tags().len(), 2);
    assert_eq!(file.audio_range().0, front_len);
    assert_eq!(file.properties().unwrap().sample_rate, 44100);
}

#[test]
fn test_tags_only_defers_properties() {
    let file = StreamBuilder::new(tta1_header(2, 16, 44100, 441_000))
        .audio_len(10_000)
        .build();
    let mut file = TtaFile::read_from(file, ReadStyle::TagsOnly).unwrap();

    assert!(file.properties().is_none());
    assert_eq!(file.state().phase(), ReadPhase::FullyIndexed);

    file.refresh(ReadStyle::TagsOnly).unwrap();
    assert!(file.properties().is_none());

    file.refresh(ReadStyle::Average).unwrap();
    assert_eq!(file.properties().unwrap().bitrate, 8);
    assert_eq!(file.state().phase(), ReadPhase::PropertiesComputed);

    let reader = file.close();
    assert_eq!(reader.get_ref().len(), 10_000);
}

#[test]
fn test_malformed_ape_tag_is_skipped() {
    let mut back = vec![0u8; 16];
    back.extend(ape_footer(1 << 30, 3, 0));

    let file = StreamBuilder::new(tta1_header(1, 16, 8000, 16000))
        .audio_len(1000)
        .back(back)
        .build();
    let len = file.get_ref().len() as u64;
    let file = TtaFile::read_from(file, ReadStyle::Average).unwrap();

    assert!(file.tag(TagKind::Ape).is_none());
    assert_eq!(file.audio_range(), (0, len));
}

#[test]
fn test_malformed_id3v2_tag_is_skipped() {
    let mut data = b"ID3\x09\x00\x00\x00\x00\x00\x10".to_vec();
    data.extend(vec![0u8; 200]);

    let file = TtaFile::read_from(Cursor::new(data.clone()), ReadStyle::TagsOnly).unwrap();
    assert_eq!(file.start_tags().length(), 0);
    assert!(file.tag(TagKind::Id3v2).unwrap().is_empty());

    // The unread tag now sits where the stream header should be
    let result = TtaFile::read_from(Cursor::new(data), ReadStyle::Average);
    assert!(matches!(result, Err(Error::Header(HeaderError::FormatMismatch))));
}

#[test]
fn test_truncated_extended_header() {
    let mut data = tta2_header(2, 16, 44100, 1, 1);
    data.truncate(20);

    let result = TtaFile::read_from(Cursor::new(data), ReadStyle::Average);
    assert!(matches!(
        result,
        Err(Error::Header(HeaderError::Truncated { needed: 32, actual: 20 }))
    ));
}

#[test]
fn test_open_from_disk() {
    let path = std::env::temp_dir().join(format!("tta-tag-open-{}.tta", std::process::id()));
    let data = StreamBuilder::new(tta1_header(2, 16, 48000, 480_000))
        .audio_len(50_000)
        .back(id3v1("Disk", "", 1, 0))
        .build()
        .into_inner();
    std::fs::write(&path, data).unwrap();

    let result = TtaFile::open(&path, ReadStyle::Average);
    std::fs::remove_file(&path).unwrap();

    let file = result.unwrap();
    assert_eq!(file.properties().unwrap().sample_rate, 48000);
    assert_eq!(
        file.tag(TagKind::Id3v1).unwrap().get(StandardField::Title).as_deref(),
        Some("Disk")
    );
}

#[test]
fn test_missing_file() {
    let result = TtaFile::open("/nonexistent/file.tta", ReadStyle::Average);
    assert!(matches!(result, Err(Error::Io(_))));
}
