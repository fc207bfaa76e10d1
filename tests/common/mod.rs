// Shared builders for in-memory TTA streams

#![allow(dead_code)]

use std::io::Cursor;

/// Version 1 stream header
pub fn tta1_header(channels: u16, bits: u16, sample_rate: u32, frames: u32) -> Vec<u8> {
    let mut data = b"TTA1".to_vec();
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&channels.to_le_bytes());
    data.extend_from_slice(&bits.to_le_bytes());
    data.extend_from_slice(&sample_rate.to_le_bytes());
    data.extend_from_slice(&frames.to_le_bytes());
    data
}

/// Version 2 stream header
pub fn tta2_header(channels: u16, bits: u16, sample_rate: u32, frames: u64, seconds: u64) -> Vec<u8> {
    let mut data = b"TTA2".to_vec();
    data.extend_from_slice(&channels.to_le_bytes());
    data.extend_from_slice(&bits.to_le_bytes());
    data.extend_from_slice(&sample_rate.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&frames.to_le_bytes());
    data.extend_from_slice(&seconds.to_le_bytes());
    data
}

/// ID3v2.3 tag holding Latin-1 text frames
pub fn id3v2(frames: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (id, text) in frames {
        body.extend_from_slice(id.as_bytes());
        body.extend_from_slice(&(text.len() as u32 + 1).to_be_bytes());
        body.extend_from_slice(&[0, 0, 0]);
        body.extend_from_slice(text.as_bytes());
    }
    body.extend_from_slice(&[0u8; 16]);

    let size = body.len() as u32;
    let mut data = b"ID3\x03\x00\x00".to_vec();
    data.extend_from_slice(&[
        ((size >> 21) & 0x7F) as u8,
        ((size >> 14) & 0x7F) as u8,
        ((size >> 7) & 0x7F) as u8,
        (size & 0x7F) as u8,
    ]);
    data.extend(body);
    data
}

/// ID3v1.1 tag
pub fn id3v1(title: &str, artist: &str, track: u8, genre: u8) -> Vec<u8> {
    let mut data = vec![0u8; 128];
    data[0..3].copy_from_slice(b"TAG");
    data[3..3 + title.len()].copy_from_slice(title.as_bytes());
    data[33..33 + artist.len()].copy_from_slice(artist.as_bytes());
    data[126] = track;
    data[127] = genre;
    data
}

/// APE footer or header block
pub fn ape_footer(tag_size: u32, count: u32, flags: u32) -> Vec<u8> {
    let mut data = b"APETAGEX".to_vec();
    data.extend_from_slice(&2000u32.to_le_bytes());
    data.extend_from_slice(&tag_size.to_le_bytes());
    data.extend_from_slice(&count.to_le_bytes());
    data.extend_from_slice(&flags.to_le_bytes());
    data.extend_from_slice(&[0u8; 8]);
    data
}

/// APEv2 tag with header and footer holding text items
pub fn ape(items: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (key, value) in items {
        body.extend_from_slice(&(value.len() as u32).to_le_bytes());
        body.extend_from_slice(&0u32.to_le_bytes());
        body.extend_from_slice(key.as_bytes());
        body.push(0);
        body.extend_from_slice(value.as_bytes());
    }

    let tag_size = body.len() as u32 + 32;
    let count = items.len() as u32;
    let mut data = ape_footer(tag_size, count, 0xA000_0000);
    data.extend(body);
    data.extend(ape_footer(tag_size, count, 0x8000_0000));
    data
}

/// Assembles a stream: start tags, header, audio payload, end tags
#[derive(Default)]
pub struct StreamBuilder {
    front: Vec<u8>,
    header: Vec<u8>,
    audio_len: usize,
    back: Vec<u8>,
}

impl StreamBuilder {
    pub fn new(header: Vec<u8>) -> Self {
        StreamBuilder {
            header,
            ..Default::default()
        }
    }

    pub fn front(mut self, bytes: Vec<u8>) -> Self {
        self.front.extend(bytes);
        self
    }

    /// Audio length in bytes, header included
    pub fn audio_len(mut self, len: usize) -> Self {
        self.audio_len = len;
        self
    }

    pub fn back(mut self, bytes: Vec<u8>) -> Self {
        self.back.extend(bytes);
        self
    }

    pub fn front_len(&self) -> u64 {
        self.front.len() as u64
    }

    pub fn build(self) -> Cursor<Vec<u8>> {
        let mut audio = self.header;
        if audio.len() < self.audio_len {
            audio.resize(self.audio_len, 0x5A);
        }

        let mut data = self.front;
        data.extend(audio);
        data.extend(self.back);
        Cursor::new(data)
    }
}
