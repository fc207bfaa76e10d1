// TTA stream header decoding
//
// Version 1 layout (18 bytes, little-endian):
// - "TTA" (3 bytes)
// - Version digit '1' (1 byte)
// - Format tag (2 bytes, unused)
// - Channels (2 bytes)
// - Bits per sample (2 bytes)
// - Sample rate (4 bytes)
// - Sample frames (4 bytes)
//
// Version 2 layout (32 bytes):
// - "TTA" (3 bytes)
// - Version digit (1 byte)
// - Channels (2 bytes)
// - Bits per sample (2 bytes)
// - Sample rate (4 bytes)
// - Channel mask (4 bytes)
// - Sample frames (8 bytes)
// - Length in seconds (8 bytes)

use std::time::Duration;

use crate::error::HeaderError;
use crate::utils::io::{le_u16, le_u32, le_u64};

/// TTA file identifier
pub const TTA_SIGNATURE: &[u8; 3] = b"TTA";

/// Nominal header size, enough for the version 1 layout
pub const HEADER_SIZE: usize = 18;

/// Bytes needed by the version 2 layout
pub const EXTENDED_HEADER_SIZE: usize = 32;

const SAMPLES_PER_FRAME_FACTOR: f64 = 1.044_897_959_183_673_469_39;

/// Which field layout a header block uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLayout {
    /// Version 1, 18 bytes
    Basic,
    /// Version 2 and anything else that is not version 1, 32 bytes
    Extended,
}

impl HeaderLayout {
    /// Any digit other than 1 selects the extended layout.
    pub fn for_version(version: u8) -> Self {
        if version == 1 {
            HeaderLayout::Basic
        } else {
            HeaderLayout::Extended
        }
    }

    pub fn size(self) -> usize {
        match self {
            HeaderLayout::Basic => HEADER_SIZE,
            HeaderLayout::Extended => EXTENDED_HEADER_SIZE,
        }
    }
}

/// Decoded TTA stream header.
///
/// Built once per open from the header block and the byte length of the
/// audio stream. Derived fields are computed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamHeader {
    version: u8,
    channels: u16,
    bits_per_sample: u16,
    sample_rate: i32,
    sample_frames: u64,
    samples_per_frame: f64,
    length_in_seconds: u64,
    bitrate: u64,
    stream_length: u64,
}

impl StreamHeader {
    /// Decode a header block.
    ///
    /// `stream_length` is the byte length of the audio stream, used for the
    /// bitrate. Every division truncates and a zero divisor yields zero.
    pub fn decode(data: &[u8], stream_length: u64) -> Result<Self, HeaderError> {
        if data.is_empty() {
            return Err(HeaderError::MissingData);
        }

        if !data.starts_with(TTA_SIGNATURE) {
            return Err(HeaderError::FormatMismatch);
        }

        if data.len() < HEADER_SIZE {
            return Err(HeaderError::Truncated {
                needed: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let version = data[3].wrapping_sub(b'0');
        let layout = HeaderLayout::for_version(version);

        if data.len() < layout.size() {
            return Err(HeaderError::Truncated {
                needed: layout.size(),
                actual: data.len(),
            });
        }

        let header = match layout {
            HeaderLayout::Basic => {
                let channels = le_u16(data, 6);
                let bits_per_sample = le_u16(data, 8);
                let sample_rate = le_u32(data, 10) as i32;
                let sample_frames = le_u32(data, 14) as u64;

                let length_in_seconds = if sample_rate > 0 {
                    sample_frames / sample_rate as u64
                } else {
                    0
                };

                Self::with_derived(
                    version,
                    channels,
                    bits_per_sample,
                    sample_rate,
                    sample_frames,
                    length_in_seconds,
                    stream_length,
                )
            }
            HeaderLayout::Extended => {
                let channels = le_u16(data, 4);
                let bits_per_sample = le_u16(data, 6);
                let sample_rate = le_u32(data, 8) as i32;
                let _channel_mask = le_u32(data, 12);
                let sample_frames = le_u64(data, 16);
                let length_in_seconds = le_u64(data, 24);

                Self::with_derived(
                    version,
                    channels,
                    bits_per_sample,
                    sample_rate,
                    sample_frames,
                    length_in_seconds,
                    stream_length,
                )
            }
        };

        tracing::trace!(
            version = header.version,
            channels = header.channels,
            sample_rate = header.sample_rate,
            sample_frames = header.sample_frames,
            bitrate = header.bitrate,
            "decoded TTA stream header"
        );

        Ok(header)
    }

    fn with_derived(
        version: u8,
        channels: u16,
        bits_per_sample: u16,
        sample_rate: i32,
        sample_frames: u64,
        length_in_seconds: u64,
        stream_length: u64,
    ) -> Self {
        let samples_per_frame = SAMPLES_PER_FRAME_FACTOR * sample_rate as f64;

        let bitrate = stream_length
            .saturating_mul(8)
            .checked_div(length_in_seconds)
            .map(|bits_per_second| bits_per_second / 1000)
            .unwrap_or(0);

        StreamHeader {
            version,
            channels,
            bits_per_sample,
            sample_rate,
            sample_frames,
            samples_per_frame,
            length_in_seconds,
            bitrate,
            stream_length,
        }
    }

    /// Format revision, the value of the version digit
    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn layout(&self) -> HeaderLayout {
        HeaderLayout::for_version(self.version)
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    /// The raw field read as signed; values of 2^31 and above are negative
    pub fn sample_rate(&self) -> i32 {
        self.sample_rate
    }

    pub fn sample_frames(&self) -> u64 {
        self.sample_frames
    }

    pub fn samples_per_frame(&self) -> f64 {
        self.samples_per_frame
    }

    /// Whole seconds; derived for version 1, read from the header otherwise
    pub fn length_in_seconds(&self) -> u64 {
        self.length_in_seconds
    }

    /// Average bitrate in kbps
    pub fn bitrate(&self) -> u64 {
        self.bitrate
    }

    pub fn stream_length(&self) -> u64 {
        self.stream_length
    }

    /// Playback duration computed from the frame count.
    ///
    /// This does not use `length_in_seconds`; for version 2 headers the two
    /// can disagree. Results that are not a finite positive number of
    /// seconds give zero.
    pub fn duration(&self) -> Duration {
        if self.sample_rate <= 0 && self.stream_length == 0 {
            return Duration::ZERO;
        }

        let seconds =
            self.sample_frames as f64 * self.samples_per_frame / self.sample_rate as f64;

        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO)
    }
}
