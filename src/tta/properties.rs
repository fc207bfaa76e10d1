// Audio properties reported for an opened TTA file

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::header::StreamHeader;

/// Playback properties of a TTA stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Properties {
    #[serde(serialize_with = "serialize_seconds")]
    pub duration: Duration,
    /// Average bitrate in kbps
    pub bitrate: u64,
    /// Signed, as stored in the header
    pub sample_rate: i32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub sample_frames: u64,
    pub samples_per_frame: f64,
    pub version: u8,
}

impl Properties {
    pub fn description(&self) -> String {
        format!("TTA Audio, Version {}", self.version)
    }
}

impl From<&StreamHeader> for Properties {
    fn from(header: &StreamHeader) -> Self {
        Properties {
            duration: header.duration(),
            bitrate: header.bitrate(),
            sample_rate: header.sample_rate(),
            channels: header.channels(),
            bits_per_sample: header.bits_per_sample(),
            sample_frames: header.sample_frames(),
            samples_per_frame: header.samples_per_frame(),
            version: header.version(),
        }
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.2}s, {} kbps, {} Hz, {} ch, {} bit)",
            self.description(),
            self.duration.as_secs_f64(),
            self.bitrate,
            self.sample_rate,
            self.channels,
            self.bits_per_sample
        )
    }
}

fn serialize_seconds<S: serde::Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_secs_f64())
}
