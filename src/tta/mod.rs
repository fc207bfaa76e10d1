// TrueAudio container support
//
// A TTA file is a stream header followed by the compressed audio, with
// optional ID3v2 tags before it and APEv2 / ID3v1 tags after it.

pub mod file;
pub mod header;
pub mod properties;

pub use file::{ReadPhase, ReadState, ReadStyle, TtaFile};
pub use header::{HeaderLayout, StreamHeader, TTA_SIGNATURE};
pub use properties::Properties;
