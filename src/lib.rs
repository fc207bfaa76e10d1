//! TrueAudio (TTA) stream header decoding and tag placement.
//!
//! Opening a file indexes its tag regions (ID3v2 at the start, APEv2 and
//! ID3v1 at the end), reads the stream header from the start of the audio
//! and derives the audio properties:
//!
//! ```no_run
//! use tta_tag::{ReadStyle, TagKind, TtaFile};
//!
//! let mut file = TtaFile::open("track.tta", ReadStyle::Average)?;
//! if let Some(properties) = file.properties() {
//!     println!("{properties}");
//! }
//! let ape = file.get_tag(TagKind::Ape, true);
//! assert!(ape.is_some());
//! # Ok::<(), tta_tag::Error>(())
//! ```

pub mod ape;
pub mod error;
pub mod field_mapping;
pub mod id3;
pub mod tag;
pub mod tta;
mod utils;

#[cfg(feature = "python")]
mod python;

pub use error::{Error, HeaderError, Result, TagError};
pub use field_mapping::StandardField;
pub use tag::{Region, Tag, TagKind, TagRegion};
pub use tta::{Properties, ReadPhase, ReadStyle, StreamHeader, TtaFile};
