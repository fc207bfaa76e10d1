//! Where tags of each kind are looked up and created.
//!
//! Placement follows format convention, not caller choice: ID3v2 tags are
//! front-loaded so metadata is available before the audio, ID3v1 and APE tags
//! are appended after the audio so the stream's start offset never moves.

use super::{Region, Tag, TagKind, TagRegion};

/// Region a new tag of `kind` must be created in.
///
/// `None` means creation is unsupported for that kind.
pub fn region_for(kind: TagKind) -> Option<Region> {
    match kind {
        TagKind::Id3v1 | TagKind::Ape => Some(Region::End),
        TagKind::Id3v2 => Some(Region::Start),
        TagKind::Xiph => None,
    }
}

/// Fetch the tag of `kind`, creating it in its mandated region if allowed.
///
/// An existing tag is returned whatever `allow_create` says. Creation of an
/// unsupported kind yields `None` and leaves both regions untouched.
pub fn resolve<'a>(
    kind: TagKind,
    allow_create: bool,
    start: &'a mut TagRegion,
    end: &'a mut TagRegion,
) -> Option<&'a mut Tag> {
    if start.contains(kind) {
        return start.get_mut(kind);
    }
    if end.contains(kind) {
        return end.get_mut(kind);
    }

    if !allow_create {
        return None;
    }

    let region = match region_for(kind) {
        Some(region) => region,
        None => {
            tracing::debug!(%kind, "tag kind cannot be created in a TTA file");
            return None;
        }
    };
    let tag = Tag::empty(kind)?;

    tracing::debug!(%kind, ?region, "creating empty tag");
    Some(match region {
        Region::Start => start.insert(tag),
        Region::End => end.insert(tag),
    })
}
