//! ID3v2.2 identifier conversion.
//!
//! Only frames that can be written back into an ID3v2.2 tag are converted. Pictures,
//! counters and the like have different or missing ID3v2.2 layouts and are left as raw
//! frames by the scanner.

use crate::id3v2::frames::{FrameId, StringType, UrlType};

const V2_V3_CONV: &[(&[u8; 3], &[u8; 4])] = &[
    (b"COM", b"COMM"), // Comment
    (b"ULT", b"USLT"), // Unsynced lyrics/text
    (b"WXX", b"WXXX"), // User-defined URL
];

/// Find the ID3v2.3 identifier of an ID3v2.2 identifier.
pub(crate) fn upgrade(id: FrameId) -> Option<FrameId> {
    let legacy = id.as_bytes();

    if let Some(ty) = StringType::from_legacy_id(legacy) {
        return Some(FrameId::from_static(ty.id()));
    }

    if let Some(ty) = UrlType::from_legacy_id(legacy) {
        return Some(FrameId::from_static(ty.id()));
    }

    V2_V3_CONV
        .iter()
        .find(|(v2, _)| &v2[..] == legacy)
        .map(|(_, v3)| FrameId::from_static(v3))
}

/// Find the ID3v2.2 identifier of an ID3v2.3 identifier.
pub(crate) fn downgrade(id: FrameId) -> Option<FrameId> {
    let modern = id.as_bytes();

    let legacy = StringType::from_id(modern)
        .and_then(|ty| ty.legacy_id())
        .or_else(|| UrlType::from_id(modern).and_then(|ty| ty.legacy_id()))
        .or_else(|| {
            V2_V3_CONV
                .iter()
                .find(|(_, v3)| &v3[..] == modern)
                .map(|(v2, _)| *v2)
        })?;

    FrameId::parse(legacy).ok()
}
