//! Output encoding for rendered cards.

/// PNG encoding of premultiplied frames.
pub mod png;
