//! Songcard renders "now playing" preview cards.
//!
//! A [`PreviewRequest`] describes the card: size and layout mode, a background gradient, track
//! metadata with an artwork URL, and an optional progress bar. [`render_preview`] fetches the
//! artwork through an [`ArtworkSource`] and returns PNG bytes.
//!
//! Text is drawn with the font registered once per process through [`FontRegistry`]; without a
//! registered font a sans-serif system font is used, and a render with no font at all fails.
#![forbid(unsafe_code)]

mod assets;
mod encode;
mod foundation;

/// Card rendering stages.
pub mod render;
/// Request model.
pub mod request;

pub use crate::assets::artwork::{
    ArtworkSource, DefaultArtworkSource, FileArtworkSource, HttpArtworkSource,
};
pub use crate::assets::color::{DEFAULT_PROGRESS_COLOR, parse_color};
pub use crate::assets::fonts::{FontRegistry, RegisteredFont};
pub use crate::encode::png::encode_png;
pub use crate::foundation::core::{Point, Rect, RenderedFrame, Rgba8, Surface};
pub use crate::foundation::error::{CardError, CardResult};
pub use crate::render::pipeline::{render_preview, render_preview_rgba};
pub use crate::request::model::{
    Compass, GradientDirection, GradientKind, GradientSpec, Mode, PreviewRequest, ProgressSpec,
    TrackInfo,
};
