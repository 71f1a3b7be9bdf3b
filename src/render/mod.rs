//! Card rendering stages.
//!
//! Each stage draws into its own premultiplied layer and is composited onto the card canvas.

pub mod artwork;
pub mod blur;
pub mod composite;
pub(crate) mod cpu;
pub mod frame;
pub mod gradient;
pub mod pipeline;
pub mod progress;
pub mod text;
