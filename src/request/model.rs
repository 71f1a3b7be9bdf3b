use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assets::color::parse_color;
use crate::foundation::error::{CardError, CardResult};
use crate::render::frame::{CORNER_RADIUS, MARGIN};

/// Largest accepted card side, in pixels.
pub const MAX_DIMENSION: u32 = 8192;

/// Layout profile of the card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Large centered artwork with text along the bottom-left.
    #[default]
    Default,
    /// Artwork on the left, text block to its right.
    Compact,
}

impl Mode {
    /// Card size used when the request leaves width/height unset.
    pub fn default_dimensions(self) -> (u32, u32) {
        match self {
            Self::Default => (1920, 1080),
            Self::Compact => (1000, 480),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Linear,
    Radial,
}

/// One of the eight named edge/corner anchors of a linear gradient.
///
/// Unknown names are kept (not rejected) and anchor at the origin.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Compass {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Other(String),
}

impl Compass {
    pub fn from_name(name: &str) -> Self {
        match name {
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            "right" => Self::Right,
            "topleft" => Self::TopLeft,
            "topright" => Self::TopRight,
            "bottomleft" => Self::BottomLeft,
            "bottomright" => Self::BottomRight,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::TopLeft => "topleft",
            Self::TopRight => "topright",
            Self::BottomLeft => "bottomleft",
            Self::BottomRight => "bottomright",
            Self::Other(s) => s,
        }
    }

    /// Anchor point inside a `width` x `height` box.
    pub fn coordinates(&self, width: f64, height: f64) -> (f64, f64) {
        match self {
            Self::Top => (width / 2.0, 0.0),
            Self::Bottom => (width / 2.0, height),
            Self::Left => (0.0, height / 2.0),
            Self::Right => (width, height / 2.0),
            Self::TopLeft => (0.0, 0.0),
            Self::TopRight => (width, 0.0),
            Self::BottomLeft => (0.0, height),
            Self::BottomRight => (width, height),
            Self::Other(_) => (0.0, 0.0),
        }
    }
}

impl From<String> for Compass {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<Compass> for String {
    fn from(c: Compass) -> Self {
        c.name().to_owned()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientDirection {
    pub start: Compass,
    pub end: Compass,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientSpec {
    #[serde(rename = "type")]
    pub kind: GradientKind,
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<GradientDirection>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    pub artwork_url: String,
    pub name: String,
    pub artists: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
}

impl TrackInfo {
    /// Artists joined for display.
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSpec {
    #[serde(default)]
    pub show_bar: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Declarative description of one preview card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub gradient: GradientSpec,
    pub track: TrackInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressSpec>,
}

impl PreviewRequest {
    /// Parse a request from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CardResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CardError::configuration(format!("parse preview request JSON: {e}")))
    }

    /// Parse a request from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CardError::configuration(format!(
                "open preview request JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Effective `(width, height)`, falling back to the mode defaults.
    pub fn dimensions(&self) -> (u32, u32) {
        let (w, h) = self.mode.default_dimensions();
        (self.width.unwrap_or(w), self.height.unwrap_or(h))
    }

    /// Check every structural rule the renderer relies on.
    pub fn validate(&self) -> CardResult<()> {
        let (width, height) = self.dimensions();
        let min = 2 * (MARGIN + CORNER_RADIUS);
        for (name, v) in [("width", width), ("height", height)] {
            if v < min {
                return Err(CardError::configuration(format!(
                    "{name} must be at least {min}px, got {v}"
                )));
            }
            if v > MAX_DIMENSION {
                return Err(CardError::configuration(format!(
                    "{name} must be at most {MAX_DIMENSION}px, got {v}"
                )));
            }
        }

        if self.gradient.colors.is_empty() {
            return Err(CardError::configuration(
                "gradient.colors must contain at least one color",
            ));
        }
        for c in &self.gradient.colors {
            parse_color(c)?;
        }
        if self.gradient.kind == GradientKind::Linear && self.gradient.direction.is_none() {
            return Err(CardError::configuration(
                "gradient.direction is required for linear gradients",
            ));
        }

        if self.track.artwork_url.trim().is_empty() {
            return Err(CardError::configuration("track.artworkUrl must be non-empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/request/model.rs"]
mod tests;
