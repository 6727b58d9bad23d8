//! The configuration record consumed from the CLI collaborator.

use serde::{Deserialize, Serialize};

use crate::endpoint::EndpointSpec;
use crate::error::{Error, Result};
use crate::modifier::Modifier;

/// Requested oddness or evenness of a room count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parity {
    Odd,
    Even,
    None,
}

impl Parity {
    pub fn matches(self, count: i64) -> bool {
        match self {
            Parity::Odd => count % 2 == 1,
            Parity::Even => count % 2 == 0,
            Parity::None => true,
        }
    }
}

/// How the room geometry fills the requested canvas. This only affects the
/// per-room mm geometry handed to the renderer, never the room counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillMode {
    /// Square rooms, with the outermost rows and columns stretched to the
    /// canvas border.
    StretchEdge,
    /// Rooms stretched into rectangles that exactly fill the canvas.
    Stretch,
    SquareTopLeft,
    SquareCenter,
    FixedTopLeft,
    FixedCenter,
}

impl FillMode {
    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "se" | "stretch_edge" => Ok(FillMode::StretchEdge),
            "s" | "stretch" => Ok(FillMode::Stretch),
            "qt" | "square_top_left" => Ok(FillMode::SquareTopLeft),
            "q" | "square_center" => Ok(FillMode::SquareCenter),
            "ft" | "fixed_top_left" => Ok(FillMode::FixedTopLeft),
            "f" | "fixed_center" => Ok(FillMode::FixedCenter),
            _ => Err(Error::BadFillMode(text.to_string())),
        }
    }

    /// Whether the room side is derived from the canvas instead of taken
    /// verbatim from the configured side length.
    pub(crate) fn scales_rooms(self) -> bool {
        !matches!(self, FillMode::FixedTopLeft | FillMode::FixedCenter)
    }

    /// Whether scaled rooms stay square.
    pub(crate) fn keeps_square_rooms(self) -> bool {
        !matches!(self, FillMode::Stretch)
    }

    pub(crate) fn centers_rooms(self) -> bool {
        matches!(self, FillMode::StretchEdge | FillMode::SquareCenter | FillMode::FixedCenter)
    }

    pub(crate) fn stretches_edge(self) -> bool {
        self == FillMode::StretchEdge
    }
}

/// Everything the generator needs to produce one maze. Produced by the CLI
/// collaborator; the core only validates and consumes it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Canvas width in mm.
    pub width: f64,
    /// Canvas height in mm.
    pub height: f64,
    /// Room side length in mm, including the wall thickness.
    pub side_length: f64,
    /// Wall thickness in mm, used by the renderer.
    pub wall_thickness: f64,
    pub width_parity: Parity,
    pub height_parity: Parity,
    pub fill_mode: FillMode,
    /// Declared path endpoints; an empty list means one west and one east.
    pub endpoints: Vec<EndpointSpec>,
    pub modifiers: Vec<Modifier>,
    pub allow_islands: bool,
    pub maximum_attempts: u32,
    pub layout_only: bool,
    pub ignore_errors: bool,
    pub silent: bool,
    /// Random seed; callers that want varying output supply fresh entropy.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            side_length: 4.0,
            wall_thickness: 1.7,
            width_parity: Parity::Odd,
            height_parity: Parity::Odd,
            fill_mode: FillMode::StretchEdge,
            endpoints: Vec::new(),
            modifiers: Vec::new(),
            allow_islands: true,
            maximum_attempts: 20,
            layout_only: false,
            ignore_errors: false,
            silent: false,
            seed: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0) {
            return Err(Error::BadDimension("width"));
        }
        if !(self.height > 0.0) {
            return Err(Error::BadDimension("height"));
        }
        if !(self.side_length > 0.0) {
            return Err(Error::BadDimension("side length"));
        }
        if !(self.wall_thickness > 0.0) {
            return Err(Error::BadDimension("wall thickness"));
        }
        if self.maximum_attempts == 0 {
            return Err(Error::BadDimension("maximum attempts"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_matches_counts() {
        assert!(Parity::Odd.matches(9));
        assert!(!Parity::Odd.matches(8));
        assert!(Parity::Even.matches(6));
        assert!(Parity::None.matches(7));
    }

    #[test]
    fn fill_mode_aliases_resolve() {
        assert_eq!(FillMode::parse("se").unwrap(), FillMode::StretchEdge);
        assert_eq!(FillMode::parse("stretch").unwrap(), FillMode::Stretch);
        assert_eq!(FillMode::parse("q").unwrap(), FillMode::SquareCenter);
        assert_eq!(FillMode::parse("ft").unwrap(), FillMode::FixedTopLeft);
        assert!(FillMode::parse("tile").is_err());
    }

    #[test]
    fn validation_rejects_non_positive_dimensions() {
        let mut config = GeneratorConfig::new(40.0, 40.0);
        assert!(config.validate().is_ok());
        config.width = 0.0;
        assert_eq!(config.validate(), Err(Error::BadDimension("width")));
        config.width = 40.0;
        config.side_length = -1.0;
        assert!(config.validate().is_err());
    }
}
