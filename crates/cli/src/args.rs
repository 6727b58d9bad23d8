//! Command line surface and its mapping onto the generator configuration.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use mazegen_core::{EndpointSpec, FillMode, GeneratorConfig, Modifier, Parity};

use crate::color::Color;

const MAX_END_POINTS: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ParityArg {
    Odd,
    Even,
    None,
}

impl From<ParityArg> for Parity {
    fn from(parity: ParityArg) -> Self {
        match parity {
            ParityArg::Odd => Parity::Odd,
            ParityArg::Even => Parity::Even,
            ParityArg::None => Parity::None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SvgUnit {
    Mm,
    Px,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum SvgZeroPoint {
    Center,
    TopLeft,
}

/// Generates a random maze and stores it as an SVG file.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Width of the maze in mm.
    #[arg(short = 'x', long = "width", value_name = "DIMENSION")]
    pub width: f64,

    /// Height of the maze in mm.
    #[arg(short = 'y', long = "height", value_name = "DIMENSION")]
    pub height: f64,

    /// Thickness of the maze walls in mm.
    #[arg(short = 't', long = "thickness", value_name = "DIMENSION", default_value_t = 1.7)]
    pub thickness: f64,

    /// Side length of a room in mm, including the wall thickness.
    #[arg(short = 'l', long = "length", value_name = "DIMENSION", default_value_t = 4.0)]
    pub length: f64,

    /// How the rooms are distributed over the canvas.
    #[arg(short = 'i', long = "fill-mode", value_name = "MODE", default_value = "stretch_edge")]
    pub fill_mode: String,

    /// Parity of the room count along the width.
    #[arg(long = "width-parity", value_enum, default_value_t = ParityArg::Odd)]
    pub width_parity: ParityArg,

    /// Parity of the room count along the height.
    #[arg(long = "height-parity", value_enum, default_value_t = ParityArg::Odd)]
    pub height_parity: ParityArg,

    /// End point in the format '<placement>[/<offset>[/x]]'; repeatable.
    #[arg(short = 'e', long = "end-point", value_name = "SPEC")]
    pub end_points: Vec<String>,

    /// Frame modifier: one to four insets, comma separated.
    #[arg(short = 'f', long = "add-frame", value_name = "INSETS")]
    pub frame: Option<String>,

    /// Blank modifier in the format '<placement>[/<size>[/<offset>]]'; repeatable.
    #[arg(short = 'b', long = "add-blank", value_name = "SPEC")]
    pub blanks: Vec<String>,

    /// Closing modifier in the format '[^]<closing>/<placement>[/<size>[/<offset>]]'; repeatable.
    #[arg(short = 'c', long = "add-closing", value_name = "SPEC")]
    pub closings: Vec<String>,

    /// Merge modifier in the format '<placement>[/<size>[/<offset>]]'; repeatable.
    #[arg(short = 'm', long = "add-merge", value_name = "SPEC")]
    pub merges: Vec<String>,

    /// Only prepare the rooms and render the layout, without carving paths.
    #[arg(long)]
    pub layout_only: bool,

    /// Do not print progress messages.
    #[arg(long)]
    pub silent: bool,

    /// Skip failing modifiers and emit a partial maze for debugging.
    #[arg(long)]
    pub ignore_errors: bool,

    /// The path for the generated SVG file.
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = "output.svg")]
    pub output: PathBuf,

    /// Do not mark the end point rooms.
    #[arg(long)]
    pub no_marks: bool,

    /// The unit used in the generated SVG file.
    #[arg(long = "svg-unit", value_enum, default_value_t = SvgUnit::Mm)]
    pub svg_unit: SvgUnit,

    /// The DPI value used to convert mm into px.
    #[arg(long = "svg-dpi", value_name = "DPI", default_value_t = 96.0)]
    pub svg_dpi: f64,

    /// Where the zero point of the SVG coordinate system is placed.
    #[arg(long = "svg-zero-point", value_enum, default_value_t = SvgZeroPoint::Center)]
    pub svg_zero_point: SvgZeroPoint,

    /// Do not draw a background rectangle.
    #[arg(long = "svg-no-background")]
    pub svg_no_background: bool,

    /// The background color of the SVG file.
    #[arg(long = "svg-background-color", value_name = "COLOR")]
    pub svg_background_color: Option<String>,

    /// The color used for the maze walls.
    #[arg(long = "svg-room-color", value_name = "COLOR")]
    pub svg_room_color: Option<String>,

    /// End point mark color; repeatable, applied in declaration order.
    #[arg(long = "svg-endpoint-color", value_name = "COLOR")]
    pub svg_endpoint_colors: Vec<String>,

    /// Seed for reproducible output; a fresh seed is generated when omitted.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

impl Args {
    /// Map the raw arguments onto the generator configuration. Every error
    /// out of here is an input error.
    pub fn build_config(&self) -> Result<GeneratorConfig> {
        let mut config = GeneratorConfig::new(self.width, self.height);
        config.side_length = self.length;
        config.wall_thickness = self.thickness;
        config.width_parity = self.width_parity.into();
        config.height_parity = self.height_parity.into();
        config.fill_mode = FillMode::parse(&self.fill_mode)?;
        config.layout_only = self.layout_only;
        config.silent = self.silent;
        config.ignore_errors = self.ignore_errors;

        if !self.end_points.is_empty() {
            if self.end_points.len() > MAX_END_POINTS {
                bail!("you must not specify more than {MAX_END_POINTS} end points");
            }
            for (index, spec) in self.end_points.iter().enumerate() {
                let end_point = EndpointSpec::parse(spec)
                    .with_context(|| format!("in the {}. end point", index + 1))?;
                config.endpoints.push(end_point);
            }
            let connected =
                config.endpoints.iter().filter(|end_point| !end_point.dead_end).count();
            if connected < 2 {
                bail!("you must specify at least two end points that are no dead-ends");
            }
        }

        if let Some(insets) = &self.frame {
            config.modifiers.push(Modifier::frame_from_spec(insets)?);
        }
        for (index, spec) in self.blanks.iter().enumerate() {
            let modifier = Modifier::blank_from_spec(spec)
                .with_context(|| format!("in the {}. blank modifier", index + 1))?;
            config.modifiers.push(modifier);
        }
        for (index, spec) in self.closings.iter().enumerate() {
            let modifier = Modifier::closing_from_spec(spec)
                .with_context(|| format!("in the {}. closing modifier", index + 1))?;
            config.modifiers.push(modifier);
        }
        for (index, spec) in self.merges.iter().enumerate() {
            let modifier = Modifier::merge_from_spec(spec)
                .with_context(|| format!("in the {}. merge modifier", index + 1))?;
            config.modifiers.push(modifier);
        }
        Ok(config)
    }

    pub fn background_color(&self) -> Result<Option<Color>> {
        if self.svg_no_background {
            return Ok(None);
        }
        match &self.svg_background_color {
            Some(text) => Ok(Some(Color::parse(text).context("in the SVG background color")?)),
            None => Ok(Some(Color::new(230, 230, 230))),
        }
    }

    pub fn wall_color(&self) -> Result<Color> {
        match &self.svg_room_color {
            Some(text) => Color::parse(text).context("in the SVG room color"),
            None => Ok(Color::new(51, 51, 51)),
        }
    }

    pub fn endpoint_colors(&self) -> Result<Vec<Color>> {
        self.svg_endpoint_colors
            .iter()
            .enumerate()
            .map(|(index, text)| {
                Color::parse(text).with_context(|| format!("in the {}. end point color", index + 1))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(parts: &[&str]) -> Args {
        Args::try_parse_from(parts).expect("arguments should parse")
    }

    #[test]
    fn minimal_arguments_build_the_default_config() {
        let args = parse(&["mazegen", "-x", "40", "-y", "40"]);
        let config = args.build_config().unwrap();
        assert_eq!(config.width, 40.0);
        assert_eq!(config.side_length, 4.0);
        assert_eq!(config.wall_thickness, 1.7);
        assert_eq!(config.width_parity, Parity::Odd);
        assert!(config.endpoints.is_empty());
        assert!(config.modifiers.is_empty());
    }

    #[test]
    fn modifiers_and_endpoints_are_collected_in_order() {
        let args = parse(&[
            "mazegen", "-x", "50", "-y", "50", "-f", "1", "-b", "c/3", "-c", "dv/c/5", "-m",
            "se/2", "-e", "w", "-e", "e/0/x", "-e", "n",
        ]);
        let config = args.build_config().unwrap();
        assert_eq!(config.modifiers.len(), 4);
        assert_eq!(config.endpoints.len(), 3);
        assert!(config.endpoints[1].dead_end);
    }

    #[test]
    fn a_single_connected_end_point_is_rejected() {
        let args = parse(&["mazegen", "-x", "50", "-y", "50", "-e", "w", "-e", "e/0/x"]);
        assert!(args.build_config().is_err());
    }

    #[test]
    fn bad_specs_are_input_errors() {
        let args = parse(&["mazegen", "-x", "50", "-y", "50", "-b", "c/0"]);
        assert!(args.build_config().is_err());
        let args = parse(&["mazegen", "-x", "50", "-y", "50", "-i", "diagonal"]);
        assert!(args.build_config().is_err());
    }

    #[test]
    fn svg_colors_fall_back_to_defaults() {
        let args = parse(&["mazegen", "-x", "40", "-y", "40"]);
        assert_eq!(args.background_color().unwrap(), Some(Color::new(230, 230, 230)));
        assert_eq!(args.wall_color().unwrap(), Color::new(51, 51, 51));
        let args = parse(&["mazegen", "-x", "40", "-y", "40", "--svg-no-background"]);
        assert_eq!(args.background_color().unwrap(), None);
    }
}
