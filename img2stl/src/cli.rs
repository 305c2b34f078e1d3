//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use mesh_from_image::{GenerationConfig, Strategy};

/// Turn PNG/JPEG images into printable STL meshes
///
/// Each input is converted independently; inputs run in parallel.
#[derive(Parser, Debug)]
#[command(name = "img2stl")]
#[command(about = "Turn PNG/JPEG images into printable STL meshes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Images to convert (PNG or JPEG, at most 2 MiB each)
    #[arg(name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file (single input only; defaults to <INPUT stem>.stl)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Extrusion strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::Outline)]
    pub strategy: StrategyArg,

    /// Footprint edge length in mm
    #[arg(long)]
    pub scale: Option<f64>,

    /// Base thickness in mm
    #[arg(long)]
    pub base_thickness: Option<f64>,

    /// Outline wall height in mm
    #[arg(long)]
    pub wall_height: Option<f64>,

    /// Outline wall width at the first layer in mm
    #[arg(long)]
    pub top_width: Option<f64>,

    /// Outline wall width at the last layer in mm
    #[arg(long)]
    pub bottom_width: Option<f64>,

    /// Number of outline taper layers (at least 2)
    #[arg(long)]
    pub layers: Option<usize>,

    /// Base plate overhang in mm (defaults to 1.5x the top width)
    #[arg(long)]
    pub margin: Option<f64>,

    /// Longest side of the sample grid in pixels
    #[arg(long)]
    pub max_dimension: Option<u32>,

    /// Fixed number of decimals in ASCII output
    #[arg(long)]
    pub precision: Option<usize>,

    /// Keep image rows in file order, placing the top row at -Y
    #[arg(long)]
    pub no_flip: bool,

    /// Fail on flat images instead of emitting only the floor (height map)
    #[arg(long)]
    pub require_variation: bool,

    /// Write binary STL instead of ASCII
    #[arg(long)]
    pub binary: bool,

    /// Log debug detail (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Strategy names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Tapered cookie-cutter wall along the silhouette
    Outline,
    /// Luminance relief over a flat floor
    HeightMap,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Outline => Self::Outline,
            StrategyArg::HeightMap => Self::HeightMap,
        }
    }
}

impl Cli {
    /// The strategy preset with every flag the user gave applied on top.
    pub fn config(&self) -> GenerationConfig {
        let mut config = GenerationConfig::for_strategy(self.strategy.into());

        if let Some(scale) = self.scale {
            config = config.with_scale(scale);
        }
        if let Some(thickness) = self.base_thickness {
            config = config.with_base_thickness(thickness);
        }
        if let Some(height) = self.wall_height {
            config = config.with_wall_height(height);
        }
        let top = self.top_width.unwrap_or(config.top_width);
        let bottom = self.bottom_width.unwrap_or(config.bottom_width);
        config = config.with_wall_widths(top, bottom);
        if let Some(layers) = self.layers {
            config = config.with_layers(layers);
        }
        if let Some(margin) = self.margin {
            config = config.with_margin(margin);
        }
        if let Some(cells) = self.max_dimension {
            config = config.with_max_dimension(cells);
        }
        if let Some(decimals) = self.precision {
            config = config.with_precision(decimals);
        }
        if self.require_variation {
            config = config.requiring_variation();
        }
        if self.no_flip {
            config.sample.flip_vertical = false;
        }

        config
    }
}
