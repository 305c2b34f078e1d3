//! Generation parameters and presets.

use mesh_io::StlOptions;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, GenerateResult};

/// Ratio of base-plate margin to the wall's top width.
pub const MARGIN_PER_TOP_WIDTH: f64 = 1.5;

/// Which extrusion turns the image into a solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// Grayscale luminance becomes a displacement surface over a flat base.
    HeightMap,
    /// The dark silhouette's outline becomes a tapered wall on a base plate.
    #[default]
    Outline,
}

/// Parameters for decoding and downsampling the raster.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleParams {
    /// Longest side of the sample grid in cells; larger images are shrunk.
    pub max_dimension: u32,

    /// Pixels with alpha at or below this value count as background
    /// when sampling a silhouette.
    pub alpha_cutoff: u8,

    /// Flip rows after decoding so the bottom image row becomes row 0.
    ///
    /// On by default: the top of the image then lands at world +Y and the
    /// model reads like the image when viewed from +Z.
    pub flip_vertical: bool,
}

impl Default for SampleParams {
    fn default() -> Self {
        Self {
            max_dimension: 512,
            alpha_cutoff: 200,
            flip_vertical: true,
        }
    }
}

/// Everything one pipeline run needs, passed explicitly per run.
///
/// Lengths are in millimeters. The default is the cookie-cutter preset;
/// use [`GenerationConfig::height_map`] for relief plates.
///
/// # Example
///
/// ```
/// use mesh_from_image::{GenerationConfig, Strategy};
///
/// let config = GenerationConfig::cookie_cutter()
///     .with_scale(80.0)
///     .with_layers(4);
/// assert_eq!(config.strategy, Strategy::Outline);
/// assert!((config.margin() - 6.0).abs() < 1e-12);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationConfig {
    /// Extrusion strategy.
    pub strategy: Strategy,

    /// Edge length of the square footprint the image is mapped onto.
    pub scale: f64,

    /// Height-map: depth of the base below z = 0.
    /// Outline: height of the base plate above z = 0.
    pub base_thickness: f64,

    /// Outline: wall height above the base plate.
    pub wall_height: f64,

    /// Outline: wall offset width at the first layer.
    pub top_width: f64,

    /// Outline: wall offset width at the last layer.
    pub bottom_width: f64,

    /// Outline: number of layer boundaries in the taper (segments + 1).
    pub num_layers: usize,

    /// Outline: base-plate overhang. `None` derives it from `top_width`.
    pub margin: Option<f64>,

    /// Outline: samples strictly darker than this are foreground (0-255).
    pub threshold: f64,

    /// Height-map: fail on a flat image instead of emitting only the base.
    pub require_variation: bool,

    /// Raster sampling parameters.
    pub sample: SampleParams,

    /// Output formatting.
    pub stl: StlOptions,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::cookie_cutter()
    }
}

impl GenerationConfig {
    /// Tapered cookie-cutter wall on a 60mm footprint.
    #[must_use]
    pub fn cookie_cutter() -> Self {
        Self {
            strategy: Strategy::Outline,
            scale: 60.0,
            base_thickness: 0.8,
            wall_height: 15.0,
            top_width: 4.0,
            bottom_width: 0.5,
            num_layers: 8,
            margin: None,
            threshold: 128.0,
            require_variation: false,
            sample: SampleParams::default(),
            stl: StlOptions::default().with_solid_name("cookieCutter"),
        }
    }

    /// Luminance relief on a 60mm footprint with a 2mm base.
    #[must_use]
    pub fn height_map() -> Self {
        Self {
            strategy: Strategy::HeightMap,
            base_thickness: 2.0,
            stl: StlOptions::default().with_solid_name("heightMap"),
            ..Self::cookie_cutter()
        }
    }

    /// Preset for the given strategy.
    #[must_use]
    pub fn for_strategy(strategy: Strategy) -> Self {
        match strategy {
            Strategy::HeightMap => Self::height_map(),
            Strategy::Outline => Self::cookie_cutter(),
        }
    }

    /// Set footprint scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set base thickness.
    #[must_use]
    pub fn with_base_thickness(mut self, thickness: f64) -> Self {
        self.base_thickness = thickness;
        self
    }

    /// Set wall height.
    #[must_use]
    pub fn with_wall_height(mut self, height: f64) -> Self {
        self.wall_height = height;
        self
    }

    /// Set the wall widths at the first and last layer.
    #[must_use]
    pub fn with_wall_widths(mut self, top: f64, bottom: f64) -> Self {
        self.top_width = top;
        self.bottom_width = bottom;
        self
    }

    /// Set the number of taper layers.
    #[must_use]
    pub fn with_layers(mut self, count: usize) -> Self {
        self.num_layers = count;
        self
    }

    /// Override the base-plate margin.
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = Some(margin);
        self
    }

    /// Set the downscale cap.
    #[must_use]
    pub fn with_max_dimension(mut self, cells: u32) -> Self {
        self.sample.max_dimension = cells;
        self
    }

    /// Require a non-flat image for height maps.
    #[must_use]
    pub fn requiring_variation(mut self) -> Self {
        self.require_variation = true;
        self
    }

    /// Fix the number of decimals in the STL text.
    #[must_use]
    pub fn with_precision(mut self, decimals: usize) -> Self {
        self.stl.precision = Some(decimals);
        self
    }

    /// Base-plate overhang on every side.
    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin.unwrap_or(self.top_width * MARGIN_PER_TOP_WIDTH)
    }

    /// Check every parameter the selected strategy reads.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidConfig`] naming the first bad parameter.
    pub fn validate(&self) -> GenerateResult<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(invalid("scale", self.scale, "must be finite and > 0"));
        }
        non_negative("base_thickness", self.base_thickness)?;
        if self.sample.max_dimension == 0 {
            return Err(GenerateError::invalid_config(
                "sample.max_dimension must be at least 1",
            ));
        }
        if self.stl.validate().is_err() {
            return Err(GenerateError::invalid_config(
                "stl.solid_name must fit on one line",
            ));
        }

        if self.strategy == Strategy::Outline {
            non_negative("wall_height", self.wall_height)?;
            non_negative("top_width", self.top_width)?;
            non_negative("bottom_width", self.bottom_width)?;
            non_negative("margin", self.margin())?;
            if self.num_layers < 2 {
                return Err(GenerateError::invalid_config(format!(
                    "num_layers = {} (must be at least 2)",
                    self.num_layers
                )));
            }
            if !(0.0..=256.0).contains(&self.threshold) {
                return Err(invalid("threshold", self.threshold, "must be within 0..=256"));
            }
        }

        Ok(())
    }
}

fn invalid(name: &str, value: f64, rule: &str) -> GenerateError {
    GenerateError::invalid_config(format!("{name} = {value} ({rule})"))
}

fn non_negative(name: &str, value: f64) -> GenerateResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value, "must be finite and >= 0"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_params() {
        let config = GenerationConfig::default();
        assert_eq!(config.strategy, Strategy::Outline);
        assert!((config.scale - 60.0).abs() < 1e-12);
        assert!((config.wall_height - 15.0).abs() < 1e-12);
        assert!((config.top_width - 4.0).abs() < 1e-12);
        assert!((config.bottom_width - 0.5).abs() < 1e-12);
        assert!((config.base_thickness - 0.8).abs() < 1e-12);
        assert_eq!(config.num_layers, 8);
        assert_eq!(config.sample.max_dimension, 512);
        assert_eq!(config.sample.alpha_cutoff, 200);
        assert_eq!(config.stl.solid_name, "cookieCutter");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_height_map_preset() {
        let config = GenerationConfig::height_map();
        assert_eq!(config.strategy, Strategy::HeightMap);
        assert_eq!(config.stl.solid_name, "heightMap");
        assert!(!config.require_variation);
        assert!(config.validate().is_ok());
        assert_eq!(GenerationConfig::for_strategy(Strategy::HeightMap), config);
    }

    #[test]
    fn test_margin_derives_from_top_width() {
        let config = GenerationConfig::default().with_wall_widths(2.0, 0.4);
        assert!((config.margin() - 3.0).abs() < 1e-12);

        let config = config.with_margin(1.0);
        assert!((config.margin() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_builder() {
        let config = GenerationConfig::height_map()
            .with_scale(100.0)
            .with_base_thickness(3.0)
            .with_max_dimension(64)
            .with_precision(4)
            .requiring_variation();

        assert!((config.scale - 100.0).abs() < 1e-12);
        assert!((config.base_thickness - 3.0).abs() < 1e-12);
        assert_eq!(config.sample.max_dimension, 64);
        assert_eq!(config.stl.precision, Some(4));
        assert!(config.require_variation);
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            GenerationConfig::default().with_scale(0.0),
            GenerationConfig::default().with_scale(f64::NAN),
            GenerationConfig::default().with_layers(1),
            GenerationConfig::default().with_wall_widths(-1.0, 0.5),
            GenerationConfig::default().with_max_dimension(0),
            GenerationConfig::default().with_base_thickness(-0.1),
        ];
        for config in cases {
            let err = config.validate().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfig, "{config:?}");
        }
    }

    #[test]
    fn test_outline_only_params_ignored_for_height_map() {
        let config = GenerationConfig::height_map().with_layers(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_multiline_solid_name_rejected() {
        let mut config = GenerationConfig::default();
        config.stl.solid_name = "a\nb".to_string();
        assert!(config.validate().is_err());
    }
}
