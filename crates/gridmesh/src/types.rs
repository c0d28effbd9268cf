use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::sampler::NoiseSettings;
use crate::wave::WaveSettings;

// --- Grid ---

/// Logical resolution of a vertex grid: `width` columns by `length` rows.
///
/// Vertices are stored row-major, so the vertex at (row, col) lives at
/// linear index `row * width + col`. Everything in this crate leans on
/// that convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDimensions {
    pub width: u32,
    pub length: u32,
}

impl GridDimensions {
    pub fn new(width: u32, length: u32) -> Self {
        Self { width, length }
    }

    pub fn vertex_count(&self) -> usize {
        self.width as usize * self.length as usize
    }

    /// Quads in the grid. Zero when either side has fewer than 2 vertices.
    pub fn cell_count(&self) -> usize {
        self.width.saturating_sub(1) as usize * self.length.saturating_sub(1) as usize
    }

    pub fn linear_index(&self, row: u32, col: u32) -> u32 {
        row * self.width + col
    }
}

// --- Config ---

#[derive(Resource, Clone, Debug)]
pub struct GridMeshConfig {
    /// Resolution of the flat reference grid.
    pub flat_grid: GridDimensions,
    /// Asset path of the heightmap texture. When absent, a heightmap is
    /// synthesized from `noise` at `synth_heightmap` resolution instead.
    pub heightmap_path: Option<String>,
    pub heightmap_height_scale: f32,
    pub synth_heightmap: GridDimensions,
    pub noise: NoiseSettings,
    /// Resolution of the animated wave grid.
    pub wave_grid: GridDimensions,
    pub wave: WaveSettings,
    /// World-space length of the normal overlay rays.
    pub normal_scale: f32,
}

// --- Color ramp ---

#[derive(Clone, Debug, Deserialize)]
pub struct ColorBand {
    pub name: String,
    pub color_srgba: (f32, f32, f32, f32),
    /// Use this band if height < height_lt.
    pub height_lt: f32,
}

impl ColorBand {
    pub fn color(&self) -> [f32; 4] {
        let (r, g, b, a) = self.color_srgba;
        [r, g, b, a]
    }
}

/// Piecewise-constant mapping from a normalized height to a color.
/// Bands are ordered by `height_lt`; heights at or above the last
/// threshold clamp to the last band.
#[derive(Clone, Debug, Deserialize)]
pub struct HeightColorRamp {
    pub bands: Vec<ColorBand>,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RampError {
    #[error("color ramp must define at least one band")]
    Empty,
    #[error("band '{name}' has non-finite height_lt")]
    NonFinite { name: String },
    #[error(
        "band '{name}' has height_lt={value} but the previous band had height_lt={previous} (thresholds must be strictly increasing)"
    )]
    NotIncreasing {
        name: String,
        value: f32,
        previous: f32,
    },
}

impl HeightColorRamp {
    /// The five-band water/sand/grass/rock/snow ramp.
    pub fn classic() -> Self {
        let band = |name: &str, color_srgba, height_lt| ColorBand {
            name: name.to_string(),
            color_srgba,
            height_lt,
        };
        Self {
            bands: vec![
                band("water", (0.0, 0.0, 1.0, 1.0), 0.1),
                band("sand", (1.0, 0.92, 0.016, 1.0), 0.2),
                band("grass", (0.0, 1.0, 0.0, 1.0), 0.6),
                band("rock", (0.5, 0.5, 0.5, 1.0), 0.8),
                band("snow", (1.0, 1.0, 1.0, 1.0), 1.0),
            ],
        }
    }

    /// Index of the band covering `height`.
    pub fn pick(&self, height: f32) -> usize {
        // Validation guarantees there's at least 1 band.
        for (i, band) in self.bands.iter().enumerate() {
            if height < band.height_lt {
                return i;
            }
        }
        self.bands.len().saturating_sub(1)
    }

    pub fn color_for(&self, height: f32) -> [f32; 4] {
        self.bands
            .get(self.pick(height))
            .map(ColorBand::color)
            .unwrap_or([1.0, 1.0, 1.0, 1.0])
    }

    pub fn validate(&self) -> Result<(), RampError> {
        if self.bands.is_empty() {
            return Err(RampError::Empty);
        }

        let mut last = f32::NEG_INFINITY;
        for band in &self.bands {
            if !band.height_lt.is_finite() {
                return Err(RampError::NonFinite {
                    name: band.name.clone(),
                });
            }
            if band.height_lt <= last {
                return Err(RampError::NotIncreasing {
                    name: band.name.clone(),
                    value: band.height_lt,
                    previous: last,
                });
            }
            last = band.height_lt;
        }

        Ok(())
    }
}
