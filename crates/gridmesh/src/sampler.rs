use parrot::Perlin;
use thiserror::Error;

use crate::types::GridDimensions;

/// Supplies a height in [0, 1] for a logical grid coordinate.
///
/// Implementations may assume callers stay inside the grid they
/// advertise; out-of-range coordinates are a bug at the call site.
pub trait HeightSampler {
    fn sample(&self, col: u32, row: u32) -> f32;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SamplerError {
    #[error("height buffer has {got} samples but the grid needs {expected}")]
    SampleCount { expected: usize, got: usize },
    #[error("pixel buffer has {got} bytes but the image needs {expected}")]
    ByteCount { expected: usize, got: usize },
}

// --- Flat ---

/// Constant-height source. The default is the zero source used for flat
/// and animated grids.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatSampler {
    height: f32,
}

impl FlatSampler {
    pub fn with_height(height: f32) -> Self {
        Self { height }
    }
}

impl HeightSampler for FlatSampler {
    fn sample(&self, _col: u32, _row: u32) -> f32 {
        self.height
    }
}

// --- Height map ---

/// Rec. 601 luma of sRGB components in [0, 1] (the usual "grayscale"
/// weighting of a color image).
pub fn luminance_srgb(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Height field decoded from an image: one luminance sample per pixel,
/// with the image's width/height defining the grid dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightMapSampler {
    dims: GridDimensions,
    samples: Vec<f32>,
}

impl HeightMapSampler {
    pub fn new(dims: GridDimensions, samples: Vec<f32>) -> Result<Self, SamplerError> {
        if samples.len() != dims.vertex_count() {
            return Err(SamplerError::SampleCount {
                expected: dims.vertex_count(),
                got: samples.len(),
            });
        }
        Ok(Self { dims, samples })
    }

    /// Decode tightly packed RGBA8 pixels (row-major, top row first).
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Result<Self, SamplerError> {
        let dims = GridDimensions::new(width, height);
        let expected = dims.vertex_count() * 4;
        if data.len() != expected {
            return Err(SamplerError::ByteCount {
                expected,
                got: data.len(),
            });
        }

        let samples = data
            .chunks_exact(4)
            .map(|px| {
                luminance_srgb(
                    px[0] as f32 / 255.0,
                    px[1] as f32 / 255.0,
                    px[2] as f32 / 255.0,
                )
            })
            .collect();
        Ok(Self { dims, samples })
    }

    /// The grid resolution this sampler covers, taken from the image.
    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }
}

impl HeightSampler for HeightMapSampler {
    fn sample(&self, col: u32, row: u32) -> f32 {
        assert!(
            col < self.dims.width && row < self.dims.length,
            "sample ({col}, {row}) outside {}x{} height map",
            self.dims.width,
            self.dims.length,
        );
        self.samples[self.dims.linear_index(row, col) as usize]
    }
}

// --- Noise ---

#[derive(Clone, Copy, Debug)]
pub struct NoiseSettings {
    pub seed: u64,
    pub base_frequency: f64,
    pub octaves: u32,
    pub persistence: f64,
}

/// Seeded fractal Perlin height field, remapped to [0, 1] so it can
/// stand in for a grayscale image.
pub struct NoiseSampler {
    perlin: Perlin,
    settings: NoiseSettings,
}

impl NoiseSampler {
    pub fn new(settings: NoiseSettings) -> Self {
        Self {
            perlin: Perlin::new(settings.seed),
            settings,
        }
    }
}

impl HeightSampler for NoiseSampler {
    fn sample(&self, col: u32, row: u32) -> f32 {
        let mut amplitude = 1.0f64;
        let mut frequency = self.settings.base_frequency;
        let mut sum = 0.0f64;
        let mut norm = 0.0f64;

        for _ in 0..self.settings.octaves {
            let n = self
                .perlin
                .noise2d(col as f64 * frequency, row as f64 * frequency);
            sum += n * amplitude;
            norm += amplitude;
            amplitude *= self.settings.persistence;
            frequency *= 2.0;
        }

        let value = if norm > 0.0 { sum / norm } else { 0.0 };
        (((value as f32) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noise_settings() -> NoiseSettings {
        NoiseSettings {
            seed: 12345,
            base_frequency: 0.02,
            octaves: 4,
            persistence: 0.5,
        }
    }

    #[test]
    fn flat_sampler_is_constant() {
        assert_eq!(FlatSampler::default().sample(0, 0), 0.0);
        assert_eq!(FlatSampler::with_height(1.0).sample(7, 3), 1.0);
    }

    #[test]
    fn rgba8_luminance() {
        // 2x1: white then pure red.
        let sampler =
            HeightMapSampler::from_rgba8(2, 1, &[255, 255, 255, 255, 255, 0, 0, 255]).unwrap();
        assert_eq!(sampler.dimensions(), GridDimensions::new(2, 1));
        assert!((sampler.sample(0, 0) - 1.0).abs() < 1e-5);
        assert!((sampler.sample(1, 0) - 0.299).abs() < 1e-5);
    }

    #[test]
    fn rejects_mismatched_buffers() {
        assert_eq!(
            HeightMapSampler::from_rgba8(2, 2, &[0; 12]),
            Err(SamplerError::ByteCount {
                expected: 16,
                got: 12
            })
        );
        assert_eq!(
            HeightMapSampler::new(GridDimensions::new(3, 3), vec![0.0; 8]).unwrap_err(),
            SamplerError::SampleCount {
                expected: 9,
                got: 8
            }
        );
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_bounds_sample_panics() {
        let sampler = HeightMapSampler::from_rgba8(2, 2, &[0; 16]).unwrap();
        sampler.sample(2, 0);
    }

    #[test]
    fn noise_is_deterministic_and_bounded() {
        let a = NoiseSampler::new(noise_settings());
        let b = NoiseSampler::new(noise_settings());
        for row in 0..16 {
            for col in 0..16 {
                let h = a.sample(col, row);
                assert!((0.0..=1.0).contains(&h));
                assert_eq!(h.to_bits(), b.sample(col, row).to_bits());
            }
        }
    }
}
