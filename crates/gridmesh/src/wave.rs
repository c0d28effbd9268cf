use std::f32::consts::TAU;

use crate::mesh::{GridMeshData, build_grid_mesh};
use crate::normals::accumulate_vertex_normals;
use crate::sampler::FlatSampler;
use crate::types::GridDimensions;

#[derive(Clone, Copy, Debug)]
pub struct WaveSettings {
    /// Number of full sine periods across the grid's width.
    pub period_scale: f32,
    /// How fast the wave travels with time.
    pub time_scale: f32,
    pub height_scale: f32,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            period_scale: 4.0,
            time_scale: 2.0,
            height_scale: 3.0,
        }
    }
}

/// Drives a sine-wave height field over a fixed grid topology.
///
/// The first `tick` generates a flat grid and caches its mesh; the index
/// buffer is fixed from then on. Every tick rewrites vertex heights from
/// the clock and recomputes normals in place. x/z coordinates and the
/// index buffer never change, and no buffer is reallocated after the
/// first tick (normals are replaced wholesale, positions mutated).
pub struct WaveField {
    dims: GridDimensions,
    settings: WaveSettings,
    mesh: Option<GridMeshData>,
}

impl WaveField {
    pub fn new(dims: GridDimensions, settings: WaveSettings) -> Self {
        Self {
            dims,
            settings,
            mesh: None,
        }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    /// The cached mesh, present after the first tick.
    pub fn mesh(&self) -> Option<&GridMeshData> {
        self.mesh.as_ref()
    }

    /// Advance the height field to elapsed time `t` (seconds).
    pub fn tick(&mut self, t: f32) -> &GridMeshData {
        let dims = self.dims;
        let settings = self.settings;
        let mesh = self
            .mesh
            .get_or_insert_with(|| build_grid_mesh(dims, &FlatSampler::default(), 1.0, None));

        for row in 0..dims.length {
            for col in 0..dims.width {
                let x_norm = col as f32 / dims.width as f32;
                let y = (x_norm * TAU * settings.period_scale + t * settings.time_scale).sin()
                    * settings.height_scale;
                mesh.positions[dims.linear_index(row, col) as usize][1] = y;
            }
        }

        mesh.normals = accumulate_vertex_normals(&mesh.positions, &mesh.indices);
        mesh
    }
}
