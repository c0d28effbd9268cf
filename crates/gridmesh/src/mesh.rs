use crate::grid::build_grid_indices;
use crate::normals::accumulate_vertex_normals;
use crate::sampler::HeightSampler;
use crate::types::{GridDimensions, HeightColorRamp};

/// CPU-side mesh buffers for one grid surface. Positions, normals and
/// colors line up 1:1 by linear vertex index; indices address into them
/// as a triangle list.
#[derive(Clone, Debug, Default)]
pub struct GridMeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Option<Vec<[f32; 4]>>,
    pub indices: Vec<u32>,
}

impl GridMeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Generate a grid surface: one vertex per (row, col) at
/// `(col, height * height_scale, row)`, emitted row-major to match the
/// linear-index convention the topology assumes.
///
/// When a ramp is given, each vertex also gets a color picked from the
/// raw (unscaled) sample. Degenerate dimensions still produce their
/// vertices; there are simply no triangles.
pub fn build_grid_mesh(
    dims: GridDimensions,
    sampler: &dyn HeightSampler,
    height_scale: f32,
    ramp: Option<&HeightColorRamp>,
) -> GridMeshData {
    let mut positions = Vec::with_capacity(dims.vertex_count());
    let mut colors = ramp.map(|_| Vec::with_capacity(dims.vertex_count()));

    for row in 0..dims.length {
        for col in 0..dims.width {
            let height = sampler.sample(col, row);
            positions.push([col as f32, height * height_scale, row as f32]);
            if let (Some(colors), Some(ramp)) = (colors.as_mut(), ramp) {
                colors.push(ramp.color_for(height));
            }
        }
    }

    let indices = build_grid_indices(dims);
    let normals = accumulate_vertex_normals(&positions, &indices);

    GridMeshData {
        positions,
        normals,
        colors,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{FlatSampler, HeightMapSampler};

    #[test]
    fn vertex_positions_follow_grid_coordinates() {
        let dims = GridDimensions::new(2, 2);

        let flat = build_grid_mesh(dims, &FlatSampler::default(), 10.0, None);
        assert_eq!(flat.positions[dims.linear_index(1, 1) as usize], [1.0, 0.0, 1.0]);

        let raised = build_grid_mesh(dims, &FlatSampler::with_height(1.0), 10.0, None);
        assert_eq!(
            raised.positions[dims.linear_index(1, 1) as usize],
            [1.0, 10.0, 1.0]
        );
    }

    #[test]
    fn buffers_line_up_with_the_grid() {
        let dims = GridDimensions::new(7, 4);
        let mesh = build_grid_mesh(dims, &FlatSampler::default(), 1.0, None);

        assert_eq!(mesh.vertex_count(), dims.vertex_count());
        assert_eq!(mesh.normals.len(), dims.vertex_count());
        assert_eq!(mesh.indices.len(), 6 * dims.cell_count());
        assert!(mesh.colors.is_none());
    }

    #[test]
    fn ramp_colors_attach_one_per_vertex() {
        let dims = GridDimensions::new(3, 3);
        let ramp = HeightColorRamp::classic();
        let mesh = build_grid_mesh(dims, &FlatSampler::with_height(0.15), 30.0, Some(&ramp));

        let colors = mesh.colors.as_ref().unwrap();
        assert_eq!(colors.len(), mesh.vertex_count());
        // 0.15 lands in the second band regardless of the height scale.
        for c in colors {
            assert_eq!(*c, ramp.bands[1].color());
        }
    }

    #[test]
    fn image_defines_grid_dimensions() {
        // A 4x5 image becomes a 4x5 grid: 20 vertices, 72 indices.
        let sampler = HeightMapSampler::from_rgba8(4, 5, &[128; 4 * 5 * 4]).unwrap();
        let mesh = build_grid_mesh(sampler.dimensions(), &sampler, 30.0, None);

        assert_eq!(mesh.vertex_count(), 20);
        assert_eq!(mesh.indices.len(), 72);
    }

    #[test]
    fn degenerate_grid_keeps_vertices() {
        let mesh = build_grid_mesh(GridDimensions::new(1, 5), &FlatSampler::default(), 1.0, None);
        assert_eq!(mesh.vertex_count(), 5);
        assert!(mesh.indices.is_empty());
    }
}
