use glam::Vec3;

/// Per-vertex normals as the sum of the face normals of every triangle
/// touching the vertex. Face normals come from the cross product of the
/// triangle's edges, so their direction follows the index winding.
///
/// Sums are left unnormalized; normalization policy belongs to whoever
/// uploads the buffers. Identical inputs produce bit-identical output.
pub fn accumulate_vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let i0 = tri[0] as usize;
        let i1 = tri[1] as usize;
        let i2 = tri[2] as usize;

        let p0 = Vec3::from(positions[i0]);
        let p1 = Vec3::from(positions[i1]);
        let p2 = Vec3::from(positions[i2]);

        let face = (p1 - p0).cross(p2 - p0);
        acc[i0] += face;
        acc[i1] += face;
        acc[i2] += face;
    }

    acc.into_iter().map(|n| n.to_array()).collect()
}

/// A triangle's centroid paired with its representative normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceNormal {
    pub centroid: [f32; 3],
    pub normal: [f32; 3],
}

/// One representative normal per triangle: the centroid of its corners
/// and the mean of their per-vertex normals. Note this is the averaged
/// form the per-face overlay draws, not a geometric cross-product
/// normal.
pub fn face_normals(
    positions: &[[f32; 3]],
    vertex_normals: &[[f32; 3]],
    indices: &[u32],
) -> Vec<FaceNormal> {
    indices
        .chunks_exact(3)
        .map(|tri| {
            let i0 = tri[0] as usize;
            let i1 = tri[1] as usize;
            let i2 = tri[2] as usize;

            let centroid = (Vec3::from(positions[i0])
                + Vec3::from(positions[i1])
                + Vec3::from(positions[i2]))
                / 3.0;
            let normal = (Vec3::from(vertex_normals[i0])
                + Vec3::from(vertex_normals[i1])
                + Vec3::from(vertex_normals[i2]))
                / 3.0;

            FaceNormal {
                centroid: centroid.to_array(),
                normal: normal.to_array(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_grid_indices;
    use crate::types::GridDimensions;

    fn flat_grid(dims: GridDimensions) -> (Vec<[f32; 3]>, Vec<u32>) {
        let mut positions = Vec::with_capacity(dims.vertex_count());
        for row in 0..dims.length {
            for col in 0..dims.width {
                positions.push([col as f32, 0.0, row as f32]);
            }
        }
        (positions, build_grid_indices(dims))
    }

    #[test]
    fn flat_grid_normals_point_up() {
        let (positions, indices) = flat_grid(GridDimensions::new(3, 3));
        let normals = accumulate_vertex_normals(&positions, &indices);

        // Every unit cell triangle contributes a (0, 1, 0) face normal,
        // so each sum's magnitude equals the number of incident triangles.
        assert_eq!(normals[0], [0.0, 1.0, 0.0]);
        assert_eq!(normals[4], [0.0, 6.0, 0.0]);
        for n in &normals {
            assert_eq!(n[0], 0.0);
            assert_eq!(n[2], 0.0);
            assert!(n[1] > 0.0);
        }
    }

    #[test]
    fn accumulation_is_deterministic() {
        let (mut positions, indices) = flat_grid(GridDimensions::new(5, 4));
        for (i, p) in positions.iter_mut().enumerate() {
            p[1] = ((i * 31) % 7) as f32 * 0.25;
        }

        let a = accumulate_vertex_normals(&positions, &indices);
        let b = accumulate_vertex_normals(&positions, &indices);
        for (na, nb) in a.iter().zip(&b) {
            for k in 0..3 {
                assert_eq!(na[k].to_bits(), nb[k].to_bits());
            }
        }
    }

    #[test]
    fn face_normals_average_corners() {
        let (positions, indices) = flat_grid(GridDimensions::new(3, 3));
        let vertex_normals = accumulate_vertex_normals(&positions, &indices);
        let faces = face_normals(&positions, &vertex_normals, &indices);

        assert_eq!(faces.len(), indices.len() / 3);

        // First triangle is (3, 4, 1): positions (0,0,1), (1,0,1), (1,0,0).
        let first = faces[0];
        assert!((first.centroid[0] - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(first.centroid[1], 0.0);
        assert!((first.centroid[2] - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(first.normal[0], 0.0);
        assert!(first.normal[1] > 0.0);
    }

    #[test]
    fn empty_indices_give_zero_normals() {
        let normals = accumulate_vertex_normals(&[[0.0, 0.0, 0.0]; 4], &[]);
        assert_eq!(normals, vec![[0.0, 0.0, 0.0]; 4]);
    }
}
