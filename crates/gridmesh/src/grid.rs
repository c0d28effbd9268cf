use crate::types::GridDimensions;

/// Build the triangle index buffer for a `width` x `length` vertex grid.
///
/// Each cell emits two triangles, (TL, BL, BR) then (TL, BR, TR). The
/// corner naming keeps the row-direction convention the winding depends
/// on: TL/BL sit on row z+1, TR/BR on row z. With vertices laid out
/// row-major this winds both triangles so their face normals point +Y
/// for a flat grid.
///
/// Grids below 2x2 have no cells and produce an empty buffer.
pub fn build_grid_indices(dims: GridDimensions) -> Vec<u32> {
    if dims.width < 2 || dims.length < 2 {
        return Vec::new();
    }

    let mut indices = Vec::with_capacity(dims.cell_count() * 6);
    for z in 0..dims.length - 1 {
        for x in 0..dims.width - 1 {
            let tl = dims.linear_index(z + 1, x);
            let bl = dims.linear_index(z + 1, x + 1);
            let tr = dims.linear_index(z, x);
            let br = dims.linear_index(z, x + 1);

            indices.extend_from_slice(&[tl, bl, br, tl, br, tr]);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_count_matches_cells() {
        for (w, l) in [(2, 2), (3, 3), (4, 5), (100, 100)] {
            let dims = GridDimensions::new(w, l);
            let indices = build_grid_indices(dims);
            assert_eq!(indices.len(), 6 * dims.cell_count());
        }
    }

    #[test]
    fn degenerate_grids_have_no_triangles() {
        assert!(build_grid_indices(GridDimensions::new(1, 10)).is_empty());
        assert!(build_grid_indices(GridDimensions::new(10, 1)).is_empty());
        assert!(build_grid_indices(GridDimensions::new(1, 1)).is_empty());
        assert!(build_grid_indices(GridDimensions::new(0, 0)).is_empty());
    }

    #[test]
    fn every_index_is_a_valid_vertex() {
        for (w, l) in [(2, 2), (3, 7), (9, 4)] {
            let dims = GridDimensions::new(w, l);
            let max = dims.vertex_count() as u32;
            for idx in build_grid_indices(dims) {
                assert!(idx < max);
            }
        }
    }

    #[test]
    fn first_cell_winding() {
        // 3x3 grid, cell (0,0): (TL, BL, BR) = (3, 4, 1), (TL, BR, TR) = (3, 1, 0).
        let indices = build_grid_indices(GridDimensions::new(3, 3));
        assert_eq!(&indices[..6], &[3, 4, 1, 3, 1, 0]);
    }
}
