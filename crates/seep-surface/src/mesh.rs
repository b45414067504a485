//! Triangle mesh of the water body, rebuilt every frame.

use crate::config::WaterPalette;
use crate::corner::CornerField;
use crate::marching::{cell_polygons, CellPolygon};
use bytemuck::{Pod, Zeroable};

/// Upper bound on triangles a single cell can emit.
pub const MAX_TRIANGLES_PER_CELL: usize = 4;

/// One mesh vertex: world position plus RGBA colour.
///
/// `#[repr(C)]` and [`Pod`] so the vertex buffer can be uploaded as raw
/// bytes (see [`SurfaceMesh::vertex_bytes`]).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    /// World-space position.
    pub position: [f32; 2],
    /// Shaded colour.
    pub color: [f32; 4],
}

/// Vertex and index buffers for the water surface.
///
/// Buffers keep their capacity between rebuilds.
#[derive(Clone, Debug, Default)]
pub struct SurfaceMesh {
    vertices: Vec<SurfaceVertex>,
    indices: Vec<u32>,
}

/// Inputs that map cell-local points into shaded world vertices.
#[derive(Clone, Copy, Debug)]
pub struct MeshParams<'a> {
    /// Tile width in world units.
    pub tile_width: f32,
    /// Tile height in world units.
    pub tile_height: f32,
    /// Iso level used to classify corners.
    pub iso_level: f32,
    /// Vertex colouring.
    pub palette: &'a WaterPalette,
    /// Animation time in seconds.
    pub time: f32,
}

impl SurfaceMesh {
    /// An empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all geometry, keeping capacity.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Rebuild from scratch for `corners`.
    pub fn rebuild(&mut self, corners: &CornerField, params: &MeshParams<'_>) {
        self.clear();
        let (w, h) = (corners.cells_w(), corners.cells_h());
        let cells = w * h;
        // Fan polygons share their vertices: at most 6 per cell (split saddle).
        self.vertices.reserve(cells * 6);
        self.indices.reserve(cells * MAX_TRIANGLES_PER_CELL * 3);

        let world_height = h as f32 * params.tile_height;
        for y in 0..h {
            for x in 0..w {
                for poly in cell_polygons(corners.cell(x, y), params.iso_level) {
                    self.push_polygon(x, y, &poly, params, world_height);
                }
            }
        }
        tracing::trace!(
            triangles = self.triangle_count(),
            vertices = self.vertices.len(),
            "surface mesh rebuilt"
        );
    }

    /// Fan-triangulate `poly` around its first vertex.
    fn push_polygon(
        &mut self,
        cell_x: usize,
        cell_y: usize,
        poly: &CellPolygon,
        params: &MeshParams<'_>,
        world_height: f32,
    ) {
        if poly.len() < 3 {
            return;
        }
        let base = self.vertices.len() as u32;
        for &[lx, ly] in poly.iter() {
            let wx = (cell_x as f32 + lx) * params.tile_width;
            let wy = (cell_y as f32 + ly) * params.tile_height;
            self.vertices.push(SurfaceVertex {
                position: [wx, wy],
                color: params.palette.shade(wx, wy, world_height, params.time),
            });
        }
        for i in 1..poly.len() as u32 - 1 {
            self.indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }

    /// Vertex buffer.
    pub fn vertices(&self) -> &[SurfaceVertex] {
        &self.vertices
    }

    /// Index buffer, three indices per triangle.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertex buffer as raw bytes for GPU upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes for GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// `true` when no geometry was emitted.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(palette: &WaterPalette) -> MeshParams<'_> {
        MeshParams {
            tile_width: 16.0,
            tile_height: 8.0,
            iso_level: 0.06,
            palette,
            time: 0.0,
        }
    }

    #[test]
    fn full_cell_is_two_triangles_in_world_space() {
        let palette = WaterPalette::default();
        let corners = CornerField::from_values(1, 1, vec![1.0; 4]).unwrap();
        let mut mesh = SurfaceMesh::new();
        mesh.rebuild(&corners, &params(&palette));
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.vertices()[2].position, [16.0, 8.0]);
        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn rebuild_replaces_previous_geometry() {
        let palette = WaterPalette::default();
        let mut mesh = SurfaceMesh::new();
        let full = CornerField::from_values(2, 1, vec![1.0; 6]).unwrap();
        mesh.rebuild(&full, &params(&palette));
        assert_eq!(mesh.triangle_count(), 4);
        let dry = CornerField::new(2, 1);
        mesh.rebuild(&dry, &params(&palette));
        assert!(mesh.is_empty());
        assert!(mesh.vertices().is_empty());
    }

    #[test]
    fn vertex_bytes_match_layout() {
        let palette = WaterPalette::default();
        let corners = CornerField::from_values(1, 1, vec![1.0; 4]).unwrap();
        let mut mesh = SurfaceMesh::new();
        mesh.rebuild(&corners, &params(&palette));
        assert_eq!(std::mem::size_of::<SurfaceVertex>(), 24);
        assert_eq!(mesh.vertex_bytes().len(), 4 * 24);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }
}
