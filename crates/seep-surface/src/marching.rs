//! Marching-squares cell classification in cell-local coordinates.
//!
//! Corners are numbered counter-clockwise from the bottom-left:
//!
//! ```text
//!   3 ── e2 ── 2
//!   │          │
//!   e3         e1
//!   │          │
//!   0 ── e0 ── 1
//! ```
//!
//! Bit `i` of the case mask is set when corner `i` is at or above the iso
//! level. Every polygon is emitted counter-clockwise with the water on its
//! interior, in unit-square coordinates `[0, 1]²`.

use smallvec::{smallvec, SmallVec};

/// A polygon of 3 to 5 cell-local points.
pub type CellPolygon = SmallVec<[[f32; 2]; 5]>;

/// At most two polygons per cell (the split saddle case).
pub type CellPolygons = SmallVec<[CellPolygon; 2]>;

const CORNERS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Denominators below this fall back to the edge midpoint.
const FLAT_EPSILON: f32 = 1e-6;

/// 4-bit inside/outside mask for corner values `v` (BL, BR, TR, TL).
#[inline]
pub fn case_index(v: [f32; 4], iso: f32) -> u8 {
    (v[0] >= iso) as u8
        | ((v[1] >= iso) as u8) << 1
        | ((v[2] >= iso) as u8) << 2
        | ((v[3] >= iso) as u8) << 3
}

/// Interpolation parameter of the iso crossing between corner values `a`
/// and `b`, clamped to `[0, 1]`; `0.5` when the corners are nearly equal.
#[inline]
pub fn edge_t(a: f32, b: f32, iso: f32) -> f32 {
    let d = b - a;
    if d.abs() < FLAT_EPSILON {
        return 0.5;
    }
    ((iso - a) / d).clamp(0.0, 1.0)
}

/// Saddle decider: `true` when the 0–2 diagonal product dominates.
///
/// Compares `(v0 - iso)(v2 - iso)` against `(v1 - iso)(v3 - iso)`. Both
/// sides are continuous in the corner values, so the chosen topology only
/// flips where the products cross.
#[inline]
pub fn connects_diagonal_02(v: [f32; 4], iso: f32) -> bool {
    let a = (v[0] - iso) * (v[2] - iso);
    let b = (v[1] - iso) * (v[3] - iso);
    a > b
}

/// The four edge crossing points e0..e3.
fn edge_points(v: [f32; 4], iso: f32) -> [[f32; 2]; 4] {
    let t0 = edge_t(v[0], v[1], iso);
    let t1 = edge_t(v[1], v[2], iso);
    let t2 = edge_t(v[2], v[3], iso);
    let t3 = edge_t(v[3], v[0], iso);
    [[t0, 0.0], [1.0, t1], [1.0 - t2, 1.0], [0.0, 1.0 - t3]]
}

/// Water polygons covering the inside region of one cell.
///
/// Case 0 yields nothing; case 15 yields the full unit square.
pub fn cell_polygons(v: [f32; 4], iso: f32) -> CellPolygons {
    let case = case_index(v, iso);
    if case == 0 {
        return SmallVec::new();
    }
    let [c0, c1, c2, c3] = CORNERS;
    if case == 15 {
        return smallvec![smallvec![c0, c1, c2, c3]];
    }
    let [e0, e1, e2, e3] = edge_points(v, iso);

    let poly: CellPolygon = match case {
        1 => smallvec![c0, e0, e3],
        2 => smallvec![c1, e1, e0],
        3 => smallvec![c0, c1, e1, e3],
        4 => smallvec![c2, e2, e1],
        5 => {
            return if connects_diagonal_02(v, iso) {
                smallvec![smallvec![e0, e1, e2, e3]]
            } else {
                smallvec![smallvec![c0, e0, e3], smallvec![c2, e2, e1]]
            };
        }
        6 => smallvec![c1, c2, e2, e0],
        7 => smallvec![c0, c1, c2, e2, e3],
        8 => smallvec![c3, e3, e2],
        9 => smallvec![c0, e0, e2, c3],
        10 => {
            return if connects_diagonal_02(v, iso) {
                smallvec![smallvec![c1, e1, e0], smallvec![c3, e3, e2]]
            } else {
                smallvec![smallvec![e0, e1, e2, e3]]
            };
        }
        11 => smallvec![c0, c1, e1, e2, c3],
        12 => smallvec![e3, e1, c2, c3],
        13 => smallvec![c0, e0, e1, c2, c3],
        14 => smallvec![e3, e0, c1, c2, c3],
        _ => return SmallVec::new(),
    };
    smallvec![poly]
}

/// Triangles produced when each polygon is fan-triangulated.
pub fn triangle_count(polys: &CellPolygons) -> usize {
    polys.iter().map(|p| p.len().saturating_sub(2)).sum()
}
