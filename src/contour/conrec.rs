//! CONREC: contour segments of a rectangular grid.
//!
//! Each cell is split into 4 triangles around its center, whose height is
//! the mean of the corners. Every triangle crossing a level gives at most
//! one segment.

use crate::data::GridXYZ;

/// Corner offsets of a cell, counter-clockwise from the bottom-left
const IM: [usize; 4] = [0, 1, 1, 0];
const JM: [usize; 4] = [0, 0, 1, 1];

/// Segment kind, indexed by the signs (+1) of the three triangle vertices.
/// A triangle lying on the level gives its outer edge.
const CASES: [[[u8; 3]; 3]; 3] = [
    [[0, 0, 8], [0, 2, 5], [7, 6, 9]],
    [[0, 3, 4], [1, 3, 1], [4, 3, 0]],
    [[9, 6, 7], [5, 2, 0], [8, 0, 0]],
];

pub(super) type Pt = (f64, f64);

/// Emit `(level, p0, p1)` for every contour segment of `grid`.
///
/// `levels` must be sorted in increasing order.
pub(super) fn conrec<F>(grid: &dyn GridXYZ, levels: &[f64], mut emit: F)
where
    F: FnMut(usize, Pt, Pt),
{
    let (Some(&lowest), Some(&highest)) = (levels.first(), levels.last()) else {
        return;
    };
    let (cols, rows) = grid.dims();
    let mut h = [0.0f64; 5];
    let mut sh = [0i8; 5];
    let mut xh = [0.0f64; 5];
    let mut yh = [0.0f64; 5];

    for i in 0..cols.saturating_sub(1) {
        for j in 0..rows.saturating_sub(1) {
            let corners = [
                grid.z(i, j),
                grid.z(i, j + 1),
                grid.z(i + 1, j),
                grid.z(i + 1, j + 1),
            ];
            let dmin = corners.iter().copied().fold(f64::INFINITY, f64::min);
            let dmax = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if dmax < lowest || highest < dmin {
                continue;
            }

            for (k, &level) in levels.iter().enumerate() {
                if level < dmin || dmax < level {
                    continue;
                }
                for m in (0..5).rev() {
                    if m > 0 {
                        h[m] = grid.z(i + IM[m - 1], j + JM[m - 1]) - level;
                        xh[m] = grid.x(i + IM[m - 1]);
                        yh[m] = grid.y(j + JM[m - 1]);
                    } else {
                        h[0] = 0.25 * (h[1] + h[2] + h[3] + h[4]);
                        xh[0] = 0.5 * (grid.x(i) + grid.x(i + 1));
                        yh[0] = 0.5 * (grid.y(j) + grid.y(j + 1));
                    }
                    sh[m] = if h[m] > 0.0 {
                        1
                    } else if h[m] < 0.0 {
                        -1
                    } else {
                        0
                    };
                }

                let vertex = |m: usize| (xh[m], yh[m]);
                let sect = |p1: usize, p2: usize| {
                    (
                        (h[p2] * xh[p1] - h[p1] * xh[p2]) / (h[p2] - h[p1]),
                        (h[p2] * yh[p1] - h[p1] * yh[p2]) / (h[p2] - h[p1]),
                    )
                };

                // the center is vertex 0 of every triangle
                for m in 1..=4 {
                    let m1 = m;
                    let m2 = 0;
                    let m3 = if m != 4 { m + 1 } else { 1 };
                    let case = CASES[(sh[m1] + 1) as usize][(sh[m2] + 1) as usize]
                        [(sh[m3] + 1) as usize];
                    let (p0, p1) = match case {
                        1 => (vertex(m1), vertex(m2)),
                        2 => (vertex(m2), vertex(m3)),
                        3 => (vertex(m3), vertex(m1)),
                        4 => (vertex(m1), sect(m2, m3)),
                        5 => (vertex(m2), sect(m3, m1)),
                        6 => (vertex(m3), sect(m1, m2)),
                        7 => (sect(m1, m2), sect(m2, m3)),
                        8 => (sect(m2, m3), sect(m3, m1)),
                        9 => (sect(m3, m1), sect(m1, m2)),
                        _ => continue,
                    };
                    emit(k, p0, p1);
                }
            }
        }
    }
}
