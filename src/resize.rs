//! Coordinate-consistent cropping and padding of pixel grids.
//!
//! Each axis is planned independently: the named edge absorbs the whole
//! delta, a centered policy splits it. For an odd centered crop the extra
//! cell comes off the leading edge; for an odd centered pad the extra cell
//! goes on the trailing edge. The origin is then moved so that every
//! retained pixel keeps its physical coordinate.

use ndarray::{Array2, ArrayView2, s};
use tracing::debug;

use crate::enums::{Edge, HorizontalAlignment, VerticalAlignment};
use crate::error::{GeometryError, Result};
use crate::geometry::ImageGeometry;
use crate::transform::index_to_point;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeOptions {
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

impl ResizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_horizontal(mut self, horizontal: HorizontalAlignment) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn with_vertical(mut self, vertical: VerticalAlignment) -> Self {
        self.vertical = vertical;
        self
    }
}

/// Copy plan for one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AxisPlan {
    src_start: usize,
    dest_start: usize,
    len: usize,
    /// Cells removed from (positive) or added to (negative) the leading edge.
    leading_shift: isize,
}

impl AxisPlan {
    fn new(current: usize, target: usize, edge: Edge) -> Self {
        if target < current {
            let removed = current - target;
            let lead = match edge {
                Edge::Centered => removed.div_ceil(2),
                // the named edge absorbs the whole delta
                Edge::Leading => removed,
                Edge::Trailing => 0,
            };
            Self {
                src_start: lead,
                dest_start: 0,
                len: target,
                leading_shift: lead as isize,
            }
        } else {
            let added = target - current;
            let lead = match edge {
                Edge::Centered => added / 2,
                Edge::Leading => added,
                Edge::Trailing => 0,
            };
            Self {
                src_start: 0,
                dest_start: lead,
                len: current,
                leading_shift: -(lead as isize),
            }
        }
    }
}

/// Resize a (columns, rows) grid to new extents.
///
/// # Arguments
///
/// * `grid` - Pixel grid shaped `(geometry.columns(), geometry.rows())`
/// * `columns`, `rows` - Target extents, both positive
/// * `geometry` - Geometry of `grid`
/// * `options` - Alignment policy per axis
///
/// # Errors
///
/// Returns `InvalidArgument` for zero targets or a grid whose shape does
/// not match the geometry extents
pub fn resize<T>(
    grid: ArrayView2<'_, T>,
    columns: usize,
    rows: usize,
    geometry: &ImageGeometry,
    options: ResizeOptions,
) -> Result<(Array2<T>, ImageGeometry)>
where
    T: Clone + Default,
{
    if columns == 0 || rows == 0 {
        return Err(GeometryError::invalid_argument(format!(
            "resize target must be positive, got {columns} columns x {rows} rows"
        )));
    }

    let current = (geometry.columns(), geometry.rows());
    if grid.dim() != current {
        return Err(GeometryError::invalid_argument(format!(
            "grid shape {:?} does not match geometry extents {:?}",
            grid.dim(),
            current
        )));
    }

    let horizontal = AxisPlan::new(current.0, columns, options.horizontal.into());
    let vertical = AxisPlan::new(current.1, rows, options.vertical.into());
    debug!(
        from = ?current,
        to = ?(columns, rows),
        ?horizontal,
        ?vertical,
        "resizing pixel grid"
    );

    let mut resized = Array2::from_elem((columns, rows), T::default());
    resized
        .slice_mut(s![
            horizontal.dest_start..horizontal.dest_start + horizontal.len,
            vertical.dest_start..vertical.dest_start + vertical.len
        ])
        .assign(&grid.slice(s![
            horizontal.src_start..horizontal.src_start + horizontal.len,
            vertical.src_start..vertical.src_start + vertical.len
        ]));

    let mut resized_geometry = geometry.clone();
    let [x0, y0, z0] = index_to_point(0.0, 0.0, geometry);
    let [x1, y1, z1] = index_to_point(
        horizontal.leading_shift as f64,
        vertical.leading_shift as f64,
        geometry,
    );
    resized_geometry.translate([x1 - x0, y1 - y0, z1 - z0]);
    resized_geometry.set_extent(columns, rows);

    Ok((resized, resized_geometry))
}
