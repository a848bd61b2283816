//! Grid index <-> patient coordinate conversion for a single slice.
//!
//! The forward map for a (column, row) index pair is
//!
//! ```text
//! p = origin + r * row_spacing * row_dir + c * col_spacing * col_dir
//! ```
//!
//! with `origin = (position.x, position.y, slice_position)`. The inverse
//! solves the x/y part of that system through the 2x2 matrix inverse and
//! rounds to the nearest integer index, ties away from zero.

use ndarray::Array2;

use crate::error::{GeometryError, Result};
use crate::geometry::ImageGeometry;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhysicalCoordinates {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl PhysicalCoordinates {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridIndices {
    pub columns: Vec<i64>,
    pub rows: Vec<i64>,
}

/// Physical coordinates of every cell, each array shaped (columns, rows).
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateGrid {
    pub x: Array2<f64>,
    pub y: Array2<f64>,
    pub z: Array2<f64>,
}

/// Physical coordinate of a single (column, row) index.
#[inline]
pub fn index_to_point(column: f64, row: f64, geometry: &ImageGeometry) -> [f64; 3] {
    let (x0, y0) = geometry.position();
    let (row_spacing, col_spacing) = geometry.spacing();
    let row_dir = geometry.row_direction();
    let col_dir = geometry.column_direction();
    let row_step = row * row_spacing;
    let col_step = column * col_spacing;

    [
        x0 + row_step * row_dir[0] + col_step * col_dir[0],
        y0 + row_step * row_dir[1] + col_step * col_dir[1],
        geometry.slice_position() + row_step * row_dir[2] + col_step * col_dir[2],
    ]
}

/// Convert grid indices to patient coordinates.
///
/// Indices may be integers or floats; fractional indices map to points
/// between cell centres. No rounding is applied to the result.
///
/// # Errors
///
/// Returns `InvalidArgument` when the two index sequences differ in length
pub fn indices_to_coordinates<I>(
    column_indices: &[I],
    row_indices: &[I],
    geometry: &ImageGeometry,
) -> Result<PhysicalCoordinates>
where
    I: Copy + Into<f64>,
{
    if column_indices.len() != row_indices.len() {
        return Err(GeometryError::invalid_argument(
            "index sequences must have equal length",
        ));
    }

    let len = column_indices.len();
    let mut coordinates = PhysicalCoordinates {
        x: Vec::with_capacity(len),
        y: Vec::with_capacity(len),
        z: Vec::with_capacity(len),
    };

    for (&column, &row) in column_indices.iter().zip(row_indices) {
        let [x, y, z] = index_to_point(column.into(), row.into(), geometry);
        coordinates.x.push(x);
        coordinates.y.push(y);
        coordinates.z.push(z);
    }

    Ok(coordinates)
}

/// Convert patient coordinates to the nearest grid indices.
///
/// `z_coords` only takes part in length validation: the slice is fixed,
/// so the in-plane offset is resolved from x and y alone. Indices outside
/// the grid are returned as-is (possibly negative).
///
/// # Errors
///
/// * `InvalidArgument` - sequences differ in length, or a coordinate is
///   not finite
/// * `InvalidGeometry` - the in-plane direction matrix is singular
pub fn coordinates_to_indices(
    x_coords: &[f64],
    y_coords: &[f64],
    z_coords: &[f64],
    geometry: &ImageGeometry,
) -> Result<GridIndices> {
    if x_coords.len() != y_coords.len() || x_coords.len() != z_coords.len() {
        return Err(GeometryError::invalid_argument(
            "coordinate sequences must have equal length",
        ));
    }

    let determinant = geometry.in_plane_determinant();
    if !geometry.is_invertible() {
        return Err(GeometryError::InvalidGeometry { determinant });
    }

    let (x0, y0) = geometry.position();
    let (row_spacing, col_spacing) = geometry.spacing();
    let [rx, ry, _] = geometry.row_direction();
    let [cx, cy, _] = geometry.column_direction();

    // M = [[a, b], [c, d]] maps (row, column) to (dx, dy)
    let (a, b) = (rx * row_spacing, cx * col_spacing);
    let (c, d) = (ry * row_spacing, cy * col_spacing);
    let inv_det = 1.0 / determinant;

    let len = x_coords.len();
    let mut indices = GridIndices {
        columns: Vec::with_capacity(len),
        rows: Vec::with_capacity(len),
    };

    for (&x, &y) in x_coords.iter().zip(y_coords) {
        let dx = x - x0;
        let dy = y - y0;
        let row = (d * dx - b * dy) * inv_det;
        let column = (a * dy - c * dx) * inv_det;

        indices.rows.push(round_index(row)?);
        indices.columns.push(round_index(column)?);
    }

    Ok(indices)
}

/// Physical coordinates of every cell of the grid described by `geometry`.
pub fn coordinate_grid(geometry: &ImageGeometry) -> CoordinateGrid {
    let shape = (geometry.columns(), geometry.rows());
    let mut grid = CoordinateGrid {
        x: Array2::zeros(shape),
        y: Array2::zeros(shape),
        z: Array2::zeros(shape),
    };

    for ((column, row), x) in grid.x.indexed_iter_mut() {
        let [px, py, pz] = index_to_point(column as f64, row as f64, geometry);
        *x = px;
        grid.y[[column, row]] = py;
        grid.z[[column, row]] = pz;
    }

    grid
}

fn round_index(value: f64) -> Result<i64> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded.abs() >= i64::MAX as f64 {
        return Err(GeometryError::invalid_argument(format!(
            "coordinate resolves to an unrepresentable index ({value})"
        )));
    }
    Ok(rounded as i64)
}
