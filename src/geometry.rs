//! Geometry of a single image slice.
//!
//! An [`ImageGeometry`] holds the fields needed to map grid indices to
//! patient coordinates: the position of cell (0, 0), the slice position
//! along the plane normal, the row/column spacing and the six direction
//! cosines. Direction cosines are kept exactly as read; skewed or
//! non-unit vectors are never normalized.

use crate::error::{GeometryError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct ImageGeometry {
    position: (f64, f64),
    slice_position: f64,
    spacing: (f64, f64),
    orientation: [f64; 6],
    columns: usize,
    rows: usize,
}

impl ImageGeometry {
    /// Create a geometry record.
    ///
    /// # Arguments
    ///
    /// * `position` - Physical (x, y) of the centre of cell (0, 0)
    /// * `slice_position` - Physical coordinate along the plane normal
    /// * `spacing` - (row spacing, column spacing)
    /// * `orientation` - Row direction followed by column direction
    /// * `columns`, `rows` - Grid extents
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for non-finite values or non-positive spacing
    pub fn new(
        position: (f64, f64),
        slice_position: f64,
        spacing: (f64, f64),
        orientation: [f64; 6],
        columns: usize,
        rows: usize,
    ) -> Result<Self> {
        Self::validate_position(position)?;
        Self::validate_spacing(spacing)?;
        if !slice_position.is_finite() {
            return Err(GeometryError::invalid_argument(
                "slice position must be finite",
            ));
        }
        if orientation.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::invalid_argument(
                "orientation cosines must be finite",
            ));
        }

        Ok(Self {
            position,
            slice_position,
            spacing,
            orientation,
            columns,
            rows,
        })
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    pub fn slice_position(&self) -> f64 {
        self.slice_position
    }

    /// (row spacing, column spacing)
    pub fn spacing(&self) -> (f64, f64) {
        self.spacing
    }

    pub fn orientation(&self) -> &[f64; 6] {
        &self.orientation
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn row_direction(&self) -> [f64; 3] {
        [self.orientation[0], self.orientation[1], self.orientation[2]]
    }

    pub fn column_direction(&self) -> [f64; 3] {
        [self.orientation[3], self.orientation[4], self.orientation[5]]
    }

    pub fn set_position(&mut self, position: (f64, f64)) -> Result<()> {
        Self::validate_position(position)?;
        self.position = position;
        Ok(())
    }

    pub fn set_spacing(&mut self, spacing: (f64, f64)) -> Result<()> {
        Self::validate_spacing(spacing)?;
        self.spacing = spacing;
        Ok(())
    }

    pub(crate) fn set_extent(&mut self, columns: usize, rows: usize) {
        self.columns = columns;
        self.rows = rows;
    }

    /// Shift the origin along the plane by a physical offset. The z part
    /// moves the slice position, which only happens for oblique planes.
    pub(crate) fn translate(&mut self, offset: [f64; 3]) {
        self.position.0 += offset[0];
        self.position.1 += offset[1];
        self.slice_position += offset[2];
    }

    /// Determinant of the direction matrix projected onto the x/y plane,
    /// scaled by spacing.
    pub fn in_plane_determinant(&self) -> f64 {
        let (row_spacing, col_spacing) = self.spacing;
        let [rx, ry, _] = self.row_direction();
        let [cx, cy, _] = self.column_direction();
        (rx * row_spacing) * (cy * col_spacing) - (cx * col_spacing) * (ry * row_spacing)
    }

    pub fn is_invertible(&self) -> bool {
        let determinant = self.in_plane_determinant();
        determinant.is_finite() && determinant != 0.0
    }

    fn validate_position(position: (f64, f64)) -> Result<()> {
        if !(position.0.is_finite() && position.1.is_finite()) {
            return Err(GeometryError::invalid_argument("position must be finite"));
        }
        Ok(())
    }

    fn validate_spacing(spacing: (f64, f64)) -> Result<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !(valid(spacing.0) && valid(spacing.1)) {
            return Err(GeometryError::invalid_argument(format!(
                "spacing must be positive and finite, got ({}, {})",
                spacing.0, spacing.1
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: [f64; 6] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

    #[test]
    fn rejects_non_positive_spacing() {
        let err = ImageGeometry::new((0.0, 0.0), 0.0, (0.0, 1.0), IDENTITY, 4, 4).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidArgument(_)));

        let err = ImageGeometry::new((0.0, 0.0), 0.0, (1.0, -2.0), IDENTITY, 4, 4).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(ImageGeometry::new((f64::NAN, 0.0), 0.0, (1.0, 1.0), IDENTITY, 4, 4).is_err());
        assert!(ImageGeometry::new((0.0, 0.0), f64::INFINITY, (1.0, 1.0), IDENTITY, 4, 4).is_err());
        let mut orientation = IDENTITY;
        orientation[4] = f64::NAN;
        assert!(ImageGeometry::new((0.0, 0.0), 0.0, (1.0, 1.0), orientation, 4, 4).is_err());
    }

    #[test]
    fn determinant_of_identity_is_spacing_product() {
        let geometry =
            ImageGeometry::new((0.0, 0.0), 0.0, (2.0, 3.0), IDENTITY, 4, 4).expect("valid");
        assert_eq!(geometry.in_plane_determinant(), 6.0);
        assert!(geometry.is_invertible());
    }

    #[test]
    fn coronal_plane_is_not_invertible_in_plane() {
        let coronal = [1.0, 0.0, 0.0, 0.0, 0.0, -1.0];
        let geometry =
            ImageGeometry::new((0.0, 0.0), 0.0, (1.0, 1.0), coronal, 4, 4).expect("valid");
        assert!(!geometry.is_invertible());
    }

    #[test]
    fn setters_validate_input() {
        let mut geometry =
            ImageGeometry::new((0.0, 0.0), 0.0, (1.0, 1.0), IDENTITY, 4, 4).expect("valid");
        geometry.set_position((3.0, -4.0)).expect("finite position");
        assert_eq!(geometry.position(), (3.0, -4.0));
        assert!(geometry.set_spacing((0.0, 1.0)).is_err());
        assert_eq!(geometry.spacing(), (1.0, 1.0));
    }
}
