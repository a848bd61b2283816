use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use crate::enums::{HorizontalAlignment, VerticalAlignment};
use crate::error::{GeometryError, Result};
use crate::geometry::ImageGeometry;
use crate::resize::{ResizeOptions, resize};
use crate::transform::{
    CoordinateGrid, GridIndices, PhysicalCoordinates, coordinate_grid, coordinates_to_indices,
    indices_to_coordinates,
};

/// A single image slice: geometry plus a pixel grid shaped (columns, rows).
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    geometry: ImageGeometry,
    pixels: Array2<T>,
}

impl<T> Image<T> {
    pub fn new(geometry: ImageGeometry, pixels: Array2<T>) -> Result<Self> {
        let expected = (geometry.columns(), geometry.rows());
        if pixels.dim() != expected {
            return Err(GeometryError::invalid_argument(format!(
                "pixel grid shape {:?} does not match geometry extents {:?}",
                pixels.dim(),
                expected
            )));
        }
        Ok(Self { geometry, pixels })
    }

    pub fn geometry(&self) -> &ImageGeometry {
        &self.geometry
    }

    pub fn pixels(&self) -> ArrayView2<'_, T> {
        self.pixels.view()
    }

    /// Get a mutable reference to the pixel grid. The shape is fixed; use
    /// [`Image::resize`] to change extents.
    pub fn pixels_mut(&mut self) -> ArrayViewMut2<'_, T> {
        self.pixels.view_mut()
    }

    pub fn into_parts(self) -> (ImageGeometry, Array2<T>) {
        (self.geometry, self.pixels)
    }

    /// (columns, rows)
    pub fn dim(&self) -> (usize, usize) {
        self.pixels.dim()
    }

    pub fn set_position(&mut self, position: (f64, f64)) -> Result<()> {
        self.geometry.set_position(position)
    }

    pub fn set_spacing(&mut self, spacing: (f64, f64)) -> Result<()> {
        self.geometry.set_spacing(spacing)
    }

    pub fn indices_to_coordinates<I>(
        &self,
        column_indices: &[I],
        row_indices: &[I],
    ) -> Result<PhysicalCoordinates>
    where
        I: Copy + Into<f64>,
    {
        indices_to_coordinates(column_indices, row_indices, &self.geometry)
    }

    pub fn coordinates_to_indices(
        &self,
        x_coords: &[f64],
        y_coords: &[f64],
        z_coords: &[f64],
    ) -> Result<GridIndices> {
        coordinates_to_indices(x_coords, y_coords, z_coords, &self.geometry)
    }

    pub fn coordinate_grid(&self) -> CoordinateGrid {
        coordinate_grid(&self.geometry)
    }
}

impl<T: Clone + Default> Image<T> {
    /// Crop or pad to new extents in place. On error the image is left
    /// untouched.
    pub fn resize(&mut self, columns: usize, rows: usize, options: ResizeOptions) -> Result<()> {
        let (pixels, geometry) =
            resize(self.pixels.view(), columns, rows, &self.geometry, options)?;
        self.pixels = pixels;
        self.geometry = geometry;
        Ok(())
    }

    pub fn set_columns(&mut self, columns: usize, alignment: HorizontalAlignment) -> Result<()> {
        let rows = self.geometry.rows();
        self.resize(columns, rows, ResizeOptions::new().with_horizontal(alignment))
    }

    pub fn set_rows(&mut self, rows: usize, alignment: VerticalAlignment) -> Result<()> {
        let columns = self.geometry.columns();
        self.resize(columns, rows, ResizeOptions::new().with_vertical(alignment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn image() -> Image<i16> {
        let geometry = ImageGeometry::new(
            (-5.0, -3.0),
            50.0,
            (2.0, 3.0),
            [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            4,
            4,
        )
        .expect("valid geometry");
        Image::new(geometry, Array2::from_elem((4, 4), 1)).expect("matching shape")
    }

    #[test]
    fn rejects_mismatched_pixel_grid() {
        let geometry = image().geometry().clone();
        let err = Image::new(geometry, Array2::<i16>::zeros((3, 4))).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidArgument(_)));
    }

    #[test]
    fn set_columns_keeps_other_axis() {
        let mut image = image();
        image
            .set_columns(2, HorizontalAlignment::Right)
            .expect("valid resize");
        assert_eq!(image.dim(), (2, 4));
        assert_eq!(image.geometry().rows(), 4);
        assert_eq!(image.geometry().position(), (-5.0, -3.0));
    }

    #[test]
    fn set_rows_moves_origin_for_leading_pad() {
        let mut image = image();
        image.set_rows(5, VerticalAlignment::Top).expect("valid resize");
        assert_eq!(image.dim(), (4, 5));
        assert_eq!(image.pixels()[[0, 0]], 0);
        assert_eq!(image.pixels()[[0, 1]], 1);
        assert_eq!(image.geometry().position(), (-7.0, -3.0));
    }

    #[test]
    fn failed_resize_leaves_image_unchanged() {
        let mut image = image();
        let before = image.clone();
        assert!(image.resize(0, 2, ResizeOptions::default()).is_err());
        assert_eq!(image, before);
    }

    #[test]
    fn set_position_shifts_coordinates() {
        let mut image = image();
        image.set_position((0.0, 0.0)).expect("finite position");
        let coords = image
            .indices_to_coordinates(&[1_u8], &[1_u8])
            .expect("equal lengths");
        assert_relative_eq!(coords.x[0], 2.0);
        assert_relative_eq!(coords.y[0], 3.0);

        let indices = image
            .coordinates_to_indices(&coords.x, &coords.y, &coords.z)
            .expect("invertible");
        assert_eq!(indices.columns, vec![1]);
        assert_eq!(indices.rows, vec![1]);
    }
}
