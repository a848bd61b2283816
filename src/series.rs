use rayon::prelude::*;
use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::image::Image;
use crate::resize::{ResizeOptions, resize};
use crate::transform::{CoordinateGrid, coordinates_to_indices, index_to_point};

/// Stack of image slices ordered by ascending slice position.
///
/// The position in the stack is the frame index, the third axis next to
/// column and row.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSeries<T> {
    images: Vec<Image<T>>,
}

impl<T> ImageSeries<T> {
    /// Build a series from slices in any order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty slice list or slices with
    /// differing extents
    pub fn new(mut images: Vec<Image<T>>) -> Result<Self> {
        let first_dim = images
            .first()
            .map(Image::dim)
            .ok_or_else(|| GeometryError::invalid_argument("series needs at least one slice"))?;

        if images.iter().any(|image| image.dim() != first_dim) {
            return Err(GeometryError::invalid_argument(
                "all slices of a series must share the same extents",
            ));
        }

        images.sort_by(|a, b| {
            a.geometry()
                .slice_position()
                .total_cmp(&b.geometry().slice_position())
        });

        Ok(Self { images })
    }

    /// Build a series keeping the given slice order.
    pub(crate) fn from_ordered(images: Vec<Image<T>>) -> Self {
        Self { images }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[Image<T>] {
        &self.images
    }

    pub fn into_images(self) -> Vec<Image<T>> {
        self.images
    }

    /// Get the dimensions of the series (frames, columns, rows)
    pub fn dim(&self) -> (usize, usize, usize) {
        let (columns, rows) = self.images.first().map(Image::dim).unwrap_or((0, 0));
        (self.images.len(), columns, rows)
    }

    pub fn slice_positions(&self) -> Vec<f64> {
        self.images
            .iter()
            .map(|image| image.geometry().slice_position())
            .collect()
    }

    /// Frame whose slice position is nearest to `z`.
    pub fn frame_at(&self, z: f64) -> Option<usize> {
        if !z.is_finite() {
            return None;
        }
        self.images
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = (a.geometry().slice_position() - z).abs();
                let db = (b.geometry().slice_position() - z).abs();
                da.total_cmp(&db)
            })
            .map(|(frame, _)| frame)
    }

    pub fn voxel_to_coordinates(&self, frame: usize, column: f64, row: f64) -> Result<[f64; 3]> {
        let image = self.image(frame)?;
        Ok(index_to_point(column, row, image.geometry()))
    }

    /// Resolve a patient coordinate to (frame, column, row).
    pub fn coordinates_to_voxel(&self, x: f64, y: f64, z: f64) -> Result<(usize, i64, i64)> {
        let frame = self.frame_at(z).ok_or_else(|| {
            GeometryError::invalid_argument(format!("no slice near z = {z}"))
        })?;
        let indices = coordinates_to_indices(&[x], &[y], &[z], self.images[frame].geometry())?;
        Ok((frame, indices.columns[0], indices.rows[0]))
    }

    fn image(&self, frame: usize) -> Result<&Image<T>> {
        self.images.get(frame).ok_or_else(|| {
            GeometryError::invalid_argument(format!(
                "frame {frame} out of range for series of {} slices",
                self.images.len()
            ))
        })
    }
}

impl<T: Sync> ImageSeries<T> {
    /// Physical coordinates of every cell, one grid per frame.
    pub fn coordinate_grids(&self) -> Vec<CoordinateGrid> {
        self.images
            .par_iter()
            .map(|image| image.coordinate_grid())
            .collect()
    }
}

impl<T: Clone + Default + Send + Sync> ImageSeries<T> {
    /// Crop or pad every slice, one rayon task per slice. Either every
    /// slice is resized or the series is left unchanged.
    pub fn resize_all(
        &mut self,
        columns: usize,
        rows: usize,
        options: ResizeOptions,
    ) -> Result<()> {
        debug!(frames = self.images.len(), columns, rows, "resizing series");

        let resized: Vec<Image<T>> = self
            .images
            .par_iter()
            .map(|image| {
                let (pixels, geometry) =
                    resize(image.pixels(), columns, rows, image.geometry(), options)?;
                Image::new(geometry, pixels)
            })
            .collect::<Result<Vec<_>>>()?;

        self.images = resized;
        Ok(())
    }
}
