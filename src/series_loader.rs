use crate::{
    enums::SortBy, error::GeometryError, geometry::ImageGeometry, image::Image,
    series::ImageSeries,
};

use dicom::{
    core::Tag,
    object::{FileDicomObject, InMemDicomObject, open_file},
    pixeldata::{ConvertOptions, ModalityLutOption, PixelDecoder, VoiLutOption},
};
use dicom_dictionary_std::tags;
use ndarray::{Array2, s};
use rayon::prelude::*;
use std::{fs, path::Path};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("No valid DICOM images found")]
    NoValidImages,

    #[error("Inconsistent image dimensions")]
    InconsistentDimensions,

    #[error("Missing or malformed attribute: {0}")]
    MissingAttribute(&'static str),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DICOM error: {0}")]
    Dicom(#[from] dicom::object::ReadError),
}

pub struct SeriesLoader;

impl SeriesLoader {
    /// Load an image series from DICOM objects
    ///
    /// # Arguments
    ///
    /// * `dicom_objects` - Slice of DICOM file objects
    /// * `sort_by` - Method to order the slices
    ///
    /// # Errors
    ///
    /// Returns error if no valid images found or dimensions are inconsistent
    pub fn load_from_dicom_objects(
        dicom_objects: &[FileDicomObject<InMemDicomObject>],
        sort_by: SortBy,
    ) -> Result<ImageSeries<f32>, LoaderError> {
        let mut images_with_order: Vec<_> = dicom_objects
            .par_iter()
            .filter_map(|dicom_object| Self::extract_image_with_order(dicom_object, &sort_by))
            .collect();

        if images_with_order.is_empty() {
            return Err(LoaderError::NoValidImages);
        }

        let images: Vec<_> = images_with_order.iter().map(|(_, image)| image).collect();
        Self::validate_dimensions(&images)?;

        debug!(
            slices = images_with_order.len(),
            skipped = dicom_objects.len() - images_with_order.len(),
            "decoded image slices"
        );

        let series = match sort_by {
            SortBy::SlicePosition => {
                let images = images_with_order.into_iter().map(|(_, image)| image).collect();
                ImageSeries::new(images)?
            }
            SortBy::InstanceNumber => {
                images_with_order
                    .sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
                ImageSeries::from_ordered(
                    images_with_order.into_iter().map(|(_, image)| image).collect(),
                )
            }
            SortBy::None => ImageSeries::from_ordered(
                images_with_order.into_iter().map(|(_, image)| image).collect(),
            ),
        };

        Ok(series)
    }

    /// Load an image series from file paths
    pub fn load_from_file_paths(
        paths: &[impl AsRef<Path> + Sync],
        sort_by: SortBy,
    ) -> Result<ImageSeries<f32>, LoaderError> {
        let objects: Result<Vec<_>, _> = paths
            .par_iter()
            .map(|path| open_file(path.as_ref()))
            .collect();

        Self::load_from_dicom_objects(&objects?, sort_by)
    }

    /// Load an image series from a directory containing .dcm files
    pub fn load_from_directory(
        path: impl AsRef<Path>,
        sort_by: SortBy,
    ) -> Result<ImageSeries<f32>, LoaderError> {
        let paths: Vec<_> = fs::read_dir(path.as_ref())?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("dcm"))
            })
            .collect();

        if paths.is_empty() {
            return Err(LoaderError::NoValidImages);
        }

        info!(
            files = paths.len(),
            directory = %path.as_ref().display(),
            "loading DICOM series"
        );
        Self::load_from_file_paths(&paths, sort_by)
    }

    fn extract_image_with_order(
        dicom_object: &FileDicomObject<InMemDicomObject>,
        sort_by: &SortBy,
    ) -> Option<(Option<f64>, Image<f32>)> {
        let geometry = match Self::read_geometry(dicom_object) {
            Ok(geometry) => geometry,
            Err(err) => {
                warn!("skipping object without usable geometry: {err}");
                return None;
            }
        };
        let Some(pixels) = Self::decode_image(dicom_object) else {
            warn!("skipping object with undecodable pixel data");
            return None;
        };

        let order = Self::get_sort_order(dicom_object, sort_by);
        match Image::new(geometry, pixels) {
            Ok(image) => Some((order, image)),
            Err(err) => {
                warn!("skipping object: {err}");
                None
            }
        }
    }

    /// Geometry from ImagePositionPatient, PixelSpacing,
    /// ImageOrientationPatient, Rows and Columns. The z component of the
    /// position becomes the slice position.
    fn read_geometry(
        dicom_object: &FileDicomObject<InMemDicomObject>,
    ) -> Result<ImageGeometry, LoaderError> {
        let position = Self::read_floats(dicom_object, tags::IMAGE_POSITION_PATIENT, 3)
            .ok_or(LoaderError::MissingAttribute("ImagePositionPatient"))?;
        let spacing = Self::read_floats(dicom_object, tags::PIXEL_SPACING, 2)
            .ok_or(LoaderError::MissingAttribute("PixelSpacing"))?;
        let orientation = Self::read_floats(dicom_object, tags::IMAGE_ORIENTATION_PATIENT, 6)
            .ok_or(LoaderError::MissingAttribute("ImageOrientationPatient"))?;
        let rows = Self::read_extent(dicom_object, tags::ROWS)
            .ok_or(LoaderError::MissingAttribute("Rows"))?;
        let columns = Self::read_extent(dicom_object, tags::COLUMNS)
            .ok_or(LoaderError::MissingAttribute("Columns"))?;

        let geometry = ImageGeometry::new(
            (position[0], position[1]),
            position[2],
            (spacing[0], spacing[1]),
            [
                orientation[0],
                orientation[1],
                orientation[2],
                orientation[3],
                orientation[4],
                orientation[5],
            ],
            columns,
            rows,
        )?;
        Ok(geometry)
    }

    fn read_floats(
        dicom_object: &FileDicomObject<InMemDicomObject>,
        tag: Tag,
        expected: usize,
    ) -> Option<Vec<f64>> {
        let values = dicom_object.element(tag).ok()?.to_multi_float64().ok()?;
        (values.len() >= expected).then_some(values)
    }

    fn read_extent(dicom_object: &FileDicomObject<InMemDicomObject>, tag: Tag) -> Option<usize> {
        dicom_object
            .element(tag)
            .ok()?
            .to_int::<u32>()
            .ok()
            .map(|v| v as usize)
    }

    fn get_sort_order(
        dicom_object: &FileDicomObject<InMemDicomObject>,
        sort_by: &SortBy,
    ) -> Option<f64> {
        match sort_by {
            SortBy::InstanceNumber => dicom_object
                .element(tags::INSTANCE_NUMBER)
                .ok()?
                .to_int::<i32>()
                .ok()
                .map(f64::from),
            SortBy::SlicePosition | SortBy::None => None,
        }
    }

    /// First frame, first sample, rescaled through the modality LUT and
    /// transposed to (columns, rows).
    fn decode_image(dicom_object: &FileDicomObject<InMemDicomObject>) -> Option<Array2<f32>> {
        let pixel_data = dicom_object.decode_pixel_data().ok()?;
        let options = ConvertOptions::new()
            .with_modality_lut(ModalityLutOption::Default)
            .with_voi_lut(VoiLutOption::Identity);
        pixel_data
            .to_ndarray_with_options::<f32>(&options)
            .ok()
            .map(|arr| arr.slice_move(s![0, .., .., 0]).reversed_axes())
    }

    fn validate_dimensions(images: &[&Image<f32>]) -> Result<(), LoaderError> {
        let first_dim = images[0].dim();
        if images.iter().any(|img| img.dim() != first_dim) {
            return Err(LoaderError::InconsistentDimensions);
        }
        Ok(())
    }
}
