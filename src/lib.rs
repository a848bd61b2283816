//! # DICOM-RT geometry library
//!
//! This crate maps radiotherapy image slices between pixel-grid indices
//! and physical patient coordinates, and resizes pixel grids without
//! disturbing that mapping.

//!
//! Every slice carries an [`ImageGeometry`]: the position of grid cell
//! (0, 0), the slice position along the plane normal, the row/column
//! spacing and the six direction cosines. The index-to-patient map is
//!
//! ```text
//! p = (x0, y0, slice) + r * row_spacing * row_dir + c * col_spacing * col_dir
//! ```
//!
//! where `row_dir` is the first direction cosine triplet and `col_dir` the
//! second. Cosines are applied exactly as stored, even when they are not
//! orthonormal. The inverse map solves the in-plane 2x2 system and rounds
//! each index to the nearest integer, ties away from zero.
//!
//! Pixel grids are `ndarray` arrays shaped (columns, rows). Resizing crops
//! or pads each axis according to an alignment policy and moves the
//! origin so that retained pixels keep their physical coordinates.
//!
//! Slices read from DICOM files are stacked into an [`ImageSeries`]
//! ordered by slice position. Batch work over a series runs in parallel
//! with rayon, one task per slice.
//!
//! # Examples
//!
//! ## Converting indices and cropping
//!
//! ```
//! # use dicom_rt_geometry::{Image, ImageGeometry, ResizeOptions};
//! # use dicom_rt_geometry::enums::HorizontalAlignment;
//! # use ndarray::Array2;
//! let geometry = ImageGeometry::new(
//!     (-5.0, -3.0),
//!     50.0,
//!     (2.0, 3.0),
//!     [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
//!     4,
//!     4,
//! )
//! .expect("valid geometry");
//!
//! let coords = dicom_rt_geometry::indices_to_coordinates(&[3.0], &[3.0], &geometry)
//!     .expect("equal lengths");
//! assert_eq!((coords.x[0], coords.y[0], coords.z[0]), (1.0, 6.0, 50.0));
//!
//! let mut image = Image::new(geometry, Array2::<i16>::zeros((4, 4))).expect("matching shape");
//! image
//!     .resize(2, 4, ResizeOptions::new().with_horizontal(HorizontalAlignment::Left))
//!     .expect("valid resize");
//! assert_eq!(image.dim(), (2, 4));
//! ```
//!
//! ## Reading a series from a directory
//!
//! ```no_run
//! # use dicom_rt_geometry::{SeriesLoader, enums::SortBy};
//! let series = SeriesLoader::load_from_directory("dicom", SortBy::SlicePosition)
//!     .expect("should have loaded files from directory");
//! let (x, y, z) = (0.0, 0.0, series.slice_positions()[0]);
//! let (frame, column, row) = series
//!     .coordinates_to_voxel(x, y, z)
//!     .expect("axial slices are invertible in-plane");
//! ```

pub mod enums;
pub mod error;
pub mod geometry;
pub mod image;
pub mod logger;
pub mod resize;
pub mod series;
pub mod series_loader;
pub mod transform;

pub use error::GeometryError;
pub use geometry::ImageGeometry;
pub use image::Image;
pub use resize::{ResizeOptions, resize};
pub use series::ImageSeries;
pub use series_loader::{LoaderError, SeriesLoader};
pub use transform::{
    CoordinateGrid, GridIndices, PhysicalCoordinates, coordinate_grid, coordinates_to_indices,
    index_to_point, indices_to_coordinates,
};
