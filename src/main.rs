use std::path::PathBuf;

use dicom_rt_geometry::{enums::SortBy, logger, series_loader::SeriesLoader};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init();

    let directory = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dicom"));

    let series = SeriesLoader::load_from_directory(&directory, SortBy::SlicePosition)?;
    let (frames, columns, rows) = series.dim();
    info!(frames, columns, rows, "loaded series");

    for (frame, image) in series.images().iter().enumerate() {
        let geometry = image.geometry();
        let centre = series.voxel_to_coordinates(
            frame,
            (columns / 2) as f64,
            (rows / 2) as f64,
        )?;
        info!(
            frame,
            slice_position = geometry.slice_position(),
            position = ?geometry.position(),
            spacing = ?geometry.spacing(),
            centre = ?centre,
            "slice geometry"
        );
    }

    Ok(())
}
