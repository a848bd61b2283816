use approx::assert_relative_eq;
use dicom_rt_geometry::enums::{HorizontalAlignment, VerticalAlignment};
use dicom_rt_geometry::{
    GeometryError, Image, ImageGeometry, ImageSeries, ResizeOptions, coordinates_to_indices,
    indices_to_coordinates,
};
use ndarray::Array2;

const IDENTITY: [f64; 6] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

fn axial_slice(z: f64) -> Image<f32> {
    let geometry = ImageGeometry::new((-250.0, -250.0), z, (0.98, 0.98), IDENTITY, 8, 6)
        .expect("valid geometry");
    let pixels = Array2::from_shape_fn((8, 6), |(c, r)| (c * 6 + r) as f32);
    Image::new(geometry, pixels).expect("matching shape")
}

#[test]
fn every_pixel_round_trips() {
    let image = axial_slice(-12.5);
    let (columns, rows) = image.dim();

    let mut column_indices = Vec::new();
    let mut row_indices = Vec::new();
    for c in 0..columns as u32 {
        for r in 0..rows as u32 {
            column_indices.push(c);
            row_indices.push(r);
        }
    }

    let coords = image
        .indices_to_coordinates(&column_indices, &row_indices)
        .expect("equal lengths");
    assert_eq!(coords.len(), columns * rows);
    assert!(coords.z.iter().all(|&z| z == -12.5));

    let indices = image
        .coordinates_to_indices(&coords.x, &coords.y, &coords.z)
        .expect("invertible");
    let expected_columns: Vec<i64> = column_indices.iter().map(|&c| c as i64).collect();
    let expected_rows: Vec<i64> = row_indices.iter().map(|&r| r as i64).collect();
    assert_eq!(indices.columns, expected_columns);
    assert_eq!(indices.rows, expected_rows);
}

#[test]
fn resized_series_keeps_patient_coordinates() {
    let mut series =
        ImageSeries::new(vec![axial_slice(3.0), axial_slice(0.0)]).expect("valid series");
    let before = series.clone();

    let options = ResizeOptions::new()
        .with_horizontal(HorizontalAlignment::Left)
        .with_vertical(VerticalAlignment::Bottom);
    series.resize_all(5, 9, options).expect("valid resize");

    for (old, new) in before.images().iter().zip(series.images()) {
        assert_eq!(new.dim(), (5, 9));
        // left crop drops the first three columns, bottom pad keeps rows in place
        for c in 0..5 {
            for r in 0..6 {
                assert_eq!(new.pixels()[[c, r]], old.pixels()[[c + 3, r]]);
                let a = old
                    .indices_to_coordinates(&[(c + 3) as f64], &[r as f64])
                    .expect("equal lengths");
                let b = new
                    .indices_to_coordinates(&[c as f64], &[r as f64])
                    .expect("equal lengths");
                assert_relative_eq!(a.x[0], b.x[0], epsilon = 1e-9);
                assert_relative_eq!(a.y[0], b.y[0], epsilon = 1e-9);
            }
            for r in 6..9 {
                assert_eq!(new.pixels()[[c, r]], 0.0);
            }
        }
    }
}

#[test]
fn voxel_lookup_across_frames() {
    let series = ImageSeries::new(vec![axial_slice(2.5), axial_slice(0.0), axial_slice(-2.5)])
        .expect("valid series");
    assert_eq!(series.slice_positions(), vec![-2.5, 0.0, 2.5]);

    let point = series.voxel_to_coordinates(1, 4.0, 2.0).expect("frame in range");
    let voxel = series
        .coordinates_to_voxel(point[0] + 0.3, point[1] - 0.3, point[2] + 0.4)
        .expect("invertible");
    assert_eq!(voxel, (1, 4, 2));
}

#[test]
fn errors_are_typed() {
    let geometry = axial_slice(0.0).geometry().clone();
    assert!(matches!(
        indices_to_coordinates(&[1.0, 2.0], &[1.0], &geometry),
        Err(GeometryError::InvalidArgument(_))
    ));

    let sagittal_cosines = [0.0, 1.0, 0.0, 0.0, 0.0, -1.0];
    let sagittal = ImageGeometry::new((0.0, 0.0), 0.0, (1.0, 1.0), sagittal_cosines, 2, 2)
        .expect("valid geometry");
    assert!(matches!(
        coordinates_to_indices(&[0.0], &[0.0], &[0.0], &sagittal),
        Err(GeometryError::InvalidGeometry { .. })
    ));
}
