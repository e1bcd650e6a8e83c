use image::{ImageBuffer, Luma, Rgb};
use lucida_core::io::{load_image, save_display_png};
use lucida_core::scaling::DisplayBuffer;
use lucida_core::{ChannelMode, ImageData, Viewer, ViewerError};

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_load_16bit_gray_keeps_raw_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gray16.png");
    let img = ImageBuffer::<Luma<u16>, Vec<u16>>::from_fn(4, 3, |x, y| Luma([(y * 1000 + x) as u16]));
    img.save(&path).unwrap();

    let data = load_image(&path).unwrap();
    assert_eq!(data.mode(), ChannelMode::Mono);
    assert_eq!((data.width(), data.height()), (4, 3));
    match data {
        ImageData::Mono(a) => {
            assert_eq!(a[[0, 0]], 0.0);
            assert_eq!(a[[2, 3]], 2003.0);
        }
        ImageData::Rgb(_) => panic!("expected mono"),
    }
}

#[test]
fn test_load_rgb_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rgb.png");
    let img = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(2, 2, Rgb([10, 20, 30]));
    img.save(&path).unwrap();

    let data = load_image(&path).unwrap();
    assert_eq!(data.mode(), ChannelMode::Rgb);
    let stats = data.stats().unwrap();
    assert_eq!((stats.min, stats.max), (10.0, 30.0));
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_image(&dir.path().join("nope.png")).is_err());
}

// ---------------------------------------------------------------------------
// Saving
// ---------------------------------------------------------------------------

#[test]
fn test_save_rendered_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("view.png");

    let mut viewer = Viewer::new();
    viewer.set_widget_size(64, 104);
    viewer.set_mono_image(ndarray::Array2::<u8>::from_elem((8, 16), 7).view());
    save_display_png(viewer.display_buffer(), &path).unwrap();

    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (16, 8));
}

#[test]
fn test_save_empty_buffer_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = save_display_png(&DisplayBuffer::default(), &dir.path().join("x.png")).unwrap_err();
    assert!(matches!(err, ViewerError::EmptyDisplay));
}
