use image::{Rgb, RgbImage};
use image_toolkit::{apply, ColorEffect, EnhanceParams, FilterKind, ResizeSpec, Tool, WatermarkSpec};

fn gradient(width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    for (x, y, px) in img.enumerate_pixels_mut() {
        #[allow(clippy::cast_possible_truncation)]
        let v = ((x * 7 + y * 13) % 256) as u8;
        *px = Rgb([v, 255 - v, 128]);
    }
    img
}

#[test]
fn vignette_identity_at_zero_intensity() {
    let img = gradient(60, 40);
    let out = apply(&img, &Tool::Vignette { intensity: 0.0 }).unwrap();
    assert_eq!(out, img);
}

#[test]
fn vignette_darkens_corners_but_not_center() {
    let img = RgbImage::from_pixel(50, 50, Rgb([200, 200, 200]));
    let out = apply(&img, &Tool::Vignette { intensity: 1.0 }).unwrap();

    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0]);
    assert!(out.get_pixel(25, 25)[0] >= 195);
}

#[test]
fn every_in_place_tool_preserves_dimensions() {
    let img = gradient(37, 23);
    let tools = [
        Tool::Enhance(EnhanceParams::default()),
        Tool::ColorEffect(ColorEffect::Sepia),
        Tool::Filter(FilterKind::Sharpen),
        Tool::EdgeDetect {
            low: 100.0,
            high: 200.0,
        },
        Tool::Vignette { intensity: 0.7 },
        Tool::Watermark(WatermarkSpec::default()),
    ];
    for tool in tools {
        let out = apply(&img, &tool).unwrap();
        assert_eq!(out.dimensions(), (37, 23), "{tool:?} changed dimensions");
    }
}

#[test]
fn geometry_tools_change_dimensions_predictably() {
    let img = gradient(40, 30);

    let rotated = apply(&img, &Tool::Rotate { degrees: 90.0 }).unwrap();
    assert_eq!(rotated.dimensions(), (30, 40));

    let resized = apply(
        &img,
        &Tool::Resize(ResizeSpec {
            width: Some(20),
            height: None,
        }),
    )
    .unwrap();
    assert_eq!(resized.dimensions(), (20, 15));

    let framed = apply(
        &img,
        &Tool::Frame {
            width: 5,
            color: Rgb([255, 0, 0]),
        },
    )
    .unwrap();
    assert_eq!(framed.dimensions(), (50, 40));
    assert_eq!(framed.get_pixel(0, 0).0, [255, 0, 0]);
}

#[test]
fn empty_images_are_rejected_not_crashed_on() {
    let empty = RgbImage::new(0, 0);
    let result = apply(&empty, &Tool::Vignette { intensity: 0.5 });
    assert!(result.is_err());
}

#[test]
fn tools_do_not_mutate_their_input() {
    let img = gradient(30, 30);
    let copy = img.clone();
    let _ = apply(&img, &Tool::Vignette { intensity: 1.0 }).unwrap();
    let _ = apply(&img, &Tool::ColorEffect(ColorEffect::Negative)).unwrap();
    let _ = apply(&img, &Tool::Filter(FilterKind::Blur)).unwrap();
    assert_eq!(img, copy);
}

#[test]
fn enhancement_chain_matches_tool_dispatch() {
    let img = gradient(16, 16);
    let params = EnhanceParams {
        brightness: 1.2,
        contrast: 0.9,
        saturation: 1.5,
        sharpness: 1.1,
    };
    let via_tool = apply(&img, &Tool::Enhance(params)).unwrap();
    let direct = image_toolkit::enhance::enhance(&img, &params).unwrap();
    assert_eq!(via_tool, direct);
}

#[test]
fn process_file_round_trip() {
    let dir = std::env::temp_dir().join("image-toolkit-test");
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("input.png");
    let output = dir.join("output.png");

    gradient(32, 32).save(&input).unwrap();

    let result = image_toolkit::process_file(&input, &output, &Tool::Vignette { intensity: 0.5 });
    assert!(result.success, "{}", result.message);

    let reloaded = image::open(&output).unwrap().to_rgb8();
    assert_eq!(reloaded.dimensions(), (32, 32));

    std::fs::remove_file(&input).ok();
    std::fs::remove_file(&output).ok();
}
