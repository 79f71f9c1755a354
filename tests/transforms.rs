mod common;

use cellview::geometry::{rotate, RotateOptions};
use cellview::prelude::*;
use common::synthetic_image::{ramp_rgb, stained_cell_rgb};

#[test]
fn stained_cell_chain_produces_expected_negatives() {
    let _ = env_logger::builder().is_test(true).try_init();
    let color = stained_cell_rgb(48, 40, 12.0);
    let gray = to_grayscale(&color).expect("rgb input");
    let normalized = normalize(&gray, -5.0);
    assert_eq!((normalized.w, normalized.h), (48, 40));

    // Background luma ~228 (bright), cell luma ~88 (dark).
    let thresholded = binary_thresholding(&normalized);
    assert_eq!(thresholded.get(24, 20), 255, "dark cell turns white");
    assert_eq!(thresholded.get(2, 20), 0, "bright background turns black");

    let contrast = contrast_enhancement(&normalized);
    assert_eq!(contrast.get(24, 20), 255);
    assert_eq!(contrast.get(2, 20), 0);

    let power = power_function(&normalized);
    let cell_luma = normalized.get(24, 20);
    let expected = 255 - (255.0 * (cell_luma / 255.0).powf(2.5)) as u8;
    assert_eq!(power.get(24, 20), expected);
}

#[test]
fn rotation_corners_become_white_after_normalization() {
    let gray = to_grayscale(&stained_cell_rgb(40, 40, 8.0)).unwrap();
    let normalized = normalize(&gray, 15.0);
    assert_eq!(normalized.get(0, 0), 255.0);
    assert_eq!(normalized.get(39, 0), 255.0);
    assert_eq!(normalized.get(0, 39), 255.0);
    assert_eq!(normalized.get(39, 39), 255.0);
}

#[test]
fn every_transform_maps_each_level_to_its_negative() {
    // One sample per 8-bit level plus a few fractional values.
    let mut levels: Vec<f32> = (0..=255).map(|v| v as f32).collect();
    levels.extend([0.5, 149.5, 254.9, 255.0]);
    let img = ImageF32::from_vec(levels.len() / 4, 4, levels.clone());

    let threshold = binary_thresholding(&img);
    let contrast = contrast_enhancement(&img);
    let power = power_function(&img);
    for out in [&threshold, &contrast, &power] {
        assert_eq!((out.width(), out.height()), (img.w, img.h));
    }

    for (&x, ((&t, &c), &p)) in levels.iter().zip(
        threshold
            .data()
            .iter()
            .zip(contrast.data())
            .zip(power.data()),
    ) {
        let below_cut = if x < 150.0 { 255 } else { 0 };
        assert_eq!(t, below_cut, "threshold at {x}");
        assert_eq!(c, below_cut, "contrast at {x}");
        let expected = 255 - (255.0f32 * (x / 255.0).powf(2.5)) as u8;
        assert_eq!(p, expected, "power at {x}");
    }
}

#[test]
fn power_output_decreases_as_input_brightens() {
    let img = ImageF32::from_fn(256, 1, |x, _| x as f32);
    let out = power_function(&img);
    assert!(out.data().windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(out.data()[0], 255);
    assert_eq!(out.data()[255], 0);
}

#[test]
fn rotating_back_approximately_recovers_interior() {
    let gray = to_grayscale(&ramp_rgb(64, 64)).unwrap();
    let opts = RotateOptions::default();
    for angle in [-15.0f32, -5.0, 2.0, 13.0] {
        let back = rotate(&rotate(&gray, angle, &opts), -angle, &opts);
        assert_eq!((back.w, back.h), (gray.w, gray.h));
        for y in 20..44 {
            for x in 20..44 {
                let diff = (back.get(x, y) - gray.get(x, y)).abs();
                assert!(
                    diff <= 4.0,
                    "angle {angle}: ({x}, {y}) differs by {diff}"
                );
            }
        }
    }
}
