// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Integration tests for the batch pipeline runners.

use image::{Rgb, RgbImage};
use std::fs;
use streetscene::{AnnotateConfig, RatioConfig, run_annotate, run_ratio};
use tempfile::TempDir;

/// A label file without a matching image is skipped and the remaining
/// batch is still processed.
#[test]
fn annotate_batch_skips_missing_images() {
    let dir = TempDir::new().unwrap();
    let labels_dir = dir.path().join("labels");
    let images_dir = dir.path().join("images");
    let output_dir = dir.path().join("annotated");
    fs::create_dir_all(&labels_dir).unwrap();
    fs::create_dir_all(&images_dir).unwrap();

    // Kickboard points span y 12..51 in the 64x64 image, so the bottom
    // 30% footprint covers y 40..51.  The single sidewalk point at
    // (35, 48) falls inside it; the bic_road point does not.
    let scene_labels = "\
2 0.5 0.1875 0.59375 0.1875 0.5 0.796875 0.59375 0.796875\n\
5 0.546875 0.75\n\
0 0.0625 0.0625\n";
    fs::write(labels_dir.join("scene.txt"), scene_labels).unwrap();
    fs::write(labels_dir.join("ghost.txt"), "2 0.5 0.5\n").unwrap();

    let image = RgbImage::from_pixel(64, 64, Rgb([120, 128, 136]));
    image.save(images_dir.join("scene.jpg")).unwrap();

    let config = AnnotateConfig {
        labels_dir,
        images_dir,
        output_dir: output_dir.clone(),
    };
    let outcomes = run_annotate(&config).unwrap();

    assert_eq!(outcomes.len(), 2);

    let ghost = &outcomes[0];
    assert_eq!(ghost.name, "ghost");
    assert!(ghost.skipped);
    assert_eq!(ghost.surface, None);
    assert!(!output_dir.join("ghost.jpg").exists());

    let scene = &outcomes[1];
    assert_eq!(scene.name, "scene");
    assert!(!scene.skipped);
    assert_eq!(scene.surface.as_deref(), Some("sidewalk"));
    assert!(output_dir.join("scene.jpg").exists());
}

/// A label file with no kickboard points still annotates, with no
/// footprint box and a "None" surface.
#[test]
fn annotate_batch_without_kickboard() {
    let dir = TempDir::new().unwrap();
    let labels_dir = dir.path().join("labels");
    let images_dir = dir.path().join("images");
    fs::create_dir_all(&labels_dir).unwrap();
    fs::create_dir_all(&images_dir).unwrap();

    fs::write(labels_dir.join("empty.txt"), "4 0.5 0.5\n").unwrap();
    let image = RgbImage::from_pixel(32, 32, Rgb([90, 90, 90]));
    image.save(images_dir.join("empty.jpg")).unwrap();

    let config = AnnotateConfig {
        labels_dir,
        images_dir,
        output_dir: dir.path().join("annotated"),
    };
    let outcomes = run_annotate(&config).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].surface.as_deref(), Some("None"));
}

#[test]
fn ratio_batch_computes_areas_and_skips_missing() {
    let dir = TempDir::new().unwrap();
    let boxes_dir = dir.path().join("box");
    let images_dir = dir.path().join("imgs");
    let output_dir = dir.path().join("visualized");
    fs::create_dir_all(&boxes_dir).unwrap();
    fs::create_dir_all(&images_dir).unwrap();

    fs::write(boxes_dir.join("zone_coordinates.txt"), "2,2,12,22").unwrap();
    let green = RgbImage::from_pixel(16, 16, Rgb([0, 255, 0]));
    green.save(images_dir.join("zone_output.jpg")).unwrap();

    fs::write(boxes_dir.join("red_coordinates.txt"), "0,0,10,10").unwrap();
    let red = RgbImage::from_pixel(16, 16, Rgb([180, 40, 60]));
    red.save(images_dir.join("red_output.jpg")).unwrap();

    fs::write(boxes_dir.join("missing_coordinates.txt"), "0,0,1,1").unwrap();

    let config = RatioConfig {
        boxes_dir,
        images_dir,
        output_dir: output_dir.clone(),
    };
    let outcomes = run_ratio(&config).unwrap();
    assert_eq!(outcomes.len(), 3);

    let missing = &outcomes[0];
    assert_eq!(missing.file, "missing_coordinates.txt");
    assert!(missing.skipped);

    // A mask with no matching pixels yields ratio 0.0 rather than a
    // division error.
    let red = &outcomes[1];
    assert_eq!(red.file, "red_coordinates.txt");
    assert!(!red.skipped);
    assert_eq!(red.sidewalk_area, 0);
    assert_eq!(red.kickboard_area, 100);
    assert_eq!(red.ratio, 0.0);

    let zone = &outcomes[2];
    assert_eq!(zone.file, "zone_coordinates.txt");
    assert_eq!(zone.sidewalk_area, 256);
    assert_eq!(zone.kickboard_area, 200);
    assert!((zone.ratio - 200.0 / 256.0).abs() < 1e-9);

    assert!(output_dir.join("zone_visualized.jpg").exists());
    assert!(output_dir.join("zone_green_area.jpg").exists());
    assert!(output_dir.join("red_visualized.jpg").exists());
    assert!(!output_dir.join("missing_visualized.jpg").exists());
}
