// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Batch entry points for the annotate and sidewalk-ratio pipelines.
//!
//! Each runner walks its label directory in sorted order, pairs every
//! label file with its image by naming convention, and processes one
//! pair at a time.  A label file whose image is missing yields a skipped
//! outcome and the batch continues; any other failure propagates and
//! terminates the run.

use crate::{
    annotate::{GRID_CELL, draw_footprint, draw_grid, stamp_class_ids},
    color::{class_colors, colorize},
    error::Error,
    labels::{KICKBOARD_CLASS, LabelFile, RectangleRecord, surface_label},
    matching::{FOOTPRINT_FRACTION, FootprintBox, dominant_class},
    ratio::{area_ratio, draw_outline, render_sidewalk_mask, sidewalk_area},
};
use chrono::{DateTime, Utc};
use image::RgbImage;
use log::{debug, warn};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Directory layout for the annotate pipeline.
#[derive(Clone, Debug)]
pub struct AnnotateConfig {
    /// Directory containing `<name>.txt` label files.
    pub labels_dir: PathBuf,
    /// Directory containing matching `<name>.jpg` images.
    pub images_dir: PathBuf,
    /// Directory receiving the annotated `<name>.jpg` images.
    pub output_dir: PathBuf,
}

/// Per-scene result of the annotate pipeline.
#[derive(Clone, Debug, Serialize)]
pub struct SceneOutcome {
    /// Base name shared by the label file and image.
    pub name: String,
    /// True when the image was missing and the scene was skipped.
    pub skipped: bool,
    /// Surface label the kickboard was matched to; `None` when skipped.
    pub surface: Option<String>,
}

/// Directory layout for the sidewalk-ratio pipeline.
#[derive(Clone, Debug)]
pub struct RatioConfig {
    /// Directory containing `<name>_coordinates.txt` rectangle files.
    pub boxes_dir: PathBuf,
    /// Directory containing matching `<name>_output.jpg` images.
    pub images_dir: PathBuf,
    /// Directory receiving the `_visualized` and `_green_area` images.
    pub output_dir: PathBuf,
}

/// Per-file result of the sidewalk-ratio pipeline.
#[derive(Clone, Debug, Serialize)]
pub struct RatioOutcome {
    /// File name of the rectangle record.
    pub file: String,
    /// True when the image was missing and the file was skipped.
    pub skipped: bool,
    /// Pixel count of the sidewalk color mask.
    pub sidewalk_area: u64,
    /// Rectangle area; may be non-positive for inverted records.
    pub kickboard_area: i64,
    /// Kickboard area over sidewalk area, 0.0 for an empty mask.
    pub ratio: f64,
}

fn sorted_label_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.path().extension().is_some_and(|ext| ext == "txt") {
            files.push(entry.path().to_path_buf());
        }
    }
    Ok(files)
}

/// Runs the annotate pipeline over every label file in the configured
/// directory and saves the annotated images.
///
/// Saving replaces the upstream interactive display so the pipeline is
/// reproducible headless; the per-scene console line is emitted by the
/// caller from the returned outcomes.
pub fn run_annotate(config: &AnnotateConfig) -> Result<Vec<SceneOutcome>, Error> {
    fs::create_dir_all(&config.output_dir)?;
    let mut outcomes = Vec::new();

    for label_path in sorted_label_files(&config.labels_dir)? {
        let name = label_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string();
        let image_path = config.images_dir.join(format!("{}.jpg", name));
        if !image_path.exists() {
            warn!("image file for {}.txt not found, skipping", name);
            outcomes.push(SceneOutcome {
                name,
                skipped: true,
                surface: None,
            });
            continue;
        }

        let (annotated, surface) = annotate_scene(&label_path, &image_path)?;
        let output_path = config.output_dir.join(format!("{}.jpg", name));
        annotated.save(&output_path)?;
        debug!(
            "annotated {} -> {} ({})",
            image_path.display(),
            output_path.display(),
            surface
        );
        outcomes.push(SceneOutcome {
            name,
            skipped: false,
            surface: Some(surface.to_string()),
        });
    }
    Ok(outcomes)
}

/// Processes one label/image pair: sample representative colors,
/// colorize the empty regions, stamp class ids, overlay the grid, and
/// derive the kickboard footprint for the surface match.
///
/// Returns the annotated image and the surface label for the console
/// line.
pub fn annotate_scene(
    label_path: &Path,
    image_path: &Path,
) -> Result<(RgbImage, &'static str), Error> {
    let labels = LabelFile::from_path(label_path)?;
    let mut image = image::open(image_path)?.to_rgb8();

    // Sampling must see the untouched image; colorization mutates it.
    let colors = class_colors(&image, &labels)?;
    colorize(&mut image, &colors);

    let kickboard_points = stamp_class_ids(&mut image, &labels);
    draw_grid(&mut image, GRID_CELL);

    let mut winner = None;
    if let Some(extent) = FootprintBox::from_points(&kickboard_points) {
        let footprint = extent.shrink_to_bottom(FOOTPRINT_FRACTION);
        draw_footprint(&mut image, &footprint);
        winner = dominant_class(
            &labels,
            &footprint,
            image.width(),
            image.height(),
            KICKBOARD_CLASS,
        );
    }

    Ok((image, surface_label(winner)))
}

/// Runs the sidewalk-ratio pipeline over every rectangle record in the
/// configured directory, saving the rectangle overlay and the mask
/// visualization for each.
pub fn run_ratio(config: &RatioConfig) -> Result<Vec<RatioOutcome>, Error> {
    fs::create_dir_all(&config.output_dir)?;
    let mut outcomes = Vec::new();

    for box_path in sorted_label_files(&config.boxes_dir)? {
        let file = box_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        let Some(name) = file.strip_suffix("_coordinates.txt").map(str::to_string) else {
            continue;
        };

        let record = RectangleRecord::from_path(&box_path)?;
        let image_path = config.images_dir.join(format!("{}_output.jpg", name));
        if !image_path.exists() {
            warn!("image file for {} not found, skipping", file);
            outcomes.push(RatioOutcome {
                file,
                skipped: true,
                sidewalk_area: 0,
                kickboard_area: 0,
                ratio: 0.0,
            });
            continue;
        }

        let mut image = image::open(&image_path)?.to_rgb8();
        let kickboard_area = record.area();
        let sidewalk_area = sidewalk_area(&image);

        draw_outline(&mut image, &record);
        image.save(config.output_dir.join(format!("{}_visualized.jpg", name)))?;

        // The mask render sees the outline already drawn, matching the
        // upstream save order.
        let mask = render_sidewalk_mask(&image);
        mask.save(config.output_dir.join(format!("{}_green_area.jpg", name)))?;

        debug!("visualized {} into {}", file, config.output_dir.display());
        outcomes.push(RatioOutcome {
            file,
            skipped: false,
            sidewalk_area,
            kickboard_area,
            ratio: area_ratio(kickboard_area, sidewalk_area),
        });
    }
    Ok(outcomes)
}

/// Writes the per-file outcomes as a timestamped JSON report.
pub fn write_report<T: Serialize>(path: &Path, results: &[T]) -> Result<(), Error> {
    #[derive(Serialize)]
    struct Report<'a, T> {
        generated: DateTime<Utc>,
        results: &'a [T],
    }

    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(
        file,
        &Report {
            generated: Utc::now(),
            results,
        },
    )?;
    Ok(())
}
