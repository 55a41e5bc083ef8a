// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! # Street Scene Annotation Analysis Library
//!
//! Post-processing for object-detection outputs on street-scene imagery,
//! built around two batch pipelines:
//!
//! - **Annotate**: colorize segmentation-style label regions with each
//!   class's representative color, stamp class ids over a grid overlay,
//!   and determine which surface a detected kickboard is standing on by
//!   counting which other class co-occurs most inside the kickboard's
//!   footprint box.
//! - **Sidewalk ratio**: compare a fixed kickboard rectangle's area
//!   against the color-thresholded sidewalk area of a rendered
//!   segmentation image and report the ratio.
//!
//! Both pipelines are sequential one-shot batch jobs over a directory of
//! label files paired with images by naming convention.  A label file
//! whose image is missing is skipped; all other failures propagate as
//! [`Error`] and terminate the batch.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use streetscene::{AnnotateConfig, Error, run_annotate};
//!
//! fn main() -> Result<(), Error> {
//!     let config = AnnotateConfig {
//!         labels_dir: "v8_5_results/labels".into(),
//!         images_dir: "v8_5_results/images".into(),
//!         output_dir: "v8_5_results/annotated".into(),
//!     };
//!     for outcome in run_annotate(&config)? {
//!         if let Some(surface) = outcome.surface {
//!             println!("The kickboard for {}: is in {}", outcome.name, surface);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod annotate;
mod color;
mod error;
mod labels;
mod matching;
mod pipeline;
mod ratio;

pub use crate::{
    annotate::{GRID_CELL, KICKBOARD_COLOR, TEXT_COLOR, draw_footprint, draw_grid, stamp_class_ids},
    color::{EMPTY_SENTINEL, class_colors, colorize, representative_color, sample_point},
    error::Error,
    labels::{
        KICKBOARD_CLASS, LabelFile, RectangleRecord, SurfaceClass, surface_label,
    },
    matching::{FOOTPRINT_FRACTION, FootprintBox, dominant_class},
    pipeline::{
        AnnotateConfig, RatioConfig, RatioOutcome, SceneOutcome, annotate_scene, run_annotate,
        run_ratio, write_report,
    },
    ratio::{
        OUTLINE_COLOR, RANGE_TOLERANCE, SIDEWALK_LOWER, SIDEWALK_UPPER, area_ratio, draw_outline,
        expanded_range, render_sidewalk_mask, sidewalk_area,
    },
};
