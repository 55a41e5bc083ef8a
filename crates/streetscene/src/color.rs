// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Representative color sampling and label-region colorization.

use crate::{Error, labels::LabelFile};
use image::{Rgb, RgbImage};
use std::collections::BTreeMap;

/// Pixel value treated as "empty" by the colorizer.  Label regions are
/// rendered into images with this sentinel where no class painted.
pub const EMPTY_SENTINEL: Rgb<u8> = Rgb([0, 0, 0]);

/// Samples the pixel under a normalized (x, y) coordinate.
///
/// Coordinates are denormalized by truncation and clamped to the image
/// bounds, so x = 1.0 samples the last column rather than reading past
/// the edge.
pub fn sample_point(image: &RgbImage, x: f32, y: f32) -> Rgb<u8> {
    let px = ((x * image.width() as f32) as i64).clamp(0, image.width() as i64 - 1);
    let py = ((y * image.height() as f32) as i64).clamp(0, image.height() as i64 - 1);
    *image.get_pixel(px as u32, py as u32)
}

/// Component-wise median of the sampled colors, truncated to integer.
///
/// An even sample count averages the two middle values per channel before
/// truncating.  Returns `None` for an empty sample set.
pub fn representative_color(colors: &[Rgb<u8>]) -> Option<Rgb<u8>> {
    if colors.is_empty() {
        return None;
    }
    let mut median = [0u8; 3];
    for (channel, value) in median.iter_mut().enumerate() {
        let mut values: Vec<u8> = colors.iter().map(|color| color.0[channel]).collect();
        values.sort_unstable();
        let mid = values.len() / 2;
        *value = if values.len() % 2 == 1 {
            values[mid]
        } else {
            ((values[mid - 1] as u16 + values[mid] as u16) / 2) as u8
        };
    }
    Some(Rgb(median))
}

/// Computes the representative color of every class in the label file by
/// sampling the source image at the class's labelled points.
///
/// A class with zero points has no median and fails with
/// [`Error::EmptyClass`], aborting the batch.
pub fn class_colors(image: &RgbImage, labels: &LabelFile) -> Result<BTreeMap<u32, Rgb<u8>>, Error> {
    let mut colors = BTreeMap::new();
    for &class_id in labels.classes().keys() {
        let samples: Vec<Rgb<u8>> = labels
            .class_points(class_id)
            .map(|(x, y)| sample_point(image, x, y))
            .collect();
        let color = representative_color(&samples).ok_or(Error::EmptyClass(class_id))?;
        colors.insert(class_id, color);
    }
    Ok(colors)
}

/// Paints every sentinel pixel with each class's representative color,
/// iterating classes in ascending id order.
///
/// The sentinel mask is recomputed against the current image for every
/// class, so paint applied by an earlier class removes those pixels from
/// later classes' masks.  In practice the first class claims all empty
/// pixels unless its own color is the sentinel.  This order sensitivity
/// is inherited behavior and covered by tests.
pub fn colorize(image: &mut RgbImage, colors: &BTreeMap<u32, Rgb<u8>>) {
    for color in colors.values() {
        for pixel in image.pixels_mut() {
            if *pixel == EMPTY_SENTINEL {
                *pixel = *color;
            }
        }
    }
}
