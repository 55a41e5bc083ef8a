// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Sidewalk area estimation by color threshold and the kickboard area
//! ratio.

use crate::labels::RectangleRecord;
use image::{Rgb, RgbImage};
use imageproc::{drawing::draw_hollow_rect_mut, rect::Rect};

/// Base per-channel lower bound of the sidewalk render color.
pub const SIDEWALK_LOWER: [u8; 3] = [0, 200, 0];

/// Base per-channel upper bound of the sidewalk render color.
pub const SIDEWALK_UPPER: [u8; 3] = [100, 255, 100];

/// Fixed fractional tolerance applied to both bounds before matching.
pub const RANGE_TOLERANCE: f32 = 0.15;

/// Outline color for the kickboard rectangle overlay.
pub const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

const OUTLINE_THICKNESS: i64 = 3;
const MASK_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// The base range expanded by the fixed tolerance and clamped to the
/// byte range, yielding the effective `(0,162,0)..(138,255,138)` bounds.
pub fn expanded_range() -> ([u8; 3], [u8; 3]) {
    let diff = (RANGE_TOLERANCE * 255.0) as i32;
    let mut lower = [0u8; 3];
    let mut upper = [0u8; 3];
    for channel in 0..3 {
        lower[channel] = (SIDEWALK_LOWER[channel] as i32 - diff).clamp(0, 255) as u8;
        upper[channel] = (SIDEWALK_UPPER[channel] as i32 + diff).clamp(0, 255) as u8;
    }
    (lower, upper)
}

fn in_range(pixel: &Rgb<u8>, lower: &[u8; 3], upper: &[u8; 3]) -> bool {
    (0..3).all(|channel| lower[channel] <= pixel.0[channel] && pixel.0[channel] <= upper[channel])
}

/// Number of pixels falling inclusively within the expanded sidewalk
/// color range.
pub fn sidewalk_area(image: &RgbImage) -> u64 {
    let (lower, upper) = expanded_range();
    image
        .pixels()
        .filter(|pixel| in_range(pixel, &lower, &upper))
        .count() as u64
}

/// Renders the sidewalk mask as a black image with matching pixels set
/// to pure green.
pub fn render_sidewalk_mask(image: &RgbImage) -> RgbImage {
    let (lower, upper) = expanded_range();
    let mut mask = RgbImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        if in_range(pixel, &lower, &upper) {
            mask.put_pixel(x, y, MASK_COLOR);
        }
    }
    mask
}

/// Draws the rectangle outline with a 3-pixel stroke extending inward
/// from the corners, clipped to the image.  Rectangles too small for the
/// full stroke draw as many rings as fit; degenerate records draw
/// nothing.
pub fn draw_outline(image: &mut RgbImage, record: &RectangleRecord) {
    for i in 0..OUTLINE_THICKNESS {
        let width = record.width() + 1 - 2 * i;
        let height = record.height() + 1 - 2 * i;
        if width <= 0 || height <= 0 {
            break;
        }
        let rect = Rect::at((record.x_min + i) as i32, (record.y_min + i) as i32)
            .of_size(width as u32, height as u32);
        draw_hollow_rect_mut(image, rect, OUTLINE_COLOR);
    }
}

/// Rectangle area over sidewalk area, or 0.0 when the mask is empty.
/// Division by zero is the only guarded case; a non-positive rectangle
/// area flows through unchanged.
pub fn area_ratio(rect_area: i64, sidewalk_area: u64) -> f64 {
    if sidewalk_area == 0 {
        0.0
    } else {
        rect_area as f64 / sidewalk_area as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expanded_range_is_clamped() {
        let (lower, upper) = expanded_range();
        assert_eq!(lower, [0, 162, 0]);
        assert_eq!(upper, [138, 255, 138]);
    }

    #[test]
    fn sidewalk_area_counts_matching_pixels() {
        let mut image = RgbImage::from_pixel(10, 10, Rgb([200, 30, 40]));
        for x in 0..10 {
            image.put_pixel(x, 0, Rgb([0, 255, 0]));
            image.put_pixel(x, 1, Rgb([138, 162, 138]));
            image.put_pixel(x, 2, Rgb([139, 255, 0]));
        }
        // Rows 0 and 1 fall inside the inclusive bounds, row 2 exceeds
        // the red upper bound by one.
        assert_eq!(sidewalk_area(&image), 20);
    }

    #[test]
    fn mask_render_matches_area() {
        let mut image = RgbImage::from_pixel(4, 4, Rgb([10, 10, 10]));
        image.put_pixel(2, 3, Rgb([50, 220, 60]));

        let mask = render_sidewalk_mask(&image);
        assert_eq!(*mask.get_pixel(2, 3), Rgb([0, 255, 0]));
        assert_eq!(*mask.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(sidewalk_area(&image), 1);
    }

    #[test]
    fn outline_strokes_inward() {
        let mut image = RgbImage::new(20, 20);
        let record = RectangleRecord {
            x_min: 0,
            y_min: 0,
            x_max: 10,
            y_max: 10,
        };
        draw_outline(&mut image, &record);

        assert_eq!(*image.get_pixel(0, 0), OUTLINE_COLOR);
        assert_eq!(*image.get_pixel(2, 2), OUTLINE_COLOR);
        assert_eq!(*image.get_pixel(3, 3), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(10, 10), OUTLINE_COLOR);
        assert_eq!(*image.get_pixel(11, 11), Rgb([0, 0, 0]));
    }

    #[test]
    fn ratio_guards_division_by_zero_only() {
        let record = RectangleRecord {
            x_min: 0,
            y_min: 0,
            x_max: 10,
            y_max: 20,
        };
        assert_eq!(record.area(), 200);
        assert_eq!(area_ratio(record.area(), 100), 2.0);
        assert_eq!(area_ratio(record.area(), 0), 0.0);
        assert_eq!(area_ratio(-200, 100), -2.0);
    }
}
