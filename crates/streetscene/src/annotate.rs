// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Class-id stamping, grid overlay, and footprint box rendering.

use crate::{
    labels::{KICKBOARD_CLASS, LabelFile, pairs},
    matching::FootprintBox,
};
use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::Rgb888,
    prelude::*,
    text::Text,
};
use image::{Rgb, RgbImage};
use imageproc::{
    drawing::{draw_hollow_rect_mut, draw_line_segment_mut},
    rect::Rect,
};

/// Grid cell size in pixels.
pub const GRID_CELL: u32 = 32;

/// Text color for ordinary classes.
pub const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Render color for the kickboard class and its footprint box.
pub const KICKBOARD_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

const GRID_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const FOOTPRINT_THICKNESS: i32 = 2;

/// Stamps the decimal class id at every labelled point and returns the
/// pixel coordinates of the kickboard's points.
///
/// Overlapping stamps are drawn on top of each other without
/// deduplication, matching the upstream annotation output.
pub fn stamp_class_ids(image: &mut RgbImage, labels: &LabelFile) -> Vec<(i32, i32)> {
    let width = image.width() as f32;
    let height = image.height() as f32;
    let mut kickboard = Vec::new();

    for (&class_id, coord_sets) in labels.classes() {
        let text = class_id.to_string();
        let color = if class_id == KICKBOARD_CLASS {
            KICKBOARD_COLOR
        } else {
            TEXT_COLOR
        };
        for set in coord_sets {
            for (x, y) in pairs(set) {
                let px = (x * width) as i32;
                let py = (y * height) as i32;
                draw_text(image, &text, (px, py), color);
                if class_id == KICKBOARD_CLASS {
                    kickboard.push((px, py));
                }
            }
        }
    }
    kickboard
}

/// Overlays a uniform grid of 1-pixel white lines across the image.
pub fn draw_grid(image: &mut RgbImage, cell: u32) {
    let (width, height) = image.dimensions();
    for y in (0..height).step_by(cell as usize) {
        draw_line_segment_mut(image, (0.0, y as f32), (width as f32, y as f32), GRID_COLOR);
    }
    for x in (0..width).step_by(cell as usize) {
        draw_line_segment_mut(image, (x as f32, 0.0), (x as f32, height as f32), GRID_COLOR);
    }
}

/// Draws the footprint box with a 2-pixel stroke growing outward from
/// the inclusive box edges.
pub fn draw_footprint(image: &mut RgbImage, footprint: &FootprintBox) {
    for i in 0..FOOTPRINT_THICKNESS {
        let rect = Rect::at(footprint.x_min - i, footprint.y_min - i).of_size(
            (footprint.x_max - footprint.x_min + 1 + 2 * i) as u32,
            (footprint.y_max - footprint.y_min + 1 + 2 * i) as u32,
        );
        draw_hollow_rect_mut(image, rect, KICKBOARD_COLOR);
    }
}

fn draw_text(image: &mut RgbImage, text: &str, position: (i32, i32), color: Rgb<u8>) {
    let style = MonoTextStyle::new(&FONT_6X10, Rgb888::new(color.0[0], color.0[1], color.0[2]));
    let mut target = RgbDrawTarget { image };
    let _ = Text::new(text, Point::new(position.0, position.1), style).draw(&mut target);
}

/// Adapter exposing an [`RgbImage`] as an embedded-graphics draw target
/// so the monospace bitmap font can render without a font file.
struct RgbDrawTarget<'a> {
    image: &'a mut RgbImage,
}

impl OriginDimensions for RgbDrawTarget<'_> {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

impl DrawTarget for RgbDrawTarget<'_> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let width = self.image.width() as i32;
        let height = self.image.height() as i32;
        for Pixel(coord, color) in pixels {
            if coord.x < 0 || coord.y < 0 || coord.x >= width || coord.y >= height {
                continue;
            }
            let pixel = self.image.get_pixel_mut(coord.x as u32, coord.y as u32);
            *pixel = Rgb([color.r(), color.g(), color.b()]);
        }
        Ok(())
    }
}
