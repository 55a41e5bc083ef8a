// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Footprint box derivation and the surface co-occurrence match.

use crate::labels::{LabelFile, pairs};
use itertools::Itertools;
use std::collections::BTreeMap;

/// Fraction of the kickboard's vertical extent kept by
/// [`FootprintBox::shrink_to_bottom`] when deriving the footprint.
pub const FOOTPRINT_FRACTION: f32 = 0.3;

/// Axis-aligned pixel bounding box with inclusive edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FootprintBox {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl FootprintBox {
    /// Bounding box of a point cloud, or `None` when no points exist.
    pub fn from_points(points: &[(i32, i32)]) -> Option<FootprintBox> {
        let (x_min, x_max) = points.iter().map(|point| point.0).minmax().into_option()?;
        let (y_min, y_max) = points.iter().map(|point| point.1).minmax().into_option()?;
        Some(FootprintBox {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    /// Keeps only the bottom `fraction` of the vertical extent: the new
    /// top edge is the bottom edge minus the truncated fractional height.
    /// The horizontal extent is unchanged.
    pub fn shrink_to_bottom(&self, fraction: f32) -> FootprintBox {
        let new_height = (self.height() as f32 * fraction) as i32;
        FootprintBox {
            y_min: self.y_max - new_height,
            ..*self
        }
    }

    /// Inclusive containment test on both axes.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.x_min <= x && x <= self.x_max && self.y_min <= y && y <= self.y_max
    }
}

/// Counts, per class other than `exclude`, how many labelled points fall
/// inside the footprint box in pixel space, and returns the class with
/// the highest count.
///
/// Ties go to the smallest class id since counts are accumulated in
/// ascending id order and only a strictly greater count replaces the
/// leader.  Returns `None` when no points fall inside the box.
pub fn dominant_class(
    labels: &LabelFile,
    footprint: &FootprintBox,
    width: u32,
    height: u32,
    exclude: u32,
) -> Option<u32> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for (&class_id, coord_sets) in labels.classes() {
        if class_id == exclude {
            continue;
        }
        for set in coord_sets {
            for (x, y) in pairs(set) {
                let px = (x * width as f32) as i32;
                let py = (y * height as f32) as i32;
                if footprint.contains(px, py) {
                    *counts.entry(class_id).or_default() += 1;
                }
            }
        }
    }

    let mut best: Option<(u32, usize)> = None;
    for (class_id, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((class_id, count));
        }
    }
    best.map(|(class_id, _)| class_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelFile;
    use std::io::Cursor;

    #[test]
    fn bounding_box_from_points() {
        assert_eq!(FootprintBox::from_points(&[]), None);

        let points = [(10, 40), (30, 5), (20, 25)];
        let bbox = FootprintBox::from_points(&points).unwrap();
        assert_eq!(
            bbox,
            FootprintBox {
                x_min: 10,
                x_max: 30,
                y_min: 5,
                y_max: 40,
            }
        );
    }

    #[test]
    fn shrink_keeps_bottom_band() {
        let bbox = FootprintBox {
            x_min: 0,
            x_max: 50,
            y_min: 0,
            y_max: 100,
        };
        let footprint = bbox.shrink_to_bottom(FOOTPRINT_FRACTION);
        assert_eq!(footprint.height(), 30);
        assert_eq!(footprint.y_min, 70);
        assert_eq!(footprint.y_max, 100);
        assert_eq!(footprint.x_min, 0);
        assert_eq!(footprint.x_max, 50);
    }

    #[test]
    fn containment_is_inclusive() {
        let bbox = FootprintBox {
            x_min: 10,
            x_max: 20,
            y_min: 10,
            y_max: 20,
        };
        assert!(bbox.contains(10, 20));
        assert!(bbox.contains(20, 10));
        assert!(!bbox.contains(9, 15));
        assert!(!bbox.contains(15, 21));
    }

    #[test]
    fn highest_count_wins() {
        // In a 100x100 image the box covers x,y in [0, 50].  Class 4 has
        // three points inside, class 5 has five, class 2 is excluded.
        let input = "\
2 0.1 0.1 0.2 0.2 0.3 0.3 0.4 0.4 0.45 0.45 0.46 0.46 0.47 0.47\n\
4 0.1 0.1 0.2 0.2 0.3 0.3 0.9 0.9\n\
5 0.05 0.05 0.15 0.15 0.25 0.25 0.35 0.35 0.45 0.45\n";
        let labels = LabelFile::from_reader(Cursor::new(input)).unwrap();
        let bbox = FootprintBox {
            x_min: 0,
            x_max: 50,
            y_min: 0,
            y_max: 50,
        };
        assert_eq!(dominant_class(&labels, &bbox, 100, 100, 2), Some(5));
    }

    #[test]
    fn ties_go_to_the_smallest_class_id() {
        let input = "4 0.1 0.1 0.2 0.2\n5 0.3 0.3 0.4 0.4\n";
        let labels = LabelFile::from_reader(Cursor::new(input)).unwrap();
        let bbox = FootprintBox {
            x_min: 0,
            x_max: 50,
            y_min: 0,
            y_max: 50,
        };
        assert_eq!(dominant_class(&labels, &bbox, 100, 100, 2), Some(4));
    }

    #[test]
    fn no_points_inside_is_none() {
        let labels = LabelFile::from_reader(Cursor::new("4 0.9 0.9\n")).unwrap();
        let bbox = FootprintBox {
            x_min: 0,
            x_max: 10,
            y_min: 0,
            y_max: 10,
        };
        assert_eq!(dominant_class(&labels, &bbox, 100, 100, 2), None);
    }
}
