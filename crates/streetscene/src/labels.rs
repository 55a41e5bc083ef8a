// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Label file parsing and the fixed street-scene class table.

use crate::Error;
use std::{
    collections::BTreeMap,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

/// Class id of the kickboard, the distinguished class whose point cloud
/// anchors the footprint box and the surface match.
pub const KICKBOARD_CLASS: u32 = 2;

/// The fixed street-scene classes produced by the segmentation model.
///
/// The numeric ids match the model's training order and are stable across
/// label files.  Ids outside the table are reported as `Unknown`.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum SurfaceClass {
    /// Bicycle road surface.
    BicRoad,
    /// Curb between road and sidewalk.
    Curb,
    /// The kickboard itself.
    Kickboard,
    /// Painted lane marking.
    Lane,
    /// Vehicle road surface.
    Road,
    /// Pedestrian sidewalk.
    Sidewalk,
    /// Grass or planted verge.
    Verge,
}

impl SurfaceClass {
    /// Returns the class for the given numeric id, or `None` for ids
    /// outside the fixed table.
    pub fn from_id(id: u32) -> Option<SurfaceClass> {
        match id {
            0 => Some(SurfaceClass::BicRoad),
            1 => Some(SurfaceClass::Curb),
            2 => Some(SurfaceClass::Kickboard),
            3 => Some(SurfaceClass::Lane),
            4 => Some(SurfaceClass::Road),
            5 => Some(SurfaceClass::Sidewalk),
            6 => Some(SurfaceClass::Verge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceClass::BicRoad => "bic_road",
            SurfaceClass::Curb => "curb",
            SurfaceClass::Kickboard => "kickboard",
            SurfaceClass::Lane => "lane",
            SurfaceClass::Road => "road",
            SurfaceClass::Sidewalk => "sidewalk",
            SurfaceClass::Verge => "verge",
        }
    }
}

impl Display for SurfaceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps a surface-match winner to its console label.
///
/// `None` (no footprint box or no points inside it) becomes `"None"`, a
/// winner outside the class table becomes `"Unknown"`.
pub fn surface_label(class_id: Option<u32>) -> &'static str {
    match class_id {
        Some(id) => SurfaceClass::from_id(id).map_or("Unknown", |class| class.as_str()),
        None => "None",
    }
}

/// Parsed label file mapping class ids to labelled coordinate sets.
///
/// Each line of the source file is `<class_id> <x1> <y1> <x2> <y2> ...`
/// with coordinates normalized to `[0, 1]`.  One line is one detection;
/// a class may appear on multiple lines.  Iteration over [`classes`]
/// is in ascending class-id order, which fixes the otherwise unspecified
/// ordering of the colorize and surface-match steps.
///
/// [`classes`]: LabelFile::classes
#[derive(Clone, Debug, Default)]
pub struct LabelFile {
    classes: BTreeMap<u32, Vec<Vec<f32>>>,
}

impl LabelFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<LabelFile, Error> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses label lines from a reader.  Malformed numeric tokens and
    /// lines without a class id propagate as errors; a trailing unpaired
    /// coordinate on a line is kept and ignored by [`pairs`].
    pub fn from_reader(reader: impl BufRead) -> Result<LabelFile, Error> {
        let mut classes: BTreeMap<u32, Vec<Vec<f32>>> = BTreeMap::new();
        for line in reader.lines() {
            let line = line?;
            let mut tokens = line.split_whitespace();
            let class_id = tokens
                .next()
                .ok_or_else(|| Error::MalformedLabel(line.clone()))?
                .parse::<u32>()?;
            let coords = tokens
                .map(str::parse::<f32>)
                .collect::<Result<Vec<f32>, _>>()?;
            classes.entry(class_id).or_default().push(coords);
        }
        Ok(LabelFile { classes })
    }

    /// The class mapping in ascending class-id order.
    pub fn classes(&self) -> &BTreeMap<u32, Vec<Vec<f32>>> {
        &self.classes
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// All (x, y) pairs labelled for the given class, across every
    /// coordinate set, in file order within a class.
    pub fn class_points(&self, class_id: u32) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.classes
            .get(&class_id)
            .into_iter()
            .flatten()
            .flat_map(|set| pairs(set))
    }

    /// Re-emits the mapping in the source line format, one detection per
    /// line in ascending class-id order.  Round-trips with
    /// [`from_reader`] up to float formatting.
    ///
    /// [`from_reader`]: LabelFile::from_reader
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (class_id, coord_sets) in &self.classes {
            for set in coord_sets {
                let mut line = class_id.to_string();
                for value in set {
                    line.push(' ');
                    line.push_str(&value.to_string());
                }
                lines.push(line);
            }
        }
        lines
    }
}

/// Pairs of alternating x/y values; a trailing unpaired value is ignored.
pub fn pairs(coords: &[f32]) -> impl Iterator<Item = (f32, f32)> + '_ {
    coords
        .iter()
        .step_by(2)
        .zip(coords.iter().skip(1).step_by(2))
        .map(|(x, y)| (*x, *y))
}

/// Fixed rectangle loaded from a `<name>_coordinates.txt` file.
///
/// The four fields are read as-is with no ordering validation, so a
/// record with `x_max < x_min` yields a negative [`area`] which flows
/// through the ratio computation unchanged.
///
/// [`area`]: RectangleRecord::area
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectangleRecord {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl RectangleRecord {
    pub fn from_path(path: impl AsRef<Path>) -> Result<RectangleRecord, Error> {
        std::fs::read_to_string(path)?.trim().parse()
    }

    pub fn width(&self) -> i64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> i64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }
}

impl FromStr for RectangleRecord {
    type Err = Error;

    fn from_str(s: &str) -> Result<RectangleRecord, Error> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        match fields.as_slice() {
            [x_min, y_min, x_max, y_max] => Ok(RectangleRecord {
                x_min: x_min.parse()?,
                y_min: y_min.parse()?,
                x_max: x_max.parse()?,
                y_max: y_max.parse()?,
            }),
            _ => Err(Error::MalformedRectangle(s.to_string())),
        }
    }
}
