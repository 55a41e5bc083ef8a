// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

/// Error type for street scene analysis operations.
///
/// Covers the failure modes of the annotate and sidewalk-ratio pipelines,
/// from unreadable inputs to malformed label records.  Only a missing image
/// for a label file is recovered (the batch skips the entry); every other
/// error propagates and terminates the run.
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred during file operations.
    IoError(std::io::Error),
    /// Image decoding or encoding error.
    ImageError(image::ImageError),
    /// Integer parsing error in a label or rectangle file.
    ParseIntError(std::num::ParseIntError),
    /// Float parsing error in a label file.
    ParseFloatError(std::num::ParseFloatError),
    /// JSON serialization error while writing a report.
    JsonError(serde_json::Error),
    /// Directory traversal error.
    WalkDirError(walkdir::Error),
    /// A label line without a class id token.
    MalformedLabel(String),
    /// A rectangle record without exactly four comma-separated fields.
    MalformedRectangle(String),
    /// A labelled class with zero points, for which no representative
    /// color can be computed.
    EmptyClass(u32),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageError(err)
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Error::ParseIntError(err)
    }
}

impl From<std::num::ParseFloatError> for Error {
    fn from(err: std::num::ParseFloatError) -> Self {
        Error::ParseFloatError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonError(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "I/O error: {}", e),
            Error::ImageError(e) => write!(f, "Image error: {}", e),
            Error::ParseIntError(e) => write!(f, "Integer parse error: {}", e),
            Error::ParseFloatError(e) => write!(f, "Float parse error: {}", e),
            Error::JsonError(e) => write!(f, "JSON error: {}", e),
            Error::WalkDirError(e) => write!(f, "Directory traversal error: {}", e),
            Error::MalformedLabel(line) => write!(f, "Malformed label line: {:?}", line),
            Error::MalformedRectangle(s) => write!(f, "Malformed rectangle record: {:?}", s),
            Error::EmptyClass(id) => write!(f, "Class {} has no labelled points", id),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            Error::ImageError(e) => Some(e),
            Error::ParseIntError(e) => Some(e),
            Error::ParseFloatError(e) => Some(e),
            Error::JsonError(e) => Some(e),
            Error::WalkDirError(e) => Some(e),
            _ => None,
        }
    }
}
