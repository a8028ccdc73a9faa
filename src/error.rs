//! Error types for catalog building, window selection and RHD reading.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Property that differed between two segments being concatenated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentProperty {
    /// Number of channels in the requested stream
    ChannelCount,
    /// Channel identifiers or their order
    ChannelLabels,
    /// Sample rate of the requested stream
    SampleRate,
}

impl fmt::Display for SegmentProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentProperty::ChannelCount => write!(f, "channel count"),
            SegmentProperty::ChannelLabels => write!(f, "channel labels"),
            SegmentProperty::SampleRate => write!(f, "sample rate"),
        }
    }
}

/// Unit of the ranges reported by [`SelectorError::WindowOutOfRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coordinate {
    /// Filename time units
    Time,
    /// Sample-frame indices
    Frame,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Time => write!(f, "time"),
            Coordinate::Frame => write!(f, "frame"),
        }
    }
}

/// Errors raised while cataloging, selecting, concatenating or reading segments.
#[derive(Error, Debug)]
pub enum SelectorError {
    /// A filename does not follow `<prefix>_<t2>_<t1>.<ext>`
    #[error("Malformed filename {}: {reason}", path.display())]
    MalformedFilename { path: PathBuf, reason: String },

    /// Requested window has `t1 > t2` (or a NaN bound)
    #[error("Invalid window: t1 ({t1}) must not exceed t2 ({t2})")]
    InvalidWindow { t1: f64, t2: f64 },

    /// No catalog entry overlaps the requested window, or nothing was given to concatenate
    #[error("No segments found{}", describe_window(.window))]
    NoSegmentsFound { window: Option<(f64, f64)> },

    /// Selected files disagree on channel layout or sample rate
    #[error("Incompatible segment {}: {property} differs (expected {expected}, found {found})", path.display())]
    IncompatibleSegments {
        path: PathBuf,
        property: SegmentProperty,
        expected: String,
        found: String,
    },

    /// Requested bounds fall outside the available range
    #[error(
        "Window out of range: requested {coordinate} range [{requested_start}, {requested_end}], \
         available [{available_start}, {available_end}]"
    )]
    WindowOutOfRange {
        coordinate: Coordinate,
        requested_start: f64,
        requested_end: f64,
        available_start: f64,
        available_end: f64,
    },

    /// The file was not recognized as an Intan RHD file
    #[error("Unrecognized file format in {}: magic number {magic:#010x}", path.display())]
    UnrecognizedFileFormat { path: PathBuf, magic: u32 },

    /// The data section is not a whole number of data blocks
    #[error("File size error in {}: {bytes_remaining} data bytes is not a multiple of the {bytes_per_block}-byte block", path.display())]
    FileSizeError {
        path: PathBuf,
        bytes_remaining: u64,
        bytes_per_block: u64,
    },

    /// A channel in the header has an unknown signal type
    #[error("Invalid channel type: {0}")]
    InvalidChannelType(i32),

    /// Error reading a Qt string from the header
    #[error("Error reading string from file")]
    StringReadError,

    /// The requested signal stream is unknown or empty in this file
    #[error("Stream '{stream}' not found in {}", path.display())]
    StreamNotFound { path: PathBuf, stream: String },

    /// A requested channel identifier is not part of the stream
    #[error("Channel not found: {channel}")]
    ChannelNotFound { channel: String },

    /// Sample data or channel ids that cannot form a consistent stream
    #[error("Invalid stream: {0}")]
    InvalidStream(String),

    /// The source directory could not be walked
    #[error("Scan error in {}: {reason}", path.display())]
    Scan { path: PathBuf, reason: String },

    /// Invalid configuration values or unparsable configuration file
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred during directory listing or file reading
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

fn describe_window(window: &Option<(f64, f64)>) -> String {
    match window {
        Some((t1, t2)) => format!(" overlapping window [{}, {}]", t1, t2),
        None => String::new(),
    }
}

impl SelectorError {
    pub(crate) fn frame_range(requested: (u64, u64), available: u64) -> Self {
        SelectorError::WindowOutOfRange {
            coordinate: Coordinate::Frame,
            requested_start: requested.0 as f64,
            requested_end: requested.1 as f64,
            available_start: 0.0,
            available_end: available as f64,
        }
    }
}

/// Convenience result type for this crate
pub type Result<T> = std::result::Result<T, SelectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incompatible_segments_names_path_and_property() {
        let err = SelectorError::IncompatibleSegments {
            path: PathBuf::from("data/day2_200_100.rhd"),
            property: SegmentProperty::SampleRate,
            expected: "20000 Hz".to_string(),
            found: "30000 Hz".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("day2_200_100.rhd"));
        assert!(msg.contains("sample rate"));
        assert!(msg.contains("30000 Hz"));
    }

    #[test]
    fn no_segments_found_mentions_window_when_known() {
        let err = SelectorError::NoSegmentsFound {
            window: Some((210.0, 240.0)),
        };
        assert_eq!(err.to_string(), "No segments found overlapping window [210, 240]");
        let err = SelectorError::NoSegmentsFound { window: None };
        assert_eq!(err.to_string(), "No segments found");
    }

    #[test]
    fn scan_error_names_directory() {
        let err = SelectorError::Scan {
            path: PathBuf::from("/data/day1"),
            reason: "File system loop found".to_string(),
        };
        assert_eq!(err.to_string(), "Scan error in /data/day1: File system loop found");
        assert!(!matches!(err, SelectorError::Config(_)));
    }

    #[test]
    fn frame_range_reports_both_ranges() {
        let msg = SelectorError::frame_range((10, 500), 400).to_string();
        assert!(msg.contains("frame"));
        assert!(msg.contains("[10, 500]"));
        assert!(msg.contains("[0, 400]"));
    }
}
