//! Capability interface for readable multi-channel sample streams.
//!
//! The selection pipeline only ever talks to these traits. `IntanLoader`
//! implements them over RHD2000 files; [`InMemoryStream`] covers data that
//! is already in memory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ndarray::{s, Array2};

use crate::error::{Result, SelectorError};

/// A readable, fixed-shape sample stream.
pub trait SampleStream {
    /// Channel identifiers, in storage order.
    fn channel_ids(&self) -> &[String];

    /// Samples per second.
    fn sample_rate(&self) -> f64;

    /// Total number of sample frames.
    fn num_samples(&self) -> u64;

    /// Reads frames `[start, end)` as a `[channels, end - start]` array.
    fn read(&mut self, start: u64, end: u64) -> Result<Array2<f64>>;

    fn num_channels(&self) -> usize {
        self.channel_ids().len()
    }

    /// Length of the stream in seconds.
    fn duration(&self) -> f64 {
        self.num_samples() as f64 / self.sample_rate()
    }
}

/// Opens one segment file as a [`SampleStream`] for a named signal stream.
pub trait SegmentLoader {
    type Stream: SampleStream;

    fn open(&self, path: &Path, stream_name: &str) -> Result<Self::Stream>;
}

/// Checks `[start, end)` against a stream of `len` frames.
pub(crate) fn check_frame_range(start: u64, end: u64, len: u64) -> Result<()> {
    if start > end || end > len {
        return Err(SelectorError::frame_range((start, end), len));
    }
    Ok(())
}

/// Stream backed by an in-memory `[channels, samples]` array.
#[derive(Debug, Clone)]
pub struct InMemoryStream {
    channel_ids: Vec<String>,
    sample_rate: f64,
    data: Array2<f64>,
}

impl InMemoryStream {
    /// Fails with `InvalidStream` if the channel list does not match the array's rows.
    pub fn new(channel_ids: Vec<String>, sample_rate: f64, data: Array2<f64>) -> Result<Self> {
        if channel_ids.len() != data.nrows() {
            return Err(SelectorError::InvalidStream(format!(
                "{} channel ids for {} data rows",
                channel_ids.len(),
                data.nrows()
            )));
        }
        Ok(Self {
            channel_ids,
            sample_rate,
            data,
        })
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }
}

impl SampleStream for InMemoryStream {
    fn channel_ids(&self) -> &[String] {
        &self.channel_ids
    }

    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn num_samples(&self) -> u64 {
        self.data.ncols() as u64
    }

    fn read(&mut self, start: u64, end: u64) -> Result<Array2<f64>> {
        check_frame_range(start, end, self.num_samples())?;
        Ok(self
            .data
            .slice(s![.., start as usize..end as usize])
            .to_owned())
    }
}

/// Fixture loader: each path maps to a prepared stream, whatever the stream name.
impl SegmentLoader for HashMap<PathBuf, InMemoryStream> {
    type Stream = InMemoryStream;

    fn open(&self, path: &Path, stream_name: &str) -> Result<Self::Stream> {
        self.get(path)
            .cloned()
            .ok_or_else(|| SelectorError::StreamNotFound {
                path: path.to_path_buf(),
                stream: stream_name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn stream() -> InMemoryStream {
        InMemoryStream::new(
            vec!["A-000".to_string(), "A-001".to_string()],
            1000.0,
            array![[0.0, 1.0, 2.0, 3.0], [10.0, 11.0, 12.0, 13.0]],
        )
        .unwrap()
    }

    #[test]
    fn reads_requested_columns() {
        let mut stream = stream();
        let block = stream.read(1, 3).unwrap();
        assert_eq!(block, array![[1.0, 2.0], [11.0, 12.0]]);
        assert_eq!(stream.duration(), 0.004);
    }

    #[test]
    fn empty_read_is_allowed() {
        let mut stream = stream();
        assert_eq!(stream.read(4, 4).unwrap().ncols(), 0);
    }

    #[test]
    fn read_past_end_is_out_of_range() {
        let mut stream = stream();
        let err = stream.read(2, 5).unwrap_err();
        assert!(matches!(err, SelectorError::WindowOutOfRange { .. }));
    }

    #[test]
    fn mismatched_rows_are_rejected() {
        let err = InMemoryStream::new(vec!["A-000".to_string()], 1000.0, Array2::zeros((2, 4)))
            .unwrap_err();
        assert!(matches!(err, SelectorError::InvalidStream(_)));
        assert_eq!(err.to_string(), "Invalid stream: 1 channel ids for 2 data rows");
    }

    #[test]
    fn map_loader_reports_unknown_path() {
        let loader: HashMap<PathBuf, InMemoryStream> = HashMap::new();
        let err = loader.open(Path::new("x.rhd"), "RHD2000 amplifier channel").unwrap_err();
        assert!(matches!(err, SelectorError::StreamNotFound { .. }));
    }
}
