//! Virtual concatenation of selected segments and window extraction.
//!
//! A [`VirtualTimeline`] keeps one open stream per selected segment and a
//! cumulative offset table; no sample data is copied until a range is read.
//! Dropping the timeline (or the [`WindowedStream`] that owns it) releases
//! every underlying file handle.

use std::path::Path;

use ndarray::{concatenate as join, Array2, Axis};

use crate::catalog::SegmentFile;
use crate::config::SelectorConfig;
use crate::error::{Coordinate, Result, SegmentProperty, SelectorError};
use crate::selection::SelectionWindow;
use crate::stream::{check_frame_range, SampleStream, SegmentLoader};

/// Placement of one segment inside the virtual timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSegment {
    /// Catalog entry the samples come from
    pub file: SegmentFile,
    /// Absolute index of the segment's first frame
    pub offset: u64,
    /// Number of frames the segment contributes
    pub len: u64,
}

impl TimelineSegment {
    /// One past the segment's last absolute frame.
    pub fn end(&self) -> u64 {
        self.offset + self.len
    }
}

/// Ordered, continuously indexed join of several same-shape streams.
#[derive(Debug)]
pub struct VirtualTimeline<S> {
    streams: Vec<S>,
    segments: Vec<TimelineSegment>,
    channel_ids: Vec<String>,
    sample_rate: f64,
    seconds_per_unit: f64,
}

/// Opens every segment through `loader` and joins them in the given order.
///
/// All streams must match the first one in channel count, channel labels and
/// sample rate (within `config.sample_rate_tolerance`).
pub fn concatenate<L: SegmentLoader>(
    loader: &L,
    segments: &[&SegmentFile],
    stream_name: &str,
    config: &SelectorConfig,
) -> Result<VirtualTimeline<L::Stream>> {
    let (first, rest) = match segments.split_first() {
        Some(split) => split,
        None => return Err(SelectorError::NoSegmentsFound { window: None }),
    };

    let head = open_segment(loader, first, stream_name, 1, segments.len())?;
    let channel_ids = head.channel_ids().to_vec();
    let sample_rate = head.sample_rate();

    let mut timeline = VirtualTimeline {
        streams: Vec::with_capacity(segments.len()),
        segments: Vec::with_capacity(segments.len()),
        channel_ids,
        sample_rate,
        seconds_per_unit: config.seconds_per_unit,
    };
    timeline.push(first, head);

    for (i, segment) in rest.iter().enumerate() {
        let stream = open_segment(loader, segment, stream_name, i + 2, segments.len())?;
        verify_compatibility(&timeline, &segment.path, &stream, config.sample_rate_tolerance)?;
        timeline.push(segment, stream);
    }

    log::info!(
        "Concatenated {} segment{}: {} channels, {} samples ({:.3} seconds at {:.2} kS/s)",
        timeline.segments.len(),
        if timeline.segments.len() != 1 { "s" } else { "" },
        timeline.channel_ids.len(),
        timeline.total_samples(),
        timeline.duration(),
        timeline.sample_rate / 1000.0
    );

    Ok(timeline)
}

fn open_segment<L: SegmentLoader>(
    loader: &L,
    segment: &SegmentFile,
    stream_name: &str,
    position: usize,
    count: usize,
) -> Result<L::Stream> {
    log::debug!(
        "Opening segment {}/{}: {}",
        position,
        count,
        segment.path.display()
    );
    loader.open(&segment.path, stream_name)
}

/// Verifies that `next` can be appended to `timeline`.
fn verify_compatibility<S: SampleStream, T: SampleStream>(
    timeline: &VirtualTimeline<S>,
    path: &Path,
    next: &T,
    tolerance: f64,
) -> Result<()> {
    let incompatible = |property, expected: String, found: String| {
        SelectorError::IncompatibleSegments {
            path: path.to_path_buf(),
            property,
            expected,
            found,
        }
    };

    if timeline.channel_ids.len() != next.num_channels() {
        return Err(incompatible(
            SegmentProperty::ChannelCount,
            timeline.channel_ids.len().to_string(),
            next.num_channels().to_string(),
        ));
    }

    if let Some((expected, found)) = timeline
        .channel_ids
        .iter()
        .zip(next.channel_ids())
        .find(|(a, b)| a != b)
    {
        return Err(incompatible(
            SegmentProperty::ChannelLabels,
            expected.clone(),
            found.clone(),
        ));
    }

    if (timeline.sample_rate - next.sample_rate()).abs() > tolerance {
        return Err(incompatible(
            SegmentProperty::SampleRate,
            format!("{} Hz", timeline.sample_rate),
            format!("{} Hz", next.sample_rate()),
        ));
    }

    Ok(())
}

impl<S: SampleStream> VirtualTimeline<S> {
    fn push(&mut self, file: &SegmentFile, stream: S) {
        let offset = self.total_samples();
        self.segments.push(TimelineSegment {
            file: file.clone(),
            offset,
            len: stream.num_samples(),
        });
        self.streams.push(stream);
    }

    /// Segment placements, in timeline order.
    pub fn segments(&self) -> &[TimelineSegment] {
        &self.segments
    }

    pub fn total_samples(&self) -> u64 {
        self.segments.last().map(TimelineSegment::end).unwrap_or(0)
    }

    /// Maps an absolute frame to `(segment position, local frame)`.
    ///
    /// Empty segments own no frames and are never returned.
    pub fn locate(&self, index: u64) -> Option<(usize, u64)> {
        if index >= self.total_samples() {
            return None;
        }
        let position = self.segments.partition_point(|s| s.end() <= index);
        let segment = &self.segments[position];
        Some((position, index - segment.offset))
    }

    /// Positions of the segments the window's start and end are mapped through.
    ///
    /// A segment covering both bounds is used for both. Otherwise the start
    /// goes through the latest segment covering it and the end through the
    /// first segment at or after that one covering it, so the start segment
    /// never comes after the end segment.
    fn bound_segments(&self, window: &SelectionWindow) -> Option<(usize, usize)> {
        let (t1, t2) = (window.start(), window.end());

        if let Some(position) = self
            .segments
            .iter()
            .position(|s| s.file.contains(t1) && s.file.contains(t2))
        {
            return Some((position, position));
        }

        let start = self.segments.iter().rposition(|s| s.file.contains(t1))?;
        let end = start
            + self.segments[start..]
                .iter()
                .position(|s| s.file.contains(t2))?;
        Some((start, end))
    }

    /// Absolute frame of time `t` inside the segment at `position`.
    ///
    /// May point past the segment's end when its nominal interval is longer
    /// than its data.
    fn frame_in(&self, position: usize, t: f64) -> u64 {
        let segment = &self.segments[position];
        let elapsed = (t - segment.file.start_time) * self.seconds_per_unit;
        segment.offset + (elapsed * self.sample_rate).round().max(0.0) as u64
    }

    /// Nominal time range covered by the selected segments.
    fn time_span(&self) -> (f64, f64) {
        let start = self
            .segments
            .iter()
            .map(|s| s.file.start_time)
            .fold(f64::INFINITY, f64::min);
        let end = self
            .segments
            .iter()
            .map(|s| s.file.end_time)
            .fold(f64::NEG_INFINITY, f64::max);
        (start, end)
    }

    /// Bounds the timeline to a window given in filename time units.
    ///
    /// A bound outside every selected segment's interval is out of range in
    /// time coordinates. A bound inside an interval but past that segment's
    /// samples is out of range in frame coordinates, against the segment's
    /// frames.
    pub fn extract(self, window: &SelectionWindow) -> Result<WindowedStream<S>> {
        let (start_position, end_position) = match self.bound_segments(window) {
            Some(positions) => positions,
            None => {
                let (available_start, available_end) = self.time_span();
                return Err(SelectorError::WindowOutOfRange {
                    coordinate: Coordinate::Time,
                    requested_start: window.start(),
                    requested_end: window.end(),
                    available_start,
                    available_end,
                });
            }
        };

        let start = self.frame_in(start_position, window.start());
        let end = self.frame_in(end_position, window.end());

        for (position, frame) in [(start_position, start), (end_position, end)] {
            let segment = &self.segments[position];
            if frame > segment.end() {
                log::debug!(
                    "{} holds frames [{}, {}), window needs frame {}",
                    segment.file.path.display(),
                    segment.offset,
                    segment.end(),
                    frame
                );
                return Err(SelectorError::WindowOutOfRange {
                    coordinate: Coordinate::Frame,
                    requested_start: start as f64,
                    requested_end: end as f64,
                    available_start: segment.offset as f64,
                    available_end: segment.end() as f64,
                });
            }
        }

        log::debug!(
            "Window [{}, {}] maps to frames [{}, {})",
            window.start(),
            window.end(),
            start,
            end
        );
        Ok(WindowedStream {
            timeline: self,
            start,
            end,
        })
    }

    /// Bounds the timeline to absolute frames `[start, end)`.
    pub fn extract_frames(self, start: u64, end: u64) -> Result<WindowedStream<S>> {
        check_frame_range(start, end, self.total_samples())?;
        Ok(WindowedStream {
            timeline: self,
            start,
            end,
        })
    }
}

impl<S: SampleStream> SampleStream for VirtualTimeline<S> {
    fn channel_ids(&self) -> &[String] {
        &self.channel_ids
    }

    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn num_samples(&self) -> u64 {
        self.total_samples()
    }

    fn read(&mut self, start: u64, end: u64) -> Result<Array2<f64>> {
        check_frame_range(start, end, self.total_samples())?;

        let mut pieces = Vec::new();
        for (segment, stream) in self.segments.iter().zip(self.streams.iter_mut()) {
            if segment.end() <= start || segment.offset >= end || segment.len == 0 {
                continue;
            }
            let local_start = start.max(segment.offset) - segment.offset;
            let local_end = end.min(segment.end()) - segment.offset;
            pieces.push(stream.read(local_start, local_end)?);
        }

        if pieces.is_empty() {
            return Ok(Array2::zeros((self.channel_ids.len(), 0)));
        }
        if pieces.len() == 1 {
            return Ok(pieces.remove(0));
        }

        let views: Vec<_> = pieces.iter().map(|p| p.view()).collect();
        join(Axis(1), &views).map_err(|e| {
            SelectorError::InvalidStream(format!("failed to stitch segment reads: {}", e))
        })
    }
}

/// Read-only view of `[start, end)` of a virtual timeline.
#[derive(Debug)]
pub struct WindowedStream<S> {
    timeline: VirtualTimeline<S>,
    start: u64,
    end: u64,
}

impl<S: SampleStream> WindowedStream<S> {
    /// Absolute frame range of the view within its timeline.
    pub fn frame_range(&self) -> (u64, u64) {
        (self.start, self.end)
    }

    pub fn timeline(&self) -> &VirtualTimeline<S> {
        &self.timeline
    }

    /// Reads the whole window into memory.
    pub fn read_all(&mut self) -> Result<Array2<f64>> {
        let len = self.num_samples();
        self.read(0, len)
    }

    /// Restricts the view to the named channels, in the order given.
    pub fn channel_slice(self, ids: &[&str]) -> Result<ChannelSlice<S>> {
        let mut rows = Vec::with_capacity(ids.len());
        for id in ids {
            let row = self
                .timeline
                .channel_ids
                .iter()
                .position(|c| c == id)
                .ok_or_else(|| SelectorError::ChannelNotFound {
                    channel: id.to_string(),
                })?;
            rows.push(row);
        }
        let channel_ids = ids.iter().map(|id| id.to_string()).collect();
        Ok(ChannelSlice {
            inner: self,
            rows,
            channel_ids,
        })
    }
}

impl<S: SampleStream> SampleStream for WindowedStream<S> {
    fn channel_ids(&self) -> &[String] {
        &self.timeline.channel_ids
    }

    fn sample_rate(&self) -> f64 {
        self.timeline.sample_rate
    }

    fn num_samples(&self) -> u64 {
        self.end - self.start
    }

    fn read(&mut self, start: u64, end: u64) -> Result<Array2<f64>> {
        check_frame_range(start, end, self.num_samples())?;
        self.timeline.read(self.start + start, self.start + end)
    }
}

/// A [`WindowedStream`] restricted to a subset of its channels.
#[derive(Debug)]
pub struct ChannelSlice<S> {
    inner: WindowedStream<S>,
    rows: Vec<usize>,
    channel_ids: Vec<String>,
}

impl<S: SampleStream> SampleStream for ChannelSlice<S> {
    fn channel_ids(&self) -> &[String] {
        &self.channel_ids
    }

    fn sample_rate(&self) -> f64 {
        self.inner.sample_rate()
    }

    fn num_samples(&self) -> u64 {
        self.inner.num_samples()
    }

    fn read(&mut self, start: u64, end: u64) -> Result<Array2<f64>> {
        let block = self.inner.read(start, end)?;
        Ok(block.select(Axis(0), &self.rows))
    }
}

/// Free-function form of [`VirtualTimeline::extract`].
pub fn extract<S: SampleStream>(
    timeline: VirtualTimeline<S>,
    window: &SelectionWindow,
) -> Result<WindowedStream<S>> {
    timeline.extract(window)
}
