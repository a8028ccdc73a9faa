//! Catalog of time-segmented Intan recordings with window selection.
//!
//! Acquisition files named `<prefix>_<t2>_<t1>.rhd` are indexed by the
//! interval their name claims to cover. A request for a window picks the
//! overlapping files, joins them into one virtual recording and bounds it to
//! the window, without copying sample data until it is read.

mod catalog;
mod config;
mod error;
mod reader;
mod selection;
mod stream;
mod timeline;
pub mod types;

use std::path::Path;

pub use catalog::{parse_segment_name, Catalog, SegmentFile, SkippedFile};
pub use config::{MalformedPolicy, SelectorConfig};
pub use error::{Coordinate, Result, SegmentProperty, SelectorError};
pub use reader::{read_header, IntanLoader, RhdStream};
pub use selection::{select, SelectionWindow};
pub use stream::{InMemoryStream, SampleStream, SegmentLoader};
pub use timeline::{
    concatenate, extract, ChannelSlice, TimelineSegment, VirtualTimeline, WindowedStream,
};
pub use types::*;

/// Selects the RHD files in `directory` overlapping `[t1, t2]` and returns
/// them as one stream bounded to that window.
///
/// # Examples
///
/// ```no_run
/// use intan_selector::{select_and_concatenate, SampleStream};
///
/// let mut recording =
///     select_and_concatenate("data", 102551.0, 102600.0, "RHD2000 amplifier channel").unwrap();
/// println!("{} channels, {:.2} s", recording.num_channels(), recording.duration());
/// let samples = recording.read_all().unwrap();
/// ```
pub fn select_and_concatenate<P: AsRef<Path>>(
    directory: P,
    t1: f64,
    t2: f64,
    stream_name: &str,
) -> Result<WindowedStream<RhdStream>> {
    SignalSelector::new(directory)?.choose_and_concat(t1, t2, stream_name)
}

/// A catalog plus the loader and configuration used to serve window requests.
///
/// The catalog is built once; each request borrows it read-only and builds
/// its own timeline.
#[derive(Debug, Clone)]
pub struct SignalSelector<L = IntanLoader> {
    catalog: Catalog,
    loader: L,
    config: SelectorConfig,
}

impl SignalSelector<IntanLoader> {
    /// Catalogs `directory` with the default configuration and the RHD loader.
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let config = SelectorConfig::default();
        let catalog = Catalog::build_with(directory, &config)?;
        Ok(Self::with_loader(catalog, IntanLoader, config))
    }
}

impl<L: SegmentLoader> SignalSelector<L> {
    pub fn with_loader(catalog: Catalog, loader: L, config: SelectorConfig) -> Self {
        Self {
            catalog,
            loader,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Returns `stream_name` over `[t1, t2]` stitched from every overlapping file.
    ///
    /// The window is validated before any file is opened; an empty selection
    /// is `NoSegmentsFound`.
    pub fn choose_and_concat(
        &self,
        t1: f64,
        t2: f64,
        stream_name: &str,
    ) -> Result<WindowedStream<L::Stream>> {
        let window = SelectionWindow::new(t1, t2)?;

        let selected = select(&self.catalog, &window);
        if selected.is_empty() {
            return Err(SelectorError::NoSegmentsFound {
                window: Some((t1, t2)),
            });
        }

        for segment in &selected {
            log::debug!(
                "Selected {} (prefix '{}', [{}, {}])",
                segment.path.display(),
                segment.prefix,
                segment.start_time,
                segment.end_time
            );
        }

        let timeline = concatenate(&self.loader, &selected, stream_name, &self.config)?;
        timeline.extract(&window)
    }
}
