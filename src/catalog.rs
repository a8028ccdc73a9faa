//! Directory catalog of time-segmented acquisition files.
//!
//! Files are named `<prefix>_<t2>_<t1>.<ext>`: `t1` is the segment's start
//! coordinate and `t2` its end coordinate. The catalog keeps every parsed
//! segment sorted ascending by start, ties kept in filename order.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{MalformedPolicy, SelectorConfig};
use crate::error::{Result, SelectorError};

/// One physical recording file and the interval its name claims to cover.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentFile {
    /// Location of the file
    pub path: PathBuf,
    /// Grouping label (session/day), carried for diagnostics only
    pub prefix: String,
    /// Start coordinate (`t1`, last filename field)
    pub start_time: f64,
    /// End coordinate (`t2`, middle filename field)
    pub end_time: f64,
}

impl SegmentFile {
    /// Nominal length of the segment in filename time units.
    pub fn span(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// True when `t` lies inside `[start_time, end_time]`.
    pub fn contains(&self, t: f64) -> bool {
        self.start_time <= t && t <= self.end_time
    }
}

/// A file left out of the catalog under [`MalformedPolicy::Skip`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Immutable, start-ordered index of the segments found in one directory.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    segments: Vec<SegmentFile>,
    skipped: Vec<SkippedFile>,
}

impl Catalog {
    /// Scans `directory` with the default configuration.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use intan_selector::Catalog;
    ///
    /// let catalog = Catalog::build("data").unwrap();
    /// for segment in catalog.iter() {
    ///     println!("{} [{}, {}]", segment.prefix, segment.start_time, segment.end_time);
    /// }
    /// ```
    pub fn build<P: AsRef<Path>>(directory: P) -> Result<Self> {
        Self::build_with(directory, &SelectorConfig::default())
    }

    /// Scans `directory` (non-recursively) for files with the configured extension.
    ///
    /// No file contents are read. A directory with no matching files gives an
    /// empty catalog.
    pub fn build_with<P: AsRef<Path>>(directory: P, config: &SelectorConfig) -> Result<Self> {
        config.validate()?;
        let directory = directory.as_ref();
        let extension = config.normalized_extension();

        let mut segments = Vec::new();
        let mut skipped = Vec::new();

        let walker = WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| {
                let reason = e.to_string();
                match e.into_io_error() {
                    Some(io) => SelectorError::Io(io),
                    None => SelectorError::Scan {
                        path: directory.to_path_buf(),
                        reason,
                    },
                }
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || !has_extension(path, &extension) {
                continue;
            }

            match parse_segment_name(path, config.delimiter) {
                Ok(segment) => {
                    log::debug!(
                        "Cataloged {} (prefix '{}', [{}, {}])",
                        path.display(),
                        segment.prefix,
                        segment.start_time,
                        segment.end_time
                    );
                    segments.push(segment);
                }
                Err(SelectorError::MalformedFilename { path, reason })
                    if config.malformed_policy == MalformedPolicy::Skip =>
                {
                    log::warn!("Skipping {}: {}", path.display(), reason);
                    skipped.push(SkippedFile { path, reason });
                }
                Err(e) => return Err(e),
            }
        }

        let catalog = Self::assemble(segments, skipped);
        log::info!(
            "Found {} segment file{} in {} ({} skipped)",
            catalog.len(),
            if catalog.len() != 1 { "s" } else { "" },
            directory.display(),
            catalog.skipped.len()
        );
        Ok(catalog)
    }

    /// Builds a catalog from segments the caller already has.
    pub fn from_segments(segments: Vec<SegmentFile>) -> Self {
        Self::assemble(segments, Vec::new())
    }

    fn assemble(mut segments: Vec<SegmentFile>, skipped: Vec<SkippedFile>) -> Self {
        // stable: equal starts keep their incoming (filename) order
        segments.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        Self { segments, skipped }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SegmentFile> {
        self.segments.iter()
    }

    /// All segments, ascending by start.
    pub fn segments(&self) -> &[SegmentFile] {
        &self.segments
    }

    /// Files left out under the skip policy.
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Smallest start and largest end over the whole catalog.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        let first = self.segments.first()?;
        let end = self
            .segments
            .iter()
            .map(|s| s.end_time)
            .fold(first.end_time, f64::max);
        Some((first.start_time, end))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a SegmentFile;
    type IntoIter = std::slice::Iter<'a, SegmentFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Parses `<prefix><d><t2><d><t1>.<ext>` into a [`SegmentFile`].
///
/// Fields are split from the right, so the prefix may itself contain the
/// delimiter. A start after the end is rejected as malformed.
pub fn parse_segment_name(path: &Path, delimiter: char) -> Result<SegmentFile> {
    let malformed = |reason: String| SelectorError::MalformedFilename {
        path: path.to_path_buf(),
        reason,
    };

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| malformed("file stem is missing or not valid UTF-8".to_string()))?;

    let mut fields = stem.rsplitn(3, delimiter);
    let (t1_field, t2_field, prefix) = match (fields.next(), fields.next(), fields.next()) {
        (Some(t1), Some(t2), Some(prefix)) => (t1, t2, prefix),
        _ => {
            return Err(malformed(format!(
                "expected 3 '{}'-separated fields in '{}'",
                delimiter, stem
            )))
        }
    };

    if prefix.is_empty() {
        return Err(malformed("prefix field is empty".to_string()));
    }

    let start_time = parse_time_field(t1_field).map_err(|r| malformed(format!("t1 {}", r)))?;
    let end_time = parse_time_field(t2_field).map_err(|r| malformed(format!("t2 {}", r)))?;

    if start_time > end_time {
        return Err(malformed(format!(
            "start t1 ({}) is after end t2 ({})",
            start_time, end_time
        )));
    }

    Ok(SegmentFile {
        path: path.to_path_buf(),
        prefix: prefix.to_string(),
        start_time,
        end_time,
    })
}

fn parse_time_field(field: &str) -> std::result::Result<f64, String> {
    let value: f64 = field
        .parse()
        .map_err(|_| format!("field '{}' is not numeric", field))?;
    if !value.is_finite() {
        return Err(format!("field '{}' is not finite", field));
    }
    Ok(value)
}
