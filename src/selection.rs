//! Overlap selection of catalog segments against a requested window.

use crate::catalog::{Catalog, SegmentFile};
use crate::error::{Result, SelectorError};

/// Caller-requested range `[t1, t2]` in filename time units.
///
/// Only constructible through [`SelectionWindow::new`], so a window in hand
/// always satisfies `t1 <= t2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionWindow {
    t1: f64,
    t2: f64,
}

impl SelectionWindow {
    /// Fails with `InvalidWindow` when `t1 > t2` or either bound is NaN.
    pub fn new(t1: f64, t2: f64) -> Result<Self> {
        if t1.is_nan() || t2.is_nan() || t1 > t2 {
            return Err(SelectorError::InvalidWindow { t1, t2 });
        }
        Ok(Self { t1, t2 })
    }

    pub fn start(&self) -> f64 {
        self.t1
    }

    pub fn end(&self) -> f64 {
        self.t2
    }

    /// True when `segment` should take part in this window.
    ///
    /// A segment is selected when any of the three clauses holds.
    pub fn overlaps(&self, segment: &SegmentFile) -> bool {
        let (t1, t2) = (self.t1, self.t2);
        let (s1, s2) = (segment.start_time, segment.end_time);

        let inside = s1 >= t1 && s2 <= t2;
        let covers_start = s1 <= t1 && s2 >= t1;
        let covers_end = s1 <= t2 && s2 >= t2;

        inside || covers_start || covers_end
    }
}

/// Returns the catalog segments overlapping `window`, in catalog order.
///
/// An empty result is valid here; the pipeline turns it into `NoSegmentsFound`.
pub fn select<'a>(catalog: &'a Catalog, window: &SelectionWindow) -> Vec<&'a SegmentFile> {
    let selected: Vec<&SegmentFile> = catalog
        .iter()
        .filter(|segment| window.overlaps(segment))
        .collect();

    log::debug!(
        "Window [{}, {}] overlaps {} of {} segments",
        window.start(),
        window.end(),
        selected.len(),
        catalog.len()
    );

    selected
}

impl Catalog {
    /// Shorthand for [`select`].
    pub fn select(&self, window: &SelectionWindow) -> Vec<&SegmentFile> {
        select(self, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn segment(name: &str, start: f64, end: f64) -> SegmentFile {
        SegmentFile {
            path: PathBuf::from(format!("{name}.rhd")),
            prefix: name.to_string(),
            start_time: start,
            end_time: end,
        }
    }

    fn abc() -> Catalog {
        Catalog::from_segments(vec![
            segment("C", 250.0, 300.0),
            segment("A", 0.0, 100.0),
            segment("B", 100.0, 200.0),
        ])
    }

    fn names(selected: &[&SegmentFile]) -> Vec<String> {
        selected.iter().map(|s| s.prefix.clone()).collect()
    }

    #[test]
    fn window_spanning_adjacent_segments_selects_both_in_order() {
        let catalog = abc();
        let window = SelectionWindow::new(90.0, 150.0).unwrap();
        assert_eq!(names(&select(&catalog, &window)), vec!["A", "B"]);
    }

    #[test]
    fn window_in_gap_selects_nothing() {
        let catalog = abc();
        let window = SelectionWindow::new(210.0, 240.0).unwrap();
        assert!(select(&catalog, &window).is_empty());
    }

    #[test]
    fn point_window_inside_one_segment() {
        let catalog = abc();
        let window = SelectionWindow::new(50.0, 50.0).unwrap();
        assert_eq!(names(&select(&catalog, &window)), vec!["A"]);
    }

    #[test]
    fn window_inside_single_segment_selects_only_it() {
        let catalog = abc();
        for (t1, t2) in [(260.0, 290.0), (250.0, 300.0), (120.0, 180.0)] {
            let window = SelectionWindow::new(t1, t2).unwrap();
            assert_eq!(select(&catalog, &window).len(), 1, "window [{t1}, {t2}]");
        }
    }

    #[test]
    fn boundary_point_selects_both_neighbours() {
        let catalog = abc();
        let window = SelectionWindow::new(100.0, 100.0).unwrap();
        assert_eq!(names(&select(&catalog, &window)), vec!["A", "B"]);
    }

    #[test]
    fn containing_segment_is_selected() {
        let catalog = Catalog::from_segments(vec![segment("long", 0.0, 1000.0)]);
        let window = SelectionWindow::new(400.0, 500.0).unwrap();
        assert_eq!(names(&catalog.select(&window)), vec!["long"]);
    }

    #[test]
    fn window_covering_everything_selects_everything() {
        let catalog = abc();
        let window = SelectionWindow::new(-10.0, 1000.0).unwrap();
        assert_eq!(names(&select(&catalog, &window)), vec!["A", "B", "C"]);
    }

    #[test]
    fn selection_is_repeatable() {
        let catalog = abc();
        let window = SelectionWindow::new(90.0, 260.0).unwrap();
        let first = select(&catalog, &window);
        let second = select(&catalog, &window);
        assert_eq!(first, second);
    }

    #[test]
    fn inverted_window_is_rejected() {
        let err = SelectionWindow::new(20.0, 10.0).unwrap_err();
        assert!(matches!(err, SelectorError::InvalidWindow { t1, t2 } if t1 == 20.0 && t2 == 10.0));
    }

    #[test]
    fn nan_bound_is_rejected() {
        assert!(SelectionWindow::new(f64::NAN, 10.0).is_err());
        assert!(SelectionWindow::new(0.0, f64::NAN).is_err());
    }
}
