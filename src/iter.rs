//! Driving a loop from a [`Progress`].
//!
//! The tracker is its own range: iterating `&mut progress` yields the position
//! before each loop body and advances (and possibly redraws) after it, stopping
//! once the position reaches the total.
//!
//! ```
//! use loop_progress::Progress;
//!
//! let mut out = Vec::new();
//! let mut bar = Progress::with_sink(100, &mut out)?;
//! let seen: Vec<u64> = bar.update(25).iter().collect();
//! assert_eq!(seen, [0, 25, 50, 75]);
//! assert_eq!(bar.get_pos(), 100);
//! # Ok::<(), loop_progress::Error>(())
//! ```
//!
//! # Reaching the tracker mid-loop
//!
//! A `for` loop holds the tracker for its whole duration. To call
//! [`keep`](Progress::keep) or a setter from the loop body, drive the iterator by
//! hand and go through [`ProgressIter::progress`]:
//!
//! ```
//! use loop_progress::Progress;
//!
//! let mut out = Vec::new();
//! let mut bar = Progress::with_sink(10, &mut out)?;
//! let mut iter = bar.iter();
//! while let Some(i) = iter.next() {
//!     if i == 5 {
//!         iter.progress().keep()?;
//!         // other output goes here, on its own line
//!     }
//! }
//! # Ok::<(), loop_progress::Error>(())
//! ```
//!
//! # Cursors
//!
//! [`Cursor`] is the lower-level protocol the iterator is built on: a live cursor
//! from [`Progress::begin`] is compared against [`Cursor::end`] before each body and
//! advanced after it. Only that pairing has a meaning; any other comparison is an
//! [`Error::InvalidIteratorComparison`].

use std::{io::Write, iter::FusedIterator};

use tracing::warn;

use crate::{
    error::{Error, Result},
    progress::Progress,
};

/// A position in a progress-driven loop.
pub enum Cursor<'a, W: Write> {
    /// Tracks the live position of a tracker.
    Active(&'a mut Progress<W>),
    /// The end marker.
    Done,
}

impl<W: Write> Cursor<'_, W> {
    /// The end marker to compare a live cursor against.
    #[must_use]
    pub const fn end() -> Self {
        Self::Done
    }

    /// Whether this is the end marker.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// The current position, or `None` for the end marker.
    #[must_use]
    pub fn value(&self) -> Option<u64> {
        match self {
            Self::Active(progress) => Some(progress.get_pos()),
            Self::Done => None,
        }
    }

    /// The tracker behind a live cursor, or `None` for the end marker.
    pub fn progress(&mut self) -> Option<&mut Progress<W>> {
        match self {
            Self::Active(progress) => Some(&mut **progress),
            Self::Done => None,
        }
    }

    /// Pushes the tracker one step. Does nothing on the end marker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if redrawing the line fails.
    pub fn advance(&mut self) -> Result<&mut Self> {
        if let Self::Active(progress) = self {
            progress.push()?;
        }
        Ok(self)
    }

    /// Whether the loop should run another body: `self` must be live and `end` the
    /// end marker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIteratorComparison`] for any other pairing.
    pub fn has_more(&self, end: &Self) -> Result<bool> {
        match (self, end) {
            (Self::Active(progress), Self::Done) => Ok(progress.has_more()),
            _ => Err(Error::InvalidIteratorComparison),
        }
    }
}

/// An iterator over the positions of a [`Progress`].
///
/// The first call yields the starting position; every later call advances the
/// tracker first. Redraw failures are logged and do not stop the loop.
pub struct ProgressIter<'a, W: Write> {
    progress: &'a mut Progress<W>,
    started: bool,
    done: bool,
}

impl<'a, W: Write> ProgressIter<'a, W> {
    /// Creates a `ProgressIter` over `progress`.
    ///
    /// Note: This is usually constructed via [`Progress::iter`] or `&mut progress`.
    pub const fn new(progress: &'a mut Progress<W>) -> Self {
        Self {
            progress,
            started: false,
            done: false,
        }
    }

    /// The tracker being iterated, for calling [`keep`](Progress::keep) or a setter
    /// between two steps.
    pub fn progress(&mut self) -> &mut Progress<W> {
        &mut *self.progress
    }

    /// Number of bodies still to run.
    fn remaining(&self) -> u64 {
        if self.done {
            return 0;
        }

        let progress = &*self.progress;
        let next = if self.started {
            progress.position.saturating_add(progress.step)
        } else {
            progress.position
        };
        progress.total.saturating_sub(next).div_ceil(progress.step)
    }
}

impl<W: Write> Iterator for ProgressIter<'_, W> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut cursor = Cursor::Active(&mut *self.progress);
        if self.started {
            if let Err(err) = cursor.advance() {
                warn!(error = %err, "failed to draw progress line");
            }
        }
        self.started = true;

        // Live against end never fails.
        if cursor.has_more(&Cursor::end()).unwrap_or(false) {
            cursor.value()
        } else {
            self.done = true;
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl<W: Write> ExactSizeIterator for ProgressIter<'_, W> {}

impl<W: Write> FusedIterator for ProgressIter<'_, W> {}

impl<'a, W: Write> IntoIterator for &'a mut Progress<W> {
    type Item = u64;
    type IntoIter = ProgressIter<'a, W>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use super::Cursor;
    use crate::{Error, Progress, ProgressBuilder};

    /// A sink that refuses every write.
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("sink closed"))
        }
    }

    /// Loop Integration
    /// A for loop sees every position once and leaves the tracker at the total.
    #[test]
    fn test_for_loop() {
        let mut out = Vec::new();
        let mut seen = Vec::new();
        {
            let mut bar = Progress::with_sink(5, &mut out).unwrap();
            for i in &mut bar {
                seen.push(i);
            }
            assert_eq!(bar.get_pos(), 5);
            assert!(bar.is_finished());
        }

        assert_eq!(seen, [0, 1, 2, 3, 4]);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('\r').count(), 5);
        assert!(text.ends_with(" 5 / 5  100%\r\n"));
    }

    /// Fluent Loop Header
    /// Setters chain straight into the loop like the builder does.
    #[test]
    fn test_fluent_loop_header() {
        let mut out = Vec::new();
        let mut count = 0;
        {
            let mut bar = Progress::with_sink(1000, &mut out).unwrap();
            for _ in bar.name("much amaze").ticks(100) {
                count += 1;
            }
        }

        assert_eq!(count, 1000);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('\r').count(), 100);
        assert_eq!(text.matches(" much amaze : ").count(), 100);
    }

    /// Custom Step
    /// A step of 5 over 100 finishes after exactly 20 advances.
    #[test]
    fn test_custom_step() {
        let mut bar = ProgressBuilder::new(100).update(5).build(Vec::new()).unwrap();
        let mut cursor = bar.begin();
        let end = Cursor::end();

        let mut advances = 0;
        while cursor.has_more(&end).unwrap() {
            cursor.advance().unwrap();
            advances += 1;
            assert_eq!(
                cursor.has_more(&end).unwrap(),
                advances < 20,
                "has_more after advance {advances}"
            );
        }

        assert_eq!(advances, 20);
        assert_eq!(cursor.value(), Some(100));
        assert!(cursor.progress().is_some_and(|p| p.is_finished()));
    }

    /// Size Hint
    /// The iterator knows exactly how many bodies are left.
    #[test]
    fn test_size_hint() {
        let mut bar = ProgressBuilder::new(100).update(30).build(Vec::new()).unwrap();
        let mut iter = bar.iter();

        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.by_ref().count(), 3);
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
    }

    /// Saturated Size Hint
    /// A count that does not fit in `usize` still reports an exact (saturated) size.
    #[test]
    fn test_size_hint_saturates() {
        let mut bar = ProgressBuilder::new(u64::MAX).build(Vec::new()).unwrap();
        let iter = bar.iter();

        assert_eq!(iter.size_hint(), (usize::MAX, Some(usize::MAX)));
        assert_eq!(iter.len(), usize::MAX);
    }

    /// Keep Mid-Run
    /// The loop body reaches the tracker to keep a line and change the step.
    #[test]
    fn test_keep_mid_run() {
        let mut out = Vec::new();
        let mut seen = Vec::new();
        {
            let mut bar = Progress::with_sink(6, &mut out).unwrap();
            let mut iter = bar.iter();
            while let Some(i) = iter.next() {
                seen.push(i);
                if i == 2 {
                    let progress = iter.progress();
                    progress.keep().unwrap();
                    progress.update(2);
                }
            }
            assert_eq!(iter.progress().get_pos(), 6);
        }

        assert_eq!(seen, [0, 1, 2, 4]);
        let text = String::from_utf8(out).unwrap();
        assert!(
            text.contains(" 2 / 6   33%\r\n Progress : "),
            "unexpected output {text:?}"
        );
        assert!(!text.contains(" 3 / 6 "), "unexpected output {text:?}");
        assert!(text.ends_with(" 6 / 6  100%\r\n"), "unexpected output {text:?}");
    }

    /// Early Exit
    /// Breaking out skips the pending advance; finalization still runs once.
    #[test]
    fn test_break_finalizes_once() {
        let mut out = Vec::new();
        {
            let mut bar = Progress::with_sink(10, &mut out).unwrap();
            for i in &mut bar {
                if i == 3 {
                    break;
                }
            }
            assert_eq!(bar.get_pos(), 3);
        }

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with(" 3 / 10   30%\r\n"), "unexpected output {text:?}");
        assert_eq!(text.matches('\n').count(), 1);
    }

    /// Error Propagation
    /// Leaving the loop with `?` still finalizes the tracker.
    #[test]
    fn test_error_exit_finalizes() {
        fn run(out: &mut Vec<u8>) -> Result<(), &'static str> {
            let mut bar = ProgressBuilder::new(10)
                .timed(true)
                .build(out)
                .map_err(|_| "build")?;
            for i in &mut bar {
                if i == 5 {
                    return Err("stop");
                }
            }
            Ok(())
        }

        let mut out = Vec::new();
        assert_eq!(run(&mut out), Err("stop"));

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(" took ").count(), 1);
        assert!(text.contains("\r\nProgress took "), "unexpected output {text:?}");
        assert!(text.ends_with(" seconds.\n"));
    }

    /// Iterator Comparison
    /// Only live-versus-end has a meaning.
    #[test]
    fn test_invalid_comparisons() {
        let mut a = Progress::with_sink(3, Vec::new()).unwrap();
        let mut b = Progress::with_sink(3, Vec::new()).unwrap();
        let live_a = a.begin();
        let live_b = b.begin();
        let end = Cursor::<Vec<u8>>::end();

        assert!(matches!(
            end.has_more(&Cursor::end()),
            Err(Error::InvalidIteratorComparison)
        ));
        assert!(matches!(
            end.has_more(&live_a),
            Err(Error::InvalidIteratorComparison)
        ));
        assert!(matches!(
            live_a.has_more(&live_b),
            Err(Error::InvalidIteratorComparison)
        ));
        assert!(live_a.has_more(&end).unwrap());
    }

    /// End Marker
    /// Advancing the end marker is a no-op and it carries no value.
    #[test]
    fn test_end_marker() {
        let mut end = Cursor::<Vec<u8>>::end();
        assert!(end.is_done());
        assert_eq!(end.value(), None);
        assert!(end.progress().is_none());
        assert!(end.advance().unwrap().is_done());
    }

    /// Broken Sink
    /// Redraw failures do not stop the loop or the counting.
    #[test]
    fn test_broken_sink_keeps_counting() {
        let mut bar = Progress::with_sink(4, Broken).unwrap();
        assert_eq!(bar.iter().count(), 4);
        assert_eq!(bar.get_pos(), 4);

        assert!(matches!(bar.push(), Err(Error::Io(_))));
        assert!(bar.finish().is_err());
    }
}
