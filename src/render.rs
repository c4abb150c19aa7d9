//! Formatting of the status line.
//!
//! A rendered line looks like
//!
//! ```text
//!  <name> : [<bar>] <position> / <total> <pct>% Elapsed: <m>m:<s>s ET: <m>m:<s>s
//! ```
//!
//! where the bar is only present when enabled and the timing suffix only when the
//! tracker is timed. The caller appends the carriage return.

use std::{fmt, time::Duration};

use crate::{progress::ProgressSnapshot, style::BarStyle};

/// One status line, ready to be written with `{}`.
pub(crate) struct Line<'a> {
    pub(crate) snapshot: &'a ProgressSnapshot,
    /// Style and width of the bar segment, `None` when the bar is hidden.
    pub(crate) bar: Option<(BarStyle, usize)>,
    pub(crate) timed: bool,
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot;

        write!(f, " {} : ", snapshot.name())?;
        if let Some((style, width)) = self.bar {
            style.write_bar(f, snapshot.filled(width), width)?;
        }
        write!(
            f,
            " {} / {} {:>4}%",
            snapshot.position(),
            snapshot.total(),
            snapshot.percent()
        )?;

        if self.timed {
            write!(f, " Elapsed: {}", Clock(snapshot.elapsed()))?;
            // Only reachable before the first advance, which never renders.
            if let Some(estimate) = snapshot.estimated_total() {
                write!(f, " ET: {}", Clock(estimate))?;
            }
        }
        Ok(())
    }
}

/// A duration printed as `<minutes>m:<seconds>s`.
pub(crate) struct Clock(pub(crate) Duration);

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        write!(f, "{}m:{}s", secs / 60, secs % 60)
    }
}

/// The closing line of a timed tracker.
pub(crate) struct Summary<'a> {
    pub(crate) name: &'a str,
    pub(crate) elapsed: Duration,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} took {} seconds.", self.name, self.elapsed.as_secs())
    }
}
