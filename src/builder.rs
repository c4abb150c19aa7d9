//! Fluent interface for constructing [`Progress`] instances.
//!
//! [`Progress::new`] and [`Progress::with_sink`] cover the common cases. The
//! [`ProgressBuilder`] collects the full configuration first and validates it in one
//! place, so a tracker never starts with a zero total, zero ticks, a zero step or a
//! malformed style.
//!
//! # Time Travel
//!
//! The start time defaults to the moment [`build`](ProgressBuilder::build) is called.
//! [`with_start_time`](ProgressBuilder::with_start_time) moves it, which is useful
//! when setup work before the loop should count towards the elapsed time.

use std::io::{self, Stdout, Write};

use compact_str::CompactString;
use tracing::debug;
use web_time::Instant;

use crate::{
    error::{Error, Result},
    progress::Progress,
    style::BarStyle,
};

const DEFAULT_NAME: &str = "Progress";
const DEFAULT_STYLE: &str = "[# ]";
const DEFAULT_WIDTH: usize = 20;

/// A builder pattern for constructing [`Progress`] instances.
///
/// ```
/// use loop_progress::ProgressBuilder;
///
/// let mut out = Vec::new();
/// let bar = ProgressBuilder::new(1000)
///     .name("numbers?")
///     .length(50)
///     .style("|= |")
///     .update(5)
///     .show_bar(false)
///     .build(&mut out)?;
/// assert_eq!(bar.get_total(), 1000);
/// # Ok::<(), loop_progress::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ProgressBuilder {
    total: u64,
    /// Defaults to `total` when unset.
    ticks: Option<u64>,
    step: u64,
    show_bar: bool,
    bar_width: usize,
    style: CompactString,
    name: CompactString,
    timed: bool,
    start: Option<Instant>,
}

impl ProgressBuilder {
    /// Starts building a tracker counting up to `total`.
    #[must_use]
    pub fn new(total: u64) -> Self {
        Self {
            total,
            ticks: None,
            step: 1,
            show_bar: true,
            bar_width: DEFAULT_WIDTH,
            style: CompactString::const_new(DEFAULT_STYLE),
            name: CompactString::const_new(DEFAULT_NAME),
            timed: false,
            start: None,
        }
    }

    /// Sets how many times the line is drawn over the full run.
    #[must_use]
    pub const fn ticks(mut self, ticks: u64) -> Self {
        self.ticks = Some(ticks);
        self
    }

    /// Sets how much each advance adds to the position.
    #[must_use]
    pub const fn update(mut self, step: u64) -> Self {
        self.step = step;
        self
    }

    /// Shows or hides the bar segment.
    #[must_use]
    pub const fn show_bar(mut self, show: bool) -> Self {
        self.show_bar = show;
        self
    }

    /// Sets the bar width in glyphs.
    #[must_use]
    pub const fn length(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    /// Sets the bar glyphs as a four-character string, e.g. `"[# ]"`.
    ///
    /// Checked when the tracker is built.
    #[must_use]
    pub fn style(mut self, style: impl Into<CompactString>) -> Self {
        self.style = style.into();
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn name(mut self, name: impl Into<CompactString>) -> Self {
        self.name = name.into();
        self
    }

    /// Enables the elapsed/estimated time suffix and the closing summary line.
    #[must_use]
    pub const fn timed(mut self, timed: bool) -> Self {
        self.timed = timed;
        self
    }

    /// Sets the start time explicitly.
    #[must_use]
    pub const fn with_start_time(mut self, start: Instant) -> Self {
        self.start = Some(start);
        self
    }

    /// Consumes the builder and returns a tracker writing to `sink`.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroTotal`], [`Error::ZeroTicks`] or [`Error::ZeroStep`] for a
    ///   zero total, tick count or step.
    /// * [`Error::InvalidStyle`] if the style is not exactly four glyphs.
    pub fn build<W: Write>(self, sink: W) -> Result<Progress<W>> {
        if self.total == 0 {
            return Err(Error::ZeroTotal);
        }
        let ticks = self.ticks.unwrap_or(self.total);
        if ticks == 0 {
            return Err(Error::ZeroTicks);
        }
        if self.step == 0 {
            return Err(Error::ZeroStep);
        }
        let style: BarStyle = self.style.parse()?;

        debug!(
            name = %self.name,
            total = self.total,
            ticks,
            step = self.step,
            timed = self.timed,
            "progress created"
        );

        Ok(Progress {
            sink,
            total: self.total,
            position: 0,
            step: self.step,
            ticks,
            // Tick 0 is an empty bar; the first line is drawn at tick 1.
            next_tick: 1,
            show_bar: self.show_bar,
            bar_width: self.bar_width,
            style,
            name: self.name,
            timed: self.timed,
            start: self.start.unwrap_or_else(Instant::now),
            finalized: false,
        })
    }

    /// Consumes the builder and returns a tracker writing to standard output.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_stdout(self) -> Result<Progress<Stdout>> {
        self.build(io::stdout())
    }
}
