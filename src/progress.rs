//! The progress tracker and its snapshot.
//!
//! [`Progress`] owns the counters, the display configuration and the sink it writes
//! to. Each [`push`](Progress::push) advances the counter by the configured step and
//! decides whether the line needs to be redrawn.
//!
//! # Throttling
//!
//! A run is divided into `ticks` refresh units. The current tick is
//! `floor(position * ticks / total)`, computed exactly in 128-bit integers, and the
//! line is only written when that tick reaches the next unrendered one. With
//! `total = 1000` and `ticks = 100` the line is redrawn at positions 10, 20, ...,
//! 1000: exactly 100 writes, however many times the loop body runs.
//!
//! # Finalization
//!
//! The last drawn line is kept by writing a newline when the tracker goes out of
//! scope (or on [`finish`](Progress::finish)), on every exit path of the loop that
//! owns it. Timed trackers also print how long the run took.

use std::{
    fmt,
    io::{Stdout, Write},
    time::Duration,
};

use compact_str::CompactString;
use tracing::{debug, trace, warn};
use web_time::Instant;

use crate::{
    builder::ProgressBuilder,
    error::Result,
    iter::{Cursor, ProgressIter},
    render::{Line, Summary},
    style::BarStyle,
};

/// A single-line progress indicator driving a counting loop.
///
/// The sink is any [`Write`] implementation. Pass `&mut sink` to keep ownership of
/// it on the caller's side; the tracker never closes it.
///
/// # Example
///
/// ```
/// use loop_progress::Progress;
///
/// let mut out = Vec::new();
/// {
///     let mut bar = Progress::with_sink(40, &mut out)?;
///     for _ in bar.name("fetch").ticks(4).length(8) {}
/// }
/// let out = String::from_utf8(out).unwrap();
/// assert!(out.ends_with(" fetch : [########] 40 / 40  100%\r\n"));
/// # Ok::<(), loop_progress::Error>(())
/// ```
pub struct Progress<W: Write = Stdout> {
    pub(crate) sink: W,

    pub(crate) total: u64,
    pub(crate) position: u64,
    pub(crate) step: u64,

    pub(crate) ticks: u64,
    /// Smallest tick that still has to be drawn.
    pub(crate) next_tick: u64,

    pub(crate) show_bar: bool,
    pub(crate) bar_width: usize,
    pub(crate) style: BarStyle,
    pub(crate) name: CompactString,

    pub(crate) timed: bool,
    pub(crate) start: Instant,

    pub(crate) finalized: bool,
}

impl Progress<Stdout> {
    /// Creates a tracker over `total` units that writes to standard output and
    /// redraws on every unit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroTotal`](crate::Error::ZeroTotal) if `total` is zero.
    pub fn new(total: u64) -> Result<Self> {
        ProgressBuilder::new(total).build_stdout()
    }

    /// Creates a tracker over `total` units, writing to standard output, that
    /// redraws `ticks` times over the whole run.
    ///
    /// # Errors
    ///
    /// Returns an error if `total` or `ticks` is zero.
    pub fn with_ticks(total: u64, ticks: u64) -> Result<Self> {
        ProgressBuilder::new(total).ticks(ticks).build_stdout()
    }
}

impl<W: Write> Progress<W> {
    /// Creates a tracker over `total` units that writes to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroTotal`](crate::Error::ZeroTotal) if `total` is zero.
    pub fn with_sink(total: u64, sink: W) -> Result<Self> {
        ProgressBuilder::new(total).build(sink)
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Sets how many times the line is drawn over the full run.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` is zero.
    pub fn ticks(&mut self, ticks: u64) -> &mut Self {
        assert!(ticks > 0, "ticks must be greater than zero");
        self.ticks = ticks;
        self
    }

    /// Sets how much each advance adds to the position. Defaults to 1.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn update(&mut self, step: u64) -> &mut Self {
        assert!(step > 0, "update step must be greater than zero");
        self.step = step;
        self
    }

    /// Shows or hides the bar segment. Shown by default.
    pub fn show_bar(&mut self, show: bool) -> &mut Self {
        self.show_bar = show;
        self
    }

    /// Sets the width of the bar segment in glyphs. Defaults to 20.
    pub fn length(&mut self, width: usize) -> &mut Self {
        self.bar_width = width;
        self
    }

    /// Sets the bar glyphs.
    pub fn style(&mut self, style: BarStyle) -> &mut Self {
        self.style = style;
        self
    }

    /// Sets the label printed at the start of the line.
    pub fn name(&mut self, name: impl Into<CompactString>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Enables the elapsed/estimated time suffix and the closing summary line.
    pub fn timed(&mut self, timed: bool) -> &mut Self {
        self.timed = timed;
        self
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Gets the current position.
    #[must_use]
    pub const fn get_pos(&self) -> u64 {
        self.position
    }

    /// Gets the total the position counts towards.
    #[must_use]
    pub const fn get_total(&self) -> u64 {
        self.total
    }

    /// Gets the label.
    #[must_use]
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Time since the tracker was created (or since the configured start time).
    #[must_use]
    pub fn get_elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Whether the loop should keep going, i.e. the position is still below the total.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.position < self.total
    }

    /// Whether the position has reached the total.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        !self.has_more()
    }

    /// Creates an owned snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::new(
            self.name.clone(),
            self.position,
            self.total,
            self.ticks,
            self.get_elapsed(),
        )
    }

    // ========================================================================
    // Driving
    // ========================================================================

    /// Advances the position by the update step and redraws the line if a new tick
    /// was reached.
    ///
    /// The position is advanced even if writing fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the sink rejects the write or flush.
    pub fn push(&mut self) -> Result<()> {
        self.position = self.position.saturating_add(self.step);

        let tick = tick_at(self.position, self.ticks, self.total);
        if tick < self.next_tick {
            return Ok(());
        }
        self.next_tick = tick.saturating_add(1);

        self.render()
    }

    fn render(&mut self) -> Result<()> {
        let snapshot = self.snapshot();
        trace!(tick = snapshot.tick(), position = self.position, "drawing progress line");

        let line = Line {
            snapshot: &snapshot,
            bar: self.show_bar.then_some((self.style, self.bar_width)),
            timed: self.timed,
        };
        write!(self.sink, "{line}\r")?;
        self.sink.flush()?;
        Ok(())
    }

    /// Keeps the last drawn line by moving to a new one.
    ///
    /// Useful before printing other output mid-run. Finalization writes its own
    /// newline regardless.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the sink rejects the write or flush.
    pub fn keep(&mut self) -> Result<()> {
        writeln!(self.sink)?;
        self.sink.flush()?;
        Ok(())
    }

    /// Finalizes the tracker now instead of when it is dropped, reporting write errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the sink rejects the final lines.
    pub fn finish(mut self) -> Result<()> {
        self.finalize()
    }

    /// Runs at most once per tracker.
    fn finalize(&mut self) -> Result<()> {
        if self.finalized {
            return Ok(());
        }
        self.finalized = true;
        debug!(name = %self.name, position = self.position, total = self.total, "progress finished");

        self.keep()?;
        if self.timed {
            let summary = Summary {
                name: &self.name,
                elapsed: self.get_elapsed(),
            };
            writeln!(self.sink, "{summary}")?;
            self.sink.flush()?;
        }
        Ok(())
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns a live cursor over the position.
    ///
    /// Compare it against [`Cursor::end`] to drive a loop by hand; most callers want
    /// [`iter`](Self::iter) or `for i in &mut progress` instead.
    #[must_use]
    pub fn begin(&mut self) -> Cursor<'_, W> {
        Cursor::Active(self)
    }

    /// Returns an iterator yielding the position before each loop body.
    pub fn iter(&mut self) -> ProgressIter<'_, W> {
        ProgressIter::new(self)
    }
}

impl<W: Write> Drop for Progress<W> {
    fn drop(&mut self) {
        if let Err(err) = self.finalize() {
            warn!(error = %err, "failed to finalize progress line");
        }
    }
}

impl<W: Write> fmt::Debug for Progress<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The sink is left out; most writers don't implement Debug.
        f.debug_struct("Progress")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("total", &self.total)
            .field("step", &self.step)
            .field("ticks", &self.ticks)
            .field("timed", &self.timed)
            .finish_non_exhaustive()
    }
}

/// `floor(position * ticks / total)` without intermediate rounding.
pub(crate) fn tick_at(position: u64, ticks: u64, total: u64) -> u64 {
    scale(position, ticks, total)
}

/// `floor(value * numerator / denominator)` in 128-bit arithmetic, saturating.
fn scale(value: u64, numerator: u64, denominator: u64) -> u64 {
    let scaled = u128::from(value) * u128::from(numerator) / u128::from(denominator.max(1));
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// A plain-data view of a [`Progress`] at one instant.
///
/// Holds everything the status line is drawn from, without the sink.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressSnapshot {
    name: CompactString,

    position: u64,
    total: u64,

    tick: u64,
    ticks: u64,

    elapsed: Duration,
}

impl ProgressSnapshot {
    pub(crate) fn new(
        name: impl Into<CompactString>,
        position: u64,
        total: u64,
        ticks: u64,
        elapsed: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            total,
            tick: tick_at(position, ticks, total),
            ticks,
            elapsed,
        }
    }

    /// Returns the label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the position.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Returns the total.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns the tick the position falls into.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Returns the number of ticks in a full run.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns the time elapsed since the start.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether the position is still below the total.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.position < self.total
    }

    /// Completed percentage at tick resolution, rounded down.
    ///
    /// Not clamped: a step that overshoots the total reports more than 100.
    #[must_use]
    pub fn percent(&self) -> u64 {
        scale(self.tick, 100, self.ticks)
    }

    /// Number of completed glyphs in a bar of `width` glyphs, at most `width`.
    #[must_use]
    pub fn filled(&self, width: usize) -> usize {
        let width_u64 = u64::try_from(width).unwrap_or(u64::MAX);
        let filled = scale(self.tick, width_u64, self.ticks);
        usize::try_from(filled).map_or(width, |filled| filled.min(width))
    }

    /// Projected duration of the full run, assuming the average rate so far holds.
    ///
    /// Returns `None` before the first advance.
    #[must_use]
    pub fn estimated_total(&self) -> Option<Duration> {
        if self.position == 0 {
            return None;
        }

        let nanos = self
            .elapsed
            .as_nanos()
            .saturating_mul(u128::from(self.total))
            / u128::from(self.position);
        Some(Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX)))
    }
}
