//! # `loop_progress`
//!
//! A single-line progress bar that drives a counting loop.
//!
//! A [`Progress`] counts from zero towards a total. Iterating it runs the loop body
//! once per step and redraws one status line in place with a carriage return:
//!
//! ```text
//!  Progress : [##########          ] 500 / 1000   50%
//! ```
//!
//! It is designed to be:
//!
//! * **Throttled**: the line is redrawn a fixed number of times (`ticks`) over the
//!   run, independent of how many iterations the loop has.
//! * **Scoped**: the last line is kept and, for timed trackers, a summary printed
//!   when the tracker goes out of scope, on every exit path.
//! * **Sink-agnostic**: output goes to any [`std::io::Write`], standard output by default.
//!
//! Single-threaded, single-line only. Glyph widths are not measured.
//!
//! ## Example
//!
//! ```
//! use loop_progress::ProgressBuilder;
//!
//! let mut out = Vec::new();
//! {
//!     let mut bar = ProgressBuilder::new(1000)
//!         .ticks(100)
//!         .name("copying")
//!         .build(&mut out)?;
//!     for _i in &mut bar {
//!         // the program...
//!     }
//! }
//! let out = String::from_utf8(out).unwrap();
//! assert_eq!(out.matches('\r').count(), 100);
//! # Ok::<(), loop_progress::Error>(())
//! ```
//!
//! ## Modules
//!
//! * [`builder`]: Validated construction of [`Progress`] instances.
//! * [`error`]: The crate's [`Error`] type.
//! * [`iter`]: The [`Cursor`] protocol and the [`Iterator`] built on it.
//! * [`progress`]: The [`Progress`] tracker, throttling and snapshots.
//! * [`style`]: Bar glyphs.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod builder;
pub mod error;
pub mod iter;
pub mod progress;
mod render;
pub mod style;

pub use builder::ProgressBuilder;
pub use error::{Error, Result};
pub use iter::{Cursor, ProgressIter};
pub use progress::{Progress, ProgressSnapshot};
pub use style::BarStyle;
