//! Error types for progress construction, iteration and rendering.

use thiserror::Error;

/// Result type alias for progress operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`Progress`](crate::Progress) and its adapters.
///
/// Degenerate configuration is rejected up front instead of producing
/// garbage percentages or out-of-range bar writes later on.
#[derive(Debug, Error)]
pub enum Error {
    /// A cursor comparison other than "live cursor against end cursor".
    #[error("invalid iterator comparison")]
    InvalidIteratorComparison,

    /// The total must be at least 1.
    #[error("total must be greater than zero")]
    ZeroTotal,

    /// The number of refresh ticks must be at least 1.
    #[error("ticks must be greater than zero")]
    ZeroTicks,

    /// The per-advance increment must be at least 1.
    #[error("update step must be greater than zero")]
    ZeroStep,

    /// A bar style needs exactly four glyphs: open, filled, empty, close.
    #[error("bar style needs exactly 4 glyphs, got {len}")]
    InvalidStyle {
        /// Number of glyphs that were supplied.
        len: usize,
    },

    /// Writing to the sink failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
