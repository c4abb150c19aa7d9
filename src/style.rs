//! Glyphs used to draw the bar segment.
//!
//! A style is written as a four-character string: the opening glyph, the glyph for
//! the completed part, the glyph for the remaining part and the closing glyph. The
//! default `"[# ]"` draws `[#####     ]`.
//!
//! Glyphs are counted as `char`s. Display width is not taken into account, so wide
//! or combining characters will misalign the line.

use std::{fmt, str::FromStr};

use crate::error::Error;

/// The four glyphs of a progress bar.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BarStyle {
    open: char,
    filled: char,
    empty: char,
    close: char,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self::new('[', '#', ' ', ']')
    }
}

impl BarStyle {
    /// Creates a style from its four glyphs.
    #[must_use]
    pub const fn new(open: char, filled: char, empty: char, close: char) -> Self {
        Self {
            open,
            filled,
            empty,
            close,
        }
    }

    /// Glyph written before the bar.
    #[must_use]
    pub const fn open(&self) -> char {
        self.open
    }

    /// Glyph for the completed part of the bar.
    #[must_use]
    pub const fn filled(&self) -> char {
        self.filled
    }

    /// Glyph for the remaining part of the bar.
    #[must_use]
    pub const fn empty(&self) -> char {
        self.empty
    }

    /// Glyph written after the bar.
    #[must_use]
    pub const fn close(&self) -> char {
        self.close
    }

    /// Writes a bar of `width` glyphs with the first `filled` of them completed.
    ///
    /// `filled` is clamped to `width`.
    pub(crate) fn write_bar(
        &self,
        f: &mut impl fmt::Write,
        filled: usize,
        width: usize,
    ) -> fmt::Result {
        let filled = filled.min(width);

        f.write_char(self.open)?;
        for _ in 0..filled {
            f.write_char(self.filled)?;
        }
        for _ in filled..width {
            f.write_char(self.empty)?;
        }
        f.write_char(self.close)
    }
}

impl FromStr for BarStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().collect::<Vec<_>>().as_slice() {
            &[open, filled, empty, close] => Ok(Self::new(open, filled, empty, close)),
            glyphs => Err(Error::InvalidStyle { len: glyphs.len() }),
        }
    }
}

impl TryFrom<&str> for BarStyle {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for BarStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.open, self.filled, self.empty, self.close)
    }
}
