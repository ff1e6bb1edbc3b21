//! Half-open codepoint ranges.
//!
//! A [`Range`] addresses `[pos, end)` in a text measured in `char`s, never in
//! bytes. `pos == end` is a zero-width insertion point.

use std::fmt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
  pub pos: usize,
  pub end: usize,
}

impl Range {
  #[must_use]
  pub const fn new(pos: usize, end: usize) -> Self {
    Self { pos, end }
  }

  /// Zero-width range at `pos`.
  #[must_use]
  pub const fn point(pos: usize) -> Self {
    Self::new(pos, pos)
  }

  /// Number of codepoints covered. Inverted ranges cover nothing.
  #[inline]
  pub fn len(&self) -> usize {
    self.end.saturating_sub(self.pos)
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl From<std::ops::Range<usize>> for Range {
  fn from(range: std::ops::Range<usize>) -> Self {
    Self::new(range.start, range.end)
  }
}

impl fmt::Display for Range {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}..{}", self.pos, self.end)
  }
}

/// Whether `range` addresses codepoints that exist in a text of `len` chars.
///
/// Zero-width ranges are valid anywhere in `0..=len`, including `0..0` on an
/// empty text.
#[inline]
pub fn is_valid_range(range: Range, len: usize) -> bool {
  range.pos <= range.end && range.end <= len
}
