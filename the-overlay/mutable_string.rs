//! Deferred, batched editing of a text value.
//!
//! A [`MutableString`] owns a text and a list of pending [`Overlay`]s. Edits
//! are queued without touching the text and land together on
//! [`MutableString::commit`]:
//!
//! ```ignore
//! use the_overlay::{mutable_string::MutableString, range::Range};
//!
//! let mut text = MutableString::new("hello world");
//! text.replace_range(Range::new(0, 5), "hi")?; // "hello" -> "hi"
//! text.insert(5, " there")?;                   // between "hello" and " world"
//! text.append("!");
//! text.commit()?;
//! assert_eq!(text.to_string(), "hi there world!");
//! ```
//!
//! # Validation
//!
//! Every queued edit is checked against the *current* text, the one that was
//! last committed. Two edits of the same batch never see each other, so all
//! offsets of a batch refer to the same text.
//!
//! # Commit
//!
//! Overlays are ordered by start position (ties keep queue order) and spliced
//! into the text in a single pass. Abutting overlays are fine, overlapping
//! ones reject the whole batch:
//!
//! - **InvalidRange** - Queued range is inverted or past the end of the text
//! - **Overlap** - Two overlays of the batch cover the same codepoints
//!
//! A rejected commit leaves both the text and the pending overlays exactly as
//! they were.

use std::fmt;

use ropey::{
  Rope,
  RopeBuilder,
};
use thiserror::Error;

use crate::{
  Tendril,
  config::MutableStringConfig,
  overlay::Overlay,
  range::{
    Range,
    is_valid_range,
  },
};

pub type Result<T> = std::result::Result<T, EditError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum EditError {
  #[error("invalid or out of bounds range {pos}..{end} for text length {len}")]
  InvalidRange { pos: usize, end: usize, len: usize },
  #[error("overlay range {pos}..{end} overlaps previous end {prev_end}")]
  Overlap {
    prev_end: usize,
    pos:      usize,
    end:      usize,
  },
}

#[derive(Debug, Clone)]
pub struct MutableString {
  text:     Rope,
  /// Queue order, not position order.
  overlays: Vec<Overlay>,
  config:   MutableStringConfig,
}

impl MutableString {
  pub fn new(text: impl Into<Rope>) -> Self {
    Self::with_config(text, MutableStringConfig::default())
  }

  pub fn with_config(text: impl Into<Rope>, config: MutableStringConfig) -> Self {
    Self {
      text: text.into(),
      overlays: reserved_overlays(config.overlay_capacity),
      config,
    }
  }

  /// The last committed text. Pending overlays are not reflected.
  pub fn text(&self) -> &Rope {
    &self.text
  }

  pub fn into_text(self) -> Rope {
    self.text
  }

  /// Length of the committed text in codepoints.
  pub fn len_chars(&self) -> usize {
    self.text.len_chars()
  }

  /// Pending overlays in the order they were queued.
  pub fn pending(&self) -> &[Overlay] {
    &self.overlays
  }

  pub fn has_pending(&self) -> bool {
    !self.overlays.is_empty()
  }

  pub fn config(&self) -> &MutableStringConfig {
    &self.config
  }

  /// Queue a replacement of `range` with `text`.
  pub fn replace_range(&mut self, range: Range, text: impl Into<Tendril>) -> Result<()> {
    self.ensure_valid(range)?;
    self.queue(range, text.into());
    Ok(())
  }

  /// Queue an insertion of `text` before the codepoint at `pos`.
  pub fn insert(&mut self, pos: usize, text: impl Into<Tendril>) -> Result<()> {
    self.replace_range(Range::point(pos), text)
  }

  /// Queue an insertion at the end of the committed text.
  ///
  /// Returns `()` rather than a `Result`: the end of the text is always a
  /// valid insertion point.
  pub fn append(&mut self, text: impl Into<Tendril>) {
    let end = self.text.len_chars();
    self.queue(Range::point(end), text.into());
  }

  /// Queue a deletion of `range`.
  pub fn delete_range(&mut self, range: Range) -> Result<()> {
    self.ensure_valid(range)?;
    self.queue(range, Tendril::new());
    Ok(())
  }

  /// Apply all pending overlays at once.
  ///
  /// On success the text is replaced and the pending list is emptied. On
  /// [`EditError::Overlap`] nothing changes.
  pub fn commit(&mut self) -> Result<()> {
    if self.overlays.is_empty() {
      return Ok(());
    }

    let text = splice(&self.text, &self.overlays).inspect_err(|err| {
      tracing::debug!(%err, overlays = self.overlays.len(), "rejected overlay commit");
    })?;

    tracing::debug!(
      overlays = self.overlays.len(),
      len_before = self.text.len_chars(),
      len_after = text.len_chars(),
      "committed overlays"
    );

    self.text = text;
    self.reset_overlays();
    Ok(())
  }

  /// The text [`commit`](Self::commit) would produce, without committing.
  pub fn preview(&self) -> Result<Rope> {
    splice(&self.text, &self.overlays)
  }

  /// Drop every pending overlay. The committed text is left alone.
  pub fn discard(&mut self) {
    if !self.has_pending() {
      return;
    }
    tracing::trace!(overlays = self.overlays.len(), "discarding pending overlays");
    self.reset_overlays();
  }

  fn ensure_valid(&self, range: Range) -> Result<()> {
    let len = self.text.len_chars();
    if !is_valid_range(range, len) {
      return Err(EditError::InvalidRange {
        pos: range.pos,
        end: range.end,
        len,
      });
    }
    Ok(())
  }

  fn queue(&mut self, span: Range, text: Tendril) {
    tracing::trace!(%span, text = %text, "queued overlay");
    self.overlays.push(Overlay::new(span, text));
  }

  fn reset_overlays(&mut self) {
    self.overlays.clear();
    self.overlays.shrink_to(self.config.overlay_capacity);
  }
}

/// Preallocate overlay storage. The capacity is only a hint, so a failed
/// reservation leaves the list unallocated.
fn reserved_overlays(capacity: usize) -> Vec<Overlay> {
  let mut overlays = Vec::new();
  if let Err(err) = overlays.try_reserve(capacity) {
    tracing::debug!(%err, capacity, "skipping overlay preallocation");
  }
  overlays
}

impl Default for MutableString {
  fn default() -> Self {
    Self::new(Rope::new())
  }
}

impl From<&str> for MutableString {
  fn from(text: &str) -> Self {
    Self::new(text)
  }
}

impl From<String> for MutableString {
  fn from(text: String) -> Self {
    Self::new(text)
  }
}

impl From<Rope> for MutableString {
  fn from(text: Rope) -> Self {
    Self::new(text)
  }
}

impl fmt::Display for MutableString {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.text, f)
  }
}

/// Splice `overlays` into `text` in one left-to-right pass.
///
/// Every span must already be valid for `text`.
fn splice(text: &Rope, overlays: &[Overlay]) -> Result<Rope> {
  if overlays.is_empty() {
    return Ok(text.clone());
  }

  // Sort references so a rejected batch keeps its queue order.
  let mut sorted: Vec<&Overlay> = overlays.iter().collect();
  sorted.sort_by_key(|overlay| overlay.span().pos);

  let mut builder = RopeBuilder::new();

  let append_slice = |from: usize, to: usize, builder: &mut RopeBuilder| {
    if from >= to {
      return;
    }
    for chunk in text.slice(from..to).chunks() {
      builder.append(chunk);
    }
  };

  // Codepoint offset into `text`, equal to the previous overlay's end.
  let mut cursor = 0;
  for overlay in sorted {
    let span = overlay.span();
    debug_assert!(is_valid_range(span, text.len_chars()));
    if span.pos < cursor {
      return Err(EditError::Overlap {
        prev_end: cursor,
        pos:      span.pos,
        end:      span.end,
      });
    }

    append_slice(cursor, span.pos, &mut builder);
    if !overlay.text().is_empty() {
      builder.append(overlay.text());
    }
    cursor = span.end;
  }

  append_slice(cursor, text.len_chars(), &mut builder);

  Ok(builder.finish())
}
