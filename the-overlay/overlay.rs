use crate::{
  Tendril,
  range::Range,
};

/// A pending edit: replace the codepoints in `span` with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
  span: Range,
  text: Tendril,
}

impl Overlay {
  pub fn new(span: Range, text: impl Into<Tendril>) -> Self {
    Self {
      span,
      text: text.into(),
    }
  }

  pub fn span(&self) -> Range {
    self.span
  }

  /// Replacement text.
  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn is_insertion(&self) -> bool {
    self.span.is_empty()
  }

  pub fn is_deletion(&self) -> bool {
    self.text.is_empty() && !self.span.is_empty()
  }
}
