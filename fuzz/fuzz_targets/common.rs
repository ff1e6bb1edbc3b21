use ropey::Rope;
use the_overlay::range::Range;

const MAX_INITIAL_BYTES: usize = 8 * 1024;
const MAX_OPS: usize = 128;
const MAX_INSERT_BYTES: usize = 256;

#[derive(Debug, Clone)]
pub struct EditOp {
  pub anchor: u16,
  pub delete: u16,
  pub insert: String,
}

pub struct Scenario {
  pub initial: String,
  pub ops:     Vec<EditOp>,
}

impl EditOp {
  /// Clamp the raw op into a range that is valid for a text of `len` chars.
  pub fn span(&self, len: usize) -> Range {
    let pos = (self.anchor as usize) % (len + 1);
    let max_delete = len - pos;
    let delete = (self.delete as usize) % (max_delete + 1);
    Range::new(pos, pos + delete)
  }
}

/// Apply the edits back to front, one at a time. `None` when two spans overlap.
pub fn reference_commit(text: &Rope, edits: &[(Range, &str)]) -> Option<Rope> {
  let mut sorted: Vec<_> = edits.iter().collect();
  sorted.sort_by_key(|(span, _)| span.pos);
  if sorted.windows(2).any(|pair| pair[1].0.pos < pair[0].0.end) {
    return None;
  }

  let mut text = text.clone();
  for (span, insert) in sorted.into_iter().rev() {
    text.remove(span.pos..span.end);
    text.insert(span.pos, insert);
  }
  Some(text)
}

pub fn decode_scenario(data: &[u8]) -> Scenario {
  let mut cursor = ByteCursor::new(data);
  let initial_len = cursor.next_usize(MAX_INITIAL_BYTES);
  let initial = lossy_text(cursor.next_bytes(initial_len));
  let op_count = cursor.next_usize(MAX_OPS);
  let mut ops = Vec::with_capacity(op_count);
  for _ in 0..op_count {
    let anchor = cursor.next_u16();
    let delete = cursor.next_u16();
    let insert_len = cursor.next_usize(MAX_INSERT_BYTES);
    let insert = lossy_text(cursor.next_bytes(insert_len));
    ops.push(EditOp {
      anchor,
      delete,
      insert,
    });
  }

  Scenario { initial, ops }
}

fn lossy_text(bytes: &[u8]) -> String {
  String::from_utf8_lossy(bytes).into_owned()
}

struct ByteCursor<'a> {
  data: &'a [u8],
  pos:  usize,
}

impl<'a> ByteCursor<'a> {
  fn new(data: &'a [u8]) -> Self {
    Self { data, pos: 0 }
  }

  fn next_u8(&mut self) -> u8 {
    let value = self.data.get(self.pos).copied().unwrap_or(0);
    self.pos = self.pos.saturating_add(1);
    value
  }

  fn next_u16(&mut self) -> u16 {
    let lo = self.next_u8() as u16;
    let hi = self.next_u8() as u16;
    lo | (hi << 8)
  }

  fn next_usize(&mut self, max: usize) -> usize {
    if max == 0 {
      return 0;
    }
    (self.next_u16() as usize) % (max + 1)
  }

  fn next_bytes(&mut self, len: usize) -> &'a [u8] {
    let start = self.pos.min(self.data.len());
    let end = start.saturating_add(len).min(self.data.len());
    self.pos = end;
    &self.data[start..end]
  }
}
