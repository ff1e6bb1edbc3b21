#![no_main]

mod common;

use libfuzzer_sys::fuzz_target;
use the_overlay::mutable_string::{
  EditError,
  MutableString,
};

use crate::common::{
  decode_scenario,
  reference_commit,
};

fuzz_target!(|data: &[u8]| {
  let scenario = decode_scenario(data);
  let mut ms = MutableString::new(scenario.initial.as_str());
  let original = ms.text().clone();
  let len = ms.len_chars();

  let edits: Vec<_> = scenario
    .ops
    .iter()
    .map(|op| (op.span(len), op.insert.as_str()))
    .collect();
  for (span, insert) in &edits {
    ms.replace_range(*span, *insert)
      .expect("clamped span must be valid");
  }
  let pending = ms.pending().to_vec();

  let preview = ms.preview();
  match (ms.commit(), reference_commit(&original, &edits)) {
    (Ok(()), Some(expected)) => {
      assert_eq!(ms.text(), &expected);
      assert_eq!(preview.ok().as_ref(), Some(&expected));
      assert!(!ms.has_pending());
      // Clean state commits are no-ops.
      ms.commit().unwrap();
      assert_eq!(ms.text(), &expected);
    },
    (Err(EditError::Overlap { .. }), None) => {
      assert!(preview.is_err());
      assert_eq!(ms.text(), &original);
      assert_eq!(ms.pending(), pending.as_slice());
    },
    (result, expected) => panic!("commit {result:?} disagrees with reference {expected:?}"),
  }
});
