#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use pairpad_lib::{
  board::SLOT_COUNT,
  clipboard::NoClipboard,
  controller::{
    BoardController,
    BoardEvent,
    BoardSink,
  },
  messages::MessageLevel,
  pairs::{
    PAIR_COUNT,
    Pair,
    canonical_cmp,
  },
  summary::BoardSummary,
};

const MAX_OPS: usize = 64;
const MAX_TEXT_BYTES: usize = 32;

/// Sink that checks every callback against the board's invariants.
struct CheckSink;

impl BoardSink for CheckSink {
  fn slot_changed(&mut self, index: usize, value: Option<char>) {
    assert!(index < SLOT_COUNT);
    if let Some(ch) = value {
      assert!(ch.is_ascii_digit());
    }
  }

  fn focus_moved(&mut self, index: usize) {
    assert!(index < SLOT_COUNT);
  }

  fn progress_changed(&mut self, filled: usize) {
    assert!(filled <= SLOT_COUNT);
  }

  fn status_changed(&mut self, _summary: BoardSummary) {}

  fn pairs_ready(&mut self, pairs: &[Pair], _meta: &str) {
    assert_eq!(pairs.len(), PAIR_COUNT);
    for window in pairs.windows(2) {
      assert_ne!(
        canonical_cmp(&window[0], &window[1]),
        std::cmp::Ordering::Greater
      );
    }
  }

  fn pairs_cleared(&mut self) {}

  fn notify(&mut self, _level: MessageLevel, _text: &str) {}
}

fuzz_target!(|data: &[u8]| {
  let mut cursor = ByteCursor::new(data);
  let mut controller = BoardController::new(Arc::new(NoClipboard));
  let mut sink = CheckSink;

  let op_count = cursor.next_usize(MAX_OPS);
  for _ in 0..op_count {
    let event = match cursor.next_u8() % 13 {
      0 => BoardEvent::Digit(cursor.next_char()),
      1 => BoardEvent::Text(cursor.next_text(MAX_TEXT_BYTES)),
      2 => BoardEvent::Backspace,
      3 => BoardEvent::ClearSlot,
      4 => BoardEvent::MoveLeft,
      5 => BoardEvent::MoveRight,
      6 => BoardEvent::MoveFirst,
      7 => BoardEvent::MoveLast,
      8 => BoardEvent::ClearAll,
      9 => BoardEvent::Fill(cursor.next_text(MAX_TEXT_BYTES)),
      10 => BoardEvent::Generate,
      11 => BoardEvent::CopyAll,
      _ => BoardEvent::CopyPair(cursor.next_u8() as usize),
    };

    controller.apply(event, &mut sink);
    assert!(controller.focus() < SLOT_COUNT);
    assert!(controller.board().filled() <= SLOT_COUNT);
  }
});

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

  fn next_usize(&mut self, max: usize) -> usize {
    if max == 0 {
      return 0;
    }
    (self.next_u8() as usize) % (max + 1)
  }

  fn next_char(&mut self) -> char {
    (self.next_u8() % 128) as char
  }

  fn next_text(&mut self, max_len: usize) -> String {
    let len = self.next_usize(max_len);
    (0..len).map(|_| self.next_char()).collect()
  }
}
