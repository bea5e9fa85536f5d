use super::types::EntityId;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduledEvent {
  RespawnPlayer(EntityId),
  RespawnAi(EntityId),
  /// Carries the deadline it was scheduled for; a refreshed boost makes
  /// older expiries stale.
  BoostExpired { id: EntityId, deadline: i64 },
}

#[derive(Debug, PartialEq, Eq)]
struct Entry {
  due_at: i64,
  seq: u64,
  event: ScheduledEvent,
}

impl Ord for Entry {
  fn cmp(&self, other: &Self) -> Ordering {
    self
      .due_at
      .cmp(&other.due_at)
      .then(self.seq.cmp(&other.seq))
  }
}

impl PartialOrd for Entry {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

/// Delay queue drained by the tick loop. Events due at the same instant come
/// out in scheduling order.
#[derive(Debug, Default)]
pub struct Schedule {
  heap: BinaryHeap<Reverse<Entry>>,
  next_seq: u64,
}

impl Schedule {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, due_at: i64, event: ScheduledEvent) {
    let seq = self.next_seq;
    self.next_seq += 1;
    self.heap.push(Reverse(Entry { due_at, seq, event }));
  }

  pub fn drain_due(&mut self, now: i64) -> Vec<ScheduledEvent> {
    let mut due = Vec::new();
    while let Some(Reverse(entry)) = self.heap.peek() {
      if entry.due_at > now {
        break;
      }
      if let Some(Reverse(entry)) = self.heap.pop() {
        due.push(entry.event);
      }
    }
    due
  }

  #[cfg(test)]
  pub fn len(&self) -> usize {
    self.heap.len()
  }

  #[cfg(test)]
  pub fn is_empty(&self) -> bool {
    self.heap.is_empty()
  }
}
