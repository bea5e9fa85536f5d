use super::constants::HARMFUL_FOOD_CHANCE;
use super::spatial::Bounds;
use super::types::{FoodId, FoodItem, FoodKind};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodClass {
  pub color: u32,
  pub kind: FoodKind,
  pub value: i32,
}

pub const NUTRITIVE_CLASSES: [FoodClass; 4] = [
  FoodClass {
    color: 0xffff00,
    kind: FoodKind::Nutritive,
    value: 1,
  },
  FoodClass {
    color: 0x00ff00,
    kind: FoodKind::Nutritive,
    value: 2,
  },
  FoodClass {
    color: 0x0088ff,
    kind: FoodKind::Nutritive,
    value: 1,
  },
  FoodClass {
    color: 0xaa00ff,
    kind: FoodKind::Nutritive,
    value: 3,
  },
];

pub const HARMFUL_CLASS: FoodClass = FoodClass {
  color: 0xff0000,
  kind: FoodKind::Harmful,
  value: -1,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodSwap {
  pub removed: FoodItem,
  pub added: FoodItem,
}

/// Capped food pool. Every consumption is backfilled immediately, so the
/// pool only dips below `cap` between `remove` and `spawn_one`.
#[derive(Debug)]
pub struct FoodManager {
  items: Vec<FoodItem>,
  cap: usize,
  next_id: FoodId,
}

impl FoodManager {
  pub fn new(cap: usize) -> Self {
    Self {
      items: Vec::with_capacity(cap),
      cap,
      next_id: 0,
    }
  }

  pub fn items(&self) -> &[FoodItem] {
    &self.items
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn fill<R: Rng + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R) {
    while self.items.len() < self.cap {
      self.spawn_one(bounds, rng);
    }
  }

  pub fn spawn_one<R: Rng + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R) -> Option<FoodItem> {
    if self.items.len() >= self.cap {
      return None;
    }
    let position = bounds.random_point(rng);
    let class = roll_class(rng);
    let item = FoodItem {
      id: self.next_id,
      x: position.x,
      y: position.y,
      kind: class.kind,
      value: class.value,
      color: class.color,
    };
    self.next_id += 1;
    self.items.push(item);
    Some(item)
  }

  pub fn consume<R: Rng + ?Sized>(
    &mut self,
    id: FoodId,
    bounds: &Bounds,
    rng: &mut R,
  ) -> Option<FoodSwap> {
    let index = self.items.iter().position(|item| item.id == id)?;
    let removed = self.items.swap_remove(index);
    let added = self.spawn_one(bounds, rng)?;
    Some(FoodSwap { removed, added })
  }

  #[cfg(test)]
  pub(crate) fn insert(&mut self, item: FoodItem) {
    self.next_id = self.next_id.max(item.id + 1);
    self.items.push(item);
  }

  #[cfg(test)]
  pub(crate) fn clear(&mut self) {
    self.items.clear();
  }
}

fn roll_class<R: Rng + ?Sized>(rng: &mut R) -> FoodClass {
  if rng.gen::<f64>() < HARMFUL_FOOD_CHANCE {
    HARMFUL_CLASS
  } else {
    NUTRITIVE_CLASSES[rng.gen_range(0..NUTRITIVE_CLASSES.len())]
  }
}
