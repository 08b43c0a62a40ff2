//! Drag-and-drop reordering of an ordered collection.
//!
//! The engine keeps a single piece of state between events: the item the
//! user started dragging. Positions are looked up by id at drop time, so the
//! same logical item can be followed across re-renders even when the
//! collection was rebuilt in between.

use tracing::{
  debug,
  trace
};
use uuid::Uuid;

use crate::task::Task;

/// An item with a stable identity inside its collection.
pub trait Identified {
  type Id: PartialEq + Clone;

  fn identity(&self) -> Self::Id;
}

impl Identified for Task {
  type Id = Uuid;

  fn identity(&self) -> Uuid {
    self.id
  }
}

pub struct DragReorder<T: Identified> {
  dragged: Option<T::Id>
}

impl<T: Identified> Default
  for DragReorder<T>
{
  fn default() -> Self {
    Self {
      dragged: None
    }
  }
}

impl<T> DragReorder<T>
where
  T: Identified + Clone
{
  pub fn new() -> Self {
    Self::default()
  }

  pub fn dragged(
    &self
  ) -> Option<&T::Id> {
    self.dragged.as_ref()
  }

  pub fn is_dragging(&self) -> bool {
    self.dragged.is_some()
  }

  pub fn drag_start(
    &mut self,
    item: &T
  ) {
    self.dragged =
      Some(item.identity());
  }

  /// Every slot accepts a drop; the
  /// caller uses the answer to cancel the
  /// browser's default refusal.
  pub fn drag_over(
    &self,
    index: usize
  ) -> bool {
    trace!(index, "drag over");
    true
  }

  /// Abandoned drag (`dragend` without a
  /// drop on a slot).
  pub fn drag_end(&mut self) {
    self.dragged = None;
  }

  /// Computes the ordering produced by
  /// dropping the dragged item at
  /// `target_index`. Returns `None` when
  /// nothing changes; in that case the
  /// dragged reference is kept.
  pub fn drop_at(
    &mut self,
    items: &[T],
    target_index: usize
  ) -> Option<Vec<T>> {
    let dragged =
      self.dragged.as_ref()?;

    let current_index = items
      .iter()
      .position(|item| {
        item.identity() == *dragged
      })?;
    if current_index == target_index {
      debug!(
        current_index,
        "dropped onto own slot"
      );
      return None;
    }

    let mut reordered = items.to_vec();
    let moved =
      reordered.remove(current_index);
    let insert_at =
      target_index.min(reordered.len());
    reordered.insert(insert_at, moved);

    debug!(
      from = current_index,
      to = insert_at,
      "reordered collection"
    );
    self.dragged = None;
    Some(reordered)
  }

  /// `drop_at`, handing a changed
  /// ordering to `on_reorder`. Returns
  /// whether the callback fired.
  pub fn drop_with<F>(
    &mut self,
    items: &[T],
    target_index: usize,
    on_reorder: F
  ) -> bool
  where
    F: FnOnce(Vec<T>)
  {
    match self
      .drop_at(items, target_index)
    {
      | Some(reordered) => {
        on_reorder(reordered);
        true
      }
      | None => false
    }
  }
}

/// Writes the order of a reordered view
/// back into the full collection. The
/// slots held by the view's items are
/// refilled in the view's new order;
/// items outside the view keep their
/// positions.
pub fn merge_view_order<T>(
  full: &[T],
  reordered_view: Vec<T>
) -> Vec<T>
where
  T: Identified + Clone
{
  let in_view = |item: &T| {
    let id = item.identity();
    reordered_view
      .iter()
      .any(|v| v.identity() == id)
  };
  let mut next = reordered_view.iter();
  let merged: Vec<T> = full
    .iter()
    .map(|item| {
      if in_view(item) {
        next
          .next()
          .cloned()
          .unwrap_or_else(|| item.clone())
      } else {
        item.clone()
      }
    })
    .collect();
  debug!(
    total = merged.len(),
    "merged view order into collection"
  );
  merged
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(
    Debug, Clone, PartialEq, Eq,
  )]
  struct Card {
    id:    u32,
    label: &'static str
  }

  impl Identified for Card {
    type Id = u32;

    fn identity(&self) -> u32 {
      self.id
    }
  }

  fn card(
    id: u32,
    label: &'static str
  ) -> Card {
    Card {
      id,
      label
    }
  }

  fn abc() -> Vec<Card> {
    vec![
      card(1, "A"),
      card(2, "B"),
      card(3, "C"),
    ]
  }

  fn labels(
    items: &[Card]
  ) -> Vec<&'static str> {
    items
      .iter()
      .map(|c| c.label)
      .collect()
  }

  #[test]
  fn drag_first_to_last() {
    let items = abc();
    let mut engine = DragReorder::new();
    engine.drag_start(&items[0]);

    let reordered = engine
      .drop_at(&items, 2)
      .expect("order changes");
    assert_eq!(
      labels(&reordered),
      vec!["B", "C", "A"]
    );
    assert!(!engine.is_dragging());
  }

  #[test]
  fn drag_last_to_first() {
    let items = abc();
    let mut engine = DragReorder::new();
    engine.drag_start(&items[2]);

    let reordered = engine
      .drop_at(&items, 0)
      .expect("order changes");
    assert_eq!(
      labels(&reordered),
      vec!["C", "A", "B"]
    );
  }

  #[test]
  fn dropping_on_own_slot_does_not_notify(
  ) {
    let items = abc();
    let mut engine = DragReorder::new();
    engine.drag_start(&items[1]);

    let mut fired = false;
    let changed = engine.drop_with(
      &items,
      1,
      |_| fired = true
    );
    assert!(!changed);
    assert!(!fired);
    assert_eq!(engine.dragged(), Some(&2));
  }

  #[test]
  fn drop_without_drag_start_is_noop() {
    let items = abc();
    let mut engine =
      DragReorder::<Card>::new();
    assert!(
      engine.drop_at(&items, 0).is_none()
    );
  }

  #[test]
  fn item_missing_from_collection_is_noop(
  ) {
    let items = abc();
    let mut engine = DragReorder::new();
    engine.drag_start(&card(9, "Z"));
    assert!(
      engine.drop_at(&items, 1).is_none()
    );
  }

  #[test]
  fn identity_survives_rebuilt_collection(
  ) {
    let mut engine = DragReorder::new();
    engine.drag_start(&card(1, "A"));

    let rebuilt = vec![
      card(2, "B"),
      card(1, "A (renamed)"),
      card(3, "C"),
    ];
    let reordered = engine
      .drop_at(&rebuilt, 2)
      .expect("order changes");
    assert_eq!(
      labels(&reordered),
      vec!["B", "C", "A (renamed)"]
    );
  }

  #[test]
  fn out_of_range_target_appends() {
    let items = abc();
    let mut engine = DragReorder::new();
    engine.drag_start(&items[0]);

    let reordered = engine
      .drop_at(&items, 10)
      .expect("order changes");
    assert_eq!(
      labels(&reordered),
      vec!["B", "C", "A"]
    );
  }

  #[test]
  fn every_move_preserves_items_and_relative_order(
  ) {
    let items: Vec<Card> = vec![
      card(1, "A"),
      card(2, "B"),
      card(3, "C"),
      card(4, "D"),
      card(5, "E"),
    ];

    for from in 0..items.len() {
      for to in 0..items.len() {
        let mut engine =
          DragReorder::new();
        engine.drag_start(&items[from]);
        let result =
          engine.drop_at(&items, to);

        if from == to {
          assert!(result.is_none());
          continue;
        }

        let reordered =
          result.expect("order changes");
        assert_eq!(
          reordered.len(),
          items.len()
        );
        assert_eq!(
          reordered[to], items[from]
        );

        let rest: Vec<&Card> = reordered
          .iter()
          .filter(|c| c.id != items[from].id)
          .collect();
        let expected: Vec<&Card> = items
          .iter()
          .filter(|c| c.id != items[from].id)
          .collect();
        assert_eq!(rest, expected);
      }
    }
  }

  #[test]
  fn drag_end_forgets_the_dragged_item() {
    let items = abc();
    let mut engine = DragReorder::new();
    engine.drag_start(&items[0]);
    engine.drag_end();
    assert!(
      engine.drop_at(&items, 2).is_none()
    );
  }

  #[test]
  fn filtered_drop_maps_back_to_full_collection(
  ) {
    let full = vec![
      card(1, "A"),
      card(2, "B"),
      card(3, "C"),
      card(4, "D"),
      card(5, "E"),
    ];
    let view = vec![
      full[1].clone(),
      full[3].clone(),
      full[4].clone(),
    ];

    let mut engine = DragReorder::new();
    engine.drag_start(&view[2]);
    let reordered_view = engine
      .drop_at(&view, 0)
      .expect("order changes");
    assert_eq!(
      labels(&reordered_view),
      vec!["E", "B", "D"]
    );

    let merged =
      merge_view_order(&full, reordered_view);
    assert_eq!(
      labels(&merged),
      vec!["A", "E", "C", "B", "D"]
    );
  }

  #[test]
  fn unfiltered_view_merges_to_itself() {
    let items = abc();
    let mut engine = DragReorder::new();
    engine.drag_start(&items[0]);
    let reordered = engine
      .drop_at(&items, 2)
      .expect("order changes");
    assert_eq!(
      merge_view_order(&items, reordered.clone()),
      reordered
    );
  }

  #[test]
  fn drag_over_accepts_any_slot() {
    let engine =
      DragReorder::<Card>::new();
    assert!(engine.drag_over(0));
    assert!(engine.drag_over(42));
  }
}
