use std::cell::RefCell;
use std::rc::Rc;

use taskdeck_core::reorder::{
  DragReorder,
  Identified
};
use web_sys::DragEvent;
use yew::{
  Callback,
  hook,
  use_mut_ref,
  use_state
};

use crate::app::ui_debug;

/// Event handlers for a reorderable list,
/// plus the id of the item in flight for
/// styling.
pub struct DragHandlers<T: Identified> {
  pub dragging:      Option<T::Id>,
  pub on_drag_start: Callback<T>,
  pub on_drag_over:
    Callback<(DragEvent, usize)>,
  pub on_drop:
    Callback<(DragEvent, usize)>,
  pub on_drag_end:   Callback<()>
}

#[hook]
pub fn use_drag_reorder<T>(
  items: Vec<T>,
  on_reorder: Callback<Vec<T>>
) -> DragHandlers<T>
where
  T: Identified + Clone + 'static,
  T::Id: 'static
{
  let engine: Rc<
    RefCell<DragReorder<T>>
  > = use_mut_ref(DragReorder::new);
  let dragging =
    use_state(|| None::<T::Id>);

  let on_drag_start = {
    let engine = engine.clone();
    let dragging = dragging.clone();
    Callback::from(move |item: T| {
      ui_debug(
        "list.drag_start",
        "drag started"
      );
      engine
        .borrow_mut()
        .drag_start(&item);
      dragging
        .set(Some(item.identity()));
    })
  };

  let on_drag_over = {
    let engine = engine.clone();
    Callback::from(
      move |(event, index): (
        DragEvent,
        usize
      )| {
        if engine.borrow().drag_over(index)
        {
          event.prevent_default();
        }
      }
    )
  };

  let on_drop = {
    let engine = engine.clone();
    let dragging = dragging.clone();
    Callback::from(
      move |(event, index): (
        DragEvent,
        usize
      )| {
        event.prevent_default();
        let reordered = engine
          .borrow_mut()
          .drop_at(&items, index);
        match reordered {
          | Some(next) => {
            tracing::debug!(
              target_index = index,
              "drop reordered list"
            );
            dragging.set(None);
            on_reorder.emit(next);
          }
          | None => {
            tracing::debug!(
              target_index = index,
              "drop left order unchanged"
            );
          }
        }
      }
    )
  };

  let on_drag_end = {
    let dragging = dragging.clone();
    Callback::from(move |_| {
      engine.borrow_mut().drag_end();
      dragging.set(None);
    })
  };

  DragHandlers {
    dragging: (*dragging).clone(),
    on_drag_start,
    on_drag_over,
    on_drop,
    on_drag_end
  }
}
