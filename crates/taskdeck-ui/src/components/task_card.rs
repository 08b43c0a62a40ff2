use taskdeck_core::recurrence::format_date_input;
use taskdeck_core::task::{
  Priority,
  Task,
  TaskStatus
};
use taskdeck_core::tracking::{
  minutes_label,
  total_tracked_minutes
};
use uuid::Uuid;
use web_sys::DragEvent;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskCardProps {
  pub task:           Task,
  pub index:          usize,
  pub category_color: Option<String>,
  pub is_dragging:    bool,
  pub draggable:      bool,
  pub on_drag_start:  Callback<Task>,
  pub on_drag_over:
    Callback<(DragEvent, usize)>,
  pub on_drop:
    Callback<(DragEvent, usize)>,
  pub on_drag_end:    Callback<()>,
  pub on_edit:        Callback<Task>,
  pub on_toggle:      Callback<Uuid>
}

#[function_component(TaskCard)]
pub fn task_card(
  props: &TaskCardProps
) -> Html {
  let index = props.index;
  let task_id = props.task.id;

  let ondragstart = {
    let on_drag_start =
      props.on_drag_start.clone();
    let task = props.task.clone();
    Callback::from(
      move |event: DragEvent| {
        if let Some(data_transfer) =
          event.data_transfer()
        {
          let _ = data_transfer
            .set_data(
              "text/plain",
              &task_id.to_string()
            );
          data_transfer
            .set_effect_allowed("move");
        }
        on_drag_start.emit(task.clone());
      }
    )
  };

  let ondragover = {
    let on_drag_over =
      props.on_drag_over.clone();
    Callback::from(
      move |event: DragEvent| {
        on_drag_over.emit((event, index));
      }
    )
  };

  let ondrop = {
    let on_drop = props.on_drop.clone();
    Callback::from(
      move |event: DragEvent| {
        event.stop_propagation();
        on_drop.emit((event, index));
      }
    )
  };

  let ondragend = {
    let on_drag_end =
      props.on_drag_end.clone();
    Callback::from(move |_| {
      on_drag_end.emit(());
    })
  };

  let on_edit_click = {
    let on_edit = props.on_edit.clone();
    let task = props.task.clone();
    Callback::from(move |_| {
      on_edit.emit(task.clone());
    })
  };

  let on_toggle_click = {
    let on_toggle = props.on_toggle.clone();
    Callback::from(move |_| {
      on_toggle.emit(task_id);
    })
  };

  let task = &props.task;
  let priority_class = match task.priority
  {
    | Priority::High => "badge priority-high",
    | Priority::Medium => {
      "badge priority-medium"
    }
    | Priority::Low => "badge priority-low"
  };
  let done =
    task.status == TaskStatus::Completed
      || task.completed;
  let category_style = props
    .category_color
    .as_ref()
    .map(|color| {
      format!("border-color:{color};")
    })
    .unwrap_or_default();
  let tracked =
    total_tracked_minutes(&task.time_entries);
  let has_description = task
    .description
    .as_deref()
    .is_some_and(|d| !d.trim().is_empty());

  html! {
      <div
          class={classes!("task-card", props.is_dragging.then_some("dragging"), done.then_some("done"))}
          draggable={if props.draggable { "true" } else { "false" }}
          {ondragstart}
          {ondragover}
          {ondrop}
          {ondragend}
      >
          <div class="task-card-header">
              <input
                  type="checkbox"
                  class="task-done"
                  checked={done}
                  onclick={on_toggle_click}
              />
              <div class="task-card-title">{ &task.title }</div>
              <button class="btn ghost" onclick={on_edit_click}>{ "Edit" }</button>
          </div>
          {
              if has_description {
                  html! { <div class="task-subtitle">{ task.description.clone().unwrap_or_default() }</div> }
              } else {
                  html! {}
              }
          }
          <div class="task-card-meta">
              <span class={priority_class}>{ task.priority.label() }</span>
              <span class="badge category" style={category_style}>{ &task.category }</span>
              {
                  if let Some(due) = task.due_date {
                      html! { <span class="badge">{ format!("due:{}", format_date_input(Some(due))) }</span> }
                  } else {
                      html! {}
                  }
              }
              {
                  if task.recurrence.repeats() {
                      html! { <span class="badge">{ task.recurrence.label() }</span> }
                  } else {
                      html! {}
                  }
              }
              {
                  if task.subtasks.is_empty() {
                      html! {}
                  } else {
                      html! { <span class="badge">{ format!("{}/{} subtasks", task.completed_subtasks(), task.subtasks.len()) }</span> }
                  }
              }
              {
                  if tracked > 0 {
                      html! { <span class="badge">{ minutes_label(tracked) }</span> }
                  } else {
                      html! {}
                  }
              }
              {
                  if task.is_tracking() {
                      html! { <span class="badge tracking">{ "● tracking" }</span> }
                  } else {
                      html! {}
                  }
              }
              {
                  if task.shared_with.is_empty() {
                      html! {}
                  } else {
                      html! { <span class="badge">{ format!("shared with {}", task.shared_with.len()) }</span> }
                  }
              }
          </div>
      </div>
  }
}
