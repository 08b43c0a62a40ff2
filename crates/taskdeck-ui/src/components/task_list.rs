use taskdeck_core::reorder::merge_view_order;
use taskdeck_core::task::{
  Category,
  Task
};
use uuid::Uuid;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskCard;
use crate::hooks::use_drag_reorder;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  /// The filtered, sorted view.
  pub tasks:       Vec<Task>,
  /// Every task in store order.
  pub all_tasks:   Vec<Task>,
  pub categories:  Vec<Category>,
  pub filtered:    bool,
  pub reorderable: bool,
  pub on_add_task: Callback<()>,
  pub on_edit:     Callback<Task>,
  pub on_toggle:   Callback<Uuid>,
  pub on_reorder:  Callback<Vec<Task>>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  let on_view_reorder = {
    let all_tasks = props.all_tasks.clone();
    let on_reorder =
      props.on_reorder.clone();
    Callback::from(
      move |view: Vec<Task>| {
        on_reorder.emit(merge_view_order(
          &all_tasks, view
        ));
      }
    )
  };
  let drag = use_drag_reorder(
    props.tasks.clone(),
    on_view_reorder
  );
  let on_add_click = {
    let on_add_task =
      props.on_add_task.clone();
    Callback::from(move |_| {
      on_add_task.emit(());
    })
  };

  html! {
      <div class="panel list">
          <div class="list-actions">
              <button class="btn primary" onclick={on_add_click}>{ "+ Add Task" }</button>
          </div>
          {
              if props.tasks.is_empty() {
                  html! {
                      <div class="list-empty">
                          <h3>{ "No tasks found" }</h3>
                          {
                              if props.filtered {
                                  html! { <p>{ "Try adjusting your filters or add a new task" }</p> }
                              } else {
                                  html! { <p>{ "Add a task to get started" }</p> }
                              }
                          }
                      </div>
                  }
              } else {
                  html! {
                      <div class="list-body">
                          {
                              for props.tasks.iter().cloned().enumerate().map(|(index, task)| {
                                  let category_color = props
                                      .categories
                                      .iter()
                                      .find(|c| c.name == task.category)
                                      .map(|c| c.color.clone());
                                  let is_dragging = drag.dragging == Some(task.id);
                                  let key = task.id.to_string();
                                  html! {
                                      <TaskCard
                                          key={key}
                                          is_dragging={is_dragging}
                                          task={task}
                                          index={index}
                                          draggable={props.reorderable}
                                          category_color={category_color}
                                          on_drag_start={drag.on_drag_start.clone()}
                                          on_drag_over={drag.on_drag_over.clone()}
                                          on_drop={drag.on_drop.clone()}
                                          on_drag_end={drag.on_drag_end.clone()}
                                          on_edit={props.on_edit.clone()}
                                          on_toggle={props.on_toggle.clone()}
                                      />
                                  }
                              })
                          }
                      </div>
                  }
              }
          }
      </div>
  }
}
