use taskdeck_core::task::Subtask;
use uuid::Uuid;
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  classes,
  function_component,
  html,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct SubtaskListProps {
  pub subtasks:  Vec<Subtask>,
  pub on_add:    Callback<String>,
  pub on_toggle: Callback<Uuid>,
  pub on_remove: Callback<Uuid>
}

#[function_component(SubtaskList)]
pub fn subtask_list(
  props: &SubtaskListProps
) -> Html {
  let new_title = use_state(String::new);

  let on_input = {
    let new_title = new_title.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        new_title.set(input.value());
      }
    )
  };

  let add = {
    let new_title = new_title.clone();
    let on_add = props.on_add.clone();
    move || {
      if new_title.trim().is_empty() {
        return;
      }
      on_add.emit((*new_title).clone());
      new_title.set(String::new());
    }
  };

  let on_add_click = {
    let add = add.clone();
    Callback::from(
      move |e: yew::MouseEvent| {
        e.prevent_default();
        add();
      }
    )
  };

  let on_keydown = Callback::from(
    move |e: web_sys::KeyboardEvent| {
      if e.key() == "Enter" {
        e.prevent_default();
        add();
      }
    }
  );

  html! {
      <div class="subtask-list">
          {
              for props.subtasks.iter().map(|subtask| {
                  let id = subtask.id;
                  let on_toggle = props.on_toggle.clone();
                  let on_remove = props.on_remove.clone();
                  html! {
                      <div class={classes!("subtask", subtask.completed.then_some("done"))}>
                          <input
                              type="checkbox"
                              checked={subtask.completed}
                              onchange={move |_| on_toggle.emit(id)}
                          />
                          <span>{ &subtask.title }</span>
                          <button
                              type="button"
                              class="btn ghost"
                              onclick={move |_| on_remove.emit(id)}
                          >
                              { "✕" }
                          </button>
                      </div>
                  }
              })
          }
          <div class="subtask-add">
              <input
                  value={(*new_title).clone()}
                  placeholder="Add a subtask"
                  oninput={on_input}
                  onkeydown={on_keydown}
              />
              <button type="button" class="btn" onclick={on_add_click}>{ "Add" }</button>
          </div>
      </div>
  }
}
