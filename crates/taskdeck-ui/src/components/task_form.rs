use chrono::Utc;
use taskdeck_core::draft::{
  EMAIL_FIELD,
  TITLE_FIELD,
  optional_text
};
use taskdeck_core::form::TaskForm as FormState;
use taskdeck_core::recurrence::{
  RecurrenceSelection,
  format_date_input,
  parse_date_input
};
use taskdeck_core::store::TaskAction;
use taskdeck_core::task::{
  Category,
  Priority,
  SharePermission,
  Task
};
use taskdeck_core::tracking::TrackingMode;
use uuid::Uuid;
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  UseStateHandle,
  function_component,
  html,
  use_effect_with,
  use_state
};

use super::{
  RecurrencePicker,
  ShareModal,
  SubtaskList,
  TimeTracker
};
use crate::app::ui_debug;

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub is_open:           bool,
  pub editing_task:      Option<Task>,
  pub categories:        Vec<Category>,
  pub default_category:  String,
  pub default_priority:  Priority,
  pub countdown_presets: Vec<u32>,
  pub on_dispatch:
    Callback<TaskAction>,
  pub on_close:          Callback<()>
}

/// Clones the current form, applies
/// `change` and stores the result.
fn update_form(
  form: &UseStateHandle<FormState>,
  change: impl FnOnce(&mut FormState)
) {
  let mut current = (**form).clone();
  change(&mut current);
  form.set(current);
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let form = {
    let default_category =
      props.default_category.clone();
    let default_priority =
      props.default_priority;
    use_state(move || {
      FormState::new(default_category)
        .with_default_priority(
          default_priority
        )
    })
  };

  {
    let form = form.clone();
    use_effect_with(
      (
        props.is_open,
        props.editing_task.clone()
      ),
      move |(is_open, editing)| {
        update_form(&form, |current| {
          current.sync(
            *is_open,
            editing.as_ref()
          );
        });
        || ()
      }
    );
  }

  if !props.is_open || !form.is_open() {
    return html! {};
  }

  let on_submit = {
    let form = form.clone();
    let on_dispatch =
      props.on_dispatch.clone();
    let on_close = props.on_close.clone();
    Callback::from(move |e: web_sys::SubmitEvent| {
      e.prevent_default();
      let mut current = (*form).clone();
      match current.submit(Utc::now()) {
        | Ok(intents) => {
          ui_debug(
            "form.submit",
            "task form submitted"
          );
          form.set(current);
          for intent in intents {
            on_dispatch.emit(intent);
          }
          on_close.emit(());
        }
        | Err(errors) => {
          tracing::debug!(
            ?errors,
            "task form rejected"
          );
          form.set(current);
        }
      }
    })
  };

  let on_cancel = {
    let form = form.clone();
    let on_dispatch =
      props.on_dispatch.clone();
    let on_close = props.on_close.clone();
    Callback::from(move |_| {
      let mut current = (*form).clone();
      let intent = current.close();
      form.set(current);
      on_dispatch.emit(intent);
      on_close.emit(());
    })
  };

  let on_title_input = {
    let form = form.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        update_form(&form, |current| {
          current.set_title(input.value());
        });
      }
    )
  };

  let on_description_input = {
    let form = form.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlTextAreaElement =
          e.target_unchecked_into();
        update_form(&form, |current| {
          current.set_description(
            optional_text(&input.value())
          );
        });
      }
    )
  };

  let on_notes_input = {
    let form = form.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlTextAreaElement =
          e.target_unchecked_into();
        update_form(&form, |current| {
          current.set_notes(optional_text(
            &input.value()
          ));
        });
      }
    )
  };

  let on_priority_change = {
    let form = form.clone();
    Callback::from(move |e: web_sys::Event| {
      let select: web_sys::HtmlSelectElement =
        e.target_unchecked_into();
      if let Some(priority) =
        Priority::parse(&select.value())
      {
        update_form(&form, |current| {
          current.set_priority(priority);
        });
      }
    })
  };

  let on_category_change = {
    let form = form.clone();
    Callback::from(move |e: web_sys::Event| {
      let select: web_sys::HtmlSelectElement =
        e.target_unchecked_into();
      update_form(&form, |current| {
        current.set_category(select.value());
      });
    })
  };

  let on_due_change = {
    let form = form.clone();
    Callback::from(move |e: web_sys::Event| {
      let input: web_sys::HtmlInputElement =
        e.target_unchecked_into();
      update_form(&form, |current| {
        current.set_due_date(
          parse_date_input(&input.value())
        );
      });
    })
  };

  let on_recurrence_change = {
    let form = form.clone();
    Callback::from(
      move |selection: RecurrenceSelection| {
        update_form(&form, |current| {
          current.set_recurrence(selection);
        });
      }
    )
  };

  let on_subtask_add = {
    let form = form.clone();
    Callback::from(move |title: String| {
      update_form(&form, |current| {
        current
          .add_subtask(&title, Utc::now());
      });
    })
  };

  let on_subtask_toggle = {
    let form = form.clone();
    Callback::from(move |id: Uuid| {
      update_form(&form, |current| {
        current.toggle_subtask(id);
      });
    })
  };

  let on_subtask_remove = {
    let form = form.clone();
    Callback::from(move |id: Uuid| {
      update_form(&form, |current| {
        current.remove_subtask(id);
      });
    })
  };

  let on_start_tracking = {
    let form = form.clone();
    Callback::from(
      move |countdown: Option<u32>| {
        update_form(&form, |current| {
          current.start_tracking(
            Utc::now(),
            countdown
          );
        });
      }
    )
  };

  let on_stop_tracking = {
    let form = form.clone();
    Callback::from(move |minutes: u32| {
      update_form(&form, |current| {
        current
          .stop_tracking(Utc::now(), minutes);
      });
    })
  };

  let on_mode_change = {
    let form = form.clone();
    Callback::from(
      move |mode: TrackingMode| {
        update_form(&form, |current| {
          current.set_tracking_mode(mode);
        });
      }
    )
  };

  let on_share_open = {
    let form = form.clone();
    Callback::from(move |_| {
      update_form(&form, |current| {
        current.open_share_dialog();
      });
    })
  };

  let on_share_close = {
    let form = form.clone();
    Callback::from(move |_| {
      update_form(&form, |current| {
        current.close_share_dialog();
      });
    })
  };

  let on_share = {
    let form = form.clone();
    Callback::from(
      move |(email, permission): (
        String,
        SharePermission
      )| {
        update_form(&form, |current| {
          current
            .share_with(&email, permission);
        });
      }
    )
  };

  let on_share_permission = {
    let form = form.clone();
    Callback::from(
      move |(user_id, permission): (
        Uuid,
        SharePermission
      )| {
        update_form(&form, |current| {
          current.set_share_permission(
            user_id, permission
          );
        });
      }
    )
  };

  let on_unshare = {
    let form = form.clone();
    Callback::from(move |user_id: Uuid| {
      update_form(&form, |current| {
        current.unshare(user_id);
      });
    })
  };

  let draft = form.draft().clone();
  let recurrence = form.recurrence();
  let title_error = form
    .errors()
    .get(TITLE_FIELD)
    .map(str::to_string);
  let share_error = form
    .share_errors()
    .get(EMAIL_FIELD)
    .map(str::to_string);
  let selected_category =
    draft.category.clone().unwrap_or_else(
      || props.default_category.clone()
    );
  let selected_priority =
    draft.priority.unwrap_or_default();

  html! {
      <div class="modal-backdrop">
          <div class="modal task-form">
              <div class="header">{ form.heading() }</div>
              <form class="content" onsubmit={on_submit}>
                  <div class="field">
                      <label>{ "Task Title" }</label>
                      <input
                          value={draft.title.clone()}
                          placeholder="Enter task title"
                          oninput={on_title_input}
                      />
                      {
                          if let Some(err) = title_error {
                              html! { <div class="form-error">{ err }</div> }
                          } else {
                              html! {}
                          }
                      }
                  </div>
                  <div class="field">
                      <label>{ "Description" }</label>
                      <textarea
                          rows="4"
                          value={draft.description.clone().unwrap_or_default()}
                          placeholder="Add some details about your task..."
                          oninput={on_description_input}
                      />
                  </div>
                  <div class="field-row">
                      <div class="field">
                          <label>{ "Priority" }</label>
                          <select onchange={on_priority_change}>
                              {
                                  for Priority::ALL.iter().map(|priority| html! {
                                      <option value={priority.as_str()} selected={*priority == selected_priority}>{ priority.label() }</option>
                                  })
                              }
                          </select>
                      </div>
                      <div class="field">
                          <label>{ "Category" }</label>
                          <select onchange={on_category_change}>
                              {
                                  for props.categories.iter().map(|category| html! {
                                      <option value={category.name.clone()} selected={category.name == selected_category}>{ &category.name }</option>
                                  })
                              }
                          </select>
                      </div>
                  </div>
                  <div class="field">
                      <label>{ "Due Date" }</label>
                      <input
                          type="date"
                          value={format_date_input(draft.due_date)}
                          onchange={on_due_change}
                      />
                  </div>
                  <div class="field-row panel-muted">
                      <div class="field-column">
                          <RecurrencePicker
                              value={recurrence.mode}
                              end_date={recurrence.end_date}
                              on_change={on_recurrence_change}
                          />
                          <div class="field">
                              <label>{ "Subtasks" }</label>
                              <SubtaskList
                                  subtasks={draft.subtasks.clone()}
                                  on_add={on_subtask_add}
                                  on_toggle={on_subtask_toggle}
                                  on_remove={on_subtask_remove}
                              />
                          </div>
                      </div>
                      <div class="field-column">
                          <div class="field">
                              <label>{ "Time Tracking" }</label>
                              <TimeTracker
                                  time_entries={draft.time_entries.clone()}
                                  active={draft.active_tracking}
                                  mode={form.tracking_mode()}
                                  countdown_minutes={form.countdown_minutes()}
                                  countdown_presets={props.countdown_presets.clone()}
                                  on_start={on_start_tracking}
                                  on_stop={on_stop_tracking}
                                  on_mode_change={on_mode_change}
                              />
                          </div>
                          <button type="button" class="btn ghost" onclick={on_share_open}>
                              { format!("Share Task ({})", draft.shared_with.len()) }
                          </button>
                      </div>
                  </div>
                  <div class="field">
                      <label>{ "Notes" }</label>
                      <textarea
                          rows="2"
                          value={draft.notes.clone().unwrap_or_default()}
                          oninput={on_notes_input}
                      />
                  </div>
                  <div class="footer">
                      <button type="button" class="btn" onclick={on_cancel}>{ "Cancel" }</button>
                      <button type="submit" class="btn primary">{ form.submit_label() }</button>
                  </div>
              </form>
              <ShareModal
                  is_open={form.share_open()}
                  shared_with={draft.shared_with.clone()}
                  error={share_error}
                  on_share={on_share}
                  on_permission_change={on_share_permission}
                  on_remove={on_unshare}
                  on_close={on_share_close}
              />
          </div>
      </div>
  }
}
