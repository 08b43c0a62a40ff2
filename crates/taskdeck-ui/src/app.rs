use std::rc::Rc;

use chrono::{
  Local,
  Utc
};
use gloo::console::log;
use taskdeck_core::config::AppConfig;
use taskdeck_core::filter::{
  FilterOptions,
  SortOption,
  visible_tasks
};
use taskdeck_core::store::{
  TaskAction,
  TaskStore
};
use taskdeck_core::task::Task;
use uuid::Uuid;
use yew::{
  Callback,
  Html,
  Reducible,
  function_component,
  html,
  use_effect_with,
  use_reducer,
  use_state
};

use crate::components::{
  TaskFilters,
  TaskForm,
  TaskList
};

const CONFIG_TOML: &str =
  include_str!("../assets/taskdeck.toml");

/// The task store as seen by Yew. The
/// store is handed to components through
/// props; nothing reads it ambiently.
#[derive(Clone, PartialEq)]
struct StoreState {
  store: TaskStore
}

impl Reducible for StoreState {
  type Action = TaskAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    ui_debug(
      "store.dispatch",
      action.name()
    );
    let mut next = (*self).clone();
    next.store.apply(action);
    Rc::new(next)
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let config = use_state(|| {
    AppConfig::load_or_default(
      CONFIG_TOML
    )
  });
  let store = {
    let categories =
      config.categories.clone();
    use_reducer(move || StoreState {
      store: TaskStore::new(categories)
    })
  };
  let form_open = use_state(|| false);
  let filter =
    use_state(FilterOptions::default);
  let sort = use_state(SortOption::default);

  {
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "frontend mounted and hooks \
         initialized"
      );
      || ()
    });
  }

  let on_dispatch = {
    let store = store.clone();
    Callback::from(
      move |action: TaskAction| {
        store.dispatch(action);
      }
    )
  };

  let on_add_task = {
    let store = store.clone();
    let form_open = form_open.clone();
    Callback::from(move |_| {
      tracing::debug!(
        "opening form for new task"
      );
      store.dispatch(
        TaskAction::SetEditingTask(None)
      );
      form_open.set(true);
    })
  };

  let on_edit = {
    let store = store.clone();
    let form_open = form_open.clone();
    Callback::from(move |task: Task| {
      tracing::debug!(id = %task.id, "opening form for edit");
      store.dispatch(
        TaskAction::SetEditingTask(Some(
          task
        ))
      );
      form_open.set(true);
    })
  };

  let on_reorder = {
    let store = store.clone();
    Callback::from(
      move |tasks: Vec<Task>| {
        store.dispatch(
          TaskAction::ReorderTasks(tasks)
        );
      }
    )
  };

  let on_toggle = {
    let store = store.clone();
    Callback::from(move |id: Uuid| {
      store.dispatch(
        TaskAction::ToggleComplete {
          id,
          at: Utc::now()
        }
      );
    })
  };

  let on_filter_change = {
    let filter = filter.clone();
    Callback::from(
      move |next: FilterOptions| {
        ui_debug(
          "list.filter",
          "filter options changed"
        );
        filter.set(next);
      }
    )
  };

  let on_sort_change = {
    let sort = sort.clone();
    Callback::from(
      move |next: SortOption| {
        sort.set(next);
      }
    )
  };

  let on_form_close = {
    let form_open = form_open.clone();
    Callback::from(move |_| {
      form_open.set(false);
    })
  };

  let default_category = config
    .default_category()
    .to_string();
  let visible = visible_tasks(
    &store.store.tasks,
    &filter,
    *sort,
    Local::now().date_naive()
  );

  html! {
      <div class="app">
          <header class="app-header">
              <h1>{ "Taskdeck" }</h1>
          </header>
          <TaskFilters
              filter={(*filter).clone()}
              sort={*sort}
              categories={store.store.categories.clone()}
              on_filter_change={on_filter_change}
              on_sort_change={on_sort_change}
          />
          <TaskList
              tasks={visible}
              all_tasks={store.store.tasks.clone()}
              categories={store.store.categories.clone()}
              filtered={filter.is_active()}
              reorderable={sort.allows_reorder()}
              on_add_task={on_add_task}
              on_edit={on_edit}
              on_toggle={on_toggle}
              on_reorder={on_reorder}
          />
          <TaskForm
              is_open={*form_open}
              editing_task={store.store.editing_task.clone()}
              categories={store.store.categories.clone()}
              default_category={default_category}
              default_priority={config.default_priority}
              countdown_presets={config.countdown_presets.clone()}
              on_dispatch={on_dispatch}
              on_close={on_form_close}
          />
      </div>
  }
}

pub(crate) fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
