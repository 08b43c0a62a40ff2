use taskdeck_core::filter::{
  DueWindow,
  FilterOptions,
  SortOption,
  StatusFilter
};
use taskdeck_core::task::{
  Category,
  Priority
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

const ANY: &str = "all";

#[derive(Properties, PartialEq)]
pub struct TaskFiltersProps {
  pub filter:           FilterOptions,
  pub sort:             SortOption,
  pub categories:       Vec<Category>,
  pub on_filter_change:
    Callback<FilterOptions>,
  pub on_sort_change:   Callback<SortOption>
}

/// Emits a copy of `current` with
/// `change` applied.
fn emit_changed(
  on_change: &Callback<FilterOptions>,
  current: &FilterOptions,
  change: impl FnOnce(&mut FilterOptions)
) {
  let mut next = current.clone();
  change(&mut next);
  on_change.emit(next);
}

fn select_value(e: &web_sys::Event) -> String {
  let select: web_sys::HtmlSelectElement =
    e.target_unchecked_into();
  select.value()
}

#[function_component(TaskFilters)]
pub fn task_filters(
  props: &TaskFiltersProps
) -> Html {
  let on_search = {
    let on_change =
      props.on_filter_change.clone();
    let current = props.filter.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        emit_changed(&on_change, &current, |f| {
          f.search = input.value();
        });
      }
    )
  };

  let on_status = {
    let on_change =
      props.on_filter_change.clone();
    let current = props.filter.clone();
    Callback::from(move |e: web_sys::Event| {
      if let Some(status) =
        StatusFilter::parse(&select_value(&e))
      {
        emit_changed(&on_change, &current, |f| {
          f.status = status;
        });
      }
    })
  };

  let on_category = {
    let on_change =
      props.on_filter_change.clone();
    let current = props.filter.clone();
    Callback::from(move |e: web_sys::Event| {
      let value = select_value(&e);
      emit_changed(&on_change, &current, |f| {
        f.category =
          (value != ANY).then_some(value);
      });
    })
  };

  let on_priority = {
    let on_change =
      props.on_filter_change.clone();
    let current = props.filter.clone();
    Callback::from(move |e: web_sys::Event| {
      let value = select_value(&e);
      emit_changed(&on_change, &current, |f| {
        f.priority = Priority::parse(&value);
      });
    })
  };

  let on_due = {
    let on_change =
      props.on_filter_change.clone();
    let current = props.filter.clone();
    Callback::from(move |e: web_sys::Event| {
      if let Some(due) =
        DueWindow::parse(&select_value(&e))
      {
        emit_changed(&on_change, &current, |f| {
          f.due = due;
        });
      }
    })
  };

  let on_sort = {
    let on_sort_change =
      props.on_sort_change.clone();
    Callback::from(move |e: web_sys::Event| {
      if let Some(sort) =
        SortOption::parse(&select_value(&e))
      {
        tracing::debug!(sort = sort.as_str(), "sort changed");
        on_sort_change.emit(sort);
      }
    })
  };

  let on_clear = {
    let on_change =
      props.on_filter_change.clone();
    Callback::from(move |_| {
      on_change.emit(FilterOptions::default());
    })
  };

  let filter = &props.filter;
  let selected_category =
    filter.category.clone();

  html! {
      <div class="list-filters">
          <input
              class="search"
              type="search"
              placeholder="Search tasks"
              value={filter.search.clone()}
              oninput={on_search}
          />
          <select onchange={on_status}>
              {
                  for StatusFilter::ALL.iter().map(|status| html! {
                      <option value={status.as_str()} selected={*status == filter.status}>{ status.label() }</option>
                  })
              }
          </select>
          <select onchange={on_category}>
              <option value={ANY} selected={selected_category.is_none()}>{ "All categories" }</option>
              {
                  for props.categories.iter().map(|category| html! {
                      <option
                          value={category.name.clone()}
                          selected={selected_category.as_deref() == Some(category.name.as_str())}
                      >
                          { &category.name }
                      </option>
                  })
              }
          </select>
          <select onchange={on_priority}>
              <option value={ANY} selected={filter.priority.is_none()}>{ "All priorities" }</option>
              {
                  for Priority::ALL.iter().map(|priority| html! {
                      <option value={priority.as_str()} selected={filter.priority == Some(*priority)}>{ priority.label() }</option>
                  })
              }
          </select>
          <select onchange={on_due}>
              {
                  for DueWindow::ALL.iter().map(|due| html! {
                      <option value={due.as_str()} selected={*due == filter.due}>{ due.label() }</option>
                  })
              }
          </select>
          <select onchange={on_sort}>
              {
                  for SortOption::ALL.iter().map(|sort| html! {
                      <option value={sort.as_str()} selected={*sort == props.sort}>{ sort.label() }</option>
                  })
              }
          </select>
          {
              if filter.is_active() {
                  html! { <button class="btn ghost" onclick={on_clear}>{ "Clear filters" }</button> }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
