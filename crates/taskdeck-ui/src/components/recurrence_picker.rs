use chrono::NaiveDate;
use taskdeck_core::recurrence::{
  RecurrenceSelection,
  parse_date_input,
  recurrence_options
};
use taskdeck_core::task::Recurrence;
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct RecurrencePickerProps {
  pub value:     Recurrence,
  pub end_date:  Option<NaiveDate>,
  pub on_change:
    Callback<RecurrenceSelection>
}

/// Stateless: renders the props and
/// reports the selection the user asked
/// for.
#[function_component(RecurrencePicker)]
pub fn recurrence_picker(
  props: &RecurrencePickerProps
) -> Html {
  let selection = RecurrenceSelection::new(
    props.value,
    props.end_date
  );

  let on_mode_change = {
    let on_change = props.on_change.clone();
    Callback::from(move |e: web_sys::Event| {
      let select: web_sys::HtmlSelectElement =
        e.target_unchecked_into();
      match Recurrence::parse(&select.value()) {
        | Some(mode) => {
          on_change
            .emit(selection.with_mode(mode));
        }
        | None => {
          tracing::warn!(
            value = %select.value(),
            "unknown recurrence option"
          );
        }
      }
    })
  };

  let on_end_date_change = {
    let on_change = props.on_change.clone();
    Callback::from(move |e: web_sys::Event| {
      let input: web_sys::HtmlInputElement =
        e.target_unchecked_into();
      on_change.emit(
        selection.with_end_date(
          parse_date_input(&input.value())
        )
      );
    })
  };

  html! {
      <div class="recurrence-picker">
          <div class="field">
              <label>{ "Recurrence" }</label>
              <select onchange={on_mode_change}>
                  {
                      for recurrence_options().into_iter().map(|(value, label)| html! {
                          <option value={value} selected={value == props.value.as_str()}>{ label }</option>
                      })
                  }
              </select>
          </div>
          {
              if selection.shows_end_date() {
                  html! {
                      <div class="field">
                          <label>{ "Ends on" }</label>
                          <input
                              type="date"
                              value={selection.end_date_input()}
                              onchange={on_end_date_change}
                          />
                      </div>
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
