use chrono::{
  DateTime,
  Utc
};
use gloo::timers::callback::Interval;
use taskdeck_core::task::{
  ActiveTracking,
  TimeEntry
};
use taskdeck_core::tracking::{
  TrackingMode,
  clock_label,
  countdown_finished,
  countdown_remaining,
  elapsed_seconds,
  minutes_label,
  session_minutes,
  total_tracked_minutes
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html,
  use_effect_with,
  use_state
};

const TICK_MS: u32 = 1_000;

#[derive(Properties, PartialEq)]
pub struct TimeTrackerProps {
  pub time_entries:      Vec<TimeEntry>,
  pub active:            Option<ActiveTracking>,
  pub mode:              TrackingMode,
  pub countdown_minutes: Option<u32>,
  pub countdown_presets: Vec<u32>,
  pub on_start:
    Callback<Option<u32>>,
  pub on_stop:           Callback<u32>,
  pub on_mode_change:
    Callback<TrackingMode>
}

/// Displays the running session and
/// measures it. Minutes are computed here
/// and handed to the form on stop.
#[function_component(TimeTracker)]
pub fn time_tracker(
  props: &TimeTrackerProps
) -> Html {
  let now = use_state(Utc::now);
  let preset = {
    let initial = props
      .countdown_minutes
      .or_else(|| {
        props
          .countdown_presets
          .first()
          .copied()
      })
      .unwrap_or(25);
    use_state(move || initial)
  };

  {
    let now = now.clone();
    use_effect_with(
      props.active,
      move |active| {
        let ticker = active.map(|_| {
          now.set(Utc::now());
          Interval::new(TICK_MS, move || {
            now.set(Utc::now());
          })
        });
        move || drop(ticker)
      }
    );
  }

  {
    let on_stop = props.on_stop.clone();
    use_effect_with(
      (props.active, *now),
      move |(active, now)| {
        if let Some(session) = active
          && countdown_finished(
            session, *now
          )
        {
          tracing::info!(
            "countdown finished; stopping \
             session"
          );
          on_stop.emit(session_minutes(
            session, *now
          ));
        }
        || ()
      }
    );
  }

  let on_mode_select = {
    let on_mode_change =
      props.on_mode_change.clone();
    Callback::from(move |e: web_sys::Event| {
      let select: web_sys::HtmlSelectElement =
        e.target_unchecked_into();
      if let Some(mode) =
        TrackingMode::parse(&select.value())
      {
        on_mode_change.emit(mode);
      }
    })
  };

  let on_preset_select = {
    let preset = preset.clone();
    Callback::from(move |e: web_sys::Event| {
      let select: web_sys::HtmlSelectElement =
        e.target_unchecked_into();
      match select.value().parse::<u32>() {
        | Ok(minutes) if minutes > 0 => {
          preset.set(minutes);
        }
        | _ => {
          tracing::warn!(
            value = %select.value(),
            "ignoring invalid countdown preset"
          );
        }
      }
    })
  };

  let on_start_click = {
    let on_start = props.on_start.clone();
    let mode = props.mode;
    let preset = *preset;
    Callback::from(move |_| {
      let countdown = match mode {
        | TrackingMode::Countdown => {
          Some(preset)
        }
        | TrackingMode::Elapsed => None
      };
      on_start.emit(countdown);
    })
  };

  let on_stop_click = {
    let on_stop = props.on_stop.clone();
    let active = props.active;
    Callback::from(move |_| {
      if let Some(session) = active {
        on_stop.emit(session_minutes(
          &session,
          Utc::now()
        ));
      }
    })
  };

  let total = total_tracked_minutes(
    &props.time_entries
  );

  html! {
      <div class="time-tracker">
          <div class="field">
              <label>{ "Mode" }</label>
              <select onchange={on_mode_select} disabled={props.active.is_some()}>
                  <option value="elapsed" selected={props.mode == TrackingMode::Elapsed}>{ "Stopwatch" }</option>
                  <option value="countdown" selected={props.mode == TrackingMode::Countdown}>{ "Countdown" }</option>
              </select>
          </div>
          {
              if props.mode == TrackingMode::Countdown && props.active.is_none() {
                  html! {
                      <div class="field">
                          <label>{ "Minutes" }</label>
                          <select onchange={on_preset_select}>
                              {
                                  for props.countdown_presets.iter().map(|minutes| html! {
                                      <option value={minutes.to_string()} selected={*minutes == *preset}>{ minutes_label(*minutes) }</option>
                                  })
                              }
                          </select>
                      </div>
                  }
              } else {
                  html! {}
              }
          }
          {
              match props.active {
                  Some(session) => html! {
                      <div class="tracker-running">
                          <span class="tracker-clock">{ running_label(&session, *now) }</span>
                          <button type="button" class="btn danger" onclick={on_stop_click}>{ "Stop" }</button>
                      </div>
                  },
                  None => html! {
                      <button type="button" class="btn" onclick={on_start_click}>{ "Start tracking" }</button>
                  },
              }
          }
          <div class="tracker-entries">
              <div class="tracker-total">{ format!("Total: {}", minutes_label(total)) }</div>
              {
                  for props.time_entries.iter().rev().take(5).map(|entry| html! {
                      <div class="tracker-entry">
                          <span>{ entry.start.format("%Y-%m-%d %H:%M").to_string() }</span>
                          <span class="badge">{ minutes_label(entry.duration.unwrap_or_default()) }</span>
                      </div>
                  })
              }
          </div>
      </div>
  }
}

fn running_label(
  session: &ActiveTracking,
  now: DateTime<Utc>
) -> String {
  match countdown_remaining(session, now) {
    | Some(remaining) => {
      format!(
        "{} left",
        clock_label(remaining)
      )
    }
    | None => clock_label(
      elapsed_seconds(session.start, now)
    )
  }
}
