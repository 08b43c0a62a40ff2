//! Time arithmetic for tracking sessions.
//!
//! Durations handed to the form are whole minutes, rounded down. The display
//! works in seconds.

use chrono::{
  DateTime,
  Utc
};

use crate::task::{
  ActiveTracking,
  TimeEntry
};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum TrackingMode {
  #[default]
  Elapsed,
  Countdown
}

impl TrackingMode {
  pub fn for_session(
    session: Option<&ActiveTracking>
  ) -> Self {
    match session {
      | Some(s) if s.is_countdown() => {
        TrackingMode::Countdown
      }
      | _ => TrackingMode::Elapsed
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      | TrackingMode::Elapsed => {
        "elapsed"
      }
      | TrackingMode::Countdown => {
        "countdown"
      }
    }
  }

  pub fn parse(
    raw: &str
  ) -> Option<Self> {
    match raw {
      | "elapsed" => {
        Some(TrackingMode::Elapsed)
      }
      | "countdown" => {
        Some(TrackingMode::Countdown)
      }
      | _ => None
    }
  }
}

pub fn elapsed_seconds(
  start: DateTime<Utc>,
  now: DateTime<Utc>
) -> i64 {
  (now - start).num_seconds().max(0)
}

pub fn elapsed_minutes(
  start: DateTime<Utc>,
  now: DateTime<Utc>
) -> u32 {
  u32::try_from(
    elapsed_seconds(start, now) / 60
  )
  .unwrap_or(u32::MAX)
}

/// Seconds left on a countdown session,
/// saturating at zero. `None` for an
/// open-ended session.
pub fn countdown_remaining(
  session: &ActiveTracking,
  now: DateTime<Utc>
) -> Option<i64> {
  let minutes =
    session.countdown_minutes?;
  let total = i64::from(minutes) * 60;
  Some(
    (total
      - elapsed_seconds(
        session.start,
        now
      ))
    .max(0)
  )
}

pub fn countdown_finished(
  session: &ActiveTracking,
  now: DateTime<Utc>
) -> bool {
  countdown_remaining(session, now)
    == Some(0)
}

/// Minutes to record when the session is
/// stopped at `now`. A countdown never
/// records more than it was set for.
pub fn session_minutes(
  session: &ActiveTracking,
  now: DateTime<Utc>
) -> u32 {
  let elapsed =
    elapsed_minutes(session.start, now);
  match session.countdown_minutes {
    | Some(limit) => elapsed.min(limit),
    | None => elapsed
  }
}

pub fn total_tracked_minutes(
  entries: &[TimeEntry]
) -> u32 {
  entries
    .iter()
    .filter_map(|entry| entry.duration)
    .fold(0_u32, u32::saturating_add)
}

pub fn clock_label(
  seconds: i64
) -> String {
  let seconds = seconds.max(0);
  format!(
    "{:02}:{:02}:{:02}",
    seconds / 3600,
    (seconds % 3600) / 60,
    seconds % 60
  )
}

pub fn minutes_label(
  minutes: u32
) -> String {
  if minutes < 60 {
    format!("{minutes}m")
  } else {
    format!(
      "{}h {:02}m",
      minutes / 60,
      minutes % 60
    )
  }
}
