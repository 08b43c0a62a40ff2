use chrono::NaiveDate;

use crate::task::Recurrence;

const DATE_INPUT_FORMAT: &str =
  "%Y-%m-%d";

/// What the recurrence picker shows. It
/// owns nothing: every change produces a
/// new selection for the caller to store.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub struct RecurrenceSelection {
  pub mode:     Recurrence,
  pub end_date: Option<NaiveDate>
}

impl RecurrenceSelection {
  pub fn new(
    mode: Recurrence,
    end_date: Option<NaiveDate>
  ) -> Self {
    Self {
      mode,
      end_date
    }
  }

  /// The end date is passed through
  /// untouched, even when switching to
  /// `Recurrence::None`.
  pub fn with_mode(
    self,
    mode: Recurrence
  ) -> Self {
    Self {
      mode,
      end_date: self.end_date
    }
  }

  pub fn with_end_date(
    self,
    end_date: Option<NaiveDate>
  ) -> Self {
    Self {
      mode: self.mode,
      end_date
    }
  }

  pub fn shows_end_date(&self) -> bool {
    self.mode.repeats()
  }

  pub fn end_date_input(&self) -> String {
    format_date_input(self.end_date)
  }
}

pub fn recurrence_options()
-> Vec<(&'static str, &'static str)> {
  Recurrence::ALL
    .iter()
    .map(|mode| {
      (mode.as_str(), mode.label())
    })
    .collect()
}

/// Parses the value of an
/// `<input type="date">`. Empty or
/// malformed input means "no date".
pub fn parse_date_input(
  raw: &str
) -> Option<NaiveDate> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }
  match NaiveDate::parse_from_str(
    trimmed,
    DATE_INPUT_FORMAT
  ) {
    | Ok(date) => Some(date),
    | Err(error) => {
      tracing::warn!(
        %error,
        raw = trimmed,
        "ignoring malformed date input"
      );
      None
    }
  }
}

pub fn format_date_input(
  date: Option<NaiveDate>
) -> String {
  date
    .map(|d| {
      d.format(DATE_INPUT_FORMAT)
        .to_string()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[test]
  fn changing_mode_keeps_end_date() {
    let weekly = RecurrenceSelection::new(
      Recurrence::Weekly,
      Some(date(2026, 12, 31))
    );

    let none =
      weekly.with_mode(Recurrence::None);
    assert_eq!(
      none.mode,
      Recurrence::None
    );
    assert_eq!(
      none.end_date,
      Some(date(2026, 12, 31))
    );
    assert!(!none.shows_end_date());
  }

  #[test]
  fn changing_end_date_keeps_mode() {
    let daily = RecurrenceSelection::new(
      Recurrence::Daily,
      None
    );

    let bounded = daily.with_end_date(
      Some(date(2027, 1, 15))
    );
    assert_eq!(
      bounded.mode,
      Recurrence::Daily
    );
    assert_eq!(
      bounded.end_date_input(),
      "2027-01-15"
    );

    let cleared =
      bounded.with_end_date(None);
    assert_eq!(
      cleared.mode,
      Recurrence::Daily
    );
    assert!(cleared.end_date.is_none());
  }

  #[test]
  fn date_input_parsing() {
    assert_eq!(
      parse_date_input("2026-10-19"),
      Some(date(2026, 10, 19))
    );
    assert_eq!(parse_date_input(""), None);
    assert_eq!(
      parse_date_input("19/10/2026"),
      None
    );
    assert_eq!(
      format_date_input(None),
      ""
    );
  }

  #[test]
  fn options_start_with_no_repeat() {
    let options = recurrence_options();
    assert_eq!(options.len(), 4);
    assert_eq!(
      options[0],
      ("none", "Does not repeat")
    );
    assert_eq!(
      options[3],
      ("monthly", "Monthly")
    );
  }
}
