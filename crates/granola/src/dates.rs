//! Date expressions and note listing filters.
//!
//! Named expressions (`today`, `yesterday`, `last week`, `last month`) are
//! anchored to local midnight and end-exclusive. Explicit `YYYY-MM-DD` dates
//! cover the whole day and are end-inclusive up to `23:59:59.999`.

use chrono::{
  DateTime, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{GranolaError, Result};
use crate::model::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndBound {
  Exclusive(DateTime<Utc>),
  Inclusive(DateTime<Utc>),
}

impl EndBound {
  fn admits(&self, instant: DateTime<Utc>) -> bool {
    match self {
      EndBound::Exclusive(end) => instant < *end,
      EndBound::Inclusive(end) => instant <= *end,
    }
  }
}

/// A window of instants; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
  pub start: Option<DateTime<Utc>>,
  pub end: Option<EndBound>,
}

impl DateRange {
  pub fn contains(&self, instant: DateTime<Utc>) -> bool {
    self.start.map_or(true, |start| instant >= start)
      && self.end.map_or(true, |end| end.admits(instant))
  }

  pub fn is_unbounded(&self) -> bool {
    self.start.is_none() && self.end.is_none()
  }
}

/// Listing parameters as they arrive from a tool call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCriteria {
  #[serde(default)]
  pub date: Option<String>,
  #[serde(default)]
  pub start_date: Option<String>,
  #[serde(default)]
  pub end_date: Option<String>,
  #[serde(default, deserialize_with = "whole_number")]
  pub limit: Option<usize>,
}

/// Accept any JSON number for a count, truncating fractions and clamping
/// negatives to zero.
fn whole_number<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> std::result::Result<Option<usize>, D::Error> {
  let value = Option::<f64>::deserialize(deserializer)?;
  Ok(value.filter(|v| v.is_finite()).map(|v| v.max(0.0) as usize))
}

impl ListCriteria {
  /// Bounds described by these criteria. A single `date` expression takes
  /// precedence over `start_date`/`end_date`.
  pub fn date_range_in<Tz: TimeZone>(&self, tz: &Tz, today: NaiveDate) -> Result<DateRange> {
    if let Some(expr) = non_empty(&self.date) {
      return parse_date_expression_in(expr, tz, today);
    }

    let start = non_empty(&self.start_date)
      .map(|raw| parse_explicit_date(raw).map(|date| start_of_day(tz, date)))
      .transpose()?;
    let end = non_empty(&self.end_date)
      .map(|raw| parse_explicit_date(raw).map(|date| EndBound::Inclusive(end_of_day(tz, date))))
      .transpose()?;

    Ok(DateRange { start, end })
  }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Parse a date expression relative to the local calendar day.
pub fn parse_date_expression(expr: &str) -> Result<DateRange> {
  parse_date_expression_in(expr, &Local, Local::now().date_naive())
}

pub fn parse_date_expression_in<Tz: TimeZone>(
  expr: &str,
  tz: &Tz,
  today: NaiveDate,
) -> Result<DateRange> {
  let today_start = start_of_day(tz, today);
  let tomorrow_start = start_of_day(tz, today + Duration::days(1));

  let (start, end) = match expr.trim().to_lowercase().as_str() {
    "today" => (today_start, EndBound::Exclusive(tomorrow_start)),
    "yesterday" => {
      (start_of_day(tz, today - Duration::days(1)), EndBound::Exclusive(today_start))
    }
    "last week" => {
      (start_of_day(tz, today - Duration::days(7)), EndBound::Exclusive(tomorrow_start))
    }
    // 31 March goes back to 29 February, not forward into March
    "last month" => {
      let month_ago = today.checked_sub_months(Months::new(1)).unwrap_or(today);
      (start_of_day(tz, month_ago), EndBound::Exclusive(tomorrow_start))
    }
    _ => {
      let date = parse_explicit_date(expr)?;
      (start_of_day(tz, date), EndBound::Inclusive(end_of_day(tz, date)))
    }
  };

  Ok(DateRange { start: Some(start), end: Some(end) })
}

fn parse_explicit_date(raw: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| GranolaError::invalid_date(raw))
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
  local_instant(tz, date.and_time(NaiveTime::MIN))
}

fn end_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
  let last_milli = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
  local_instant(tz, date.and_time(last_milli))
}

/// Resolve a wall-clock time in `tz`. Ambiguous times take the earlier
/// instant; times inside a DST gap move forward to the first valid hour.
fn local_instant<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
  (0..=3)
    .find_map(|shift| tz.from_local_datetime(&(naive + Duration::hours(shift))).earliest())
    .map(|dt| dt.with_timezone(&Utc))
    .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(raw.trim()).ok().map(|dt| dt.with_timezone(&Utc))
}

/// Filter by local calendar days, newest first, truncated to the limit.
pub fn filter_and_sort(
  documents: Vec<Document>,
  criteria: &ListCriteria,
  default_limit: usize,
) -> Result<Vec<Document>> {
  filter_and_sort_in(documents, criteria, default_limit, &Local, Local::now().date_naive())
}

pub fn filter_and_sort_in<Tz: TimeZone>(
  documents: Vec<Document>,
  criteria: &ListCriteria,
  default_limit: usize,
  tz: &Tz,
  today: NaiveDate,
) -> Result<Vec<Document>> {
  let range = criteria.date_range_in(tz, today)?;

  let mut dated: Vec<(Option<DateTime<Utc>>, Document)> = documents
    .into_iter()
    .map(|doc| (doc.created_at.as_deref().and_then(parse_instant), doc))
    .filter(|(instant, _)| match instant {
      Some(instant) => range.contains(*instant),
      None => range.is_unbounded(),
    })
    .collect();

  // Stable: equal timestamps keep their source order. Unparseable last.
  dated.sort_by(|(a, _), (b, _)| b.cmp(a));

  let limit = criteria.limit.unwrap_or(default_limit);
  Ok(dated.into_iter().take(limit).map(|(_, doc)| doc).collect())
}
