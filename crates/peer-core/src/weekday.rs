//! Weekday names used for availability.

use std::collections::HashSet;

/// The fixed week, in display order.
pub const WEEKDAYS: [&str; 7] = [
  "Monday",
  "Tuesday",
  "Wednesday",
  "Thursday",
  "Friday",
  "Saturday",
  "Sunday",
];

/// Position of `day` in [`WEEKDAYS`], ignoring case and surrounding space.
pub fn weekday_index(day: &str) -> Option<usize> {
  let day = day.trim();
  WEEKDAYS.iter().position(|d| d.eq_ignore_ascii_case(day))
}

/// Keep only recognised weekdays, in canonical casing, deduplicated and in
/// week order.
pub fn normalize_days<I, S>(days: I) -> Vec<String>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let mut indices: Vec<usize> = days
    .into_iter()
    .filter_map(|d| weekday_index(d.as_ref()))
    .collect::<HashSet<_>>()
    .into_iter()
    .collect();
  indices.sort_unstable();
  indices.into_iter().map(|i| WEEKDAYS[i].to_owned()).collect()
}
