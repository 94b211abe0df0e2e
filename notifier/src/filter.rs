//! Recency-window selection of checked-in guests.
//!
//! The system keeps no state between runs; a guest counts as newly checked
//! in iff its check-in instant falls inside the window supplied for the
//! current cycle. The scheduling cadence must stay at or below the window
//! length or a check-in can fall between two samples.

use chrono::{DateTime, Duration, Utc};
use shared::Guest;

/// "Recent" means `[reference - duration, ..)`: inclusive at the lower
/// bound, unbounded above so future-skewed upstream clocks are tolerated.
#[derive(Debug, Clone, Copy)]
pub struct RecencyWindow {
    reference: DateTime<Utc>,
    duration: Duration,
}

impl RecencyWindow {
    pub fn ending_at(reference: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            reference,
            duration,
        }
    }

    /// Lower bound of the window. Boundary-equal instants count as recent.
    pub fn cutoff(&self) -> DateTime<Utc> {
        self.reference - self.duration
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.cutoff()
    }
}

/// Select the guests whose check-in falls inside `window`.
///
/// Guests without a check-in record are never selected. A guest whose
/// timestamp does not parse is excluded and reported through `tracing`,
/// never silently dropped. Input order is preserved.
pub fn select_recent<'a>(guests: &'a [Guest], window: &RecencyWindow) -> Vec<&'a Guest> {
    let mut selected = Vec::new();

    for guest in guests {
        let Some(raw) = guest.checked_in_at() else {
            continue;
        };

        match parse_checkin_timestamp(raw) {
            Ok(instant) => {
                if window.contains(instant) {
                    selected.push(guest);
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Skipping guest {:?}: unparseable check-in timestamp {:?}: {}",
                    guest.name,
                    raw,
                    e
                );
            }
        }
    }

    selected
}

/// Parse an upstream check-in timestamp into a zone-agnostic instant.
///
/// The upstream expresses check-in times as RFC 3339 with an explicit zone
/// marker (usually a trailing `Z`).
pub fn parse_checkin_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::CheckinInfo;

    fn guest(name: &str, checked_in_at: Option<&str>) -> Guest {
        Guest {
            api_id: format!("gst-{name}"),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            ticket_type: None,
            checkin_info: checked_in_at.map(|t| CheckinInfo {
                checked_in_at: Some(t.to_string()),
            }),
            registration_answers: Vec::new(),
        }
    }

    fn window_ending_at(reference: &str, secs: i64) -> RecencyWindow {
        let reference = parse_checkin_timestamp(reference).expect("test reference must parse");
        RecencyWindow::ending_at(reference, Duration::seconds(secs))
    }

    #[test]
    fn test_guest_without_checkin_never_selected() {
        let guests = vec![guest("bob", None)];

        for secs in [0, 300, 86_400] {
            let window = window_ending_at("2024-03-01T12:00:00Z", secs);
            assert!(select_recent(&guests, &window).is_empty());
        }
    }

    #[test]
    fn test_boundary_equal_timestamp_is_selected() {
        // Cutoff is 11:55:00 exactly; inclusive lower bound.
        let guests = vec![guest("jane", Some("2024-03-01T11:55:00Z"))];
        let window = window_ending_at("2024-03-01T12:00:00Z", 300);

        let selected = select_recent(&guests, &window);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "jane");
    }

    #[test]
    fn test_older_than_window_is_excluded() {
        let guests = vec![guest("jane", Some("2024-03-01T11:54:59Z"))];
        let window = window_ending_at("2024-03-01T12:00:00Z", 300);

        assert!(select_recent(&guests, &window).is_empty());
    }

    #[test]
    fn test_future_skewed_timestamp_is_tolerated() {
        let guests = vec![guest("jane", Some("2024-03-01T12:07:00Z"))];
        let window = window_ending_at("2024-03-01T12:00:00Z", 300);

        assert_eq!(select_recent(&guests, &window).len(), 1);
    }

    #[test]
    fn test_malformed_timestamp_is_excluded_without_panicking() {
        let guests = vec![
            guest("bad", Some("not-a-timestamp")),
            guest("also-bad", Some("2024-13-99T99:99:99Z")),
            guest("good", Some("2024-03-01T11:58:00Z")),
        ];
        let window = window_ending_at("2024-03-01T12:00:00Z", 300);

        let selected = select_recent(&guests, &window);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "good");
    }

    #[test]
    fn test_selection_preserves_input_order() {
        let guests = vec![
            guest("first", Some("2024-03-01T11:59:00Z")),
            guest("second", Some("2024-03-01T11:56:00Z")),
            guest("third", Some("2024-03-01T11:58:30Z")),
        ];
        let window = window_ending_at("2024-03-01T12:00:00Z", 300);

        let names: Vec<&str> = select_recent(&guests, &window)
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_offset_timestamps_normalize_to_utc() {
        // 20:55 at +09:00 is 11:55 UTC, exactly on the cutoff.
        let guests = vec![guest("jane", Some("2024-03-01T20:55:00+09:00"))];
        let window = window_ending_at("2024-03-01T12:00:00Z", 300);

        assert_eq!(select_recent(&guests, &window).len(), 1);
    }
}
