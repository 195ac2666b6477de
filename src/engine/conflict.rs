use chrono::NaiveDate;

use crate::model::*;

use super::store::ReservationStore;
use super::EngineError;

/// First reservation on the same resource and date whose span overlaps `span`,
/// skipping `exclude` (the entry being replaced by a reprogram).
pub(crate) fn find_conflict<'a>(
    store: &'a ReservationStore,
    resource_id: &'a str,
    date: NaiveDate,
    span: &Span,
    exclude: Option<&ReservationKey>,
) -> Option<&'a Reservation> {
    store
        .matching(resource_id, date)
        .filter(|r| exclude != Some(&r.key))
        .find(|r| r.span.overlaps(span))
}

pub(crate) fn check_no_conflict(
    store: &ReservationStore,
    resource_id: &str,
    date: NaiveDate,
    span: &Span,
    exclude: Option<&ReservationKey>,
) -> Result<(), EngineError> {
    match find_conflict(store, resource_id, date, span, exclude) {
        Some(existing) => Err(EngineError::OverlappingReservation {
            existing: existing.key.clone(),
        }),
        None => Ok(()),
    }
}

/// Spans must be non-empty and no longer than `max_minutes`.
pub(crate) fn validate_span(span: &Span, start: &str, end: &str, max_minutes: i64) -> Result<(), EngineError> {
    if span.start >= span.end {
        return Err(EngineError::InvertedTimeRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    let minutes = span.duration_minutes();
    if minutes > max_minutes {
        return Err(EngineError::DurationExceeded { minutes, max: max_minutes });
    }
    Ok(())
}
