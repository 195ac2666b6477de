use chrono::NaiveDate;
use tracing::info;

use crate::model::*;
use crate::time::{combine, duration_minutes, parse_clock_time, parse_date};

use super::conflict::{check_no_conflict, validate_span};
use super::{Engine, EngineError};

/// Resolve a date and a pair of clock texts into a span. Times are checked before the date.
fn resolve_span(date: &str, start: &str, end: &str) -> Result<(NaiveDate, Span), EngineError> {
    let start_clock = parse_clock_time(start)?;
    let end_clock = parse_clock_time(end)?;
    let day = parse_date(date)?;
    Ok((day, Span::new(combine(day, start_clock), combine(day, end_clock))))
}

impl Engine {
    pub(super) fn reserve(
        &mut self,
        resource_id: &str,
        user: Option<String>,
        date: &str,
        start: &str,
        end: &str,
    ) -> Result<Outcome, EngineError> {
        let (day, span) = resolve_span(date, start, end)?;
        validate_span(&span, start, end, self.max_duration_minutes)?;
        self.check_limits(resource_id, user.as_deref())?;
        check_no_conflict(&self.store, resource_id, day, &span, None)?;

        let key = ReservationKey::new(resource_id, date, start, end);
        let reservation = Reservation {
            key: key.clone(),
            user,
            date: day,
            span,
        };
        let notice = self.upcoming_notice(&reservation);
        let info = reservation.info();
        self.store.insert(reservation)?;
        info!(%key, "reserved");

        if notice.is_some() {
            metrics::counter!(crate::observability::UPCOMING_NOTICES_TOTAL).increment(1);
        }
        Ok(Outcome::Reserved {
            reservation: info,
            notice,
        })
    }

    pub(super) fn cancel(
        &mut self,
        resource_id: &str,
        date: &str,
        start: &str,
        end: &str,
    ) -> Result<Outcome, EngineError> {
        let key = ReservationKey::new(resource_id, date, start, end);
        let removed = self.store.remove(&key)?;
        info!(%key, "cancelled");
        Ok(Outcome::Cancelled {
            reservation: removed.info(),
        })
    }

    /// Move a reservation to a new time range on the same resource and date.
    ///
    /// Only the formats of the new times are checked; the range itself is not
    /// validated for ordering or length.
    pub(super) fn reprogram(
        &mut self,
        resource_id: &str,
        date: &str,
        old_start: &str,
        old_end: &str,
        new_start: &str,
        new_end: &str,
    ) -> Result<Outcome, EngineError> {
        let old_key = ReservationKey::new(resource_id, date, old_start, old_end);
        let old = self
            .store
            .get(&old_key)
            .ok_or_else(|| EngineError::NoSuchReservation(old_key.clone()))?;
        let day = old.date;
        let user = old.user.clone();

        let span = Span::new(
            combine(day, parse_clock_time(new_start)?),
            combine(day, parse_clock_time(new_end)?),
        );
        check_no_conflict(&self.store, resource_id, day, &span, Some(&old_key))?;

        let new_key = ReservationKey::new(resource_id, date, new_start, new_end);
        if new_key != old_key && self.store.contains(&new_key) {
            return Err(EngineError::DuplicateKey(new_key));
        }

        let old = self.store.remove(&old_key)?;
        let replacement = Reservation {
            key: new_key,
            user,
            date: day,
            span,
        };
        let new_info = replacement.info();
        info!(old = %old.key, new = %replacement.key, "reprogrammed");
        self.store.insert(replacement)?;

        Ok(Outcome::Reprogrammed {
            old: old.info(),
            new: new_info,
        })
    }

    fn upcoming_notice(&self, reservation: &Reservation) -> Option<UpcomingNotice> {
        let now = self.clock.now();
        let start = reservation.span.start;
        let window_secs = self.notice_window_minutes.saturating_mul(60);
        if start < now || (start - now).num_seconds() > window_secs {
            return None;
        }
        Some(UpcomingNotice {
            resource_id: reservation.key.resource_id.clone(),
            start,
            minutes_until_start: duration_minutes(now, start),
        })
    }
}
