use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Half-open interval `[start, end)` of absolute instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Span {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn duration_minutes(&self) -> i64 {
        crate::time::duration_minutes(self.start, self.end)
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Identity of a reservation: resource, date and the clock texts exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReservationKey {
    pub resource_id: String,
    pub date: String,
    pub start: String,
    pub end: String,
}

impl ReservationKey {
    pub fn new(resource_id: &str, date: &str, start: &str, end: &str) -> Self {
        Self {
            resource_id: resource_id.to_string(),
            date: date.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

impl fmt::Display for ReservationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}_{}", self.resource_id, self.date, self.start, self.end)
    }
}

/// A confirmed booking held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub key: ReservationKey,
    pub user: Option<String>,
    pub date: NaiveDate,
    pub span: Span,
}

impl Reservation {
    pub fn resource_id(&self) -> &str {
        &self.key.resource_id
    }

    pub fn info(&self) -> ReservationInfo {
        ReservationInfo {
            resource_id: self.key.resource_id.clone(),
            date: self.key.date.clone(),
            start: self.key.start.clone(),
            end: self.key.end.clone(),
            user: self.user.clone(),
        }
    }
}

/// A parsed instruction. Fields are raw tokens; the engine does all semantic checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reserve {
        resource_id: String,
        user: Option<String>,
        date: String,
        start: String,
        end: String,
    },
    Cancel {
        resource_id: String,
        date: String,
        start: String,
        end: String,
    },
    List,
    Reprogram {
        resource_id: String,
        date: String,
        old_start: String,
        old_end: String,
        new_start: String,
        new_end: String,
    },
    Blank,
}

// ── Result types ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationInfo {
    pub resource_id: String,
    pub date: String,
    pub start: String,
    pub end: String,
    pub user: Option<String>,
}

/// Emitted alongside a reservation whose start is close to "now".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingNotice {
    pub resource_id: String,
    pub start: NaiveDateTime,
    pub minutes_until_start: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Reserved {
        reservation: ReservationInfo,
        notice: Option<UpcomingNotice>,
    },
    Cancelled {
        reservation: ReservationInfo,
    },
    Listing {
        reservations: Vec<ReservationInfo>,
    },
    NoReservations,
    Reprogrammed {
        old: ReservationInfo,
        new: ReservationInfo,
    },
    Nothing,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Reserved { reservation: r, notice } => {
                write!(f, "Reservado: {} para {} de {} a {}", r.resource_id, r.date, r.start, r.end)?;
                if let Some(user) = &r.user {
                    write!(f, " por {user}")?;
                }
                if let Some(n) = notice {
                    write!(
                        f,
                        "\nAviso: la reserva de {} comienza en {} minutos",
                        n.resource_id, n.minutes_until_start
                    )?;
                }
                Ok(())
            }
            Outcome::Cancelled { reservation: r } => {
                write!(f, "Cancelado: {} para {} de {} a {}", r.resource_id, r.date, r.start, r.end)
            }
            Outcome::Listing { reservations } => {
                let mut first = true;
                for r in reservations {
                    if !first {
                        writeln!(f)?;
                    }
                    first = false;
                    write!(f, "{} {} {} {}", r.resource_id, r.date, r.start, r.end)?;
                    write!(f, " {}", r.user.as_deref().unwrap_or("-"))?;
                }
                Ok(())
            }
            Outcome::NoReservations => write!(f, "No hay reservas"),
            Outcome::Reprogrammed { old, new } => write!(
                f,
                "Reprogramado: {} para {} de {} a {} -> de {} a {}",
                old.resource_id, old.date, old.start, old.end, new.start, new.end
            ),
            Outcome::Nothing => Ok(()),
        }
    }
}
