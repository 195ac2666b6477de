use chrono::NaiveDateTime;

/// Source of "now" for upcoming-reservation notices.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time. There is no timezone handling; reservations are local.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
