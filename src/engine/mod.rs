mod conflict;
mod error;
mod mutations;
mod queries;
mod store;

pub use error::EngineError;
pub use store::ReservationStore;

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::limits::*;
use crate::model::*;
use crate::observability;

/// Applies commands, one at a time, to an owned reservation store.
///
/// `apply` takes `&mut self`; callers sharing an engine must serialize access.
pub struct Engine {
    pub(super) store: ReservationStore,
    pub(super) clock: Box<dyn Clock>,
    pub(super) max_duration_minutes: i64,
    pub(super) notice_window_minutes: i64,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(&Config::default(), Box::new(SystemClock))
    }
}

impl Engine {
    pub fn new(config: &Config, clock: Box<dyn Clock>) -> Self {
        Self {
            store: ReservationStore::new(),
            clock,
            max_duration_minutes: config.max_duration_minutes,
            notice_window_minutes: config.notice_window_minutes,
        }
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self::new(&Config::default(), Box::new(clock))
    }

    pub fn store(&self) -> &ReservationStore {
        &self.store
    }

    /// Apply one command. A rejected command leaves the store untouched.
    pub fn apply(&mut self, cmd: Command) -> Result<Outcome, EngineError> {
        let label = observability::command_label(&cmd);
        debug!(command = label, "applying");

        let result = match cmd {
            Command::Reserve {
                resource_id,
                user,
                date,
                start,
                end,
            } => self.reserve(&resource_id, user, &date, &start, &end),
            Command::Cancel {
                resource_id,
                date,
                start,
                end,
            } => self.cancel(&resource_id, &date, &start, &end),
            Command::List => Ok(self.list()),
            Command::Reprogram {
                resource_id,
                date,
                old_start,
                old_end,
                new_start,
                new_end,
            } => self.reprogram(&resource_id, &date, &old_start, &old_end, &new_start, &new_end),
            Command::Blank => Ok(Outcome::Nothing),
        };

        let status = match &result {
            Ok(_) => "ok",
            Err(e) => {
                warn!(command = label, error = e.kind(), "rejected: {e}");
                e.kind()
            }
        };
        metrics::counter!(observability::COMMANDS_TOTAL, "command" => label, "status" => status).increment(1);
        metrics::gauge!(observability::RESERVATIONS_ACTIVE).set(self.store.len() as f64);
        result
    }

    pub(super) fn check_limits(&self, resource_id: &str, user: Option<&str>) -> Result<(), EngineError> {
        if resource_id.len() > MAX_RESOURCE_ID_LEN {
            return Err(EngineError::LimitExceeded("resource id too long"));
        }
        if user.is_some_and(|u| u.len() > MAX_USER_LEN) {
            return Err(EngineError::LimitExceeded("user name too long"));
        }
        if self.store.len() >= MAX_RESERVATIONS {
            return Err(EngineError::LimitExceeded("too many reservations"));
        }
        Ok(())
    }
}
