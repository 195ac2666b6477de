use crate::model::*;

use super::Engine;

impl Engine {
    pub(super) fn list(&self) -> Outcome {
        if self.store.is_empty() {
            return Outcome::NoReservations;
        }
        Outcome::Listing {
            reservations: self.store.iter().map(Reservation::info).collect(),
        }
    }

    /// Snapshot of every active reservation in insertion order.
    pub fn reservations(&self) -> Vec<ReservationInfo> {
        self.store.iter().map(Reservation::info).collect()
    }
}
