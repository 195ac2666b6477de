use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::model::*;

use super::EngineError;

/// Active reservations, iterated in insertion order.
#[derive(Debug, Default)]
pub struct ReservationStore {
    /// Insertion sequence → reservation.
    entries: BTreeMap<u64, Reservation>,
    /// Identity key → insertion sequence.
    index: HashMap<ReservationKey, u64>,
    next_seq: u64,
}

impl ReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &ReservationKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &ReservationKey) -> Option<&Reservation> {
        self.index.get(key).and_then(|seq| self.entries.get(seq))
    }

    pub fn insert(&mut self, reservation: Reservation) -> Result<(), EngineError> {
        if self.index.contains_key(&reservation.key) {
            return Err(EngineError::DuplicateKey(reservation.key));
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(reservation.key.clone(), seq);
        self.entries.insert(seq, reservation);
        Ok(())
    }

    pub fn remove(&mut self, key: &ReservationKey) -> Result<Reservation, EngineError> {
        let seq = self
            .index
            .remove(key)
            .ok_or_else(|| EngineError::NoSuchReservation(key.clone()))?;
        self.entries
            .remove(&seq)
            .ok_or_else(|| EngineError::NoSuchReservation(key.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reservation> {
        self.entries.values()
    }

    /// Reservations on `resource_id` for `date`, in insertion order.
    pub fn matching<'a>(
        &'a self,
        resource_id: &'a str,
        date: NaiveDate,
    ) -> impl Iterator<Item = &'a Reservation> + 'a {
        self.entries
            .values()
            .filter(move |r| r.date == date && r.resource_id() == resource_id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ReservationKey> {
        self.entries.values().map(|r| &r.key)
    }
}
