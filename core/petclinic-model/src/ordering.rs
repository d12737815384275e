//! Fixed presentation order for owned collections.
//!
//! Pets are ordered by name ignoring case, visits by date ascending and a
//! vet's specialties by name ignoring case. All orderings are stable: equal
//! keys keep their insertion order. The model applies these on every
//! mutation, so readers (including the projector) can trust iteration order.

use crate::{Named, Pet, Specialty, Visit};
use std::cmp::Ordering;

/// Case-insensitive name comparison.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Sorts pets by name, ignoring case.
pub fn sort_pets_by_name(pets: &mut [Pet]) {
    pets.sort_by(|a, b| compare_names(a.name(), b.name()));
}

/// Sorts visits by date, oldest first.
pub fn sort_visits_by_date(visits: &mut [Visit]) {
    visits.sort_by_key(|v| v.date);
}

/// Sorts specialties by name, ignoring case.
pub fn sort_specialties_by_name(specialties: &mut [Specialty]) {
    specialties.sort_by(|a, b| compare_names(a.name(), b.name()));
}

/// Inserts `item` after every element that does not compare greater.
pub(crate) fn insert_sorted<T>(items: &mut Vec<T>, item: T, cmp: impl Fn(&T, &T) -> Ordering) {
    let at = items.partition_point(|existing| cmp(existing, &item) != Ordering::Greater);
    items.insert(at, item);
}

pub(crate) fn pet_order(a: &Pet, b: &Pet) -> Ordering {
    compare_names(a.name(), b.name())
}

pub(crate) fn visit_order(a: &Visit, b: &Visit) -> Ordering {
    a.date.cmp(&b.date)
}

pub(crate) fn specialty_order(a: &Specialty, b: &Specialty) -> Ordering {
    compare_names(a.name(), b.name())
}
