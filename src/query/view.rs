use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{
    trip::Trip,
    types::{CategoryFilter, SortKey},
};

/// Filters `trips` and returns the survivors in `sort` order.
///
/// The input slice is untouched; ties keep their collection order.
pub fn filter_sorted<'a>(trips: &'a [Trip], filter: CategoryFilter, sort: SortKey) -> Vec<&'a Trip> {
    positions(trips, filter, sort)
        .into_iter()
        .map(|idx| &trips[idx])
        .collect()
}

/// Same as [`filter_sorted`] but yields indices into `trips`.
pub fn positions(trips: &[Trip], filter: CategoryFilter, sort: SortKey) -> Vec<usize> {
    let mut out: Vec<usize> = trips
        .iter()
        .enumerate()
        .filter(|(_, trip)| filter.matches(trip.category))
        .map(|(idx, _)| idx)
        .collect();

    if sort != SortKey::Unordered {
        out.sort_by(|a, b| compare(&trips[*a], &trips[*b], sort));
    }
    out
}

/// Total order used by `sort`; [`SortKey::Unordered`] treats everything as equal.
pub fn compare(a: &Trip, b: &Trip, sort: SortKey) -> Ordering {
    match sort {
        SortKey::Newest => b.id.cmp(&a.id),
        SortKey::Oldest => a.id.cmp(&b.id),
        SortKey::Destination => collate(&a.destination, &b.destination),
        SortKey::BudgetHigh => b.budget.total_cmp(&a.budget),
        SortKey::BudgetLow => a.budget.total_cmp(&b.budget),
        SortKey::Unordered => Ordering::Equal,
    }
}

/// Accent- and case-insensitive text order.
///
/// Strings are compared on their base letters first (`Édimbourg` sorts with
/// the `e`s), then on accents, then on case, then byte-wise.
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowered(a).cmp(lowered(b)))
        .then_with(|| decomposed(a).cmp(decomposed(b)))
        .then_with(|| a.cmp(b))
}

fn decomposed(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
}

fn lowered(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    lowered(s).filter(|c| !is_combining_mark(*c))
}
