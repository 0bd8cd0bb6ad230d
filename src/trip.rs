//! Trip domain record, draft, patch, and validation types.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Category, TripId};

const MS_PER_DAY: i64 = 86_400_000;

/// Fully materialized, authoritative trip record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Stable identifier assigned at creation.
    pub id: TripId,
    /// Where the trip goes.
    pub destination: String,
    /// Length in days.
    #[serde(deserialize_with = "lenient::number")]
    pub duration: u32,
    /// First day of travel.
    pub start_date: NaiveDate,
    /// Planned spend.
    #[serde(deserialize_with = "lenient::amount")]
    pub budget: f64,
    /// Trip category.
    #[serde(default)]
    pub category: Category,
    /// Day-by-day plan.
    #[serde(default)]
    pub itinerary: String,
    /// Free-form notes, editable after creation.
    #[serde(default)]
    pub notes: String,
    /// Display-formatted creation date.
    pub created_at: String,
}

impl Trip {
    /// Whole days from `now` until the trip starts, rounded up.
    ///
    /// Zero means the trip starts today; negative values mean it has started.
    pub fn days_until(&self, now: DateTime<Utc>) -> i64 {
        days_until(self.start_date, now)
    }

    /// Countdown bucket for card display.
    pub fn countdown(&self, now: DateTime<Utc>) -> Countdown {
        Countdown::from_days(self.days_until(now))
    }
}

/// Ceiling of `(start_date - now)` in days, with `start_date` at midnight UTC.
pub fn days_until(start_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let start = start_date.and_time(NaiveTime::MIN).and_utc();
    let diff_ms = (start - now).num_milliseconds();
    let days = diff_ms.div_euclid(MS_PER_DAY);
    if diff_ms.rem_euclid(MS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

/// Days-until-trip classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Starts in this many days.
    Upcoming(u64),
    /// Starts today.
    Today,
    /// Started this many days ago.
    Past(u64),
}

impl Countdown {
    /// Classifies a signed day count.
    pub fn from_days(days: i64) -> Self {
        match days {
            0 => Countdown::Today,
            d if d > 0 => Countdown::Upcoming(d.unsigned_abs()),
            d => Countdown::Past(d.unsigned_abs()),
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Upcoming(n) => write!(f, "{n} day{} away", plural(*n)),
            Countdown::Today => f.write_str("Today!"),
            Countdown::Past(n) => write!(f, "Trip was {n} day{} ago", plural(*n)),
        }
    }
}

fn plural(n: u64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Creation payload for a new [`Trip`]; `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripDraft {
    /// Where the trip goes.
    pub destination: String,
    /// Length in days.
    pub duration: u32,
    /// First day of travel; `None` when the form left it blank.
    pub start_date: Option<NaiveDate>,
    /// Planned spend.
    pub budget: f64,
    /// Trip category.
    pub category: Category,
    /// Day-by-day plan.
    pub itinerary: String,
    /// Free-form notes.
    pub notes: String,
}

impl TripDraft {
    /// Checks the creation rules, collecting one message per failing field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.field_errors().into_result()
    }

    /// Validates and materializes the draft under the assigned identity.
    pub fn into_trip(self, id: TripId, created_at: String) -> Result<Trip, ValidationErrors> {
        let errors = self.field_errors();
        let (Some(start_date), true) = (self.start_date, errors.is_empty()) else {
            return Err(errors);
        };

        Ok(Trip {
            id,
            destination: self.destination,
            duration: self.duration,
            start_date,
            budget: self.budget,
            category: self.category,
            itinerary: self.itinerary,
            notes: self.notes,
            created_at,
        })
    }

    fn field_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        check_destination(&mut errors, &self.destination);
        check_duration(&mut errors, self.duration);
        if self.start_date.is_none() {
            errors.insert("startDate", "Start date is required");
        }
        check_budget(&mut errors, self.budget);
        errors
    }
}

/// Sparse patch where each `Some` field overwrites the record value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripPatch {
    /// Optional replacement destination.
    pub destination: Option<String>,
    /// Optional replacement duration.
    pub duration: Option<u32>,
    /// Optional replacement start date.
    pub start_date: Option<NaiveDate>,
    /// Optional replacement budget.
    pub budget: Option<f64>,
    /// Optional replacement category.
    pub category: Option<Category>,
    /// Optional replacement itinerary.
    pub itinerary: Option<String>,
    /// Optional replacement notes.
    pub notes: Option<String>,
}

impl TripPatch {
    /// Returns true when no fields are set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies the draft rules to the fields present in the patch.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Some(v) = &self.destination {
            check_destination(&mut errors, v);
        }
        if let Some(v) = self.duration {
            check_duration(&mut errors, v);
        }
        if let Some(v) = self.budget {
            check_budget(&mut errors, v);
        }
        errors.into_result()
    }

    /// Applies this patch in place to `trip`.
    pub fn apply_to(&self, trip: &mut Trip) {
        if let Some(v) = &self.destination {
            trip.destination = v.clone();
        }
        if let Some(v) = self.duration {
            trip.duration = v;
        }
        if let Some(v) = self.start_date {
            trip.start_date = v;
        }
        if let Some(v) = self.budget {
            trip.budget = v;
        }
        if let Some(v) = self.category {
            trip.category = v;
        }
        if let Some(v) = &self.itinerary {
            trip.itinerary = v.clone();
        }
        if let Some(v) = &self.notes {
            trip.notes = v.clone();
        }
    }
}

fn check_destination(errors: &mut ValidationErrors, destination: &str) {
    if destination.trim().is_empty() {
        errors.insert("destination", "Destination is required");
    }
}

fn check_duration(errors: &mut ValidationErrors, duration: u32) {
    if duration == 0 {
        errors.insert("duration", "Duration must be a positive number");
    }
}

fn check_budget(errors: &mut ValidationErrors, budget: f64) {
    // Non-finite amounts serialize as JSON null and would poison the snapshot.
    if !(budget.is_finite() && budget > 0.0) {
        errors.insert("budget", "Budget must be a positive number");
    }
}

/// Field-keyed, human-readable validation messages.
///
/// Keys use the stored field names (`destination`, `duration`, `startDate`, `budget`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    /// Message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Returns true when no field failed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterates `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn insert(&mut self, field: &'static str, message: &str) {
        self.fields.insert(field, message.to_string());
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (field, message)) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Snapshots written by the web form stored numeric fields as text.
mod lenient {
    use std::{fmt::Display, str::FromStr};

    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText<T> {
        Number(T),
        Text(String),
    }

    pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr,
        T::Err: Display,
    {
        match NumberOrText::<T>::deserialize(deserializer)? {
            NumberOrText::Number(v) => Ok(v),
            NumberOrText::Text(s) => s.trim().parse().map_err(D::Error::custom),
        }
    }

    pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: f64 = number(deserializer)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(D::Error::custom(format!("non-finite amount: {value}")))
        }
    }
}
