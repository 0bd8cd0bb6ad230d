//! Shared primitive IDs and trip-related enums.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Timestamp-seeded, strictly increasing trip identifier.
pub type TripId = u64;

/// Fixed set of trip categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Outdoor and adventure travel.
    #[default]
    Adventure,
    /// Beach, spa and other downtime.
    Relaxation,
    /// Museums, history, food.
    Cultural,
    /// Work travel.
    Business,
    /// Family holidays.
    Family,
    /// Driving trips.
    RoadTrip,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 6] = [
        Category::Adventure,
        Category::Relaxation,
        Category::Cultural,
        Category::Business,
        Category::Family,
        Category::RoadTrip,
    ];

    /// Stored and wire name, e.g. `road-trip`.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Adventure => "adventure",
            Category::Relaxation => "relaxation",
            Category::Cultural => "cultural",
            Category::Business => "business",
            Category::Family => "family",
            Category::RoadTrip => "road-trip",
        }
    }

    /// Human label: first letter capitalized, dash replaced by a space.
    pub fn label(self) -> &'static str {
        match self {
            Category::Adventure => "Adventure",
            Category::Relaxation => "Relaxation",
            Category::Cultural => "Cultural",
            Category::Business => "Business",
            Category::Family => "Family",
            Category::RoadTrip => "Road trip",
        }
    }

    /// Card badge glyph.
    pub fn emoji(self) -> &'static str {
        match self {
            Category::Adventure => "🏔️",
            Category::Relaxation => "🏖️",
            Category::Cultural => "🏛️",
            Category::Business => "💼",
            Category::Family => "👨‍👩‍👧‍👦",
            Category::RoadTrip => "🚗",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown trip category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Category filter applied by list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Pass every trip.
    #[default]
    All,
    /// Keep only trips of this category.
    Only(Category),
}

impl CategoryFilter {
    /// Returns true when `category` passes the filter.
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Ordering applied to a filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Descending by id.
    #[default]
    Newest,
    /// Ascending by id.
    Oldest,
    /// Ascending by destination, case-insensitive.
    Destination,
    /// Descending by budget.
    BudgetHigh,
    /// Ascending by budget.
    BudgetLow,
    /// Keep collection order.
    Unordered,
}

impl SortKey {
    /// Maps a select-box value to a sort key; unknown values keep collection order.
    pub fn parse(s: &str) -> Self {
        match s {
            "newest" => SortKey::Newest,
            "oldest" => SortKey::Oldest,
            "destination" => SortKey::Destination,
            "budget-high" => SortKey::BudgetHigh,
            "budget-low" => SortKey::BudgetLow,
            _ => SortKey::Unordered,
        }
    }
}
