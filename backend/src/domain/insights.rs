//! Per-user meal statistics.
//!
//! ## Tie-breaking
//! Every "most frequent" value resolves ties to the value encountered first
//! while iterating the input in order. Callers that want a different winner
//! must reorder the input.
//!
//! ## Captions
//! Captions are trimmed before counting, so `"eggs "` and `"eggs"` share a
//! bucket and the favourite is reported in trimmed form. Blank captions are
//! not counted.
//!
//! ## Missing `created_at`
//! Historical meals without `created_at` are grouped as if created at the
//! `now` passed to [`summarize`]. This substitution is not persisted, so such
//! a meal's month and weekday grouping changes between runs.

use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use super::{Meal, MealType};

/// Placeholder for favourites of an empty collection.
pub const NOT_AVAILABLE: &str = "N/A";
/// Number of meals returned in [`MealStats::recent_meals`].
pub const RECENT_MEALS_LIMIT: usize = 5;

/// One labelled count within an ordered breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelCount {
    /// Bucket name: `"Month Year"`, a meal type, or a weekday.
    #[schema(example = "January 2024")]
    pub label: String,
    /// Meals falling into the bucket.
    pub count: u64,
}

/// Aggregated statistics for one user's meals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealStats {
    pub total_count: u64,
    /// Most frequent non-empty trimmed caption, or [`NOT_AVAILABLE`].
    pub favorite_caption: String,
    /// Most frequent meal type, or [`NOT_AVAILABLE`].
    pub favorite_meal_type: String,
    /// `"Month Year"` buckets in first-seen order; only months with meals.
    pub meals_by_month: Vec<LabelCount>,
    /// Meal-type buckets in first-seen order.
    pub meals_by_meal_type: Vec<LabelCount>,
    /// Weekday buckets in first-seen order.
    pub meals_by_weekday: Vec<LabelCount>,
    /// Most frequent weekday of `created_at`, or [`NOT_AVAILABLE`].
    pub most_active_weekday: String,
    /// First [`RECENT_MEALS_LIMIT`] meals in input order.
    pub recent_meals: Vec<Meal>,
}

/// Insertion-ordered tally.
#[derive(Debug, Default)]
struct Tally {
    entries: Vec<LabelCount>,
}

impl Tally {
    fn add(&mut self, label: &str) {
        match self.entries.iter_mut().find(|entry| entry.label == label) {
            Some(entry) => entry.count += 1,
            None => self.entries.push(LabelCount {
                label: label.to_owned(),
                count: 1,
            }),
        }
    }

    /// First-seen label among those with the highest count.
    fn leader(&self) -> Option<&str> {
        let mut best: Option<&LabelCount> = None;
        for entry in &self.entries {
            if best.is_none_or(|current| entry.count > current.count) {
                best = Some(entry);
            }
        }
        best.map(|entry| entry.label.as_str())
    }

    fn leader_or_na(&self) -> String {
        self.leader().unwrap_or(NOT_AVAILABLE).to_owned()
    }

    fn into_entries(self) -> Vec<LabelCount> {
        self.entries
    }
}

fn month_label(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%B %Y").to_string()
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn meal_type_label(meal_type: MealType) -> &'static str {
    meal_type.as_str()
}

/// Derive [`MealStats`] from a user's meals.
///
/// `now` stands in for any missing `created_at`. An empty input yields zero
/// counts, empty breakdowns, and [`NOT_AVAILABLE`] favourites.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use mealbook::domain::{NOT_AVAILABLE, summarize};
///
/// let stats = summarize(&[], Utc::now());
/// assert_eq!(stats.total_count, 0);
/// assert_eq!(stats.favorite_caption, NOT_AVAILABLE);
/// ```
pub fn summarize(meals: &[Meal], now: DateTime<Utc>) -> MealStats {
    let mut captions = Tally::default();
    let mut meal_types = Tally::default();
    let mut months = Tally::default();
    let mut weekdays = Tally::default();

    for meal in meals {
        let caption = meal.caption().trim();
        if !caption.is_empty() {
            captions.add(caption);
        }
        meal_types.add(meal_type_label(meal.meal_type()));

        let created_at = meal.created_at().unwrap_or_else(|| {
            warn!(
                meal_id = %meal.id(),
                "meal has no created_at; grouping under the current time"
            );
            now
        });
        months.add(&month_label(created_at));
        weekdays.add(weekday_name(created_at.weekday()));
    }

    MealStats {
        total_count: meals.len() as u64,
        favorite_caption: captions.leader_or_na(),
        favorite_meal_type: meal_types.leader_or_na(),
        most_active_weekday: weekdays.leader_or_na(),
        meals_by_month: months.into_entries(),
        meals_by_meal_type: meal_types.into_entries(),
        meals_by_weekday: weekdays.into_entries(),
        recent_meals: meals.iter().take(RECENT_MEALS_LIMIT).cloned().collect(),
    }
}

#[cfg(test)]
#[path = "insights_tests.rs"]
mod tests;
