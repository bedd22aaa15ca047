//! Calendar projection of a user's meals.

use chrono::NaiveDate;

use super::{Meal, MealId, MealType};

/// A meal placed on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// The meal this event stands for.
    pub id: MealId,
    /// The meal caption.
    pub title: String,
    /// Date-only start; no time component.
    pub start: NaiveDate,
    /// Used by clients to colour the event.
    pub meal_type: MealType,
}

/// Map meals onto calendar events, preserving input order.
///
/// Meals without a `meal_date` are left off the calendar.
pub fn project_calendar(meals: &[Meal]) -> Vec<CalendarEvent> {
    meals
        .iter()
        .filter_map(|meal| {
            meal.meal_date().map(|start| CalendarEvent {
                id: meal.id(),
                title: meal.caption().to_owned(),
                start,
                meal_type: meal.meal_type(),
            })
        })
        .collect()
}
