//! Validation of raw user input before it reaches the tracker.

use crate::{Error, Item, ItemKind, Result};

const FILL_ALL_FIELDS: &str = "Please fill in all fields";
const INVALID_LIMIT: &str = "Please add a valid limit";

/// Largest calorie magnitude accepted for an item or a limit
pub const MAX_CALORIES: i64 = i32::MAX as i64;

/// A validated name/calories pair
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemInput {
    pub name: String,
    pub calories: i64,
}

impl ItemInput {
    /// Validate a name and calorie count as typed by the user.
    ///
    /// The name is trimmed. Calories must be an integer of magnitude at
    /// most `MAX_CALORIES`, so running totals stay far from `i64` bounds.
    pub fn parse(name: &str, calories: &str) -> Result<Self> {
        let name = name.trim();
        let calories = calories.trim();
        if name.is_empty() || calories.is_empty() {
            return Err(Error::Validation(FILL_ALL_FIELDS.into()));
        }

        let calories = calories.parse::<i64>().map_err(|_| {
            Error::Validation(format!("Calories must be a whole number, got '{}'", calories))
        })?;
        if !(-MAX_CALORIES..=MAX_CALORIES).contains(&calories) {
            return Err(Error::Validation(format!(
                "Calories must be between -{} and {}",
                MAX_CALORIES, MAX_CALORIES
            )));
        }

        Ok(Self {
            name: name.to_string(),
            calories,
        })
    }

    pub fn into_item(self, kind: ItemKind) -> Item {
        match kind {
            ItemKind::Meal => Item::meal(self.name, self.calories),
            ItemKind::Workout => Item::workout(self.name, self.calories),
        }
    }
}

/// Parse a calorie limit; it must be a positive integer up to `MAX_CALORIES`
pub fn parse_limit(text: &str) -> Result<i64> {
    match text.trim().parse::<i64>() {
        Ok(limit) if limit > 0 && limit <= MAX_CALORIES => Ok(limit),
        _ => Err(Error::Validation(INVALID_LIMIT.into())),
    }
}
