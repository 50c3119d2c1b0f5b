//! Core domain types for the calorie tracker.
//!
//! Meals and workouts share one shape: an identity, a display name and a
//! calorie count. Which list an item lives in decides whether it adds to or
//! subtracts from the running total.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of hex characters taken from the random part of a generated id
const RANDOM_ID_LEN: usize = 13;

/// Which list an item belongs to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Meal,
    Workout,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Meal => "meal",
            ItemKind::Workout => "workout",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain persisted form of an item
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    pub calories: i64,
}

/// A logged meal or workout
///
/// Fields are private: name and calories never change after construction,
/// and the id is fixed either at creation or when rebuilt from a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    id: String,
    name: String,
    calories: i64,
}

/// A consumed item; adds to the running total
pub type Meal = Item;

/// A burned item; subtracts from the running total
pub type Workout = Item;

impl Item {
    /// Create a new item with a freshly generated id
    pub fn new(name: impl Into<String>, calories: i64) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            calories,
        }
    }

    /// Create a new meal
    pub fn meal(name: impl Into<String>, calories: i64) -> Meal {
        Self::new(name, calories)
    }

    /// Create a new workout
    pub fn workout(name: impl Into<String>, calories: i64) -> Workout {
        Self::new(name, calories)
    }

    /// Rebuild an item from its persisted record, keeping the stored id
    pub fn value_of(record: ItemRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            calories: record.calories,
        }
    }

    /// Plain record suitable for serialization
    pub fn record_value(&self) -> ItemRecord {
        ItemRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            calories: self.calories,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn calories(&self) -> i64 {
        self.calories
    }
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Item::value_of(record)
    }
}

/// Random hex fragment followed by the current timestamp in milliseconds.
///
/// Uniqueness is probabilistic; collisions are not detected.
fn generate_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{}{}",
        &random[..RANDOM_ID_LEN],
        Utc::now().timestamp_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_has_generated_id() {
        let meal = Item::meal("Oatmeal", 300);
        assert_eq!(meal.name(), "Oatmeal");
        assert_eq!(meal.calories(), 300);

        let (random, timestamp) = meal.id().split_at(RANDOM_ID_LEN);
        assert!(random.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(timestamp.parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn test_ids_differ_between_items() {
        let a = Item::workout("Run", 200);
        let b = Item::workout("Run", 200);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_value_of_keeps_persisted_id() {
        let record = ItemRecord {
            id: "abc123".into(),
            name: "Toast".into(),
            calories: 150,
        };
        let item = Item::value_of(record.clone());
        assert_eq!(item.id(), "abc123");
        assert_eq!(item.record_value(), record);
    }

    #[test]
    fn test_record_serializes_as_plain_object() {
        let item = Item::value_of(ItemRecord {
            id: "x1".into(),
            name: "Swim".into(),
            calories: 400,
        });
        let json = serde_json::to_string(&item.record_value()).unwrap();
        assert_eq!(json, r#"{"id":"x1","name":"Swim","calories":400}"#);
    }
}
