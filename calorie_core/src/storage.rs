//! Persistence adapter for tracker state.
//!
//! Four records live under fixed keys: the calorie limit and running total
//! as decimal strings, and the meal and workout lists as JSON arrays of
//! plain item records. Every save rewrites its whole record.

use crate::store::KeyValueStore;
use crate::{Error, Item, ItemRecord, Result};

pub const CALORIE_LIMIT_KEY: &str = "calorieLimit";
pub const TOTAL_CALORIES_KEY: &str = "totalCalories";
pub const MEALS_KEY: &str = "meals";
pub const WORKOUTS_KEY: &str = "workouts";

/// Typed access to the four tracker records of a key-value store
pub struct Storage<S> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_calorie_limit(&self, default_limit: i64) -> Result<i64> {
        self.get_number(CALORIE_LIMIT_KEY, default_limit)
    }

    pub fn set_calorie_limit(&mut self, limit: i64) -> Result<()> {
        self.store.set(CALORIE_LIMIT_KEY, &limit.to_string())
    }

    pub fn get_total_calories(&self, default_total: i64) -> Result<i64> {
        self.get_number(TOTAL_CALORIES_KEY, default_total)
    }

    pub fn set_total_calories(&mut self, total: i64) -> Result<()> {
        self.store.set(TOTAL_CALORIES_KEY, &total.to_string())
    }

    pub fn save_meals(&mut self, meals: &[Item]) -> Result<()> {
        self.save_items(MEALS_KEY, meals)
    }

    /// Save the meal list and the running total in one write
    pub fn save_meals_with_total(&mut self, meals: &[Item], total: i64) -> Result<()> {
        self.save_items_with_total(MEALS_KEY, meals, total)
    }

    pub fn get_meals(&self) -> Result<Vec<Item>> {
        self.get_items(MEALS_KEY)
    }

    pub fn save_workouts(&mut self, workouts: &[Item]) -> Result<()> {
        self.save_items(WORKOUTS_KEY, workouts)
    }

    /// Save the workout list and the running total in one write
    pub fn save_workouts_with_total(&mut self, workouts: &[Item], total: i64) -> Result<()> {
        self.save_items_with_total(WORKOUTS_KEY, workouts, total)
    }

    pub fn get_workouts(&self) -> Result<Vec<Item>> {
        self.get_items(WORKOUTS_KEY)
    }

    /// Remove the total and both lists. The calorie limit is kept.
    pub fn clear_all(&mut self) -> Result<()> {
        self.store
            .remove_many(&[TOTAL_CALORIES_KEY, MEALS_KEY, WORKOUTS_KEY])?;
        tracing::debug!("Cleared day records, calorie limit retained");
        Ok(())
    }

    fn get_number(&self, key: &str, default: i64) -> Result<i64> {
        match self.store.get(key)? {
            Some(raw) => raw.trim().parse::<i64>().map_err(|e| Error::Corrupt {
                key: key.to_string(),
                reason: format!("'{}' is not an integer: {}", raw, e),
            }),
            None => Ok(default),
        }
    }

    fn save_items(&mut self, key: &str, items: &[Item]) -> Result<()> {
        let json = items_json(items)?;
        self.store.set(key, &json)?;
        tracing::debug!("Saved {} records under '{}'", items.len(), key);
        Ok(())
    }

    fn save_items_with_total(&mut self, key: &str, items: &[Item], total: i64) -> Result<()> {
        let json = items_json(items)?;
        let total = total.to_string();
        self.store
            .set_many(&[(key, json.as_str()), (TOTAL_CALORIES_KEY, total.as_str())])?;
        tracing::debug!(
            "Saved {} records under '{}' with total {}",
            items.len(),
            key,
            total
        );
        Ok(())
    }

    fn get_items(&self, key: &str) -> Result<Vec<Item>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(Vec::new());
        };

        let records: Vec<ItemRecord> =
            serde_json::from_str(&raw).map_err(|e| Error::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        Ok(records.into_iter().map(Item::value_of).collect())
    }
}

fn items_json(items: &[Item]) -> Result<String> {
    let records: Vec<ItemRecord> = items.iter().map(Item::record_value).collect();
    Ok(serde_json::to_string(&records)?)
}
