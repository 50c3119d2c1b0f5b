//! In-memory authority over the day's calorie state.
//!
//! Every mutating operation runs the same sequence: update memory, persist
//! the affected records in one store write, then refresh the view. A failed
//! write leaves memory as it was. The running total is kept incrementally
//! and only read from storage at load.

use crate::store::KeyValueStore;
use crate::{Error, Item, ItemKind, Result, Stats, Storage, View};

pub struct Tracker<S, V> {
    storage: Storage<S>,
    view: V,
    calorie_limit: i64,
    total_calories: i64,
    meals: Vec<Item>,
    workouts: Vec<Item>,
}

impl<S: KeyValueStore, V: View> Tracker<S, V> {
    /// Load persisted state, falling back to `default_limit` and an empty
    /// day, then render the limit and stats.
    pub fn load(storage: Storage<S>, view: V, default_limit: i64) -> Result<Self> {
        let calorie_limit = storage.get_calorie_limit(default_limit)?;
        let total_calories = storage.get_total_calories(0)?;
        let meals = storage.get_meals()?;
        let workouts = storage.get_workouts()?;

        tracing::info!(
            "Loaded tracker: limit={}, total={}, {} meals, {} workouts",
            calorie_limit,
            total_calories,
            meals.len(),
            workouts.len()
        );

        let mut tracker = Self {
            storage,
            view,
            calorie_limit,
            total_calories,
            meals,
            workouts,
        };
        tracker.view.display_limit(tracker.calorie_limit);
        tracker.render_stats();
        Ok(tracker)
    }

    pub fn calorie_limit(&self) -> i64 {
        self.calorie_limit
    }

    pub fn total_calories(&self) -> i64 {
        self.total_calories
    }

    pub fn meals(&self) -> &[Item] {
        &self.meals
    }

    pub fn workouts(&self) -> &[Item] {
        &self.workouts
    }

    pub fn stats(&self) -> Stats {
        Stats::compute(
            self.calorie_limit,
            self.total_calories,
            &self.meals,
            &self.workouts,
        )
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_parts(self) -> (Storage<S>, V) {
        (self.storage, self.view)
    }

    pub fn add_meal(&mut self, meal: Item) -> Result<()> {
        let total = self.total_plus(meal.calories())?;
        self.meals.push(meal);

        if let Err(e) = self.storage.save_meals_with_total(&self.meals, total) {
            self.meals.pop();
            return Err(e);
        }
        self.total_calories = total;

        if let Some(meal) = self.meals.last() {
            tracing::debug!("Added meal {} ({} kcal)", meal.id(), meal.calories());
            self.view.display_new_item(ItemKind::Meal, meal);
        }
        self.render_stats();
        Ok(())
    }

    /// Remove a meal by id. Returns `false`, touching nothing, when the id
    /// is unknown.
    pub fn remove_meal(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.meals.iter().position(|m| m.id() == id) else {
            tracing::debug!("No meal with id {}, nothing removed", id);
            return Ok(false);
        };

        let total = self.total_minus(self.meals[index].calories())?;
        let meal = self.meals.remove(index);

        if let Err(e) = self.storage.save_meals_with_total(&self.meals, total) {
            self.meals.insert(index, meal);
            return Err(e);
        }
        self.total_calories = total;

        self.view.remove_item(ItemKind::Meal, id);
        self.render_stats();
        Ok(true)
    }

    pub fn add_workout(&mut self, workout: Item) -> Result<()> {
        let total = self.total_minus(workout.calories())?;
        self.workouts.push(workout);

        if let Err(e) = self.storage.save_workouts_with_total(&self.workouts, total) {
            self.workouts.pop();
            return Err(e);
        }
        self.total_calories = total;

        if let Some(workout) = self.workouts.last() {
            tracing::debug!(
                "Added workout {} ({} kcal)",
                workout.id(),
                workout.calories()
            );
            self.view.display_new_item(ItemKind::Workout, workout);
        }
        self.render_stats();
        Ok(())
    }

    /// Remove a workout by id. Returns `false`, touching nothing, when the
    /// id is unknown.
    pub fn remove_workout(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.workouts.iter().position(|w| w.id() == id) else {
            tracing::debug!("No workout with id {}, nothing removed", id);
            return Ok(false);
        };

        let total = self.total_plus(self.workouts[index].calories())?;
        let workout = self.workouts.remove(index);

        if let Err(e) = self.storage.save_workouts_with_total(&self.workouts, total) {
            self.workouts.insert(index, workout);
            return Err(e);
        }
        self.total_calories = total;

        self.view.remove_item(ItemKind::Workout, id);
        self.render_stats();
        Ok(true)
    }

    /// Zero the day. The calorie limit survives.
    pub fn reset_day(&mut self) -> Result<()> {
        self.storage.clear_all()?;

        self.total_calories = 0;
        self.meals.clear();
        self.workouts.clear();

        tracing::info!("Day reset, limit {} retained", self.calorie_limit);
        self.render_stats();
        Ok(())
    }

    pub fn set_limit(&mut self, calorie_limit: i64) -> Result<()> {
        self.storage.set_calorie_limit(calorie_limit)?;
        self.calorie_limit = calorie_limit;

        tracing::info!("Calorie limit set to {}", calorie_limit);
        self.view.display_limit(calorie_limit);
        self.render_stats();
        Ok(())
    }

    /// Render every held meal and workout in stored order
    pub fn load_items(&mut self) {
        for meal in &self.meals {
            self.view.display_new_item(ItemKind::Meal, meal);
        }
        for workout in &self.workouts {
            self.view.display_new_item(ItemKind::Workout, workout);
        }
    }

    fn total_plus(&self, calories: i64) -> Result<i64> {
        self.total_calories
            .checked_add(calories)
            .ok_or_else(|| total_overflow(calories))
    }

    fn total_minus(&self, calories: i64) -> Result<i64> {
        self.total_calories
            .checked_sub(calories)
            .ok_or_else(|| total_overflow(calories))
    }

    fn render_stats(&mut self) {
        let stats = self.stats();
        self.view.display_stats(&stats);
    }
}

fn total_overflow(calories: i64) -> Error {
    Error::Validation(format!(
        "{} calories would overflow the running total",
        calories
    ))
}
