//! Retained terminal dashboard.
//!
//! The tracker's render calls update this model; the CLI prints it once
//! the command has run. Name filters hide rows at print time only.

use calorie_core::filter;
use calorie_core::{Item, ItemKind, Stats, View};
use std::io::{self, Write};

const BAR_WIDTH: usize = 20;

#[derive(Clone, Debug)]
struct Row {
    id: String,
    name: String,
    calories: i64,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    limit: Option<i64>,
    stats: Option<Stats>,
    meals: Vec<Row>,
    workouts: Vec<Row>,
    meal_filter: String,
    workout_filter: String,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_filters(&mut self, meal_filter: &str, workout_filter: &str) {
        self.meal_filter = meal_filter.to_string();
        self.workout_filter = workout_filter.to_string();
    }

    fn rows_mut(&mut self, kind: ItemKind) -> &mut Vec<Row> {
        match kind {
            ItemKind::Meal => &mut self.meals,
            ItemKind::Workout => &mut self.workouts,
        }
    }

    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(stats) = self.stats else {
            return Ok(());
        };
        let limit = self.limit.unwrap_or(stats.limit);

        writeln!(out)?;
        writeln!(out, "╭─────────────────────────────────────────╮")?;
        writeln!(out, "│  DAILY CALORIES")?;
        writeln!(out, "╰─────────────────────────────────────────╯")?;
        writeln!(out)?;
        writeln!(out, "  Limit:      {}", limit)?;
        writeln!(out, "  Total:      {}", stats.total)?;
        writeln!(out, "  Consumed:   {}", stats.consumed)?;
        writeln!(out, "  Burned:     {}", stats.burned)?;
        writeln!(out, "  Remaining:  {}", stats.remaining)?;
        writeln!(
            out,
            "  Progress:   [{}] {}%",
            progress_bar(stats.progress),
            stats.progress
        )?;
        if stats.over_limit {
            writeln!(out, "  ⚠ Over limit")?;
        }
        writeln!(out)?;
        Ok(())
    }

    pub fn write_items<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_section(out, "Meals", &self.meals, &self.meal_filter)?;
        write_section(out, "Workouts", &self.workouts, &self.workout_filter)
    }
}

impl View for Dashboard {
    fn display_limit(&mut self, limit: i64) {
        self.limit = Some(limit);
    }

    fn display_stats(&mut self, stats: &Stats) {
        self.stats = Some(*stats);
    }

    fn display_new_item(&mut self, kind: ItemKind, item: &Item) {
        self.rows_mut(kind).push(Row {
            id: item.id().to_string(),
            name: item.name().to_string(),
            calories: item.calories(),
        });
    }

    fn remove_item(&mut self, kind: ItemKind, id: &str) {
        let rows = self.rows_mut(kind);
        match rows.iter().position(|row| row.id == id) {
            Some(index) => {
                rows.remove(index);
            }
            None => tracing::debug!("No rendered {} with id {}", kind, id),
        }
    }

    fn clear_items(&mut self) {
        self.meals.clear();
        self.workouts.clear();
        self.meal_filter.clear();
        self.workout_filter.clear();
    }
}

fn write_section<W: Write>(out: &mut W, title: &str, rows: &[Row], query: &str) -> io::Result<()> {
    writeln!(out, "  {}", title)?;
    let visible: Vec<&Row> = rows
        .iter()
        .filter(|row| filter::matches(&row.name, query))
        .collect();

    if visible.is_empty() {
        writeln!(out, "    (none)")?;
    }
    for row in visible {
        writeln!(out, "    {:<28} {:>6}  [{}]", row.name, row.calories, row.id)?;
    }
    writeln!(out)
}

fn progress_bar(progress: u8) -> String {
    let filled = (progress as usize * BAR_WIDTH) / 100;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_items(dashboard: &Dashboard) -> String {
        let mut out = Vec::new();
        dashboard.write_items(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0), "....................");
        assert_eq!(progress_bar(25), "#####...............");
        assert_eq!(progress_bar(100), "####################");
    }

    #[test]
    fn test_remove_missing_row_is_tolerated() {
        let mut dashboard = Dashboard::new();
        dashboard.display_new_item(ItemKind::Meal, &Item::meal("Toast", 120));
        dashboard.remove_item(ItemKind::Meal, "not-rendered");
        dashboard.remove_item(ItemKind::Workout, "not-rendered");
        assert!(render_items(&dashboard).contains("Toast"));
    }

    #[test]
    fn test_filter_hides_rows() {
        let mut dashboard = Dashboard::new();
        dashboard.display_new_item(ItemKind::Meal, &Item::meal("Green Salad", 200));
        dashboard.display_new_item(ItemKind::Meal, &Item::meal("Burger", 800));
        dashboard.display_new_item(ItemKind::Workout, &Item::workout("Swim", 300));
        dashboard.set_filters("salad", "");

        let text = render_items(&dashboard);
        assert!(text.contains("Green Salad"));
        assert!(!text.contains("Burger"));
        assert!(text.contains("Swim"));
    }

    #[test]
    fn test_summary_marks_over_limit() {
        let mut dashboard = Dashboard::new();
        let meals = vec![Item::meal("Feast", 2500)];
        dashboard.display_limit(2000);
        dashboard.display_stats(&Stats::compute(2000, 2500, &meals, &[]));

        let mut out = Vec::new();
        dashboard.write_summary(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Remaining:  -500"));
        assert!(text.contains("100%"));
        assert!(text.contains("Over limit"));
    }
}
