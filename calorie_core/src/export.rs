//! CSV export of the current day's log.

use crate::{Item, ItemKind, Result};
use std::io::Write;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    kind: ItemKind,
    id: &'a str,
    name: &'a str,
    calories: i64,
}

impl<'a> CsvRow<'a> {
    fn new(kind: ItemKind, item: &'a Item) -> Self {
        CsvRow {
            kind,
            id: item.id(),
            name: item.name(),
            calories: item.calories(),
        }
    }
}

/// Write meals then workouts as CSV rows with a header.
///
/// Returns the number of rows written.
pub fn export_csv<W: Write>(meals: &[Item], workouts: &[Item], writer: W) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    let rows = meals
        .iter()
        .map(|m| CsvRow::new(ItemKind::Meal, m))
        .chain(workouts.iter().map(|w| CsvRow::new(ItemKind::Workout, w)));

    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }

    // Headers are only emitted with the first record
    if count == 0 {
        writer.write_record(["kind", "id", "name", "calories"])?;
    }

    writer.flush()?;
    Ok(count)
}

/// Export to a file, syncing it to disk before returning
pub fn export_csv_to_path(meals: &[Item], workouts: &[Item], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    let count = export_csv(meals, workouts, &file)?;
    file.sync_all()?;

    tracing::info!("Exported {} items to {:?}", count, path);
    Ok(count)
}
