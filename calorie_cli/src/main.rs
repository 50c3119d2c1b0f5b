mod dashboard;

use calorie_core::*;
use clap::{Parser, Subcommand};
use dashboard::Dashboard;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "caltrack")]
#[command(about = "Daily calorie tracker for meals and workouts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's totals (default)
    Status,

    /// Log a meal
    Meal {
        name: String,
        /// Calories consumed
        calories: String,
    },

    /// Log a workout
    Workout {
        name: String,
        /// Calories burned
        calories: String,
    },

    /// Remove a logged meal by id
    RemoveMeal {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Remove a logged workout by id
    RemoveWorkout {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// List logged meals and workouts
    List {
        /// Show only items whose name contains this text (both lists)
        #[arg(long)]
        filter: Option<String>,

        /// Filter applied to meals only
        #[arg(long)]
        meals_filter: Option<String>,

        /// Filter applied to workouts only
        #[arg(long)]
        workouts_filter: Option<String>,
    },

    /// Set the daily calorie limit
    Limit { value: String },

    /// Clear today's meals and workouts (the limit is kept)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Export today's log as CSV
    Export {
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

type AppTracker = Tracker<FileStore, Dashboard>;

fn main() -> ExitCode {
    // Initialize logging
    calorie_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let mut data = config.data.clone();
    if let Some(data_dir) = cli.data_dir {
        data.data_dir = data_dir;
    }
    let store_path = data.store_path();

    let mut tracker = Tracker::load(
        Storage::new(FileStore::open(&store_path)?),
        Dashboard::new(),
        config.tracker.default_limit,
    )?;

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => {}
        Commands::Meal { name, calories } => {
            cmd_add(&mut tracker, ItemKind::Meal, &name, &calories)?
        }
        Commands::Workout { name, calories } => {
            cmd_add(&mut tracker, ItemKind::Workout, &name, &calories)?
        }
        Commands::RemoveMeal { id, yes } => cmd_remove(&mut tracker, ItemKind::Meal, &id, yes)?,
        Commands::RemoveWorkout { id, yes } => {
            cmd_remove(&mut tracker, ItemKind::Workout, &id, yes)?
        }
        Commands::List {
            filter,
            meals_filter,
            workouts_filter,
        } => {
            let shared = filter.unwrap_or_default();
            let meals_filter = meals_filter.unwrap_or_else(|| shared.clone());
            let workouts_filter = workouts_filter.unwrap_or(shared);
            return cmd_list(&mut tracker, &meals_filter, &workouts_filter);
        }
        Commands::Limit { value } => cmd_limit(&mut tracker, &value)?,
        Commands::Reset { yes } => {
            if !cmd_reset(&mut tracker, yes)? {
                return Ok(());
            }
        }
        Commands::Export { output } => return cmd_export(&tracker, output),
    }

    print_summary(&tracker)
}

fn cmd_add(tracker: &mut AppTracker, kind: ItemKind, name: &str, calories: &str) -> Result<()> {
    let input = ItemInput::parse(name, calories)?;
    let item = input.into_item(kind);
    let (id, name, calories) = (item.id().to_string(), item.name().to_string(), item.calories());

    match kind {
        ItemKind::Meal => tracker.add_meal(item)?,
        ItemKind::Workout => tracker.add_workout(item)?,
    }

    let label = match kind {
        ItemKind::Meal => "Meal",
        ItemKind::Workout => "Workout",
    };
    println!("✓ {} logged: {} ({} kcal) [{}]", label, name, calories, id);
    Ok(())
}

fn cmd_remove(tracker: &mut AppTracker, kind: ItemKind, id: &str, yes: bool) -> Result<()> {
    if !yes && !confirm("Are you sure?")? {
        println!("Cancelled.");
        return Ok(());
    }

    let removed = match kind {
        ItemKind::Meal => tracker.remove_meal(id)?,
        ItemKind::Workout => tracker.remove_workout(id)?,
    };

    if removed {
        println!("✓ Removed {} {}", kind, id);
    }
    Ok(())
}

fn cmd_list(tracker: &mut AppTracker, meals_filter: &str, workouts_filter: &str) -> Result<()> {
    tracker.view_mut().set_filters(meals_filter, workouts_filter);
    tracker.load_items();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    tracker.view().write_summary(&mut out)?;
    tracker.view().write_items(&mut out)?;
    Ok(())
}

fn cmd_limit(tracker: &mut AppTracker, value: &str) -> Result<()> {
    let limit = parse_limit(value)?;
    tracker.set_limit(limit)?;
    println!("✓ Daily limit set to {}", limit);
    Ok(())
}

/// Returns whether the day was actually reset
fn cmd_reset(tracker: &mut AppTracker, yes: bool) -> Result<bool> {
    if !yes && !confirm("Reset today's meals and workouts?")? {
        println!("Cancelled.");
        return Ok(false);
    }

    tracker.reset_day()?;
    tracker.view_mut().clear_items();
    println!("✓ Day reset");
    Ok(true)
}

fn cmd_export(tracker: &AppTracker, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            let count =
                export::export_csv_to_path(tracker.meals(), tracker.workouts(), &path)?;
            println!("✓ Exported {} items to {}", count, path.display());
        }
        None => {
            let stdout = io::stdout();
            export::export_csv(tracker.meals(), tracker.workouts(), stdout.lock())?;
        }
    }
    Ok(())
}

fn print_summary(tracker: &AppTracker) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    tracker.view().write_summary(&mut out)?;
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
