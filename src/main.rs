use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    models::task::Priority,
    services::{
        day::{save_day, start_new_day},
        favorites::{
            AddFavoriteError, AddFavoriteParameters, FavoriteLookupError, RemoveFavoriteError,
            RemoveFavoriteParameters, UseFavoriteError, UseFavoriteParameters, add_favorite,
            remove_favorite, use_favorite,
        },
        tasks::{
            AddTaskError, AddTaskParameters, CompleteTaskError, CompleteTaskParameters,
            RemoveTaskError, RemoveTaskParameters, ReopenTaskError, ReopenTaskParameters,
            TaskLookupError, add_task, complete_task, remove_task, reopen_task,
        },
        transfer::{
            ExportDayParameters, ImportDayParameters, ImportError, export_day, import_day,
        },
    },
    storage::{Storage, json::JsonFileStorage},
};

mod models;
mod scoring;
mod services;
mod storage;
mod ui;

#[derive(Parser)]
#[command(name = "tgb", about = "A gamified daily task board for your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's board with points, bonuses and the score summary
    Board,

    /// Add a new task to the board
    Add {
        /// Task name
        name: String,

        /// Window start (HH:MM)
        #[arg(short, long)]
        start: Option<String>,

        /// Due time (HH:MM)
        #[arg(short, long)]
        due: Option<String>,

        /// Task priority, weighting its share of the daily 100 points
        #[arg(short, long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
    },

    /// Mark a task done (by number or fuzzy name)
    Done {
        task_number_or_fuzzy_name: String,

        /// Completion time (HH:MM); defaults to now
        #[arg(long)]
        at: Option<String>,
    },

    /// Revert a done task to pending
    Undo { task_number_or_fuzzy_name: String },

    /// Remove a task from the board
    Remove { task_number_or_fuzzy_name: String },

    /// Clear the board and start today fresh
    NewDay,

    /// Archive a snapshot of the current board into history
    SaveDay,

    /// Show archived days, or one day's frozen board
    History {
        /// Calendar date (YYYY-MM-DD)
        date: Option<String>,
    },

    /// Manage favorite task templates
    #[command(subcommand)]
    Fav(FavCommands),

    /// Export the current board as a JSON document
    Export { path: PathBuf },

    /// Replace the current board with an exported JSON document
    Import { path: PathBuf },
}

#[derive(Subcommand)]
enum FavCommands {
    /// Add a favorite template
    Add {
        name: String,

        /// Window start (HH:MM)
        #[arg(short, long)]
        start: Option<String>,

        /// Window end (HH:MM)
        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
    },
    /// List favorites
    List,
    /// Remove a favorite
    Remove { name: String },
    /// Create a task on the board from a favorite
    Use { name: String },
}

fn report_task_lookup(error: &TaskLookupError) {
    match error {
        TaskLookupError::TaskNotFound(handle) => {
            eprintln!("Error: Task '{}' not found", handle);
        }
        TaskLookupError::AmbiguousTaskName(names) => {
            eprintln!("Error: Task name is ambiguous. Multiple tasks found:");
            for name in names {
                eprintln!("  - {}", name);
            }
            eprintln!("\nPlease be more specific or use the task number.");
        }
    }
}

fn report_favorite_lookup(error: &FavoriteLookupError) {
    match error {
        FavoriteLookupError::FavoriteNotFound(name) => {
            eprintln!("Error: Favorite '{}' not found", name);
        }
        FavoriteLookupError::AmbiguousFavoriteName(names) => {
            eprintln!("Error: Favorite name is ambiguous. Multiple favorites found:");
            for name in names {
                eprintln!("  - {}", name);
            }
            eprintln!("\nPlease be more specific.");
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize storage
    let storage_path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tgb")
        .join("store.json");

    // Create parent directory if it doesn't exist
    if let Some(parent) = storage_path.parent() {
        std::fs::create_dir_all(parent).unwrap_or_else(|e| {
            eprintln!("Error: Failed to create data directory: {}", e);
            std::process::exit(1);
        });
    }

    let storage = JsonFileStorage::new(storage_path);

    let mut store = match storage.load() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: Failed to load board: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Board) | None => {
            ui::render_board(&store);
        }
        Some(Commands::Add {
            name,
            start,
            due,
            priority,
        }) => {
            let params = AddTaskParameters {
                name,
                start,
                due,
                priority,
            };

            match add_task(&mut store, &storage, params) {
                Ok(task) => {
                    println!("✓ Task added: {}", task.name);
                    println!("  #{} · {} pts", task.task_number, task.base_points);
                }
                Err(AddTaskError::InvalidClock(e)) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
                Err(AddTaskError::Storage(e)) => {
                    eprintln!("Error: Failed to save task: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Done {
            task_number_or_fuzzy_name,
            at,
        }) => {
            let params = CompleteTaskParameters {
                task_number_or_fuzzy_name,
                at,
            };

            match complete_task(&mut store, &storage, params) {
                Ok(task) => {
                    let bonus = scoring::speed_bonus(&task);
                    match task.completed_at {
                        Some(done_at) => println!("✓ Task completed: {} ({})", task.name, done_at),
                        None => println!("✓ Task completed: {}", task.name),
                    }
                    if bonus > 0 {
                        println!("  {} pts + {} speed bonus", task.base_points, bonus);
                    } else {
                        println!("  {} pts", task.base_points);
                    }
                }
                Err(CompleteTaskError::Lookup(e)) => {
                    report_task_lookup(&e);
                    std::process::exit(1);
                }
                Err(CompleteTaskError::InvalidClock(e)) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
                Err(CompleteTaskError::Storage(e)) => {
                    eprintln!("Error: Failed to save task: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Undo {
            task_number_or_fuzzy_name,
        }) => {
            let params = ReopenTaskParameters {
                task_number_or_fuzzy_name,
            };

            match reopen_task(&mut store, &storage, params) {
                Ok(task) => {
                    println!("✓ Task reopened: {}", task.name);
                }
                Err(ReopenTaskError::Lookup(e)) => {
                    report_task_lookup(&e);
                    std::process::exit(1);
                }
                Err(ReopenTaskError::TaskNotDone(name)) => {
                    eprintln!("Error: Task '{}' is not done", name);
                    std::process::exit(1);
                }
                Err(ReopenTaskError::Storage(e)) => {
                    eprintln!("Error: Failed to save task: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Remove {
            task_number_or_fuzzy_name,
        }) => {
            let params = RemoveTaskParameters {
                task_number_or_fuzzy_name,
            };

            match remove_task(&mut store, &storage, params) {
                Ok(task) => {
                    println!("✓ Task removed: {}", task.name);
                }
                Err(RemoveTaskError::Lookup(e)) => {
                    report_task_lookup(&e);
                    std::process::exit(1);
                }
                Err(RemoveTaskError::Storage(e)) => {
                    eprintln!("Error: Failed to remove task: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::NewDay) => match start_new_day(&mut store, &storage) {
            Ok(cleared) => {
                println!(
                    "✓ Fresh board for {} ({} task(s) cleared)",
                    store.date, cleared
                );
            }
            Err(e) => {
                eprintln!("Error: Failed to reset the board: {}", e);
                std::process::exit(1);
            }
        },
        Some(Commands::SaveDay) => match save_day(&mut store, &storage) {
            Ok(snapshot) => {
                println!(
                    "✓ Day archived: {} ({} task(s))",
                    snapshot.date,
                    snapshot.tasks.len()
                );
            }
            Err(e) => {
                eprintln!("Error: Failed to archive the day: {}", e);
                std::process::exit(1);
            }
        },
        Some(Commands::History { date }) => match date {
            None => {
                if store.history.is_empty() {
                    println!("No archived days yet. Archive one with 'tgb save-day'.");
                } else {
                    ui::render_history_list(&store);
                }
            }
            Some(date_str) => match date_str.parse::<jiff::civil::Date>() {
                Ok(date) => match store.history.get(&date) {
                    Some(day) => ui::render_history_day(day),
                    None => {
                        eprintln!("Error: No archived day for {}", date);

                        if !store.history.is_empty() {
                            eprintln!("\nArchived days:");
                            for archived in store.history.keys() {
                                eprintln!("  - {}", archived);
                            }
                        }
                        std::process::exit(1);
                    }
                },
                Err(_) => {
                    eprintln!("Error: Invalid date '{}'", date_str);
                    eprintln!("\nExpected format: YYYY-MM-DD (e.g., 2026-08-26)");
                    std::process::exit(1);
                }
            },
        },
        Some(Commands::Fav(FavCommands::Add {
            name,
            start,
            end,
            priority,
        })) => {
            let params = AddFavoriteParameters {
                name,
                start,
                end,
                priority,
            };

            match add_favorite(&mut store, &storage, params) {
                Ok(favorite) => {
                    println!("✓ Favorite added: {}", favorite.name);
                }
                Err(AddFavoriteError::InvalidClock(e)) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
                Err(AddFavoriteError::Storage(e)) => {
                    eprintln!("Error: Failed to save favorite: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Fav(FavCommands::List)) => {
            if store.favorites.is_empty() {
                println!("No favorites yet. Add one with 'tgb fav add'.");
            } else {
                ui::render_favorites(&store.favorites);
            }
        }
        Some(Commands::Fav(FavCommands::Remove { name })) => {
            let params = RemoveFavoriteParameters { name };

            match remove_favorite(&mut store, &storage, params) {
                Ok(favorite) => {
                    println!("✓ Favorite removed: {}", favorite.name);
                }
                Err(RemoveFavoriteError::Lookup(e)) => {
                    report_favorite_lookup(&e);
                    std::process::exit(1);
                }
                Err(RemoveFavoriteError::Storage(e)) => {
                    eprintln!("Error: Failed to remove favorite: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Fav(FavCommands::Use { name })) => {
            let params = UseFavoriteParameters { name };

            match use_favorite(&mut store, &storage, params) {
                Ok(task) => {
                    println!("✓ Task added from favorite: {}", task.name);
                    println!("  #{} · {} pts", task.task_number, task.base_points);
                }
                Err(UseFavoriteError::Lookup(e)) => {
                    report_favorite_lookup(&e);
                    std::process::exit(1);
                }
                Err(UseFavoriteError::Storage(e)) => {
                    eprintln!("Error: Failed to save task: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Export { path }) => {
            match export_day(&store, ExportDayParameters { path: path.clone() }) {
                Ok(()) => {
                    println!(
                        "✓ Board exported to {} ({} task(s))",
                        path.display(),
                        store.tasks.len()
                    );
                }
                Err(e) => {
                    eprintln!("Error: Failed to export: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Import { path }) => {
            match import_day(&mut store, &storage, ImportDayParameters { path }) {
                Ok(count) => {
                    println!("✓ Board imported: {} task(s) for {}", count, store.date);
                }
                Err(ImportError::InvalidDocument { path, .. }) => {
                    eprintln!("Error: '{}' is not a valid export", path.display());
                    eprintln!("\nExpected a JSON document with a \"tasks\" array.");
                    std::process::exit(1);
                }
                Err(ImportError::Io { path, source }) => {
                    eprintln!("Error: Failed to read '{}': {}", path.display(), source);
                    std::process::exit(1);
                }
                Err(ImportError::Storage(e)) => {
                    eprintln!("Error: Failed to save imported board: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
