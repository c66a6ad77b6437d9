mod commands;
mod config;
mod flagsapi;
mod mealdb;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;
use tracing_subscriber::EnvFilter;

use crate::commands::{
    Service, cmd_area_add, cmd_area_archive, cmd_area_delete, cmd_area_import, cmd_area_list,
    cmd_area_rename, cmd_area_restore, cmd_category_add, cmd_category_archive,
    cmd_category_delete, cmd_category_import, cmd_category_list, cmd_category_restore,
    cmd_category_update, cmd_favorite_list, cmd_favorite_save, cmd_favorite_show,
    cmd_filter_area, cmd_filter_category, cmd_filter_ingredient, cmd_flag,
    cmd_ingredient_add, cmd_ingredient_archive, cmd_ingredient_delete, cmd_ingredient_import,
    cmd_ingredient_list, cmd_ingredient_restore, cmd_ingredient_update, cmd_meal_archive,
    cmd_meal_archived, cmd_meal_delete, cmd_meal_restore, cmd_random, cmd_search,
};
use crate::config::Config;
use crate::flagsapi::FlagsApiClient;
use crate::mealdb::MealDbClient;
use ratatouille_core::db::Database;
use ratatouille_core::service::RatatouilleService;

#[derive(Parser)]
#[command(
    name = "ratatouille",
    version,
    about = "Browse, favorite, and archive recipes from TheMealDB"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search meals (all digits looks up by id, one character searches by
    /// first letter, anything else searches by name)
    Search {
        /// Search query
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch one random meal
    Random {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Filter meals by area, category, or ingredient
    Filter {
        #[command(subcommand)]
        command: FilterCommands,
    },
    /// Manage favorite meals
    Favorite {
        #[command(subcommand)]
        command: FavoriteCommands,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Manage areas
    Area {
        #[command(subcommand)]
        command: AreaCommands,
    },
    /// Manage ingredients
    Ingredient {
        #[command(subcommand)]
        command: IngredientCommands,
    },
    /// Resolve an area's country flag image
    Flag {
        /// Area name (e.g. "French")
        area: String,
        /// Flag style: flat or shiny
        #[arg(long, default_value = "flat")]
        style: String,
        /// Pixel size: 16, 24, 32, 48, or 64
        #[arg(long, default_value = "64")]
        size: u32,
        /// Download the PNG to this path instead of printing the URL
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum FilterCommands {
    /// Meals from an area
    Area {
        /// Area name (e.g. "French")
        area: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Meals in a category
    Category {
        /// Category name (e.g. "Vegetarian")
        category: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Meals using an ingredient
    Ingredient {
        /// Ingredient name (e.g. "Garlic")
        ingredient: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum FavoriteCommands {
    /// Fetch a meal by id and save it as a favorite
    Save {
        /// Meal id (e.g. 52908)
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved favorites
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one saved meal in full
    Show {
        /// Meal id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move a saved meal to the archive
    Archive {
        /// Meal id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Restore a meal from the archive
    Restore {
        /// Meal id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a saved meal permanently
    Delete {
        /// Meal id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List archived meals
    Archived {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// List categories outside the archive
    List {
        /// List archived categories instead
        #[arg(long)]
        archived: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a custom category
    Add {
        /// Category name
        name: String,
        /// Image URL
        #[arg(long)]
        image: Option<String>,
        /// Description text
        #[arg(long)]
        info: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update a custom category (canonical ones are read-only)
    Update {
        /// Category id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New image URL
        #[arg(long)]
        image: Option<String>,
        /// New description text
        #[arg(long)]
        info: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move a custom category to the archive
    Archive {
        /// Category id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Restore a category from the archive
    Restore {
        /// Category id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a custom category permanently
    Delete {
        /// Category id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Cache the canonical category listing locally
    Import {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum AreaCommands {
    /// List areas outside the archive
    List {
        /// List archived areas instead
        #[arg(long)]
        archived: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a custom area
    Add {
        /// Area name
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rename a custom area (canonical ones are read-only)
    Rename {
        /// Current area name
        name: String,
        /// New area name
        new_name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move a custom area to the archive
    Archive {
        /// Area name
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Restore an area from the archive
    Restore {
        /// Area name
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a custom area permanently
    Delete {
        /// Area name
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Cache the canonical area listing locally
    Import {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum IngredientCommands {
    /// List ingredients outside the archive
    List {
        /// List archived ingredients instead
        #[arg(long)]
        archived: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a custom ingredient
    Add {
        /// Ingredient name
        name: String,
        /// Description text
        #[arg(long)]
        info: Option<String>,
        /// Image URL
        #[arg(long)]
        image: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update a custom ingredient (canonical ones are read-only)
    Update {
        /// Ingredient id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description text
        #[arg(long)]
        info: Option<String>,
        /// New image URL
        #[arg(long)]
        image: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move a custom ingredient to the archive
    Archive {
        /// Ingredient id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Restore an ingredient from the archive
    Restore {
        /// Ingredient id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a custom ingredient permanently
    Delete {
        /// Ingredient id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Cache the canonical ingredient listing locally
    Import {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

#[allow(clippy::too_many_lines)]
async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&config.db_path)?;
    let service: Service = RatatouilleService::new(MealDbClient::new(config.api_base), db);

    match cli.command {
        Commands::Search { query, json } => cmd_search(&service, &query, json).await,
        Commands::Random { json } => cmd_random(&service, json).await,
        Commands::Filter { command } => match command {
            FilterCommands::Area { area, json } => cmd_filter_area(&service, &area, json).await,
            FilterCommands::Category { category, json } => {
                cmd_filter_category(&service, &category, json).await
            }
            FilterCommands::Ingredient { ingredient, json } => {
                cmd_filter_ingredient(&service, &ingredient, json).await
            }
        },
        Commands::Favorite { command } => match command {
            FavoriteCommands::Save { id, json } => cmd_favorite_save(&service, &id, json).await,
            FavoriteCommands::List { json } => cmd_favorite_list(&service, json),
            FavoriteCommands::Show { id, json } => cmd_favorite_show(&service, &id, json),
            FavoriteCommands::Archive { id, json } => cmd_meal_archive(&service, &id, json),
            FavoriteCommands::Restore { id, json } => cmd_meal_restore(&service, &id, json),
            FavoriteCommands::Delete { id, json } => cmd_meal_delete(&service, &id, json),
            FavoriteCommands::Archived { json } => cmd_meal_archived(&service, json),
        },
        Commands::Category { command } => match command {
            CategoryCommands::List { archived, json } => {
                cmd_category_list(&service, archived, json)
            }
            CategoryCommands::Add {
                name,
                image,
                info,
                json,
            } => cmd_category_add(&service, &name, image.as_deref(), info.as_deref(), json),
            CategoryCommands::Update {
                id,
                name,
                image,
                info,
                json,
            } => cmd_category_update(
                &service,
                &id,
                name.as_deref(),
                image.as_deref(),
                info.as_deref(),
                json,
            ),
            CategoryCommands::Archive { id, json } => cmd_category_archive(&service, &id, json),
            CategoryCommands::Restore { id, json } => cmd_category_restore(&service, &id, json),
            CategoryCommands::Delete { id, json } => cmd_category_delete(&service, &id, json),
            CategoryCommands::Import { json } => cmd_category_import(&service, json).await,
        },
        Commands::Area { command } => match command {
            AreaCommands::List { archived, json } => cmd_area_list(&service, archived, json),
            AreaCommands::Add { name, json } => cmd_area_add(&service, &name, json),
            AreaCommands::Rename {
                name,
                new_name,
                json,
            } => cmd_area_rename(&service, &name, &new_name, json),
            AreaCommands::Archive { name, json } => cmd_area_archive(&service, &name, json),
            AreaCommands::Restore { name, json } => cmd_area_restore(&service, &name, json),
            AreaCommands::Delete { name, json } => cmd_area_delete(&service, &name, json),
            AreaCommands::Import { json } => cmd_area_import(&service, json).await,
        },
        Commands::Ingredient { command } => match command {
            IngredientCommands::List { archived, json } => {
                cmd_ingredient_list(&service, archived, json)
            }
            IngredientCommands::Add {
                name,
                info,
                image,
                json,
            } => cmd_ingredient_add(&service, &name, info.as_deref(), image.as_deref(), json),
            IngredientCommands::Update {
                id,
                name,
                info,
                image,
                json,
            } => cmd_ingredient_update(
                &service,
                &id,
                name.as_deref(),
                info.as_deref(),
                image.as_deref(),
                json,
            ),
            IngredientCommands::Archive { id, json } => cmd_ingredient_archive(&service, &id, json),
            IngredientCommands::Restore { id, json } => cmd_ingredient_restore(&service, &id, json),
            IngredientCommands::Delete { id, json } => cmd_ingredient_delete(&service, &id, json),
            IngredientCommands::Import { json } => cmd_ingredient_import(&service, json).await,
        },
        Commands::Flag {
            area,
            style,
            size,
            output,
            json,
        } => {
            let flags = FlagsApiClient::new();
            cmd_flag(&flags, &area, &style, size, output.as_deref(), json).await
        }
    }
}
