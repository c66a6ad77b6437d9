use anyhow::{Result, bail};
use std::process;

use super::Service;
use super::helpers::print_meal_table;

/// Fetch a meal by id from the API and persist it as a favorite.
pub(crate) async fn cmd_favorite_save(service: &Service, id: &str, json: bool) -> Result<()> {
    let meals = service.search_meals(id).await?;
    let Some(meal) = meals.first() else {
        bail!("No meal found for id '{id}'");
    };
    let saved = service.save_favorite(meal)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&saved)?);
    } else {
        let name = &saved.name;
        let id = &saved.id;
        println!("Saved favorite: {name} (id: {id})");
    }

    Ok(())
}

pub(crate) fn cmd_favorite_list(service: &Service, json: bool) -> Result<()> {
    let meals = service.load_favorites()?;

    if meals.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No favorites saved");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&meals)?);
    } else {
        print_meal_table(&meals);
    }

    Ok(())
}

pub(crate) fn cmd_favorite_show(service: &Service, id: &str, json: bool) -> Result<()> {
    let Some(meal) = service.get_meal(id)? else {
        bail!("No saved meal with id '{id}'");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&meal)?);
    } else {
        let name = &meal.name;
        println!("{name} (id: {id})");
        if let Some(area) = &meal.area {
            println!("  Area: {area}");
        }
        if !meal.ingredients.is_empty() {
            println!("  Ingredients:");
            for ingredient in &meal.ingredients {
                let line = &ingredient.name;
                println!("    - {line}");
            }
        }
        if let Some(instructions) = &meal.instructions {
            println!("\n{instructions}");
        }
    }

    Ok(())
}

pub(crate) fn cmd_meal_archive(service: &Service, id: &str, json: bool) -> Result<()> {
    service.archive_meal(id)?;
    confirm(json, id, "archived")
}

pub(crate) fn cmd_meal_restore(service: &Service, id: &str, json: bool) -> Result<()> {
    service.restore_meal(id)?;
    confirm(json, id, "restored")
}

pub(crate) fn cmd_meal_delete(service: &Service, id: &str, json: bool) -> Result<()> {
    service.delete_meal(id)?;
    confirm(json, id, "deleted")
}

pub(crate) fn cmd_meal_archived(service: &Service, json: bool) -> Result<()> {
    let meals = service.load_archived_meals()?;

    if meals.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("Archive is empty");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&meals)?);
    } else {
        print_meal_table(&meals);
    }

    Ok(())
}

fn confirm(json: bool, id: &str, action: &str) -> Result<()> {
    if json {
        println!("{}", serde_json::json!({ "id": id, "status": action }));
    } else {
        println!("Meal {id} {action}");
    }
    Ok(())
}
