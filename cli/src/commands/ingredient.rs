use anyhow::Result;
use std::process;

use super::Service;
use super::helpers::print_ingredient_table;

pub(crate) fn cmd_ingredient_list(service: &Service, archived: bool, json: bool) -> Result<()> {
    let ingredients = if archived {
        service.load_archived_ingredients()?
    } else {
        service.load_ingredients()?
    };

    if ingredients.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No ingredients found (run 'ratatouille ingredient import' first)");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&ingredients)?);
    } else {
        print_ingredient_table(&ingredients);
    }

    Ok(())
}

pub(crate) fn cmd_ingredient_add(
    service: &Service,
    name: &str,
    information: Option<&str>,
    image: Option<&str>,
    json: bool,
) -> Result<()> {
    let ingredient = service.add_ingredient(name, information, image)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ingredient)?);
    } else {
        let name = &ingredient.name;
        let id = &ingredient.id;
        println!("Added ingredient: {name} (id: {id})");
    }

    Ok(())
}

pub(crate) fn cmd_ingredient_update(
    service: &Service,
    id: &str,
    name: Option<&str>,
    information: Option<&str>,
    image: Option<&str>,
    json: bool,
) -> Result<()> {
    let ingredient = service.update_ingredient(id, name, information, image)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ingredient)?);
    } else {
        let name = &ingredient.name;
        println!("Updated ingredient: {name} (id: {id})");
    }

    Ok(())
}

pub(crate) fn cmd_ingredient_archive(service: &Service, id: &str, json: bool) -> Result<()> {
    service.archive_ingredient(id)?;
    confirm(json, id, "archived")
}

pub(crate) fn cmd_ingredient_restore(service: &Service, id: &str, json: bool) -> Result<()> {
    service.restore_ingredient(id)?;
    confirm(json, id, "restored")
}

pub(crate) fn cmd_ingredient_delete(service: &Service, id: &str, json: bool) -> Result<()> {
    service.delete_ingredient(id)?;
    confirm(json, id, "deleted")
}

pub(crate) async fn cmd_ingredient_import(service: &Service, json: bool) -> Result<()> {
    let added = service.import_ingredients().await?;

    if json {
        println!("{}", serde_json::json!({ "added": added }));
    } else {
        println!("Imported {added} new ingredients");
    }

    Ok(())
}

fn confirm(json: bool, id: &str, action: &str) -> Result<()> {
    if json {
        println!("{}", serde_json::json!({ "id": id, "status": action }));
    } else {
        println!("Ingredient {id} {action}");
    }
    Ok(())
}
