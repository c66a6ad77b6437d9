use anyhow::Result;
use std::process;

use super::Service;
use super::helpers::print_category_table;

pub(crate) fn cmd_category_list(service: &Service, archived: bool, json: bool) -> Result<()> {
    let categories = if archived {
        service.load_archived_categories()?
    } else {
        service.load_categories()?
    };

    if categories.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No categories found (run 'ratatouille category import' first)");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
    } else {
        print_category_table(&categories);
    }

    Ok(())
}

pub(crate) fn cmd_category_add(
    service: &Service,
    name: &str,
    image: Option<&str>,
    information: Option<&str>,
    json: bool,
) -> Result<()> {
    let category = service.add_category(name, image, information)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&category)?);
    } else {
        let name = &category.name;
        let id = &category.id;
        println!("Added category: {name} (id: {id})");
    }

    Ok(())
}

pub(crate) fn cmd_category_update(
    service: &Service,
    id: &str,
    name: Option<&str>,
    image: Option<&str>,
    information: Option<&str>,
    json: bool,
) -> Result<()> {
    let category = service.update_category(id, name, image, information)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&category)?);
    } else {
        let name = &category.name;
        println!("Updated category: {name} (id: {id})");
    }

    Ok(())
}

pub(crate) fn cmd_category_archive(service: &Service, id: &str, json: bool) -> Result<()> {
    service.archive_category(id)?;
    confirm(json, id, "archived")
}

pub(crate) fn cmd_category_restore(service: &Service, id: &str, json: bool) -> Result<()> {
    service.restore_category(id)?;
    confirm(json, id, "restored")
}

pub(crate) fn cmd_category_delete(service: &Service, id: &str, json: bool) -> Result<()> {
    service.delete_category(id)?;
    confirm(json, id, "deleted")
}

pub(crate) async fn cmd_category_import(service: &Service, json: bool) -> Result<()> {
    let added = service.import_categories().await?;

    if json {
        println!("{}", serde_json::json!({ "added": added }));
    } else {
        println!("Imported {added} new categories");
    }

    Ok(())
}

fn confirm(json: bool, id: &str, action: &str) -> Result<()> {
    if json {
        println!("{}", serde_json::json!({ "id": id, "status": action }));
    } else {
        println!("Category {id} {action}");
    }
    Ok(())
}
