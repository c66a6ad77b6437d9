use anyhow::Result;
use std::process;

use super::Service;
use super::helpers::print_area_table;

pub(crate) fn cmd_area_list(service: &Service, archived: bool, json: bool) -> Result<()> {
    let areas = if archived {
        service.load_archived_areas()?
    } else {
        service.load_areas()?
    };

    if areas.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No areas found (run 'ratatouille area import' first)");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&areas)?);
    } else {
        print_area_table(&areas);
    }

    Ok(())
}

pub(crate) fn cmd_area_add(service: &Service, name: &str, json: bool) -> Result<()> {
    let area = service.add_area(name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&area)?);
    } else {
        let name = &area.name;
        println!("Added area: {name}");
    }

    Ok(())
}

pub(crate) fn cmd_area_rename(
    service: &Service,
    name: &str,
    new_name: &str,
    json: bool,
) -> Result<()> {
    let area = service.rename_area(name, new_name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&area)?);
    } else {
        let renamed = &area.name;
        println!("Renamed area: {name} -> {renamed}");
    }

    Ok(())
}

pub(crate) fn cmd_area_archive(service: &Service, name: &str, json: bool) -> Result<()> {
    service.archive_area(name)?;
    confirm(json, name, "archived")
}

pub(crate) fn cmd_area_restore(service: &Service, name: &str, json: bool) -> Result<()> {
    service.restore_area(name)?;
    confirm(json, name, "restored")
}

pub(crate) fn cmd_area_delete(service: &Service, name: &str, json: bool) -> Result<()> {
    service.delete_area(name)?;
    confirm(json, name, "deleted")
}

pub(crate) async fn cmd_area_import(service: &Service, json: bool) -> Result<()> {
    let added = service.import_areas().await?;

    if json {
        println!("{}", serde_json::json!({ "added": added }));
    } else {
        println!("Imported {added} new areas");
    }

    Ok(())
}

fn confirm(json: bool, name: &str, action: &str) -> Result<()> {
    if json {
        println!("{}", serde_json::json!({ "name": name, "status": action }));
    } else {
        println!("Area '{name}' {action}");
    }
    Ok(())
}
