use anyhow::Result;
use std::process;

use super::Service;
use super::helpers::print_meal_model_table;

pub(crate) async fn cmd_filter_area(service: &Service, area: &str, json: bool) -> Result<()> {
    let meals = service.filter_by_area(area).await?;
    print_filtered(&meals, area, json)
}

pub(crate) async fn cmd_filter_category(
    service: &Service,
    category: &str,
    json: bool,
) -> Result<()> {
    let meals = service.filter_by_category(category).await?;
    print_filtered(&meals, category, json)
}

pub(crate) async fn cmd_filter_ingredient(
    service: &Service,
    ingredient: &str,
    json: bool,
) -> Result<()> {
    let meals = service.filter_by_ingredient(ingredient).await?;
    print_filtered(&meals, ingredient, json)
}

fn print_filtered(
    meals: &[ratatouille_core::models::MealModel],
    term: &str,
    json: bool,
) -> Result<()> {
    if meals.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No meals found for '{term}'");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(meals)?);
    } else {
        print_meal_model_table(meals);
    }

    Ok(())
}
