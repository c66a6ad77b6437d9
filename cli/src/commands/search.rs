use anyhow::Result;

use super::Service;
use super::helpers::{print_meal_detail, print_meal_model_table};

pub(crate) async fn cmd_search(service: &Service, query: &str, json: bool) -> Result<()> {
    let meals = service.search_meals(query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&meals)?);
    } else if let [meal] = meals.as_slice() {
        print_meal_detail(meal);
    } else {
        print_meal_model_table(&meals);
    }

    Ok(())
}

pub(crate) async fn cmd_random(service: &Service, json: bool) -> Result<()> {
    let meal = service.random_meal().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&meal)?);
    } else {
        print_meal_detail(&meal);
    }

    Ok(())
}
