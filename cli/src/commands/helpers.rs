use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use ratatouille_core::models::{Area, Category, Ingredient, Meal, MealModel};

pub(crate) fn print_meal_model_table(meals: &[MealModel]) {
    #[derive(Tabled)]
    struct MealRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Area")]
        area: String,
        #[tabled(rename = "Category")]
        category: String,
        #[tabled(rename = "Ingredients")]
        ingredients: usize,
        #[tabled(rename = "Fav")]
        favorite: String,
        #[tabled(rename = "Arch")]
        archived: String,
    }

    let rows: Vec<MealRow> = meals
        .iter()
        .map(|m| MealRow {
            id: m.id.clone(),
            name: truncate(&m.name, 35),
            area: m.area.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            category: m
                .category
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            ingredients: m.ingredients.len(),
            favorite: mark(m.is_favorite),
            archived: mark(m.is_archived),
        })
        .collect();

    print_table(&rows, 4);
}

pub(crate) fn print_meal_table(meals: &[Meal]) {
    #[derive(Tabled)]
    struct MealRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Area")]
        area: String,
        #[tabled(rename = "Ingredients")]
        ingredients: usize,
        #[tabled(rename = "Arch")]
        archived: String,
    }

    let rows: Vec<MealRow> = meals
        .iter()
        .map(|m| MealRow {
            id: m.id.clone(),
            name: truncate(&m.name, 35),
            area: m.area.clone().unwrap_or_default(),
            ingredients: m.ingredients.len(),
            archived: mark(m.is_archived),
        })
        .collect();

    print_table(&rows, 3);
}

pub(crate) fn print_category_table(categories: &[Category]) {
    #[derive(Tabled)]
    struct CategoryRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Information")]
        information: String,
    }

    let rows: Vec<CategoryRow> = categories
        .iter()
        .map(|c| CategoryRow {
            id: truncate(&c.id, 12),
            name: truncate(&c.name, 25),
            information: c
                .information
                .as_deref()
                .map(|i| truncate(i, 50))
                .unwrap_or_default(),
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
}

pub(crate) fn print_area_table(areas: &[Area]) {
    #[derive(Tabled)]
    struct AreaRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Name")]
        name: String,
    }

    let rows: Vec<AreaRow> = areas
        .iter()
        .map(|a| AreaRow {
            id: a.id.clone().unwrap_or_else(|| "-".to_string()),
            name: a.name.clone(),
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
}

pub(crate) fn print_ingredient_table(ingredients: &[Ingredient]) {
    #[derive(Tabled)]
    struct IngredientRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Information")]
        information: String,
    }

    let rows: Vec<IngredientRow> = ingredients
        .iter()
        .map(|i| IngredientRow {
            id: truncate(&i.id, 12),
            name: truncate(&i.name, 30),
            information: i
                .information
                .as_deref()
                .map(|d| truncate(d, 50))
                .unwrap_or_default(),
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
}

/// Print one meal in full, ingredient lines included.
pub(crate) fn print_meal_detail(meal: &MealModel) {
    let name = &meal.name;
    let id = &meal.id;
    println!("{name} (id: {id})");
    if let Some(area) = &meal.area {
        let area = &area.name;
        println!("  Area: {area}");
    }
    if let Some(category) = &meal.category {
        let category = &category.name;
        println!("  Category: {category}");
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

fn print_table<T: Tabled>(rows: &[T], right_align_from: usize) {
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(right_align_from..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

fn mark(flag: bool) -> String {
    if flag { "*".to_string() } else { String::new() }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}
