use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{AreaModel, CategoryModel, IngredientModel, MealModel};

/// The meal payload flattens ingredients into numbered field pairs
/// `strIngredient1..20` / `strMeasure1..20`. The cap is part of the external
/// API contract.
pub const INGREDIENT_PAIRS: usize = 20;

/// Every meal endpoint wraps its array under a single `meals` key; the API
/// reports "no matches" as `"meals": null`.
#[derive(Debug, Deserialize)]
pub struct MealsResponse {
    pub meals: Option<Vec<RawMeal>>,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Option<Vec<RawCategory>>,
}

/// One meal as the API ships it. The numbered ingredient/measure fields land
/// in `extra` and are read through the key-generation helpers below.
#[derive(Debug, Deserialize)]
pub struct RawMeal {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb")]
    pub thumb: Option<String>,
    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,
    #[serde(rename = "strArea")]
    pub area: Option<String>,
    #[serde(rename = "strCategory")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawCategory {
    #[serde(rename = "idCategory")]
    pub id: String,
    #[serde(rename = "strCategory")]
    pub name: String,
    #[serde(rename = "strCategoryThumb")]
    pub thumb: Option<String>,
    #[serde(rename = "strCategoryDescription")]
    pub description: Option<String>,
}

/// Entry of `list.php?a=list`.
#[derive(Debug, Deserialize)]
pub struct RawAreaEntry {
    #[serde(rename = "strArea")]
    pub name: String,
}

/// Entry of `list.php?i=list`.
#[derive(Debug, Deserialize)]
pub struct RawIngredientEntry {
    #[serde(rename = "idIngredient")]
    pub id: String,
    #[serde(rename = "strIngredient")]
    pub name: String,
    #[serde(rename = "strDescription")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AreaListResponse {
    meals: Option<Vec<RawAreaEntry>>,
}

#[derive(Debug, Deserialize)]
struct IngredientListResponse {
    meals: Option<Vec<RawIngredientEntry>>,
}

/// True when a search token should be routed to lookup-by-id rather than
/// name/letter search.
#[must_use]
pub fn is_numeric_query(query: &str) -> bool {
    !query.is_empty() && query.bytes().all(|b| b.is_ascii_digit())
}

fn ingredient_key(i: usize) -> String {
    format!("strIngredient{i}")
}

fn measure_key(i: usize) -> String {
    format!("strMeasure{i}")
}

fn extra_str<'a>(raw: &'a RawMeal, key: &str) -> &'a str {
    raw.extra.get(key).and_then(Value::as_str).unwrap_or("")
}

/// "chicken breast" -> "Chicken Breast".
fn capitalize_words(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Walk the numbered pairs, skip any pair with an empty side, and fold the
/// measure into the display name. Each surviving pair gets a fresh identity;
/// two decodes of the same payload never share ingredient ids.
#[must_use]
pub fn decode_ingredients(raw: &RawMeal) -> Vec<IngredientModel> {
    let mut out = Vec::new();
    for i in 1..=INGREDIENT_PAIRS {
        let name = extra_str(raw, &ingredient_key(i)).trim();
        let measure = extra_str(raw, &measure_key(i)).trim();
        if name.is_empty() || measure.is_empty() {
            continue;
        }
        out.push(IngredientModel {
            id: Uuid::new_v4().to_string(),
            name: format!("{}, {measure}", capitalize_words(name)),
            information: None,
            image: None,
        });
    }
    out
}

/// Convert one raw meal into the transfer model. Area and category arrive as
/// bare name strings and are wrapped into minimal models; filter-endpoint
/// records carry neither and are marked `partial`.
#[must_use]
pub fn meal_from_raw(raw: &RawMeal) -> MealModel {
    let partial = raw.instructions.is_none() && raw.area.is_none() && raw.category.is_none();
    let area = raw
        .area
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(|a| AreaModel {
            id: None,
            name: a.to_string(),
        });
    let category = raw
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| CategoryModel {
            id: None,
            name: c.to_string(),
            image: None,
            information: None,
        });
    MealModel {
        id: raw.id.clone(),
        name: raw.name.clone(),
        image: raw.thumb.clone(),
        instructions: raw.instructions.clone(),
        area,
        category,
        ingredients: decode_ingredients(raw),
        is_favorite: false,
        is_archived: false,
        partial,
    }
}

/// Decode a `{"meals": [...]}` payload. A missing, null, or empty array is a
/// decode failure, never an empty success list; callers distinguish "zero
/// matches" from "malformed" at the command layer.
pub fn parse_meals(body: &str) -> Result<Vec<MealModel>> {
    let resp: MealsResponse = serde_json::from_str(body)?;
    let raw = resp.meals.unwrap_or_default();
    if raw.is_empty() {
        return Err(Error::EmptyResult);
    }
    Ok(raw.iter().map(meal_from_raw).collect())
}

/// Decode the `{"categories": [...]}` payload of the category listing.
pub fn parse_categories(body: &str) -> Result<Vec<CategoryModel>> {
    let resp: CategoriesResponse = serde_json::from_str(body)?;
    let raw = resp.categories.unwrap_or_default();
    if raw.is_empty() {
        return Err(Error::EmptyResult);
    }
    Ok(raw
        .into_iter()
        .map(|c| CategoryModel {
            id: Some(c.id),
            name: c.name,
            image: c.thumb,
            information: c.description,
        })
        .collect())
}

/// Decode the area listing. The API ships bare names; canonical ids are
/// assigned positionally ("1".."28") when the listing is imported.
pub fn parse_area_list(body: &str) -> Result<Vec<AreaModel>> {
    let resp: AreaListResponse = serde_json::from_str(body)?;
    let raw = resp.meals.unwrap_or_default();
    if raw.is_empty() {
        return Err(Error::EmptyResult);
    }
    Ok(raw
        .into_iter()
        .map(|a| AreaModel {
            id: None,
            name: a.name,
        })
        .collect())
}

/// Decode the ingredient listing (canonical ids "1".."608").
pub fn parse_ingredient_list(body: &str) -> Result<Vec<IngredientModel>> {
    let resp: IngredientListResponse = serde_json::from_str(body)?;
    let raw = resp.meals.unwrap_or_default();
    if raw.is_empty() {
        return Err(Error::EmptyResult);
    }
    Ok(raw
        .into_iter()
        .map(|i| IngredientModel {
            id: i.id,
            name: i.name,
            information: i.description,
            image: None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_meal(pairs: &[(&str, &str)]) -> RawMeal {
        let mut extra = HashMap::new();
        for (i, (name, measure)) in pairs.iter().enumerate() {
            extra.insert(ingredient_key(i + 1), Value::String((*name).to_string()));
            extra.insert(measure_key(i + 1), Value::String((*measure).to_string()));
        }
        RawMeal {
            id: "52908".to_string(),
            name: "Ratatouille".to_string(),
            thumb: Some("https://example.test/ratatouille.jpg".to_string()),
            instructions: Some("Slice and bake.".to_string()),
            area: Some("French".to_string()),
            category: Some("Vegetarian".to_string()),
            extra,
        }
    }

    #[test]
    fn test_is_numeric_query() {
        assert!(is_numeric_query("52908"));
        assert!(is_numeric_query("7"));
        assert!(!is_numeric_query(""));
        assert!(!is_numeric_query("52a"));
        assert!(!is_numeric_query("chicken"));
        assert!(!is_numeric_query("52 908"));
    }

    #[test]
    fn test_decode_ingredients_skips_half_empty_pairs() {
        let raw = raw_meal(&[("Salt", "1 tsp"), ("", "2 tbsp"), ("Pepper", "")]);
        let ingredients = decode_ingredients(&raw);
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].name, "Salt, 1 tsp");
    }

    #[test]
    fn test_decode_ingredients_trims_and_capitalizes() {
        let raw = raw_meal(&[(" olive oil ", " 2 tbsp "), ("RED onion", "1")]);
        let ingredients = decode_ingredients(&raw);
        assert_eq!(ingredients.len(), 2);
        assert_eq!(ingredients[0].name, "Olive Oil, 2 tbsp");
        assert_eq!(ingredients[1].name, "Red Onion, 1");
    }

    #[test]
    fn test_decode_ingredients_fresh_identity_per_decode() {
        let raw = raw_meal(&[("Salt", "1 tsp")]);
        let first = decode_ingredients(&raw);
        let second = decode_ingredients(&raw);
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn test_decode_ingredients_handles_null_fields() {
        let mut raw = raw_meal(&[("Salt", "1 tsp")]);
        raw.extra.insert(ingredient_key(2), Value::Null);
        raw.extra
            .insert(measure_key(2), Value::String("3 cups".to_string()));
        assert_eq!(decode_ingredients(&raw).len(), 1);
    }

    #[test]
    fn test_meal_from_raw_wraps_bare_names() {
        let raw = raw_meal(&[("Aubergine", "1 large")]);
        let meal = meal_from_raw(&raw);
        assert_eq!(meal.id, "52908");
        assert_eq!(meal.area.as_ref().unwrap().name, "French");
        assert!(meal.area.as_ref().unwrap().id.is_none());
        assert_eq!(meal.category.as_ref().unwrap().name, "Vegetarian");
        assert!(meal.category.as_ref().unwrap().id.is_none());
        assert!(!meal.partial);
        assert!(!meal.is_favorite);
    }

    #[test]
    fn test_meal_from_raw_marks_filter_records_partial() {
        let raw = RawMeal {
            id: "52908".to_string(),
            name: "Ratatouille".to_string(),
            thumb: Some("https://example.test/r.jpg".to_string()),
            instructions: None,
            area: None,
            category: None,
            extra: HashMap::new(),
        };
        let meal = meal_from_raw(&raw);
        assert!(meal.partial);
        assert!(meal.ingredients.is_empty());
    }

    #[test]
    fn test_parse_meals_empty_array_is_failure() {
        assert!(matches!(
            parse_meals(r#"{"meals": []}"#),
            Err(Error::EmptyResult)
        ));
    }

    #[test]
    fn test_parse_meals_null_is_failure() {
        assert!(matches!(
            parse_meals(r#"{"meals": null}"#),
            Err(Error::EmptyResult)
        ));
    }

    #[test]
    fn test_parse_meals_malformed_payload() {
        assert!(matches!(
            parse_meals("not json"),
            Err(Error::MalformedPayload(_))
        ));
        assert!(matches!(
            parse_meals(r#"{"meals": [{"strMeal": "no id"}]}"#),
            Err(Error::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_parse_meals_full_payload() {
        let body = r#"{"meals": [{
            "idMeal": "52908",
            "strMeal": "Ratatouille",
            "strMealThumb": "https://example.test/r.jpg",
            "strInstructions": "Slice and bake.",
            "strArea": "French",
            "strCategory": "Vegetarian",
            "strIngredient1": "Aubergine",
            "strMeasure1": "1 large",
            "strIngredient2": "",
            "strMeasure2": "",
            "strIngredient3": null,
            "strMeasure3": null
        }]}"#;
        let meals = parse_meals(body).unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].name, "Ratatouille");
        assert_eq!(meals[0].ingredients.len(), 1);
        assert_eq!(meals[0].ingredients[0].name, "Aubergine, 1 large");
    }

    #[test]
    fn test_parse_categories() {
        let body = r#"{"categories": [{
            "idCategory": "1",
            "strCategory": "Beef",
            "strCategoryThumb": "https://example.test/beef.png",
            "strCategoryDescription": "Beef is meat."
        }]}"#;
        let categories = parse_categories(body).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id.as_deref(), Some("1"));
        assert_eq!(categories[0].name, "Beef");
    }

    #[test]
    fn test_parse_area_list() {
        let body = r#"{"meals": [{"strArea": "American"}, {"strArea": "French"}]}"#;
        let areas = parse_area_list(body).unwrap();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[1].name, "French");
        assert!(areas[1].id.is_none());
    }

    #[test]
    fn test_parse_ingredient_list() {
        let body = r#"{"meals": [{"idIngredient": "1", "strIngredient": "Chicken", "strDescription": "A bird."}]}"#;
        let ingredients = parse_ingredient_list(body).unwrap();
        assert_eq!(ingredients[0].id, "1");
        assert_eq!(ingredients[0].name, "Chicken");
    }
}
