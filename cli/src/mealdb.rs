use async_trait::async_trait;

use ratatouille_core::error::{Error, Result, classify_status};
use ratatouille_core::mealdb::{
    parse_area_list, parse_categories, parse_ingredient_list, parse_meals,
};
use ratatouille_core::models::{AreaModel, CategoryModel, IngredientModel, MealModel};
use ratatouille_core::service::MealApiProvider;

/// HTTP client for the recipe API. Endpoint bodies are handed verbatim to the
/// core decoders; this type only does transport and status classification.
pub struct MealDbClient {
    client: reqwest::Client,
    base: String,
}

impl MealDbClient {
    pub fn new(base: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(format!(
                "ratatouille-cli/{} (recipe browser)",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(std::time::Duration::from_secs(10))
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base: base.into(),
        }
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = format!("{}/{path}", self.base.trim_end_matches('/'));
        let url = reqwest::Url::parse(&url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        classify_status(resp.status().as_u16())?;
        resp.text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))
    }
}

#[async_trait]
impl MealApiProvider for MealDbClient {
    async fn search_by_name(&self, name: &str) -> Result<Vec<MealModel>> {
        let body = self.get("search.php", &[("s", name)]).await?;
        parse_meals(&body)
    }

    async fn search_by_letter(&self, letter: char) -> Result<Vec<MealModel>> {
        let letter = letter.to_string();
        let body = self.get("search.php", &[("f", letter.as_str())]).await?;
        parse_meals(&body)
    }

    async fn lookup_by_id(&self, id: &str) -> Result<MealModel> {
        let body = self.get("lookup.php", &[("i", id)]).await?;
        parse_meals(&body)?
            .into_iter()
            .next()
            .ok_or(Error::EmptyResult)
    }

    async fn random_meal(&self) -> Result<MealModel> {
        let body = self.get("random.php", &[]).await?;
        parse_meals(&body)?
            .into_iter()
            .next()
            .ok_or(Error::EmptyResult)
    }

    async fn filter_by_area(&self, area: &str) -> Result<Vec<MealModel>> {
        let body = self.get("filter.php", &[("a", area)]).await?;
        parse_meals(&body)
    }

    async fn filter_by_category(&self, category: &str) -> Result<Vec<MealModel>> {
        let body = self.get("filter.php", &[("c", category)]).await?;
        parse_meals(&body)
    }

    async fn filter_by_ingredient(&self, ingredient: &str) -> Result<Vec<MealModel>> {
        let body = self.get("filter.php", &[("i", ingredient)]).await?;
        parse_meals(&body)
    }

    async fn list_categories(&self) -> Result<Vec<CategoryModel>> {
        let body = self.get("categories.php", &[]).await?;
        parse_categories(&body)
    }

    async fn list_areas(&self) -> Result<Vec<AreaModel>> {
        let body = self.get("list.php", &[("a", "list")]).await?;
        parse_area_list(&body)
    }

    async fn list_ingredients(&self) -> Result<Vec<IngredientModel>> {
        let body = self.get("list.php", &[("i", "list")]).await?;
        parse_ingredient_list(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_API_BASE;

    #[tokio::test]
    async fn test_invalid_base_url() {
        let client = MealDbClient::new("not a url");
        assert!(matches!(
            client.lookup_by_id("52908").await,
            Err(Error::InvalidUrl(_))
        ));
    }

    // --- Integration tests (hit the live recipe API) ---

    #[tokio::test]
    #[ignore = "hits the live recipe API"]
    async fn test_lookup_known_meal() {
        let client = MealDbClient::new(DEFAULT_API_BASE);
        let meal = client.lookup_by_id("52908").await.unwrap();
        assert_eq!(meal.name, "Ratatouille");
        assert!(!meal.ingredients.is_empty());
        assert!(!meal.partial);
    }

    #[tokio::test]
    #[ignore = "hits the live recipe API"]
    async fn test_lookup_unknown_meal_is_empty() {
        let client = MealDbClient::new(DEFAULT_API_BASE);
        assert!(matches!(
            client.lookup_by_id("99999999").await,
            Err(Error::EmptyResult)
        ));
    }

    #[tokio::test]
    #[ignore = "hits the live recipe API"]
    async fn test_search_by_name_returns_results() {
        let client = MealDbClient::new(DEFAULT_API_BASE);
        let meals = client.search_by_name("Arrabiata").await.unwrap();
        assert!(!meals.is_empty());
        for meal in &meals {
            assert!(!meal.id.is_empty());
            assert!(!meal.name.is_empty());
        }
    }

    #[tokio::test]
    #[ignore = "hits the live recipe API"]
    async fn test_filter_returns_partial_records() {
        let client = MealDbClient::new(DEFAULT_API_BASE);
        let meals = client.filter_by_area("French").await.unwrap();
        assert!(!meals.is_empty());
        assert!(meals.iter().all(|m| m.partial));
    }

    #[tokio::test]
    #[ignore = "hits the live recipe API"]
    async fn test_canonical_listings() {
        let client = MealDbClient::new(DEFAULT_API_BASE);
        assert!(!client.list_categories().await.unwrap().is_empty());
        assert!(!client.list_areas().await.unwrap().is_empty());
        assert!(!client.list_ingredients().await.unwrap().is_empty());
    }
}
