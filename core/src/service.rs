use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use uuid::Uuid;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::mealdb::is_numeric_query;
use crate::models::{
    Area, ArchiveKind, AreaModel, CANONICAL_AREA_MAX, CANONICAL_CATEGORY_MAX,
    CANONICAL_INGREDIENT_MAX, Category, CategoryModel, Ingredient, IngredientModel, Meal,
    MealModel, is_canonical_id, validate_query, validate_record_id,
};

/// Upper bound on in-flight detail lookups while enriching filter results.
const ENRICH_CONCURRENCY: usize = 8;

/// Everything the remote meal database answers. Implementations decode the
/// payload with the `mealdb` module and return transfer models; "no matches"
/// surfaces as `Error::EmptyResult` so callers can translate it per route.
#[async_trait]
pub trait MealApiProvider: Send + Sync {
    async fn search_by_name(&self, name: &str) -> Result<Vec<MealModel>>;
    async fn search_by_letter(&self, letter: char) -> Result<Vec<MealModel>>;
    async fn lookup_by_id(&self, id: &str) -> Result<MealModel>;
    async fn random_meal(&self) -> Result<MealModel>;
    async fn filter_by_area(&self, area: &str) -> Result<Vec<MealModel>>;
    async fn filter_by_category(&self, category: &str) -> Result<Vec<MealModel>>;
    async fn filter_by_ingredient(&self, ingredient: &str) -> Result<Vec<MealModel>>;
    async fn list_categories(&self) -> Result<Vec<CategoryModel>>;
    async fn list_areas(&self) -> Result<Vec<AreaModel>>;
    async fn list_ingredients(&self) -> Result<Vec<IngredientModel>>;
}

/// Command layer tying the remote provider to the local store.
///
/// The store sits behind a mutex so every write goes through a single owner;
/// the guard is never held across an await point.
pub struct RatatouilleService<P> {
    provider: P,
    db: Mutex<Database>,
}

impl<P: MealApiProvider> RatatouilleService<P> {
    pub fn new(provider: P, db: Database) -> Self {
        RatatouilleService {
            provider,
            db: Mutex::new(db),
        }
    }

    fn db(&self) -> MutexGuard<'_, Database> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Search and browse ---

    /// Route a free-form query: all digits goes to id lookup, a single
    /// character to first-letter search, anything else to name search.
    pub async fn search_meals(&self, query: &str) -> Result<Vec<MealModel>> {
        let query = validate_query(query)?;
        let mut meals = if is_numeric_query(query) {
            match self.provider.lookup_by_id(query).await {
                Ok(meal) => vec![meal],
                Err(Error::EmptyResult) => return Err(Error::NotFound(query.to_string())),
                Err(e) => return Err(e),
            }
        } else if let Some(letter) = single_char(query) {
            match self.provider.search_by_letter(letter).await {
                Ok(meals) => meals,
                Err(Error::EmptyResult) => return Err(Error::BadInput(query.to_string())),
                Err(e) => return Err(e),
            }
        } else {
            match self.provider.search_by_name(query).await {
                Ok(meals) => meals,
                Err(Error::EmptyResult) => return Err(Error::BadInput(query.to_string())),
                Err(e) => return Err(e),
            }
        };
        self.reconcile(&mut meals);
        Ok(meals)
    }

    pub async fn random_meal(&self) -> Result<MealModel> {
        let mut meals = vec![self.provider.random_meal().await?];
        self.reconcile(&mut meals);
        meals.pop().ok_or(Error::EmptyResult)
    }

    pub async fn filter_by_area(&self, area: &str) -> Result<Vec<MealModel>> {
        let area = validate_query(area)?;
        let fetched = self.provider.filter_by_area(area).await;
        self.complete_filter(fetched).await
    }

    pub async fn filter_by_category(&self, category: &str) -> Result<Vec<MealModel>> {
        let category = validate_query(category)?;
        let fetched = self.provider.filter_by_category(category).await;
        self.complete_filter(fetched).await
    }

    pub async fn filter_by_ingredient(&self, ingredient: &str) -> Result<Vec<MealModel>> {
        let ingredient = validate_query(ingredient)?;
        let fetched = self.provider.filter_by_ingredient(ingredient).await;
        self.complete_filter(fetched).await
    }

    /// Filter endpoints answer with partial records; a filter that matches
    /// nothing is an empty list, not an error.
    async fn complete_filter(
        &self,
        fetched: Result<Vec<MealModel>>,
    ) -> Result<Vec<MealModel>> {
        let meals = match fetched {
            Ok(meals) => meals,
            Err(Error::EmptyResult) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let mut meals = self.enrich(meals).await;
        self.reconcile(&mut meals);
        Ok(meals)
    }

    /// Upgrade partial records to full ones with bounded, order-preserving
    /// concurrent lookups. A failed lookup keeps the partial record.
    async fn enrich(&self, meals: Vec<MealModel>) -> Vec<MealModel> {
        stream::iter(meals)
            .map(|meal| self.enrich_one(meal))
            .buffered(ENRICH_CONCURRENCY)
            .collect()
            .await
    }

    async fn enrich_one(&self, meal: MealModel) -> MealModel {
        if !meal.partial {
            return meal;
        }
        match self.provider.lookup_by_id(&meal.id).await {
            Ok(full) => full,
            Err(e) => {
                tracing::debug!(meal_id = %meal.id, error = %e, "detail lookup failed, keeping partial record");
                meal
            }
        }
    }

    /// Annotate fetched meals with local favorite/archive state. Store errors
    /// degrade to unannotated records rather than failing the fetch.
    pub fn reconcile(&self, meals: &mut [MealModel]) {
        let db = self.db();
        for meal in meals.iter_mut() {
            match db.get_meal(&meal.id) {
                Ok(Some(local)) => {
                    meal.is_archived = local.is_archived;
                    meal.is_favorite = local.is_favorite();
                }
                Ok(None) => {
                    meal.is_archived = false;
                    meal.is_favorite = false;
                }
                Err(e) => {
                    tracing::warn!(meal_id = %meal.id, error = %e, "local state lookup failed");
                    meal.is_archived = false;
                    meal.is_favorite = false;
                }
            }
        }
    }

    // --- Favorites ---

    /// Persist a fetched meal as a favorite. Saving an already saved meal
    /// returns the existing record; an archived id is rejected outright.
    pub fn save_favorite(&self, meal: &MealModel) -> Result<Meal> {
        validate_record_id(&meal.id)?;
        let db = self.db();
        if db.is_archived(ArchiveKind::Meal, &meal.id)? {
            return Err(Error::LocatedInArchive(meal.id.clone()));
        }
        if let Some(existing) = db.get_meal(&meal.id)? {
            return Ok(existing);
        }
        db.save_meal(meal)
    }

    pub fn load_favorites(&self) -> Result<Vec<Meal>> {
        self.db().list_favorite_meals()
    }

    pub fn load_archived_meals(&self) -> Result<Vec<Meal>> {
        self.db().list_archived_meals()
    }

    pub fn get_meal(&self, id: &str) -> Result<Option<Meal>> {
        validate_record_id(id)?;
        self.db().get_meal(id)
    }

    pub fn archive_meal(&self, id: &str) -> Result<()> {
        validate_record_id(id)?;
        let db = self.db();
        db.get_meal(id)?.ok_or_else(|| Error::NotFound(id.to_string()))?;
        db.archive(ArchiveKind::Meal, id)
    }

    pub fn restore_meal(&self, id: &str) -> Result<()> {
        validate_record_id(id)?;
        self.db().restore(ArchiveKind::Meal, id)
    }

    pub fn delete_meal(&self, id: &str) -> Result<()> {
        validate_record_id(id)?;
        self.db().delete_meal(id)
    }

    // --- Categories ---

    pub fn add_category(
        &self,
        name: &str,
        image: Option<&str>,
        information: Option<&str>,
    ) -> Result<Category> {
        let name = validate_query(name)?;
        let db = self.db();
        if db.find_category_by_name(name)?.is_some() {
            return Err(Error::Duplicate(name.to_string()));
        }
        let id = Uuid::new_v4().to_string();
        db.insert_category(&id, name, image, information)
    }

    pub fn update_category(
        &self,
        id: &str,
        name: Option<&str>,
        image: Option<&str>,
        information: Option<&str>,
    ) -> Result<Category> {
        self.db().update_category(id, name, image, information)
    }

    pub fn archive_category(&self, id: &str) -> Result<()> {
        if is_canonical_id(id, CANONICAL_CATEGORY_MAX) {
            return Err(Error::Unauthorized(id.to_string()));
        }
        let db = self.db();
        db.get_category(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        db.archive(ArchiveKind::Category, id)
    }

    pub fn restore_category(&self, id: &str) -> Result<()> {
        self.db().restore(ArchiveKind::Category, id)
    }

    pub fn delete_category(&self, id: &str) -> Result<()> {
        self.db().delete_category(id)
    }

    pub fn load_categories(&self) -> Result<Vec<Category>> {
        self.db().list_categories_not_in_archive()
    }

    pub fn load_archived_categories(&self) -> Result<Vec<Category>> {
        self.db().list_archived_categories()
    }

    /// Cache the canonical category listing locally. Existing ids are left
    /// alone; returns how many records were added.
    pub async fn import_categories(&self) -> Result<usize> {
        let categories = self.provider.list_categories().await?;
        let db = self.db();
        let mut added = 0;
        for category in categories {
            let Some(id) = category.id else { continue };
            if db.get_category(&id)?.is_none() {
                db.insert_category(
                    &id,
                    &category.name,
                    category.image.as_deref(),
                    category.information.as_deref(),
                )?;
                added += 1;
            }
        }
        Ok(added)
    }

    // --- Areas (keyed by name) ---

    pub fn add_area(&self, name: &str) -> Result<Area> {
        let name = validate_query(name)?;
        let db = self.db();
        if db.find_area(name)?.is_some() {
            return Err(Error::Duplicate(name.to_string()));
        }
        db.insert_area(None, name)
    }

    pub fn rename_area(&self, name: &str, new_name: &str) -> Result<Area> {
        let new_name = validate_query(new_name)?;
        self.db().rename_area(name, new_name)
    }

    pub fn archive_area(&self, name: &str) -> Result<()> {
        let db = self.db();
        let area = db
            .find_area(name)?
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        if let Some(id) = &area.id {
            if is_canonical_id(id, CANONICAL_AREA_MAX) {
                return Err(Error::Unauthorized(area.name));
            }
        }
        db.archive(ArchiveKind::Area, &area.name)
    }

    pub fn restore_area(&self, name: &str) -> Result<()> {
        let db = self.db();
        // Archive entries hold the stored casing, not the caller's
        let area = db
            .find_area(name)?
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        db.restore(ArchiveKind::Area, &area.name)
    }

    pub fn delete_area(&self, name: &str) -> Result<()> {
        self.db().delete_area(name)
    }

    pub fn load_areas(&self) -> Result<Vec<Area>> {
        self.db().list_areas_not_in_archive()
    }

    pub fn load_archived_areas(&self) -> Result<Vec<Area>> {
        self.db().list_archived_areas()
    }

    /// Cache the canonical area listing. The API ships bare names; canonical
    /// ids are assigned from the listing position, so the first import pins
    /// "1".."28". A user-created area whose name matches the listing gets the
    /// canonical id backfilled rather than staying user-editable forever.
    pub async fn import_areas(&self) -> Result<usize> {
        let areas = self.provider.list_areas().await?;
        let db = self.db();
        let mut added = 0;
        for (position, area) in areas.iter().enumerate() {
            let id = (position + 1).to_string();
            match db.find_area(&area.name)? {
                None => {
                    db.insert_area(Some(&id), &area.name)?;
                    added += 1;
                }
                Some(existing) if existing.id.is_none() => {
                    db.set_area_id(&existing.name, &id)?;
                }
                Some(_) => {}
            }
        }
        Ok(added)
    }

    // --- Ingredients ---

    pub fn add_ingredient(
        &self,
        name: &str,
        information: Option<&str>,
        image: Option<&str>,
    ) -> Result<Ingredient> {
        let name = validate_query(name)?;
        let db = self.db();
        if db.find_ingredient_by_name(name)?.is_some() {
            return Err(Error::Duplicate(name.to_string()));
        }
        let id = Uuid::new_v4().to_string();
        db.insert_ingredient(&id, name, information, image)
    }

    pub fn update_ingredient(
        &self,
        id: &str,
        name: Option<&str>,
        information: Option<&str>,
        image: Option<&str>,
    ) -> Result<Ingredient> {
        self.db().update_ingredient(id, name, information, image)
    }

    pub fn archive_ingredient(&self, id: &str) -> Result<()> {
        if is_canonical_id(id, CANONICAL_INGREDIENT_MAX) {
            return Err(Error::Unauthorized(id.to_string()));
        }
        let db = self.db();
        db.get_ingredient(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        db.archive(ArchiveKind::Ingredient, id)
    }

    pub fn restore_ingredient(&self, id: &str) -> Result<()> {
        self.db().restore(ArchiveKind::Ingredient, id)
    }

    pub fn delete_ingredient(&self, id: &str) -> Result<()> {
        self.db().delete_ingredient(id)
    }

    pub fn load_ingredients(&self) -> Result<Vec<Ingredient>> {
        self.db().list_ingredients_not_in_archive()
    }

    pub fn load_archived_ingredients(&self) -> Result<Vec<Ingredient>> {
        self.db().list_archived_ingredients()
    }

    /// Cache the canonical ingredient listing (ids "1".."608" come from the
    /// payload itself).
    pub async fn import_ingredients(&self) -> Result<usize> {
        let ingredients = self.provider.list_ingredients().await?;
        let db = self.db();
        let mut added = 0;
        for ingredient in ingredients {
            if db.get_ingredient(&ingredient.id)?.is_none() {
                db.insert_ingredient(
                    &ingredient.id,
                    &ingredient.name,
                    ingredient.information.as_deref(),
                    ingredient.image.as_deref(),
                )?;
                added += 1;
            }
        }
        Ok(added)
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockProvider {
        meals: Vec<MealModel>,
        categories: Vec<CategoryModel>,
        areas: Vec<AreaModel>,
        ingredients: Vec<IngredientModel>,
        fail_lookups: bool,
    }

    impl MockProvider {
        fn new(meals: Vec<MealModel>) -> Self {
            MockProvider {
                meals,
                categories: Vec::new(),
                areas: Vec::new(),
                ingredients: Vec::new(),
                fail_lookups: false,
            }
        }

        fn none_or(meals: Vec<MealModel>) -> Result<Vec<MealModel>> {
            if meals.is_empty() {
                Err(Error::EmptyResult)
            } else {
                Ok(meals)
            }
        }
    }

    #[async_trait]
    impl MealApiProvider for MockProvider {
        async fn search_by_name(&self, name: &str) -> Result<Vec<MealModel>> {
            let needle = name.to_lowercase();
            Self::none_or(
                self.meals
                    .iter()
                    .filter(|m| m.name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect(),
            )
        }

        async fn search_by_letter(&self, letter: char) -> Result<Vec<MealModel>> {
            Self::none_or(
                self.meals
                    .iter()
                    .filter(|m| {
                        m.name
                            .chars()
                            .next()
                            .is_some_and(|c| c.eq_ignore_ascii_case(&letter))
                    })
                    .cloned()
                    .collect(),
            )
        }

        async fn lookup_by_id(&self, id: &str) -> Result<MealModel> {
            if self.fail_lookups {
                return Err(Error::Server(500));
            }
            self.meals
                .iter()
                .find(|m| m.id == id)
                .cloned()
                .ok_or(Error::EmptyResult)
        }

        async fn random_meal(&self) -> Result<MealModel> {
            self.meals.first().cloned().ok_or(Error::EmptyResult)
        }

        async fn filter_by_area(&self, area: &str) -> Result<Vec<MealModel>> {
            Self::none_or(
                self.meals
                    .iter()
                    .filter(|m| {
                        m.area
                            .as_ref()
                            .is_some_and(|a| a.name.eq_ignore_ascii_case(area))
                    })
                    .map(partial_copy)
                    .collect(),
            )
        }

        async fn filter_by_category(&self, category: &str) -> Result<Vec<MealModel>> {
            Self::none_or(
                self.meals
                    .iter()
                    .filter(|m| {
                        m.category
                            .as_ref()
                            .is_some_and(|c| c.name.eq_ignore_ascii_case(category))
                    })
                    .map(partial_copy)
                    .collect(),
            )
        }

        async fn filter_by_ingredient(&self, ingredient: &str) -> Result<Vec<MealModel>> {
            let needle = ingredient.to_lowercase();
            Self::none_or(
                self.meals
                    .iter()
                    .filter(|m| {
                        m.ingredients
                            .iter()
                            .any(|i| i.name.to_lowercase().contains(&needle))
                    })
                    .map(partial_copy)
                    .collect(),
            )
        }

        async fn list_categories(&self) -> Result<Vec<CategoryModel>> {
            Ok(self.categories.clone())
        }

        async fn list_areas(&self) -> Result<Vec<AreaModel>> {
            Ok(self.areas.clone())
        }

        async fn list_ingredients(&self) -> Result<Vec<IngredientModel>> {
            Ok(self.ingredients.clone())
        }
    }

    fn partial_copy(meal: &MealModel) -> MealModel {
        MealModel {
            id: meal.id.clone(),
            name: meal.name.clone(),
            image: meal.image.clone(),
            instructions: None,
            area: None,
            category: None,
            ingredients: Vec::new(),
            is_favorite: false,
            is_archived: false,
            partial: true,
        }
    }

    fn sample_meal(id: &str, name: &str, area: &str, category: &str) -> MealModel {
        MealModel {
            id: id.to_string(),
            name: name.to_string(),
            image: Some(format!("https://example.test/{id}.jpg")),
            instructions: Some("Cook it.".to_string()),
            area: Some(AreaModel {
                id: None,
                name: area.to_string(),
            }),
            category: Some(CategoryModel {
                id: None,
                name: category.to_string(),
                image: None,
                information: None,
            }),
            ingredients: vec![IngredientModel {
                id: Uuid::new_v4().to_string(),
                name: "Aubergine, 1 large".to_string(),
                information: None,
                image: None,
            }],
            is_favorite: false,
            is_archived: false,
            partial: false,
        }
    }

    fn service_with(meals: Vec<MealModel>) -> RatatouilleService<MockProvider> {
        RatatouilleService::new(MockProvider::new(meals), Database::open_in_memory().unwrap())
    }

    fn two_meals() -> Vec<MealModel> {
        vec![
            sample_meal("52908", "Ratatouille", "French", "Vegetarian"),
            sample_meal("53001", "Risotto", "Italian", "Vegetarian"),
        ]
    }

    #[tokio::test]
    async fn test_search_routes_numeric_to_id_lookup() {
        let service = service_with(two_meals());
        let meals = service.search_meals("52908").await.unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].name, "Ratatouille");
    }

    #[tokio::test]
    async fn test_search_routes_single_char_to_letter() {
        let service = service_with(two_meals());
        let meals = service.search_meals("r").await.unwrap();
        assert_eq!(meals.len(), 2);
    }

    #[tokio::test]
    async fn test_search_routes_rest_to_name() {
        let service = service_with(two_meals());
        let meals = service.search_meals("rata").await.unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].id, "52908");
    }

    #[tokio::test]
    async fn test_search_unknown_id_is_not_found() {
        let service = service_with(two_meals());
        assert!(matches!(
            service.search_meals("99999").await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_search_unknown_name_is_bad_input() {
        let service = service_with(two_meals());
        assert!(matches!(
            service.search_meals("xylophone").await,
            Err(Error::BadInput(_))
        ));
    }

    #[tokio::test]
    async fn test_search_empty_query_rejected() {
        let service = service_with(two_meals());
        assert!(matches!(
            service.search_meals("   ").await,
            Err(Error::EmptyQuery)
        ));
    }

    #[tokio::test]
    async fn test_save_favorite_requires_id() {
        let service = service_with(Vec::new());
        let mut meal = sample_meal("", "Nameless", "French", "Vegetarian");
        meal.id = String::new();
        assert!(matches!(
            service.save_favorite(&meal),
            Err(Error::MissingId)
        ));
    }

    #[tokio::test]
    async fn test_save_favorite_idempotent() {
        let service = service_with(two_meals());
        let meal = sample_meal("52908", "Ratatouille", "French", "Vegetarian");
        let first = service.save_favorite(&meal).unwrap();
        let second = service.save_favorite(&meal).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(service.load_favorites().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_favorite_rejects_archived() {
        let service = service_with(two_meals());
        let meal = sample_meal("52908", "Ratatouille", "French", "Vegetarian");
        service.save_favorite(&meal).unwrap();
        service.archive_meal("52908").unwrap();
        assert!(matches!(
            service.save_favorite(&meal),
            Err(Error::LocatedInArchive(_))
        ));
    }

    #[tokio::test]
    async fn test_search_reconciles_favorite_state() {
        let service = service_with(two_meals());
        let meal = sample_meal("52908", "Ratatouille", "French", "Vegetarian");
        service.save_favorite(&meal).unwrap();

        let meals = service.search_meals("r").await.unwrap();
        let ratatouille = meals.iter().find(|m| m.id == "52908").unwrap();
        let risotto = meals.iter().find(|m| m.id == "53001").unwrap();
        assert!(ratatouille.is_favorite);
        assert!(!ratatouille.is_archived);
        assert!(!risotto.is_favorite);
    }

    #[tokio::test]
    async fn test_search_reconciles_archived_state() {
        let service = service_with(two_meals());
        let meal = sample_meal("52908", "Ratatouille", "French", "Vegetarian");
        service.save_favorite(&meal).unwrap();
        service.archive_meal("52908").unwrap();

        let meals = service.search_meals("52908").await.unwrap();
        assert_eq!(meals.len(), 1);
        assert!(meals[0].is_archived);
        assert!(!meals[0].is_favorite);
    }

    #[tokio::test]
    async fn test_filter_enriches_partial_records_in_order() {
        let service = service_with(vec![
            sample_meal("1", "Crepe", "French", "Dessert"),
            sample_meal("2", "Cassoulet", "French", "Pork"),
            sample_meal("3", "Quiche", "French", "Miscellaneous"),
        ]);
        let meals = service.filter_by_area("French").await.unwrap();
        assert_eq!(meals.len(), 3);
        let ids: Vec<&str> = meals.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert!(meals.iter().all(|m| !m.partial));
        assert!(meals.iter().all(|m| m.instructions.is_some()));
    }

    #[tokio::test]
    async fn test_filter_falls_back_to_partial_on_lookup_failure() {
        let mut provider = MockProvider::new(two_meals());
        provider.fail_lookups = true;
        let service = RatatouilleService::new(provider, Database::open_in_memory().unwrap());

        let meals = service.filter_by_area("French").await.unwrap();
        assert_eq!(meals.len(), 1);
        assert!(meals[0].partial);
        assert_eq!(meals[0].name, "Ratatouille");
    }

    #[tokio::test]
    async fn test_filter_no_matches_is_empty_list() {
        let service = service_with(two_meals());
        let meals = service.filter_by_area("Martian").await.unwrap();
        assert!(meals.is_empty());
    }

    #[tokio::test]
    async fn test_archive_restore_delete_roundtrip() {
        let service = service_with(two_meals());
        let found = service.search_meals("52908").await.unwrap();
        service.save_favorite(&found[0]).unwrap();

        service.archive_meal("52908").unwrap();
        assert!(service.load_favorites().unwrap().is_empty());
        assert_eq!(service.load_archived_meals().unwrap().len(), 1);

        service.restore_meal("52908").unwrap();
        assert_eq!(service.load_favorites().unwrap().len(), 1);

        service.delete_meal("52908").unwrap();
        assert!(matches!(
            service.delete_meal("52908"),
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_archive_unsaved_meal_is_not_found() {
        let service = service_with(two_meals());
        assert!(matches!(
            service.archive_meal("52908"),
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_restore_unarchived_meal_fails() {
        let service = service_with(two_meals());
        let meal = sample_meal("52908", "Ratatouille", "French", "Vegetarian");
        service.save_favorite(&meal).unwrap();
        assert!(matches!(
            service.restore_meal("52908"),
            Err(Error::NotArchived(_))
        ));
    }

    #[tokio::test]
    async fn test_add_category_rejects_duplicate_name() {
        let service = service_with(Vec::new());
        service.add_category("Fusion", None, None).unwrap();
        assert!(matches!(
            service.add_category("fusion", None, None),
            Err(Error::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn test_archive_canonical_category_unauthorized() {
        let mut provider = MockProvider::new(Vec::new());
        provider.categories = vec![CategoryModel {
            id: Some("3".to_string()),
            name: "Dessert".to_string(),
            image: None,
            information: None,
        }];
        let service = RatatouilleService::new(provider, Database::open_in_memory().unwrap());
        assert_eq!(service.import_categories().await.unwrap(), 1);
        assert!(matches!(
            service.archive_category("3"),
            Err(Error::Unauthorized(_))
        ));

        let custom = service.add_category("Fusion", None, None).unwrap();
        service.archive_category(&custom.id).unwrap();
        assert!(service.load_categories().unwrap().is_empty());
        assert_eq!(service.load_archived_categories().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_import_areas_assigns_positional_ids() {
        let mut provider = MockProvider::new(Vec::new());
        provider.areas = vec![
            AreaModel {
                id: None,
                name: "American".to_string(),
            },
            AreaModel {
                id: None,
                name: "British".to_string(),
            },
        ];
        let service = RatatouilleService::new(provider, Database::open_in_memory().unwrap());
        assert_eq!(service.import_areas().await.unwrap(), 2);

        let areas = service.load_areas().unwrap();
        let american = areas.iter().find(|a| a.name == "American").unwrap();
        let british = areas.iter().find(|a| a.name == "British").unwrap();
        assert_eq!(american.id.as_deref(), Some("1"));
        assert_eq!(british.id.as_deref(), Some("2"));

        // Second run adds nothing
        assert_eq!(service.import_areas().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_canonical_area_archive_unauthorized_after_import() {
        let mut provider = MockProvider::new(Vec::new());
        provider.areas = vec![AreaModel {
            id: None,
            name: "French".to_string(),
        }];
        let service = RatatouilleService::new(provider, Database::open_in_memory().unwrap());
        service.import_areas().await.unwrap();
        assert!(matches!(
            service.archive_area("French"),
            Err(Error::Unauthorized(_))
        ));

        service.add_area("Homestyle").unwrap();
        service.archive_area("Homestyle").unwrap();
        service.restore_area("Homestyle").unwrap();
    }

    #[tokio::test]
    async fn test_area_archive_and_restore_case_insensitive() {
        let service = service_with(Vec::new());
        service.add_area("Homestyle").unwrap();
        service.archive_area("homestyle").unwrap();
        assert_eq!(service.load_archived_areas().unwrap().len(), 1);

        service.restore_area("HOMESTYLE").unwrap();
        assert!(service.load_archived_areas().unwrap().is_empty());
        assert_eq!(service.load_areas().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_import_areas_backfills_id_on_existing_name() {
        let mut provider = MockProvider::new(Vec::new());
        provider.areas = vec![
            AreaModel {
                id: None,
                name: "American".to_string(),
            },
            AreaModel {
                id: None,
                name: "British".to_string(),
            },
        ];
        let service = RatatouilleService::new(provider, Database::open_in_memory().unwrap());
        service.add_area("American").unwrap();

        // Only British is new; American gets its canonical id pinned
        assert_eq!(service.import_areas().await.unwrap(), 1);
        let areas = service.load_areas().unwrap();
        let american = areas.iter().find(|a| a.name == "American").unwrap();
        assert_eq!(american.id.as_deref(), Some("1"));
        assert!(matches!(
            service.archive_area("American"),
            Err(Error::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_import_ingredients_upserts_by_id() {
        let mut provider = MockProvider::new(Vec::new());
        provider.ingredients = vec![
            IngredientModel {
                id: "1".to_string(),
                name: "Chicken".to_string(),
                information: Some("A bird.".to_string()),
                image: None,
            },
            IngredientModel {
                id: "2".to_string(),
                name: "Salmon".to_string(),
                information: None,
                image: None,
            },
        ];
        let service = RatatouilleService::new(provider, Database::open_in_memory().unwrap());
        assert_eq!(service.import_ingredients().await.unwrap(), 2);
        assert_eq!(service.import_ingredients().await.unwrap(), 0);
        assert_eq!(service.load_ingredients().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_random_meal_reconciled() {
        let service = service_with(two_meals());
        let meal = service.random_meal().await.unwrap();
        assert_eq!(meal.id, "52908");
        assert!(!meal.is_favorite);

        service
            .save_favorite(&sample_meal("52908", "Ratatouille", "French", "Vegetarian"))
            .unwrap();
        let meal = service.random_meal().await.unwrap();
        assert!(meal.is_favorite);
    }
}
