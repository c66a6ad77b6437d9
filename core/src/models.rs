use serde::Serialize;

use crate::error::{Error, Result};

/// Canonical taxonomy sizes seeded from the upstream API. Records whose id is
/// a number inside one of these ranges may not be mutated, archived (except
/// meals), or deleted by the user.
pub const CANONICAL_CATEGORY_MAX: u32 = 14;
pub const CANONICAL_AREA_MAX: u32 = 28;
pub const CANONICAL_INGREDIENT_MAX: u32 = 608;

/// True when `id` is a decimal number in `1..=max`.
///
/// User-authored records carry UUID ids and always fall outside the range.
#[must_use]
pub fn is_canonical_id(id: &str, max: u32) -> bool {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    id.parse::<u32>().is_ok_and(|n| (1..=max).contains(&n))
}

/// The entity kinds that can hold archive membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Meal,
    Area,
    Category,
    Ingredient,
}

impl ArchiveKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ArchiveKind::Meal => "meal",
            ArchiveKind::Area => "area",
            ArchiveKind::Category => "category",
            ArchiveKind::Ingredient => "ingredient",
        }
    }
}

// --- Persisted records ---

#[derive(Debug, Clone, Serialize)]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub instructions: Option<String>,
    /// Referenced area name; areas are looked up by name, not id.
    pub area: Option<String>,
    /// Referenced category id.
    pub category: Option<String>,
    pub ingredients: Vec<Ingredient>,
    /// Derived from archive membership at read time; never stored.
    pub is_archived: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Meal {
    /// A persisted meal is a favorite exactly when it is not archived.
    #[must_use]
    pub fn is_favorite(&self) -> bool {
        !self.is_archived
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Area {
    /// Present for canonical areas ("1".."28"), absent for user-created
    /// ones; `name` is the lookup key either way.
    pub id: Option<String>,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub information: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub information: Option<String>,
    pub image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

// --- Transfer models (decoded from API JSON, never persisted as-is) ---

#[derive(Debug, Clone, Serialize)]
pub struct MealModel {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub instructions: Option<String>,
    pub area: Option<AreaModel>,
    pub category: Option<CategoryModel>,
    pub ingredients: Vec<IngredientModel>,
    /// Filled by reconciliation against the local store.
    pub is_favorite: bool,
    pub is_archived: bool,
    /// True for filter-endpoint records that carry only id, name, and image.
    #[serde(skip)]
    pub partial: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AreaModel {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryModel {
    pub id: Option<String>,
    pub name: String,
    pub image: Option<String>,
    pub information: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngredientModel {
    pub id: String,
    pub name: String,
    pub information: Option<String>,
    pub image: Option<String>,
}

// --- Input validation ---

pub fn validate_record_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::MissingId);
    }
    Ok(())
}

pub fn validate_query(query: &str) -> Result<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyQuery);
    }
    Ok(trimmed)
}
