use std::path::Path;

use chrono::Local;
use rusqlite::{Connection, params};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{
    Area, ArchiveKind, CANONICAL_AREA_MAX, CANONICAL_CATEGORY_MAX, CANONICAL_INGREDIENT_MAX,
    Category, CategoryModel, Ingredient, Meal, MealModel, is_canonical_id,
};

/// Predicate-based CRUD over the four entity kinds plus archive membership.
///
/// Archived state is represented solely as membership in `archive_entries`;
/// there is one implicit bucket per kind (the `kind` column), so the
/// "one archive group per kind" invariant holds structurally.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS meals (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    image TEXT,
                    instructions TEXT,
                    area_name TEXT,
                    category_id TEXT,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS areas (
                    name TEXT PRIMARY KEY,
                    id TEXT,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS categories (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    image TEXT,
                    information TEXT,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS ingredients (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    information TEXT,
                    image TEXT,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS meal_ingredients (
                    meal_id TEXT NOT NULL REFERENCES meals(id) ON DELETE CASCADE,
                    ingredient_id TEXT NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
                    PRIMARY KEY (meal_id, ingredient_id)
                );

                CREATE TABLE IF NOT EXISTS archive_entries (
                    kind TEXT NOT NULL,
                    item_id TEXT NOT NULL,
                    archived_at TEXT NOT NULL,
                    PRIMARY KEY (kind, item_id)
                );

                CREATE INDEX IF NOT EXISTS idx_meals_name ON meals(name);
                CREATE INDEX IF NOT EXISTS idx_ingredients_name ON ingredients(name);
                CREATE INDEX IF NOT EXISTS idx_meal_ingredients_meal ON meal_ingredients(meal_id);

                PRAGMA user_version = 1;",
            )?;
        }

        Ok(())
    }

    fn now() -> String {
        Local::now().to_rfc3339()
    }

    // --- Row mapping helpers ---

    // Expects: 0 id, 1 name, 2 image, 3 instructions, 4 area_name,
    // 5 category_id, 6 created_at, 7 updated_at, 8 archived flag
    fn meal_from_row(row: &rusqlite::Row) -> rusqlite::Result<Meal> {
        Ok(Meal {
            id: row.get(0)?,
            name: row.get(1)?,
            image: row.get(2)?,
            instructions: row.get(3)?,
            area: row.get(4)?,
            category: row.get(5)?,
            ingredients: Vec::new(),
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
            is_archived: row.get(8)?,
        })
    }

    fn area_from_row(row: &rusqlite::Row) -> rusqlite::Result<Area> {
        Ok(Area {
            name: row.get(0)?,
            id: row.get(1)?,
            created_at: row.get(2)?,
            updated_at: row.get(3)?,
        })
    }

    fn category_from_row(row: &rusqlite::Row) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
            image: row.get(2)?,
            information: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn ingredient_from_row(row: &rusqlite::Row) -> rusqlite::Result<Ingredient> {
        Ok(Ingredient {
            id: row.get(0)?,
            name: row.get(1)?,
            information: row.get(2)?,
            image: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    const MEAL_SELECT: &'static str = "SELECT m.id, m.name, m.image, m.instructions, m.area_name, m.category_id,
                m.created_at, m.updated_at,
                EXISTS(SELECT 1 FROM archive_entries a WHERE a.kind = 'meal' AND a.item_id = m.id)
         FROM meals m";

    // --- Archive membership ---

    /// Add a record to its kind's archive bucket. Re-archiving an already
    /// archived record is a no-op; the `(kind, item_id)` primary key means a
    /// second bucket can never appear.
    pub fn archive(&self, kind: ArchiveKind, item_id: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO archive_entries (kind, item_id, archived_at) VALUES (?1, ?2, ?3)",
            params![kind.as_str(), item_id, Self::now()],
        )?;
        Ok(())
    }

    /// Remove a record from its archive bucket. Fails with `NotArchived` when
    /// the record is not currently a member.
    pub fn restore(&self, kind: ArchiveKind, item_id: &str) -> Result<()> {
        let rows = self.conn.execute(
            "DELETE FROM archive_entries WHERE kind = ?1 AND item_id = ?2",
            params![kind.as_str(), item_id],
        )?;
        if rows == 0 {
            return Err(Error::NotArchived(item_id.to_string()));
        }
        Ok(())
    }

    pub fn is_archived(&self, kind: ArchiveKind, item_id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM archive_entries WHERE kind = ?1 AND item_id = ?2",
            params![kind.as_str(), item_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn archived_ids(&self, kind: ArchiveKind) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT item_id FROM archive_entries WHERE kind = ?1 ORDER BY archived_at, item_id",
        )?;
        let ids = stmt
            .query_map(params![kind.as_str()], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    // --- Meals ---

    pub fn get_meal(&self, id: &str) -> Result<Option<Meal>> {
        let sql = format!("{} WHERE m.id = ?1", Self::MEAL_SELECT);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => {
                let mut meal = Self::meal_from_row(row)?;
                meal.ingredients = self.get_meal_ingredients(&meal.id)?;
                Ok(Some(meal))
            }
            None => Ok(None),
        }
    }

    pub fn get_meal_ingredients(&self, meal_id: &str) -> Result<Vec<Ingredient>> {
        let mut stmt = self.conn.prepare(
            "SELECT i.id, i.name, i.information, i.image, i.created_at, i.updated_at
             FROM ingredients i
             JOIN meal_ingredients mi ON mi.ingredient_id = i.id
             WHERE mi.meal_id = ?1
             ORDER BY i.name",
        )?;
        let ingredients = stmt
            .query_map(params![meal_id], Self::ingredient_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ingredients)
    }

    /// Materialize a transfer model as a persisted meal: the area reference is
    /// resolved by name, the category by id (falling back to name), and every
    /// listed ingredient becomes a fresh row. Callers handle duplicate policy;
    /// this inserts unconditionally.
    pub fn save_meal(&self, meal: &MealModel) -> Result<Meal> {
        let tx = self.conn.unchecked_transaction()?;
        let now = Self::now();

        let area_name = match &meal.area {
            Some(area) => {
                if self.find_area(&area.name)?.is_none() {
                    self.conn.execute(
                        "INSERT INTO areas (name, id, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
                        params![area.name, area.id, now],
                    )?;
                }
                Some(area.name.clone())
            }
            None => None,
        };

        let category_id = match &meal.category {
            Some(category) => Some(self.resolve_category_id(category, &now)?),
            None => None,
        };

        self.conn.execute(
            "INSERT INTO meals (id, name, image, instructions, area_name, category_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            params![
                meal.id,
                meal.name,
                meal.image,
                meal.instructions,
                area_name,
                category_id,
                now,
            ],
        )?;

        for ingredient in &meal.ingredients {
            self.conn.execute(
                "INSERT INTO ingredients (id, name, information, image, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![
                    ingredient.id,
                    ingredient.name,
                    ingredient.information,
                    ingredient.image,
                    now,
                ],
            )?;
            self.conn.execute(
                "INSERT INTO meal_ingredients (meal_id, ingredient_id) VALUES (?1, ?2)",
                params![meal.id, ingredient.id],
            )?;
        }

        tx.commit()?;
        self.get_meal(&meal.id)?
            .ok_or_else(|| Error::NotFound(meal.id.clone()))
    }

    fn resolve_category_id(&self, category: &CategoryModel, now: &str) -> Result<String> {
        if let Some(id) = &category.id {
            if self.get_category(id)?.is_some() {
                return Ok(id.clone());
            }
        }
        if let Some(existing) = self.find_category_by_name(&category.name)? {
            return Ok(existing.id);
        }
        let id = category
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        self.conn.execute(
            "INSERT INTO categories (id, name, image, information, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![id, category.name, category.image, category.information, now],
        )?;
        Ok(id)
    }

    /// Remove the meal's archive membership (if any), its synthesized
    /// ingredient rows, and the meal itself.
    pub fn delete_meal(&self, id: &str) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        self.conn.execute(
            "DELETE FROM archive_entries WHERE kind = 'meal' AND item_id = ?1",
            params![id],
        )?;
        // Ingredient rows created for this meal are not shared; anything still
        // referenced by another meal is left alone.
        self.conn.execute(
            "DELETE FROM ingredients WHERE id IN (
                 SELECT ingredient_id FROM meal_ingredients WHERE meal_id = ?1
             ) AND id NOT IN (
                 SELECT ingredient_id FROM meal_ingredients WHERE meal_id <> ?1
             )",
            params![id],
        )?;
        let rows = self
            .conn
            .execute("DELETE FROM meals WHERE id = ?1", params![id])?;
        tx.commit()?;
        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Favorites: persisted meals outside the archive bucket.
    pub fn list_favorite_meals(&self) -> Result<Vec<Meal>> {
        let sql = format!(
            "{} WHERE m.id NOT IN (SELECT item_id FROM archive_entries WHERE kind = 'meal')
             ORDER BY m.name",
            Self::MEAL_SELECT
        );
        self.collect_meals(&sql)
    }

    pub fn list_archived_meals(&self) -> Result<Vec<Meal>> {
        let sql = format!(
            "{} WHERE m.id IN (SELECT item_id FROM archive_entries WHERE kind = 'meal')
             ORDER BY m.name",
            Self::MEAL_SELECT
        );
        self.collect_meals(&sql)
    }

    fn collect_meals(&self, sql: &str) -> Result<Vec<Meal>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut meals = stmt
            .query_map([], Self::meal_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        for meal in &mut meals {
            meal.ingredients = self.get_meal_ingredients(&meal.id)?;
        }
        Ok(meals)
    }

    // --- Areas (looked up by name, not id) ---

    pub fn find_area(&self, name: &str) -> Result<Option<Area>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, id, created_at, updated_at FROM areas WHERE LOWER(name) = LOWER(?1)",
        )?;
        let mut rows = stmt.query(params![name])?;
        match rows.next()? {
            Some(row) => Ok(Some(Self::area_from_row(row)?)),
            None => Ok(None),
        }
    }

    pub fn insert_area(&self, id: Option<&str>, name: &str) -> Result<Area> {
        let now = Self::now();
        self.conn.execute(
            "INSERT INTO areas (name, id, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
            params![name, id, now],
        )?;
        self.find_area(name)?
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Assign an id to an existing area (taxonomy import pinning a canonical
    /// id onto a previously user-created name).
    pub fn set_area_id(&self, name: &str, id: &str) -> Result<Area> {
        let area = self
            .find_area(name)?
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        self.conn.execute(
            "UPDATE areas SET id = ?1, updated_at = ?2 WHERE name = ?3",
            params![id, Self::now(), area.name],
        )?;
        self.find_area(&area.name)?
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Rename an area and fix up every reference to the old name. Canonical
    /// areas are off limits.
    pub fn rename_area(&self, name: &str, new_name: &str) -> Result<Area> {
        let area = self
            .find_area(name)?
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        if let Some(id) = &area.id {
            if is_canonical_id(id, CANONICAL_AREA_MAX) {
                return Err(Error::Unauthorized(area.name));
            }
        }
        let tx = self.conn.unchecked_transaction()?;
        let now = Self::now();
        self.conn.execute(
            "UPDATE areas SET name = ?1, updated_at = ?2 WHERE name = ?3",
            params![new_name, now, area.name],
        )?;
        self.conn.execute(
            "UPDATE meals SET area_name = ?1 WHERE area_name = ?2",
            params![new_name, area.name],
        )?;
        self.conn.execute(
            "UPDATE archive_entries SET item_id = ?1 WHERE kind = 'area' AND item_id = ?2",
            params![new_name, area.name],
        )?;
        tx.commit()?;
        self.find_area(new_name)?
            .ok_or_else(|| Error::NotFound(new_name.to_string()))
    }

    pub fn delete_area(&self, name: &str) -> Result<()> {
        let area = self
            .find_area(name)?
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        if let Some(id) = &area.id {
            if is_canonical_id(id, CANONICAL_AREA_MAX) {
                return Err(Error::Unauthorized(area.name));
            }
        }
        let tx = self.conn.unchecked_transaction()?;
        self.conn.execute(
            "DELETE FROM archive_entries WHERE kind = 'area' AND item_id = ?1",
            params![area.name],
        )?;
        self.conn.execute(
            "UPDATE meals SET area_name = NULL WHERE area_name = ?1",
            params![area.name],
        )?;
        self.conn
            .execute("DELETE FROM areas WHERE name = ?1", params![area.name])?;
        tx.commit()?;
        Ok(())
    }

    pub fn list_areas(&self) -> Result<Vec<Area>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, id, created_at, updated_at FROM areas ORDER BY name")?;
        let areas = stmt
            .query_map([], Self::area_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(areas)
    }

    pub fn list_areas_not_in_archive(&self) -> Result<Vec<Area>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, id, created_at, updated_at FROM areas
             WHERE name NOT IN (SELECT item_id FROM archive_entries WHERE kind = 'area')
             ORDER BY name",
        )?;
        let areas = stmt
            .query_map([], Self::area_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(areas)
    }

    pub fn list_archived_areas(&self) -> Result<Vec<Area>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, id, created_at, updated_at FROM areas
             WHERE name IN (SELECT item_id FROM archive_entries WHERE kind = 'area')
             ORDER BY name",
        )?;
        let areas = stmt
            .query_map([], Self::area_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(areas)
    }

    // --- Categories ---

    pub fn get_category(&self, id: &str) -> Result<Option<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, image, information, created_at, updated_at FROM categories WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(Self::category_from_row(row)?)),
            None => Ok(None),
        }
    }

    pub fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, image, information, created_at, updated_at FROM categories
             WHERE LOWER(name) = LOWER(?1)",
        )?;
        let mut rows = stmt.query(params![name])?;
        match rows.next()? {
            Some(row) => Ok(Some(Self::category_from_row(row)?)),
            None => Ok(None),
        }
    }

    pub fn insert_category(
        &self,
        id: &str,
        name: &str,
        image: Option<&str>,
        information: Option<&str>,
    ) -> Result<Category> {
        let now = Self::now();
        self.conn.execute(
            "INSERT INTO categories (id, name, image, information, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![id, name, image, information, now],
        )?;
        self.get_category(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    pub fn update_category(
        &self,
        id: &str,
        name: Option<&str>,
        image: Option<&str>,
        information: Option<&str>,
    ) -> Result<Category> {
        if is_canonical_id(id, CANONICAL_CATEGORY_MAX) {
            return Err(Error::Unauthorized(id.to_string()));
        }
        self.get_category(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let now = Self::now();
        if let Some(name) = name {
            self.conn.execute(
                "UPDATE categories SET name = ?1, updated_at = ?2 WHERE id = ?3",
                params![name, now, id],
            )?;
        }
        if let Some(image) = image {
            self.conn.execute(
                "UPDATE categories SET image = ?1, updated_at = ?2 WHERE id = ?3",
                params![image, now, id],
            )?;
        }
        if let Some(information) = information {
            self.conn.execute(
                "UPDATE categories SET information = ?1, updated_at = ?2 WHERE id = ?3",
                params![information, now, id],
            )?;
        }
        self.get_category(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    pub fn delete_category(&self, id: &str) -> Result<()> {
        if is_canonical_id(id, CANONICAL_CATEGORY_MAX) {
            return Err(Error::Unauthorized(id.to_string()));
        }
        let tx = self.conn.unchecked_transaction()?;
        self.conn.execute(
            "DELETE FROM archive_entries WHERE kind = 'category' AND item_id = ?1",
            params![id],
        )?;
        self.conn.execute(
            "UPDATE meals SET category_id = NULL WHERE category_id = ?1",
            params![id],
        )?;
        let rows = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        tx.commit()?;
        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, image, information, created_at, updated_at FROM categories ORDER BY name",
        )?;
        let categories = stmt
            .query_map([], Self::category_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    pub fn list_categories_not_in_archive(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, image, information, created_at, updated_at FROM categories
             WHERE id NOT IN (SELECT item_id FROM archive_entries WHERE kind = 'category')
             ORDER BY name",
        )?;
        let categories = stmt
            .query_map([], Self::category_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    pub fn list_archived_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, image, information, created_at, updated_at FROM categories
             WHERE id IN (SELECT item_id FROM archive_entries WHERE kind = 'category')
             ORDER BY name",
        )?;
        let categories = stmt
            .query_map([], Self::category_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    // --- Ingredients ---

    pub fn get_ingredient(&self, id: &str) -> Result<Option<Ingredient>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, information, image, created_at, updated_at FROM ingredients WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(Self::ingredient_from_row(row)?)),
            None => Ok(None),
        }
    }

    pub fn find_ingredient_by_name(&self, name: &str) -> Result<Option<Ingredient>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, information, image, created_at, updated_at FROM ingredients
             WHERE LOWER(name) = LOWER(?1)",
        )?;
        let mut rows = stmt.query(params![name])?;
        match rows.next()? {
            Some(row) => Ok(Some(Self::ingredient_from_row(row)?)),
            None => Ok(None),
        }
    }

    pub fn insert_ingredient(
        &self,
        id: &str,
        name: &str,
        information: Option<&str>,
        image: Option<&str>,
    ) -> Result<Ingredient> {
        let now = Self::now();
        self.conn.execute(
            "INSERT INTO ingredients (id, name, information, image, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![id, name, information, image, now],
        )?;
        self.get_ingredient(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    pub fn update_ingredient(
        &self,
        id: &str,
        name: Option<&str>,
        information: Option<&str>,
        image: Option<&str>,
    ) -> Result<Ingredient> {
        if is_canonical_id(id, CANONICAL_INGREDIENT_MAX) {
            return Err(Error::Unauthorized(id.to_string()));
        }
        self.get_ingredient(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let now = Self::now();
        if let Some(name) = name {
            self.conn.execute(
                "UPDATE ingredients SET name = ?1, updated_at = ?2 WHERE id = ?3",
                params![name, now, id],
            )?;
        }
        if let Some(information) = information {
            self.conn.execute(
                "UPDATE ingredients SET information = ?1, updated_at = ?2 WHERE id = ?3",
                params![information, now, id],
            )?;
        }
        if let Some(image) = image {
            self.conn.execute(
                "UPDATE ingredients SET image = ?1, updated_at = ?2 WHERE id = ?3",
                params![image, now, id],
            )?;
        }
        self.get_ingredient(id)?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    pub fn delete_ingredient(&self, id: &str) -> Result<()> {
        if is_canonical_id(id, CANONICAL_INGREDIENT_MAX) {
            return Err(Error::Unauthorized(id.to_string()));
        }
        let tx = self.conn.unchecked_transaction()?;
        self.conn.execute(
            "DELETE FROM archive_entries WHERE kind = 'ingredient' AND item_id = ?1",
            params![id],
        )?;
        let rows = self
            .conn
            .execute("DELETE FROM ingredients WHERE id = ?1", params![id])?;
        tx.commit()?;
        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, information, image, created_at, updated_at FROM ingredients ORDER BY name",
        )?;
        let ingredients = stmt
            .query_map([], Self::ingredient_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ingredients)
    }

    pub fn list_ingredients_not_in_archive(&self) -> Result<Vec<Ingredient>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, information, image, created_at, updated_at FROM ingredients
             WHERE id NOT IN (SELECT item_id FROM archive_entries WHERE kind = 'ingredient')
             ORDER BY name",
        )?;
        let ingredients = stmt
            .query_map([], Self::ingredient_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ingredients)
    }

    pub fn list_archived_ingredients(&self) -> Result<Vec<Ingredient>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, information, image, created_at, updated_at FROM ingredients
             WHERE id IN (SELECT item_id FROM archive_entries WHERE kind = 'ingredient')
             ORDER BY name",
        )?;
        let ingredients = stmt
            .query_map([], Self::ingredient_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ingredients)
    }
}
