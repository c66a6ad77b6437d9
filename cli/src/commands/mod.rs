mod area;
mod category;
mod favorite;
mod filter;
mod flag;
mod helpers;
mod ingredient;
mod search;

use crate::mealdb::MealDbClient;
use ratatouille_core::service::RatatouilleService;

pub(crate) type Service = RatatouilleService<MealDbClient>;

pub(crate) use area::{
    cmd_area_add, cmd_area_archive, cmd_area_delete, cmd_area_import, cmd_area_list,
    cmd_area_rename, cmd_area_restore,
};
pub(crate) use category::{
    cmd_category_add, cmd_category_archive, cmd_category_delete, cmd_category_import,
    cmd_category_list, cmd_category_restore, cmd_category_update,
};
pub(crate) use favorite::{
    cmd_favorite_list, cmd_favorite_save, cmd_favorite_show, cmd_meal_archive, cmd_meal_archived,
    cmd_meal_delete, cmd_meal_restore,
};
pub(crate) use filter::{cmd_filter_area, cmd_filter_category, cmd_filter_ingredient};
pub(crate) use flag::cmd_flag;
pub(crate) use ingredient::{
    cmd_ingredient_add, cmd_ingredient_archive, cmd_ingredient_delete, cmd_ingredient_import,
    cmd_ingredient_list, cmd_ingredient_restore, cmd_ingredient_update,
};
pub(crate) use search::{cmd_random, cmd_search};
