pub mod db;
pub mod error;
pub mod flags;
pub mod mealdb;
pub mod models;
pub mod service;

pub use error::{Error, Result};
