//! SeaORM entities for the catalog tables.

pub mod search_history;
pub mod tool;
