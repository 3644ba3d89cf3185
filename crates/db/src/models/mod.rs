//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for the full-record update endpoints

pub mod category;
pub mod setting;
pub mod skill;
pub mod subcategory;
pub mod user;
