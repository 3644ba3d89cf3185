//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod setting_repo;
pub mod skill_repo;
pub mod subcategory_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use setting_repo::SettingRepo;
pub use skill_repo::SkillRepo;
pub use subcategory_repo::SubcategoryRepo;
pub use user_repo::UserRepo;
