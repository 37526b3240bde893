pub mod category_repository;
pub mod content_repository;
pub mod user_interest_repository;

pub use category_repository::PgCategoryRepository;
pub use content_repository::PgContentRepository;
pub use user_interest_repository::PgUserInterestRepository;
