pub mod error;
pub mod links;
pub mod providers;
pub mod tmdb;
pub mod traits;

pub use error::CatalogError;
pub use links::theater_search_url;
pub use providers::{storefront_link, LinkedProvider};
pub use tmdb::TmdbClient;
pub use traits::Catalog;
