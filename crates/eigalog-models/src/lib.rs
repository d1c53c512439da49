pub mod movie;
pub mod provider;
pub mod review;
pub mod session;

pub use movie::{Movie, MovieId};
pub use provider::WatchProvider;
pub use review::{NewReview, Review, ReviewId, RATING_MAX, RATING_MIN};
pub use session::{Session, UserId, UserProfile};
