//! Store abstractions for the two document collections the page touches.
//!
//! `ReviewStore` and `ProfileStore` hide the storage backend so the
//! workflow can run against the cloud document store in production and an
//! in-memory twin in tests and offline mode.

use async_trait::async_trait;
use eigalog_models::{
    MovieId, NewReview, Review, ReviewId, Session, UserId, UserProfile, RATING_MAX, RATING_MIN,
};

use crate::error::StoreError;

/// Review collection, scoped per movie.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Append a new review; the store assigns the id and the creation
    /// timestamp. No uniqueness constraint: a user may post any number of
    /// reviews for the same movie.
    async fn create(&self, review: NewReview) -> Result<ReviewId, StoreError>;

    /// Full re-read of a movie's reviews, newest first. Not an incremental
    /// feed: every call re-fetches the complete current set.
    async fn list_for_movie(&self, movie_id: &MovieId) -> Result<Vec<Review>, StoreError>;

    /// Delete one review by identifier. Unknown ids succeed as a no-op.
    ///
    /// The session must belong to the review's author or carry the admin
    /// flag; anything else is rejected here, at the store seam, not just
    /// by hiding the control in the view.
    async fn delete(&self, id: &ReviewId, session: &Session) -> Result<(), StoreError>;
}

/// Read path for per-user profile documents.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Profile document for a user, `None` when absent.
    async fn profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError>;
}

/// Write-side guard shared by every `ReviewStore` backend.
pub fn validate_new_review(review: &NewReview) -> Result<(), StoreError> {
    if review.text.trim().is_empty() {
        return Err(StoreError::InvalidReview(
            "text must not be empty".to_string(),
        ));
    }
    if !(RATING_MIN..=RATING_MAX).contains(&review.rating) {
        return Err(StoreError::InvalidReview(format!(
            "rating {} is outside {}-{}",
            review.rating, RATING_MIN, RATING_MAX
        )));
    }
    Ok(())
}

/// Owner-or-admin check used both by the store backends and by the view
/// affordance.
pub fn can_delete(session: &Session, review: &Review) -> bool {
    session.admin || session.user_id == review.author_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use eigalog_models::{MovieId, Session, UserId};
    use chrono::Utc;

    fn new_review(text: &str, rating: u8) -> NewReview {
        NewReview {
            movie_id: MovieId(550),
            author_id: UserId("uid-1".to_string()),
            text: text.to_string(),
            rating,
        }
    }

    fn review(author: &str) -> Review {
        Review {
            id: ReviewId("r1".to_string()),
            movie_id: MovieId(550),
            author_id: UserId(author.to_string()),
            text: "good".to_string(),
            rating: 4,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_rejects_blank_text() {
        assert!(validate_new_review(&new_review("  \n\t ", 3)).is_err());
        assert!(validate_new_review(&new_review("fine", 3)).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_rating() {
        assert!(validate_new_review(&new_review("fine", 0)).is_err());
        assert!(validate_new_review(&new_review("fine", 6)).is_err());
        assert!(validate_new_review(&new_review("fine", 1)).is_ok());
        assert!(validate_new_review(&new_review("fine", 5)).is_ok());
    }

    #[test]
    fn test_can_delete_author_or_admin_only() {
        let target = review("alice");

        let author = Session::new(UserId("alice".to_string()));
        let admin = Session::new(UserId("mod".to_string())).with_admin(true);
        let other = Session::new(UserId("bob".to_string()));

        assert!(can_delete(&author, &target));
        assert!(can_delete(&admin, &target));
        assert!(!can_delete(&other, &target));
    }
}
