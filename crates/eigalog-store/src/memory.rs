//! In-memory implementation of both store traits.
//!
//! Backs the workflow tests and the CLI's offline mode. All data is held
//! in maps behind `RwLock`s and lost on drop.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};

use eigalog_models::{MovieId, NewReview, Review, ReviewId, Session, UserId, UserProfile};

use crate::error::StoreError;
use crate::traits::{can_delete, validate_new_review, ProfileStore, ReviewStore};

pub struct MemoryStore {
    reviews: RwLock<HashMap<ReviewId, Review>>,
    profiles: RwLock<HashMap<UserId, UserProfile>>,
    next_id: AtomicU64,
    // Creation timestamps are forced strictly increasing so list order is
    // deterministic even when two writes land in the same clock tick.
    last_created_at: Mutex<DateTime<Utc>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            reviews: RwLock::new(HashMap::new()),
            profiles: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            last_created_at: Mutex::new(DateTime::<Utc>::MIN_UTC),
        }
    }

    /// Seed a profile document (offline mode and tests).
    pub async fn put_profile(&self, user_id: UserId, profile: UserProfile) {
        let mut profiles = self.profiles.write().await;
        profiles.insert(user_id, profile);
    }

    async fn next_created_at(&self) -> DateTime<Utc> {
        let mut last = self.last_created_at.lock().await;
        let mut now = Utc::now();
        if now <= *last {
            now = *last + Duration::microseconds(1);
        }
        *last = now;
        now
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn create(&self, review: NewReview) -> Result<ReviewId, StoreError> {
        validate_new_review(&review)?;

        let id = ReviewId(format!(
            "review-{}",
            self.next_id.fetch_add(1, Ordering::SeqCst)
        ));
        let created_at = self.next_created_at().await;

        let stored = Review {
            id: id.clone(),
            movie_id: review.movie_id,
            author_id: review.author_id,
            text: review.text,
            rating: review.rating,
            created_at,
        };

        let mut reviews = self.reviews.write().await;
        reviews.insert(id.clone(), stored);
        Ok(id)
    }

    async fn list_for_movie(&self, movie_id: &MovieId) -> Result<Vec<Review>, StoreError> {
        let reviews = self.reviews.read().await;
        let mut matching: Vec<Review> = reviews
            .values()
            .filter(|r| r.movie_id == *movie_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn delete(&self, id: &ReviewId, session: &Session) -> Result<(), StoreError> {
        let mut reviews = self.reviews.write().await;
        let Some(existing) = reviews.get(id) else {
            // Deleting a non-existent id is a no-op success.
            return Ok(());
        };
        if !can_delete(session, existing) {
            return Err(StoreError::PermissionDenied(format!(
                "user {} may not delete review {}",
                session.user_id, id
            )));
        }
        reviews.remove(id);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(user_id).cloned())
    }
}
