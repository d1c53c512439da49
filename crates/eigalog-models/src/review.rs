use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::movie::MovieId;
use crate::session::UserId;

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// Store-assigned review document identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ReviewId(pub String);

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A posted review. Immutable once created except for deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub movie_id: MovieId,
    pub author_id: UserId,
    pub text: String,
    pub rating: u8, // 1-5 stars
    pub created_at: DateTime<Utc>,
}

/// Write payload for a new review; the store assigns id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewReview {
    pub movie_id: MovieId,
    pub author_id: UserId,
    pub text: String,
    pub rating: u8,
}
