//! The review form workflow: validate, write, promote, re-fetch.
//!
//! After any create or delete the held list is refreshed with a full
//! re-read, so the displayed collection converges on the store with no
//! optimistic local patching.

use std::sync::Arc;

use eigalog_models::{
    MovieId, NewReview, Review, ReviewId, Session, RATING_MAX, RATING_MIN,
};
use eigalog_store::{can_delete, ReviewStore};
use tracing::info;

use crate::error::WorkflowError;
use crate::promo::{PromoPicker, PromoPrompt};

/// Upper bound on stored review text, in characters.
pub const MAX_REVIEW_LEN: usize = 4000;

pub const DEFAULT_RATING: u8 = 5;

/// Review form contents. Rating starts at five stars like the page's
/// star picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewForm {
    pub text: String,
    pub rating: u8,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            rating: DEFAULT_RATING,
        }
    }
}

/// Form phase: the promotional prompt stays up from a successful submit
/// until it is dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
    PromptShown(PromoPrompt),
}

/// What a submit attempt did.
#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    Posted(ReviewId),
    /// Empty text is ignored without an error; the form simply stays put.
    Skipped,
}

pub struct ReviewWorkflow {
    movie_id: MovieId,
    store: Arc<dyn ReviewStore>,
    promo: PromoPicker,
    pub form: ReviewForm,
    phase: FormPhase,
    reviews: Vec<Review>,
}

impl ReviewWorkflow {
    pub fn new(movie_id: MovieId, store: Arc<dyn ReviewStore>) -> Self {
        Self {
            movie_id,
            store,
            promo: PromoPicker::default(),
            form: ReviewForm::default(),
            phase: FormPhase::Idle,
            reviews: Vec::new(),
        }
    }

    pub fn with_promo(mut self, promo: PromoPicker) -> Self {
        self.promo = promo;
        self
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// Reviews as of the last refresh, newest first.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Whether the delete control renders for a review.
    pub fn can_delete(session: Option<&Session>, review: &Review) -> bool {
        session.is_some_and(|s| can_delete(s, review))
    }

    /// Full re-read of the displayed review list.
    pub async fn refresh(&mut self) -> Result<(), WorkflowError> {
        self.reviews = self.store.list_for_movie(&self.movie_id).await?;
        Ok(())
    }

    /// Submit the current form contents as the signed-in user.
    pub async fn submit(
        &mut self,
        session: Option<&Session>,
    ) -> Result<Submission, WorkflowError> {
        let session = session.ok_or(WorkflowError::AuthRequired)?;

        let text = self.form.text.trim();
        if text.is_empty() {
            return Ok(Submission::Skipped);
        }
        if text.chars().count() > MAX_REVIEW_LEN {
            return Err(WorkflowError::TextTooLong {
                max: MAX_REVIEW_LEN,
            });
        }
        if !(RATING_MIN..=RATING_MAX).contains(&self.form.rating) {
            return Err(WorkflowError::RatingOutOfRange(self.form.rating));
        }

        self.phase = FormPhase::Submitting;
        let draft = NewReview {
            movie_id: self.movie_id,
            author_id: session.user_id.clone(),
            text: text.to_string(),
            rating: self.form.rating,
        };

        let id = match self.store.create(draft).await {
            Ok(id) => id,
            Err(e) => {
                self.phase = FormPhase::Idle;
                return Err(e.into());
            }
        };
        info!(
            "Posted review {} for movie {} by {}",
            id, self.movie_id, session.user_id
        );

        self.form = ReviewForm::default();
        self.phase = FormPhase::PromptShown(self.promo.pick());
        self.refresh().await?;
        Ok(Submission::Posted(id))
    }

    /// Close the promotional prompt. The review is already persisted; this
    /// has no other side effects.
    pub fn dismiss_prompt(&mut self) {
        if matches!(self.phase, FormPhase::PromptShown(_)) {
            self.phase = FormPhase::Idle;
        }
    }

    /// Delete a review as the signed-in user. The store enforces
    /// owner-or-admin; the affordance check alone is never the gate.
    pub async fn delete(
        &mut self,
        id: &ReviewId,
        session: Option<&Session>,
    ) -> Result<(), WorkflowError> {
        let session = session.ok_or(WorkflowError::AuthRequired)?;
        self.store.delete(id, session).await?;
        info!("Deleted review {} from movie {}", id, self.movie_id);
        self.refresh().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promo::DEFAULT_PROMO_IMAGES;
    use eigalog_models::UserId;
    use eigalog_store::{MemoryStore, StoreError};

    fn session(uid: &str) -> Session {
        Session::new(UserId(uid.to_string()))
    }

    fn admin(uid: &str) -> Session {
        session(uid).with_admin(true)
    }

    fn workflow(movie: u64) -> (ReviewWorkflow, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (ReviewWorkflow::new(MovieId(movie), store.clone()), store)
    }

    #[tokio::test]
    async fn test_submit_posts_trimmed_review_and_resets_form() {
        let (mut wf, store) = workflow(550);
        wf.form.text = "  best movie ever \n".to_string();
        wf.form.rating = 4;

        let alice = session("alice");
        let result = wf.submit(Some(&alice)).await.unwrap();
        assert!(matches!(result, Submission::Posted(_)));

        // Form is back to its defaults and the prompt is up.
        assert_eq!(wf.form, ReviewForm::default());
        assert!(matches!(wf.phase(), FormPhase::PromptShown(_)));

        // The displayed list was re-fetched and matches the store.
        assert_eq!(wf.reviews().len(), 1);
        assert_eq!(wf.reviews()[0].text, "best movie ever");
        assert_eq!(wf.reviews()[0].rating, 4);
        assert_eq!(wf.reviews()[0].author_id, UserId("alice".to_string()));
        assert_eq!(
            store.list_for_movie(&MovieId(550)).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_submit_with_blank_text_is_silently_skipped() {
        let (mut wf, store) = workflow(550);
        wf.form.text = "   \n\t".to_string();

        let alice = session("alice");
        let result = wf.submit(Some(&alice)).await.unwrap();
        assert_eq!(result, Submission::Skipped);
        assert_eq!(*wf.phase(), FormPhase::Idle);
        assert!(store.list_for_movie(&MovieId(550)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_identity_requires_auth() {
        let (mut wf, store) = workflow(550);
        wf.form.text = "great".to_string();

        let err = wf.submit(None).await.unwrap_err();
        assert!(matches!(err, WorkflowError::AuthRequired));
        assert!(store.list_for_movie(&MovieId(550)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_oversized_text() {
        let (mut wf, _store) = workflow(550);
        wf.form.text = "x".repeat(MAX_REVIEW_LEN + 1);

        let alice = session("alice");
        let err = wf.submit(Some(&alice)).await.unwrap_err();
        assert!(matches!(err, WorkflowError::TextTooLong { .. }));
    }

    #[tokio::test]
    async fn test_submit_rejects_out_of_range_rating() {
        let (mut wf, _store) = workflow(550);
        wf.form.text = "fine".to_string();
        wf.form.rating = 0;

        let alice = session("alice");
        let err = wf.submit(Some(&alice)).await.unwrap_err();
        assert!(matches!(err, WorkflowError::RatingOutOfRange(0)));
    }

    #[tokio::test]
    async fn test_list_shows_newest_first() {
        let (mut wf, _store) = workflow(27205);
        let alice = session("alice");

        wf.form.text = "saw it opening night".to_string();
        wf.form.rating = 4;
        wf.submit(Some(&alice)).await.unwrap();

        wf.form.text = "rewatch did not hold up".to_string();
        wf.form.rating = 2;
        wf.submit(Some(&alice)).await.unwrap();

        let ratings: Vec<u8> = wf.reviews().iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![2, 4]);
    }

    #[tokio::test]
    async fn test_prompt_shows_image_from_pool_until_dismissed() {
        let (mut wf, _store) = workflow(550);
        wf.form.text = "great".to_string();

        let alice = session("alice");
        wf.submit(Some(&alice)).await.unwrap();

        let FormPhase::PromptShown(prompt) = wf.phase().clone() else {
            panic!("expected the promotional prompt");
        };
        assert!(DEFAULT_PROMO_IMAGES.contains(&prompt.image.as_str()));

        wf.dismiss_prompt();
        assert_eq!(*wf.phase(), FormPhase::Idle);

        // Dismissing again is a no-op.
        wf.dismiss_prompt();
        assert_eq!(*wf.phase(), FormPhase::Idle);
    }

    #[tokio::test]
    async fn test_delete_as_author_refreshes_list() {
        let (mut wf, _store) = workflow(550);
        let alice = session("alice");

        wf.form.text = "great".to_string();
        wf.submit(Some(&alice)).await.unwrap();
        let id = wf.reviews()[0].id.clone();

        wf.delete(&id, Some(&alice)).await.unwrap();
        assert!(wf.reviews().is_empty());
    }

    #[tokio::test]
    async fn test_delete_as_admin() {
        let (mut wf, _store) = workflow(550);
        let alice = session("alice");

        wf.form.text = "great".to_string();
        wf.submit(Some(&alice)).await.unwrap();
        let id = wf.reviews()[0].id.clone();

        let moderator = admin("mod");
        wf.delete(&id, Some(&moderator)).await.unwrap();
        assert!(wf.reviews().is_empty());
    }

    #[tokio::test]
    async fn test_delete_as_other_user_is_rejected_at_the_store() {
        let (mut wf, _store) = workflow(550);
        let alice = session("alice");

        wf.form.text = "great".to_string();
        wf.submit(Some(&alice)).await.unwrap();
        let id = wf.reviews()[0].id.clone();

        let bob = session("bob");
        let err = wf.delete(&id, Some(&bob)).await.unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Store(StoreError::PermissionDenied(_))
        ));

        wf.refresh().await.unwrap();
        assert_eq!(wf.reviews().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_without_identity_requires_auth() {
        let (mut wf, _store) = workflow(550);
        let err = wf
            .delete(&ReviewId("any".to_string()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::AuthRequired));
    }

    #[tokio::test]
    async fn test_can_delete_drives_the_affordance() {
        let (mut wf, _store) = workflow(550);
        let alice = session("alice");
        wf.form.text = "great".to_string();
        wf.submit(Some(&alice)).await.unwrap();
        let review = &wf.reviews()[0];

        assert!(ReviewWorkflow::can_delete(Some(&alice), review));
        assert!(ReviewWorkflow::can_delete(Some(&admin("mod")), review));
        assert!(!ReviewWorkflow::can_delete(Some(&session("bob")), review));
        assert!(!ReviewWorkflow::can_delete(None, review));
    }
}
