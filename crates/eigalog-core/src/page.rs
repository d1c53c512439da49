use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use eigalog_catalog::{Catalog, LinkedProvider};
use eigalog_models::{Movie, MovieId, Review};
use eigalog_store::ReviewStore;
use tracing::debug;

use crate::error::WorkflowError;

/// Everything the movie detail view shows.
#[derive(Debug, Clone)]
pub struct MoviePage {
    pub movie: Movie,
    pub now_playing: bool,
    pub providers: Vec<LinkedProvider>,
    pub reviews: Vec<Review>,
}

/// Outcome of a page load. A load superseded by a newer one carries no
/// data, so a stale in-flight fetch can never overwrite a newer view.
#[derive(Debug)]
pub enum PageLoad {
    Loaded(MoviePage),
    Superseded,
}

pub struct PageLoader {
    catalog: Arc<dyn Catalog>,
    reviews: Arc<dyn ReviewStore>,
    generation: AtomicU64,
}

impl PageLoader {
    pub fn new(catalog: Arc<dyn Catalog>, reviews: Arc<dyn ReviewStore>) -> Self {
        Self {
            catalog,
            reviews,
            generation: AtomicU64::new(0),
        }
    }

    /// Load the detail view for a movie.
    ///
    /// The three catalog reads and the review list are independent and
    /// issued concurrently. Metadata failure fails the load; the
    /// now-playing check fails open inside the catalog client.
    pub async fn load(&self, movie_id: MovieId) -> Result<PageLoad, WorkflowError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (movie, now_playing, providers, reviews) = futures::join!(
            self.catalog.movie(movie_id),
            self.catalog.is_now_playing(movie_id),
            self.catalog.watch_providers(movie_id),
            self.reviews.list_for_movie(&movie_id),
        );

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale page load for movie {}", movie_id);
            return Ok(PageLoad::Superseded);
        }

        Ok(PageLoad::Loaded(MoviePage {
            movie: movie?,
            now_playing,
            providers: providers?,
            reviews: reviews?,
        }))
    }
}
