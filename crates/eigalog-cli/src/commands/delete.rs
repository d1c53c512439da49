use color_eyre::eyre::eyre;
use color_eyre::Result;

use eigalog_core::ReviewWorkflow;
use eigalog_models::{MovieId, ReviewId};

use crate::commands::show::render_reviews;
use crate::commands::AppContext;
use crate::output::Output;

pub async fn run_delete(
    ctx: &AppContext,
    review_id: &str,
    movie_id: &str,
    user: Option<&str>,
    output: &Output,
) -> Result<()> {
    tracing::debug!("Delete command started");

    let movie_id: MovieId = movie_id
        .parse()
        .map_err(|_| eyre!("Invalid movie id: {}", movie_id))?;
    let review_id = ReviewId(review_id.to_string());
    let session = super::resolve_cli_session(user, ctx.profiles.as_ref()).await;

    let mut workflow = ReviewWorkflow::new(movie_id, ctx.reviews.clone());
    workflow.delete(&review_id, session.as_ref()).await?;

    output.success(format!("Deleted review {}", review_id));
    render_reviews(workflow.reviews(), session.as_ref(), output);
    Ok(())
}
