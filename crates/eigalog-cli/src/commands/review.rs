use color_eyre::eyre::eyre;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

use eigalog_core::{FormPhase, PromoPicker, PromoPrompt, ReviewWorkflow, Submission};
use eigalog_models::MovieId;

use crate::commands::show::render_reviews;
use crate::commands::AppContext;
use crate::output::{Output, OutputFormat};

pub async fn run_review(
    ctx: &AppContext,
    movie_id: &str,
    rating: u8,
    text: Option<String>,
    dismiss: bool,
    user: Option<&str>,
    output: &Output,
) -> Result<()> {
    tracing::debug!("Review command started");

    let movie_id: MovieId = movie_id
        .parse()
        .map_err(|_| eyre!("Invalid movie id: {}", movie_id))?;
    let session = super::resolve_cli_session(user, ctx.profiles.as_ref()).await;

    let text = match text {
        Some(text) => text,
        None => dialoguer::Input::<String>::new()
            .with_prompt("Review text")
            .allow_empty(true)
            .interact_text()?,
    };

    let promo = PromoPicker::new(ctx.config.promo.images.clone(), ctx.config.promo.link.clone());
    let mut workflow = ReviewWorkflow::new(movie_id, ctx.reviews.clone()).with_promo(promo);
    workflow.form.text = text;
    workflow.form.rating = rating;

    match workflow.submit(session.as_ref()).await? {
        Submission::Posted(id) => {
            output.success(format!("Posted review {} for movie {}", id, movie_id));
            if let FormPhase::PromptShown(prompt) = workflow.phase() {
                render_promo(prompt, output);
            }
            if dismiss {
                workflow.dismiss_prompt();
            }
            render_reviews(workflow.reviews(), session.as_ref(), output);
        }
        Submission::Skipped => {
            output.warn("Empty review text; nothing was posted");
        }
    }
    Ok(())
}

fn render_promo(prompt: &PromoPrompt, output: &Output) {
    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "type": "promo",
            "image": prompt.image,
            "link": prompt.link,
        }));
        return;
    }

    output.println("");
    output.println(format!("{}", "🎯 Sponsored".green().bold()));
    output.println(format!("  [{}] {}", prompt.image, prompt.link.blue()));
    output.println("");
}
