use std::sync::Arc;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;
use serde_json::json;

use eigalog_catalog::theater_search_url;
use eigalog_core::{MoviePage, PageLoad, PageLoader, ReviewWorkflow};
use eigalog_models::{MovieId, Review, Session};

use crate::commands::AppContext;
use crate::output::{Output, OutputFormat};

pub async fn run_show(
    ctx: &AppContext,
    movie_id: &str,
    user: Option<&str>,
    output: &Output,
) -> Result<()> {
    tracing::debug!("Show command started");

    let movie_id: MovieId = movie_id
        .parse()
        .map_err(|_| eyre!("Invalid movie id: {}", movie_id))?;
    let session = super::resolve_cli_session(user, ctx.profiles.as_ref()).await;

    match &ctx.catalog {
        Some(catalog) => {
            let loader = PageLoader::new(Arc::new(catalog.clone()), ctx.reviews.clone());
            match loader.load(movie_id).await? {
                PageLoad::Loaded(page) => render_page(&page, session.as_ref(), output),
                PageLoad::Superseded => {}
            }
        }
        None => {
            output.warn("Offline mode: catalog data unavailable");
            let reviews = ctx.reviews.list_for_movie(&movie_id).await?;
            render_reviews(&reviews, session.as_ref(), output);
        }
    }
    Ok(())
}

fn render_page(page: &MoviePage, session: Option<&Session>, output: &Output) {
    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "movie": page.movie,
            "now_playing": page.now_playing,
            "theater_search": page
                .now_playing
                .then(|| theater_search_url(&page.movie.title)),
            "providers": page
                .providers
                .iter()
                .map(|p| json!({
                    "name": p.provider.provider_name,
                    "link": p.link,
                    "logo": p.provider.logo_url(45),
                }))
                .collect::<Vec<_>>(),
            "reviews": page.reviews,
        }));
        return;
    }

    output.println(format!("{}", page.movie.title.bold()));
    if !page.movie.overview.is_empty() {
        output.println(&page.movie.overview);
    }
    output.println("");

    if page.now_playing {
        output.println(format!(
            "🎬 In theaters now: {}",
            theater_search_url(&page.movie.title).blue()
        ));
        output.println("");
    }

    if !page.providers.is_empty() {
        output.println(format!("{}", "Streaming on".bold()));
        for provider in &page.providers {
            output.println(format!(
                "  {} - {}",
                provider.provider.provider_name,
                provider.link.blue()
            ));
        }
        output.println("");
    }

    render_reviews(&page.reviews, session, output);
}

pub fn render_reviews(reviews: &[Review], session: Option<&Session>, output: &Output) {
    if output.format() != OutputFormat::Human {
        output.json(&json!({ "reviews": reviews }));
        return;
    }

    output.println(format!("{}", "Reviews".bold()));
    if reviews.is_empty() {
        output.println("  No reviews yet.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Stars", "Review", "Author", "Posted", "Id"]);

    for review in reviews {
        let deletable = ReviewWorkflow::can_delete(session, review);
        let id = if deletable {
            format!("{} (deletable)", review.id)
        } else {
            review.id.to_string()
        };
        table.add_row(vec![
            "★".repeat(review.rating as usize),
            review.text.clone(),
            review.author_id.to_string(),
            review.created_at.format("%Y-%m-%d %H:%M").to_string(),
            id,
        ]);
    }

    output.println(table.to_string());
}
