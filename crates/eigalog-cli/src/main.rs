use clap::{ArgAction, Parser, Subcommand};
use commands::{config, delete, review, show};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "eigalog")]
#[command(about = "eigalog - movie detail pages with reviews, in your terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Act as this signed-in user (bearer id from the auth provider)
    #[arg(long, global = true, value_name = "USER_ID")]
    user: Option<String>,

    /// Use an in-memory store and skip catalog access (demo/testing)
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a movie's detail page
    #[command(long_about = "Fetch the movie's metadata, theatrical status and streaming providers from the catalog, list its reviews newest-first, and render the whole detail view.")]
    Show {
        /// TMDB movie id (e.g. 550 for Fight Club)
        movie_id: String,
    },

    /// Post a review for a movie
    #[command(long_about = "Submit a star-rated review as the signed-in user (--user). Requires a signed-in user; empty review text is silently ignored. A successful submission shows the sponsored prompt and the refreshed review list.")]
    Review {
        /// TMDB movie id
        movie_id: String,

        /// Star rating, 1-5
        #[arg(long, default_value_t = 5)]
        rating: u8,

        /// Review text (prompted interactively when omitted)
        #[arg(long)]
        text: Option<String>,

        /// Dismiss the sponsored prompt immediately
        #[arg(long, action = ArgAction::SetTrue)]
        dismiss: bool,
    },

    /// Delete a review (author or admin only)
    #[command(long_about = "Delete one review by id as the signed-in user (--user). The store rejects the request unless the user wrote the review or has the admin flag on their profile.")]
    Delete {
        /// Review document id
        review_id: String,

        /// Movie the review belongs to (used to refresh the list)
        #[arg(long, value_name = "MOVIE_ID")]
        movie: String,
    },

    /// Configure credentials and settings
    #[command(long_about = "Manage configuration and credentials. Use subcommands to view settings or store the TMDB and document-store tokens. Secrets are masked when shown.")]
    Config {
        #[command(subcommand)]
        cmd: Option<config::ConfigCommands>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let user = cli.user.as_deref();

    match cli.command {
        Commands::Show { movie_id } => {
            let ctx = commands::build_context(cli.offline)?;
            show::run_show(&ctx, &movie_id, user, &output).await
        }
        Commands::Review {
            movie_id,
            rating,
            text,
            dismiss,
        } => {
            let ctx = commands::build_context(cli.offline)?;
            review::run_review(&ctx, &movie_id, rating, text, dismiss, user, &output).await
        }
        Commands::Delete { review_id, movie } => {
            let ctx = commands::build_context(cli.offline)?;
            delete::run_delete(&ctx, &review_id, &movie, user, &output).await
        }
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
    }
}
