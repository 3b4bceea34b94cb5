use clap::{Parser, Subcommand};
use match_feed_lib::error::AppError;
use match_feed_lib::models::{CarouselDisplay, ImageHandle, Verdict};
use match_feed_lib::services::identity::{self, Page};
use match_feed_lib::services::{pages, ClientConfig, MatchApiClient, ReviewFlow, ReviewStep};
use std::process;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(
    name = "match-feed",
    version,
    about = "Review potential matches from the command line"
)]
struct Cli {
    /// Base URL of the match service
    #[arg(long, env = "MATCH_FEED_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "MATCH_FEED_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Page location carrying the acting user, e.g. `feed.html?id=12345`
    #[arg(long, short = 'l', env = "MATCH_FEED_LOCATION", default_value = "")]
    location: String,

    /// Print displays as JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Review potential matches one at a time
    Review,
    /// Show the acting user's profile
    Profile,
    /// List the acting user's matches
    Matches,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let user_id = match identity::current_user_id(&cli.location) {
        Some(id) => id,
        None => {
            log::info!("No user id in location '{}', nothing to load", cli.location);
            return;
        }
    };

    let client = match MatchApiClient::new(ClientConfig {
        base_url: cli.base_url.clone(),
        timeout_secs: cli.timeout_secs,
    }) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    print_nav(&user_id);

    let result = match cli.command {
        Command::Review => run_review(client, &user_id, cli.json).await,
        Command::Profile => show_profile(&client, &user_id, cli.json).await,
        Command::Matches => show_matches(&client, &user_id, cli.json).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_nav(user_id: &str) {
    println!(
        "{} | {} | {}",
        identity::page_link(Page::Feed, Some(user_id)),
        identity::page_link(Page::Profile, Some(user_id)),
        identity::page_link(Page::Matches, Some(user_id)),
    );
}

async fn run_review(client: MatchApiClient, user_id: &str, json: bool) -> Result<(), AppError> {
    let mut flow = ReviewFlow::new(client);
    let mut step = flow.start(user_id).await;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print_step(&flow, &step, json)?;

        if step.session.is_exhausted() {
            return Ok(());
        }

        if step.session.controls_enabled() {
            println!("[f]riend  [p]ass  [r]eload  [q]uit");
        } else {
            println!("[r]etry  [q]uit");
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return Ok(()),
            Err(e) => return Err(AppError::internal(format!("Failed to read input: {}", e))),
        };

        let session = step.session;
        let enabled = session.controls_enabled();
        step = match line.trim() {
            "q" | "quit" => return Ok(()),
            "f" | "friend" if enabled => flow.submit(session, Verdict::Friended).await,
            "p" | "pass" if enabled => flow.submit(session, Verdict::Passed).await,
            "r" | "retry" | "reload" if session.current_candidate().is_some() => {
                flow.reload_current(session).await
            }
            "r" | "retry" => flow.advance(session).await,
            other => {
                println!("Unrecognized choice '{}'", other);
                ReviewStep {
                    session,
                    outcome: Ok(()),
                }
            }
        };
    }
}

fn print_step(flow: &ReviewFlow<MatchApiClient>, step: &ReviewStep, json: bool) -> Result<(), AppError> {
    if json {
        let value = serde_json::json!({
            "session": &step.session,
            "display": flow.display(),
            "error": step.outcome.as_ref().err(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if let Err(e) = &step.outcome {
        eprintln!("! {}", e);
    }
    print_display(flow.display());
    Ok(())
}

fn print_display(display: &CarouselDisplay) {
    if display.is_empty() {
        println!("(nothing to show)");
        return;
    }

    for (slide, indicator) in display.slides().iter().zip(display.indicators()) {
        let marker = if slide.active { '*' } else { ' ' };
        println!(
            "{} {}/{} {}",
            marker,
            indicator.slide_to + 1,
            display.len(),
            describe_image(&slide.image)
        );
    }

    if let Some(slide) = display.active_index().map(|i| &display.slides()[i]) {
        let caption = &slide.caption;
        if !caption.name.is_empty() {
            println!("  {}", caption.name);
        }
        if !caption.bio.is_empty() {
            println!("  {}", caption.bio);
        }
        if let Some(text) = caption.mutual_connections_text() {
            println!("  {}", text);
        }
    }
}

fn describe_image(image: &ImageHandle) -> String {
    match image {
        ImageHandle::Blob {
            content_type,
            data_uri,
        } => format!("{} ({} bytes encoded)", content_type, data_uri.len()),
        other => other.src().to_string(),
    }
}

async fn show_profile(client: &MatchApiClient, user_id: &str, json: bool) -> Result<(), AppError> {
    let view = match pages::load_profile_view(client, user_id).await? {
        Some(view) => view,
        None => {
            println!("No profile stored for {} yet", user_id);
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{}", view.name);
    if !view.bio.is_empty() {
        println!("{}", view.bio);
    }
    for photo in &view.photos {
        let shown = photo
            .image
            .as_ref()
            .map(describe_image)
            .unwrap_or_else(|| "(empty)".to_string());
        println!("  {}: {}", photo.element_id, shown);
    }
    Ok(())
}

async fn show_matches(client: &MatchApiClient, user_id: &str, json: bool) -> Result<(), AppError> {
    let cards = pages::load_match_cards(client, user_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    if cards.is_empty() {
        println!("No matches yet");
        return Ok(());
    }

    for card in &cards {
        println!("{} [{}]", card.name, describe_image(&card.image));
        if let Some(bio) = &card.bio {
            println!("  {}", bio);
        }
        if let Some(link) = &card.profile_link {
            println!("  See Profile: {}", link);
        }
    }
    Ok(())
}
