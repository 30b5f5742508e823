use anyhow::Context;
use clap::{Parser, Subcommand};
use libris_app::catalogue::{search, LatencyProfile, Library};
use libris_kernel::settings::Settings;

/// Command-line entrypoint for the libris catalogue
#[derive(Debug, Parser)]
#[command(name = "libris", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Print the seeded catalogue
    Books {
        /// Only show books whose title, author or genre contains this text
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Print the member directory
    Users,
    /// Print the staff reservation view
    Reservations,
    /// Print the resolved settings as JSON
    Settings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load libris settings")?;

    match cli.command {
        Command::Serve => {
            libris_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "libris serve starting");
            return libris_app::run(settings).await;
        }
        Command::Books { search: query } => {
            let books = offline_library().query.list_books().await;
            let books = match query {
                Some(query) => search::filter_books(books, &query),
                None => books,
            };
            for book in books {
                let state = if book.available { "available" } else { "reserved" };
                println!(
                    "{:>3}  {:<10} {} by {} [{}]",
                    book.id, state, book.title, book.author, book.genre
                );
            }
        }
        Command::Users => {
            for user in offline_library().query.list_users().await {
                println!(
                    "{:<6} {:<16} {:<28} {}",
                    user.user_id, user.name, user.email, user.member_id
                );
            }
        }
        Command::Reservations => {
            for view in offline_library().query.list_reservations().await {
                println!(
                    "{:<7} {:<24} {:<16} {} {}",
                    view.reservation_id, view.book_title, view.user_name, view.reserved_on, view.status
                );
            }
        }
        Command::Settings => {
            let rendered = serde_json::to_string_pretty(&settings)
                .with_context(|| "failed to render settings")?;
            println!("{rendered}");
        }
    }

    Ok(())
}

/// One-shot commands read a fresh catalogue, so there is nothing to wait for.
fn offline_library() -> Library {
    Library::seeded(LatencyProfile::None)
}
