//! Main entry point for the `mealmitra` command line client.
//!
//! Loads configuration from the environment, installs the tracing subscriber,
//! and runs one command against the configured REST service: open a page the
//! way a browser visit would (following guard redirects), list claimable
//! donations, end the session, or list the route table.

use std::time::Duration;

use clap::{Parser, Subcommand};
use mealmitra_client::{
    routes::ROUTES, services::navigation::SideNav, utils::format_date_time, App, ClientConfig,
    ClientError, Visit,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// How long the printed top bar waits for the identity label.
const IDENTITY_WAIT: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "mealmitra", version, about = "Meal-Mitra client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open a page, following redirects until it renders
    Navigate {
        path: String,
        /// Viewport width in pixels, decides whether the sidebar is pinned
        #[arg(long, default_value_t = 1280)]
        viewport: u32,
    },
    /// List donations that are still up for claiming
    Donations,
    /// End the current session
    Logout,
    /// List every known route and the shell that owns it
    Routes,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli.command).await {
        error!("{err}");
        eprintln!("{}", err.notice("Something went wrong"));
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), ClientError> {
    if let Command::Routes = command {
        for entry in &ROUTES {
            let shell = entry
                .shell
                .map_or_else(|| "standalone".to_string(), |kind| kind.to_string());
            println!("{:<32} {:<14} {:?}", entry.pattern, shell, entry.page);
        }
        return Ok(());
    }

    let app = App::new(ClientConfig::load()?)?;

    match command {
        Command::Navigate { path, viewport } => {
            let visit = app.open(&path).await?;
            print_visit(&app, &visit, viewport).await;
        }
        Command::Donations => {
            for donation in app.donations().available().await? {
                println!(
                    "#{:<5} {:<24} {:<14} {:<12} {}",
                    donation.id,
                    donation.food,
                    donation.quantity,
                    donation.status.as_deref().unwrap_or("-"),
                    format_date_time(donation.created_at.as_deref())
                );
            }
        }
        Command::Logout => println!("{}", app.logout().await),
        Command::Routes => {}
    }

    println!("history: {}", app.history().entries().join(" -> "));
    Ok(())
}

async fn print_visit(app: &App, visit: &Visit, viewport: u32) {
    let route = visit.route();
    println!("{} => {:?}", route.path, route.entry.page);

    let Some(frame) = visit.frame() else {
        println!("(standalone page)");
        return;
    };

    let identity = &frame.top_bar.identity;
    let label = tokio::time::timeout(IDENTITY_WAIT, identity.resolved())
        .await
        .unwrap_or_else(|_| identity.current());
    println!(
        "{} [{}] | {}",
        frame.top_bar.brand,
        frame.top_bar.brand_link,
        label.text()
    );

    let viewport = app.viewport(viewport);
    match &frame.side_nav {
        Some(nav) if frame.sidebar.is_visible(viewport) => print_side_nav(nav, &route.path),
        Some(_) => println!("(sidebar collapsed)"),
        None => {}
    }
}

fn print_side_nav(nav: &SideNav, current: &str) {
    let active = nav.active(current).map(|entry| entry.destination);
    for entry in nav.entries.iter().chain(nav.footer.iter()) {
        let marker = if Some(entry.destination) == active { '>' } else { ' ' };
        println!(" {marker} {:<16} {}", entry.label, entry.destination);
    }
}
