//! Terminal front end for the shopping-list API.
//!
//! Every invocation loads the list, applies one action, and prints the
//! resulting list. Failures are shown the way the list view shows them: as a
//! message, with exit status 1.

mod render;
mod transport;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shopping_core::{ListController, ShoppingClient};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

use render::render;
use transport::UreqTransport;

#[derive(Parser, Debug)]
#[command(name = "shopping", about = "Manage the shopping list")]
struct Cli {
    /// Base URL of the shopping-list API.
    #[arg(long, env = "SHOPPING_API_URL", default_value = "http://localhost:5000")]
    api_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the list (default).
    List,
    /// Add an item.
    Add { name: String },
    /// Mark an item as bought.
    Check { id: Uuid },
    /// Mark an item as not bought.
    Uncheck { id: Uuid },
    /// Flip an item's bought flag.
    Toggle { id: Uuid },
    /// Remove an item.
    Delete { id: Uuid },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let client = ShoppingClient::new(&cli.api_url);
    let mut controller = ListController::new(client, UreqTransport::new());

    controller.mount();
    if controller.state().error.is_none() {
        match cli.command.unwrap_or(Command::List) {
            Command::List => {}
            Command::Add { name } => {
                controller.add(&name);
            }
            Command::Check { id } => controller.set_bought(id, true),
            Command::Uncheck { id } => controller.set_bought(id, false),
            Command::Toggle { id } => controller.toggle(id),
            Command::Delete { id } => controller.delete(id),
        }
    }

    print!("{}", render(controller.state()));

    match &controller.state().error {
        Some(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}
