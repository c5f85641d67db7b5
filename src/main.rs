//! ddash CLI entry point.
//!
//! Parses command-line arguments and dispatches to the appropriate command
//! handler.

use clap::{Parser, Subcommand};
use ddash::commands::{
    check_command, delete_command, resolve_store, serve_command, show_command, DeleteTarget,
};
use ddash::output::print_error;
use ddash::Config;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "ddash")]
#[command(
    version,
    about = "Neon D-Day dashboard: countdowns and checklists over a JSON-file store",
    after_help = "EXAMPLES:
    # Render a dashboard snapshot for the active project
    ddash
    ddash show

    # Serve the HTTP API (GET/POST /data, GET /quote)
    ddash serve
    ddash serve --port 8080

    # Toggle a sub-task by ID and autosave
    ddash check w1-1"
)]
struct Cli {
    /// Directory holding data.json (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP JSON API
    Serve {
        /// Port to bind (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Render a dashboard snapshot in the terminal
    Show,

    /// Toggle a sub-task by ID and autosave
    Check {
        /// ID of the sub-task to toggle
        sub_id: String,
    },

    /// Delete a project, category, goal item, sub-task, or D-Day by ID
    #[command(after_help = "EXAMPLES:
    ddash delete sub w1-2          # Delete one sub-task (asks first)
    ddash delete project p2 --yes  # Delete a whole project, no prompt

Deleting the last remaining project is always rejected.")]
    Delete {
        /// What to delete
        #[arg(value_enum)]
        target: DeleteKind,

        /// ID of the entity to delete
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum DeleteKind {
    Project,
    Category,
    Item,
    Sub,
    Dday,
}

impl From<DeleteKind> for DeleteTarget {
    fn from(kind: DeleteKind) -> Self {
        match kind {
            DeleteKind::Project => DeleteTarget::Project,
            DeleteKind::Category => DeleteTarget::Category,
            DeleteKind::Item => DeleteTarget::Item,
            DeleteKind::Sub => DeleteTarget::Sub,
            DeleteKind::Dday => DeleteTarget::DDay,
        }
    }
}

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    };
    let store = resolve_store(&config, cli.data_dir);

    let result = match cli.command {
        Some(Commands::Serve { port }) => {
            serve_command(store, port.unwrap_or(config.port)).await
        }
        Some(Commands::Check { sub_id }) => check_command(store, &sub_id),
        Some(Commands::Delete { target, id, yes }) => {
            delete_command(store, target.into(), &id, yes)
        }
        Some(Commands::Show) | None => show_command(&store),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
