//! Command-line viewer for branching conversation histories.

mod config;
mod error;
mod store;
mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dendrite_core::{
    FlowchartBuilder, MemoryStore, MessageId, MessageStore, banner, render_detail, render_outline,
    render_path, resolve_path,
};

use crate::config::{load_config, resolve_data_path};
use crate::error::DndError;
use crate::store::{open_store, sample_messages};

#[derive(Parser)]
#[command(name = "dnd")]
#[command(about = "Render conversation trees as text", long_about = None)]
struct Cli {
    /// JSON file with an array of messages (default: built-in sample)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Disable colors
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Draw every conversation as a flowchart of message boxes
    Graph {
        /// Show at most two lines per message
        #[arg(long)]
        compact: bool,

        /// Highlight this message
        #[arg(long)]
        select: Option<MessageId>,
    },

    /// Show the conversation leading to a message
    Path {
        /// Message ID
        id: MessageId,
    },

    /// List messages as an indented tree
    Outline {
        /// Highlight this message
        #[arg(long)]
        select: Option<MessageId>,
    },

    /// Show one message in full
    Show {
        /// Message ID
        id: MessageId,
    },

    /// Print the sample conversation as JSON
    Sample,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config()?;

    let data = resolve_data_path(cli.data, &config);
    let open = || open_store(data.as_deref());
    let color = config.render.color && !cli.plain;

    let block = match cli.command {
        Command::Graph { compact, select } => {
            let layout = config.render.layout(compact || config.render.compact)?;
            let mut screen = banner();
            screen.extend(
                FlowchartBuilder::new()
                    .layout(layout)
                    .selected(select)
                    .build(&open()?)?,
            );
            screen
        }
        Command::Path { id } => {
            let store = open()?;
            let message = find(&store, id)?;
            render_path(&resolve_path(&message, &store)?)
        }
        Command::Outline { select } => render_outline(&open()?, select)?,
        Command::Show { id } => render_detail(&find(&open()?, id)?),
        Command::Sample => {
            println!("{}", serde_json::to_string_pretty(&sample_messages())?);
            return Ok(());
        }
    };

    ui::print_block(&block, color)?;
    Ok(())
}

fn find(store: &MemoryStore, id: MessageId) -> Result<dendrite_core::Message, DndError> {
    store
        .get_by_id(id)
        .map_err(dendrite_core::Error::store)?
        .ok_or(DndError::MessageNotFound(id))
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
