use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks, optionally filtered by status
    Tasks {
        /// Status filter: all, todo, in-progress, review, done
        #[arg(short, long, default_value = "all")]
        status: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List projects with progress and deadlines
    Projects {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List team members with presence
    Team {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show board summary counters
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fuzzy search across tasks, projects and team members
    Search {
        #[arg(value_name = "QUERY")]
        query: String,
    },
    /// Launch TUI dashboard
    Tui,
    /// Generate shell completions
    Completions {
        #[arg(value_name = "SHELL")]
        shell: String,
    },
}
