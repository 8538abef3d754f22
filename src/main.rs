mod board;
mod cli;
mod models;
mod search;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};

use board::Board;
use models::StatusFilter;
use ui::run_tui;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let board = Board::demo()?;
    log::debug!(
        "board loaded: {} tasks, {} projects, {} members",
        board.tasks.len(),
        board.projects.len(),
        board.team.len()
    );

    match cli.command {
        Some(Commands::Tasks { status, json }) => {
            let filter: StatusFilter = status.parse()?;
            board.print_tasks(filter, json)?;
        }
        Some(Commands::Projects { json }) => {
            board.print_projects(json)?;
        }
        Some(Commands::Team { json }) => {
            board.print_team(json)?;
        }
        Some(Commands::Stats { json }) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&board.stats())?);
            } else {
                board.print_stats();
            }
        }
        Some(Commands::Search { query }) => {
            let hits = search::search(&board, &query);
            search::print_hits(&hits);
        }
        Some(Commands::Tui) => {
            run_tui(board)?;
        }
        Some(Commands::Completions { shell }) => {
            use clap_complete::{generate, Shell};
            let shell = shell.to_lowercase();
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "elvish" => Shell::Elvish,
                "powershell" => Shell::PowerShell,
                _ => {
                    println!("Unsupported shell: {}", shell);
                    return Ok(());
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "otdel", &mut std::io::stdout());
        }
        None => {
            // Default behavior: launch TUI
            run_tui(board)?;
        }
    }

    Ok(())
}
