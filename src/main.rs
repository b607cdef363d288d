use anyhow::Result;

use biggest_loser_ranking::cli::Command;
use biggest_loser_ranking::{
    handle_add, handle_board, handle_clear, handle_completions, handle_edit, handle_export,
    handle_import, handle_info, handle_photo, handle_remove, handle_reveal, handle_upload,
    handle_weighin, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Add { name, baseline, cheerer, profile_pic } => {
            handle_add(name, *baseline, cheerer, profile_pic)
        }
        Command::Edit { name, new_name, cheerer } => {
            handle_edit(name, new_name.as_deref(), cheerer.as_deref())
        }
        Command::Remove { name } => handle_remove(name),
        Command::Weighin { action } => handle_weighin(action),
        Command::Photo { name, slot, reference } => handle_photo(name, *slot, reference),
        Command::Upload { name, file } => handle_upload(name, file),
        Command::Board { final_mode, show_weights } => handle_board(*final_mode, *show_weights),
        Command::Reveal { final_mode, pause } => handle_reveal(*final_mode, *pause),
        Command::Export { output } => handle_export(output.as_deref()),
        Command::Import { input } => handle_import(input),
        Command::Info => handle_info(),
        Command::Clear { force } => handle_clear(*force),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
