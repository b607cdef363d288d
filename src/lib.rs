pub mod cli;
pub mod config;
pub mod database;
pub mod display;
pub mod domain;
pub mod errors;
pub mod ranking;
pub mod services;

use std::path::Path;

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use crate::cli::{Cli, Command, PhotoSlotArg, WeighinCommand};
use crate::config::settings::AppConfig;
use crate::database::PhotoSlot;
use crate::ranking::Mode;
use crate::services::board::BoardService;
use crate::services::reveal::RevealService;
use crate::services::roster::RosterService;
use crate::services::transfer::TransferService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_add(name: &str, baseline: f64, cheerer: &str, profile_pic: &str) -> Result<()> {
    roster()?.add_competitor(name, baseline, cheerer, profile_pic)
}

pub fn handle_edit(name: &str, new_name: Option<&str>, cheerer: Option<&str>) -> Result<()> {
    roster()?.update_competitor(name, new_name, cheerer)
}

pub fn handle_remove(name: &str) -> Result<()> {
    roster()?.delete_competitor(name)
}

pub fn handle_weighin(action: &WeighinCommand) -> Result<()> {
    let roster = roster()?;
    match action {
        WeighinCommand::Add { name, date, weight } => roster.add_weigh_in(name, *date, *weight),
        WeighinCommand::Edit { name, date, new_date, weight } => {
            roster.edit_weigh_in(name, *date, *new_date, *weight)
        }
        WeighinCommand::Delete { name, date, weight } => {
            roster.remove_weigh_in(name, *date, *weight)
        }
    }
}

pub fn handle_photo(name: &str, slot: PhotoSlotArg, reference: &str) -> Result<()> {
    let slot = match slot {
        PhotoSlotArg::Profile => PhotoSlot::Profile,
        PhotoSlotArg::Before => PhotoSlot::Before,
        PhotoSlotArg::After => PhotoSlot::After,
    };
    roster()?.set_photo(name, slot, reference)
}

pub fn handle_upload(name: &str, file: &Path) -> Result<()> {
    roster()?.upload_image(name, file)
}

pub fn handle_board(final_mode: bool, show_weights: bool) -> Result<()> {
    let service = BoardService::new(AppConfig::new())?;
    service.run(mode_from(final_mode), show_weights)
}

pub fn handle_reveal(final_mode: bool, pause: u64) -> Result<()> {
    let service = RevealService::new(AppConfig::new())?;
    service.run(mode_from(final_mode), pause)
}

pub fn handle_export(output: Option<&Path>) -> Result<()> {
    let service = TransferService::new(AppConfig::new())?;
    service.export(output)
}

pub fn handle_import(input: &Path) -> Result<()> {
    let service = TransferService::new(AppConfig::new())?;
    service.import(input)
}

pub fn handle_info() -> Result<()> {
    let status = roster()?.storage_info()?;
    println!(
        "Storage: {} of {} bytes used ({}%)",
        status.used_bytes,
        status.budget_bytes,
        status.percentage()
    );
    Ok(())
}

pub fn handle_clear(force: bool) -> Result<()> {
    if !force {
        bail!("Refusing to delete all contest data without --force");
    }
    roster()?.clear()
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn roster() -> Result<RosterService> {
    RosterService::new(AppConfig::new())
}

fn mode_from(final_mode: bool) -> Mode {
    if final_mode {
        Mode::Final
    } else {
        Mode::PreFinal
    }
}
