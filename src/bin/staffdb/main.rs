use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};

mod cli;
mod util;
mod cmd_init;
mod cmd_add;
mod cmd_edit;
mod cmd_del;
mod cmd_get;
mod cmd_search;
mod cmd_list;
mod cmd_nav;
mod cmd_import;
mod cmd_status;
mod cmd_verify;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    // Пример: RUST_LOG=debug staffdb list --path ./employees.dat
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Init { store } =>
            cmd_init::exec(store),

        cli::Cmd::Add { store, id, pps, first_name, surname, gender, department, salary, full_time } =>
            cmd_add::exec(store, cmd_add::AddArgs {
                id, pps, first_name, surname, gender, department, salary, full_time,
            }),

        cli::Cmd::Edit { store, id, pps, first_name, surname, gender, department, salary, full_time } =>
            cmd_edit::exec(store, cmd_edit::EditArgs {
                id, pps, first_name, surname, gender, department, salary, full_time,
            }),

        cli::Cmd::Del { store, id } =>
            cmd_del::exec(store, id),

        cli::Cmd::Get { store, id, json } =>
            cmd_get::exec(store, id, json),

        cli::Cmd::Search { store, id, surname, json } =>
            cmd_search::exec(store, id, surname, json),

        cli::Cmd::List { store, json } =>
            cmd_list::exec(store, json),

        cli::Cmd::Nav { store, dir, from, json } =>
            cmd_nav::exec(store, dir, from, json),

        cli::Cmd::Import { store, file } =>
            cmd_import::exec(store, file),

        cli::Cmd::Status { store, json } =>
            cmd_status::exec(store, json),

        cli::Cmd::Verify { store, json } =>
            cmd_verify::exec(store, json),
    }
}
