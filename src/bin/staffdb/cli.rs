use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use StaffDB::Gender;

/// CLI для StaffDB: файл фиксированных слотов сотрудников
#[derive(Parser, Debug)]
#[command(
    name = "staffdb",
    version,
    about = "StaffDB CLI",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

/// Где лежит файл и какая у него геометрия (по умолчанию — из SDB_* env).
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    #[arg(long)]
    pub path: PathBuf,
    /// Number of slots (1..=100)
    #[arg(long)]
    pub capacity: Option<u32>,
    /// Bytes per slot
    #[arg(long)]
    pub record_size: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum GenderArg {
    Male,
    Female,
    M,
    F,
}

impl From<GenderArg> for Gender {
    fn from(g: GenderArg) -> Self {
        match g {
            GenderArg::Male | GenderArg::M => Gender::Male,
            GenderArg::Female | GenderArg::F => Gender::Female,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum NavDir {
    First,
    Last,
    Next,
    Prev,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Create (or extend) the data file with empty slots
    Init {
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Add a new employee into its empty slot
    Add {
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long)]
        id: String,
        #[arg(long)]
        pps: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        surname: String,
        #[arg(long, value_enum)]
        gender: GenderArg,
        #[arg(long, default_value = "")]
        department: String,
        #[arg(long)]
        salary: String,
        #[arg(long, default_value_t = false)]
        full_time: bool,
    },
    /// Edit an existing employee; only the given fields change
    Edit {
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long)]
        id: String,
        #[arg(long)]
        pps: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        surname: Option<String>,
        #[arg(long, value_enum)]
        gender: Option<GenderArg>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        salary: Option<String>,
        #[arg(long)]
        full_time: Option<bool>,
    },
    /// Delete an employee (slot is overwritten with the empty pattern)
    Del {
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long)]
        id: String,
    },
    /// Read one employee by id
    Get {
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long)]
        id: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Search by id or by surname (case-insensitive, lowest id wins)
    ///
    /// Пример:
    ///   staffdb search --path ./employees.dat --surname doe
    Search {
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long, conflicts_with = "surname", required_unless_present = "surname")]
        id: Option<String>,
        #[arg(long)]
        surname: Option<String>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List all occupied slots (summary)
    List {
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Navigate occupied slots: first | last | next --from N | prev --from N
    Nav {
        #[command(flatten)]
        store: StoreArgs,
        #[arg(value_enum)]
        dir: NavDir,
        #[arg(long, default_value_t = 0)]
        from: u32,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Import employees from a JSON array file
    ///
    /// JSON формат (массив объектов):
    /// [
    ///   {"identity":1,"personal_number":"1234567","first_name":"Jane","surname":"Doe",
    ///    "gender":"Female","department":"Sales","salary":50000,"full_time":true}
    /// ]
    Import {
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long)]
        file: PathBuf,
    },
    /// Print geometry, occupancy and metrics
    Status {
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Re-read the file and compare it with the in-memory mirror
    Verify {
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}
