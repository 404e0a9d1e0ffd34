//! Command-line definitions for the `fundbook` binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use fundbook_core::store::EntryKind;
use fundbook_core::VERSION;

/// Fundbook - a community-fund ledger with an append-only audit trail
#[derive(Parser)]
#[command(name = "fundbook")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the ledger files
    #[arg(short, long, global = true, env = "FUNDBOOK_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Path to the users file (defaults to users.json in the data directory)
    #[arg(long, global = true, env = "FUNDBOOK_USERS_FILE")]
    pub users_file: Option<String>,

    /// Username for authenticated operations
    #[arg(short, long, global = true, env = "FUNDBOOK_USER")]
    pub user: Option<String>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the data directory, ledger files, and first account
    Init(InitArgs),

    /// Record a new collection or expense
    Add(AddArgs),

    /// List current entries
    List(ListArgs),

    /// Edit an existing entry
    Edit(EditArgs),

    /// Delete one or more entries
    Delete(DeleteArgs),

    /// Show totals and both stores
    Report {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the audit history of a store
    History(HistoryArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Entry kind as it appears on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Collection,
    Expense,
}

impl From<KindArg> for EntryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Collection => EntryKind::Collection,
            KindArg::Expense => EntryKind::Expense,
        }
    }
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to the configured data dir)
    #[arg(value_name = "DIR")]
    pub dir: Option<String>,

    /// Username for the first account
    #[arg(long)]
    pub username: Option<String>,

    /// Password for the first account (prompted if omitted)
    #[arg(long, env = "FUNDBOOK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Which store to add to
    #[arg(value_enum, value_name = "KIND")]
    pub kind: KindArg,

    /// Name (collections) or purpose (expenses)
    #[arg(long)]
    pub label: Option<String>,

    /// Amount collected or spent
    #[arg(long)]
    pub amount: Option<String>,

    /// Entry date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Which store to list (both when omitted)
    #[arg(value_enum, value_name = "KIND")]
    pub kind: Option<KindArg>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Which store the entry lives in
    #[arg(value_enum, value_name = "KIND")]
    pub kind: KindArg,

    /// Entry id
    #[arg(value_name = "ID")]
    pub id: u64,

    /// New name (collections) or purpose (expenses)
    #[arg(long)]
    pub label: Option<String>,

    /// New amount
    #[arg(long)]
    pub amount: Option<String>,

    /// New date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Which store the entries live in
    #[arg(value_enum, value_name = "KIND")]
    pub kind: KindArg,

    /// Entry ids to delete
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<u64>,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

/// Arguments for the `history` command
#[derive(Args)]
pub struct HistoryArgs {
    /// Which store's audit trail to show
    #[arg(value_enum, value_name = "KIND")]
    pub kind: KindArg,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
