use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tripsplit_domain::{SortKey, SortOrder};

#[derive(Parser, Debug)]
#[command(name = "tripsplit", version, about = "Shared trip expenses in THB and HKD")]
pub struct Cli {
    /// Trip configuration file (JSON)
    #[arg(long, env = "TRIPSPLIT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Local expense store; overrides `local_store_path` from the config
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Sheet file used as the shared remote copy
    #[arg(long, global = true)]
    pub sheet: Option<PathBuf>,

    /// Leave custom splits that do not cover their total out of the ledgers
    #[arg(long, global = true)]
    pub strict_splits: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Per-person balances and suggested settlements
    Balances {
        #[arg(long)]
        participant: Option<String>,
    },
    /// Filtered, sorted expense list
    List(ListArgs),
    /// Record a new equal-split expense
    Add(AddArgs),
    /// Delete an expense by id
    Delete { id: String },
    /// Replace the local list with a published CSV snapshot
    Import { file: PathBuf },
    /// Merge with the remote copy; remote wins on id collision
    Sync,
    /// Replace the local list with the remote copy
    Pull,
    /// Overwrite the remote copy with the local list
    Push,
    /// Totals, category breakdown and per-person shares
    Summary,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[arg(long)]
    pub currency: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub participant: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD` or RFC 3339
    #[arg(long)]
    pub from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD` or RFC 3339
    #[arg(long)]
    pub to: Option<String>,
    #[arg(long, value_enum, default_value_t = SortArg::Date)]
    pub sort: SortArg,
    #[arg(long, value_enum, default_value_t = OrderArg::Desc)]
    pub order: OrderArg,
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    #[arg(long)]
    pub amount: String,
    #[arg(long)]
    pub paid_by: String,
    /// Comma-separated names
    #[arg(long, value_delimiter = ',')]
    pub split_among: Vec<String>,
    #[arg(long, default_value = "THB")]
    pub currency: String,
    #[arg(long, default_value = "")]
    pub category: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// `YYYY-MM-DD`; empty means now
    #[arg(long, default_value = "")]
    pub date: String,
    /// `HH:MM`
    #[arg(long, default_value = "")]
    pub time: String,
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    #[default]
    Date,
    Amount,
    Category,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Asc,
    #[default]
    Desc,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortKey::Date,
            SortArg::Amount => SortKey::Amount,
            SortArg::Category => SortKey::Category,
        }
    }
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => SortOrder::Ascending,
            OrderArg::Desc => SortOrder::Descending,
        }
    }
}
