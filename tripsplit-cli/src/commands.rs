use crate::args::{AddArgs, Cli, Command, ListArgs};
use anyhow::{Context, Result};
use std::{fs::File, path::PathBuf};
use tripsplit_application::{
    Clock, ExpenseBook, ExpenseStore, LedgerProcessor, LedgerReport, NewExpense, SyncService,
    TripConfig,
};
use tripsplit_domain::{
    CoveringSplits, ExpenseFilter, ExpenseId, LenientSplits, SortKey, SortOrder, SplitValidator,
    services::BoundEdge,
};
use tripsplit_i18n as i18n;
use tripsplit_infrastructure::{
    CsvSnapshotReader, JsonExpenseStore, SheetFileStore, SystemClock, load_config_with_fallback,
};
use tripsplit_presentation::{ExpensePresenter, LedgerPresenter, SummaryPresenter};

const DEFAULT_STORE_PATH: &str = "expenses.json";

/// Resolved paths and configuration for one invocation.
pub struct Workspace {
    pub config: TripConfig,
    pub store_path: PathBuf,
    pub sheet_path: PathBuf,
    pub strict_splits: bool,
}

impl Workspace {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = load_config_with_fallback(cli.config.as_deref())?;
        Ok(Self::new(config, cli))
    }

    pub fn new(config: TripConfig, cli: &Cli) -> Self {
        let store_path = cli
            .store
            .clone()
            .or_else(|| config.local_store_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));
        let sheet_path = cli
            .sheet
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.csv", config.google_sheets_name)));

        Self {
            config,
            store_path,
            sheet_path,
            strict_splits: cli.strict_splits,
        }
    }

    fn local_store(&self) -> JsonExpenseStore<SystemClock> {
        JsonExpenseStore::new(&self.store_path, SystemClock)
    }

    fn sheet_store(&self) -> SheetFileStore<SystemClock> {
        SheetFileStore::new(&self.sheet_path, SystemClock)
    }

    fn load_book(&self) -> Result<ExpenseBook> {
        let expenses = self
            .local_store()
            .load()
            .with_context(|| format!("Loading expenses from {}", self.store_path.display()))?;
        Ok(ExpenseBook::new(self.config.clone(), expenses))
    }

    fn save_book(&self, book: &ExpenseBook) -> Result<()> {
        self.local_store()
            .save(book.expenses())
            .with_context(|| format!("Saving expenses to {}", self.store_path.display()))
    }

    fn report(&self, book: &ExpenseBook) -> LedgerReport {
        let covering = CoveringSplits::default();
        let validator: &dyn SplitValidator = if self.strict_splits {
            &covering
        } else {
            &LenientSplits
        };
        book.report(&LedgerProcessor::new(validator))
    }
}

/// Runs one subcommand and returns the text to print.
pub fn execute(workspace: &Workspace, command: Command) -> Result<String> {
    match command {
        Command::Balances { participant } => {
            let book = workspace.load_book()?;
            let report = workspace.report(&book);
            Ok(LedgerPresenter::render(&report, book.expenses(), participant.as_deref()))
        }
        Command::List(args) => {
            let book = workspace.load_book()?;
            let (filter, key, order) = list_query(args, &SystemClock);
            Ok(ExpensePresenter::render(&book.query(&filter, key, order)))
        }
        Command::Add(args) => {
            let mut book = workspace.load_book()?;
            let id = book.add(new_expense(args), &SystemClock)?.id.clone();
            workspace.save_book(&book)?;
            Ok(i18n::expense_added(id))
        }
        Command::Delete { id } => {
            let mut book = workspace.load_book()?;
            let removed = book.delete(&ExpenseId::new(id))?;
            workspace.save_book(&book)?;
            Ok(i18n::expense_deleted(removed.id))
        }
        Command::Import { file } => {
            let reader = File::open(&file)
                .with_context(|| format!("Opening CSV snapshot {}", file.display()))?;
            let expenses = CsvSnapshotReader::new(&SystemClock).read(reader)?;
            let mut book = workspace.load_book()?;
            book.replace_all(expenses);
            workspace.save_book(&book)?;
            Ok(i18n::imported(book.expenses().len()))
        }
        Command::Sync => {
            let book = workspace.load_book()?;
            let (remote, local) = (workspace.sheet_store(), workspace.local_store());
            let merged = SyncService::new(&remote, &local).sync(book.expenses())?;
            Ok(i18n::synced(merged.len()))
        }
        Command::Pull => {
            let (remote, local) = (workspace.sheet_store(), workspace.local_store());
            let pulled = SyncService::new(&remote, &local).pull()?;
            Ok(i18n::synced(pulled.len()))
        }
        Command::Push => {
            let book = workspace.load_book()?;
            let (remote, local) = (workspace.sheet_store(), workspace.local_store());
            SyncService::new(&remote, &local).push(book.expenses())?;
            Ok(i18n::synced(book.expenses().len()))
        }
        Command::Summary => {
            let book = workspace.load_book()?;
            let report = workspace.report(&book);
            Ok(SummaryPresenter::render(&report))
        }
    }
}

fn list_query(args: ListArgs, clock: &dyn Clock) -> (ExpenseFilter, SortKey, SortOrder) {
    let mut filter = ExpenseFilter::new()
        .date_from(
            args.from
                .as_deref()
                .and_then(|raw| clock.date_bound(raw, BoundEdge::Start)),
        )
        .date_to(
            args.to
                .as_deref()
                .and_then(|raw| clock.date_bound(raw, BoundEdge::End)),
        );
    if let Some(currency) = args.currency {
        filter = filter.currency(currency);
    }
    if let Some(category) = args.category {
        filter = filter.category(category);
    }
    if let Some(participant) = args.participant {
        filter = filter.participant(participant);
    }
    (filter, args.sort.into(), args.order.into())
}

fn new_expense(args: AddArgs) -> NewExpense {
    NewExpense {
        date: args.date,
        time: args.time,
        description: args.description,
        category: args.category,
        amount: args.amount,
        currency: args.currency,
        paid_by: args.paid_by,
        split_among: args.split_among,
        notes: args.notes,
    }
}
