//! CLI for the finance backend: log in, browse the dashboard and ledger,
//! and manage income and expense records.

use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use finance_dashboard::aggregate::ChartMode;
use finance_dashboard::client::FinanceBlockingClient;
use finance_dashboard::dashboard::Dashboard;
use finance_dashboard::fetch::{FetchStatus, fetch_all_blocking};
use finance_dashboard::ledger::{DateGroup, Ledger};
use finance_dashboard::models::{
    ChangeEmail, ChangeName, ChangePassword, Credentials, ExpenseCategory, ExpenseId,
    IncomeCategory, IncomeId, NaiveDate, NewExpense, NewIncome, NewReceipt, Receipt, ReceiptId,
    SignUp, TransactionRecord, User,
};
use finance_dashboard::presenter::{Bar, BarState, Headline};
use finance_dashboard::session::{FileTokenStore, Session};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

/// Environment variable overriding the backend address.
const API_URL_ENV: &str = "FINANCE_API_URL";

/// Width of a full-height bar, in block characters.
const BAR_WIDTH: u8 = 20;

/// Personal finance CLI: dashboard, ledger and record management.
#[derive(Debug, Parser)]
#[command(name = "finance", version, about)]
struct Cli {
    /// Backend base URL (default: $FINANCE_API_URL or http://127.0.0.1:8000).
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,
    /// Override the token directory (default: XDG data dir).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and store the access token.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Password; read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Register a new account.
    Signup {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Display name.
        #[arg(long)]
        name: String,
        /// Password; read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored access token.
    Logout,
    /// Show the logged-in account.
    Whoami,
    /// Change the account display name.
    SetName {
        /// New display name.
        name: String,
    },
    /// Change the account login email.
    SetEmail {
        /// New email address.
        email: String,
    },
    /// Change the account password.
    SetPassword {
        /// New password; read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Show the income/expense chart and headline figures.
    Dashboard(DashboardArgs),
    /// List income and expenses grouped by day.
    Ledger,
    /// Record a new income.
    AddIncome(AddIncomeArgs),
    /// Record a new expense.
    AddExpense(AddExpenseArgs),
    /// Delete an income record.
    DeleteIncome {
        /// Record ID.
        id: i64,
    },
    /// Delete an expense record and its receipt.
    DeleteExpense {
        /// Record ID.
        id: i64,
    },
    /// List stored receipts.
    Receipts,
    /// Store a receipt, optionally linked to an expense.
    AddReceipt(AddReceiptArgs),
    /// Delete a receipt record.
    DeleteReceipt {
        /// Receipt ID.
        id: i64,
    },
    /// Download the generated tax forms PDF.
    TaxForms {
        /// Where to write the PDF.
        #[arg(long, short, value_name = "FILE")]
        output: PathBuf,
    },
}

/// Arguments for the `dashboard` subcommand.
#[derive(Debug, Args)]
struct DashboardArgs {
    /// Bucket by month instead of by weekday.
    #[arg(long)]
    monthly: bool,
    /// Reference date (YYYY-MM-DD, default: today).
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Bucket to select (0-based) instead of the default.
    #[arg(long)]
    select: Option<usize>,
}

/// Arguments for the `add-income` subcommand.
#[derive(Debug, Args)]
struct AddIncomeArgs {
    /// Amount received.
    #[arg(long)]
    total: f64,
    /// Category, e.g. Salary, Freelance or Investment.
    #[arg(long, value_parser = parse_income_category)]
    category: IncomeCategory,
    /// Date received (YYYY-MM-DD, default: today).
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Tax withheld.
    #[arg(long)]
    tax: Option<f64>,
    /// Free-text note.
    #[arg(long)]
    description: Option<String>,
}

/// Arguments for the `add-expense` subcommand.
#[derive(Debug, Args)]
struct AddExpenseArgs {
    /// Amount spent.
    #[arg(long)]
    total: f64,
    /// Category, e.g. "Bill & Utility", Groceries or Transport.
    #[arg(long, value_parser = parse_expense_category)]
    category: ExpenseCategory,
    /// Purchase date (YYYY-MM-DD, default: today).
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Tax paid.
    #[arg(long)]
    tax: Option<f64>,
    /// Free-text note.
    #[arg(long)]
    description: Option<String>,
    /// Vendor name for an attached receipt.
    #[arg(long)]
    vendor: Option<String>,
    /// Encoded receipt image.
    #[arg(long)]
    receipt_image: Option<String>,
}

impl AddExpenseArgs {
    /// Builds the receipt part of the payload, if any receipt field is set.
    fn receipt(&self, date: NaiveDate) -> Option<NewReceipt> {
        (self.vendor.is_some() || self.receipt_image.is_some()).then(|| NewReceipt {
            expense_id: None,
            receipt_image: self.receipt_image.clone(),
            date_uploaded: Some(date),
            vendor_name: self.vendor.clone(),
            total_amount: Some(self.total),
        })
    }
}

/// Arguments for the `add-receipt` subcommand.
#[derive(Debug, Args)]
struct AddReceiptArgs {
    /// Expense the receipt belongs to.
    #[arg(long)]
    expense: Option<i64>,
    /// Vendor name.
    #[arg(long)]
    vendor: Option<String>,
    /// Amount on the receipt.
    #[arg(long)]
    total: Option<f64>,
    /// Encoded receipt image.
    #[arg(long)]
    image: Option<String>,
    /// Upload date (YYYY-MM-DD, default: today).
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
}

impl AddReceiptArgs {
    /// Builds the `POST /receipt/add_receipt` payload.
    fn payload(self, today: NaiveDate) -> NewReceipt {
        NewReceipt {
            expense_id: self.expense.map(ExpenseId::new),
            receipt_image: self.image,
            date_uploaded: Some(self.date.unwrap_or(today)),
            vendor_name: self.vendor,
            total_amount: self.total,
        }
    }
}

/// Everything a subcommand needs.
#[derive(Debug)]
struct Context {
    /// Backend client.
    client: FinanceBlockingClient,
    /// Persistent token store.
    store: FileTokenStore,
    /// Session restored from `store`.
    session: Session,
}

/// Parses a date string in `YYYY-MM-DD` format for clap.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|err| format!("{err}"))
}

/// Parses an income category; unknown names are kept verbatim.
fn parse_income_category(s: &str) -> Result<IncomeCategory, String> {
    serde_json::from_value(serde_json::Value::String(s.trim().to_owned()))
        .map_err(|err| format!("{err}"))
}

/// Parses an expense category; unknown names are kept verbatim.
fn parse_expense_category(s: &str) -> Result<ExpenseCategory, String> {
    serde_json::from_value(serde_json::Value::String(s.trim().to_owned()))
        .map_err(|err| format!("{err}"))
}

/// Today's date in the local time zone.
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Picks the backend URL: flag first, then the environment.
fn resolve_api_url(flag: Option<String>, env: Option<String>) -> Option<String> {
    flag.or_else(|| env.filter(|val| !val.is_empty()))
}

/// Reads a password from `--password` or one line of stdin.
fn read_password(password: Option<String>) -> io::Result<String> {
    if let Some(value) = password {
        return Ok(value);
    }
    write!(io::stderr().lock(), "Password: ")?;
    io::stderr().lock().flush()?;
    let mut line = String::new();
    _ = io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

/// Writes an error line and returns the failure exit code.
fn fail<E: core::fmt::Display>(context: &str, err: E) -> io::Result<ExitCode> {
    writeln!(
        io::stderr().lock(),
        "{} {context}: {err}",
        "error:".red().bold()
    )?;
    Ok(ExitCode::FAILURE)
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let store = match create_token_store(cli.data_dir) {
        Ok(store) => store,
        Err(err) => return fail("failed to initialize token storage", err),
    };

    let session = match Session::load(&store) {
        Ok(session) => session,
        Err(err) => return fail("failed to load session", err),
    };

    let mut builder = FinanceBlockingClient::builder();
    if let Some(url) = resolve_api_url(cli.api_url, std::env::var(API_URL_ENV).ok()) {
        builder = builder.base_url(url);
    }
    let client = match builder.build() {
        Ok(client) => client,
        Err(err) => return fail("failed to build client", err),
    };

    let mut ctx = Context {
        client,
        store,
        session,
    };
    dispatch(&mut ctx, cli.command)
}

/// Creates the token store, using `data_dir` if provided or the default
/// XDG data directory otherwise.
fn create_token_store(
    data_dir: Option<PathBuf>,
) -> finance_dashboard::error::Result<FileTokenStore> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => FileTokenStore::default_dir()?,
    };
    FileTokenStore::new(dir)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch(ctx: &mut Context, command: Command) -> io::Result<ExitCode> {
    match command {
        Command::Login { email, password } => cmd_login(ctx, email, password),
        Command::Signup {
            email,
            name,
            password,
        } => cmd_signup(ctx, email, name, password),
        Command::Logout => cmd_logout(ctx),
        Command::Whoami => cmd_whoami(ctx),
        Command::SetName { name } => cmd_set_name(ctx, name),
        Command::SetEmail { email } => cmd_set_email(ctx, email),
        Command::SetPassword { password } => cmd_set_password(ctx, password),
        Command::Dashboard(args) => cmd_dashboard(ctx, &args),
        Command::Ledger => cmd_ledger(ctx),
        Command::AddIncome(args) => cmd_add_income(ctx, args),
        Command::AddExpense(args) => cmd_add_expense(ctx, &args),
        Command::DeleteIncome { id } => cmd_delete_income(ctx, IncomeId::new(id)),
        Command::DeleteExpense { id } => cmd_delete_expense(ctx, ExpenseId::new(id)),
        Command::Receipts => cmd_receipts(ctx),
        Command::AddReceipt(args) => cmd_add_receipt(ctx, args),
        Command::DeleteReceipt { id } => cmd_delete_receipt(ctx, ReceiptId::new(id)),
        Command::TaxForms { output } => cmd_tax_forms(ctx, &output),
    }
}

/// Executes the `login` subcommand.
fn cmd_login(ctx: &mut Context, email: String, password: Option<String>) -> io::Result<ExitCode> {
    let credentials = Credentials::new(email, read_password(password)?);
    let spinner = make_spinner("Logging in...");
    let token = ctx.client.login(&credentials);
    spinner.finish_and_clear();
    let token = match token {
        Ok(token) => token,
        Err(err) => return fail("login failed", err),
    };
    if let Err(err) = ctx.session.log_in(&ctx.store, token.access_token) {
        return fail("failed to store token", err);
    }
    writeln!(io::stdout().lock(), "{}", "Logged in.".green().bold())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `signup` subcommand.
fn cmd_signup(
    ctx: &Context,
    email: String,
    name: String,
    password: Option<String>,
) -> io::Result<ExitCode> {
    let request = SignUp::new(email, name, read_password(password)?);
    match ctx.client.signup(&request) {
        Ok(user) => {
            writeln!(
                io::stdout().lock(),
                "{} {} {}",
                "Registered".green().bold(),
                user.name,
                format_args!("<{}>", user.email).dimmed()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail("sign-up failed", err),
    }
}

/// Executes the `logout` subcommand.
fn cmd_logout(ctx: &mut Context) -> io::Result<ExitCode> {
    match ctx.session.log_out(&ctx.store) {
        Ok(()) => {
            writeln!(io::stdout().lock(), "{}", "Logged out.".green().bold())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail("failed to clear token", err),
    }
}

/// Prints an account summary after a profile read or update.
fn print_user<W: io::Write>(out: &mut W, heading: &str, user: &User) -> io::Result<()> {
    writeln!(
        out,
        "{} {} {} {}",
        heading.green().bold(),
        user.name,
        format_args!("<{}>", user.email).dimmed(),
        format_args!("(#{})", user.id).dimmed()
    )
}

/// Executes the `whoami` subcommand.
fn cmd_whoami(ctx: &Context) -> io::Result<ExitCode> {
    match ctx.client.fetch_user(&ctx.session) {
        Ok(user) => {
            print_user(&mut io::stdout().lock(), "Logged in as", &user)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail("failed to fetch account", err),
    }
}

/// Executes the `set-name` subcommand.
fn cmd_set_name(ctx: &Context, name: String) -> io::Result<ExitCode> {
    match ctx.client.change_name(&ctx.session, &ChangeName { new_name: name }) {
        Ok(user) => {
            print_user(&mut io::stdout().lock(), "Updated", &user)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail("failed to change name", err),
    }
}

/// Executes the `set-email` subcommand.
fn cmd_set_email(ctx: &Context, email: String) -> io::Result<ExitCode> {
    match ctx.client.change_email(&ctx.session, &ChangeEmail { new_email: email }) {
        Ok(user) => {
            print_user(&mut io::stdout().lock(), "Updated", &user)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail("failed to change email", err),
    }
}

/// Executes the `set-password` subcommand.
fn cmd_set_password(ctx: &Context, password: Option<String>) -> io::Result<ExitCode> {
    let change = ChangePassword::new(read_password(password)?);
    match ctx.client.change_password(&ctx.session, &change) {
        Ok(_user) => {
            writeln!(io::stdout().lock(), "{}", "Password changed.".green().bold())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail("failed to change password", err),
    }
}

/// Fetches both lists into a fresh dashboard, with a spinner.
fn load_dashboard(ctx: &Context, mode: ChartMode, reference_date: NaiveDate) -> Dashboard {
    let spinner = make_spinner("Fetching transactions...");
    let fetched = fetch_all_blocking(&ctx.client, &ctx.session);
    spinner.finish_and_clear();
    let mut dashboard = Dashboard::new(mode, reference_date);
    dashboard.apply(fetched);
    dashboard
}

/// Executes the `dashboard` subcommand.
fn cmd_dashboard(ctx: &Context, args: &DashboardArgs) -> io::Result<ExitCode> {
    let mode = if args.monthly {
        ChartMode::Monthly
    } else {
        ChartMode::Weekly
    };
    let mut dashboard = load_dashboard(ctx, mode, args.date.unwrap_or_else(today));
    if let Some(index) = args.select
        && !dashboard.select(index)
    {
        return fail(
            "invalid selection",
            format_args!("{index} is out of range for {mode} buckets"),
        );
    }
    let mut err = io::stderr().lock();
    print_fetch_warnings(&mut err, &dashboard)?;
    let mut out = io::stdout().lock();
    print_dashboard(&mut out, &dashboard)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `ledger` subcommand.
fn cmd_ledger(ctx: &Context) -> io::Result<ExitCode> {
    let dashboard = load_dashboard(ctx, ChartMode::default(), today());
    print_fetch_warnings(&mut io::stderr().lock(), &dashboard)?;
    print_ledger(&mut io::stdout().lock(), &dashboard.ledger())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `add-income` subcommand.
fn cmd_add_income(ctx: &Context, args: AddIncomeArgs) -> io::Result<ExitCode> {
    let mut income = NewIncome::new(args.date.unwrap_or_else(today), args.category, args.total);
    income.tax = args.tax;
    income.description = args.description;
    match ctx.client.add_income(&ctx.session, &income) {
        Ok(created) => {
            writeln!(
                io::stdout().lock(),
                "{} income #{} ({:.2})",
                "Added".green().bold(),
                created.id,
                created.total
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail("failed to add income", err),
    }
}

/// Executes the `add-expense` subcommand.
fn cmd_add_expense(ctx: &Context, args: &AddExpenseArgs) -> io::Result<ExitCode> {
    let date = args.date.unwrap_or_else(today);
    let mut expense = NewExpense::new(date, args.category.clone(), args.total);
    expense.tax = args.tax;
    expense.description.clone_from(&args.description);
    expense.receipt = args.receipt(date);
    match ctx.client.add_expense(&ctx.session, &expense) {
        Ok(created) => {
            writeln!(
                io::stdout().lock(),
                "{} expense #{} ({:.2})",
                "Added".green().bold(),
                created.id,
                created.total.unwrap_or_default()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail("failed to add expense", err),
    }
}

/// Executes the `delete-income` subcommand.
fn cmd_delete_income(ctx: &Context, id: IncomeId) -> io::Result<ExitCode> {
    match ctx.client.delete_income(&ctx.session, id) {
        Ok(detail) => {
            writeln!(io::stdout().lock(), "{}", detail.detail.green())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail("failed to delete income", err),
    }
}

/// Executes the `delete-expense` subcommand.
fn cmd_delete_expense(ctx: &Context, id: ExpenseId) -> io::Result<ExitCode> {
    match ctx.client.delete_expense(&ctx.session, id) {
        Ok(detail) => {
            writeln!(io::stdout().lock(), "{}", detail.detail.green())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail("failed to delete expense", err),
    }
}

/// Executes the `receipts` subcommand.
fn cmd_receipts(ctx: &Context) -> io::Result<ExitCode> {
    match ctx.client.receipts(&ctx.session) {
        Ok(receipts) => {
            print_receipts_table(&mut io::stdout().lock(), &receipts)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail("failed to read receipts", err),
    }
}

/// Executes the `add-receipt` subcommand.
fn cmd_add_receipt(ctx: &Context, args: AddReceiptArgs) -> io::Result<ExitCode> {
    match ctx.client.add_receipt(&ctx.session, &args.payload(today())) {
        Ok(receipt) => {
            writeln!(
                io::stdout().lock(),
                "{} receipt #{}",
                "Added".green().bold(),
                receipt.id
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail("failed to add receipt", err),
    }
}

/// Executes the `delete-receipt` subcommand.
fn cmd_delete_receipt(ctx: &Context, id: ReceiptId) -> io::Result<ExitCode> {
    match ctx.client.delete_receipt(&ctx.session, id) {
        Ok(detail) => {
            writeln!(io::stdout().lock(), "{}", detail.detail.green())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail("failed to delete receipt", err),
    }
}

/// Executes the `tax-forms` subcommand.
fn cmd_tax_forms(ctx: &Context, output: &Path) -> io::Result<ExitCode> {
    let spinner = make_spinner("Generating tax forms...");
    let result = ctx.client.tax_forms(&ctx.session);
    spinner.finish_and_clear();
    match result {
        Ok(pdf) => {
            std::fs::write(output, &pdf)?;
            writeln!(
                io::stdout().lock(),
                "{} {}",
                "Saved tax forms to".green().bold(),
                output.display()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail("failed to generate tax forms", err),
    }
}

// ── Output formatting ────────────────────────────────────────────────

/// Formats an amount with two decimals.
fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Number of block characters for a bar of `height` percent.
fn bar_cells(height: f64) -> usize {
    (1..=BAR_WIDTH)
        .take_while(|&step| f64::from(step) * 80.0 / f64::from(BAR_WIDTH) <= height)
        .count()
        .max(1)
}

/// Explains lists that are empty because they were not loaded.
fn print_fetch_warnings<W: io::Write>(out: &mut W, dashboard: &Dashboard) -> io::Result<()> {
    let lists = [
        ("income", dashboard.income_status()),
        ("expense", dashboard.expense_status()),
    ];
    if lists
        .iter()
        .any(|&(_, status)| status == FetchStatus::NoCredential)
    {
        writeln!(
            out,
            "{} not logged in; run {} first",
            "hint:".cyan(),
            "finance login".bold()
        )?;
    }
    for (name, status) in lists {
        if status == FetchStatus::Failed {
            writeln!(
                out,
                "{} {name} list could not be loaded; figures may be incomplete",
                "warning:".yellow().bold()
            )?;
        }
    }
    Ok(())
}

/// Prints the headline figures and the bar chart.
fn print_dashboard<W: io::Write>(out: &mut W, dashboard: &Dashboard) -> io::Result<()> {
    let presenter = dashboard.presenter();
    writeln!(
        out,
        "{} {}",
        presenter.title().green().bold(),
        format_args!("({} view, {})", dashboard.mode(), dashboard.reference_date()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{}", headline_table(&presenter.headline()))?;
    writeln!(out, "{}", bars_table(&presenter.bars()))?;
    Ok(())
}

/// Builds the headline figures table.
fn headline_table(headline: &Headline) -> Table {
    let balance_color = if headline.balance < 0.0_f64 {
        Color::Red
    } else {
        Color::Green
    };
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Income").fg(Color::Cyan),
        Cell::new("Expense").fg(Color::Cyan),
        Cell::new("Tax").fg(Color::Cyan),
        Cell::new("Balance").fg(Color::Cyan),
    ]);
    _ = table.add_row(vec![
        Cell::new(format_amount(headline.income)).fg(Color::Green),
        Cell::new(format_amount(headline.expense)).fg(Color::Red),
        Cell::new(format_amount(headline.tax)),
        Cell::new(format_amount(headline.balance)).fg(balance_color),
    ]);
    table
}

/// Builds the bar chart table, one row per bucket.
fn bars_table(bars: &[Bar]) -> Table {
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("").fg(Color::Cyan),
        Cell::new("Income").fg(Color::Cyan),
    ]);
    for bar in bars {
        let blocks = "\u{2588}".repeat(bar_cells(bar.height));
        let (label, blocks) = match bar.state {
            BarState::Selected => (
                Cell::new(format!("\u{25b6} {}", bar.label)).fg(Color::Green),
                Cell::new(blocks).fg(Color::Green),
            ),
            BarState::HasData => (
                Cell::new(format!("  {}", bar.label)),
                Cell::new(blocks).fg(Color::Cyan),
            ),
            BarState::Empty => (
                Cell::new(format!("  {}", bar.label)).fg(Color::DarkGrey),
                Cell::new(blocks).fg(Color::DarkGrey),
            ),
        };
        _ = table.add_row(vec![label, blocks]);
    }
    table
}

/// Prints both grouped lists with their totals.
fn print_ledger<W: io::Write>(out: &mut W, ledger: &Ledger) -> io::Result<()> {
    print_ledger_section(out, "Income", ledger.total_income, &ledger.income)?;
    writeln!(out)?;
    print_ledger_section(out, "Expenses", ledger.total_expense, &ledger.expenses)?;
    Ok(())
}

/// Prints one grouped list.
fn print_ledger_section<W: io::Write>(
    out: &mut W,
    title: &str,
    total: f64,
    groups: &[DateGroup],
) -> io::Result<()> {
    writeln!(
        out,
        "{} {}",
        title.green().bold(),
        format_args!("(total {})", format_amount(total)).dimmed()
    )?;
    if groups.is_empty() {
        writeln!(out, "{}", "No records found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Date").fg(Color::Cyan),
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Description").fg(Color::Cyan),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("Tax").fg(Color::Cyan),
    ]);
    for group in groups {
        for record in &group.records {
            _ = table.add_row(ledger_row(&group.date_key, record));
        }
    }
    writeln!(out, "{table}")?;
    Ok(())
}

/// One ledger table row.
fn ledger_row(date_key: &str, record: &TransactionRecord) -> Vec<Cell> {
    vec![
        Cell::new(date_key),
        Cell::new(&record.category),
        Cell::new(record.description.as_deref().unwrap_or("")),
        Cell::new(format_amount(record.total)),
        Cell::new(format_amount(record.tax)).fg(Color::DarkGrey),
    ]
}

/// Prints receipts in a table.
fn print_receipts_table<W: io::Write>(out: &mut W, receipts: &[Receipt]) -> io::Result<()> {
    if receipts.is_empty() {
        writeln!(out, "{}", "No receipts found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Vendor").fg(Color::Cyan),
        Cell::new("Amount").fg(Color::Cyan),
        Cell::new("Uploaded").fg(Color::Cyan),
        Cell::new("Expense").fg(Color::Cyan),
    ]);
    for receipt in receipts {
        _ = table.add_row(vec![
            Cell::new(receipt.id),
            Cell::new(receipt.vendor_name.as_deref().unwrap_or("\u{2014}")),
            Cell::new(
                receipt
                    .total_amount
                    .map_or_else(|| "\u{2014}".to_owned(), format_amount),
            ),
            Cell::new(
                receipt
                    .date_uploaded
                    .map_or_else(|| "\u{2014}".to_owned(), |date| date.to_string()),
            ),
            Cell::new(
                receipt
                    .expense_id
                    .map_or_else(|| "\u{2014}".to_owned(), |id| id.to_string()),
            ),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Receipts".green().bold(),
        format_args!("({})", receipts.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Creates a spinner with the given message.
fn make_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(core::time::Duration::from_millis(80));
    spinner
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
