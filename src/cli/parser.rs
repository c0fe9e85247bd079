use crate::export::{ExportFormat, ExportTarget};
use clap::{Parser, Subcommand};

/// Command-line interface definition for rclinic
/// CLI application to run a psychology practice on SQLite
#[derive(Parser)]
#[command(
    name = "rclinic",
    version = env!("CARGO_PKG_VERSION"),
    about = "Clients, sessions and billing reconciliation for psychology practices, on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Act on behalf of this user; their clinician scopes every query
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long = "file", help = "Absolute path of the backup file")]
        file: String,

        #[arg(long = "compress", help = "Compress the backup as .zip")]
        compress: bool,

        #[arg(long = "force", help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Manage clients
    Client {
        #[command(subcommand)]
        action: ClientAction,
    },

    /// Manage sessions (appointments)
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Manage user accounts and clinicians
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Financial dashboards and pending report
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Clinical assessments of a client
    Assessment {
        #[command(subcommand)]
        action: AssessmentAction,
    },

    /// Compute object storage keys for documents
    Document {
        #[command(subcommand)]
        action: DocumentAction,
    },

    /// Export sessions or the client summary
    Export {
        #[arg(long = "what", value_enum, default_value = "sessions")]
        what: ExportTarget,

        #[arg(long = "format", value_enum, help = "Output format")]
        format: ExportFormat,

        #[arg(long = "file", help = "Absolute path of the output file")]
        file: String,

        #[arg(
            long = "range",
            help = "all | YYYY | YYYY-MM | YYYY-MM-DD | A:B with the same shape"
        )]
        range: Option<String>,

        #[arg(long = "clinician", help = "Clinician id")]
        clinician: Option<i64>,

        #[arg(long = "client", help = "Client id or name (sessions only)")]
        client: Option<String>,

        #[arg(long = "force", help = "Overwrite an existing file without asking")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ClientAction {
    /// Register a new client
    Add {
        name: String,

        #[arg(long = "price", help = "Session price (defaults to the configured price)")]
        price: Option<String>,

        #[arg(long = "clinician", help = "Responsible clinician id")]
        clinician: Option<i64>,

        #[arg(long = "day", help = "Scheduling day: monday..friday or undefined")]
        day: Option<String>,
    },

    /// List clients
    List {
        #[arg(long = "clinician", help = "Clinician id")]
        clinician: Option<i64>,
    },

    /// Show a client with the indicators of one month
    Show {
        /// Client id or name
        client: String,

        #[arg(long = "month", help = "Month as YYYY-MM (default: current month)")]
        month: Option<String>,
    },

    /// Rename a client
    Rename {
        /// Client id or name
        client: String,
        new_name: String,
    },

    /// Delete a client with its sessions and assessments
    Del {
        /// Client id or name
        client: String,
    },
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Record or schedule a session
    Add {
        /// Client id or name
        client: String,

        /// Date (YYYY-MM-DD)
        date: String,

        /// Start time (HH:MM), on the slot grid
        time: String,

        #[arg(long = "amount", help = "Amount (default: the client's session price)")]
        amount: Option<String>,

        #[arg(long = "status", help = "realized | missed", default_value = "realized")]
        status: String,

        #[arg(long = "chargeable", help = "A missed session is still charged")]
        chargeable: bool,

        #[arg(long = "paid", help = "Payment received")]
        paid: bool,

        #[arg(long = "nf", help = "Invoice reference, must start with NF-")]
        invoice_ref: Option<String>,

        #[command(flatten)]
        diary: DiaryArgs,
    },

    /// List sessions
    List {
        #[arg(long = "client", help = "Client id or name")]
        client: Option<String>,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "clinician", help = "Clinician id")]
        clinician: Option<i64>,
    },

    /// Change fields of a session
    Edit {
        id: i64,

        #[arg(long = "date")]
        date: Option<String>,

        #[arg(long = "time")]
        time: Option<String>,

        #[arg(long = "amount")]
        amount: Option<String>,

        #[arg(long = "status", help = "realized | missed")]
        status: Option<String>,

        #[arg(long = "chargeable", help = "true | false")]
        chargeable: Option<bool>,

        #[arg(long = "paid", help = "true | false")]
        paid: Option<bool>,

        #[arg(long = "nf", help = "Invoice reference, must start with NF-")]
        invoice_ref: Option<String>,

        #[command(flatten)]
        diary: DiaryArgs,
    },

    /// Delete a session
    Del { id: i64 },

    /// Print the bookable time slots
    Slots,
}

/// Session diary fields.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DiaryArgs {
    #[arg(long = "content")]
    pub content: Option<String>,

    #[arg(long = "goal")]
    pub goal: Option<String>,

    #[arg(long = "material")]
    pub material: Option<String>,

    #[arg(long = "homework")]
    pub homework: Option<String>,

    #[arg(long = "mood-in", help = "Mood at arrival, 1..=5")]
    pub mood_in: Option<i64>,

    #[arg(long = "mood-out", help = "Mood at departure, 1..=5")]
    pub mood_out: Option<i64>,

    #[arg(long = "next")]
    pub next_session: Option<String>,

    #[arg(long = "obs")]
    pub observation: Option<String>,
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create an account (the first account becomes admin)
    Add {
        username: String,

        #[arg(long = "password")]
        password: String,

        #[arg(long = "role", help = "assistant | clinician")]
        role: String,

        #[arg(long = "responsible", help = "Responsible clinician id (assistants)")]
        responsible: Option<i64>,
    },

    /// List accounts
    List,

    /// List clinicians
    Clinicians,

    /// Turn an assistant into a clinician (admin only)
    Promote { username: String },

    /// Grant the admin privilege (admin only)
    Grant { username: String },

    /// Revoke the admin privilege (admin only)
    Revoke { username: String },

    /// Rename an account
    Rename { username: String, new_username: String },

    /// Change a password
    Passwd {
        username: String,

        #[arg(long = "current")]
        current: String,

        #[arg(long = "new")]
        new: String,

        #[arg(long = "confirm")]
        confirm: String,
    },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// All sessions ever recorded
    Global {
        #[arg(long = "clinician")]
        clinician: Option<i64>,
    },

    /// One year, with a month by month breakdown
    Year {
        /// Year (default: current year)
        year: Option<i32>,

        #[arg(long = "clinician")]
        clinician: Option<i64>,
    },

    /// One month (YYYY-MM, default: current month)
    Month {
        month: Option<String>,

        #[arg(long = "clinician")]
        clinician: Option<i64>,
    },

    /// Clients with outstanding balances
    Pending {
        #[arg(long = "from", help = "Start date (default: first day of this month)")]
        from: Option<String>,

        #[arg(long = "to", help = "End date (default: today)")]
        to: Option<String>,

        #[arg(long = "clinician")]
        clinician: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum AssessmentAction {
    /// Record an assessment
    Add {
        /// Client id or name
        client: String,

        #[arg(long = "date", help = "Date (default: today)")]
        date: Option<String>,

        #[arg(long = "tags", default_value = "", help = "Comma separated tags")]
        tags: String,

        #[arg(long = "description")]
        description: String,
    },

    /// List assessments of a client, newest first
    List {
        /// Client id or name
        client: String,
    },
}

#[derive(Subcommand)]
pub enum DocumentAction {
    /// Storage key of a client document
    Key {
        /// Client id or name
        client: String,

        #[arg(
            long = "type",
            help = "questionnaires | tests | reports | contract | invoices"
        )]
        doc_type: String,

        #[arg(long = "name")]
        name: String,
    },

    /// Storage key of a template document
    Template {
        #[arg(long = "type", help = "tests | reports | contracts")]
        template_type: String,

        #[arg(long = "name")]
        name: String,
    },

    /// Storage folders of a client
    Folders {
        /// Client id or name
        client: String,
    },
}
