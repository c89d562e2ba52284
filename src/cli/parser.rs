use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for bindlog
/// CLI application to record bookbinding production steps with SQLite
#[derive(Parser)]
#[command(
    name = "bindlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record bookbinding production steps per product: keep work in progress, then complete it into a permanent log",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the bookbinding processes and the fields each one records
    Processes,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
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

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record work on a product, as in-progress or as a completion
    Add {
        /// Product name
        product: String,

        /// Process label (e.g. 断裁) or key (e.g. cutting); see `processes`
        process: String,

        #[arg(long = "quantity", short = 'q', default_value_t = 0, allow_negative_numbers = true)]
        quantity: i64,

        /// Number of workers (default from config)
        #[arg(long = "workers", short = 'w', allow_negative_numbers = true)]
        workers: Option<i64>,

        /// Work time in minutes (cutting only, 10..720 step 10)
        #[arg(long = "minutes", allow_negative_numbers = true)]
        minutes: Option<i64>,

        /// Page count (folding only: 4p, 6p, 8p, 16p, その他)
        #[arg(long = "pages")]
        pages: Option<String>,

        /// Start time (HH:MM)
        #[arg(long = "start")]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(long = "end")]
        end: Option<String>,

        /// Complete the product: finalize this and every in-progress record of it
        #[arg(long = "complete")]
        complete: bool,
    },

    /// Delete an in-progress record by ID
    Del {
        /// Record ID as shown by `list`
        id: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List in-progress records (or the completed log)
    List {
        #[arg(long = "completed", help = "Show the completed log instead")]
        completed: bool,

        #[arg(long = "product", short = 'p', help = "Only records of this product")]
        product: Option<String>,
    },

    /// Interactive entry: choose product and process, then fill the form
    Interactive,

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by creation date: year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(
            long = "in-progress",
            help = "Export in-progress records instead of the completed log"
        )]
        in_progress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
