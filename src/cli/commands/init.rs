use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog_soft;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database
///  - all pending DB migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    //
    // 1️⃣ PREPARE CONFIGURATION
    //
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing bindlog…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    //
    // 2️⃣ OPEN DB + MIGRATIONS
    //
    let store = SqliteStore::open(&db_path)?;

    println!("✅ Database initialized at {}", &db_path);

    //
    // 3️⃣ INTERNAL LOG (non-blocking)
    //
    ttlog_soft(
        store.conn(),
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    );

    println!("🎉 bindlog initialization completed!");
    Ok(())
}
