use crate::cli::commands::open_engine;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::RecordStore;
use crate::db::log::ttlog_soft;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::ui::prompt::ask_confirmation;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut engine = open_engine(cfg)?;

        let rec = engine
            .store()
            .find_in_progress(id)?
            .ok_or_else(|| AppError::NotFound(id.clone()))?;

        //
        // Confirmation prompt
        //
        if !*yes
            && !ask_confirmation(&format!(
                "Delete in-progress record {} ({})? This action is irreversible.",
                id,
                rec.summary()
            ))?
        {
            info("Operation cancelled.");
            return Ok(());
        }

        //
        // Execute deletion
        //
        let removed = engine.delete(id)?;
        success(format!("Record ID {} has been deleted.", removed.id));
        ttlog_soft(engine.store().conn(), "del", &removed.id, &removed.summary());
    }

    Ok(())
}
