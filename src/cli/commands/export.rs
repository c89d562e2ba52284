use crate::cli::commands::open_engine;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_soft;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportSource};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        in_progress,
        force,
    } = cmd
    {
        let engine = open_engine(cfg)?;
        let source = if *in_progress {
            ExportSource::InProgress
        } else {
            ExportSource::Completed
        };

        let written = ExportLogic::export(engine.store(), source, *format, file, range, *force)?;

        if written > 0 {
            ttlog_soft(
                engine.store().conn(),
                "export",
                file,
                &format!(
                    "{} {} record(s) from {}",
                    written,
                    format.as_str(),
                    source.sheet_name()
                ),
            );
        }
    }
    Ok(())
}
