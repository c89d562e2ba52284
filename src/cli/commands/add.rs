use crate::cli::commands::open_engine;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::form::{FormInput, assemble};
use crate::core::lifecycle::CompletionResult;
use crate::db::log::ttlog_soft;
use crate::errors::{AppError, AppResult};
use crate::models::{Process, Record};
use crate::ui::messages::{detail, success, warning};
use crate::utils::time::parse_optional_time;
use rusqlite::Connection;

/// Add a record as in-progress, or complete the product with it.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        product,
        process,
        quantity,
        workers,
        minutes,
        pages,
        start,
        end,
        complete,
    } = cmd
    {
        //
        // 1. Resolve process
        //
        let process_final = Process::from_input(process).ok_or_else(|| {
            AppError::InvalidProcess(format!(
                "'{}'. Run `bindlog processes` for the accepted names",
                process
            ))
        })?;

        //
        // 2. Parse times (optional)
        //
        let input = FormInput {
            quantity: *quantity,
            workers: workers.unwrap_or(cfg.default_workers),
            work_minutes: *minutes,
            page_count: pages.clone(),
            start_time: parse_optional_time(start.as_ref())?,
            end_time: parse_optional_time(end.as_ref())?,
        };

        let ignored = input.ignored_for(process_final);
        if !ignored.is_empty() {
            warning(format!(
                "{} does not record {}; ignored.",
                process_final.label(),
                ignored.join(", ")
            ));
        }

        //
        // 3. Assemble + validate before touching the DB
        //
        let candidate = assemble(product, process_final, &input)?;

        //
        // 4. Execute logic
        //
        let mut engine = open_engine(cfg)?;

        if *complete {
            let product_name = candidate.product_name.clone();
            let result = engine.complete(candidate, &product_name);
            if let Err(AppError::PartialCompletion { not_deleted, .. }) = &result {
                ttlog_soft(
                    engine.store().conn(),
                    "complete",
                    &product_name,
                    &format!("partial: still in progress [{}]", not_deleted.join(", ")),
                );
            }
            report_completed(engine.store().conn(), &product_name, &result?);
        } else {
            let rec = engine.add_in_progress(candidate)?;
            report_added(engine.store().conn(), &rec);
        }
    }

    Ok(())
}

pub(crate) fn report_added(conn: &Connection, rec: &Record) {
    success(format!(
        "Process {} added as in progress for {} (ID {}).",
        rec.process.label(),
        rec.product_name,
        rec.id
    ));
    ttlog_soft(conn, "add", &rec.id, &rec.summary());
}

pub(crate) fn report_completed(conn: &Connection, product: &str, result: &CompletionResult) {
    for id in &result.missing {
        warning(format!(
            "Record {} was already gone from in-progress; its completed copy was kept.",
            id
        ));
    }

    success(format!(
        "Records for {} finalized: {} record(s) moved to the completed log.",
        product,
        result.total()
    ));
    for rec in result.moved.iter().chain(std::iter::once(&result.appended)) {
        detail(format!("{} {}", rec.id, rec.summary()));
    }

    ttlog_soft(
        conn,
        "complete",
        product,
        &format!(
            "{} moved, {} appended ({})",
            result.moved.len(),
            result.appended.id,
            result.appended.process.label()
        ),
    );
}
