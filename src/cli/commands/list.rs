use crate::cli::commands::open_engine;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::Record;
use crate::ui::messages::{header, info};
use crate::utils::colors::{colorize_optional, colorize_status};
use crate::utils::formatting::{separator, visible_width};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { completed, product } = cmd {
        let engine = open_engine(cfg)?;

        let mut records = if *completed {
            engine.completed()?
        } else {
            engine.in_progress()?
        };

        if let Some(p) = product {
            let p = p.trim();
            records.retain(|r| r.product_name == p);
        }

        let title = if *completed {
            "Completed records"
        } else {
            "Records in progress"
        };

        if records.is_empty() {
            match product {
                Some(p) => info(format!("{}: none for product '{}'.", title, p.trim())),
                None => info(format!("{}: none.", title)),
            }
            return Ok(());
        }

        header(format!("{} ({})", title, records.len()));
        print_records(&records, &cfg.separator_char);
    }

    Ok(())
}

pub(crate) fn print_records(records: &[Record], sep: &str) {
    let mut table = Table::with_headers(&[
        "ID", "Product", "Process", "Detail", "Start", "End", "Min", "Qty", "Workers", "Status",
    ]);

    for r in records {
        table.add_row(vec![
            r.id.clone(),
            r.product_name.clone(),
            r.process.label().to_string(),
            colorize_optional(&r.detail),
            colorize_optional(&r.start_str()),
            colorize_optional(&r.end_str()),
            r.work_minutes.to_string(),
            r.quantity.to_string(),
            r.workers.to_string(),
            colorize_status(r.status.to_db_str(), r.status.is_completed()),
        ]);
    }

    let rendered = table.render();
    let width = rendered.lines().map(visible_width).max().unwrap_or(0);

    let mut lines = rendered.lines();
    if let Some(head) = lines.next() {
        println!("{}", head.trim_end());
        println!("{}", separator(sep, width));
    }
    for line in lines {
        println!("{}", line.trim_end());
    }
}
