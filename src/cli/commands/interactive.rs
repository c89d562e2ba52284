//! Prompt-driven entry flow: pick a product and a process, then fill the
//! detail form and either keep the record in progress or complete the product.

use crate::cli::commands::add::{report_added, report_completed};
use crate::cli::commands::list::print_records;
use crate::cli::commands::open_engine;
use crate::config::Config;
use crate::core::form::FormInput;
use crate::core::lifecycle::LifecycleEngine;
use crate::db::log::ttlog_soft;
use crate::db::store::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::models::Process;
use crate::models::process::{DetailInput, PAGE_COUNT_OPTIONS, WORK_MINUTES_MAX, WORK_MINUTES_STEP};
use crate::ui::messages::{error, header, info, success, warning};
use crate::ui::prompt::Prompter;
use crate::ui::session::{Session, SubmitMode, SubmitOutcome, View};
use crate::utils::formatting::bold;
use crate::utils::time::parse_optional_time;
use std::io::{self, BufRead};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut engine = open_engine(cfg)?;
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock());
    run_session(&mut engine, &mut prompter, cfg)
}

/// Drive the session until the operator quits or input ends.
pub fn run_session<R: BufRead>(
    engine: &mut LifecycleEngine<SqliteStore>,
    prompter: &mut Prompter<R>,
    cfg: &Config,
) -> AppResult<()> {
    let mut session = Session::new();

    loop {
        let keep_going = match session.view().clone() {
            View::SelectProcess => selection_screen(engine, prompter, &mut session, cfg)?,
            View::InputForm { product, process } => {
                form_screen(engine, prompter, &mut session, cfg, &product, process)?
            }
        };
        if !keep_going {
            break;
        }
    }

    info("Bye.");
    Ok(())
}

/// Returns `false` when the session should end.
fn selection_screen<R: BufRead>(
    engine: &mut LifecycleEngine<SqliteStore>,
    prompter: &mut Prompter<R>,
    session: &mut Session,
    cfg: &Config,
) -> AppResult<bool> {
    header("Records in progress");
    let records = engine.in_progress()?;
    if records.is_empty() {
        info("No records in progress.");
    } else {
        print_records(&records, &cfg.separator_char);
    }

    let Some(action) = prompter.ask("[s]elect product and process, [d]elete a record, [q]uit")?
    else {
        return Ok(false);
    };

    match action.to_lowercase().as_str() {
        "q" | "quit" => Ok(false),
        "d" | "delete" => delete_screen(engine, prompter, &records),
        "s" | "select" | "" => {
            let Some(choice) = choose_product(engine, prompter)? else {
                return Ok(false);
            };
            let Some(product) = choice else {
                return Ok(true);
            };
            let Some(process) = choose_process(prompter)? else {
                return Ok(false);
            };
            if let Err(e) = session.start_input(&product, process) {
                warning(e);
            }
            Ok(true)
        }
        other => {
            warning(format!("Unknown action '{}'", other));
            Ok(true)
        }
    }
}

fn delete_screen<R: BufRead>(
    engine: &mut LifecycleEngine<SqliteStore>,
    prompter: &mut Prompter<R>,
    records: &[crate::models::Record],
) -> AppResult<bool> {
    if records.is_empty() {
        warning("Nothing to delete.");
        return Ok(true);
    }

    for (i, r) in records.iter().enumerate() {
        println!("  {:>2}) {} {}", i + 1, r.id, r.summary());
    }
    let Some(answer) = prompter.ask("Record to delete (number)")? else {
        return Ok(false);
    };
    let Some(idx) = pick(&answer, records.len()) else {
        warning("Select a record to delete.");
        return Ok(true);
    };

    let target = &records[idx];
    if !prompter.confirm(&format!("Delete {}?", target.summary()))? {
        info("Operation cancelled.");
        return Ok(true);
    }

    match engine.delete(&target.id) {
        Ok(removed) => {
            success(format!("Record ID {} has been deleted.", removed.id));
            ttlog_soft(engine.store().conn(), "del", &removed.id, &removed.summary());
        }
        Err(e) => error(e),
    }
    Ok(true)
}

/// Existing in-progress products by number, `0` for a new one.
/// `Ok(None)` at end of input, `Ok(Some(None))` for a number not on the menu.
fn choose_product<R: BufRead>(
    engine: &LifecycleEngine<SqliteStore>,
    prompter: &mut Prompter<R>,
) -> AppResult<Option<Option<String>>> {
    let products = engine.in_progress_products()?;

    println!("{}", bold("Product"));
    println!("   0) new product");
    for (i, p) in products.iter().enumerate() {
        println!("  {:>2}) {}", i + 1, p);
    }

    let Some(answer) = prompter.ask_or("Product", "0")? else {
        return Ok(None);
    };
    if let Some(idx) = pick(&answer, products.len()) {
        return Ok(Some(Some(products[idx].clone())));
    }
    if answer != "0" {
        if answer.bytes().all(|b| b.is_ascii_digit()) {
            warning(format!(
                "No product number {}; choose 0-{}",
                answer,
                products.len()
            ));
            return Ok(Some(None));
        }
        // typed a name directly
        return Ok(Some(Some(answer)));
    }

    Ok(prompter.ask("New product name")?.map(Some))
}

fn choose_process<R: BufRead>(prompter: &mut Prompter<R>) -> AppResult<Option<Option<Process>>> {
    println!("{}", bold("Process"));
    for (i, p) in Process::ALL.iter().enumerate() {
        println!("  {:>2}) {}", i + 1, p.label());
    }

    let Some(answer) = prompter.ask("Process")? else {
        return Ok(None);
    };
    let process = pick(&answer, Process::ALL.len())
        .map(|i| Process::ALL[i])
        .or_else(|| Process::from_input(&answer));
    Ok(Some(process))
}

/// Returns `false` when the session should end.
fn form_screen<R: BufRead>(
    engine: &mut LifecycleEngine<SqliteStore>,
    prompter: &mut Prompter<R>,
    session: &mut Session,
    cfg: &Config,
    product: &str,
    process: Process,
) -> AppResult<bool> {
    header(format!("{} / {}", product, process.label()));
    let fields = process.fields();
    let mut input = FormInput {
        workers: cfg.default_workers,
        ..FormInput::default()
    };

    match fields.detail {
        DetailInput::WorkMinutes => {
            let prompt = format!(
                "Work minutes ({}-{}, step {})",
                WORK_MINUTES_STEP, WORK_MINUTES_MAX, WORK_MINUTES_STEP
            );
            let Some(answer) = prompter.ask(&prompt)? else {
                return Ok(false);
            };
            match answer.parse::<i64>() {
                Ok(m) => input.work_minutes = Some(m),
                Err(_) => {
                    warning(format!("'{}' is not a number of minutes", answer));
                    return Ok(true);
                }
            }
        }
        DetailInput::PageCount => {
            let prompt = format!("Page count ({}; empty for none)", PAGE_COUNT_OPTIONS.join("/"));
            let Some(answer) = prompter.ask(&prompt)? else {
                return Ok(false);
            };
            input.page_count = Some(answer);
        }
        DetailInput::None => {}
    }

    if fields.times {
        let Some(start) = prompter.ask("Start time (HH:MM, empty for none)")? else {
            return Ok(false);
        };
        let Some(end) = prompter.ask("End time (HH:MM, empty for none)")? else {
            return Ok(false);
        };
        match (
            parse_optional_time(Some(&start)),
            parse_optional_time(Some(&end)),
        ) {
            (Ok(s), Ok(e)) => {
                input.start_time = s;
                input.end_time = e;
            }
            (Err(e), _) | (_, Err(e)) => {
                warning(e);
                return Ok(true);
            }
        }
    }

    let Some(quantity) = prompter.ask_or("Quantity", "0")? else {
        return Ok(false);
    };
    let Some(workers) = prompter.ask_or("Workers", &cfg.default_workers.to_string())? else {
        return Ok(false);
    };
    match (quantity.parse::<i64>(), workers.parse::<i64>()) {
        (Ok(q), Ok(w)) => {
            input.quantity = q;
            input.workers = w;
        }
        _ => {
            warning("Quantity and workers must be whole numbers.");
            return Ok(true);
        }
    }

    let Some(action) = prompter.ask("[a]dd as in progress, [c]omplete product, [b]ack")? else {
        return Ok(false);
    };
    let mode = match action.to_lowercase().as_str() {
        "a" | "add" => SubmitMode::InProgress,
        "c" | "complete" => SubmitMode::Complete,
        "b" | "back" => {
            session.back();
            return Ok(true);
        }
        other => {
            warning(format!("Unknown action '{}'", other));
            return Ok(true);
        }
    };

    match session.submit(engine, &input, mode) {
        Ok(SubmitOutcome::Added(rec)) => report_added(engine.store().conn(), &rec),
        Ok(SubmitOutcome::Completed(result)) => {
            report_completed(engine.store().conn(), product, &result)
        }
        Err(AppError::Validation(v)) => error(format!("Invalid input: {}", v)),
        Err(e) => error(e),
    }
    Ok(true)
}

/// 1-based menu choice → index.
fn pick(answer: &str, len: usize) -> Option<usize> {
    answer
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}
