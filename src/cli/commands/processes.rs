use crate::errors::AppResult;
use crate::models::Process;
use crate::utils::table::Table;

/// Print the process catalogue.
pub fn handle() -> AppResult<()> {
    let mut table = Table::with_headers(&["Process", "Key", "Fields"]);

    for p in Process::ALL {
        table.add_row(vec![
            p.label().to_string(),
            p.key().to_string(),
            p.fields().describe(),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}
