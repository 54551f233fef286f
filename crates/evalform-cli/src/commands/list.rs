//! The `evalform list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use evalform_core::catalog::FormCatalog;
use evalform_core::parser::load_form_directory;

pub fn execute(dir: PathBuf) -> Result<()> {
    let catalog: FormCatalog = load_form_directory(&dir)?
        .into_iter()
        .map(|(_, form)| form)
        .collect();

    if catalog.is_empty() {
        println!("No forms found in {}.", dir.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Name",
        "Categories",
        "Severity",
        "Questions",
        "Active",
    ]);

    for row in catalog.list() {
        table.add_row(vec![
            Cell::new(row.id),
            Cell::new(row.form_name),
            Cell::new(row.categories.join(", ")),
            Cell::new(row.severity),
            Cell::new(row.questions_count),
            Cell::new(if row.active { "yes" } else { "no" }),
        ]);
    }

    println!("{table}");
    println!("{} form(s)", catalog.len());
    Ok(())
}
