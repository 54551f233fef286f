//! The `evalform show` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use evalform_core::band::PerformanceLabel;
use evalform_core::config::SelectionOptions;
use evalform_core::model::{Answer, FormType};
use evalform_core::parser::parse_form;
use evalform_core::FormStore;

pub fn execute(form_path: PathBuf) -> Result<()> {
    let form = parse_form(&form_path)?;
    let store = FormStore::with_form(form, SelectionOptions::unrestricted());
    let form = store.form();

    println!("{} ({} form)", form.form_name, form.form_type);
    if !form.form_description.is_empty() {
        println!("{}", form.form_description);
    }
    println!(
        "Severity: {} | Approval required: {} | Agent response: {} | Active: {}",
        form.severity, form.approval_required, form.agent_response_option, form.active
    );

    let label = PerformanceLabel::for_band(&form.scoring_band);
    println!(
        "Scoring band: {}% - {}% ({label})",
        form.scoring_band.min(),
        form.scoring_band.max()
    );

    let groups = store.grouped_questions();
    if groups.is_empty() {
        println!("\nQuestions are hidden until categories and a severity are selected.");
        return Ok(());
    }

    for group in groups {
        println!("\n{}", group.category);

        let mut table = Table::new();
        let mut header = vec!["#", "Question"];
        if form.form_type == FormType::Percentage {
            header.push("Category weight");
        }
        header.extend(["Question weight", "Answers"]);
        table.set_header(header);

        for (index, question) in &group.questions {
            let mut row = vec![Cell::new(index + 1), Cell::new(&question.text)];
            if form.form_type == FormType::Percentage {
                row.push(Cell::new(weight(question.category_weight)));
            }
            row.push(Cell::new(weight(question.question_weight)));
            row.push(Cell::new(describe_answers(&question.answers)));
            table.add_row(row);
        }

        println!("{table}");
        if form.form_type == FormType::Percentage {
            println!("Total: {}%", form.category_weight_total(group.category));
        }
    }

    for warning in store.warnings() {
        println!("WARNING: {warning}");
    }

    Ok(())
}

fn weight(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |w| w.to_string())
}

fn describe_answers(answers: &[Answer]) -> String {
    answers
        .iter()
        .map(|answer| match answer {
            Answer::Range {
                answer_text,
                answer_value,
            } => format!("range: {answer_text} = {answer_value}"),
            Answer::Boolean {
                true_value,
                false_value,
            } => format!("boolean: {true_value}/{false_value}"),
            Answer::Comment { .. } => "comment".to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
