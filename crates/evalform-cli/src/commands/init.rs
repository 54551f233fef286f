//! The `evalform init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("evalform.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("forms").context("failed to create forms directory")?;
    write_if_missing(Path::new("forms/example.toml"), EXAMPLE_FORM)?;
    write_if_missing(Path::new("forms/example-actions.toml"), EXAMPLE_ACTIONS)?;

    println!("\nNext steps:");
    println!("  1. Edit evalform.toml to set your categories and severities");
    println!("  2. Run: evalform validate --form forms/example.toml");
    println!("  3. Run: evalform build --script forms/example-actions.toml --output forms/built.json");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# evalform configuration

# Form type for new forms: "percentage" or "points"
default_form_type = "percentage"

# Where `submit` sends forms: "log" or "json"
sink = "log"

# Output directory for JSON submissions (supports ${VAR} references)
output_dir = "./evalform-output"

[options]
categories = ["IT", "HR", "Finance", "Marketing"]
severities = ["Development", "Support", "Sales", "Design"]
"#;

const EXAMPLE_FORM: &str = r#"formName = "Inbound support QA"
formDescription = "Quality review for inbound support calls"
approvalRequired = true
agentResponseOption = "allowAcknowledge"
formTypeOption = "percentage"
categories = ["IT", "HR"]
severity = "Support"
scoringBand = [60.0, 90.0]
active = true

[[questions]]
text = "Did the agent verify the caller's identity?"
category = "IT"
categoryWeight = 60.0

[[questions.answers]]
type = "range"
answerText = "Verified"
answerValue = "10"

[[questions.answers]]
type = "range"
answerText = "Not verified"
answerValue = "0"

[[questions]]
text = "Was the issue resolved on the first call?"
category = "IT"
categoryWeight = 40.0

[[questions.answers]]
type = "boolean"
trueValue = "10"
falseValue = "0"

[[questions.answers]]
type = "comment"
text = ""

[[questions]]
text = "Was the agent courteous?"
category = "HR"
categoryWeight = 100.0

[[questions.answers]]
type = "range"
answerText = "Always"
answerValue = "5"
"#;

const EXAMPLE_ACTIONS: &str = r#"# Builds the example form step by step.

[[actions]]
type = "set_name"
name = "Inbound support QA"

[[actions]]
type = "select_categories"
categories = ["IT", "HR"]

[[actions]]
type = "select_severity"
severity = "Support"

[[actions]]
type = "set_scoring_band"
min = 60.0
max = 90.0

[[actions]]
type = "set_question_text"
index = 0
text = "Did the agent verify the caller's identity?"

[[actions]]
type = "update_answer"
index = 0
answer = 0
value = { type = "range", answerText = "Verified", answerValue = "10" }

[[actions]]
type = "add_question"
category = "IT"

[[actions]]
type = "set_question_text"
index = 2
text = "Was the issue resolved on the first call?"

[[actions]]
type = "remove_answer"
index = 2
answer = 0

[[actions]]
type = "add_answer"
index = 2
kind = "boolean"

[[actions]]
type = "update_answer"
index = 2
answer = 0
value = { type = "boolean", trueValue = "10", falseValue = "0" }

[[actions]]
type = "set_category_weight"
index = 0
weight = 60.0

# Pushes IT to 110%: reported as a warning, then corrected below.
[[actions]]
type = "set_category_weight"
index = 2
weight = 50.0

[[actions]]
type = "set_category_weight"
index = 2
weight = 40.0

[[actions]]
type = "set_question_text"
index = 1
text = "Was the agent courteous?"

[[actions]]
type = "add_answer"
index = 1
kind = "comment"

[[actions]]
type = "set_category_weight"
index = 1
weight = 100.0
"#;
