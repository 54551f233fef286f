//! evalform CLI: build, inspect and submit evaluation forms.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "evalform", version, about = "Evaluation form builder")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config, example form and action script
    Init,

    /// Validate form files
    Validate {
        /// Path to a form file or directory
        #[arg(long)]
        form: PathBuf,
    },

    /// Build a form by applying an action script
    Build {
        /// Action script TOML
        #[arg(long)]
        script: PathBuf,

        /// Existing form to start from (default: empty form)
        #[arg(long)]
        from: Option<PathBuf>,

        /// Where to write the result (default: print JSON to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print a form grouped by category
    Show {
        /// Form file
        #[arg(long)]
        form: PathBuf,
    },

    /// Render a form as an HTML preview
    Preview {
        /// Form file
        #[arg(long)]
        form: PathBuf,

        /// Output HTML file
        #[arg(long, default_value = "preview.html")]
        output: PathBuf,
    },

    /// Validate and submit a form
    Submit {
        /// Form file
        #[arg(long)]
        form: PathBuf,

        /// Sink: log, json (default from config)
        #[arg(long)]
        sink: Option<String>,
    },

    /// List the forms in a directory
    List {
        /// Directory of form files
        #[arg(long, default_value = "forms")]
        forms: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("evalform=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate { form } => commands::validate::execute(form, config),
        Commands::Build {
            script,
            from,
            output,
        } => commands::build::execute(script, from, output, config),
        Commands::Show { form } => commands::show::execute(form),
        Commands::Preview { form, output } => commands::preview::execute(form, output, config),
        Commands::Submit { form, sink } => commands::submit::execute(form, sink, config).await,
        Commands::List { forms } => commands::list::execute(forms),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
