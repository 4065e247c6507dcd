use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use ilm::catalog::{self, Catalog, IconRegistry};
use ilm::core::config::{self, CliOverrides, ResolvedConfig};
use ilm::directory::{DirectoryEngine, DirectoryView};
use ilm::feedback::{FeedbackFlow, HttpSubmitter, PromptAction, PromptConfig, PromptState};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "ilm", about = "Bilingual topic directory with feedback submission")]
struct Args {
    /// Catalog JSON file (defaults to the bundled catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Feedback endpoint URL
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List topics grouped by category
    Topics {
        /// Case-insensitive text to search for
        #[arg(short, long, default_value = "")]
        query: String,
        /// Only show this category (the "All" label shows everything)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List the category picker labels
    Categories,
    /// Show the topic after the given one
    Next { id: String },
    /// Send feedback to the configured endpoint
    Feedback {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to ilm.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("ilm.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Ilm starting up");

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            log::warn!("Fatal: {}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let file_config = config::load_config()?;
    let cli = CliOverrides {
        catalog_path: args.catalog.as_deref(),
        endpoint_url: args.endpoint.as_deref(),
    };

    let catalog_path = config::resolve_catalog_path(&file_config, &cli);
    let catalog = catalog::load_or_bundled(catalog_path.as_deref())?;
    let resolved = config::resolve(&file_config, &cli, catalog.categories());
    if !catalog::check(&catalog, &resolved.directory.category_order) {
        eprintln!("warning: catalog configuration looks wrong, see ilm.log");
    }

    match args.command {
        Command::Topics { query, category } => {
            let engine = DirectoryEngine::new(resolved.directory.clone());
            let category = category.unwrap_or_else(|| resolved.directory.all_label.clone());
            print_directory(&catalog, &engine, &query, &category);
            Ok(ExitCode::SUCCESS)
        }
        Command::Categories => {
            let engine = DirectoryEngine::new(resolved.directory);
            for label in engine.category_labels() {
                println!("{label}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Next { id } => {
            if catalog.get(&id).is_none() {
                eprintln!("unknown topic: {id}");
                return Ok(ExitCode::FAILURE);
            }
            match catalog.next_topic(&id) {
                Some(next) => println!("اگلا موضوع: {} ({})", next.title, next.route),
                None => println!("This is the last topic."),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Feedback { name, message } => Ok(send_feedback(&resolved, name, message).await),
    }
}

fn print_directory(catalog: &Catalog, engine: &DirectoryEngine, query: &str, category: &str) {
    println!("{} - {}", catalog.title(), catalog.subtitle());
    println!("{}", catalog.description());
    println!();

    let icons = IconRegistry::default();
    match engine.view(catalog, query, category) {
        DirectoryView::Groups(groups) => {
            for group in groups {
                println!("[{}]", group.name);
                for topic in group.topics {
                    // Unresolved icons leave the slot blank
                    let icon = icons.resolve(&topic.icon).unwrap_or(" ");
                    println!("  {} {} · {}  ({})", icon, topic.title, topic.subtitle, topic.route);
                    if !topic.description.is_empty() {
                        println!("     {}", topic.description);
                    }
                }
                println!();
            }
        }
        DirectoryView::NoMatches => println!("کوئی موضوع نہیں ملا / No topics match your search."),
        DirectoryView::EmptyCatalog => println!("The catalog has no topics."),
        DirectoryView::NoCategories => {
            println!("No categories are configured; set [catalog].categories in the config file.")
        }
    }
}

async fn send_feedback(config: &ResolvedConfig, name: String, message: String) -> ExitCode {
    let submitter = Arc::new(HttpSubmitter::new(config.submitter.clone()));
    // No auto prompt from the command line
    let prompt = PromptConfig {
        auto_show: false,
        ..config.prompt
    };
    let mut flow = FeedbackFlow::new(prompt, submitter);

    flow.dispatch(PromptAction::OpenForm);
    flow.dispatch(PromptAction::EditName(name));
    flow.dispatch(PromptAction::EditMessage(message));
    if !flow.machine().can_submit() {
        eprintln!("Both --name and --message must be non-empty.");
        return ExitCode::FAILURE;
    }
    flow.dispatch(PromptAction::Submit);

    while flow.state() == PromptState::SubmissionPending {
        flow.next_event().await;
    }

    let outcome = flow
        .machine()
        .last_outcome()
        .map(|o| o.to_string())
        .unwrap_or_default();
    match flow.state() {
        PromptState::SubmissionResolved => {
            println!("شکریہ! Thank you for your feedback.");
            println!("Feedback {outcome}.");
            ExitCode::SUCCESS
        }
        _ => {
            let error = flow.machine().error().unwrap_or("Feedback was not sent.");
            eprintln!("{error} ({outcome})");
            ExitCode::FAILURE
        }
    }
}
