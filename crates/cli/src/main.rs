use careflow_core::config::fixtures_dir_from_env_value;
use careflow_core::constants::FIXTURES_DIR_ENV;
use careflow_core::outline::{
    build_encounter_outline, build_extraction_outline, visible_items, EncounterState,
    ExtractionState,
};
use careflow_core::transform::CallTransformer;
use careflow_core::{
    CommunicationKind, CoreConfig, FixtureStore, NavigationState, OutlineItem,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "careflow")]
#[command(about = "Care-team inbox outline and navigation CLI")]
struct Cli {
    /// Directory of fixture JSON files (defaults to CAREFLOW_FIXTURES_DIR, then the embedded set)
    #[arg(long, global = true)]
    fixtures_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List communications of one kind
    List {
        /// email, fax, sms or call
        kind: CommunicationKind,
    },
    /// Open a communication and print its outline
    Outline {
        kind: CommunicationKind,
        id: String,
        /// Outline item to select
        #[arg(long)]
        select: Option<String>,
        /// Section to toggle (repeatable, applied in order)
        #[arg(long)]
        toggle: Vec<String>,
        /// Collapse every section before applying toggles
        #[arg(long)]
        collapse_all: bool,
        /// Print the outline tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the ambient-scribe encounter outline for a recording state
    Encounter {
        /// pre-recording, active-recording or post-recording
        state: EncounterState,
        /// Build the outline as if no patient were attached
        #[arg(long)]
        no_patient: bool,
        #[arg(long)]
        json: bool,
    },
    /// Print the document-extraction outline using a communication's attachments
    Extraction {
        /// no-documents, uploading, processing or viewing
        state: ExtractionState,
        kind: CommunicationKind,
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Translate a backend call payload into a call record
    Transform {
        /// JSON file with a single call or a `{"calls": [...]}` list
        file: PathBuf,
        /// The file holds a call list
        #[arg(long)]
        list: bool,
    },
}

/// Drill-down levels of the terminal viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Level {
    Inbox(CommunicationKind),
    Record { kind: CommunicationKind, id: String },
}

/// What the content pane shows.
#[derive(Clone, Debug, PartialEq, Eq)]
enum ContentView {
    Record,
    Item(String),
}

fn breadcrumb(stack: &[Level]) -> String {
    stack
        .iter()
        .map(|level| match level {
            Level::Inbox(kind) => format!("{kind} inbox"),
            Level::Record { kind, id } => format!("{kind} {id}"),
        })
        .collect::<Vec<_>>()
        .join(" > ")
}

fn print_outline(outline: &[OutlineItem], state: &NavigationState<Level, ContentView>) {
    let selected = state.selected_outline_id();
    for row in visible_items(outline, state.collapsed_sections()) {
        let item = row.item;
        let marker = if item.collapsible {
            if row.collapsed {
                "+"
            } else {
                "-"
            }
        } else {
            " "
        };
        let pointer = if selected == Some(item.id.as_str()) { ">" } else { " " };
        let mut line = format!(
            "{pointer}{}{marker} {} <{}>",
            "  ".repeat(row.depth),
            item.label,
            item.icon.as_str()
        );
        if let Some(count) = item.count {
            line.push_str(&format!(" ({count})"));
        }
        if let Some(status) = item.status {
            line.push_str(&format!(" [{}]", status.as_str()));
        }
        println!("{line}");
    }
}

fn print_tree(outline: &[OutlineItem], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(outline)?);
    } else {
        print_outline(outline, &NavigationState::new());
    }
    Ok(())
}

fn load_store(fixtures_dir: Option<PathBuf>) -> Result<FixtureStore, Box<dyn std::error::Error>> {
    let fixtures_dir = fixtures_dir
        .or_else(|| fixtures_dir_from_env_value(std::env::var(FIXTURES_DIR_ENV).ok()));
    let cfg = CoreConfig::new(fixtures_dir)?;
    Ok(FixtureStore::from_config(&cfg)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List { kind }) => {
            let store = load_store(cli.fixtures_dir)?;
            let records = store.list(kind);
            if records.is_empty() {
                println!("No {kind} records found.");
            } else {
                for record in records {
                    let patient = record
                        .patient()
                        .map(|p| p.name.as_str())
                        .unwrap_or("No patient");
                    println!(
                        "{} ID: {}, Patient: {}, {}",
                        record.kind(),
                        record.id(),
                        patient,
                        record.headline()
                    );
                }
            }
        }
        Some(Commands::Outline {
            kind,
            id,
            select,
            toggle,
            collapse_all,
            json,
        }) => {
            let store = load_store(cli.fixtures_dir)?;
            let record = store.get(kind, &id)?;

            let mut state: NavigationState<Level, ContentView> = NavigationState::new();
            state.push(Level::Inbox(kind));
            state.push(Level::Record {
                kind,
                id: record.id().to_string(),
            });
            state.load_outline(record.build_outline());
            state.set_content_view(ContentView::Record);

            if collapse_all {
                state.collapse_all();
            }
            for section in toggle {
                state.toggle_section(section);
            }
            if let Some(item_id) = select {
                state.select_outline_item(item_id.clone());
                if state.selected_item().is_none() {
                    eprintln!("No outline item {item_id} in {kind} {id}.");
                }
                state.set_content_view(ContentView::Item(item_id));
            }

            if json {
                println!("{}", serde_json::to_string_pretty(state.outline())?);
                return Ok(());
            }

            println!("{}", breadcrumb(state.stack()));
            println!();
            print_outline(state.outline(), &state);
            if let Some(ContentView::Item(item_id)) = state.content_view() {
                if let Some(item) = state.selected_item() {
                    println!();
                    println!("Selected: {} ({item_id})", item.label);
                }
            }
        }
        Some(Commands::Encounter {
            state,
            no_patient,
            json,
        }) => {
            let store = load_store(cli.fixtures_dir)?;
            let encounter = if no_patient {
                store.encounter().without_patient()
            } else {
                store.encounter().clone()
            };
            println!("Encounter: {}", state.as_str());
            print_tree(&build_encounter_outline(state, &encounter), json)?;
        }
        Some(Commands::Extraction {
            state,
            kind,
            id,
            json,
        }) => {
            let store = load_store(cli.fixtures_dir)?;
            let record = store.get(kind, &id)?;
            let documents: Vec<_> = if state == ExtractionState::NoDocuments {
                Vec::new()
            } else {
                record.documents().into_iter().cloned().collect()
            };
            println!("Extraction: {}", state.as_str());
            print_tree(&build_extraction_outline(state, &documents), json)?;
        }
        Some(Commands::Transform { file, list }) => {
            let payload = std::fs::read_to_string(&file)?;
            let calls = if list {
                CallTransformer::list_from_json(&payload)?
            } else {
                vec![CallTransformer::from_json(&payload)?]
            };
            println!("{}", serde_json::to_string_pretty(&calls)?);
        }
        None => {
            println!("Use 'careflow --help' for commands");
        }
    }

    Ok(())
}
