//! Terminal client for the contract analysis service.

mod display;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use clauselens::api::{
    AnalysisClient, ContractType, UserProfile, DEFAULT_LANGUAGE, DEFAULT_PAGE_SIZE,
};
use clauselens::config::{load_config, ApiConfig};
use clauselens::pipeline::{prepare_upload, AnalysisPipeline};
use clauselens::storage::{FileBackend, PinStore};
use clauselens::view;

#[derive(Parser)]
#[command(
    name = "clauselens",
    version,
    about = "Contract clause risk analysis client"
)]
struct Cli {
    /// Base URL of the analysis service. Overrides the config file.
    #[arg(long, env = "CLAUSELENS_API_URL", global = true)]
    api_url: Option<String>,

    /// Path to a JSON config file.
    #[arg(long, env = "CLAUSELENS_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a PDF contract and run the full analysis workflow.
    Analyze {
        /// Path to the PDF file (max 10 MiB).
        file: PathBuf,

        /// Contract kind: freelancer, employment, part-time, lease, nda, other.
        #[arg(long)]
        contract_type: ContractType,

        /// Who you are: student, entry-level, freelancer,
        /// individual-business, general-consumer.
        #[arg(long)]
        profile: UserProfile,

        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        language: String,
    },

    /// Show a completed analysis.
    Show {
        analysis_id: String,

        /// Only show pinned clauses.
        #[arg(long)]
        pinned_only: bool,

        /// Print the raw analysis JSON instead of the card view.
        #[arg(long)]
        json: bool,
    },

    /// List past analyses, one page at a time.
    History {
        #[arg(long, default_value_t = 0)]
        page: u32,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u32,
    },

    /// Show an uploaded document's record.
    Document {
        document_id: String,

        /// Include the extracted text.
        #[arg(long)]
        include_text: bool,
    },

    /// List the analyses created for one document.
    Analyses { document_id: String },

    /// Pin a clause as important.
    Pin {
        analysis_id: String,
        clause_id: String,
    },

    /// Remove a pin.
    Unpin {
        analysis_id: String,
        clause_id: String,
    },

    /// List all pinned clauses.
    Pins,

    /// Print negotiation suggestions ready to paste.
    Suggestions {
        analysis_id: String,

        /// Limit to one clause's suggested phrasings.
        #[arg(long)]
        clause: Option<String>,
    },
}

/// Resolved runtime settings: API config plus the local data directory.
struct Settings {
    api: ApiConfig,
    data_directory: Option<PathBuf>,
}

fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    if let Some(path) = &cli.config {
        let mut config = load_config(path)?;
        if let Some(url) = &cli.api_url {
            config.api.base_url = url.clone();
        }
        return Ok(Settings {
            api: config.api,
            data_directory: config.storage.data_directory,
        });
    }

    let url = cli.api_url.clone().context(
        "no API base URL configured: pass --api-url, set CLAUSELENS_API_URL, or use --config",
    )?;
    Ok(Settings {
        api: ApiConfig::new(url),
        data_directory: None,
    })
}

fn open_pin_store(settings: &Settings) -> anyhow::Result<PinStore> {
    let backend = match &settings.data_directory {
        Some(dir) => FileBackend::new(dir),
        None => FileBackend::default_location()?,
    };
    Ok(PinStore::new(Box::new(backend)))
}

fn open_client(settings: &Settings) -> anyhow::Result<AnalysisClient> {
    AnalysisClient::from_config(&settings.api)
        .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {}", e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Route `log` records from the library into tracing, then install
    // the subscriber without re-initializing the bridge.
    tracing_log::LogTracer::init()?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;

    match cli.command {
        Command::Analyze {
            file,
            contract_type,
            profile,
            language,
        } => {
            let upload = match prepare_upload(&file).await {
                Ok(upload) => upload,
                Err(e) => {
                    tracing::debug!("upload rejected: {}", e);
                    anyhow::bail!("{}", e.user_message());
                }
            };

            let pins = open_pin_store(&settings)?;
            let pipeline = AnalysisPipeline::new(open_client(&settings)?);

            println!("분석 중... ({})", upload.file_name);
            let analysis = pipeline
                .run(upload, contract_type, profile, &language)
                .await
                .map_err(|e| anyhow::anyhow!("{}", display::api_error_message(&e)))?;

            if !view::summary_matches_items(&analysis) {
                tracing::warn!(
                    analysis_id = %analysis.analysis_id,
                    "summary counts do not match item labels; displaying the summary as given"
                );
            }

            println!("분석이 완료되었습니다");
            println!();
            display::print_analysis(&analysis, &pins, false);
        }

        Command::Show {
            analysis_id,
            pinned_only,
            json,
        } => {
            let client = open_client(&settings)?;
            let analysis = client
                .get_analysis(&analysis_id)
                .await
                .map_err(|e| anyhow::anyhow!("{}", display::api_error_message(&e)))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                let pins = open_pin_store(&settings)?;
                display::print_analysis(&analysis, &pins, pinned_only);
            }
        }

        Command::History { page, size } => {
            let client = open_client(&settings)?;
            let history = client
                .get_analysis_history(page, size)
                .await
                .map_err(|e| anyhow::anyhow!("{}", display::api_error_message(&e)))?;
            display::print_history(&history, page, size);
        }

        Command::Document {
            document_id,
            include_text,
        } => {
            let client = open_client(&settings)?;
            let document = client
                .get_document(&document_id, include_text)
                .await
                .map_err(|e| anyhow::anyhow!("{}", display::api_error_message(&e)))?;
            display::print_document(&document);
        }

        Command::Analyses { document_id } => {
            let client = open_client(&settings)?;
            let analyses = client
                .get_document_analyses(&document_id)
                .await
                .map_err(|e| anyhow::anyhow!("{}", display::api_error_message(&e)))?;
            if analyses.is_empty() {
                println!("이 문서에 대한 분석이 없습니다");
            }
            for analysis in &analyses {
                display::print_history_card(analysis);
                println!();
            }
        }

        Command::Pin {
            analysis_id,
            clause_id,
        } => {
            let pins = open_pin_store(&settings)?;
            pins.pin(&analysis_id, &clause_id)?;
            println!("핀되었습니다");
        }

        Command::Unpin {
            analysis_id,
            clause_id,
        } => {
            let pins = open_pin_store(&settings)?;
            pins.unpin(&analysis_id, &clause_id)?;
            println!("핀 해제되었습니다");
        }

        Command::Pins => {
            let pins = open_pin_store(&settings)?;
            display::print_pins(&pins.list());
        }

        Command::Suggestions {
            analysis_id,
            clause,
        } => {
            let client = open_client(&settings)?;
            let analysis = client
                .get_analysis(&analysis_id)
                .await
                .map_err(|e| anyhow::anyhow!("{}", display::api_error_message(&e)))?;

            let text = match clause {
                Some(clause_id) => {
                    let item = analysis
                        .items
                        .iter()
                        .find(|item| item.clause_id == clause_id)
                        .with_context(|| format!("no clause '{}' in this analysis", clause_id))?;
                    view::negotiation_clipboard(&item.soft_suggestion)
                }
                None => view::negotiation_clipboard(&analysis.negotiation_suggestions),
            };

            if text.is_empty() {
                println!("협상 제안이 없습니다");
            } else {
                println!("{}", text);
            }
        }
    }

    Ok(())
}
