use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use nb_core::{HttpClient, ReqwestClient, Result, RetryPolicy};
use nb_inference::{create_model, ModelKind, PromptTemplateSet, DEFAULT_BASE_URL};
use nb_scrapers::cli::{handle_command, PipelineArgs, PipelineCommands};
use nb_scrapers::{init_logging, Extractor, Fetcher, NaverSearch, Pipeline, PipelineConfig};
use nb_web::{create_app, AppState};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "newsbot", author, version, about = "Turns three keywords into a news article", long_about = None)]
pub struct Cli {
    /// Generation backend
    #[arg(long, value_enum, default_value_t = ModelKind::OpenAi, global = true)]
    model: ModelKind,
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API
    #[arg(long, default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,
    /// Language of the prompts sent to the model
    #[arg(long, value_enum, default_value_t = PromptTemplateSet::Korean, global = true)]
    templates: PromptTemplateSet,
    /// Keep segments that repeat an earlier one
    #[arg(long, global = true)]
    no_segment_dedup: bool,
    /// Ask the model to delete repeated material from the report
    #[arg(long, global = true)]
    merge_with_model: bool,
    #[arg(long, default_value = "info", global = true)]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Pipeline(PipelineCommands),
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::default()
            .with_segment_dedup(!self.no_segment_dedup)
            .with_merge_with_model(self.merge_with_model)
            .with_prompt_templates(self.templates)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let http: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new()?);
    let config = nb_inference::Config {
        api_key: cli.api_key.clone(),
        base_url: cli.base_url.clone(),
        ..nb_inference::Config::default()
    };
    let model = create_model(cli.model, config, http.clone())?;
    info!("🧠 Generation model initialized (using {})", model.name());

    let fetcher = Fetcher::new(http, RetryPolicy::default());
    let search = Arc::new(NaverSearch::new(fetcher.clone())?);
    let pipeline = Pipeline::new(search, fetcher, Extractor::naver()?, model, cli.pipeline_config());

    match cli.command {
        Commands::Pipeline(command) => {
            handle_command(PipelineArgs { command }, &pipeline).await?;
        }
        Commands::Serve { addr } => {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("🌐 Listening on http://{}", addr);
            axum::serve(listener, create_app(AppState::new(pipeline))).await?;
        }
    }

    Ok(())
}
