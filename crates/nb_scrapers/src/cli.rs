use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use nb_core::config::EXPORT_FILE_NAME;
use nb_core::{Report, Result, SearchQuery};
use tracing::info;

use crate::pipeline::Pipeline;
use crate::run::PipelineRun;

#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    #[command(subcommand)]
    pub command: PipelineCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PipelineCommands {
    /// Search three keywords and print the deduplicated report
    Report {
        /// Exactly three search keywords
        #[arg(num_args = 3, required = true)]
        keywords: Vec<String>,
        /// Also save the report to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write the final article from a saved report
    Article {
        /// Report file written by `report --out`
        #[arg(long)]
        report: PathBuf,
        /// Opening sentence, longer than ten characters
        #[arg(long)]
        lead: String,
        #[arg(long, default_value = EXPORT_FILE_NAME)]
        out: PathBuf,
    },
    /// Search, build the report and write the article in one go
    Run {
        /// Exactly three search keywords
        #[arg(num_args = 3, required = true)]
        keywords: Vec<String>,
        /// Opening sentence, longer than ten characters
        #[arg(long)]
        lead: String,
        #[arg(long, default_value = EXPORT_FILE_NAME)]
        out: PathBuf,
    },
}

pub async fn handle_command(args: PipelineArgs, pipeline: &Pipeline) -> Result<()> {
    match args.command {
        PipelineCommands::Report { keywords, out } => {
            let query = SearchQuery::try_from(keywords)?;
            let mut run = PipelineRun::new();
            let report = run.collect(pipeline, &query).await?;
            println!("{}", report);
            if let Some(path) = out {
                tokio::fs::write(&path, report.joined()).await?;
                info!("💾 Report saved to {}", path.display());
            }
        }
        PipelineCommands::Article { report, lead, out } => {
            let text = tokio::fs::read_to_string(&report).await?;
            let mut run = PipelineRun::from_report(Report::from_joined(&text));
            write_article(&mut run, pipeline, lead, &out).await?;
        }
        PipelineCommands::Run { keywords, lead, out } => {
            let query = SearchQuery::try_from(keywords)?;
            let mut run = PipelineRun::new();
            let report = run.collect(pipeline, &query).await?;
            println!("{}\n", report);
            write_article(&mut run, pipeline, lead, &out).await?;
        }
    }
    Ok(())
}

async fn write_article(run: &mut PipelineRun, pipeline: &Pipeline, lead: String, out: &Path) -> Result<()> {
    run.set_lead(lead)?;
    let article = run.synthesize(pipeline).await?;
    println!("{}", article);
    run.export(out).await?;
    info!("💾 Article saved to {}", out.display());
    Ok(())
}
