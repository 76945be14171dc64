pub mod cli;
pub mod extractor;
pub mod fetcher;
pub mod logging;
pub mod pipeline;
pub mod run;
pub mod search;

pub use cli::{handle_command, PipelineArgs, PipelineCommands};
pub use extractor::Extractor;
pub use fetcher::Fetcher;
pub use logging::{init_logging, Logger};
pub use pipeline::{Pipeline, PipelineConfig};
pub use run::{PipelineRun, RunState};
pub use search::{NaverSearch, NewsSearch, StaticLinks};

pub mod prelude {
    pub use super::pipeline::{Pipeline, PipelineConfig};
    pub use super::run::{PipelineRun, RunState};
    pub use super::search::NewsSearch;
    pub use nb_core::{Error, FinalArticle, Report, Result, SearchQuery};
}
