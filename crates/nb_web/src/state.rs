use nb_scrapers::Pipeline;

/// Shared by every request. Runs live only for the length of a request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }
}
