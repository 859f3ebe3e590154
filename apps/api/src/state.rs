use crate::config::Config;
use crate::roast::generator::RoastGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub roaster: RoastGenerator,
}
