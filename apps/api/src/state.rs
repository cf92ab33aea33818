use std::sync::Arc;

use crate::analysis::repo::AnalysisRepo;
use crate::config::Config;
use crate::documents::DocumentDecoder;
use crate::storage::ObjectStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. The collaborators sit behind trait objects so alternate
/// backends (local filesystem store, different decoders, test mocks) can
/// be substituted without touching the matching engine.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn AnalysisRepo>,
    pub store: Arc<dyn ObjectStore>,
    pub decoder: Arc<dyn DocumentDecoder>,
    pub config: Config,
}
