use crate::middleware::signature::InteractionVerifier;
use crate::service::tally_service::TallyService;
use std::sync::Arc;

#[derive(Clone)]
pub struct TallyState {
    pub tally_service: Arc<TallyService>,
    pub verifier: InteractionVerifier,
}

impl TallyState {
    pub fn new(tally_service: &Arc<TallyService>, verifier: InteractionVerifier) -> Self {
        Self {
            tally_service: Arc::clone(tally_service),
            verifier,
        }
    }
}
