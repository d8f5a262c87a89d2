use crate::{handler::interaction_handler, state::tally_state::TallyState};
use axum::{routing::post, Router};

pub fn routes() -> Router<TallyState> {
    let router = Router::new().route("/interactions", post(interaction_handler::interaction));
    return router;
}
