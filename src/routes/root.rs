use crate::middleware::signature::interaction_signature_verify;
use crate::routes::interactions;
use crate::state::tally_state::TallyState;

use axum::routing::{get, IntoMakeService};
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

pub fn routes(tally_state: TallyState) -> IntoMakeService<Router> {
    let merged_router = {
        Router::new()
            .merge(
                interactions::routes()
                    .layer(middleware::from_fn_with_state(
                        tally_state.clone(),
                        interaction_signature_verify,
                    ))
                    .with_state(tally_state.clone()),
            )
            .merge(Router::new().route("/health", get(|| async move { "Healthy..." })))
    };

    let app_router = Router::new()
        .nest("/api", merged_router)
        .layer(TraceLayer::new_for_http());

    app_router.into_make_service()
}
