use crate::discord::types::{custom_ids, interaction_type, Interaction};
use crate::dto::submission::parse_quantity;
use crate::error::{api_error::ApiError, request_error::RequestError};
use crate::response::interaction_response::InteractionCallback;
use crate::state::tally_state::TallyState;
use crate::utils::clock;
use axum::{extract::State, Json};
use axum_macros::debug_handler;

/// 平台交互回调的唯一入口，签名校验在中间件里完成
#[debug_handler]
pub async fn interaction(
    State(state): State<TallyState>,
    Json(payload): Json<Interaction>,
) -> Result<Json<InteractionCallback>, ApiError> {
    match payload.kind {
        interaction_type::PING => Ok(Json(InteractionCallback::pong())),
        interaction_type::MESSAGE_COMPONENT => open_form(&payload),
        interaction_type::MODAL_SUBMIT => submit(&state, &payload).await,
        other => Err(RequestError::CommonError(format!(
            "unsupported interaction type:{other}"
        )))?,
    }
}

// 按钮只有一个：弹出数量表单
fn open_form(payload: &Interaction) -> Result<Json<InteractionCallback>, ApiError> {
    match payload.custom_id() {
        Some(custom_ids::SUBMIT_BUTTON) => Ok(Json(InteractionCallback::quantity_modal())),
        other => Err(RequestError::CommonError(format!(
            "unknown component:{:?}",
            other
        )))?,
    }
}

async fn submit(
    state: &TallyState,
    payload: &Interaction,
) -> Result<Json<InteractionCallback>, ApiError> {
    if payload.custom_id() != Some(custom_ids::SUBMIT_MODAL) {
        Err(RequestError::CommonError(format!(
            "unknown modal:{:?}",
            payload.custom_id()
        )))?
    }

    let raw = payload
        .field_value(custom_ids::QUANTITY_INPUT)
        .unwrap_or_default();
    let delta = match parse_quantity(raw) {
        Ok(delta) => delta,
        Err(_) => {
            return Ok(Json(InteractionCallback::ephemeral(
                "❌ Enter a whole number greater than 0.",
            )))
        }
    };

    let (user_id, display_name) = payload.submitter().ok_or_else(|| {
        RequestError::CommonError("interaction carries no submitter identity".to_string())
    })?;

    match state
        .tally_service
        .record(user_id, &display_name, clock::today(), delta)
        .await
    {
        Ok(new_total) => Ok(Json(InteractionCallback::ephemeral(format!(
            "✅ Recorded {delta}. Your total today is {new_total}."
        )))),
        Err(err) => {
            // 存储故障要明确告知提交者，不能当成当日首次提交
            tracing::error!("submit record - user_id:{} | err:{}", user_id, err.to_string());
            Ok(Json(InteractionCallback::ephemeral(
                "⚠️ Could not save your submission, please try again.",
            )))
        }
    }
}
