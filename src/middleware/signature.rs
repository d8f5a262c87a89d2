use crate::error::request_error::RequestError;
use crate::state::tally_state::TallyState;
use axum::extract::State;
use axum::{
    body::Body, extract::Request, http::HeaderMap, middleware::Next, response::IntoResponse,
};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use http_body_util::BodyExt;

/// 平台对 `timestamp || body` 做 Ed25519 签名，放在这两个请求头里
const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";
const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

// middleware
pub async fn interaction_signature_verify(
    State(state): State<TallyState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, RequestError> {
    let signature = header_str(&headers, SIGNATURE_HEADER)?;
    let timestamp = header_str(&headers, TIMESTAMP_HEADER)?;
    // 提取body进行签名验证
    let request = buffer_request_body(&state.verifier, &signature, &timestamp, request).await?;
    Ok(next.run(request).await)
}

fn header_str(headers: &HeaderMap, name: &str) -> Result<String, RequestError> {
    match headers.get(name) {
        Some(value) => value
            .to_str()
            .map(|value| value.to_owned())
            .map_err(|_| RequestError::SignatureError),
        None => Err(RequestError::SignatureError),
    }
}

async fn buffer_request_body(
    verifier: &InteractionVerifier,
    signature: &str,
    timestamp: &str,
    request: Request,
) -> Result<Request, RequestError> {
    let (parts, body) = request.into_parts();
    // this wont work if the body is an long running stream
    let bytes = body
        .collect()
        .await
        .map_err(|err| {
            tracing::error!("req body get error,error:{}", err.to_string());
            RequestError::SignatureError
        })?
        .to_bytes();

    if !verifier.verify(timestamp, &bytes, signature) {
        return Err(RequestError::SignatureError);
    }
    Ok(Request::from_parts(parts, Body::from(bytes)))
}

/// 持有应用公钥，对单次请求做校验
#[derive(Clone)]
pub struct InteractionVerifier {
    key: VerifyingKey,
}

impl InteractionVerifier {
    /// 从hex公钥构造
    pub fn from_hex(public_key_hex: &str) -> Result<Self, String> {
        let bytes = hex::decode(public_key_hex).map_err(|err| err.to_string())?;
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| "public key must be 32 bytes".to_string())?;
        let key = VerifyingKey::from_bytes(&array).map_err(|err| err.to_string())?;
        Ok(Self { key })
    }

    pub fn verify(&self, timestamp: &str, body: &[u8], signature_hex: &str) -> bool {
        let signature_bytes = match hex::decode(signature_hex) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let signature_array: [u8; 64] = match signature_bytes.try_into() {
            Ok(array) => array,
            Err(_) => return false,
        };
        let signature = Signature::from_bytes(&signature_array);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);
        self.key.verify(&message, &signature).is_ok()
    }
}
