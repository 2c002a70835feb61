use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;
use log::{info, error, debug};

use crate::agent::prompt;
use crate::error::RouterError;
use crate::web::auth;
use crate::web::envelope;
use crate::web::models::ChatPayload;
use crate::AppState;

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "ok": true }))
}

// OpenAI-style chat completions, fulfilled by one agent run
pub async fn chat_completions(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, RouterError> {
    let request_id = Uuid::new_v4();

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if let Err(e) = auth::authorize(data.token.as_deref(), header) {
        info!("[{}] Rejected unauthorized chat request", request_id);
        return Err(e);
    }

    let payload: ChatPayload = serde_json::from_slice(&body)
        .map_err(|e| RouterError::MalformedRequest(format!("invalid JSON body: {}", e)))?;
    let chat = payload.validate()?;

    if chat.stream {
        info!("[{}] Rejected stream=true request", request_id);
        return Err(RouterError::UnsupportedFeature);
    }

    info!(
        "[{}] Chat request with {} message(s), model: {:?}",
        request_id,
        chat.messages.len(),
        chat.model
    );

    let prompt = prompt::compile(&chat.messages);
    debug!("[{}] Prompt: {}", request_id, prompt.as_str());

    let executor = &data.executor;
    let model = executor
        .effective_model(chat.model.as_deref())
        .unwrap_or_default();

    let outcome = executor
        .run(prompt, chat.model.as_deref())
        .await
        .map_err(|e| {
            error!("[{}] Agent invocation failed: {:#}", request_id, e);
            RouterError::from(e)
        })?;

    match envelope::build(outcome, model, &executor.settings().binary) {
        Ok(response) => {
            info!(
                "[{}] Response length: {} characters",
                request_id,
                response.choices[0].message.content.chars().count()
            );
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            error!("[{}] Agent error: {}", request_id, e);
            Err(e)
        }
    }
}
