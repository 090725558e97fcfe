use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::conversation::MessageEntry;
use crate::rephrase::Category;
use crate::server::AppState;
use crate::server::error::ApiError;

/// Body of `POST /send-message`
///
/// Every field is optional at the parsing stage so that a missing field
/// produces "Missing required fields" rather than a parser error.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Preset key such as "positive"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-text system instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_prompt: Option<String>,
}

/// Body returned by a successful `POST /send-message`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub sender: String,
    pub recipient: String,
    /// Rephrased text
    pub message: String,
    /// Same as `message`
    pub phrased_message: String,
    pub original_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_prompt: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConversationQuery {
    pub user1: Option<String>,
    pub user2: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RestartResponse {
    pub message: String,
    pub timestamp: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn send_message_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

    let (Some(sender), Some(recipient), Some(original)) = (
        non_empty(request.sender),
        non_empty(request.recipient),
        non_empty(request.message),
    ) else {
        return Err(ApiError::MissingFields);
    };

    let category = Category::from_request(
        request.category.as_deref(),
        request.category_prompt.as_deref(),
        state.allow_freeform_prompts,
    );

    let outcome = state.rephraser.rephrase(&original, &category).await;
    let fell_back = outcome.is_fallback();
    let phrased = outcome.into_text();

    let entry = MessageEntry::new(
        sender.clone(),
        recipient.clone(),
        phrased.clone(),
        original.clone(),
        &category,
    );

    state
        .store
        .append(entry)
        .await
        .map_err(|e| ApiError::SendFailed(e.to_string()))?;

    info!(
        sender = %sender,
        recipient = %recipient,
        category = %category,
        fallback = fell_back,
        "Message delivered"
    );

    Ok(Json(SendMessageResponse {
        sender,
        recipient,
        message: phrased.clone(),
        phrased_message: phrased,
        original_message: original,
        category: category.key().map(str::to_string),
        category_prompt: category.freeform_prompt().map(str::to_string),
    }))
}

pub async fn conversation_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ConversationQuery>, QueryRejection>,
) -> Result<Json<Vec<MessageEntry>>, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::MissingUsers)?;

    let (Some(user1), Some(user2)) = (non_empty(query.user1), non_empty(query.user2)) else {
        return Err(ApiError::MissingUsers);
    };

    let entries = state
        .store
        .conversation(&user1, &user2)
        .await
        .map_err(|e| ApiError::FetchFailed(e.to_string()))?;

    tracing::debug!("Conversation {user1} <-> {user2}: {} entries", entries.len());

    Ok(Json(entries))
}

pub async fn restart_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RestartResponse>, ApiError> {
    let trigger = state
        .reload
        .as_ref()
        .ok_or_else(|| ApiError::RestartFailed("no reload trigger configured".into()))?;

    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    trigger
        .trigger_reload()
        .await
        .map_err(|e| ApiError::RestartFailed(e.to_string()))?;

    info!(trigger = trigger.name(), "Restart initiated");

    Ok(Json(RestartResponse {
        message: "Restart initiated".to_string(),
        timestamp,
    }))
}
