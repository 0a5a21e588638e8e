use anyhow::Context;
use axum::{
    extract::{Form, State},
    Json,
};
use http::StatusCode;
use serde::Deserialize;
use sqlx::PgPool;

use crate::domain::{FieldErrors, NewSubscriber, SubmissionResult};
use crate::routes::error_chain_fmt;
use crate::startup::AppState;

// A missing key is treated like an empty input so it fails validation
// instead of being rejected by the extractor.
#[derive(Deserialize, Debug, Default)]
pub struct FormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl TryFrom<FormData> for NewSubscriber {
    type Error = FieldErrors;

    fn try_from(value: FormData) -> Result<Self, Self::Error> {
        NewSubscriber::parse(value.name, value.email)
    }
}

#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("Validation failed: {0}")]
    ValidationError(FieldErrors),
    #[error(transparent)]
    StorageError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl SubscribeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SubscribeError> for SubmissionResult {
    fn from(e: SubscribeError) -> Self {
        match e {
            SubscribeError::ValidationError(errors) => SubmissionResult::invalid(errors),
            // The cause chain is logged by `into_submission_result`, the
            // caller only gets the generic message.
            SubscribeError::StorageError(_) => SubmissionResult::storage_failure(),
        }
    }
}

/// Validate a submission and, if it is valid, store it.
///
/// Each call is independent: nothing is carried over from earlier
/// submissions and no row is written unless every field passed.
#[tracing::instrument(
    name = "Handling a subscription form submission",
    skip(form_data, pool),
    fields(
        name = %form_data.name,
        email = %form_data.email,
    )
)]
pub async fn handle_submission(
    pool: &PgPool,
    form_data: FormData,
) -> Result<NewSubscriber, SubscribeError> {
    let new_subscriber: NewSubscriber = form_data
        .try_into()
        .map_err(SubscribeError::ValidationError)?;
    insert_subscriber(pool, &new_subscriber)
        .await
        .context("Failed to insert new subscriber in the database.")?;
    Ok(new_subscriber)
}

/// Turn the outcome of [`handle_submission`] into the status and state sent
/// back to the page.
pub fn into_submission_result(
    outcome: Result<NewSubscriber, SubscribeError>,
) -> (StatusCode, SubmissionResult) {
    match outcome {
        Ok(subscriber) => (StatusCode::OK, SubmissionResult::subscribed(&subscriber)),
        Err(e) => {
            if let SubscribeError::StorageError(_) = e {
                tracing::error!(error.cause_chain = ?e, "Failed to subscribe");
            }
            (e.status_code(), e.into())
        }
    }
}

// POST /subscriptions: the same action as the page form, answered as JSON.
pub async fn subscribe(
    State(state): State<AppState>,
    Form(form_data): Form<FormData>,
) -> (StatusCode, Json<SubmissionResult>) {
    let outcome = handle_submission(&state.db_pool, form_data).await;
    let (status, result) = into_submission_result(outcome);
    (status, Json(result))
}

#[tracing::instrument(
    name = "Saving new subscriber details in the database",
    skip(new_subscriber, pool)
)]
pub async fn insert_subscriber(
    pool: &PgPool,
    new_subscriber: &NewSubscriber,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO subscribers (name, email)
        VALUES ($1, $2)
        "#,
    )
    .bind(new_subscriber.name.as_ref())
    .bind(new_subscriber.email.as_ref())
    .execute(pool)
    .await?;
    Ok(())
}
