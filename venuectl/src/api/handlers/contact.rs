use crate::AppState;
use crate::api::models::contact::{ContactMessageCreate, ContactMessageResponse};
use crate::api::models::validation::ApiJson;
use crate::contact::submit_message;
use crate::errors::Result;
use axum::{Json, extract::State, http::StatusCode};

#[utoipa::path(
    post,
    path = "/contact",
    tag = "contact",
    summary = "Send a contact message",
    request_body = ContactMessageCreate,
    responses(
        (status = 201, description = "Message stored", body = ContactMessageResponse),
        (status = 400, description = "One or more fields failed validation", body = crate::errors::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_contact_message(
    State(state): State<AppState>,
    ApiJson(create): ApiJson<ContactMessageCreate>,
) -> Result<(StatusCode, Json<ContactMessageResponse>)> {
    let message = submit_message(state.store.as_ref(), create).await?;
    Ok((StatusCode::CREATED, Json(ContactMessageResponse::from(message))))
}

#[cfg(test)]
mod tests {
    use crate::db::store::Store;
    use crate::test_utils::create_test_app;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    #[test_log::test(tokio::test)]
    async fn test_contact_message_is_stored() {
        let (server, store) = create_test_app().await;

        let response = server
            .post("/api/contact")
            .json(&json!({"name": "Jane", "email": "jane@example.com", "message": "Hello from space!"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["name"], "Jane");
        assert!(body.get("createdAt").is_some());

        let stored = store.list_contact_messages().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id.to_string(), body["id"].as_str().unwrap());
        assert_eq!(stored[0].name, "Jane");
        assert_eq!(stored[0].email, "jane@example.com");
        assert_eq!(stored[0].message, "Hello from space!");
    }

    #[test_log::test(tokio::test)]
    async fn test_short_message_rejected() {
        let (server, store) = create_test_app().await;

        let response = server
            .post("/api/contact")
            .json(&json!({"name": "Jane", "email": "jane@example.com", "message": "Hi"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["errors"][0]["field"], "message");

        assert!(store.list_contact_messages().await.unwrap().is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_missing_field_is_bad_request() {
        let (server, _) = create_test_app().await;

        let response = server
            .post("/api/contact")
            .json(&json!({"name": "Jane", "message": "Hello from space!"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["errors"][0]["field"], "email");
    }
}
