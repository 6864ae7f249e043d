//! Firestore REST client.
//!
//! A create is one write in a `documents:commit` request:
//!
//! ```json
//! {"writes": [{
//!   "update": {"name": "projects/P/databases/D/documents/certificates/ID", "fields": {…}},
//!   "updateTransforms": [{"fieldPath": "createdAt", "setToServerValue": "REQUEST_TIME"}],
//!   "currentDocument": {"exists": false}
//! }]}
//! ```
//!
//! The document ID is generated client-side so `currentDocument.exists = false`
//! turns the write into a create. `ServerTimestamp` fields never appear in
//! `fields`; they become `REQUEST_TIME` transforms, so the timestamp comes from
//! the database clock.

use portfolio::config::DatabaseConfig;
use portfolio::{AuthError, DocumentRef, DocumentStore, FieldValue, NewDocument, PersistError};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::auth::FirebaseAuth;
use crate::remote::failure_message;

/// Encode one field in Firestore's typed-value JSON.
fn encode(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null | FieldValue::ServerTimestamp => json!({ "nullValue": null }),
        FieldValue::String(s) => json!({ "stringValue": s }),
        FieldValue::Bool(b) => json!({ "booleanValue": b }),
        FieldValue::Array(values) if values.is_empty() => json!({ "arrayValue": {} }),
        FieldValue::Array(values) => {
            json!({ "arrayValue": { "values": values.iter().map(encode).collect::<Vec<_>>() } })
        }
    }
}

#[derive(Clone)]
pub struct FirestoreClient {
    http: Client,
    config: DatabaseConfig,
    auth: FirebaseAuth,
}

impl FirestoreClient {
    pub fn new(http: Client, config: DatabaseConfig, auth: FirebaseAuth) -> Self {
        Self { http, config, auth }
    }

    fn documents_path(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.config.project_id, self.config.database
        )
    }

    fn commit_body(&self, doc: &NewDocument, id: &str) -> Value {
        let mut fields = Map::new();
        let mut transforms = Vec::new();
        for (name, value) in &doc.fields {
            if *value == FieldValue::ServerTimestamp {
                transforms.push(json!({ "fieldPath": name, "setToServerValue": "REQUEST_TIME" }));
            } else {
                fields.insert(name.clone(), encode(value));
            }
        }

        json!({
            "writes": [{
                "update": {
                    "name": format!("{}/{}/{id}", self.documents_path(), doc.collection),
                    "fields": fields,
                },
                "updateTransforms": transforms,
                "currentDocument": { "exists": false },
            }]
        })
    }

    async fn commit(&self, body: &Value, id_token: &str) -> Result<Response, PersistError> {
        let url = format!("{}/{}:commit", self.config.base_url, self.documents_path());
        self.http
            .post(url)
            .bearer_auth(id_token)
            .json(body)
            .send()
            .await
            .map_err(|e| PersistError::Network(e.to_string()))
    }
}

impl DocumentStore for FirestoreClient {
    async fn create(&self, doc: NewDocument) -> Result<DocumentRef, PersistError> {
        let token = self.auth.id_token().ok_or(PersistError::Unauthenticated)?;
        let id = Uuid::new_v4().simple().to_string();
        let body = self.commit_body(&doc, &id);

        let mut response = self.commit(&body, &token).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::debug!("ID token rejected, refreshing");
            let token = self
                .auth
                .refresh_id_token()
                .await
                .map_err(|err| match err {
                    AuthError::Network(e) => PersistError::Network(e),
                    _ => PersistError::Unauthenticated,
                })?;
            response = self.commit(&body, &token).await?;
        }

        match response.status() {
            status if status.is_success() => {
                tracing::info!("created {}/{id}", doc.collection);
                Ok(DocumentRef {
                    collection: doc.collection.to_string(),
                    id,
                })
            }
            StatusCode::UNAUTHORIZED => Err(PersistError::Unauthenticated),
            _ => Err(PersistError::Rejected(failure_message(response).await)),
        }
    }
}
