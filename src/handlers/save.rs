//! Login data intake endpoint.
//! Used by: server.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::state::AppState;
use crate::store::CredentialRecord;

pub const STORED_MESSAGE: &str = "Login data stored successfully!";

/// Both fields are optional at the wire level; presence is checked after decoding.
#[derive(Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Only a JSON object is a request. Derived `Deserialize` would also take
/// the positional array form of the struct.
fn decode_request(body: Value) -> Result<SaveRequest> {
    match body {
        Value::Object(map) => serde_json::from_value(Value::Object(map))
            .map_err(|_| Error::MalformedBody("email and password must be strings".into())),
        _ => Err(Error::MalformedBody("body must be a JSON object".into())),
    }
}

/// Missing, `null` and empty values are all treated as absent.
fn validate_request(req: SaveRequest) -> Result<CredentialRecord> {
    match (req.email, req.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok(CredentialRecord { email, password })
        }
        _ => Err(Error::MissingCredentials),
    }
}

fn reject_body(state: &AppState, rejection: JsonRejection) -> Error {
    tracing::debug!(reason = %rejection.body_text(), "save body rejected");
    match rejection {
        JsonRejection::MissingJsonContentType(r) => {
            crate::console::log_rejected("content type is not JSON");
            Error::UnsupportedMediaType(r.body_text())
        }
        other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            crate::console::log_rejected("body too large");
            Error::PayloadTooLarge
        }
        other => {
            state.metrics.record_malformed();
            crate::console::log_rejected("malformed body");
            Error::MalformedBody(other.body_text())
        }
    }
}

pub async fn save(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<super::MessageResponse>> {
    state.increment_requests();
    let Json(body) = payload.map_err(|rejection| reject_body(&state, rejection))?;

    let req = decode_request(body).map_err(|err| {
        state.metrics.record_malformed();
        crate::console::log_rejected("malformed body");
        err
    })?;

    let record = validate_request(req).map_err(|err| {
        state.metrics.record_rejected();
        crate::console::log_rejected("email or password missing");
        err
    })?;

    let store = state.store().map_err(|err| {
        state.metrics.record_unavailable();
        crate::console::log_unavailable();
        err
    })?;

    let record = CredentialRecord {
        password: state.password_policy.apply(&record.password)?,
        ..record
    };

    if let Err(err) = store.insert(&record).await {
        state.metrics.record_store_failure();
        crate::console::log_store_failure(&err.to_string());
        return Err(err);
    }

    tracing::info!(email = %record.email, backend = store.backend(), "login data stored");
    crate::console::log_stored(&record.email, store.backend());
    state.metrics.record_stored();
    Ok(Json(super::MessageResponse { message: STORED_MESSAGE.into() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use crate::password::PasswordPolicy;
    use crate::state::{build_state_with, build_test_state};
    use crate::store::sqlite::SqliteStore;
    use crate::store::CredentialStore;

    fn req(email: Option<&str>, password: Option<&str>) -> SaveRequest {
        SaveRequest {
            email: email.map(Into::into),
            password: password.map(Into::into),
        }
    }

    #[test]
    fn both_fields_pass() {
        let record = validate_request(req(Some("a@b.com"), Some("x"))).ok();
        assert_eq!(
            record,
            Some(CredentialRecord { email: "a@b.com".into(), password: "x".into() })
        );
    }

    #[test]
    fn missing_email_rejected() {
        assert!(matches!(
            validate_request(req(None, Some("x"))),
            Err(Error::MissingCredentials)
        ));
    }

    #[test]
    fn missing_password_rejected() {
        assert!(validate_request(req(Some("a@b.com"), None)).is_err());
    }

    #[test]
    fn empty_strings_rejected() {
        assert!(validate_request(req(Some(""), Some("x"))).is_err());
        assert!(validate_request(req(Some("a@b.com"), Some(""))).is_err());
        assert!(validate_request(req(Some(""), Some(""))).is_err());
    }

    #[test]
    fn whitespace_is_kept_verbatim() {
        let record = validate_request(req(Some(" "), Some(" pw "))).ok();
        assert_eq!(
            record,
            Some(CredentialRecord { email: " ".into(), password: " pw ".into() })
        );
    }

    #[test]
    fn nulls_decode_as_absent() -> Result<()> {
        let parsed = decode_request(json!({"email": null, "password": "x"}))?;
        assert!(validate_request(parsed).is_err());
        Ok(())
    }

    #[test]
    fn unknown_fields_are_ignored() -> Result<()> {
        let parsed = decode_request(json!({"email": "a@b.com", "password": "x", "remember": true}))?;
        assert!(validate_request(parsed).is_ok());
        Ok(())
    }

    #[test]
    fn arrays_are_not_requests() {
        assert!(matches!(
            decode_request(json!(["a@b.com", "x"])),
            Err(Error::MalformedBody(_))
        ));
        assert!(matches!(decode_request(json!([])), Err(Error::MalformedBody(_))));
    }

    #[test]
    fn scalars_are_not_requests() {
        assert!(matches!(decode_request(Value::Null), Err(Error::MalformedBody(_))));
        assert!(matches!(decode_request(json!("a@b.com")), Err(Error::MalformedBody(_))));
    }

    #[test]
    fn non_string_fields_are_malformed() {
        assert!(matches!(
            decode_request(json!({"email": 5, "password": "x"})),
            Err(Error::MalformedBody(_))
        ));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLog {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().expect("log buffer")).into_owned()
        }
    }

    #[tokio::test]
    async fn logs_carry_email_but_never_password() -> Result<()> {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let state = build_test_state()?;
        save(
            State(state.clone()),
            Ok(Json(json!({"email": "a@b.com", "password": "s3cr3t-pw"}))),
        )
        .await?;
        let rejected = save(
            State(state),
            Ok(Json(json!({"email": "", "password": "other-s3cr3t"}))),
        )
        .await;
        assert!(matches!(rejected, Err(Error::MissingCredentials)));

        let text = log.text();
        assert!(text.contains("login data stored"));
        assert!(text.contains("a@b.com"));
        assert!(!text.contains("s3cr3t-pw"));
        assert!(!text.contains("other-s3cr3t"));
        Ok(())
    }

    #[tokio::test]
    async fn hashed_save_log_omits_password() -> Result<()> {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let store = SqliteStore::open_in_memory()?;
        let state = build_state_with(Some(CredentialStore::Sqlite(store)), PasswordPolicy::Argon2);
        save(
            State(state),
            Ok(Json(json!({"email": "a@b.com", "password": "s3cr3t-pw"}))),
        )
        .await?;

        assert!(!log.text().contains("s3cr3t-pw"));
        Ok(())
    }
}
