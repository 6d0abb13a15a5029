// crates/api/tests/webhook_envelope.rs

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono::{FixedOffset, NaiveDate};
use prigorod_api::handlers::{GENERIC_APOLOGY, HELP_TEXT};
use prigorod_api::{ApiConfig, ApiServer, RequestLimiter, SkillHandlers};
use prigorod_core::{PrigorodResult, SkillResponse};
use prigorod_nlu::morph::DictionaryMorph;
use prigorod_nlu::Normalizer;
use prigorod_schedule::{ScheduleClient, SearchReply, StationDirectory};
use serde_json::json;
use tower::ServiceExt;

struct IdleSchedule;

#[async_trait]
impl ScheduleClient for IdleSchedule {
    async fn search(&self, _from: &str, _to: &str, _date: NaiveDate) -> PrigorodResult<SearchReply> {
        Ok(SearchReply::default())
    }

    fn name(&self) -> &str {
        "idle"
    }
}

fn server() -> ApiServer {
    let morph = Arc::new(DictionaryMorph::default());
    let handlers = Arc::new(SkillHandlers::new(
        Normalizer::new(morph.clone()),
        Arc::new(StationDirectory::default()),
        Arc::new(IdleSchedule),
        morph,
        RequestLimiter::unlimited(),
        FixedOffset::east_opt(3 * 3600).unwrap(),
    ));
    ApiServer::new(ApiConfig::default(), handlers)
}

async fn post_body(body: &str) -> (StatusCode, SkillResponse) {
    let response = server()
        .router()
        .oneshot(
            Request::post("/")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn non_json_body_still_gets_a_success_envelope() {
    let (status, envelope) = post_body("это вообще не джейсон").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope.response.text, GENERIC_APOLOGY);
    assert!(envelope.response.end_session);
}

#[tokio::test]
async fn json_with_the_wrong_shape_gets_the_same_envelope() {
    let (status, envelope) = post_body(r#"{"whatever": true}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope.response.text, GENERIC_APOLOGY);
    assert!(envelope.response.end_session);
}

#[tokio::test]
async fn well_formed_request_round_trips_through_the_router() {
    let payload = json!({
        "version": "1.0",
        "session": { "user": { "user_id": "user-1" } },
        "request": { "original_utterance": "помощь", "nlu": {
            "tokens": [], "entities": [],
            "intents": { "YANDEX.HELP": { "slots": {} } }
        } }
    });

    let (status, envelope) = post_body(&payload.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope.response.text, HELP_TEXT);
    assert!(!envelope.response.end_session);
}
