// tests/limiter_test.rs

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use prigorod_api::handlers::{HELP_TEXT, LIMIT_TEXT};
use prigorod_api::{RequestLimiter, SkillHandlers};
use prigorod_core::{PrigorodResult, SkillRequest};
use prigorod_nlu::morph::DictionaryMorph;
use prigorod_nlu::Normalizer;
use prigorod_schedule::{ScheduleClient, SearchReply, StationDirectory};
use serde_json::json;

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

fn msk() -> FixedOffset {
    FixedOffset::east_opt(3 * 3600).unwrap()
}

fn now() -> DateTime<FixedOffset> {
    msk().with_ymd_and_hms(2023, 5, 12, 14, 30, 0).unwrap()
}

fn handlers(limiter: RequestLimiter) -> SkillHandlers {
    let morph = Arc::new(DictionaryMorph::default());
    SkillHandlers::new(
        Normalizer::new(morph.clone()),
        Arc::new(StationDirectory::default()),
        Arc::new(IdleSchedule),
        morph,
        limiter,
        msk(),
    )
}

fn help_request(user_id: &str) -> SkillRequest {
    serde_json::from_value(json!({
        "version": "1.0",
        "session": { "user": { "user_id": user_id } },
        "request": { "original_utterance": "помощь", "nlu": {
            "tokens": [], "entities": [],
            "intents": { "YANDEX.HELP": { "slots": {} } }
        } }
    }))
    .unwrap()
}

#[tokio::test]
async fn user_over_the_limit_gets_refused() {
    let handlers = handlers(RequestLimiter::new(2, []));

    for _ in 0..2 {
        let response = handlers.handle_at(help_request("user-1"), now()).await;
        assert_eq!(response.response.text, HELP_TEXT);
    }

    let refused = handlers.handle_at(help_request("user-1"), now()).await;
    assert_eq!(refused.response.text, LIMIT_TEXT);
    assert!(refused.response.end_session);
}

#[tokio::test]
async fn admins_are_never_refused() {
    let handlers = handlers(RequestLimiter::new(1, ["admin-1".to_string()]));

    for _ in 0..5 {
        let response = handlers.handle_at(help_request("admin-1"), now()).await;
        assert_eq!(response.response.text, HELP_TEXT);
        assert!(!response.response.end_session);
    }
}
