// crates/schedule/src/lib.rs

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use prigorod_core::PrigorodResult;
use serde::{Deserialize, Serialize};

pub mod client;
pub mod stations;
pub mod tickets;

pub use client::RaspClient;
pub use stations::StationDirectory;
pub use tickets::{next_departure, Ticket};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_s")]
    pub timeout_s: u64,
    #[serde(default = "default_transport_type")]
    pub transport_type: String,
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_api_key_env() -> String {
    "PRIGOROD_RASP_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://api.rasp.yandex.net/v3.0".to_string()
}

const fn default_timeout_s() -> u64 {
    4
}

fn default_transport_type() -> String {
    "suburban".to_string()
}

fn default_lang() -> String {
    "ru_RU".to_string()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            timeout_s: default_timeout_s(),
            transport_type: default_transport_type(),
            lang: default_lang(),
        }
    }
}

/// Remote timetable search, one day at a time. The production backend is
/// [`RaspClient`]; tests script this trait directly.
#[async_trait]
pub trait ScheduleClient: Send + Sync {
    async fn search(&self, from: &str, to: &str, date: NaiveDate) -> PrigorodResult<SearchReply>;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchReply {
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub departure: DateTime<FixedOffset>,
    pub thread: Thread,
    #[serde(default)]
    pub departure_platform: String,
    /// Trip duration in seconds. The provider serializes it as a float.
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thread {
    #[serde(default)]
    pub title: String,
}

/// Public timetable page for the route on the given day. Returned as a
/// button instead of a spoken ticket when the user asks for the schedule.
pub fn schedule_link(from_code: &str, to_code: &str, date: NaiveDate) -> String {
    format!(
        "https://rasp.yandex.ru/search/suburban/?fromId={}&toId={}&when={}",
        urlencoding::encode(from_code),
        urlencoding::encode(to_code),
        date.format("%Y-%m-%d"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_embeds_codes_and_iso_date() {
        let date = NaiveDate::from_ymd_opt(2023, 5, 12).unwrap();
        assert_eq!(
            schedule_link("s9600213", "s9601728", date),
            "https://rasp.yandex.ru/search/suburban/?fromId=s9600213&toId=s9601728&when=2023-05-12"
        );
    }

    #[test]
    fn reply_deserializes_provider_shape() {
        let reply: SearchReply = serde_json::from_str(
            r#"{
                "pagination": {"total": 1},
                "segments": [{
                    "departure": "2023-05-12T15:42:00+03:00",
                    "thread": {"title": "Москва — Тверь"},
                    "departure_platform": "3",
                    "duration": 6180.0
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(reply.pagination.total, 1);
        assert_eq!(reply.segments.len(), 1);
        assert_eq!(reply.segments[0].thread.title, "Москва — Тверь");
        assert_eq!(reply.segments[0].duration, 6180.0);
    }
}
