// crates/api/src/handlers.rs

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Datelike, FixedOffset};
use prigorod_core::{
    now_in, resolve_at, PartialDate, PrigorodError, PrigorodResult, Session, SkillRequest,
    SkillResponse, HELP_INTENT, MAIN_INTENT, SLOT_DETAIL, SLOT_FROM, SLOT_SCHEDULE, SLOT_TO,
    SLOT_WHEN,
};
use prigorod_nlu::duration::{spoken_duration, DurationFormat};
use prigorod_nlu::morph::Morphology;
use prigorod_nlu::Normalizer;
use prigorod_schedule::{next_departure, schedule_link, ScheduleClient, StationDirectory, Ticket};
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::limiter::RequestLimiter;

pub const HELP_TEXT: &str = "Я подсказываю ближайшие электрички. Скажите, например: \
                             «с тверской до каланчёвской через полчаса».";
pub const UNRECOGNIZED_TEXT: &str =
    "Извините, я вас не поняла. Скажите, с какой станции и до какой вы хотите доехать.";
pub const NO_TICKET_TEXT: &str = "Извините, подходящих электричек не нашлось.";
pub const GENERIC_APOLOGY: &str = "Извините, что-то пошло не так. Попробуйте ещё раз позже.";
pub const LIMIT_TEXT: &str = "Извините, вы исчерпали лимит запросов.";
pub const SCHEDULE_TEXT: &str = "Вот расписание электричек на этот день.";

const MONTHS: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня",
    "июля", "августа", "сентября", "октября", "ноября", "декабря",
];

/// The skill itself: sequences normalization, directory lookup, date
/// resolution, the timetable query and the spoken phrasing.
pub struct SkillHandlers {
    normalizer: Normalizer,
    directory: Arc<StationDirectory>,
    schedule: Arc<dyn ScheduleClient>,
    morph: Arc<dyn Morphology>,
    limiter: RequestLimiter,
    zone: FixedOffset,
    started: Instant,
    served: AtomicU64,
}

impl SkillHandlers {
    pub fn new(
        normalizer: Normalizer,
        directory: Arc<StationDirectory>,
        schedule: Arc<dyn ScheduleClient>,
        morph: Arc<dyn Morphology>,
        limiter: RequestLimiter,
        zone: FixedOffset,
    ) -> Self {
        Self {
            normalizer,
            directory,
            schedule,
            morph,
            limiter,
            zone,
            started: Instant::now(),
            served: AtomicU64::new(0),
        }
    }

    /// Outermost boundary: a raw webhook payload in, a well-formed envelope
    /// out, no matter what went wrong inside.
    pub async fn handle_value(&self, payload: Value) -> SkillResponse {
        match serde_json::from_value::<SkillRequest>(payload) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                error!(error = %e, "malformed webhook payload");
                fallback_response()
            }
        }
    }

    pub async fn handle(&self, request: SkillRequest) -> SkillResponse {
        let now = now_in(self.zone);
        self.handle_at(request, now).await
    }

    /// Entry point with an explicit clock, so tests can pin "now".
    pub async fn handle_at(
        &self,
        request: SkillRequest,
        now: DateTime<FixedOffset>,
    ) -> SkillResponse {
        self.served.fetch_add(1, Ordering::Relaxed);

        match self.compose(&request, now).await {
            Ok(response) => response,
            Err(PrigorodError::UnknownStation(name)) => {
                request.reply(format!("Извините, я не знаю станцию «{name}»."), false)
            }
            Err(PrigorodError::NoTicket) => request.reply(NO_TICKET_TEXT, true),
            Err(e) => {
                error!(error = %e, "request failed");
                request.reply(GENERIC_APOLOGY, true)
            }
        }
    }

    async fn compose(
        &self,
        request: &SkillRequest,
        now: DateTime<FixedOffset>,
    ) -> PrigorodResult<SkillResponse> {
        if !self.limiter.allow(request.user_id()) {
            return Ok(request.reply(LIMIT_TEXT, true));
        }

        if request.intent(HELP_INTENT).is_some() {
            return Ok(request.reply(HELP_TEXT, false));
        }
        let Some(main) = request.intent(MAIN_INTENT) else {
            return Ok(request.reply(UNRECOGNIZED_TEXT, false));
        };

        let (Some(from_span), Some(to_span)) = (
            main.slot(SLOT_FROM).and_then(|s| s.tokens),
            main.slot(SLOT_TO).and_then(|s| s.tokens),
        ) else {
            return Ok(request.reply(UNRECOGNIZED_TEXT, false));
        };

        let nlu = &request.request.nlu;
        let tokens = self.normalizer.substitute_numbers(&nlu.tokens, &nlu.entities);

        let from_phrase = self.normalizer.normalize_span(&tokens, from_span);
        let from = self.directory.resolve(&from_phrase)?.to_string();
        let to_phrase = self.normalizer.normalize_span(&tokens, to_span);
        let to = self.directory.resolve(&to_phrase)?.to_string();

        let when = match main.slot(SLOT_WHEN) {
            Some(slot) if !slot.value.is_null() => {
                serde_json::from_value::<PartialDate>(slot.value.clone())?
            }
            _ => PartialDate::default(),
        };
        let target = resolve_at(now, &when)?;

        if main.has_slot(SLOT_SCHEDULE) {
            let url = schedule_link(&from, &to, target.date_naive());
            return Ok(request
                .reply(SCHEDULE_TEXT, true)
                .with_button("Расписание", url));
        }

        let reply = match self.schedule.search(&from, &to, target.date_naive()).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "timetable query failed");
                return Err(PrigorodError::NoTicket);
            }
        };
        let ticket = next_departure(&reply, target).ok_or(PrigorodError::NoTicket)?;

        let text = self.ticket_text(&ticket, now, main.has_slot(SLOT_DETAIL));
        Ok(request.reply(text, true))
    }

    fn ticket_text(&self, ticket: &Ticket, now: DateTime<FixedOffset>, detailed: bool) -> String {
        let time = ticket.departure.format("%H:%M");
        let mut text = if ticket.departure.date_naive() == now.date_naive() {
            format!("Ближайшая электричка {} отправится в {}", ticket.title, time)
        } else {
            format!(
                "Ближайшая электричка {} отправится {} {} в {}",
                ticket.title,
                ticket.departure.day(),
                MONTHS[ticket.departure.month0() as usize],
                time,
            )
        };
        if !ticket.platform.is_empty() {
            text.push_str(&format!(" с платформы {}", ticket.platform));
        }
        text.push('.');

        if detailed {
            if let Some(next) = &ticket.next {
                let left = (next.departure - now).num_seconds().max(0) as u64;
                let eta = spoken_duration(
                    self.morph.as_ref(),
                    left,
                    DurationFormat {
                        prefix: true,
                        include_seconds: false,
                    },
                );
                text.push_str(&format!(" Следующая будет {eta}."));
            }
            let trip = spoken_duration(
                self.morph.as_ref(),
                ticket.duration_s,
                DurationFormat::default(),
            );
            if !trip.is_empty() {
                text.push_str(&format!(" Время в пути {trip}."));
            }
        }

        text
    }

    pub fn health(&self) -> Value {
        json!({
            "status": "ok",
            "uptime_s": self.started.elapsed().as_secs(),
            "requests_served": self.served.load(Ordering::Relaxed),
        })
    }
}

/// Reply for payloads that cannot even be parsed enough to echo a session.
fn fallback_response() -> SkillResponse {
    let shell = SkillRequest {
        version: "1.0".to_string(),
        session: Session::default(),
        request: Default::default(),
    };
    shell.reply(GENERIC_APOLOGY, true)
}
