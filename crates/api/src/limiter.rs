// crates/api/src/limiter.rs

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;

/// Per-process request counter keyed by platform user id. State lives only
/// as long as the process, matching the serverless invocation model.
pub struct RequestLimiter {
    max_requests: u64,
    admins: HashSet<String>,
    counts: RwLock<HashMap<String, u64>>,
}

impl RequestLimiter {
    /// `max_requests == 0` disables limiting entirely.
    pub fn new(max_requests: u64, admins: impl IntoIterator<Item = String>) -> Self {
        Self {
            max_requests,
            admins: admins.into_iter().collect(),
            counts: RwLock::new(HashMap::new()),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(0, [])
    }

    /// Counts the request and reports whether it may proceed. Requests
    /// without a user id and requests from admins are never refused.
    pub fn allow(&self, user_id: Option<&str>) -> bool {
        if self.max_requests == 0 {
            return true;
        }
        let Some(user_id) = user_id else {
            return true;
        };
        if self.admins.contains(user_id) {
            return true;
        }

        let mut counts = self.counts.write();
        let count = counts.entry(user_id.to_string()).or_insert(0);
        *count += 1;
        *count <= self.max_requests
    }
}
