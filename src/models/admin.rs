use chrono::NaiveDateTime;

/// Administrative account. Deliberately not `Serialize` — the password
/// hash must never reach a response body; handlers build profile JSON
/// field by field.
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: String,
    pub login_attempts: i64,
    pub lock_until: Option<NaiveDateTime>,
    pub last_login: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl Admin {
    pub fn is_locked(&self, now: NaiveDateTime) -> bool {
        self.lock_until.map(|until| until > now).unwrap_or(false)
    }

    /// Whole minutes until the lock expires, rounded up, at least 1.
    pub fn lock_minutes_remaining(&self, now: NaiveDateTime) -> i64 {
        let secs = self
            .lock_until
            .map(|until| (until - now).num_seconds())
            .unwrap_or(0);
        ((secs + 59) / 60).max(1)
    }
}
