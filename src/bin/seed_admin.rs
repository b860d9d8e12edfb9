use std::env;

use chrono::Utc;
use tracing_subscriber::EnvFilter;

use washdesk::config::AppConfig;
use washdesk::db::{self, queries};
use washdesk::models::Admin;
use washdesk::services::auth;

/// One-shot setup: create the default admin account if it does not exist.
/// Never overwrites an existing account.
fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    let conn = db::init_db(&config.database_url)?;

    let username = env::var("SEED_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());

    if let Some(existing) = queries::get_admin_by_username(&conn, &username)? {
        tracing::warn!(
            username = %existing.username,
            created_at = %existing.created_at,
            "admin user already exists, nothing to do"
        );
        tracing::info!("to reset the password, delete the account first");
        return Ok(());
    }

    let password = env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "washdesk@admin".to_string());
    let email = env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@washdesk.com".to_string());

    let admin = Admin {
        id: uuid::Uuid::new_v4().to_string(),
        username,
        password_hash: auth::hash_password(&password)?,
        email,
        role: "admin".to_string(),
        login_attempts: 0,
        lock_until: None,
        last_login: None,
        created_at: Utc::now().naive_utc(),
    };

    queries::insert_admin(&conn, &admin)?;

    tracing::info!(username = %admin.username, email = %admin.email, "created default admin user");
    tracing::warn!("change the seeded password after first login");

    Ok(())
}
