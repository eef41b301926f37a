//! Admin bootstrap: makes sure an administrator account exists at startup.
//!
//! The default credentials are a seeding convenience carried over from the
//! source system and should be overridden with `ADMIN_EMAIL` /
//! `ADMIN_PASSWORD` in any real deployment.

use sqlx::PgPool;

use crate::auth::hash_password;
use crate::store::UserStore;

const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Creates the admin user when none exists. Failures are logged, not fatal:
/// the server still starts without an admin account.
pub async fn seed_admin(pool: &PgPool) {
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());
    let password =
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string());

    let users = UserStore::new(pool.clone());

    match users.find_by_email(&email).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            let password_hash = match hash_password(&password) {
                Ok(hash) => hash,
                Err(e) => {
                    log::error!("Error seeding admin: {}", e);
                    return;
                }
            };
            match users.insert("Admin", &email, &password_hash, true).await {
                Ok(_) => log::info!("Admin user seeded successfully"),
                Err(e) => log::error!("Error seeding admin: {}", e),
            }
        }
        Err(e) => log::error!("Error seeding admin: {}", e),
    }
}
