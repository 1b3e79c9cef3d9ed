use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectionTrait, DbErr};
use uuid::Uuid;

use super::models;

/// Create the account record behind a consultant, driver or partner store.
///
/// The original platform provisioned an auth user through a remote function
/// and then inserted the domain row as a second, independent write; a failure
/// in between left an orphaned account. Here the caller passes its open
/// transaction so account and domain row commit together.
pub async fn provision_account<C: ConnectionTrait>(
    conn: &C,
    email: &str,
    full_name: &str,
) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    let profile = models::ActiveModel {
        id: Set(id),
        email: Set(email.to_string()),
        full_name: Set(full_name.to_string()),
        created_at: Set(chrono::Utc::now()),
    };
    profile.insert(conn).await?;
    Ok(id)
}
