//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, Plan, User, UserId, UserPreferences, UserProfile};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    if let Some(constraint) = unique_violation(&error) {
        let field = if constraint.contains("email") {
            "email"
        } else {
            "username"
        };
        return UserPersistenceError::duplicate(field);
    }
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let email = Email::new(row.email)
        .map_err(|err| UserPersistenceError::query(format!("stored email is invalid: {err}")))?;
    let plan = row.plan.parse::<Plan>().unwrap_or_else(|err| {
        warn!(user_id = %row.id, error = %err, "unrecognised plan, defaulting to Free");
        Plan::Free
    });
    let preferences: UserPreferences = serde_json::from_value(row.preferences)
        .unwrap_or_else(|err| {
            warn!(user_id = %row.id, error = %err, "unreadable preferences, using defaults");
            UserPreferences::default()
        });
    Ok(User {
        id: UserId::from_uuid(row.id),
        username: row.username,
        email,
        password_hash: row.password_hash,
        plan,
        profile: UserProfile {
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            company: row.company,
            position: row.position,
            location: row.location,
            bio: row.bio,
        },
        preferences,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn preferences_json(user: &User) -> Result<serde_json::Value, UserPersistenceError> {
    serde_json::to_value(&user.preferences)
        .map_err(|err| UserPersistenceError::query(format!("encode preferences: {err}")))
}

fn user_to_row(user: &User) -> Result<UserRow, UserPersistenceError> {
    let profile = user.profile.clone();
    Ok(UserRow {
        id: *user.id.as_uuid(),
        username: user.username.clone(),
        email: user.email.to_string(),
        password_hash: user.password_hash.clone(),
        plan: user.plan.as_str().to_owned(),
        first_name: profile.first_name,
        last_name: profile.last_name,
        phone: profile.phone,
        company: profile.company,
        position: profile.position,
        location: profile.location,
        bio: profile.bio,
        preferences: preferences_json(user)?,
        created_at: user.created_at,
        updated_at: user.updated_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let row = user_to_row(user)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let preferences = preferences_json(user)?;
        let profile = &user.profile;
        let changes = UserUpdate {
            username: &user.username,
            email: user.email.as_ref(),
            password_hash: &user.password_hash,
            plan: user.plan.as_str(),
            first_name: &profile.first_name,
            last_name: &profile.last_name,
            phone: &profile.phone,
            company: &profile.company,
            position: &profile.position,
            location: &profile.location,
            bio: &profile.bio,
            preferences: &preferences,
            updated_at: user.updated_at,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(users::table.filter(users::id.eq(user.id.as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::username.eq(username)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}
