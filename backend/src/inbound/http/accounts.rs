//! Account HTTP handlers.
//!
//! ```text
//! POST /api/auth/signup
//! POST /api/auth/signin
//! POST /api/auth/validate
//! PUT  /api/auth/update-profile
//! ```

use actix_web::{HttpResponse, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{ProfileUpdate, SignupRequest};
use crate::domain::{
    Credentials, CredentialsValidationError, Error, Plan, PreferencesPatch, User, UserId,
    UserPreferences, UserProfile, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/auth/signup`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub plan: Option<Plan>,
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// Body of `POST /api/auth/signin`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SigninBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `PUT /api/auth/update-profile`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileBody {
    pub id: Option<String>,
    pub plan: Option<Plan>,
    pub preferences: Option<PreferencesPatch>,
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// User summary returned by signup and signin.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    pub plan: Plan,
    pub first_name: String,
    pub last_name: String,
}

impl UserSummary {
    fn of(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: None,
            email: user.email.to_string(),
            plan: user.plan,
            first_name: user.profile.first_name.clone(),
            last_name: user.profile.last_name.clone(),
        }
    }

    fn with_username(user: &User) -> Self {
        Self {
            username: Some(user.username.clone()),
            ..Self::of(user)
        }
    }
}

/// Full profile returned after an update.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub plan: Plan,
    #[serde(flatten)]
    pub profile: UserProfile,
    pub preferences: UserPreferences,
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.to_string(),
            plan: user.plan,
            profile: user.profile.clone(),
            preferences: user.preferences.clone(),
        }
    }
}

fn credentials(email: &str, password: &str) -> Result<Credentials, Error> {
    Credentials::try_from_parts(email, password)
        .map_err(|err: CredentialsValidationError| Error::invalid_request(err.to_string()))
}

fn parse_profile_id(raw: Option<&str>) -> Result<UserId, Error> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::invalid_request("User ID required"))?;
    UserId::new(raw).map_err(|err| match err {
        UserValidationError::EmptyId => Error::invalid_request("User ID required"),
        other => Error::invalid_request(other.to_string())
            .with_details(json!({ "field": "id", "value": raw })),
    })
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupBody,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Email and password required", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupBody>,
) -> ApiResult<HttpResponse> {
    let SignupBody {
        email,
        password,
        plan,
        profile,
    } = payload.into_inner();
    let user = state
        .accounts
        .signup(SignupRequest {
            credentials: credentials(&email, &password)?,
            plan,
            profile,
        })
        .await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "User created",
        "user": UserSummary::with_username(&user),
    })))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    request_body = SigninBody,
    responses(
        (status = 200, description = "Signed in"),
        (status = 400, description = "Email and password required", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signin",
    security([])
)]
#[post("/signin")]
pub async fn signin(
    state: web::Data<HttpState>,
    payload: web::Json<SigninBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let result = state
        .accounts
        .signin(credentials(&body.email, &body.password)?)
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "token": result.token.token,
        "user": UserSummary::of(&result.user),
    })))
}

/// Echo the verified token's identity.
#[utoipa::path(
    post,
    path = "/api/auth/validate",
    responses(
        (status = 200, description = "Token is valid"),
        (status = 401, description = "Missing, malformed or invalid token", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "validateToken"
)]
#[post("/validate")]
pub async fn validate(user: AuthenticatedUser) -> ApiResult<HttpResponse> {
    let claims = user.into_claims();
    Ok(HttpResponse::Ok().json(json!({
        "id": claims.user_id.to_string(),
        "email": claims.email.to_string(),
        "plan": claims.plan,
    })))
}

/// Replace the caller's profile.
#[utoipa::path(
    put,
    path = "/api/auth/update-profile",
    request_body = UpdateProfileBody,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 400, description = "User ID required", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Another user's profile", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "updateProfile"
)]
#[put("/update-profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let id = parse_profile_id(body.id.as_deref())?;
    let updated = state
        .accounts
        .update_profile(
            user.claims(),
            ProfileUpdate {
                id,
                profile: body.profile,
                plan: body.plan,
                preferences: body.preferences,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Profile updated successfully",
        "user": ProfileResponse::from(&updated),
    })))
}
