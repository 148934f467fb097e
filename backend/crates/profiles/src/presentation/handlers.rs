//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::ProfilesConfig;
use crate::application::{
    AccountEventBus, ProfileAccessUseCase, ProfileEdit, RegisterAccountInput,
    RegisterAccountUseCase,
};
use crate::domain::repository::{AccountRepository, ProfileRepository};
use crate::domain::value_object::{AccountId, caller::Caller};
use crate::error::ProfileResult;
use crate::presentation::dto::{
    AccountCreatedRequest, AccountCreatedResponse, ProfileListResponse, ProfileResponse,
    RegisterAccountRequest, RegisterAccountResponse, UpdateProfileRequest,
};

/// Shared state for profile handlers
#[derive(Clone)]
pub struct ProfilesAppState<R>
where
    R: ProfileRepository + AccountRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub events: Arc<AccountEventBus>,
    pub config: Arc<ProfilesConfig>,
}

// ============================================================================
// Account lifecycle
// ============================================================================

/// POST /api/hooks/account-created
///
/// Called by the authentication subsystem after it committed a new account.
/// Always answers 200 so signup never fails because of the profile.
pub async fn account_created<R>(
    State(state): State<ProfilesAppState<R>>,
    Json(req): Json<AccountCreatedRequest>,
) -> Json<AccountCreatedResponse>
where
    R: ProfileRepository + AccountRepository + Clone + Send + Sync + 'static,
{
    let account = req.into_account();
    let account_id = account.account_id;
    let use_case = RegisterAccountUseCase::new(state.repo.clone(), state.events.clone());

    let profile_synced = match use_case.record(account).await {
        Ok(report) => report.is_clean(),
        Err(e) => {
            tracing::warn!(
                account_id = %account_id,
                error = %e,
                "Could not record account, profile not synced"
            );
            false
        }
    };

    Json(AccountCreatedResponse { profile_synced })
}

/// POST /api/accounts
pub async fn register_account<R>(
    State(state): State<ProfilesAppState<R>>,
    Json(req): Json<RegisterAccountRequest>,
) -> ProfileResult<(StatusCode, Json<RegisterAccountResponse>)>
where
    R: ProfileRepository + AccountRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterAccountUseCase::new(state.repo.clone(), state.events.clone());

    let output = use_case
        .execute(RegisterAccountInput {
            email: req.email,
            metadata: req.metadata.unwrap_or_default(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterAccountResponse {
            account_id: output.account_id.to_string(),
        }),
    ))
}

// ============================================================================
// Profiles
// ============================================================================

/// GET /api/profiles
pub async fn list_profiles<R>(
    State(state): State<ProfilesAppState<R>>,
    Extension(caller): Extension<Caller>,
) -> ProfileResult<Json<ProfileListResponse>>
where
    R: ProfileRepository + AccountRepository + Clone + Send + Sync + 'static,
{
    let profiles = ProfileAccessUseCase::new(state.repo.clone())
        .list(&caller)
        .await?;

    Ok(Json(ProfileListResponse {
        profiles: profiles.into_iter().map(ProfileResponse::from).collect(),
    }))
}

/// GET /api/profiles/me
pub async fn my_profile<R>(
    State(state): State<ProfilesAppState<R>>,
    Extension(caller): Extension<Caller>,
) -> ProfileResult<Json<ProfileResponse>>
where
    R: ProfileRepository + AccountRepository + Clone + Send + Sync + 'static,
{
    let profile = ProfileAccessUseCase::new(state.repo.clone())
        .me(&caller)
        .await?;

    Ok(Json(profile.into()))
}

/// GET /api/profiles/{id}
pub async fn get_profile<R>(
    State(state): State<ProfilesAppState<R>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
) -> ProfileResult<Json<ProfileResponse>>
where
    R: ProfileRepository + AccountRepository + Clone + Send + Sync + 'static,
{
    let profile = ProfileAccessUseCase::new(state.repo.clone())
        .get(&caller, &AccountId::from_uuid(id))
        .await?;

    Ok(Json(profile.into()))
}

/// PATCH /api/profiles/{id}
pub async fn update_profile<R>(
    State(state): State<ProfilesAppState<R>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProfileRequest>,
) -> ProfileResult<Json<ProfileResponse>>
where
    R: ProfileRepository + AccountRepository + Clone + Send + Sync + 'static,
{
    let edit = ProfileEdit {
        full_name: req.full_name,
        avatar_url: req.avatar_url,
    };

    let profile = ProfileAccessUseCase::new(state.repo.clone())
        .update(&caller, &AccountId::from_uuid(id), edit)
        .await?;

    Ok(Json(profile.into()))
}

/// DELETE /api/profiles/{id}
pub async fn delete_profile<R>(
    State(state): State<ProfilesAppState<R>>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
) -> ProfileResult<StatusCode>
where
    R: ProfileRepository + AccountRepository + Clone + Send + Sync + 'static,
{
    ProfileAccessUseCase::new(state.repo.clone())
        .delete(&caller, &AccountId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
