//! Profiles Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::ProfilesConfig;
use crate::application::{AccountEventBus, ProfileSynchronizer};
use crate::domain::repository::{AccountRepository, ProfileRepository};
use crate::infra::jwt::TokenVerifier;
use crate::infra::postgres::PgProfileRepository;
use crate::presentation::handlers::{self, ProfilesAppState};
use crate::presentation::middleware::{
    CallerMiddlewareState, require_trusted_role, resolve_caller,
};

/// Create the Profiles router with PostgreSQL repository
pub fn profiles_router(repo: PgProfileRepository, config: ProfilesConfig) -> Router {
    profiles_router_generic(repo, config)
}

/// Create a generic Profiles router for any repository implementation.
///
/// The profile synchronizer is subscribed to the account event bus here, so
/// every account created through this router gets a profile.
pub fn profiles_router_generic<R>(repo: R, config: ProfilesConfig) -> Router
where
    R: ProfileRepository + AccountRepository + Clone + Send + Sync + 'static,
{
    let repo = Arc::new(repo);
    let config = Arc::new(config);

    let mut events = AccountEventBus::new();
    events.subscribe(Arc::new(ProfileSynchronizer::new(
        repo.clone(),
        config.clone(),
    )));

    let caller_state = CallerMiddlewareState {
        verifier: Arc::new(TokenVerifier::new(&config)),
    };

    let state = ProfilesAppState {
        repo,
        events: Arc::new(events),
        config,
    };

    let system_routes = Router::new()
        .route(
            "/hooks/account-created",
            post(handlers::account_created::<R>),
        )
        .route("/accounts", post(handlers::register_account::<R>))
        .route_layer(middleware::from_fn(require_trusted_role));

    let profile_routes = Router::new()
        .route("/profiles", get(handlers::list_profiles::<R>))
        .route("/profiles/me", get(handlers::my_profile::<R>))
        .route(
            "/profiles/{id}",
            get(handlers::get_profile::<R>)
                .patch(handlers::update_profile::<R>)
                .delete(handlers::delete_profile::<R>),
        );

    Router::new()
        .merge(system_routes)
        .merge(profile_routes)
        .layer(middleware::from_fn_with_state(caller_state, resolve_caller))
        .with_state(state)
}
