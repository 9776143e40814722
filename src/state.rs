//! Application state traits for dependency injection
//!
//! Handlers are generic over `HasServices`, so the same router serves the
//! production `AppState` and test states backed by in-memory repositories.

use crate::config::Config;
use crate::repository::{SeizureRepository, SlaughterhouseRepository, UserRepository};
use crate::service::{
    AnalyticsService, AuthService, SeizureService, SlaughterhouseService, UserService,
};

/// Trait for application state that provides access to all services.
pub trait HasServices: Clone + Send + Sync + 'static {
    /// The user repository type
    type UserRepo: UserRepository;
    /// The slaughterhouse repository type
    type SlaughterhouseRepo: SlaughterhouseRepository;
    /// The seizure repository type
    type SeizureRepo: SeizureRepository;

    /// Get the application configuration
    fn config(&self) -> &Config;

    fn auth_service(&self) -> &AuthService<Self::UserRepo>;

    fn user_service(&self) -> &UserService<Self::UserRepo, Self::SlaughterhouseRepo>;

    fn slaughterhouse_service(
        &self,
    ) -> &SlaughterhouseService<Self::SlaughterhouseRepo, Self::SeizureRepo>;

    fn seizure_service(&self) -> &SeizureService<Self::SeizureRepo>;

    fn analytics_service(&self) -> &AnalyticsService<Self::SeizureRepo>;

    /// Whether the backing store answers
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
