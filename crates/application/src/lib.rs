//! Application services and ports.

#![forbid(unsafe_code)]

mod clock;
mod homework_service;
mod log_service;
mod profile_service;
mod rate_limit_service;
mod session_service;
mod user_service;

#[cfg(test)]
mod test_support;

pub use clock::Clock;
pub use homework_service::{
    CreateHomeworkInput, HomeworkRepository, HomeworkService, UpdateHomeworkInput,
};
pub use log_service::{CreateLogInput, LogRepository, LogService, UpdateLogInput};
pub use profile_service::{ProfileRepository, ProfileService, UpdateProfileInput};
pub use rate_limit_service::{RateLimitRepository, RateLimitRule, RateLimitService};
pub use session_service::{
    CreateSessionInput, CreatedSession, SessionDraft, SessionHomeworkInput, SessionRepository,
    SessionService, UpdateSessionInput,
};
pub use user_service::{
    AccessTokenCodec, AuthenticatedSession, PasswordHasher, PlanChange, SignupInput, TokenClaims,
    UserRecord, UserRepository, UserService,
};
