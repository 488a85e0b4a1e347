mod auth;
mod common;
mod homework;
mod logs;
mod profile;
mod sessions;

pub use auth::{AuthResponse, FakePaymentRequest, LoginRequest, PlanChangeResponse, SignupRequest};
pub use common::{CountResponse, HealthResponse, UserEnvelope, UserResponse, parse_completed};
pub use homework::{
    CreateHomeworkRequest, HomeworkEnvelope, HomeworkListResponse, HomeworkResponse,
    UpdateHomeworkRequest,
};
pub use logs::{CreateLogRequest, LogEnvelope, LogListQuery, LogResponse, LogsResponse, UpdateLogRequest};
pub use profile::{ProfileEnvelope, ProfileResponse, UpdateProfileRequest};
pub use sessions::{
    CompletedQuery, CreateSessionRequest, CreatedSessionResponse, SessionEnvelope,
    SessionResponse, SessionsResponse, UpdateSessionRequest,
};
