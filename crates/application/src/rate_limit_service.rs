//! Rate limiting ports and application service.
//!
//! Fixed-window limiter keyed by route category and client identifier. Each
//! route declares its own [`RateLimitRule`]; there is no global default.

mod config;
mod ports;
mod service;


pub use config::RateLimitRule;
pub use ports::RateLimitRepository;
pub use service::RateLimitService;
