mod database;
mod rate_limit_sweep;
mod state_builder;

pub use database::{connect, run_migrations};
pub use rate_limit_sweep::spawn_rate_limit_sweep;
pub use state_builder::{StateDependencies, build_app_state};
