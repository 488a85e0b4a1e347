pub mod account;
pub mod auth;
pub mod billing;
pub mod health;
pub mod homework;
pub mod logs;
pub mod profile;
pub mod sessions;
pub mod users;
