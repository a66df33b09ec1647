//! Local state kept between CLI runs.

mod auth;

pub use auth::TokenStore;
