//! Upstream configuration rules, checked before anything is compiled

pub mod rules;
pub mod validator;

pub use validator::Validator;
