//! Session-token types for the Herdbook API.
//!
//! Provides JWT claims and validation, the session-cookie builder, and the
//! `Identity` extractor that guards protected routes.

pub mod cookie;
pub mod identity;
pub mod token;
