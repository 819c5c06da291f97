/*
 * Responsibility
 * - Extractors shared by v1 handlers
 */
pub mod auth_ctx;
pub mod public_id;
pub mod validated;

pub use auth_ctx::Authenticated;
pub use validated::{ValidatedJson, ValidatedQuery};
