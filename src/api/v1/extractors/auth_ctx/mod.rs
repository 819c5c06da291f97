/*!
 * Authenticated request context extractor
 *
 * Responsibility:
 * - Run the access guard before a protected handler body executes
 * - Hand the handler a VerifiedIdentity (or reject with 401)
 *
 * Public API:
 * - Authenticated
 * - VerifiedIdentity
 */

mod core;

pub use crate::services::auth::VerifiedIdentity;
pub use self::core::Authenticated;
