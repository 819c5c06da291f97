pub mod claims;
pub mod error;
pub mod factory;
pub mod guard;
pub mod token_codec;

pub use claims::Claims;
pub use error::{AuthError, IssueError};
pub use factory::build_auth;
pub use guard::{AccessGuard, VerifiedIdentity};
pub use token_codec::TokenCodec;
