/// Factory: build the token codec and access guard from application `Config`.
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::services::auth::{AccessGuard, TokenCodec};

pub fn build_auth(config: &AuthConfig) -> (Arc<TokenCodec>, AccessGuard) {
    let codec = Arc::new(TokenCodec::new(config));
    let guard = AccessGuard::new(Arc::clone(&codec));

    (codec, guard)
}
