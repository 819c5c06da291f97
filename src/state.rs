/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - db: PgPool, id_codec: IdCodec, tokens: TokenCodec, guard: AccessGuard
 * - Cloned per request, so everything inside is cheap to clone (Arc/pool handles)
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::services::{
    auth::{AccessGuard, TokenCodec},
    id_codec::IdCodec,
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub id_codec: IdCodec,
    pub tokens: Arc<TokenCodec>,
    pub guard: AccessGuard,
}

impl AppState {
    pub fn new(db: PgPool, id_codec: IdCodec, tokens: Arc<TokenCodec>, guard: AccessGuard) -> Self {
        Self {
            db,
            id_codec,
            tokens,
            guard,
        }
    }
}
