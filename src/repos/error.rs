/**
 * Responsibility
 * - What a repo failure means to the layers above
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("referenced record does not exist")]
    UnknownReference,
    #[error("db error")]
    Db(#[from] sqlx::Error),
}

impl RepoError {
    /// Postgres `foreign_key_violation` (23503) becomes `UnknownReference`.
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().as_deref() == Some("23503")
        {
            return RepoError::UnknownReference;
        }
        RepoError::Db(e)
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
