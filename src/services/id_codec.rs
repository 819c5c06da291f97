/*
 * Responsibility
 * - Public service id <-> internal "serviceId" (BIGINT) conversion
 * - Keeps the sqids details in one place; extractors and DTOs only see encode/decode
 *
 * Errors are hand-written rather than thiserror:
 * - they never leave this module except through the AppError conversion
 */
use sqids::{Error as SqidsError, Sqids};
use std::{error::Error, fmt};

pub type Result<T> = std::result::Result<T, IdCodecError>;

#[derive(Debug)]
pub enum IdCodecError {
    InvalidMinLength { value: usize },
    Sqids(SqidsError),
    NegativeId { value: i64 },
    DecodeInvalidFormat,
    DecodeOutOfRange,
}

impl fmt::Display for IdCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdCodecError::InvalidMinLength { value } => {
                write!(f, "SQIDS_MIN_LENGTH must be between 0 and 255, got {}", value)
            }
            IdCodecError::Sqids(e) => write!(f, "sqids error: {}", e),
            IdCodecError::NegativeId { value } => {
                write!(f, "id must be non-negative, got {}", value)
            }
            IdCodecError::DecodeInvalidFormat => write!(f, "invalid public id format"),
            IdCodecError::DecodeOutOfRange => write!(f, "decoded id is out of range"),
        }
    }
}

impl Error for IdCodecError {}

impl From<SqidsError> for IdCodecError {
    fn from(e: SqidsError) -> Self {
        IdCodecError::Sqids(e)
    }
}

#[derive(Clone, Debug)]
pub struct IdCodec {
    sqids: Sqids,
}

impl IdCodec {
    pub fn new(min_length: usize, alphabet: &str) -> Result<Self> {
        let min_length: u8 = min_length
            .try_into()
            .map_err(|_| IdCodecError::InvalidMinLength { value: min_length })?;

        let sqids = Sqids::builder()
            .min_length(min_length)
            .alphabet(alphabet.chars().collect())
            .build()?;

        Ok(Self { sqids })
    }

    pub fn encode(&self, id: i64) -> Result<String> {
        let n = u64::try_from(id).map_err(|_| IdCodecError::NegativeId { value: id })?;
        Ok(self.sqids.encode(&[n])?)
    }

    /// Exactly one number must come back, and it must fit in a BIGINT.
    pub fn decode(&self, public_id: &str) -> Result<i64> {
        match self.sqids.decode(public_id).as_slice() {
            [n] => i64::try_from(*n).map_err(|_| IdCodecError::DecodeOutOfRange),
            _ => Err(IdCodecError::DecodeInvalidFormat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    fn codec() -> IdCodec {
        IdCodec::new(10, ALPHABET).unwrap()
    }

    #[test]
    fn encoded_ids_decode_back() {
        let codec = codec();
        for id in [0, 1, 42, 9_999_999] {
            let public = codec.encode(id).unwrap();
            assert!(public.len() >= 10);
            assert_eq!(codec.decode(&public).unwrap(), id);
        }
    }

    #[test]
    fn negative_ids_are_not_encoded() {
        assert!(matches!(
            codec().encode(-1),
            Err(IdCodecError::NegativeId { value: -1 })
        ));
    }

    #[test]
    fn garbage_does_not_decode() {
        assert!(matches!(
            codec().decode("!!!"),
            Err(IdCodecError::DecodeInvalidFormat)
        ));
        assert!(matches!(
            codec().decode(""),
            Err(IdCodecError::DecodeInvalidFormat)
        ));
    }

    #[test]
    fn min_length_must_fit_in_a_byte() {
        assert!(matches!(
            IdCodec::new(300, ALPHABET),
            Err(IdCodecError::InvalidMinLength { value: 300 })
        ));
    }
}
