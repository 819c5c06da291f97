/*
 * Responsibility
 * - SQLx access per table (free functions taking &PgPool)
 */
pub mod booking_repo;
pub mod error;
pub mod service_repo;
