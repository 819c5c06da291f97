/*
 * Responsibility
 * - Domain services that are not tied to HTTP or the database
 */
pub mod auth;
pub mod id_codec;
