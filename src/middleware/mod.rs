/*
 * Responsibility
 * - Router-level middleware (transport concerns only)
 * - Authentication is not a layer here; protected handlers use the `Authenticated` extractor
 */
pub mod cors;
pub mod http;
pub mod security_headers;
