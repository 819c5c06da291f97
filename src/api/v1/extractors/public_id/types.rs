/**
 * Responsibility
 *  - Per-resource public id types (tag + alias)
 *  - No decode logic here; that lives in core
 */
use super::core::PublicId;

// services
pub enum ServiceTag {}
pub type PublicServiceId = PublicId<ServiceTag>;
