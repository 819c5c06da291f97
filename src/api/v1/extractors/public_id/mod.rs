/**
 * Responsibility
 *  - Bundles core and types
 *  - Controls what handlers can see
 */
mod core;
mod types;

pub use types::*;
