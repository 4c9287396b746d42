/*!
 * Pointer Module
 * Parsing of the external hash-and-path pointer file
 */

pub mod reader;

// Re-export for convenience
pub use reader::{Pointer, PointerReader};
