//! In-memory trace implementations for testing purpose.

/// Structs used for testing
pub mod trace;
