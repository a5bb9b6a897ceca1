//! Core types for the size check.

/// ByteCount: size of a file in bytes
pub type ByteCount = u64;

/// ByteDelta: new size minus old size; positive means growth
pub type ByteDelta = i128;
