//! Adapter implementations for the session repository port.

pub mod memory;
