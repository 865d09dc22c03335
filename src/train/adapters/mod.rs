//! Adapter implementations for the train repository port.

pub mod memory;
