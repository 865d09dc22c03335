//! Adapter implementations for the car-order repository port.

pub mod memory;
