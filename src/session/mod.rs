//! Session bounded context: the current-session singleton, and the
//! atomic advance/rollback of world state it orchestrates.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
