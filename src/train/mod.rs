//! Train bounded context: train lifecycle and switch-list planning.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
