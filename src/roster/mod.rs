//! Reference data and rolling stock: stations, AAR types, industries,
//! routes, locomotives, and cars.
//!
//! This context carries no business workflow of its own (see
//! [`domain`]'s module documentation); session, car-order, and train
//! operations are the only things that read and mutate it.

pub mod adapters;
pub mod domain;
pub mod ports;
