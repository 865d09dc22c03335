//! Service-level scenario tests for the car-order bounded context.

mod service_tests;
