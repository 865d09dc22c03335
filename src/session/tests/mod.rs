//! Service-level scenario tests for the session bounded context.

mod service_tests;
