//! Service-level scenario tests for the train bounded context.
