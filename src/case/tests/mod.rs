//! Unit tests for the use-case module.

mod service_tests;
