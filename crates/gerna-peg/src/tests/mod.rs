//! Unit tests for the packrat interpreter.

mod engine_tests;
