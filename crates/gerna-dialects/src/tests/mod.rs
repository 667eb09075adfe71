//! Tests for the built-in dialects.
