//! Unit tests for `gerna_syntax` types.
