//! Property-based tests

mod feed_proptest;
