//! Test suite for socialfeed
//!
//! This module organizes all tests

pub mod integration;
pub mod property;
