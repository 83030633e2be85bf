//! Integration tests against a fake backend
