//! Test-case execution against the autograder image.
//!
//! Each test case gets one single-use container: fixture directories are
//! bind-mounted into the fixed `/autograder` paths, the container runs to
//! completion in the foreground, and its exit status is the sole result.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod backend;
pub mod batch;
pub mod runner;
