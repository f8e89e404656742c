//! Autograder image build-context management.
//!
//! Models the build context as data (payload directory, setup plan, base
//! image), renders the Dockerfile and setup scripts, stages everything into
//! a build directory, and fingerprints the result so unchanged contexts are
//! not rebuilt. Invoking the container runtime on a staged context is the
//! runtime crate's job; everything in this crate is pure filesystem work.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod cache;
pub mod context;
pub mod dockerfile;
pub mod hash;
pub mod setup;
