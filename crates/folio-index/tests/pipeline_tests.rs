//! Integration test suite for the Folio indexing pipeline.
//!
//! Builds real content trees on disk and checks the documents, taxonomy,
//! related content, and issues that come out the other end.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
mod integration;
