//! Search behavior tests.

mod common;

#[path = "search/correctness.rs"]
mod correctness;

#[path = "search/deduplication.rs"]
mod deduplication;

#[path = "search/ranking.rs"]
mod ranking;

#[path = "search/edge_cases.rs"]
mod edge_cases;

#[path = "search/determinism.rs"]
mod determinism;
