//! Benchmark utilities for the ember engine.
//!
//! - **Microbenchmarks** (`benches/ecs_micro.rs`): spawn and attach, reconciliation, movement
//!   iteration and kill throughput.
//! - **Scenarios**: seeded, repeatable workloads (a particle churn and a moving scene) that the
//!   benches drive frame by frame.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p ember_bench
//!
//! # Run specific benchmark group
//! cargo bench -p ember_bench -- spawn
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.

pub mod components;
pub mod scenarios;
