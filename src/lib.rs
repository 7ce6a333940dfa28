//! Hourly traffic averages backed by a segment tree.
//!
//! The [`index`] module holds the range aggregate index itself. The other
//! modules load configuration, generate sample data and format reports for
//! the command line.

pub mod config;
pub mod index;
pub mod manager;
pub mod sample;
