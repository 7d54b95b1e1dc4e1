// Library interface for fomezero
// Exposes the aggregation engine and its adapters to the binary and tests

pub mod cache;
pub mod config;
pub mod dashboard;
pub mod engine;
pub mod export;
pub mod format;
pub mod map;
pub mod metrics;
pub mod report;
pub mod table;

#[cfg(test)]
mod test_utils;
