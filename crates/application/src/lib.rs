//! passdns application layer: ports and the per-query pipeline.
pub mod ports;
pub mod services;
pub mod use_cases;
