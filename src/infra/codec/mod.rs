//! Byte-level encoders for CAN2010 payloads.
pub mod calendar;
pub mod checksum;
pub mod telemetry;
