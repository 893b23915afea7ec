//! `can2010-bridge` library: the stateful pieces of a CAN2004 ↔ CAN2010 bridge in a
//! `no_std` environment. The crate exposes the infrastructure codecs (telemetry
//! encoders, rolling checksum, calendar helpers), the transport primitives (CAN frame,
//! bus and timer abstractions) and the protocol logic (popup cache, cycle scheduler,
//! cluster test generator).
#![no_std]
//==================================================================================
/// Vehicle-side data types shared by the scheduler and the cluster test generator.
pub mod core;
/// Edge errors (frame construction, configuration, calendar, driver adapter).
pub mod error;
/// Pure codecs used to build CAN2010 payloads.
pub mod infra;
/// Protocol implementation: transport, frame catalogue and bridge state machines.
pub mod protocol;
//==================================================================================
