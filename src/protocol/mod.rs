//! High-level components of the bridge: frame catalogue, bridge state machines,
//! and CAN transport.
pub mod management;
pub mod messages;
pub mod transport;
