//! Abstraction traits used by the transport layer (CAN bus and timer).
pub mod bridge_timer;
pub mod can_bus;

#[cfg(test)]
pub(crate) mod test_bus;
