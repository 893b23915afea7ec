//! Stateful bridge logic: popup de-duplication, the phase-multiplexed cycle
//! scheduler, the cluster test session built on it, and the shared-state wrapper.
pub mod bridge_supervisor;
pub mod cluster_test;
pub mod cycle_scheduler;
pub mod popup_cache;
pub mod scenario;
