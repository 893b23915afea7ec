//! Shared bridge state and the loop that drives it.
//!
//! Every mutable piece of the bridge (popup cache, rolling checksum, cluster test
//! session) sits behind one [`embassy_sync`] blocking mutex. Each operation takes
//! the lock once and runs to completion inside it, so two contexts can never pick
//! the same free popup slot or interleave checksum counter updates.
//!
//! Firmware picks the raw mutex: `NoopRawMutex` when everything runs in one
//! executor, `CriticalSectionRawMutex` when interrupts or other cores are involved.
//! No allocation is performed by the library.
use core::cell::RefCell;
use core::future::Future;

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};
use embassy_time::Instant;
use futures_util::{future::select, future::Either, pin_mut};

use crate::infra::codec::checksum::ChecksumEngine;
use crate::protocol::management::cluster_test::ClusterTest;
use crate::protocol::management::popup_cache::{PopupCache, PopupOutcome};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::{bridge_timer::BridgeTimer, can_bus::CanBus};
use crate::protocol::transport::RUNNER_POLL_DELAY_MS;

/// Upper bound of frames drained from the bus per loop iteration, so a chatty
/// bus cannot starve the scheduler.
pub const MAX_FRAMES_PER_POLL: usize = 16;

/// Everything the bridge mutates.
#[derive(Debug, Clone)]
pub struct BridgeState {
    pub popups: PopupCache,
    pub checksum: ChecksumEngine,
    pub cluster: ClusterTest,
}

impl BridgeState {
    pub fn new(cluster: ClusterTest) -> Self {
        Self {
            popups: PopupCache::new(),
            checksum: ChecksumEngine::new(),
            cluster,
        }
    }
}

/// [`BridgeState`] guarded by a single critical section.
pub struct SharedBridge<M: RawMutex> {
    state: Mutex<M, RefCell<BridgeState>>,
}

impl<M: RawMutex> SharedBridge<M> {
    pub fn new(state: BridgeState) -> Self {
        Self {
            state: Mutex::new(RefCell::new(state)),
        }
    }

    /// Run `f` with exclusive access to the state.
    pub fn lock<R>(&self, f: impl FnOnce(&mut BridgeState) -> R) -> R {
        self.state.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// See [`PopupCache::set_popup`].
    pub fn set_popup<C: CanBus + ?Sized>(
        &self,
        can_bus: &mut C,
        present: bool,
        id: u16,
        priority: u8,
        parameters: u8,
    ) -> PopupOutcome {
        self.lock(|state| {
            state
                .popups
                .set_popup(can_bus, present, id, priority, parameters)
        })
    }

    /// See [`ChecksumEngine::compute`].
    pub fn checksum(&self, frame: &[u8; 7]) -> u8 {
        self.lock(|state| state.checksum.compute(frame))
    }

    /// See [`ChecksumEngine::seal`].
    pub fn seal(&self, payload: &mut [u8; 8]) -> u8 {
        self.lock(|state| state.checksum.seal(payload))
    }

    /// See [`ClusterTest::poll`].
    pub fn poll_cluster<C: CanBus + ?Sized>(&self, now: Instant, can_bus: &mut C) -> Option<u16> {
        self.lock(|state| state.cluster.poll(now, can_bus))
    }
}

//==================================================================================RUNNER
/// Driver loop: drains received frames into a handler and polls the cluster
/// test scheduler, then yields for [`RUNNER_POLL_DELAY_MS`].
pub struct BridgeRunner<'a, M: RawMutex, C: CanBus, T: BridgeTimer> {
    bridge: &'a SharedBridge<M>,
    can_bus: C,
    timer: T,
}

impl<'a, M, C, T> BridgeRunner<'a, M, C, T>
where
    M: RawMutex,
    C: CanBus,
    T: BridgeTimer,
{
    pub fn new(bridge: &'a SharedBridge<M>, can_bus: C, timer: T) -> Self {
        Self {
            bridge,
            can_bus,
            timer,
        }
    }

    /// One iteration without the trailing delay. Returns the scheduler counter
    /// when it ticked.
    pub fn step<F>(&mut self, on_frame: &mut F) -> Option<u16>
    where
        F: FnMut(&SharedBridge<M>, &mut C, CanFrame),
    {
        for _ in 0..MAX_FRAMES_PER_POLL {
            match self.can_bus.receive() {
                Ok(Some(frame)) => on_frame(self.bridge, &mut self.can_bus, frame),
                Ok(None) => break,
                Err(_err) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("CAN receive error");
                    break;
                }
            }
        }

        self.bridge.poll_cluster(self.timer.now(), &mut self.can_bus)
    }

    /// Run `iterations` loop iterations.
    pub async fn run_for<F>(&mut self, iterations: u32, mut on_frame: F)
    where
        F: FnMut(&SharedBridge<M>, &mut C, CanFrame),
    {
        for _ in 0..iterations {
            self.step(&mut on_frame);
            self.timer.delay_ms(RUNNER_POLL_DELAY_MS).await;
        }
    }

    /// Run forever.
    pub async fn drive<F>(mut self, on_frame: F)
    where
        F: FnMut(&SharedBridge<M>, &mut C, CanFrame),
    {
        self.drive_loop(on_frame).await
    }

    /// Run until `stop` completes, then give the bus and timer back.
    ///
    /// `stop` is only observed between iterations: a step that already started
    /// finishes first.
    pub async fn run_until<F, S>(mut self, stop: S, on_frame: F) -> (C, T)
    where
        F: FnMut(&SharedBridge<M>, &mut C, CanFrame),
        S: Future<Output = ()>,
    {
        {
            let drive_future = self.drive_loop(on_frame);
            pin_mut!(drive_future);
            pin_mut!(stop);

            match select(drive_future, stop).await {
                Either::Left(((), _)) => {}
                Either::Right(((), _pending_drive)) => {
                    #[cfg(feature = "defmt")]
                    defmt::info!("Bridge runner stopped");
                }
            }
        }
        self.into_parts()
    }

    async fn drive_loop<F>(&mut self, mut on_frame: F)
    where
        F: FnMut(&SharedBridge<M>, &mut C, CanFrame),
    {
        loop {
            self.step(&mut on_frame);
            self.timer.delay_ms(RUNNER_POLL_DELAY_MS).await;
        }
    }

    /// Give the bus and timer back.
    pub fn into_parts(self) -> (C, T) {
        (self.can_bus, self.timer)
    }
}
