/// Test doubles to simulate the CAN bus and timer during integration tests.
use can2010_bridge::protocol::transport::{
    can_frame::CanFrame,
    traits::{bridge_timer::BridgeTimer, can_bus::CanBus},
};
use embassy_time::Instant;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
#[allow(dead_code)]
/// In-memory CAN bus: records what the bridge sends, replays injected frames.
pub struct MockCanBus {
    sent: Arc<Mutex<Vec<CanFrame>>>,
    inbox: Arc<Mutex<VecDeque<CanFrame>>>,
}

#[allow(dead_code)]
impl MockCanBus {
    /// Frames transmitted so far.
    pub fn sent(&self) -> Vec<CanFrame> {
        self.sent.lock().unwrap().clone()
    }

    /// Identifiers of the frames transmitted so far, in order.
    pub fn sent_ids(&self) -> Vec<u16> {
        self.sent.lock().unwrap().iter().map(|frame| frame.id).collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    /// Queue a frame for the bridge to receive.
    pub fn inject(&self, frame: CanFrame) {
        self.inbox.lock().unwrap().push_back(frame);
    }
}

impl CanBus for MockCanBus {
    type Error = ();

    fn transmit(&mut self, frame: &CanFrame) -> Result<(), Self::Error> {
        self.sent.lock().unwrap().push(*frame);
        Ok(())
    }

    fn receive(&mut self) -> Result<Option<CanFrame>, Self::Error> {
        Ok(self.inbox.lock().unwrap().pop_front())
    }
}

#[derive(Clone, Default)]
#[allow(dead_code)]
/// Virtual clock: `delay_ms` advances time instantly and yields to tokio.
pub struct MockTimer {
    now_ms: Arc<AtomicU64>,
}

#[allow(dead_code)]
impl MockTimer {
    pub fn elapsed_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    /// Move the clock forward without going through the runner.
    pub fn advance(&self, millis: u64) {
        self.now_ms.fetch_add(millis, Ordering::SeqCst);
    }
}

impl BridgeTimer for MockTimer {
    fn now(&self) -> Instant {
        Instant::from_millis(self.now_ms.load(Ordering::SeqCst))
    }

    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl Future<Output = ()> + 'a {
        self.now_ms.fetch_add(u64::from(millis), Ordering::SeqCst);
        tokio::task::yield_now()
    }
}
