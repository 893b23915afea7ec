//! De-duplication cache for popups displayed on the CAN2010 device.
//!
//! The bridge can be asked to show the same alert many times per second while
//! a condition lasts. The cache remembers what is currently displayed so that
//! only state changes reach the bus:
//!
//! * show an alert that is not displayed → install it, emit a show frame;
//! * show an alert already displayed with the same parameters → nothing;
//! * show an alert already displayed with other parameters → clear it and emit a
//!   close frame; the new content needs a second call;
//! * hide a displayed alert → clear it, emit a close frame;
//! * hide an unknown alert, or show a new one while eight are displayed → nothing.
use heapless::LinearMap;

use crate::protocol::messages::{popup_frame, PopupCommand};
use crate::protocol::transport::traits::can_bus::{transmit_best_effort, CanBus};

/// Maximum number of alerts tracked at the same time.
pub const POPUP_CACHE_CAPACITY: usize = 8;

/// Identifier reserved as "no alert"; never accepted as a real alert.
pub const EMPTY_ALERT_ID: u16 = 0;

/// Observable result of one [`PopupCache::set_popup`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PopupOutcome {
    /// Nothing was sent: unchanged alert, unknown alert, full cache or reserved id.
    Dropped,
    /// The alert was removed and a close frame was sent.
    Closed,
    /// The alert was installed and a show frame was sent.
    Shown,
}

/// One displayed alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertSlot {
    pub id: u16,
    pub parameters: u8,
}

/// Frame to emit once the cache has been updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Emission {
    command: PopupCommand,
    parameters: u8,
}

/// Bounded map of displayed alerts (identifier → parameters).
#[derive(Debug, Clone)]
pub struct PopupCache {
    alerts: LinearMap<u16, u8, POPUP_CACHE_CAPACITY>,
}

impl Default for PopupCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PopupCache {
    /// Empty cache: nothing displayed.
    pub fn new() -> Self {
        Self {
            alerts: LinearMap::new(),
        }
    }

    /// Request an alert to appear (`present = true`) or disappear.
    ///
    /// Emits at most one `0x1A1` frame on `can_bus`. `priority` above 14 is
    /// clamped by the frame builder. Transmission is best effort; the returned
    /// outcome reflects the cache transition, not the bus.
    pub fn set_popup<C: CanBus + ?Sized>(
        &mut self,
        can_bus: &mut C,
        present: bool,
        id: u16,
        priority: u8,
        parameters: u8,
    ) -> PopupOutcome {
        let Some(emission) = self.update(present, id, parameters) else {
            #[cfg(feature = "defmt")]
            defmt::trace!("Popup {} dropped (present: {})", id, present);
            return PopupOutcome::Dropped;
        };

        let frame = popup_frame(emission.command, priority, emission.parameters);
        transmit_best_effort(can_bus, &frame);

        match emission.command {
            PopupCommand::Show(_id) => {
                #[cfg(feature = "defmt")]
                defmt::info!("Notification sent with message ID: {}", _id);
                PopupOutcome::Shown
            }
            PopupCommand::Close => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Popup {} closed", id);
                PopupOutcome::Closed
            }
        }
    }

    /// Apply the cache transition and describe the frame it calls for.
    fn update(&mut self, present: bool, id: u16, parameters: u8) -> Option<Emission> {
        if id == EMPTY_ALERT_ID {
            return None;
        }

        match (self.alerts.get(&id).copied(), present) {
            (Some(_), false) => {
                self.alerts.remove(&id);
                Some(Emission {
                    command: PopupCommand::Close,
                    parameters,
                })
            }
            (Some(cached), true) if cached == parameters => None,
            // Content changed: clear the displayed popup first. Showing the new
            // content is left to the next call.
            (Some(_), true) => {
                self.alerts.remove(&id);
                Some(Emission {
                    command: PopupCommand::Close,
                    parameters: 0x00,
                })
            }
            (None, false) => None,
            (None, true) => match self.alerts.insert(id, parameters) {
                Ok(_) => Some(Emission {
                    command: PopupCommand::Show(id),
                    parameters,
                }),
                Err(_rejected) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Popup cache full, alert {} not shown", id);
                    None
                }
            },
        }
    }

    /// Whether `id` is currently displayed.
    pub fn is_showing(&self, id: u16) -> bool {
        self.alerts.contains_key(&id)
    }

    /// Parameters of a displayed alert.
    pub fn parameters(&self, id: u16) -> Option<u8> {
        self.alerts.get(&id).copied()
    }

    /// Number of displayed alerts.
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// No room left for a new alert.
    pub fn is_full(&self) -> bool {
        self.alerts.len() == POPUP_CACHE_CAPACITY
    }

    /// Displayed alerts, in no particular order.
    pub fn alerts(&self) -> impl Iterator<Item = AlertSlot> + '_ {
        self.alerts.iter().map(|(&id, &parameters)| AlertSlot { id, parameters })
    }
}
