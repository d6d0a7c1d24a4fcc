//! Debounced touch channel
//!
//! One instance per physical pad. A channel recognizes a trigger when the
//! measured intensity is strictly below its threshold, the boot block has
//! ended, and more than the debounce window has passed since the previous
//! recognized trigger.

use crate::traits::TouchChannelId;

/// Debounce and threshold state of one touch pad
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchChannel {
    /// Which pad this channel serves
    id: TouchChannelId,
    /// Intensity cutoff (strictly below = touched)
    threshold: u16,
    /// Minimum spacing between recognized triggers (ms)
    debounce_ms: u32,
    /// Time of the last recognized trigger (ms since boot)
    last_trigger_ms: Option<u64>,
    /// Triggers are ignored before this time (ms since boot)
    boot_block_until_ms: u64,
}

impl TouchChannel {
    /// Create a channel
    ///
    /// # Arguments
    /// - `started_at_ms`: time the device started
    /// - `boot_block_ms`: length of the ignore window after start
    pub fn new(
        id: TouchChannelId,
        threshold: u16,
        debounce_ms: u32,
        started_at_ms: u64,
        boot_block_ms: u32,
    ) -> Self {
        Self {
            id,
            threshold,
            debounce_ms,
            last_trigger_ms: None,
            boot_block_until_ms: started_at_ms.saturating_add(boot_block_ms as u64),
        }
    }

    /// Which pad this channel serves
    pub fn id(&self) -> TouchChannelId {
        self.id
    }

    /// Intensity cutoff
    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    /// Time of the last recognized trigger
    pub fn last_trigger_ms(&self) -> Option<u64> {
        self.last_trigger_ms
    }

    /// End of the boot block
    pub fn boot_block_until_ms(&self) -> u64 {
        self.boot_block_until_ms
    }

    /// Check if touches are still ignored at `now_ms`
    pub fn is_boot_blocked(&self, now_ms: u64) -> bool {
        now_ms < self.boot_block_until_ms
    }

    /// Evaluate one sample
    ///
    /// Returns true if the sample is a recognized trigger, and records
    /// `now_ms` as the last trigger time in that case.
    pub fn poll(&mut self, now_ms: u64, raw_intensity: u16) -> bool {
        if self.is_boot_blocked(now_ms) {
            return false;
        }

        if raw_intensity >= self.threshold {
            return false;
        }

        let debounced = match self.last_trigger_ms {
            Some(last) => now_ms.saturating_sub(last) > self.debounce_ms as u64,
            None => true,
        };

        if debounced {
            self.last_trigger_ms = Some(now_ms);
        }
        debounced
    }
}
