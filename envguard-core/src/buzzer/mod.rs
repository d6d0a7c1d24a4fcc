//! Buzzer pulse sequencing
//!
//! Plays named patterns synchronously on a [`BuzzerOutput`](crate::traits::BuzzerOutput).

pub mod sequencer;

pub use sequencer::BuzzerSequencer;
