//! Environment sensor implementations

pub mod dht11;

pub use dht11::{decode_frame, Dht11};
