//! Recorder listener adapters

mod channel;

pub use channel::ChannelListener;
