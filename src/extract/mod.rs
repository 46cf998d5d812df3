//! Reading playlist rows out of streaming-service pages
//!
//! Selector profiles per platform, saved page parsing and a simulated
//! virtualized list that plugs into the capture engine.

mod page;
mod profile;
mod virtual_list;

pub use page::{fingerprint, FingerprintGate, PageDocument};
pub use profile::{PlatformProfile, StrategyChain};
pub use virtual_list::{ListGeometry, VirtualList};
