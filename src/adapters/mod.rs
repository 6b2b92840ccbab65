// Adapters layer: concrete implementations of the domain ports.

#[cfg(feature = "rpc")]
pub mod registry;
