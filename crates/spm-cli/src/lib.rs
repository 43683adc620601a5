//! Library pieces of the `smartpaymap` CLI that are tested in isolation.

pub mod logging;
pub mod overrides;
pub mod settings;
