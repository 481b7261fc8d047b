//! Generators for each output module. Contracts carry the decisions; the
//! rest are fixed shapes keyed off the router.

pub mod client;
pub mod contract;
pub mod router;
pub mod server;
pub mod tanstack;
