//! Common network-related structs.

mod asn;

pub use asn::*;
