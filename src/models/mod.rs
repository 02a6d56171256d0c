/*!
Data structures for BGP sessions and the IX-F member export document.
*/
mod ixf;
mod network;
mod session;

pub use ixf::*;
pub use network::*;
pub use session::*;
