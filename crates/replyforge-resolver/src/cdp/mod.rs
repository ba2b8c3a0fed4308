//! Chrome DevTools Protocol page backend.
//!
//! Connects to a browser started with `--remote-debugging-port` and exposes
//! one attached page as a [`HostPage`](crate::page::HostPage). Using the
//! user's running browser keeps their logged-in session intact.

mod client;
mod error;
mod page;
mod protocol;

pub use client::CdpClient;
pub use error::CdpError;
pub use page::CdpPage;
pub use protocol::PageInfo;
