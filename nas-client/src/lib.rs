// SPDX-License-Identifier: GPL-3.0-only

//! Client for the HTTP management API of WD-style NAS appliances
//!
//! Raw bodies flow through four layers:
//!
//! - [`transport`] sends one blocking request and hands back status, body
//!   and cookies;
//! - [`tree`] decodes XML or JSON into a generic [`Node`];
//! - [`extract`] reads defaulted fields out of a tree;
//! - [`normalize`] maps trees onto the `nas_types` entities.
//!
//! [`NasDevice`] ties them together: `refresh()` fetches every endpoint of
//! the configured [`ApiGeneration`] and the getters build entities from
//! that snapshot.

pub mod client;
pub mod config;
pub mod device;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod transport;
pub mod tree;

pub use client::{Endpoint, NasClient};
pub use config::{ApiGeneration, ClientConfig, Credentials};
pub use device::{NasDevice, RawBundle};
pub use error::{NasError, Result};
pub use transport::{HttpTransport, RawResponse, Session, Transport};
pub use tree::{Format, Node};
