//! Surface hosting for the Gosub renderer.
//!
//! A [`SurfaceHost`] binds a rendering backend to one native surface, either a standalone
//! window or a panel embedded in a composition tree, keeps its client rectangle current and
//! creates presentation chains configured for that surface.

pub mod config;
pub mod errors;
pub mod host;
pub mod logging;
pub mod present;
pub mod surface;

pub use config::HostConfig;
pub use errors::{StatusCode, SurfaceError};
pub use host::{HostId, SurfaceHost};
