//! Native presentation surfaces.
//!
//! A caller hands the host an opaque [`NativeSurface`]. The host never assumes what it is:
//! it asks the object for one of the two capabilities it knows how to drive, a standalone
//! [`WindowSurface`] or an embeddable [`PanelSurface`], and refuses anything else (see
//! [`classify`]).
//!
//! Both capabilities expose the same three things (a bounds query and a register/unregister
//! pair for size-changed notifications) through structurally independent traits, because
//! the platform objects behind them are unrelated.

use crate::errors::StatusCode;
use crate::present::SwapChain;
use std::fmt::Display;
use std::sync::Arc;

mod bounds;
mod classify;
pub mod headless;

pub use bounds::{dips_to_pixels, Bounds, RectF, SizeF, SurfaceSize};
pub use classify::{classify, SurfaceCapability, SurfaceKind};

/// Registration token returned by a surface's size-changed notification mechanism.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventToken(pub u64);

impl Display for EventToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Callback invoked with the new size whenever a surface is resized. May be called from any
/// thread.
pub type SizeChangedHandler = Arc<dyn Fn(SizeF) + Send + Sync>;

/// Base family of every object the host accepts as a native window.
///
/// Implementors override the accessor of each capability they actually provide. An object
/// that overrides neither is a valid native object but not a surface the host can bind.
pub trait NativeSurface: Send + Sync {
    /// Human readable runtime class, used for diagnostics only.
    fn class_name(&self) -> &str;

    fn as_window(&self) -> Option<&dyn WindowSurface> {
        None
    }

    fn as_panel(&self) -> Option<&dyn PanelSurface> {
        None
    }
}

/// Standalone, full-screen window surface. Geometry is reported in device-independent pixels.
pub trait WindowSurface: Send + Sync {
    /// Current window bounds in DIPs.
    fn bounds(&self) -> Result<RectF, StatusCode>;

    /// Logical DPI of the display the window lives on.
    fn logical_dpi(&self) -> Result<f32, StatusCode>;

    /// Registers a handler receiving the new size (in DIPs) on every resize.
    fn add_size_changed(&self, handler: SizeChangedHandler) -> Result<EventToken, StatusCode>;

    fn remove_size_changed(&self, token: EventToken) -> Result<(), StatusCode>;
}

/// Embeddable panel surface. Geometry is reported in physical pixels of its layout slot.
pub trait PanelSurface: Send + Sync {
    /// Actual layout size of the panel.
    fn actual_size(&self) -> Result<SizeF, StatusCode>;

    /// Registers a handler receiving the new layout size on every resize.
    fn add_size_changed(&self, handler: SizeChangedHandler) -> Result<EventToken, StatusCode>;

    fn remove_size_changed(&self, token: EventToken) -> Result<(), StatusCode>;

    /// Attaches a composition swap chain so the panel presents it.
    fn set_swap_chain(&self, swap_chain: &dyn SwapChain) -> Result<(), StatusCode>;
}
