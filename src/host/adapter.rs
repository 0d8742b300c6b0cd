//! Per-variant glue between the host and a classified native surface.
//!
//! Each adapter knows how to read the initial bounds of its surface, how to (un)register
//! for size-changed notifications, what it contributes to the swap chain descriptor, and
//! which factory entry point creates a chain for it.

use crate::errors::SurfaceError;
use crate::host::binding::ResizeSink;
use crate::present::{
    self, AlphaMode, GraphicsDevice, Scaling, SwapChain, SwapChainDesc, SwapChainFactory,
    SwapChainTarget,
};
use crate::surface::{Bounds, EventToken, PanelSurface, SizeF, SurfaceKind, WindowSurface};
use std::sync::Arc;

pub(crate) trait SurfaceAdapter: Send + Sync {
    fn kind(&self) -> SurfaceKind;

    /// Reads the current bounds from the surface. Called once per bind.
    fn query_bounds(&self) -> Result<Bounds, SurfaceError>;

    fn subscribe(&self, sink: ResizeSink) -> Result<EventToken, SurfaceError>;

    fn unsubscribe(&self, token: EventToken) -> Result<(), SurfaceError>;

    fn scaling(&self) -> Scaling;

    fn alpha_mode(&self) -> AlphaMode;

    /// Neither supported surface model can be minimized.
    fn is_iconic(&self) -> bool {
        false
    }

    fn create_swap_chain(
        &self,
        device: &dyn GraphicsDevice,
        factory: &dyn SwapChainFactory,
        desc: &SwapChainDesc,
    ) -> Result<Box<dyn SwapChain>, SurfaceError>;
}

/// Standalone window. Presents 1:1 and leaves alpha to the OS compositor.
pub(crate) struct WindowAdapter<'a> {
    window: &'a dyn WindowSurface,
    dpi: f32,
}

impl<'a> WindowAdapter<'a> {
    /// Reads the window's logical DPI once; `fallback_dpi` is used when it is unavailable.
    pub(crate) fn new(window: &'a dyn WindowSurface, fallback_dpi: f32) -> Self {
        let dpi = match window.logical_dpi() {
            Ok(dpi) if dpi.is_finite() && dpi > 0.0 => dpi,
            Ok(dpi) => {
                log::debug!("Window reported unusable logical DPI {dpi}, using {fallback_dpi}");
                fallback_dpi
            }
            Err(status) => {
                log::debug!("Logical DPI query failed ({status}), using {fallback_dpi}");
                fallback_dpi
            }
        };

        Self { window, dpi }
    }

    #[cfg(test)]
    pub(crate) fn dpi(&self) -> f32 {
        self.dpi
    }
}

impl SurfaceAdapter for WindowAdapter<'_> {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Window
    }

    fn query_bounds(&self) -> Result<Bounds, SurfaceError> {
        let rect = self
            .window
            .bounds()
            .map_err(|status| SurfaceError::Native { op: "bounds", status })?;
        Ok(Bounds::from_dips(rect.size(), self.dpi))
    }

    fn subscribe(&self, sink: ResizeSink) -> Result<EventToken, SurfaceError> {
        let dpi = self.dpi;
        self.window
            .add_size_changed(Arc::new(move |size: SizeF| {
                sink.deliver(Bounds::from_dips(size, dpi))
            }))
            .map_err(|status| SurfaceError::Native { op: "add_size_changed", status })
    }

    fn unsubscribe(&self, token: EventToken) -> Result<(), SurfaceError> {
        self.window
            .remove_size_changed(token)
            .map_err(|status| SurfaceError::Native { op: "remove_size_changed", status })
    }

    fn scaling(&self) -> Scaling {
        Scaling::None
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Unspecified
    }

    fn create_swap_chain(
        &self,
        device: &dyn GraphicsDevice,
        factory: &dyn SwapChainFactory,
        desc: &SwapChainDesc,
    ) -> Result<Box<dyn SwapChain>, SurfaceError> {
        present::create_swap_chain(device, factory, SwapChainTarget::Window(self.window), desc)
            .map_err(SurfaceError::Creation)
    }
}

/// Embedded panel. Always stretches to the panel's layout size and is treated as opaque.
pub(crate) struct PanelAdapter<'a> {
    panel: &'a dyn PanelSurface,
}

impl<'a> PanelAdapter<'a> {
    pub(crate) fn new(panel: &'a dyn PanelSurface) -> Self {
        Self { panel }
    }
}

impl SurfaceAdapter for PanelAdapter<'_> {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Panel
    }

    fn query_bounds(&self) -> Result<Bounds, SurfaceError> {
        let size = self
            .panel
            .actual_size()
            .map_err(|status| SurfaceError::Native { op: "actual_size", status })?;
        Ok(Bounds::from_size(size))
    }

    fn subscribe(&self, sink: ResizeSink) -> Result<EventToken, SurfaceError> {
        self.panel
            .add_size_changed(Arc::new(move |size: SizeF| sink.deliver(Bounds::from_size(size))))
            .map_err(|status| SurfaceError::Native { op: "add_size_changed", status })
    }

    fn unsubscribe(&self, token: EventToken) -> Result<(), SurfaceError> {
        self.panel
            .remove_size_changed(token)
            .map_err(|status| SurfaceError::Native { op: "remove_size_changed", status })
    }

    fn scaling(&self) -> Scaling {
        Scaling::Stretch
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Ignore
    }

    fn create_swap_chain(
        &self,
        device: &dyn GraphicsDevice,
        factory: &dyn SwapChainFactory,
        desc: &SwapChainDesc,
    ) -> Result<Box<dyn SwapChain>, SurfaceError> {
        let chain = present::create_swap_chain(device, factory, SwapChainTarget::Composition, desc)
            .map_err(SurfaceError::Creation)?;

        // A composition chain only shows up once the panel presents it
        self.panel
            .set_swap_chain(chain.as_ref())
            .map_err(|status| SurfaceError::Native { op: "set_swap_chain", status })?;

        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StatusCode;
    use crate::surface::headless::{HeadlessPanel, HeadlessWindow};
    use crate::surface::RectF;

    #[test]
    fn window_adapter_uses_logical_dpi() {
        let window = HeadlessWindow::new(RectF::new(0.0, 0.0, 800.0, 600.0)).with_logical_dpi(144.0);
        let adapter = WindowAdapter::new(&window, 96.0);

        assert_eq!(adapter.dpi(), 144.0);
        assert_eq!(adapter.query_bounds().unwrap(), Bounds::new(1200, 900));
    }

    #[test]
    fn window_adapter_falls_back_when_dpi_is_unavailable() {
        let window = HeadlessWindow::new(RectF::new(0.0, 0.0, 800.0, 600.0))
            .without_logical_dpi(StatusCode::NOT_FOUND);
        let adapter = WindowAdapter::new(&window, 96.0);

        assert_eq!(adapter.dpi(), 96.0);
        assert_eq!(adapter.query_bounds().unwrap(), Bounds::new(800, 600));

        let window = HeadlessWindow::new(RectF::default()).with_logical_dpi(0.0);
        assert_eq!(WindowAdapter::new(&window, 120.0).dpi(), 120.0);
    }

    #[test]
    fn descriptor_contributions_differ_by_variant() {
        let window = HeadlessWindow::new(RectF::default());
        let panel = HeadlessPanel::new(SizeF::default());

        let w = WindowAdapter::new(&window, 96.0);
        let p = PanelAdapter::new(&panel);

        assert_eq!((w.scaling(), w.alpha_mode()), (Scaling::None, AlphaMode::Unspecified));
        assert_eq!((p.scaling(), p.alpha_mode()), (Scaling::Stretch, AlphaMode::Ignore));
        assert!(!w.is_iconic());
        assert!(!p.is_iconic());
        assert_eq!(w.kind(), SurfaceKind::Window);
        assert_eq!(p.kind(), SurfaceKind::Panel);
    }

    #[test]
    fn panel_adapter_uses_size_as_is() {
        let panel = HeadlessPanel::new(SizeF::new(640.5, 480.0));
        let adapter = PanelAdapter::new(&panel);
        assert_eq!(adapter.query_bounds().unwrap(), Bounds::new(640, 480));
        assert_eq!(panel.bounds_query_count(), 1);
    }
}
