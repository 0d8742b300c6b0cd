//! Headless native surfaces.
//!
//! [`HeadlessWindow`] and [`HeadlessPanel`] behave like their platform counterparts without a
//! display: they report whatever geometry they were given, keep real size-changed
//! registrations, and deliver notifications when [`resize`](HeadlessWindow::resize) is called.
//! They also count the calls the host makes into them, which makes them useful for offscreen
//! rendering as well as for checking host behaviour.

use crate::config::DEFAULT_DPI;
use crate::errors::StatusCode;
use crate::present::{SwapChain, SwapChainDesc};
use crate::surface::{
    EventToken, NativeSurface, PanelSurface, RectF, SizeChangedHandler, SizeF, WindowSurface,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Size-changed registrations of one surface.
#[derive(Default)]
struct SizeChangedEvent {
    handlers: Mutex<BTreeMap<EventToken, SizeChangedHandler>>,
    next_token: AtomicU64,
}

impl SizeChangedEvent {
    fn add(&self, handler: SizeChangedHandler) -> EventToken {
        let token = EventToken(self.next_token.fetch_add(1, Ordering::SeqCst) + 1);
        self.lock().insert(token, handler);
        token
    }

    fn remove(&self, token: EventToken) -> Result<(), StatusCode> {
        match self.lock().remove(&token) {
            Some(_) => Ok(()),
            None => Err(StatusCode::NOT_FOUND),
        }
    }

    fn len(&self) -> usize {
        self.lock().len()
    }

    fn fire(&self, size: SizeF) {
        // Handlers run outside the lock so they may (un)register freely
        let handlers: Vec<SizeChangedHandler> = self.lock().values().cloned().collect();
        for handler in handlers {
            handler(size);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<EventToken, SizeChangedHandler>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Window surface without a display. Bounds are in DIPs.
pub struct HeadlessWindow {
    bounds: Mutex<RectF>,
    dpi: Mutex<Result<f32, StatusCode>>,
    size_changed: SizeChangedEvent,
    bounds_queries: AtomicUsize,
}

impl HeadlessWindow {
    pub fn new(bounds: RectF) -> Self {
        Self {
            bounds: Mutex::new(bounds),
            dpi: Mutex::new(Ok(DEFAULT_DPI)),
            size_changed: SizeChangedEvent::default(),
            bounds_queries: AtomicUsize::new(0),
        }
    }

    /// Reports the given logical DPI from now on.
    pub fn with_logical_dpi(self, dpi: f32) -> Self {
        *self.dpi.lock().unwrap_or_else(PoisonError::into_inner) = Ok(dpi);
        self
    }

    /// Makes the logical DPI query fail with `status`, like a device without display info.
    pub fn without_logical_dpi(self, status: StatusCode) -> Self {
        *self.dpi.lock().unwrap_or_else(PoisonError::into_inner) = Err(status);
        self
    }

    /// Changes the reported bounds without notifying anyone.
    pub fn set_bounds(&self, bounds: RectF) {
        *self.bounds.lock().unwrap_or_else(PoisonError::into_inner) = bounds;
    }

    /// Changes the reported bounds and signals every size-changed handler.
    pub fn resize(&self, bounds: RectF) {
        self.set_bounds(bounds);
        self.size_changed.fire(bounds.size());
    }

    pub fn bounds_query_count(&self) -> usize {
        self.bounds_queries.load(Ordering::SeqCst)
    }

    pub fn size_changed_registration_count(&self) -> usize {
        self.size_changed.len()
    }
}

impl NativeSurface for HeadlessWindow {
    fn class_name(&self) -> &str {
        "Gosub.Headless.Window"
    }

    fn as_window(&self) -> Option<&dyn WindowSurface> {
        Some(self)
    }
}

impl WindowSurface for HeadlessWindow {
    fn bounds(&self) -> Result<RectF, StatusCode> {
        self.bounds_queries.fetch_add(1, Ordering::SeqCst);
        Ok(*self.bounds.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn logical_dpi(&self) -> Result<f32, StatusCode> {
        *self.dpi.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn add_size_changed(&self, handler: SizeChangedHandler) -> Result<EventToken, StatusCode> {
        Ok(self.size_changed.add(handler))
    }

    fn remove_size_changed(&self, token: EventToken) -> Result<(), StatusCode> {
        self.size_changed.remove(token)
    }
}

/// Panel surface without a display. Sizes are in physical pixels.
pub struct HeadlessPanel {
    size: Mutex<SizeF>,
    size_changed: SizeChangedEvent,
    size_queries: AtomicUsize,
    swap_chain: Mutex<Option<SwapChainDesc>>,
    attach_failure: Option<StatusCode>,
}

impl HeadlessPanel {
    pub fn new(size: SizeF) -> Self {
        Self {
            size: Mutex::new(size),
            size_changed: SizeChangedEvent::default(),
            size_queries: AtomicUsize::new(0),
            swap_chain: Mutex::new(None),
            attach_failure: None,
        }
    }

    /// Makes every [`PanelSurface::set_swap_chain`] call fail with `status`.
    pub fn fail_set_swap_chain(self, status: StatusCode) -> Self {
        Self {
            attach_failure: Some(status),
            ..self
        }
    }

    pub fn set_size(&self, size: SizeF) {
        *self.size.lock().unwrap_or_else(PoisonError::into_inner) = size;
    }

    /// Changes the layout size and signals every size-changed handler.
    pub fn resize(&self, size: SizeF) {
        self.set_size(size);
        self.size_changed.fire(size);
    }

    pub fn bounds_query_count(&self) -> usize {
        self.size_queries.load(Ordering::SeqCst)
    }

    pub fn size_changed_registration_count(&self) -> usize {
        self.size_changed.len()
    }

    /// Descriptor of the chain most recently attached through [`PanelSurface::set_swap_chain`].
    pub fn attached_swap_chain(&self) -> Option<SwapChainDesc> {
        *self.swap_chain.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NativeSurface for HeadlessPanel {
    fn class_name(&self) -> &str {
        "Gosub.Headless.Panel"
    }

    fn as_panel(&self) -> Option<&dyn PanelSurface> {
        Some(self)
    }
}

impl PanelSurface for HeadlessPanel {
    fn actual_size(&self) -> Result<SizeF, StatusCode> {
        self.size_queries.fetch_add(1, Ordering::SeqCst);
        Ok(*self.size.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn add_size_changed(&self, handler: SizeChangedHandler) -> Result<EventToken, StatusCode> {
        Ok(self.size_changed.add(handler))
    }

    fn remove_size_changed(&self, token: EventToken) -> Result<(), StatusCode> {
        self.size_changed.remove(token)
    }

    fn set_swap_chain(&self, swap_chain: &dyn SwapChain) -> Result<(), StatusCode> {
        if let Some(status) = self.attach_failure {
            return Err(status);
        }
        *self.swap_chain.lock().unwrap_or_else(PoisonError::into_inner) = Some(swap_chain.desc());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn registrations_are_tracked_per_token() {
        let window = HeadlessWindow::new(RectF::new(0.0, 0.0, 10.0, 10.0));
        let a = window.add_size_changed(Arc::new(|_: SizeF| {})).unwrap();
        let b = window.add_size_changed(Arc::new(|_: SizeF| {})).unwrap();
        assert_ne!(a, b);
        assert_eq!(window.size_changed_registration_count(), 2);

        window.remove_size_changed(a).unwrap();
        assert_eq!(window.size_changed_registration_count(), 1);
        assert_eq!(window.remove_size_changed(a), Err(StatusCode::NOT_FOUND));
    }

    #[test]
    fn resize_delivers_new_size() {
        let panel = HeadlessPanel::new(SizeF::new(800.0, 600.0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        panel
            .add_size_changed(Arc::new(move |size: SizeF| sink.lock().unwrap().push(size)))
            .unwrap();

        panel.resize(SizeF::new(1024.0, 768.0));

        assert_eq!(*seen.lock().unwrap(), vec![SizeF::new(1024.0, 768.0)]);
        // notification delivery is not a query
        assert_eq!(panel.bounds_query_count(), 0);
        assert_eq!(panel.actual_size().unwrap(), SizeF::new(1024.0, 768.0));
        assert_eq!(panel.bounds_query_count(), 1);
    }

    #[test]
    fn handler_may_unregister_itself() {
        let window = Arc::new(HeadlessWindow::new(RectF::default()));
        let token = Arc::new(Mutex::new(None));

        let w = window.clone();
        let t = token.clone();
        let registered = window
            .add_size_changed(Arc::new(move |_: SizeF| {
                if let Some(tok) = t.lock().unwrap().take() {
                    w.remove_size_changed(tok).unwrap();
                }
            }))
            .unwrap();
        *token.lock().unwrap() = Some(registered);

        window.resize(RectF::new(0.0, 0.0, 5.0, 5.0));
        assert_eq!(window.size_changed_registration_count(), 0);
    }

    #[test]
    fn panel_can_refuse_swap_chains() {
        use crate::present::null::NullSwapChain;
        use crate::present::{AlphaMode, PixelFormat, Scaling};

        let desc = SwapChainDesc::new(PixelFormat::Unknown, 1, 1, Scaling::Stretch, AlphaMode::Ignore);
        let chain = NullSwapChain::new(desc);

        let panel = HeadlessPanel::new(SizeF::new(1.0, 1.0)).fail_set_swap_chain(StatusCode::FAIL);
        assert_eq!(panel.set_swap_chain(&chain), Err(StatusCode::FAIL));
        assert!(panel.attached_swap_chain().is_none());

        let panel = HeadlessPanel::new(SizeF::new(1.0, 1.0));
        assert_eq!(panel.set_swap_chain(&chain), Ok(()));
        assert_eq!(panel.attached_swap_chain(), Some(desc));
    }

    #[test]
    fn logical_dpi_can_be_unavailable() {
        let window = HeadlessWindow::new(RectF::default()).without_logical_dpi(StatusCode::NOT_FOUND);
        assert_eq!(window.logical_dpi(), Err(StatusCode::NOT_FOUND));

        let window = HeadlessWindow::new(RectF::default()).with_logical_dpi(120.0);
        assert_eq!(window.logical_dpi(), Ok(120.0));
    }
}
