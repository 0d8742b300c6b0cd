use crate::errors::StatusCode;
use crate::present::{GraphicsDevice, SwapChain, SwapChainDesc, SwapChainFactory};
use crate::surface::WindowSurface;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Null device that does not own any GPU resources.
#[derive(Debug, Default)]
pub struct NullDevice;

impl NullDevice {
    pub fn new() -> Self {
        Self
    }
}

impl GraphicsDevice for NullDevice {
    fn name(&self) -> &str {
        "NullDevice"
    }
}

/// Factory that hands out [`NullSwapChain`]s, or fails every request with a fixed status.
#[derive(Debug, Default)]
pub struct NullSwapChainFactory {
    fail_with: Option<StatusCode>,
    window_chains: AtomicUsize,
    composition_chains: AtomicUsize,
}

impl NullSwapChainFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory whose creation calls always fail with `status`.
    pub fn failing(status: StatusCode) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::default()
        }
    }

    /// Number of chains successfully created for standalone windows.
    pub fn window_chains_created(&self) -> usize {
        self.window_chains.load(Ordering::SeqCst)
    }

    /// Number of chains successfully created for composition.
    pub fn composition_chains_created(&self) -> usize {
        self.composition_chains.load(Ordering::SeqCst)
    }

    fn create(&self, desc: &SwapChainDesc, counter: &AtomicUsize) -> Result<Box<dyn SwapChain>, StatusCode> {
        if let Some(status) = self.fail_with {
            return Err(status);
        }

        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(NullSwapChain::new(*desc)))
    }
}

impl SwapChainFactory for NullSwapChainFactory {
    fn create_for_window(
        &self,
        _device: &dyn GraphicsDevice,
        _window: &dyn WindowSurface,
        desc: &SwapChainDesc,
    ) -> Result<Box<dyn SwapChain>, StatusCode> {
        self.create(desc, &self.window_chains)
    }

    fn create_for_composition(
        &self,
        _device: &dyn GraphicsDevice,
        desc: &SwapChainDesc,
    ) -> Result<Box<dyn SwapChain>, StatusCode> {
        self.create(desc, &self.composition_chains)
    }
}

/// Swap chain that presents nothing and only remembers how it was created.
#[derive(Debug)]
pub struct NullSwapChain {
    desc: SwapChainDesc,
}

impl NullSwapChain {
    pub fn new(desc: SwapChainDesc) -> Self {
        Self { desc }
    }
}

impl SwapChain for NullSwapChain {
    fn desc(&self) -> SwapChainDesc {
        self.desc
    }
}
