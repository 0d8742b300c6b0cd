// src/host.rs
//! Surface host: binds a rendering backend to exactly one native surface.
//!
//! A [`SurfaceHost`] is created around a caller-supplied native handle and bound to it with
//! [`SurfaceHost::initialize`]. After that it keeps an up-to-date copy of the surface's client
//! rectangle (updated by the surface's own size-changed notifications, which may arrive on any
//! thread) and creates presentation chains configured for whichever surface variant it is
//! bound to.
//!
//! The native handle is borrowed, never owned: it must outlive the host. Dropping the host
//! removes its size-changed registration.
//!
//! ```
//! use gosub_surface::host::SurfaceHost;
//! use gosub_surface::present::null::{NullDevice, NullSwapChainFactory};
//! use gosub_surface::present::PixelFormat;
//! use gosub_surface::surface::headless::HeadlessWindow;
//! use gosub_surface::surface::{Bounds, RectF};
//!
//! let window = HeadlessWindow::new(RectF::new(0.0, 0.0, 1024.0, 768.0));
//! let mut host = SurfaceHost::new(Some(&window));
//! assert!(host.initialize());
//! assert_eq!(host.client_rect(), Some(Bounds::new(1024, 768)));
//!
//! let mut chain = None;
//! host.create_swap_chain(
//!     Some(&NullDevice::new()),
//!     Some(&NullSwapChainFactory::new()),
//!     PixelFormat::B8G8R8A8Unorm,
//!     1024,
//!     768,
//!     Some(&mut chain),
//! )
//! .unwrap();
//! assert_eq!(chain.unwrap().desc().buffer_count, 2);
//! ```

use crate::config::HostConfig;
use crate::errors::SurfaceError;
use crate::present::{GraphicsDevice, PixelFormat, SwapChain, SwapChainDesc, SwapChainFactory};
use crate::surface::{classify, Bounds, NativeSurface, SurfaceCapability, SurfaceKind};
use adapter::{PanelAdapter, SurfaceAdapter, WindowAdapter};
use binding::Binding;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tokio::sync::watch;
use uuid::Uuid;

mod adapter;
mod binding;

/// A unique identifier for a surface host, used to tell hosts apart in logs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostId(Uuid);

impl HostId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HostId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for HostId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Display for HostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct SurfaceHost<'a> {
    /// ID of the host
    id: HostId,
    /// Host configuration
    config: HostConfig,
    /// Caller-owned native window. `None` models a null handle.
    native: Option<&'a dyn NativeSurface>,
    /// Present once `initialize()` succeeded
    binding: Option<Binding<'a>>,
}

impl std::fmt::Debug for SurfaceHost<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceHost")
            .field("id", &self.id)
            .field("native", &self.native.map(|n| n.class_name()))
            .field("kind", &self.surface_kind())
            .field("client_rect", &self.client_rect())
            .finish()
    }
}

impl<'a> SurfaceHost<'a> {
    /// Creates an unbound host around `native` using the default configuration.
    pub fn new(native: Option<&'a dyn NativeSurface>) -> Self {
        Self::with_config(native, HostConfig::default())
    }

    pub fn with_config(native: Option<&'a dyn NativeSurface>, config: HostConfig) -> Self {
        Self {
            id: HostId::new(),
            config,
            native,
            binding: None,
        }
    }

    pub fn id(&self) -> HostId {
        self.id
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Binds the host to its native surface. Returns `false` when the handle is null or not a
    /// supported surface, in which case nothing was registered on it.
    pub fn initialize(&mut self) -> bool {
        match self.try_initialize() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Host[{}]: initialization failed: {e}", self.id);
                false
            }
        }
    }

    /// Same as [`initialize`](Self::initialize) but reports why binding failed.
    ///
    /// Classifies the handle, reads the initial bounds once and registers one size-changed
    /// handler. A host binds at most once; later calls fail with
    /// [`SurfaceError::AlreadyInitialized`] and leave the existing bind untouched.
    pub fn try_initialize(&mut self) -> Result<(), SurfaceError> {
        if self.binding.is_some() {
            return Err(SurfaceError::AlreadyInitialized);
        }

        let native = self.native.ok_or(SurfaceError::NullHandle)?;

        let capability = classify(Some(native));
        log::debug!("Host[{}]: {} classified as {:?}", self.id, native.class_name(), capability);

        let adapter: Box<dyn SurfaceAdapter + 'a> = match capability {
            SurfaceCapability::Window(window) => {
                Box::new(WindowAdapter::new(window, self.config.fallback_dpi))
            }
            SurfaceCapability::Panel(panel) => Box::new(PanelAdapter::new(panel)),
            SurfaceCapability::Invalid => return Err(SurfaceError::UnsupportedSurface),
        };

        let binding = Binding::establish(self.id, adapter)?;
        log::info!(
            "Host[{}]: bound to {} surface, client rect {:?}",
            self.id,
            binding.adapter().kind(),
            binding.bounds()
        );

        self.binding = Some(binding);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.binding.is_some()
    }

    /// Variant of the bound surface.
    pub fn surface_kind(&self) -> Option<SurfaceKind> {
        self.binding.as_ref().map(|b| b.adapter().kind())
    }

    /// Cached client rectangle. Never queries the surface; `None` until bound.
    pub fn client_rect(&self) -> Option<Bounds> {
        self.binding.as_ref().map(|b| b.bounds())
    }

    /// Always `false`: neither surface variant can be minimized.
    pub fn is_iconic(&self) -> bool {
        self.binding
            .as_ref()
            .map(|b| b.adapter().is_iconic())
            .unwrap_or(false)
    }

    /// Receiver that wakes up on the next resize and always holds the latest client rect.
    pub fn subscribe_resize(&self) -> Option<watch::Receiver<Bounds>> {
        self.binding.as_ref().map(|b| b.watch())
    }

    /// Creates a presentation chain for the bound surface and writes it into `swap_chain`.
    ///
    /// `None` for `device`, `factory` or `swap_chain`, or a zero `width`/`height`, fails with
    /// [`SurfaceError::InvalidArgument`] before anything else happens. Creation failures from
    /// the factory come back as [`SurfaceError::Creation`] with the factory's status
    /// unchanged. `swap_chain` is only written on success.
    pub fn create_swap_chain(
        &self,
        device: Option<&dyn GraphicsDevice>,
        factory: Option<&dyn SwapChainFactory>,
        format: PixelFormat,
        width: u32,
        height: u32,
        swap_chain: Option<&mut Option<Box<dyn SwapChain>>>,
    ) -> Result<(), SurfaceError> {
        let result = self.create_swap_chain_inner(device, factory, format, width, height, swap_chain);
        if let Err(e) = &result {
            log::warn!("Host[{}]: create_swap_chain failed ({}): {e}", self.id, e.status());
        }
        result
    }

    fn create_swap_chain_inner(
        &self,
        device: Option<&dyn GraphicsDevice>,
        factory: Option<&dyn SwapChainFactory>,
        format: PixelFormat,
        width: u32,
        height: u32,
        swap_chain: Option<&mut Option<Box<dyn SwapChain>>>,
    ) -> Result<(), SurfaceError> {
        let device = device.ok_or(SurfaceError::InvalidArgument("device"))?;
        let factory = factory.ok_or(SurfaceError::InvalidArgument("factory"))?;
        if width == 0 {
            return Err(SurfaceError::InvalidArgument("width"));
        }
        if height == 0 {
            return Err(SurfaceError::InvalidArgument("height"));
        }
        let out = swap_chain.ok_or(SurfaceError::InvalidArgument("swap_chain"))?;

        let adapter = self.binding.as_ref().ok_or(SurfaceError::NotInitialized)?.adapter();

        let desc = SwapChainDesc::new(format, width, height, adapter.scaling(), adapter.alpha_mode());
        let chain = adapter.create_swap_chain(device, factory, &desc)?;
        log::debug!(
            "Host[{}]: created {}x{} swap chain on {} for {} surface",
            self.id,
            width,
            height,
            device.name(),
            adapter.kind()
        );

        *out = Some(chain);
        Ok(())
    }
}
