//! Presentation chain (swap chain) descriptors and the backend collaborators that create them.
//!
//! The host never talks to a GPU API directly. It builds a [`SwapChainDesc`] and hands it,
//! together with the caller's [`GraphicsDevice`], to a [`SwapChainFactory`] through
//! [`create_swap_chain`].

use crate::errors::StatusCode;
use crate::surface::{SurfaceSize, WindowSurface};
use bitflags::bitflags;

pub mod null;

/// Number of buffers in every chain the host creates.
pub const BUFFER_COUNT: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Unknown,
    B8G8R8A8Unorm,
    B8G8R8A8UnormSrgb,
    R8G8B8A8Unorm,
    R8G8B8A8UnormSrgb,
    R10G10B10A2Unorm,
    R16G16B16A16Float,
}

/// How the back buffer is mapped onto the surface when their sizes differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scaling {
    Stretch,
    None,
    AspectRatioStretch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlphaMode {
    Unspecified,
    Premultiplied,
    Straight,
    Ignore,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwapEffect {
    Discard,
    Sequential,
    FlipSequential,
    FlipDiscard,
}

bitflags! {
    pub struct BufferUsage: u32 {
        const SHADER_INPUT         = 0x0010;
        const RENDER_TARGET_OUTPUT = 0x0020;
        const BACK_BUFFER          = 0x0040;
        const SHARED               = 0x0080;
        const READ_ONLY            = 0x0100;
    }
}

/// Multisampling parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SampleDesc {
    pub count: u32,
    pub quality: u32,
}

/// Full description of a presentation chain, built fresh for every creation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwapChainDesc {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub stereo: bool,
    pub sample_desc: SampleDesc,
    pub buffer_usage: BufferUsage,
    pub buffer_count: u32,
    pub scaling: Scaling,
    pub swap_effect: SwapEffect,
    pub alpha_mode: AlphaMode,
    pub flags: u32,
}

impl SwapChainDesc {
    /// Double-buffered, flip-sequential, non-multisampled chain. Only `scaling` and
    /// `alpha_mode` vary between surface variants.
    pub fn new(
        format: PixelFormat,
        width: u32,
        height: u32,
        scaling: Scaling,
        alpha_mode: AlphaMode,
    ) -> Self {
        Self {
            width,
            height,
            format,
            stereo: false,
            sample_desc: SampleDesc { count: 1, quality: 0 },
            buffer_usage: BufferUsage::RENDER_TARGET_OUTPUT | BufferUsage::BACK_BUFFER,
            buffer_count: BUFFER_COUNT,
            scaling,
            swap_effect: SwapEffect::FlipSequential,
            alpha_mode,
            flags: 0,
        }
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize {
            width: self.width,
            height: self.height,
        }
    }
}

/// Rendering device owned by the backend. Opaque to the host.
pub trait GraphicsDevice: Send + Sync {
    fn name(&self) -> &str;
}

/// A created presentation chain. Ownership passes to the caller.
pub trait SwapChain: Send + Sync {
    /// Descriptor the chain was created with.
    fn desc(&self) -> SwapChainDesc;
}

/// Backend entry point for creating presentation chains.
pub trait SwapChainFactory: Send + Sync {
    /// Creates a chain that presents directly into a standalone window.
    fn create_for_window(
        &self,
        device: &dyn GraphicsDevice,
        window: &dyn WindowSurface,
        desc: &SwapChainDesc,
    ) -> Result<Box<dyn SwapChain>, StatusCode>;

    /// Creates a chain meant to be attached to a composition target (e.g. a panel).
    fn create_for_composition(
        &self,
        device: &dyn GraphicsDevice,
        desc: &SwapChainDesc,
    ) -> Result<Box<dyn SwapChain>, StatusCode>;
}

/// Where a chain is going to be presented.
#[derive(Clone, Copy)]
pub enum SwapChainTarget<'a> {
    Window(&'a dyn WindowSurface),
    Composition,
}

/// Issues the low-level creation call for `desc`.
///
/// Inputs are assumed to be validated by the caller.
pub fn create_swap_chain(
    device: &dyn GraphicsDevice,
    factory: &dyn SwapChainFactory,
    target: SwapChainTarget<'_>,
    desc: &SwapChainDesc,
) -> Result<Box<dyn SwapChain>, StatusCode> {
    match target {
        SwapChainTarget::Window(window) => factory.create_for_window(device, window, desc),
        SwapChainTarget::Composition => factory.create_for_composition(device, desc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::null::{NullDevice, NullSwapChainFactory};
    use crate::surface::headless::HeadlessWindow;
    use crate::surface::RectF;

    #[test]
    fn shared_fields_are_fixed() {
        let desc = SwapChainDesc::new(PixelFormat::B8G8R8A8Unorm, 640, 480, Scaling::Stretch, AlphaMode::Ignore);

        assert_eq!(desc.size(), SurfaceSize { width: 640, height: 480 });
        assert!(!desc.stereo);
        assert_eq!(desc.sample_desc, SampleDesc { count: 1, quality: 0 });
        assert_eq!(desc.buffer_usage.bits(), 0x20 | 0x40);
        assert_eq!(desc.buffer_count, 2);
        assert_eq!(desc.swap_effect, SwapEffect::FlipSequential);
        assert_eq!(desc.flags, 0);
    }

    #[test]
    fn target_selects_factory_entry_point() {
        let device = NullDevice::new();
        let factory = NullSwapChainFactory::new();
        let window = HeadlessWindow::new(RectF::new(0.0, 0.0, 1.0, 1.0));
        let desc = SwapChainDesc::new(PixelFormat::Unknown, 1, 1, Scaling::None, AlphaMode::Unspecified);

        create_swap_chain(&device, &factory, SwapChainTarget::Window(&window), &desc).unwrap();
        assert_eq!(factory.window_chains_created(), 1);
        assert_eq!(factory.composition_chains_created(), 0);

        let chain = create_swap_chain(&device, &factory, SwapChainTarget::Composition, &desc).unwrap();
        assert_eq!(factory.composition_chains_created(), 1);
        assert_eq!(chain.desc(), desc);
    }

    #[test]
    fn factory_failure_is_returned_unchanged() {
        let code = StatusCode(0x887A_0001_u32 as i32);
        let device = NullDevice::new();
        let factory = NullSwapChainFactory::failing(code);
        let desc = SwapChainDesc::new(PixelFormat::Unknown, 1, 1, Scaling::None, AlphaMode::Unspecified);

        let err = create_swap_chain(&device, &factory, SwapChainTarget::Composition, &desc).err();
        assert_eq!(err, Some(code));
    }
}
