use super::{NativeSurface, PanelSurface, WindowSurface};
use std::fmt::Display;

/// Which of the supported surface variants a host is bound to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Standalone window
    Window,
    /// Embeddable panel
    Panel,
}

impl Display for SurfaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceKind::Window => write!(f, "Window"),
            SurfaceKind::Panel => write!(f, "Panel"),
        }
    }
}

/// Result of inspecting a native handle.
#[derive(Copy, Clone)]
pub enum SurfaceCapability<'a> {
    Window(&'a dyn WindowSurface),
    Panel(&'a dyn PanelSurface),
    Invalid,
}

impl SurfaceCapability<'_> {
    pub fn kind(&self) -> Option<SurfaceKind> {
        match self {
            SurfaceCapability::Window(_) => Some(SurfaceKind::Window),
            SurfaceCapability::Panel(_) => Some(SurfaceKind::Panel),
            SurfaceCapability::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.kind().is_some()
    }
}

impl std::fmt::Debug for SurfaceCapability<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            Some(kind) => write!(f, "SurfaceCapability::{kind}"),
            None => write!(f, "SurfaceCapability::Invalid"),
        }
    }
}

/// Determines which surface capability a native handle exposes.
///
/// A null handle, an object exposing neither capability, and an object claiming both are
/// all `Invalid`. Has no side effects on the handle.
pub fn classify(handle: Option<&dyn NativeSurface>) -> SurfaceCapability<'_> {
    let Some(native) = handle else {
        return SurfaceCapability::Invalid;
    };

    match (native.as_window(), native.as_panel()) {
        (Some(window), None) => SurfaceCapability::Window(window),
        (None, Some(panel)) => SurfaceCapability::Panel(panel),
        _ => SurfaceCapability::Invalid,
    }
}
