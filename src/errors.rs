use std::fmt::{Debug, Display};

/// HRESULT-style status code returned by native collaborators (surfaces, factories).
///
/// Negative values are failures, everything else is success.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct StatusCode(pub i32);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(0);
    pub const FAIL: StatusCode = StatusCode(0x8000_4005_u32 as i32);
    pub const INVALID_ARG: StatusCode = StatusCode(0x8007_0057_u32 as i32);
    pub const ILLEGAL_METHOD_CALL: StatusCode = StatusCode(0x8000_000E_u32 as i32);
    pub const NOT_FOUND: StatusCode = StatusCode(0x8007_0490_u32 as i32);

    pub fn is_success(self) -> bool {
        self.0 >= 0
    }

    pub fn is_failure(self) -> bool {
        self.0 < 0
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:08X}", self.0 as u32)
    }
}

impl Debug for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            StatusCode::OK => write!(f, "StatusCode(OK)"),
            StatusCode::FAIL => write!(f, "StatusCode(FAIL)"),
            StatusCode::INVALID_ARG => write!(f, "StatusCode(INVALID_ARG)"),
            StatusCode::ILLEGAL_METHOD_CALL => write!(f, "StatusCode(ILLEGAL_METHOD_CALL)"),
            StatusCode::NOT_FOUND => write!(f, "StatusCode(NOT_FOUND)"),
            other => write!(f, "StatusCode({other})"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Native window handle is null")]
    NullHandle,

    #[error("Native window does not expose a supported surface")]
    UnsupportedSurface,

    #[error("Surface host is already initialized")]
    AlreadyInitialized,

    #[error("Surface host is not initialized")]
    NotInitialized,

    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Native call {op} failed: {status}")]
    Native { op: &'static str, status: StatusCode },

    #[error("Swap chain creation failed: {0}")]
    Creation(StatusCode),
}

impl SurfaceError {
    /// Status code a C-style caller would observe for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            SurfaceError::InvalidArgument(_) => StatusCode::INVALID_ARG,
            SurfaceError::Native { status, .. } => *status,
            SurfaceError::Creation(status) => *status,
            SurfaceError::AlreadyInitialized | SurfaceError::NotInitialized => {
                StatusCode::ILLEGAL_METHOD_CALL
            }
            SurfaceError::NullHandle | SurfaceError::UnsupportedSurface => StatusCode::FAIL,
        }
    }
}
