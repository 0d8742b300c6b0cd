use crate::errors::SurfaceError;
use crate::host::adapter::SurfaceAdapter;
use crate::host::HostId;
use crate::surface::{Bounds, EventToken};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Bounds cache shared between a binding and its size-changed handler.
struct BoundsCell {
    tx: watch::Sender<Bounds>,
    /// Set under the channel's write lock by the first delivered resize.
    resized: AtomicBool,
}

/// Write end of a host's bounds cache, owned by the surface's size-changed handler.
pub(crate) struct ResizeSink {
    host: HostId,
    cell: Arc<BoundsCell>,
}

impl ResizeSink {
    /// Publishes new bounds. Last delivery wins.
    pub(crate) fn deliver(&self, bounds: Bounds) {
        if self.cell.tx.is_closed() {
            log::trace!("Host[{}]: dropping resize after teardown", self.host);
            return;
        }

        let resized = &self.cell.resized;
        self.cell.tx.send_modify(|current| {
            *current = bounds;
            resized.store(true, Ordering::SeqCst);
        });
        log::debug!("Host[{}]: bounds updated to {:?}", self.host, bounds);
    }
}

/// A live bind between a host and its surface: the adapter, the bounds cache and the one
/// size-changed registration. Dropping it unregisters exactly once.
pub(crate) struct Binding<'a> {
    host: HostId,
    adapter: Box<dyn SurfaceAdapter + 'a>,
    token: Option<EventToken>,
    bounds: watch::Receiver<Bounds>,
}

impl<'a> Binding<'a> {
    /// Registers for resizes, then queries the initial bounds. A resize delivered while the
    /// query is in flight is newer than the query result and is kept. Nothing is left
    /// registered when this fails.
    pub(crate) fn establish(host: HostId, adapter: Box<dyn SurfaceAdapter + 'a>) -> Result<Self, SurfaceError> {
        let (tx, bounds) = watch::channel(Bounds::default());
        let cell = Arc::new(BoundsCell {
            tx,
            resized: AtomicBool::new(false),
        });

        let token = adapter.subscribe(ResizeSink {
            host,
            cell: cell.clone(),
        })?;

        // From here on the registration is owned by the binding, so every error path below
        // unregisters through Drop.
        let binding = Self {
            host,
            adapter,
            token: Some(token),
            bounds,
        };

        let initial = binding.adapter.query_bounds()?;
        let seeded = cell.tx.send_if_modified(|current| {
            if cell.resized.load(Ordering::SeqCst) {
                false
            } else {
                *current = initial;
                true
            }
        });

        if seeded {
            log::debug!("Host[{host}]: size-changed registered with token {token}, initial bounds {initial:?}");
        } else {
            log::debug!("Host[{host}]: size-changed registered with token {token}, resized during bounds query");
        }

        Ok(binding)
    }

    pub(crate) fn adapter(&self) -> &dyn SurfaceAdapter {
        self.adapter.as_ref()
    }

    /// Latest delivered bounds, or the initial ones if no resize arrived yet.
    pub(crate) fn bounds(&self) -> Bounds {
        *self.bounds.borrow()
    }

    /// A receiver that is notified on the next resize.
    pub(crate) fn watch(&self) -> watch::Receiver<Bounds> {
        let mut rx = self.bounds.clone();
        rx.mark_unchanged();
        rx
    }
}

impl Drop for Binding<'_> {
    fn drop(&mut self) {
        let Some(token) = self.token.take() else {
            return;
        };

        // Best effort: teardown must not fail
        match self.adapter.unsubscribe(token) {
            Ok(()) => log::debug!("Host[{}]: size-changed token {token} removed", self.host),
            Err(e) => log::warn!("Host[{}]: failed to remove size-changed token {token}: {e}", self.host),
        }
    }
}
