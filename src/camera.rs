use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use log::info;

/// Webcam collaborator contract. `acquire` resolves to whether a usable
/// stream was obtained; denial and hardware failure both come back as
/// `false`, never as an error. `release` must be idempotent and safe to call
/// when nothing was ever acquired.
pub trait CameraCapability: Send + Sync {
    fn acquire(&self) -> impl Future<Output = bool> + Send;
    fn release(&self);
}

/// In-process stand-in for a real media stream, used by the demo and tests.
/// Grants or denies according to its configuration and tracks acquisition so
/// repeated releases stay no-ops.
#[derive(Debug)]
pub struct StubCamera {
    grant: bool,
    acquired: AtomicBool,
}

impl StubCamera {
    pub fn granting() -> Self {
        Self {
            grant: true,
            acquired: AtomicBool::new(false),
        }
    }

    pub fn denying() -> Self {
        Self {
            grant: false,
            acquired: AtomicBool::new(false),
        }
    }

    pub fn is_acquired(&self) -> bool {
        self.acquired.load(Ordering::SeqCst)
    }
}

impl CameraCapability for StubCamera {
    async fn acquire(&self) -> bool {
        if self.grant {
            self.acquired.store(true, Ordering::SeqCst);
        }
        self.grant
    }

    fn release(&self) {
        if self.acquired.swap(false, Ordering::SeqCst) {
            info!("camera stream released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn release_is_idempotent() {
        let camera = StubCamera::granting();
        assert!(camera.acquire().await);
        assert!(camera.is_acquired());

        camera.release();
        assert!(!camera.is_acquired());
        // Second release leaves the state unchanged, no panic.
        camera.release();
        assert!(!camera.is_acquired());
    }

    #[tokio::test]
    async fn release_without_acquire_is_safe() {
        let camera = StubCamera::denying();
        assert!(!camera.acquire().await);
        camera.release();
        assert!(!camera.is_acquired());
    }
}
