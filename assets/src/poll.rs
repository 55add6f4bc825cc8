use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use crate::error::AssetError;
use crate::source::AssetFuture;

/// Poll an asset future once, expecting it to be immediately ready.
///
/// Meant for synchronous callers (tools, tests, startup code) over blocking
/// sources such as [`MemorySource`](crate::MemorySource) and
/// [`FileSystemSource`](crate::FileSystemSource). A future that is still
/// pending after one poll yields [`AssetError::WouldBlock`].
pub fn poll_now<T>(fut: AssetFuture<T>) -> Result<T, AssetError> {
    poll_ready(fut).unwrap_or(Err(AssetError::WouldBlock))
}

/// Poll any future once, returning its output if it completed.
///
/// Used for futures whose error type is not [`AssetError`], such as a
/// [`LoadFuture`](crate::LoadFuture).
pub fn poll_ready<F: Future + Unpin>(mut fut: F) -> Option<F::Output> {
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    match Pin::new(&mut fut).poll(&mut cx) {
        Poll::Ready(val) => Some(val),
        Poll::Pending => None,
    }
}

fn noop_waker() -> Waker {
    fn noop(_: *const ()) {}
    fn clone(p: *const ()) -> RawWaker {
        RawWaker::new(p, &VTABLE)
    }
    static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
    // SAFETY: every vtable function ignores the data pointer.
    unsafe { Waker::from_raw(RawWaker::new(std::ptr::null(), &VTABLE)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverReady;

    impl Future for NeverReady {
        type Output = Result<u32, AssetError>;

        fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
            Poll::Pending
        }
    }

    #[test]
    fn ready_future() {
        let fut: AssetFuture<u32> = Box::pin(async { Ok(7) });
        assert_eq!(poll_now(fut).unwrap(), 7);
    }

    #[test]
    fn pending_future_would_block() {
        let fut: AssetFuture<u32> = Box::pin(NeverReady);
        assert!(matches!(poll_now(fut), Err(AssetError::WouldBlock)));
        assert!(poll_ready(Box::pin(NeverReady)).is_none());
    }
}
