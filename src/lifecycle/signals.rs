//! OS signal handling.
//!
//! Ctrl-C (and SIGTERM on unix) trigger the shared [`Shutdown`]. A listener
//! that cannot be installed never fires; it does not count as an interrupt.

use std::future::Future;
use std::io;

use crate::lifecycle::Shutdown;

/// Spawn a task that triggers `shutdown` on the first interrupt.
pub fn spawn_signal_handler(shutdown: Shutdown) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::warn!("Interrupt received, cancelling");
        shutdown.trigger();
    })
}

/// Resolve when `listener` reports a signal; pend forever if it failed.
async fn interrupt_from<F>(name: &'static str, listener: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = listener.await {
        tracing::warn!(signal = name, error = %e, "Cannot listen for signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn sigterm() -> io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = signal(SignalKind::terminate())?;
    match term.recv().await {
        Some(()) => Ok(()),
        None => Err(io::Error::other("SIGTERM stream closed")),
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    tokio::select! {
        _ = interrupt_from("ctrl_c", tokio::signal::ctrl_c()) => {}
        _ = interrupt_from("sigterm", sigterm()) => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    interrupt_from("ctrl_c", tokio::signal::ctrl_c()).await;
}
