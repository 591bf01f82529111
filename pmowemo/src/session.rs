//! Shared HTTP session registry
//!
//! Asynchronous invocations go through one shared [`reqwest::Client`] so
//! connection pools are reused across calls and devices. The registry owns
//! that client's lifecycle and is handed to services explicitly (an
//! `Arc<SessionRegistry>` created at the composition root), so tests and
//! embedders can scope it instead of relying on process-global state.
//!
//! A client is either *managed* (created by the registry, closed by the
//! registry) or *supplied* (handed in by the caller, never closed here).
//! Closing means dropping the registry's handle; the underlying pool shuts
//! down once the last clone is gone.

use std::sync::RwLock;

use reqwest::Client;
use tracing::debug;

/// Who is responsible for closing the current client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOwnership {
    /// Created by the registry; the registry closes it.
    Managed,

    /// Supplied by the caller; the registry never closes it.
    Supplied,
}

#[derive(Debug)]
struct SessionSlot {
    client: Client,
    ownership: SessionOwnership,
}

#[derive(Debug, Default)]
struct SessionState {
    slot: Option<SessionSlot>,
    closed_managed: usize,
}

/// Lifecycle owner of the shared asynchronous HTTP client.
///
/// Holds at most one client at a time. Reads are cheap (the client is a
/// pooled handle that clones by reference); mutation happens only through
/// [`initialize`](Self::initialize), [`install`](Self::install) and
/// [`shutdown`](Self::shutdown). Swapping the client while calls are in
/// flight leaves those calls on the old pool; callers are expected to
/// reinitialize only between calls.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    state: RwLock<SessionState>,
}

impl SessionRegistry {
    /// Create an empty registry. No client exists until first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current shared client, creating a managed one on first use.
    pub fn session(&self) -> Client {
        {
            let state = self.state.read().expect("session registry lock poisoned");
            if let Some(slot) = &state.slot {
                return slot.client.clone();
            }
        }

        let mut state = self.state.write().expect("session registry lock poisoned");
        let slot = state.slot.get_or_insert_with(|| {
            debug!("Creating shared HTTP session");
            SessionSlot {
                client: Client::new(),
                ownership: SessionOwnership::Managed,
            }
        });
        slot.client.clone()
    }

    /// Replace the current client with a fresh managed one.
    ///
    /// A previous managed client is closed; a supplied one is left alone.
    pub fn initialize(&self) {
        let mut state = self.state.write().expect("session registry lock poisoned");
        Self::close_slot(&mut state);
        debug!("Creating shared HTTP session");
        state.slot = Some(SessionSlot {
            client: Client::new(),
            ownership: SessionOwnership::Managed,
        });
    }

    /// Adopt a caller-supplied client.
    ///
    /// The caller keeps responsibility for closing it; the registry will
    /// never do so, even at shutdown. A previous managed client is closed.
    pub fn install(&self, client: Client) {
        let mut state = self.state.write().expect("session registry lock poisoned");
        Self::close_slot(&mut state);
        state.slot = Some(SessionSlot {
            client,
            ownership: SessionOwnership::Supplied,
        });
    }

    /// Close the current client if the registry manages it.
    ///
    /// Idempotent; safe to call when no client was ever created.
    pub fn shutdown(&self) {
        let mut state = self.state.write().expect("session registry lock poisoned");
        Self::close_slot(&mut state);
    }

    /// Ownership of the current client, if one exists.
    pub fn ownership(&self) -> Option<SessionOwnership> {
        let state = self.state.read().expect("session registry lock poisoned");
        state.slot.as_ref().map(|slot| slot.ownership)
    }

    /// Number of managed clients closed so far.
    pub fn closed_sessions(&self) -> usize {
        let state = self.state.read().expect("session registry lock poisoned");
        state.closed_managed
    }

    fn close_slot(state: &mut SessionState) {
        if let Some(slot) = state.slot.take() {
            match slot.ownership {
                SessionOwnership::Managed => {
                    debug!("Closing managed HTTP session");
                    state.closed_managed += 1;
                }
                SessionOwnership::Supplied => {
                    // the supplied client stays alive, only our handle goes away
                }
            }
        }
    }
}

impl Drop for SessionRegistry {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.write() {
            Self::close_slot(&mut state);
        }
    }
}
