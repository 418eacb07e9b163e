//! AI-summary bookkeeping.
//!
//! Summary requests are fire-and-forget: the interaction layer marks the
//! element as loading, hands a ticket to the collaborator, and keeps
//! processing events. Responses come back through [`SummaryTracker::complete`],
//! which applies them only when the ticket is still the latest one issued
//! for that element. A stale response is dropped instead of clobbering a
//! newer request's result.

use crate::elements::{Element, ElementId, SummaryState};
use crate::store::ElementStore;
use std::collections::HashMap;

/// Token tying an in-flight summary request to the element state it may
/// update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryTicket {
    pub element: ElementId,
    request: u64,
}

/// The AI collaborator's summary entry point, injected per call.
pub trait SummaryRequester {
    /// Start generating a summary for the element. Must not block; the
    /// eventual result is delivered via [`SummaryTracker::complete`].
    fn request_summary(&mut self, ticket: SummaryTicket, element: &Element);
}

/// Issues summary tickets and applies responses, rejecting stale ones.
#[derive(Debug, Default)]
pub struct SummaryTracker {
    next_request: u64,
    pending: HashMap<ElementId, u64>,
}

impl SummaryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the element as loading and issue a ticket for it. Returns None
    /// when the element is gone or carries no summary state (connectors).
    pub fn begin(&mut self, store: &mut ElementStore, id: ElementId) -> Option<SummaryTicket> {
        let summary = store.get_mut(id)?.summary_mut()?;
        *summary = SummaryState::Loading;

        self.next_request += 1;
        self.pending.insert(id, self.next_request);
        Some(SummaryTicket {
            element: id,
            request: self.next_request,
        })
    }

    /// Begin a request and immediately hand it to the collaborator.
    /// Returns false when no request was started.
    pub fn kick_off(
        &mut self,
        store: &mut ElementStore,
        requester: &mut dyn SummaryRequester,
        id: ElementId,
    ) -> bool {
        let Some(ticket) = self.begin(store, id) else {
            return false;
        };
        // The element exists; begin() just wrote its summary state.
        if let Some(element) = store.get(id) {
            requester.request_summary(ticket, element);
        }
        true
    }

    /// Apply a summary response. Failures arrive as `Err` and surface as an
    /// `Error:`-prefixed summary string, visible but non-blocking. The
    /// response is dropped when the element no longer exists or the ticket
    /// has been superseded by a newer request.
    pub fn complete(
        &mut self,
        store: &mut ElementStore,
        ticket: SummaryTicket,
        outcome: Result<String, String>,
    ) {
        match self.pending.get(&ticket.element) {
            Some(&latest) if latest == ticket.request => {}
            _ => {
                log::debug!(
                    "dropping stale summary response for element {}",
                    ticket.element
                );
                return;
            }
        }
        self.pending.remove(&ticket.element);

        let Some(summary) = store.get_mut(ticket.element).and_then(|e| e.summary_mut()) else {
            // Element deleted while the request was in flight
            return;
        };
        let text = match outcome {
            Ok(text) => text,
            Err(err) => format!("Error: {err}"),
        };
        *summary = SummaryState::Ready {
            text,
            visible: true,
        };
    }
}
