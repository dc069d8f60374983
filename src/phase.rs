use std::fmt;
use std::sync::Mutex;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Sentinel pending-set entry meaning "phase initiated, not yet resolved".
/// Distinct from any real script identifier.
pub const SENTINEL: &str = "once";

/// Loading phases, in the order the sequencer drives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Main,
    Vendor,
    Internal,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Main, Phase::Vendor, Phase::Internal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Main => "main",
            Phase::Vendor => "vendor",
            Phase::Internal => "internal",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-phase pending-set bookkeeping plus the one-shot main completion
/// signal.
///
/// Each phase's pending-set is seeded with exactly one [`SENTINEL`] entry
/// and gains one entry per enqueued script. Entries are removed exactly once
/// via [`complete`](PhaseRegistry::complete); when the main phase shrinks to
/// just the sentinel, the sentinel is cleared and the completion signal
/// fires. All pending-set mutation goes through this type.
pub struct PhaseRegistry {
    queues: DashMap<Phase, Vec<String>>,
    main_signal: Mutex<Option<oneshot::Sender<()>>>,
}

impl PhaseRegistry {
    /// Build a registry together with the receiver half of the main
    /// completion signal. The signal is created once and never reset.
    pub fn new() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        let queues = DashMap::new();
        for phase in Phase::ALL {
            queues.insert(phase, vec![SENTINEL.to_string()]);
        }
        (
            Self {
                queues,
                main_signal: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    /// Append `id` to the phase's pending-set. An identifier already pending
    /// in the same phase is ignored, so a pending-set never holds duplicates.
    pub fn enqueue(&self, phase: Phase, id: &str) {
        if let Some(mut queue) = self.queues.get_mut(&phase) {
            if queue.iter().any(|pending| pending == id) {
                warn!(%phase, id, "identifier already pending, ignoring duplicate enqueue");
                return;
            }
            queue.push(id.to_string());
            debug!(%phase, id, pending = queue.len(), "enqueued");
        }
    }

    /// Remove the first entry matching `id` from the phase's pending-set.
    /// An absent id is a no-op (guards against double completion). Draining
    /// the main phase to just the sentinel clears the sentinel and fires the
    /// completion signal exactly once.
    pub fn complete(&self, phase: Phase, id: &str) {
        let drained = {
            let mut queue = match self.queues.get_mut(&phase) {
                Some(queue) => queue,
                None => return,
            };
            match queue.iter().position(|pending| pending == id) {
                Some(index) => {
                    queue.remove(index);
                    debug!(%phase, id, pending = queue.len(), "completed");
                }
                None => {
                    debug!(%phase, id, "completion for identifier not pending, ignoring");
                    return;
                }
            }
            if phase == Phase::Main && queue.len() == 1 && queue[0] == SENTINEL {
                queue.clear();
                true
            } else {
                false
            }
        };

        if drained {
            let signal = self.main_signal.lock().ok().and_then(|mut slot| slot.take());
            if let Some(signal) = signal {
                // Receiver may already be gone; nothing left to notify then.
                let _ = signal.send(());
                info!("main phase drained, completion signal fired");
            }
        }
    }

    /// Number of pending entries (sentinel included) for a phase.
    pub fn pending(&self, phase: Phase) -> usize {
        self.queues.get(&phase).map(|queue| queue.len()).unwrap_or(0)
    }

    /// Whether the phase's pending-set is fully drained, sentinel included.
    pub fn is_drained(&self, phase: Phase) -> bool {
        self.pending(phase) == 0
    }
}
