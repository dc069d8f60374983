use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{InjectError, Result};
use crate::host::{HostDocument, ScriptOutcome};
use crate::phase::{Phase, PhaseRegistry};

/// Filename suffixes executed as ES modules rather than classic scripts.
const MODULE_SUFFIXES: [&str; 2] = ["main.js", "loader.js"];

/// Fixed marker attribute value on the main bootstrap element, letting the
/// injected code discover its own injection context.
pub const INJECTOR_MARKER: &str = "injector";

/// How the host should execute an injected script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    Classic,
    Module,
}

/// Auxiliary attributes carried only by the main bootstrap element.
#[derive(Debug, Clone)]
pub struct MainAttrs {
    /// Extension base URL, exposed as `data-url`.
    pub base_url: String,
    /// Requester/runtime identifier, exposed as `data-id`.
    pub requester_id: String,
}

/// An injectable script reference. Created immediately before attachment,
/// detached immediately after its load/error settlement, never retained.
#[derive(Debug, Clone)]
pub struct ScriptElement {
    pub src: String,
    pub kind: ScriptKind,
    pub attributes: Vec<(String, String)>,
}

impl ScriptElement {
    pub fn new(src: impl Into<String>) -> Self {
        let src = src.into();
        let kind = if MODULE_SUFFIXES.iter().any(|suffix| src.ends_with(suffix)) {
            ScriptKind::Module
        } else {
            ScriptKind::Classic
        };
        Self {
            src,
            kind,
            attributes: Vec::new(),
        }
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.push((name.to_string(), value.to_string()));
    }
}

/// Creates script elements, attaches them through the host document, and
/// tracks them in the phase registry.
pub struct Injector {
    host: Arc<dyn HostDocument>,
    registry: Arc<PhaseRegistry>,
    poll_interval: Duration,
    max_document_polls: u32,
}

impl Injector {
    pub fn new(
        host: Arc<dyn HostDocument>,
        registry: Arc<PhaseRegistry>,
        poll_interval: Duration,
        max_document_polls: u32,
    ) -> Self {
        Self {
            host,
            registry,
            poll_interval,
            max_document_polls,
        }
    }

    /// Inject one script and wait for it to settle.
    ///
    /// `phase == None` models an unknown phase tag: the script is still
    /// injected but not tracked in any pending-set. Main-phase elements
    /// carry the base-URL and requester-id attributes plus the fixed
    /// [`INJECTOR_MARKER`] id.
    pub async fn inject(
        &self,
        url: &str,
        phase: Option<Phase>,
        aux: Option<&MainAttrs>,
    ) -> Result<()> {
        let mut element = ScriptElement::new(url);
        if phase == Some(Phase::Main) {
            if let Some(aux) = aux {
                element.set_attribute("data-url", &aux.base_url);
                element.set_attribute("data-id", &aux.requester_id);
            }
            element.set_attribute("id", INJECTOR_MARKER);
        }

        if let Some(phase) = phase {
            self.registry.enqueue(phase, url);
        }

        self.await_document_ready().await?;

        debug!(url, kind = ?element.kind, ?phase, "attaching script");
        let outcome = self.host.attach(&element).await;
        self.host.detach(&element);

        match outcome {
            ScriptOutcome::Loaded => {
                if let Some(phase) = phase {
                    self.registry.complete(phase, url);
                }
                debug!(url, "script loaded");
                Ok(())
            }
            ScriptOutcome::Errored => {
                // No complete() on error: the dangling pending entry only
                // matters for main-phase drain logic, and a failed main load
                // aborts the whole sequence anyway.
                warn!(url, "script errored");
                Err(InjectError::load(url))
            }
        }
    }

    /// Suspend until the document can accept an attachment: immediately if
    /// the root element exists, otherwise a bounded poll for the head or
    /// root, yielding every iteration so concurrent work keeps running.
    async fn await_document_ready(&self) -> Result<()> {
        if self.host.root_available() {
            return Ok(());
        }
        let mut polls = 0u32;
        while !self.host.head_available() && !self.host.root_available() {
            if polls >= self.max_document_polls {
                return Err(InjectError::DocumentUnavailable { polls });
            }
            polls += 1;
            tokio::time::sleep(self.poll_interval).await;
        }
        Ok(())
    }
}
