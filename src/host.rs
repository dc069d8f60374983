use async_trait::async_trait;

use crate::inject::ScriptElement;

/// Settlement of an attached script element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOutcome {
    /// The load event fired; the script has executed.
    Loaded,
    /// The error event fired; the script did not execute.
    Errored,
}

/// Operations the hosting document exposes to the injector.
///
/// Implementations wrap whatever document the crate is embedded in: a
/// browser-extension content context, a webview bridge, or a test double.
/// Script execution semantics belong to the host; this crate only drives
/// attach, settlement, and detach.
#[async_trait]
pub trait HostDocument: Send + Sync {
    /// Whether the document's root element exists yet.
    fn root_available(&self) -> bool;

    /// Whether the document head exists yet.
    fn head_available(&self) -> bool;

    /// Attach the element to the document and resolve once its load or
    /// error event fires. The element stays attached until
    /// [`detach`](HostDocument::detach) is called.
    async fn attach(&self, element: &ScriptElement) -> ScriptOutcome;

    /// Remove the element from the document. Detaching does not undo
    /// execution.
    fn detach(&self, element: &ScriptElement);

    /// Append a stylesheet link to the document head.
    fn append_stylesheet(&self, href: &str);
}
