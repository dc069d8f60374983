#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use pageboot::{
    HostDocument, InjectError, Manifest, ManifestEntry, ManifestFetcher, ScriptElement,
    ScriptOutcome,
};

/// Everything the fake document observed, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Attached { src: String },
    Detached { src: String },
    Stylesheet { href: String },
}

/// In-memory stand-in for the hosting document. Load/error settlement is
/// immediate; URLs registered via `fail_on` fire the error event instead.
pub struct FakeDocument {
    root_ready: AtomicBool,
    head_ready: AtomicBool,
    failing: Mutex<HashSet<String>>,
    events: Mutex<Vec<HostEvent>>,
    attached: Mutex<Vec<ScriptElement>>,
}

impl FakeDocument {
    /// Document with head and root already available.
    pub fn new() -> Self {
        Self {
            root_ready: AtomicBool::new(true),
            head_ready: AtomicBool::new(true),
            failing: Mutex::new(HashSet::new()),
            events: Mutex::new(Vec::new()),
            attached: Mutex::new(Vec::new()),
        }
    }

    /// Document still parsing: neither head nor root exists yet.
    pub fn pending() -> Self {
        let document = Self::new();
        document.root_ready.store(false, Ordering::SeqCst);
        document.head_ready.store(false, Ordering::SeqCst);
        document
    }

    pub fn make_ready(&self) {
        self.head_ready.store(true, Ordering::SeqCst);
        self.root_ready.store(true, Ordering::SeqCst);
    }

    /// Make the given URL fire its error event on attach.
    pub fn fail_on(&self, url: &str) {
        self.failing.lock().unwrap().insert(url.to_string());
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Attachment order, by source URL.
    pub fn attach_order(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Attached { src } => Some(src),
                _ => None,
            })
            .collect()
    }

    pub fn stylesheets(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Stylesheet { href } => Some(href),
                _ => None,
            })
            .collect()
    }

    /// The element as it was attached, for attribute/kind assertions.
    pub fn element_for(&self, src: &str) -> Option<ScriptElement> {
        self.attached
            .lock()
            .unwrap()
            .iter()
            .find(|element| element.src == src)
            .cloned()
    }
}

#[async_trait]
impl HostDocument for FakeDocument {
    fn root_available(&self) -> bool {
        self.root_ready.load(Ordering::SeqCst)
    }

    fn head_available(&self) -> bool {
        self.head_ready.load(Ordering::SeqCst)
    }

    async fn attach(&self, element: &ScriptElement) -> ScriptOutcome {
        self.events.lock().unwrap().push(HostEvent::Attached {
            src: element.src.clone(),
        });
        self.attached.lock().unwrap().push(element.clone());
        if self.failing.lock().unwrap().contains(&element.src) {
            ScriptOutcome::Errored
        } else {
            ScriptOutcome::Loaded
        }
    }

    fn detach(&self, element: &ScriptElement) {
        self.events.lock().unwrap().push(HostEvent::Detached {
            src: element.src.clone(),
        });
    }

    fn append_stylesheet(&self, href: &str) {
        self.events.lock().unwrap().push(HostEvent::Stylesheet {
            href: href.to_string(),
        });
    }
}

/// Manifest source backed by a fixed URL map; unknown URLs answer 404.
pub struct StaticFetcher {
    responses: HashMap<String, Result<Manifest, u16>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    pub fn manifest(mut self, url: &str, entries: Manifest) -> Self {
        self.responses.insert(url.to_string(), Ok(entries));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(url.to_string(), Err(status));
        self
    }
}

#[async_trait]
impl ManifestFetcher for StaticFetcher {
    async fn fetch_manifest(&self, url: &str) -> pageboot::Result<Manifest> {
        match self.responses.get(url) {
            Some(Ok(manifest)) => Ok(manifest.clone()),
            Some(Err(status)) => Err(InjectError::fetch_status(url, *status)),
            None => Err(InjectError::fetch_status(url, 404)),
        }
    }
}

pub fn names(entries: &[&str]) -> Manifest {
    entries
        .iter()
        .map(|name| ManifestEntry::Name(name.to_string()))
        .collect()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
