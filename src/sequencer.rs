use std::sync::Arc;

use anyhow::Context;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::BootstrapConfig;
use crate::error::{InjectError, Result};
use crate::fetch::ManifestFetcher;
use crate::host::HostDocument;
use crate::inject::{Injector, MainAttrs};
use crate::manifest::Manifest;
use crate::phase::{Phase, PhaseRegistry, SENTINEL};
use crate::stylesheet;

/// Bootstrap states, entered in strict order with no backward transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Init,
    ManifestFetch,
    AwaitMainCompletion,
    VendorPhase,
    InternalPhase,
    Done,
}

/// Drives the full bootstrap: main script, manifests, vendor batch,
/// internal batch.
///
/// One long-lived async task; every injection and fetch is a suspension
/// point. Both manifest fetches are started before either result is
/// required, but each result is awaited only right before the phase that
/// consumes it, so an internal-manifest failure cannot undo an already
/// completed vendor phase.
pub struct Sequencer {
    config: BootstrapConfig,
    injector: Injector,
    fetcher: Arc<dyn ManifestFetcher>,
    registry: Arc<PhaseRegistry>,
    main_completed: Option<oneshot::Receiver<()>>,
    state: SequencerState,
}

impl Sequencer {
    pub fn new(
        host: Arc<dyn HostDocument>,
        fetcher: Arc<dyn ManifestFetcher>,
        config: BootstrapConfig,
    ) -> Result<Self> {
        config.validate()?;
        let (registry, main_completed) = PhaseRegistry::new();
        let registry = Arc::new(registry);
        let injector = Injector::new(
            host,
            Arc::clone(&registry),
            config.poll_interval,
            config.max_document_polls,
        );
        Ok(Self {
            config,
            injector,
            fetcher,
            registry,
            main_completed: Some(main_completed),
            state: SequencerState::Init,
        })
    }

    /// Shared registry handle, for diagnostics and tests.
    pub fn registry(&self) -> Arc<PhaseRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    fn transition(&mut self, next: SequencerState) {
        debug!(from = ?self.state, to = ?next, "sequencer transition");
        self.state = next;
    }

    /// Run the bootstrap to completion.
    ///
    /// A failure during the main load or a manifest fetch aborts the whole
    /// sequence. Individual vendor/internal entries fail soft: logged,
    /// skipped, and the phase keeps going.
    pub async fn run(mut self) -> Result<()> {
        let main_url = self.config.main_script_url();
        let attrs = MainAttrs {
            base_url: self.config.base_url.clone(),
            requester_id: self.config.requester_id.clone(),
        };
        info!(url = %main_url, "injecting main bootstrap script");
        self.injector
            .inject(&main_url, Some(Phase::Main), Some(&attrs))
            .await?;

        self.transition(SequencerState::ManifestFetch);
        let vendor_fetch = self.spawn_fetch(self.config.vendor_manifest_url());
        let internal_fetch = self.spawn_fetch(self.config.internal_manifest_url());
        let vendor = vendor_fetch.await??;

        self.transition(SequencerState::AwaitMainCompletion);
        let main_completed = self.main_completed.take().ok_or(InjectError::SignalLost)?;
        main_completed.await.map_err(|_| InjectError::SignalLost)?;
        info!("main phase complete");

        self.transition(SequencerState::VendorPhase);
        self.inject_batch(&vendor, Phase::Vendor).await;

        self.transition(SequencerState::InternalPhase);
        let internal = internal_fetch.await??;
        self.inject_batch(&internal, Phase::Internal).await;

        self.transition(SequencerState::Done);
        info!("bootstrap sequence done");
        Ok(())
    }

    fn spawn_fetch(&self, url: String) -> JoinHandle<Result<Manifest>> {
        let fetcher = Arc::clone(&self.fetcher);
        tokio::spawn(async move { fetcher.fetch_manifest(&url).await })
    }

    /// Inject every manifest entry for a phase, strictly in manifest order,
    /// each fully settled before the next begins. Afterwards the phase's
    /// sentinel is completed: "all listed scripts attempted" is decoupled
    /// from drain-based completion, which only the main phase uses.
    async fn inject_batch(&self, manifest: &Manifest, phase: Phase) {
        let subpath = match phase {
            Phase::Vendor => &self.config.vendor_subpath,
            _ => &self.config.web_subpath,
        };
        for entry in manifest {
            let url = entry.resolve(&self.config.base_url, subpath);
            if let Err(error) = self.injector.inject(&url, Some(phase), None).await {
                warn!(%phase, %url, %error, "script failed, continuing with remaining entries");
            }
        }
        self.registry.complete(phase, SENTINEL);
        info!(%phase, entries = manifest.len(), "batch finished");
    }
}

/// Convenience entry point: spawns the stylesheet task and runs the full
/// bootstrap sequence on the given host.
pub async fn bootstrap(
    host: Arc<dyn HostDocument>,
    fetcher: Arc<dyn ManifestFetcher>,
    config: BootstrapConfig,
) -> anyhow::Result<()> {
    let sequencer = Sequencer::new(Arc::clone(&host), fetcher, config.clone())?;
    tokio::spawn(stylesheet::inject_stylesheets(host, config));
    sequencer.run().await.context("bootstrap sequence failed")?;
    Ok(())
}
