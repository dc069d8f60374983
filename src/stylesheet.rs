use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::BootstrapConfig;
use crate::host::HostDocument;

/// Append the configured stylesheets to the document head once it exists,
/// polling at the configured interval.
///
/// Independent of the script phases: callers spawn this and never gate
/// sequencing on it. Exhausting the readiness poll is logged, not fatal.
pub async fn inject_stylesheets(host: Arc<dyn HostDocument>, config: BootstrapConfig) {
    let mut polls = 0u32;
    while !host.head_available() {
        if polls >= config.max_document_polls {
            warn!("document head never appeared, skipping stylesheet injection");
            return;
        }
        polls += 1;
        tokio::time::sleep(config.poll_interval).await;
    }

    for name in &config.stylesheets {
        let href = config.stylesheet_url(name);
        host.append_stylesheet(&href);
        debug!(%href, "stylesheet appended");
    }
}
