use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{InjectError, Result};
use crate::manifest::join_url;

/// Bootstrap configuration: asset layout, identifiers, and poll tuning.
///
/// Defaults mirror the conventional extension layout: a `web` subtree for
/// first-party assets, a `vendor` subtree for third-party ones, and the
/// two manifests directly under the base URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Base URL all default-path assets resolve against. Required.
    pub base_url: String,
    /// Identifier handed to the main script via its `data-id` attribute.
    /// Typically the extension runtime id; defaults to a generated UUID.
    pub requester_id: String,
    /// Main bootstrap script name, resolved under `web_subpath`.
    pub main_script: String,
    /// Vendor manifest file name, resolved directly under `base_url`.
    pub vendor_manifest: String,
    /// Internal manifest file name, resolved directly under `base_url`.
    pub internal_manifest: String,
    /// Subpath for vendor-phase scripts.
    pub vendor_subpath: String,
    /// Subpath for main- and internal-phase scripts.
    pub web_subpath: String,
    /// Subpath for stylesheets.
    pub css_subpath: String,
    /// Stylesheet names appended to the document head.
    pub stylesheets: Vec<String>,
    /// Interval between document-readiness polls.
    pub poll_interval: Duration,
    /// Poll cap before giving up on the document ever becoming ready.
    pub max_document_polls: u32,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            requester_id: Uuid::new_v4().to_string(),
            main_script: "drawer".to_string(),
            vendor_manifest: "vendor.json".to_string(),
            internal_manifest: "internal.json".to_string(),
            vendor_subpath: "vendor".to_string(),
            web_subpath: "web".to_string(),
            css_subpath: "web/css".to_string(),
            stylesheets: vec!["common".to_string(), "bootstrap".to_string()],
            poll_interval: Duration::from_millis(1),
            max_document_polls: 10_000,
        }
    }
}

impl BootstrapConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(InjectError::Configuration(
                "base_url must not be empty".to_string(),
            ));
        }
        if self.max_document_polls == 0 {
            return Err(InjectError::Configuration(
                "max_document_polls must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn main_script_url(&self) -> String {
        join_url(&[
            &self.base_url,
            &self.web_subpath,
            &format!("{}.js", self.main_script),
        ])
    }

    pub fn vendor_manifest_url(&self) -> String {
        join_url(&[&self.base_url, &self.vendor_manifest])
    }

    pub fn internal_manifest_url(&self) -> String {
        join_url(&[&self.base_url, &self.internal_manifest])
    }

    pub fn stylesheet_url(&self, name: &str) -> String {
        join_url(&[&self.base_url, &self.css_subpath, &format!("{name}.css")])
    }
}
