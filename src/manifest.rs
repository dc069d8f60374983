use serde::{Deserialize, Serialize};

/// Ordered list of script descriptors for one phase, fetched as a JSON
/// array of bare strings and `[name, alternate-base]` pairs.
pub type Manifest = Vec<ManifestEntry>;

/// One manifest element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ManifestEntry {
    /// Bare script name, resolved against the default base URL.
    Name(String),
    /// Script name plus an alternate base path it resolves against.
    Relocated(String, String),
}

impl ManifestEntry {
    pub fn name(&self) -> &str {
        match self {
            ManifestEntry::Name(name) => name,
            ManifestEntry::Relocated(name, _) => name,
        }
    }

    /// Resolve to a full script URL under the given phase subpath.
    pub fn resolve(&self, base_url: &str, subpath: &str) -> String {
        match self {
            ManifestEntry::Name(name) => join_url(&[base_url, subpath, &format!("{name}.js")]),
            ManifestEntry::Relocated(name, alt_base) => {
                join_url(&[alt_base, subpath, &format!("{name}.js")])
            }
        }
    }
}

/// Join URL segments with single slashes, preserving the first segment's
/// leading slash or scheme.
pub(crate) fn join_url(segments: &[&str]) -> String {
    let mut url = String::new();
    for (position, segment) in segments.iter().enumerate() {
        let part = if position == 0 {
            segment.trim_end_matches('/')
        } else {
            segment.trim_matches('/')
        };
        if part.is_empty() {
            continue;
        }
        if !url.is_empty() {
            url.push('/');
        }
        url.push_str(part);
    }
    url
}
