//! `[contact]` and `[head]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[contact]` section in campus.toml - the third-party form backend.
///
/// # Example
/// ```toml
/// [contact]
/// endpoint = "https://formspree.io/f/mdkdvkak"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct ContactSection {
    /// URL the contact form posts to.
    #[serde(default = "defaults::contact::endpoint")]
    #[educe(Default = defaults::contact::endpoint())]
    pub endpoint: String,
}

/// `[head]` section in campus.toml - extra trusted head markup.
///
/// # Example
/// ```toml
/// [head]
/// elements = ['<meta name="theme-color" content="#4f46e5">']
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadSection {
    /// Raw elements parsed into the head before metadata sync.
    pub elements: Vec<String>,
}
