//! `[organization]` section configuration.
//!
//! Feeds the `EducationalOrganization` node of the JSON-LD document.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[organization]` section in campus.toml.
///
/// # Example
/// ```toml
/// [organization]
/// name = "Training Institute"
/// logo = "https://training-institute-sa.com/logo.png"
/// same_as = ["https://www.linkedin.com/company/training-institute-sa"]
///
/// [organization.address]
/// locality = "Riyadh"
/// country = "SA"
/// ```
#[derive(Debug, Clone, PartialEq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct OrganizationSection {
    #[serde(default = "defaults::organization::name")]
    #[educe(Default = defaults::organization::name())]
    pub name: String,

    #[serde(default = "defaults::organization::url")]
    #[educe(Default = defaults::organization::url())]
    pub url: String,

    #[serde(default = "defaults::organization::logo")]
    #[educe(Default = defaults::organization::logo())]
    pub logo: String,

    /// Profile URLs published as `sameAs`.
    #[serde(default = "defaults::organization::same_as")]
    #[educe(Default = defaults::organization::same_as())]
    pub same_as: Vec<String>,

    #[serde(default)]
    pub address: AddressSection,
}

/// `[organization.address]`, a schema.org `PostalAddress`.
#[derive(Debug, Clone, PartialEq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct AddressSection {
    #[serde(default = "defaults::organization::address::street")]
    #[educe(Default = defaults::organization::address::street())]
    pub street: String,

    #[serde(default = "defaults::organization::address::locality")]
    #[educe(Default = defaults::organization::address::locality())]
    pub locality: String,

    #[serde(default = "defaults::organization::address::region")]
    #[educe(Default = defaults::organization::address::region())]
    pub region: String,

    /// ISO 3166-1 alpha-2 country code.
    #[serde(default = "defaults::organization::address::country")]
    #[educe(Default = defaults::organization::address::country())]
    pub country: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_organization_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.organization.name, "Training Institute");
        assert_eq!(config.organization.address.locality, "Riyadh");
        assert_eq!(config.organization.address.country, "SA");
        assert_eq!(config.organization.same_as.len(), 1);
    }

    #[test]
    fn test_organization_partial_address() {
        let config = r#"
            [organization]
            name = "Jeddah Prep"
            same_as = []

            [organization.address]
            locality = "Jeddah"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.organization.name, "Jeddah Prep");
        assert!(config.organization.same_as.is_empty());
        assert_eq!(config.organization.address.locality, "Jeddah");
        // untouched fields keep their defaults
        assert_eq!(config.organization.address.street, "123 Main St");
    }
}
