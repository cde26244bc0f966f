//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.
//! The values reproduce the institute's published site so that
//! `campus build` works without any `campus.toml`.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn title() -> String {
        "Training Institute – Math, English, GRE, STEP".into()
    }

    pub fn description() -> String {
        "Professional training in Riyadh offering Math, English, GRE, and STEP exam \
         preparation courses. In-person & online options available."
            .into()
    }

    pub fn url() -> String {
        "https://training-institute-sa.com".into()
    }

    pub fn canonical_path() -> String {
        "/".into()
    }

    pub fn language() -> String {
        "en".into()
    }

    pub fn brand() -> String {
        "Training Institute".into()
    }
}

// ============================================================================
// [organization] Section Defaults
// ============================================================================

pub mod organization {
    pub fn name() -> String {
        "Training Institute".into()
    }

    pub fn url() -> String {
        "https://training-institute-sa.com".into()
    }

    pub fn logo() -> String {
        "https://training-institute-sa.com/logo.png".into()
    }

    pub fn same_as() -> Vec<String> {
        vec!["https://www.linkedin.com/company/training-institute-sa".into()]
    }

    pub mod address {
        pub fn street() -> String {
            "123 Main St".into()
        }

        pub fn locality() -> String {
            "Riyadh".into()
        }

        pub fn region() -> String {
            "Riyadh".into()
        }

        pub fn country() -> String {
            "SA".into()
        }
    }
}

// ============================================================================
// [contact] Section Defaults
// ============================================================================

pub mod contact {
    pub fn endpoint() -> String {
        "https://formspree.io/f/mdkdvkak".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn output() -> PathBuf {
        "public".into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}
