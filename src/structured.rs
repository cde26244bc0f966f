//! JSON-LD structured data for the institute.
//!
//! ```json
//! {
//!   "@context": "https://schema.org",
//!   "@type": "EducationalOrganization",
//!   "name": "Training Institute",
//!   "hasCourse": [
//!     { "@type": "Course", "name": "...", "description": "...",
//!       "provider": { "@type": "Organization", "name": "Training Institute" } }
//!   ]
//! }
//! ```

use crate::{catalog::Course, config::OrganizationSection};
use serde::Serialize;
use serde_json::Value;

const SCHEMA_CONTEXT: &str = "https://schema.org";

#[derive(Serialize)]
struct EducationalOrganization<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
    url: &'a str,
    logo: &'a str,
    address: PostalAddress<'a>,
    #[serde(rename = "sameAs")]
    same_as: &'a [String],
    #[serde(rename = "hasCourse")]
    has_course: Vec<CourseNode<'a>>,
}

#[derive(Serialize)]
struct PostalAddress<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(rename = "streetAddress")]
    street: &'a str,
    #[serde(rename = "addressLocality")]
    locality: &'a str,
    #[serde(rename = "addressRegion")]
    region: &'a str,
    #[serde(rename = "addressCountry")]
    country: &'a str,
}

#[derive(Serialize)]
struct CourseNode<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
    description: &'a str,
    provider: Provider<'a>,
}

#[derive(Serialize)]
struct Provider<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
}

/// Build the organization document with one `Course` node per course,
/// in the order given.
pub fn structured_data(org: &OrganizationSection, courses: &[Course]) -> Value {
    let document = EducationalOrganization {
        context: SCHEMA_CONTEXT,
        kind: "EducationalOrganization",
        name: &org.name,
        url: &org.url,
        logo: &org.logo,
        address: PostalAddress {
            kind: "PostalAddress",
            street: &org.address.street,
            locality: &org.address.locality,
            region: &org.address.region,
            country: &org.address.country,
        },
        same_as: &org.same_as,
        has_course: courses
            .iter()
            .map(|course| CourseNode {
                kind: "Course",
                name: &course.title,
                description: &course.description,
                provider: Provider {
                    kind: "Organization",
                    name: &org.name,
                },
            })
            .collect(),
    };

    // Only string fields and sequences: serialization to a Value cannot fail.
    serde_json::to_value(document).unwrap_or(Value::Null)
}
