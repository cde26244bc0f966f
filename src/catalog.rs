//! The institute's course catalog and the title search over it.
//!
//! The catalog is fixed at startup and never mutated; every view of it
//! (search results, pricing grid, JSON-LD) borrows from the same list.

use serde::Serialize;

/// One course offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub title: String,
    pub description: String,
    pub outcomes: Vec<String>,
    pub delivery: String,
    pub duration: String,
    pub price: String,
}

impl Course {
    fn new(
        title: &str,
        description: &str,
        outcomes: [&str; 3],
        delivery: &str,
        duration: &str,
        price: &str,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            outcomes: outcomes.into_iter().map(Into::into).collect(),
            delivery: delivery.into(),
            duration: duration.into(),
            price: price.into(),
        }
    }
}

/// Ordered, immutable list of courses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// The four courses the institute offers.
    pub fn builtin() -> Self {
        let courses = vec![
            Course::new(
                "Mathematics Training",
                "Learn fundamental to advanced mathematics with expert instructors.",
                ["Algebra mastery", "Calculus fundamentals", "Applied problem-solving"],
                "In-person & Online",
                "3 months",
                "SAR 2500",
            ),
            Course::new(
                "English Language Skills",
                "Improve your English for academics, business, or test preparation.",
                ["Grammar accuracy", "Speaking fluency", "Academic writing"],
                "In-person & Online",
                "2 months",
                "SAR 2000",
            ),
            Course::new(
                "GRE Preparation",
                "Boost your GRE scores with proven strategies and practice tests.",
                ["Quantitative reasoning", "Verbal reasoning", "Analytical writing"],
                "Hybrid",
                "10 weeks",
                "SAR 3000",
            ),
            Course::new(
                "STEP Exam Preparation",
                "Prepare for the Saudi STEP exam with tailored practice sessions.",
                ["Test strategies", "Reading comprehension", "Listening skills"],
                "Online",
                "6 weeks",
                "SAR 1800",
            ),
        ];
        Self { courses }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }
}

/// Courses whose lowercased title contains the lowercased query.
///
/// Order follows the input slice. An empty query matches everything.
pub fn filter_courses<'a>(courses: &'a [Course], query: &str) -> Vec<&'a Course> {
    let needle = query.to_lowercase();
    courses
        .iter()
        .filter(|course| course.title.to_lowercase().contains(&needle))
        .collect()
}
