/// Document invariant checks.
///
/// Issues are reported, never enforced: a document with duplicates still
/// loads and renders, the editor decides what to fix.
use std::collections::HashSet;

use thiserror::Error;

use super::model::{Course, SiteContent};
use super::slug::is_valid_slug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentIssue {
    #[error("course id {id} appears more than once in {scope}")]
    DuplicateCourseId { scope: String, id: i64 },
    #[error("page slug `{0}` is used by more than one page")]
    DuplicatePageSlug(String),
    #[error("legal page slug `{0}` is used by more than one legal page")]
    DuplicateLegalSlug(String),
    #[error("slug `{0}` is not URL-safe")]
    InvalidSlug(String),
}

/// Collect every invariant violation in the document.
pub fn validate_document(content: &SiteContent) -> Vec<DocumentIssue> {
    let mut issues = Vec::new();

    check_course_ids("main", &content.courses, &mut issues);
    for page in &content.pages {
        if let Some(courses) = &page.courses {
            check_course_ids(&page.slug, courses, &mut issues);
        }
    }

    let mut seen = HashSet::new();
    for page in &content.pages {
        if !is_valid_slug(&page.slug) {
            issues.push(DocumentIssue::InvalidSlug(page.slug.clone()));
        }
        if !seen.insert(page.slug.as_str()) {
            issues.push(DocumentIssue::DuplicatePageSlug(page.slug.clone()));
        }
    }

    let mut seen = HashSet::new();
    for page in &content.legal_pages {
        if !is_valid_slug(&page.slug) {
            issues.push(DocumentIssue::InvalidSlug(page.slug.clone()));
        }
        if !seen.insert(page.slug.as_str()) {
            issues.push(DocumentIssue::DuplicateLegalSlug(page.slug.clone()));
        }
    }

    issues
}

fn check_course_ids(scope: &str, courses: &[Course], issues: &mut Vec<DocumentIssue>) {
    let mut seen = HashSet::new();
    for course in courses {
        if !seen.insert(course.id) {
            issues.push(DocumentIssue::DuplicateCourseId {
                scope: scope.to_string(),
                id: course.id,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::{LegalPage, SitePage};

    fn course(id: i64) -> Course {
        Course {
            id,
            ..Course::default()
        }
    }

    #[test]
    fn default_document_is_clean() {
        assert!(validate_document(&SiteContent::default()).is_empty());
    }

    #[test]
    fn reports_duplicates_per_scope() {
        let mut content = SiteContent::default();
        content.courses = vec![course(1), course(2), course(1)];
        content.pages = vec![
            SitePage {
                slug: "python".into(),
                // Same id as the root is fine: uniqueness is per array.
                courses: Some(vec![course(1)]),
                ..SitePage::default()
            },
            SitePage {
                slug: "python".into(),
                ..SitePage::default()
            },
        ];

        let issues = validate_document(&content);
        assert_eq!(
            issues,
            vec![
                DocumentIssue::DuplicateCourseId {
                    scope: "main".into(),
                    id: 1
                },
                DocumentIssue::DuplicatePageSlug("python".into()),
            ]
        );
    }

    #[test]
    fn reports_unsafe_legal_slug() {
        let mut content = SiteContent::default();
        content.legal_pages.push(LegalPage {
            slug: "Terms Of Use".into(),
            ..LegalPage::default()
        });

        assert_eq!(
            validate_document(&content),
            vec![DocumentIssue::InvalidSlug("Terms Of Use".into())]
        );
    }
}
