//! Typed merge functions used by import.
//!
//! Image fields (`Course::school_logo`, `Author::photo`) often hold large
//! embedded payloads that hand-edited JSON leaves out. An empty incoming image
//! never erases the stored one.

use serde_json::{Map, Value};

use crate::document::{Author, Course, MetaData, SitePage};

/// Keep stored logos for incoming courses that match an existing course by
/// `id` and carry no logo of their own.
pub fn merge_course_images(incoming: Vec<Course>, existing: &[Course]) -> Vec<Course> {
    incoming
        .into_iter()
        .map(|mut course| {
            if course.school_logo.is_empty() {
                if let Some(stored) = existing.iter().find(|c| c.id == course.id) {
                    course.school_logo = stored.school_logo.clone();
                }
            }
            course
        })
        .collect()
}

/// Keep the stored photo when the incoming author has none.
pub fn merge_author_image(mut incoming: Author, existing: &Author) -> Author {
    if incoming.photo.is_empty() {
        incoming.photo = existing.photo.clone();
    }
    incoming
}

/// Merge an optional page-level author override against the stored one.
pub fn merge_page_author(incoming: Option<Author>, existing: Option<&Author>) -> Option<Author> {
    match (incoming, existing) {
        (Some(author), Some(stored)) => Some(merge_author_image(author, stored)),
        (Some(author), None) => Some(author),
        (None, stored) => stored.cloned(),
    }
}

/// Merge a page arriving in a full-document import against the page with the
/// same slug in the current document.
pub fn merge_page_images(mut incoming: SitePage, existing: Option<&SitePage>) -> SitePage {
    let Some(existing) = existing else {
        return incoming;
    };

    incoming.courses = match incoming.courses.take() {
        Some(courses) => Some(merge_course_images(
            courses,
            existing.courses.as_deref().unwrap_or_default(),
        )),
        None => existing.courses.clone(),
    };
    incoming.author = merge_page_author(incoming.author.take(), existing.author.as_ref());
    incoming
}

/// Field-by-field metadata merge: empty incoming fields keep the stored value.
pub fn merge_meta_data(incoming: MetaData, existing: &MetaData) -> MetaData {
    let pick = |new: String, old: &String| if new.is_empty() { old.clone() } else { new };

    MetaData {
        title: pick(incoming.title, &existing.title),
        description: pick(incoming.description, &existing.description),
        keywords: pick(incoming.keywords, &existing.keywords),
        canonical_url: pick(incoming.canonical_url, &existing.canonical_url),
    }
}

/// Overlay the top-level keys of `patch` onto `base`, replacing values wholesale.
pub fn overlay(base: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        base.insert(key, value);
    }
}

/// A key counts as provided when it is present and holds a non-empty value:
/// not `null`, `false`, `0` or `""`. Arrays and objects always count.
pub fn is_provided(map: &Map<String, Value>, key: &str) -> bool {
    match map.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(_) => true,
    }
}
