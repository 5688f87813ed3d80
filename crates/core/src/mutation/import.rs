//! JSON import with structural validation and image-preserving merge.
//!
//! Import never mutates the current document: it returns the next document,
//! and the store decides when to commit it.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use super::merge::{
    is_provided, merge_author_image, merge_course_images, merge_meta_data, merge_page_author,
    merge_page_images, overlay,
};
use super::types::Target;
use crate::document::{
    strip_nulls, Author, BeforeTableBlock, ContentBlock, Course, FaqItem, HeaderStats, MetaData,
    SiteContent, SitePage,
};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("import payload must be a JSON object")]
    NotAnObject,
    #[error("payload for `{target}` import must contain {expected}")]
    MissingFields {
        target: String,
        expected: &'static str,
    },
    #[error("page `{0}` not found")]
    PageNotFound(String),
    #[error("payload for page `{0}` is neither a page object nor page content")]
    UnrecognizedPayload(String),
}

/// Content fields accepted by a content-only page import.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PageContentPayload {
    page_title: Option<String>,
    meta_data: Option<MetaData>,
    author: Option<Author>,
    header_stats: Option<HeaderStats>,
    intro_text: Option<String>,
    before_table_block: Option<BeforeTableBlock>,
    courses: Option<Vec<Course>>,
    content_blocks: Option<Vec<ContentBlock>>,
    faq_data: Option<Vec<FaqItem>>,
}

/// Parse `json` and merge it into `current` according to `target`.
pub fn import_document(
    current: &SiteContent,
    json: &str,
    target: &Target,
) -> Result<SiteContent, ImportError> {
    let mut value = serde_json::from_str::<Value>(json)?;
    // `null` counts as absent, so stored values and images survive it.
    strip_nulls(&mut value);
    let parsed = match value {
        Value::Object(map) => map,
        _ => return Err(ImportError::NotAnObject),
    };

    match target {
        Target::Full => import_full(current, parsed),
        Target::Main => import_main(current, parsed),
        Target::Page(slug) => import_page(current, parsed, slug),
    }
}

fn import_full(current: &SiteContent, parsed: Map<String, Value>) -> Result<SiteContent, ImportError> {
    if !is_provided(&parsed, "pageTitle") && !is_provided(&parsed, "pages") {
        return Err(ImportError::MissingFields {
            target: Target::Full.to_string(),
            expected: "`pageTitle` or `pages`",
        });
    }

    let has_courses = is_provided(&parsed, "courses");
    let has_author = is_provided(&parsed, "author");
    let has_pages = is_provided(&parsed, "pages");

    let mut next = SiteContent::from_value(Value::Object(parsed))?;

    next.courses = if has_courses {
        merge_course_images(next.courses, &current.courses)
    } else {
        current.courses.clone()
    };
    next.author = if has_author {
        merge_author_image(next.author, &current.author)
    } else {
        current.author.clone()
    };
    next.pages = if has_pages {
        next.pages
            .into_iter()
            .map(|page| {
                let existing = current.page(&page.slug);
                merge_page_images(page, existing)
            })
            .collect()
    } else {
        current.pages.clone()
    };

    debug!(pages = next.pages.len(), courses = next.courses.len(), "imported full document");
    Ok(next)
}

fn import_main(current: &SiteContent, parsed: Map<String, Value>) -> Result<SiteContent, ImportError> {
    if !is_provided(&parsed, "pageTitle")
        || !is_provided(&parsed, "metaData")
        || !is_provided(&parsed, "courses")
    {
        return Err(ImportError::MissingFields {
            target: Target::Main.to_string(),
            expected: "`pageTitle`, `metaData` and `courses`",
        });
    }

    let has_author = is_provided(&parsed, "author");
    let mut next = SiteContent::from_value(Value::Object(parsed))?;

    next.courses = merge_course_images(next.courses, &current.courses);
    next.author = if has_author {
        merge_author_image(next.author, &current.author)
    } else {
        current.author.clone()
    };
    next.pages = current.pages.clone();
    next.navigation = current.navigation.clone();

    debug!(courses = next.courses.len(), "imported main page");
    Ok(next)
}

fn import_page(
    current: &SiteContent,
    parsed: Map<String, Value>,
    slug: &str,
) -> Result<SiteContent, ImportError> {
    let index = current
        .page_index(slug)
        .ok_or_else(|| ImportError::PageNotFound(slug.to_string()))?;
    let existing = &current.pages[index];

    let page = if is_provided(&parsed, "slug") && is_provided(&parsed, "blocks") {
        import_page_object(existing, parsed, slug)?
    } else if is_provided(&parsed, "pageTitle") || is_provided(&parsed, "courses") {
        import_page_content(existing, parsed)?
    } else {
        return Err(ImportError::UnrecognizedPayload(slug.to_string()));
    };

    let mut next = current.clone();
    next.pages[index] = page;
    debug!(slug, "imported page");
    Ok(next)
}

/// A whole page object replaces the stored page field by field; `blocks`
/// toggles are replaced per key. The slug is never changed by import.
fn import_page_object(
    existing: &SitePage,
    mut parsed: Map<String, Value>,
    slug: &str,
) -> Result<SitePage, ImportError> {
    let has_courses = is_provided(&parsed, "courses");
    let has_author = is_provided(&parsed, "author");

    let mut base = match serde_json::to_value(existing)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Some(Value::Object(incoming)) = parsed.get("blocks") {
        if let Some(Value::Object(stored)) = base.get_mut("blocks") {
            overlay(stored, incoming.clone());
            parsed.remove("blocks");
        }
    }
    overlay(&mut base, parsed);
    base.insert("slug".to_string(), Value::String(slug.to_string()));

    let mut page: SitePage = serde_json::from_value(Value::Object(base))?;

    page.courses = if has_courses {
        page.courses.take().map(|courses| {
            merge_course_images(courses, existing.courses.as_deref().unwrap_or_default())
        })
    } else {
        existing.courses.clone()
    };
    let incoming_author = if has_author { page.author.take() } else { None };
    page.author = merge_page_author(incoming_author, existing.author.as_ref());

    Ok(page)
}

/// Page content shaped like the main document: only overridable fields are
/// copied, each keeping the stored value when absent.
fn import_page_content(
    existing: &SitePage,
    parsed: Map<String, Value>,
) -> Result<SitePage, ImportError> {
    let payload: PageContentPayload = serde_json::from_value(Value::Object(parsed))?;
    let mut page = existing.clone();

    page.page_title = non_empty(payload.page_title).or(page.page_title);
    page.author = merge_page_author(payload.author, existing.author.as_ref());
    page.header_stats = payload.header_stats.or(page.header_stats);
    page.intro_text = non_empty(payload.intro_text).or(page.intro_text);
    page.before_table_block = payload.before_table_block.or(page.before_table_block);
    page.courses = match payload.courses {
        Some(courses) => Some(merge_course_images(
            courses,
            existing.courses.as_deref().unwrap_or_default(),
        )),
        None => Some(existing.courses.clone().unwrap_or_default()),
    };
    page.content_blocks = payload.content_blocks.or(page.content_blocks);
    page.faq_data = payload.faq_data.or(page.faq_data);
    if let Some(meta_data) = payload.meta_data {
        page.meta_data = merge_meta_data(meta_data, &existing.meta_data);
    }

    Ok(page)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
