//! Editor operations on pages and course lists.
//!
//! Each operation builds the next working copy and commits it through
//! [`ContentStore::set_content`], so modified tracking applies uniformly.

use chrono::Utc;
use tracing::info;

use super::ContentStore;
use crate::document::{sanitize_slug, Course, MetaData, PageBlocks, SiteContent, SitePage};
use crate::error::{StoreError, StoreResult};
use crate::mutation::bulk::{self, BulkEditError};
use crate::mutation::CourseScope;

const NEW_PAGE_TITLE: &str = "New page";
const COPY_SUFFIX: &str = " (copy)";

fn generated_page_id() -> String {
    format!("page-{}", Utc::now().timestamp_millis())
}

impl ContentStore {
    /// Append a blank page with every section shown. Returns its slug.
    pub fn add_page(&mut self) -> String {
        let mut next = self.content.clone();
        let slug = format!("new-page-{}", next.pages.len() + 1);

        next.pages.push(SitePage {
            id: generated_page_id(),
            slug: slug.clone(),
            title: NEW_PAGE_TITLE.to_string(),
            menu_label: NEW_PAGE_TITLE.to_string(),
            show_in_menu: true,
            meta_data: MetaData {
                title: NEW_PAGE_TITLE.to_string(),
                description: "Page description".to_string(),
                ..MetaData::default()
            },
            blocks: PageBlocks::default(),
            ..SitePage::default()
        });
        self.set_content(next);
        info!(slug = %slug, "page added");
        slug
    }

    /// Append a deep copy of the page at `index`. Returns the copy's slug.
    pub fn duplicate_page(&mut self, index: usize) -> StoreResult<String> {
        let mut next = self.content.clone();
        let source = next
            .pages
            .get(index)
            .ok_or(StoreError::PageIndex(index))?;

        let copy = SitePage {
            id: generated_page_id(),
            slug: format!("{}-copy", source.slug),
            title: format!("{}{COPY_SUFFIX}", source.title),
            menu_label: format!("{}{COPY_SUFFIX}", source.menu_label),
            ..source.clone()
        };
        let slug = copy.slug.clone();
        next.pages.push(copy);
        self.set_content(next);
        info!(slug = %slug, "page duplicated");
        Ok(slug)
    }

    pub fn remove_page(&mut self, index: usize) -> StoreResult<SitePage> {
        let mut next = self.content.clone();
        if index >= next.pages.len() {
            return Err(StoreError::PageIndex(index));
        }
        let removed = next.pages.remove(index);
        self.set_content(next);
        info!(slug = %removed.slug, "page removed");
        Ok(removed)
    }

    /// Set the slug of the page at `index` from raw user input. Returns the
    /// sanitized slug.
    pub fn rename_slug(&mut self, index: usize, raw: &str) -> StoreResult<String> {
        let mut next = self.content.clone();
        let page = next
            .pages
            .get_mut(index)
            .ok_or(StoreError::PageIndex(index))?;
        let slug = sanitize_slug(raw);
        page.slug = slug.clone();
        self.set_content(next);
        Ok(slug)
    }

    /// Move a course by id within a scope. Returns `false` when nothing moved.
    pub fn move_course(&mut self, scope: &CourseScope, from_id: i64, to_id: i64) -> StoreResult<bool> {
        self.edit_courses(scope, |courses| Ok(bulk::move_course(courses, from_id, to_id)))
    }

    /// Assign pasted URLs to courses in order. Returns the number updated.
    pub fn apply_bulk_urls(&mut self, scope: &CourseScope, text: &str) -> StoreResult<usize> {
        self.edit_courses(scope, |courses| bulk::apply_bulk_urls(courses, text))
    }

    /// Assign pasted promo codes to courses in order. Returns the number updated.
    pub fn apply_bulk_promos(
        &mut self,
        scope: &CourseScope,
        text: &str,
        default_text: &str,
        default_percent: u32,
    ) -> StoreResult<usize> {
        self.edit_courses(scope, |courses| {
            Ok(bulk::apply_bulk_promos(courses, text, default_text, default_percent))
        })
    }

    fn edit_courses<T>(
        &mut self,
        scope: &CourseScope,
        edit: impl FnOnce(&mut Vec<Course>) -> Result<T, BulkEditError>,
    ) -> StoreResult<T> {
        let mut next = self.content.clone();
        let result = edit(courses_mut(&mut next, scope)?)?;
        self.set_content(next);
        Ok(result)
    }
}

fn courses_mut<'a>(content: &'a mut SiteContent, scope: &CourseScope) -> StoreResult<&'a mut Vec<Course>> {
    match scope {
        CourseScope::Main => Ok(&mut content.courses),
        CourseScope::Page(slug) => content
            .pages
            .iter_mut()
            .find(|p| &p.slug == slug)
            .ok_or_else(|| StoreError::PageNotFound(slug.clone()))?
            .courses
            .as_mut()
            .ok_or_else(|| StoreError::NoCourses(slug.clone())),
    }
}
