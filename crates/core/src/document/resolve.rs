//! Page resolution: merges a page's overrides with the root document.
//!
//! Every overridable field follows one rule: the page value wins when it is
//! present and non-empty, otherwise the root value is used.

use std::collections::HashSet;

use serde::Serialize;

use super::model::{
    Author, BeforeTableBlock, ContentBlock, Course, FaqItem, HeaderStats, LegalPage, MetaData,
    PageBlocks, SiteContent, SitePage,
};
use super::route::Route;

/// Values that count as "not set" for fallback purposes.
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! blank_when_default {
    ($($ty:ty),*) => {
        $(impl Blank for $ty {
            fn is_blank(&self) -> bool {
                *self == <$ty>::default()
            }
        })*
    };
}

blank_when_default!(Author, HeaderStats, BeforeTableBlock);

/// Pick the page override when set, else the root value.
pub fn fallback<'a, T: Blank>(page: Option<&'a T>, root: &'a T) -> &'a T {
    match page {
        Some(value) if !value.is_blank() => value,
        _ => root,
    }
}

/// A page with every field resolved against the root document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPage {
    pub slug: Option<String>,
    pub page_title: String,
    pub meta_data: MetaData,
    pub blocks: PageBlocks,
    pub author: Author,
    pub header_stats: HeaderStats,
    pub intro_text: String,
    pub before_table_block: BeforeTableBlock,
    pub courses: Vec<Course>,
    pub content_blocks: Vec<ContentBlock>,
    pub faq_data: Vec<FaqItem>,
    pub courses_count: usize,
    /// Number of distinct schools across the resolved courses.
    pub schools_count: usize,
}

/// Result of resolving a route against the document.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedRoute {
    Home(ResolvedPage),
    Page(ResolvedPage),
    Legal(LegalPage),
    Tutorial,
    Editor,
    Redirect(String),
    NotFound,
}

impl SiteContent {
    pub fn resolve_page(&self, slug: &str) -> Option<ResolvedPage> {
        self.page(slug).map(|page| self.resolve_with(page))
    }

    /// The landing page: root values, every section shown.
    pub fn resolve_home(&self) -> ResolvedPage {
        build(
            None,
            self.page_title.clone(),
            self.meta_data.clone(),
            PageBlocks::default(),
            self.author.clone(),
            self.header_stats.clone(),
            self.intro_text.clone(),
            self.before_table_block.clone(),
            self.courses.clone(),
            self.content_blocks.clone(),
            self.faq_data.clone(),
        )
    }

    pub fn resolve_route(&self, route: &Route) -> ResolvedRoute {
        match route {
            Route::Home => ResolvedRoute::Home(self.resolve_home()),
            Route::Editor => ResolvedRoute::Editor,
            Route::Tutorial => ResolvedRoute::Tutorial,
            Route::Redirect(to) => ResolvedRoute::Redirect(to.clone()),
            Route::Page(slug) => self
                .resolve_page(slug)
                .map_or(ResolvedRoute::NotFound, ResolvedRoute::Page),
            Route::Legal(slug) => self
                .legal_page(slug)
                .cloned()
                .map_or(ResolvedRoute::NotFound, ResolvedRoute::Legal),
            Route::NotFound => ResolvedRoute::NotFound,
        }
    }

    fn resolve_with(&self, page: &SitePage) -> ResolvedPage {
        build(
            Some(page.slug.clone()),
            fallback(page.page_title.as_ref(), &self.page_title).clone(),
            page.meta_data.clone(),
            page.blocks.clone(),
            fallback(page.author.as_ref(), &self.author).clone(),
            fallback(page.header_stats.as_ref(), &self.header_stats).clone(),
            fallback(page.intro_text.as_ref(), &self.intro_text).clone(),
            fallback(page.before_table_block.as_ref(), &self.before_table_block).clone(),
            fallback(page.courses.as_ref(), &self.courses).clone(),
            fallback(page.content_blocks.as_ref(), &self.content_blocks).clone(),
            fallback(page.faq_data.as_ref(), &self.faq_data).clone(),
        )
    }
}

#[allow(clippy::too_many_arguments)]
fn build(
    slug: Option<String>,
    page_title: String,
    meta_data: MetaData,
    blocks: PageBlocks,
    author: Author,
    header_stats: HeaderStats,
    intro_text: String,
    before_table_block: BeforeTableBlock,
    courses: Vec<Course>,
    content_blocks: Vec<ContentBlock>,
    faq_data: Vec<FaqItem>,
) -> ResolvedPage {
    let schools_count = courses
        .iter()
        .map(|c| c.school.as_str())
        .collect::<HashSet<_>>()
        .len();

    ResolvedPage {
        slug,
        page_title,
        meta_data,
        blocks,
        author,
        header_stats,
        intro_text,
        before_table_block,
        courses_count: courses.len(),
        schools_count,
        courses,
        content_blocks,
        faq_data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> SiteContent {
        SiteContent {
            page_title: "Best online courses".into(),
            intro_text: "Root intro".into(),
            author: Author {
                name: "Root Author".into(),
                photo: "root.png".into(),
                ..Author::default()
            },
            courses: vec![
                Course {
                    id: 1,
                    school: "Skillbox".into(),
                    ..Course::default()
                },
                Course {
                    id: 2,
                    school: "Skillbox".into(),
                    ..Course::default()
                },
                Course {
                    id: 3,
                    school: "Netology".into(),
                    ..Course::default()
                },
            ],
            faq_data: vec![FaqItem {
                question: "Why?".into(),
                answer: "Because.".into(),
            }],
            pages: vec![SitePage {
                slug: "python".into(),
                blocks: PageBlocks {
                    show_faq: false,
                    ..PageBlocks::default()
                },
                ..SitePage::default()
            }],
            ..SiteContent::default()
        }
    }

    #[test]
    fn absent_overrides_inherit_root() {
        let content = root();
        let page = content.resolve_page("python").unwrap();

        assert_eq!(page.page_title, content.page_title);
        assert_eq!(page.author, content.author);
        assert_eq!(page.header_stats, content.header_stats);
        assert_eq!(page.intro_text, content.intro_text);
        assert_eq!(page.before_table_block, content.before_table_block);
        assert_eq!(page.courses, content.courses);
        assert_eq!(page.content_blocks, content.content_blocks);
        assert_eq!(page.faq_data, content.faq_data);
        assert!(!page.blocks.show_faq);
        assert_eq!(page.courses_count, 3);
        assert_eq!(page.schools_count, 2);
    }

    #[test]
    fn empty_overrides_inherit_root() {
        let mut content = root();
        let page = &mut content.pages[0];
        page.intro_text = Some(String::new());
        page.courses = Some(Vec::new());
        page.author = Some(Author::default());

        let resolved = content.resolve_page("python").unwrap();
        assert_eq!(resolved.intro_text, "Root intro");
        assert_eq!(resolved.courses.len(), 3);
        assert_eq!(resolved.author.name, "Root Author");
    }

    #[test]
    fn present_overrides_win_verbatim() {
        let mut content = root();
        let own_courses = vec![Course {
            id: 9,
            school: "GeekBrains".into(),
            ..Course::default()
        }];
        let own_stats = HeaderStats {
            reviews_count: "120".into(),
            badge_text: "2025".into(),
            subtitle: "Python only".into(),
        };
        let page = &mut content.pages[0];
        page.intro_text = Some("Python intro".into());
        page.courses = Some(own_courses.clone());
        page.header_stats = Some(own_stats.clone());

        let resolved = content.resolve_page("python").unwrap();
        assert_eq!(resolved.intro_text, "Python intro");
        assert_eq!(resolved.courses, own_courses);
        assert_eq!(resolved.header_stats, own_stats);
        assert_eq!(resolved.schools_count, 1);
        // Untouched fields still inherit.
        assert_eq!(resolved.faq_data, content.faq_data);
    }

    #[test]
    fn unknown_page_and_legal_routes_resolve_to_not_found() {
        let content = root();
        assert_eq!(
            content.resolve_route(&Route::Page("missing".into())),
            ResolvedRoute::NotFound
        );
        assert_eq!(
            content.resolve_route(&Route::Legal("missing".into())),
            ResolvedRoute::NotFound
        );
        assert!(matches!(
            content.resolve_route(&Route::Legal("privacy".into())),
            ResolvedRoute::Legal(page) if page.slug == "privacy"
        ));
    }
}
