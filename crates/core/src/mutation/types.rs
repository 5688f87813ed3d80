/// Mutation types: partial updates, import/export targets and course scopes.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::{
    Author, BeforeTableBlock, ContentBlock, Course, FaqItem, FooterLink, HeaderStats, LegalPage,
    MetaData, NavItem, SiteContent, SitePage,
};

const FULL: &str = "full";
const MAIN: &str = "main";

/// What an export or import applies to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Target {
    /// The whole document, pages and navigation included.
    Full,
    /// The root document without `pages` and `navigation`.
    #[default]
    Main,
    /// One additional page, by slug.
    Page(String),
}

impl Target {
    /// Parse an optional target name; absent or empty means [`Target::Main`].
    pub fn parse(name: Option<&str>) -> Self {
        match name {
            None | Some("") | Some(MAIN) => Target::Main,
            Some(FULL) => Target::Full,
            Some(slug) => Target::Page(slug.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Target::Full => FULL,
            Target::Main => MAIN,
            Target::Page(slug) => slug,
        }
    }
}

impl FromStr for Target {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Target::parse(Some(s)))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which course array a course-level edit applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseScope {
    Main,
    Page(String),
}

impl CourseScope {
    pub fn parse(name: &str) -> Self {
        match name {
            MAIN | "" => CourseScope::Main,
            slug => CourseScope::Page(slug.to_string()),
        }
    }
}

impl fmt::Display for CourseScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseScope::Main => f.write_str(MAIN),
            CourseScope::Page(slug) => f.write_str(slug),
        }
    }
}

/// A shallow partial update of the root document. Each `Some` field replaces
/// the corresponding field wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<MetaData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_stats: Option<HeaderStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_table_block: Option<BeforeTableBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<Course>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_blocks: Option<Vec<ContentBlock>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_data: Option<Vec<FaqItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<SitePage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Vec<NavItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_disclosure_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_links: Option<Vec<FooterLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_pages: Option<Vec<LegalPage>>,
}

impl ContentPatch {
    pub fn is_empty(&self) -> bool {
        *self == ContentPatch::default()
    }

    /// Apply the patch onto `content`.
    pub fn apply(self, content: &mut SiteContent) {
        macro_rules! replace {
            ($($field:ident),*) => {
                $(if let Some(value) = self.$field {
                    content.$field = value;
                })*
            };
        }

        replace!(
            page_title,
            meta_data,
            author,
            header_stats,
            intro_text,
            before_table_block,
            courses,
            content_blocks,
            faq_data,
            pages,
            navigation,
            updated_at,
            ad_disclosure_text,
            footer_text,
            footer_email,
            footer_links,
            legal_pages
        );
    }
}
