use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root content document rendered by the site.
///
/// Missing keys deserialize from [`SiteContent::default`], which is the fixed
/// default document, so any JSON object yields a structurally complete value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteContent {
    pub page_title: String,
    pub meta_data: MetaData,
    pub author: Author,
    pub header_stats: HeaderStats,
    pub intro_text: String,
    pub before_table_block: BeforeTableBlock,
    pub courses: Vec<Course>,
    pub content_blocks: Vec<ContentBlock>,
    pub faq_data: Vec<FaqItem>,
    pub pages: Vec<SitePage>,
    pub navigation: Vec<NavItem>,
    /// Last content update, `YYYY-MM-DD`.
    pub updated_at: String,
    pub ad_disclosure_text: String,
    pub footer_text: String,
    pub footer_email: String,
    pub footer_links: Vec<FooterLink>,
    pub legal_pages: Vec<LegalPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetaData {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub canonical_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    /// Image URL or an embedded `data:` URI.
    pub photo: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderStats {
    pub reviews_count: String,
    pub badge_text: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BeforeTableBlock {
    pub title: String,
    pub paragraphs: Vec<String>,
    pub criteria: Vec<IconText>,
}

/// Icon + text pair used by criteria lists and content block lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconText {
    pub icon: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentBlock {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<IconText>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Teacher {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewLink {
    pub platform: String,
    pub count: String,
    pub rating: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PromoCode {
    pub code: String,
    pub discount_text: String,
    pub discount_percent: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Top,
    Popular,
    New,
}

/// A money amount as written in the document. Whole numbers stay whole on
/// export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Whole(i64),
    Fractional(f64),
}

impl Amount {
    pub fn as_f64(self) -> f64 {
        match self {
            Amount::Whole(n) => n as f64,
            Amount::Fractional(n) => n,
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Whole(0)
    }
}

/// A ranked course. `id` is the stable key for reordering and image matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub school: String,
    /// Image URL or an embedded `data:` URI.
    pub school_logo: String,
    pub url: String,
    pub price: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installment: Option<Amount>,
    pub format: String,
    pub duration: String,
    pub document: String,
    pub for_whom: String,
    pub features: Vec<String>,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teachers: Option<Vec<Teacher>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<Vec<String>>,
    pub advantages: Vec<String>,
    pub reviews: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_links: Option<Vec<ReviewLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<PromoCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

/// Which sections a page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageBlocks {
    pub show_header: bool,
    pub show_author: bool,
    pub show_intro: bool,
    pub show_before_table: bool,
    pub show_courses_list: bool,
    pub show_course_details: bool,
    pub show_content_blocks: bool,
    #[serde(rename = "showFAQ")]
    pub show_faq: bool,
}

impl Default for PageBlocks {
    fn default() -> Self {
        Self {
            show_header: true,
            show_author: true,
            show_intro: true,
            show_before_table: true,
            show_courses_list: true,
            show_course_details: true,
            show_content_blocks: true,
            show_faq: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Link {
    pub label: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_external: Option<bool>,
}

pub type NavItem = Link;
pub type FooterLink = Link;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalSection {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegalPage {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub sections: Vec<LegalSection>,
    pub show_in_footer: bool,
}

/// An additional page. Every `Option` field overrides the root value of the
/// same name; `None` (or an empty value) inherits from the root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SitePage {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub menu_label: String,
    pub show_in_menu: bool,
    pub meta_data: MetaData,
    pub blocks: PageBlocks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
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
}

/// Remove every `null`-valued object key, recursively, so typed fields fall
/// back to their defaults. Array elements are kept as they are.
pub fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

impl SiteContent {
    /// Build a document from a JSON value, filling missing top-level keys
    /// from the default document. `null` reads as a missing key.
    pub fn from_value(mut value: Value) -> Result<Self, serde_json::Error> {
        strip_nulls(&mut value);
        serde_json::from_value(value)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        Self::from_value(serde_json::from_str(raw)?)
    }

    pub fn page(&self, slug: &str) -> Option<&SitePage> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    pub fn page_index(&self, slug: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.slug == slug)
    }

    pub fn legal_page(&self, slug: &str) -> Option<&LegalPage> {
        self.legal_pages.iter().find(|p| p.slug == slug)
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            page_title: String::new(),
            meta_data: MetaData::default(),
            author: Author::default(),
            header_stats: HeaderStats {
                reviews_count: "0".to_string(),
                ..HeaderStats::default()
            },
            intro_text: String::new(),
            before_table_block: BeforeTableBlock::default(),
            courses: Vec::new(),
            content_blocks: Vec::new(),
            faq_data: Vec::new(),
            pages: Vec::new(),
            navigation: vec![
                Link {
                    label: "Home".to_string(),
                    href: "/".to_string(),
                    is_external: None,
                },
                Link {
                    label: "Courses".to_string(),
                    href: "#courses".to_string(),
                    is_external: None,
                },
            ],
            updated_at: String::new(),
            ad_disclosure_text:
                "Advertisement. Advertiser information is available via the links in this article."
                    .to_string(),
            footer_text: "This website is for information purposes only and under no circumstances constitutes a public offer.".to_string(),
            footer_email: "info@example.com".to_string(),
            footer_links: Vec::new(),
            legal_pages: vec![default_privacy_page()],
        }
    }
}

fn default_privacy_page() -> LegalPage {
    let sections = [
        (
            "1. General provisions",
            "This Privacy Policy defines how personal data of site visitors is processed and protected.\n\nUsing the site means agreeing to this Privacy Policy and its terms of personal data processing.",
        ),
        (
            "2. Personal data",
            "We may collect the following data:\n• Technical information (IP address, browser type, time of visit)\n• Data from cookies and analytics systems\n• Information provided voluntarily through feedback forms",
        ),
        (
            "3. Purposes of processing",
            "Personal data is processed in order to:\n• Improve the quality of the site\n• Analyse traffic and visitor behaviour\n• Respond to visitor enquiries",
        ),
        (
            "4. Data protection",
            "We take the technical and organisational measures needed to protect personal data from unauthorised access, modification, disclosure or destruction.",
        ),
        (
            "5. Cookies",
            "The site uses cookies to function correctly and to collect analytics. You can disable cookies in your browser settings.",
        ),
        (
            "6. Contact information",
            "For questions about personal data processing you can contact us by email.",
        ),
        (
            "7. Policy changes",
            "We reserve the right to amend this Privacy Policy. The current version is always available on this page.",
        ),
    ];

    LegalPage {
        id: "privacy".to_string(),
        slug: "privacy".to_string(),
        title: "Privacy Policy".to_string(),
        sections: sections
            .iter()
            .map(|(title, content)| LegalSection {
                title: (*title).to_string(),
                content: (*content).to_string(),
            })
            .collect(),
        show_in_footer: true,
    }
}
