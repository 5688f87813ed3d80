use serde_json::Value;
use tracing::warn;

use super::types::Target;
use crate::document::SiteContent;

/// Keys stripped from a main-page export.
const SITE_ONLY_KEYS: [&str; 2] = ["pages", "navigation"];

/// Serialize the part of `content` selected by `target` as pretty JSON.
///
/// An unknown page slug falls back to the full document, so the caller always
/// receives a valid JSON document.
pub fn export_document(content: &SiteContent, target: &Target) -> Result<String, serde_json::Error> {
    match target {
        Target::Full => serde_json::to_string_pretty(content),
        Target::Main => {
            let mut value = serde_json::to_value(content)?;
            if let Value::Object(map) = &mut value {
                for key in SITE_ONLY_KEYS {
                    map.remove(key);
                }
            }
            serde_json::to_string_pretty(&value)
        }
        Target::Page(slug) => match content.page(slug) {
            Some(page) => serde_json::to_string_pretty(page),
            None => {
                warn!(slug = %slug, "export target page not found, exporting full document");
                serde_json::to_string_pretty(content)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SitePage;

    fn content() -> SiteContent {
        SiteContent {
            page_title: "Ranking".into(),
            pages: vec![SitePage {
                slug: "python".into(),
                title: "Python".into(),
                ..SitePage::default()
            }],
            ..SiteContent::default()
        }
    }

    #[test]
    fn main_export_strips_pages_and_navigation() {
        let json = export_document(&content(), &Target::Main).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["pageTitle"], "Ranking");
        assert!(value.get("pages").is_none());
        assert!(value.get("navigation").is_none());
        assert!(value.get("legalPages").is_some());
    }

    #[test]
    fn page_export_is_the_page_object() {
        let content = content();
        let json = export_document(&content, &Target::Page("python".into())).unwrap();

        assert_eq!(json, serde_json::to_string_pretty(&content.pages[0]).unwrap());
    }

    #[test]
    fn unknown_page_exports_full_document() {
        let content = content();
        let json = export_document(&content, &Target::Page("missing".into())).unwrap();

        assert_eq!(json, export_document(&content, &Target::Full).unwrap());
        assert_eq!(SiteContent::from_json_str(&json).unwrap(), content);
    }
}
