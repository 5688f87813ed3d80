/// URL routing for the public site and the editor surface.
///
/// Paths follow these conventions:
/// - Home: `/`
/// - Editor: `/{editor_segment}`
/// - Legal page: `/legal/{slug}`
/// - Content page: `/{slug}`
/// - `/privacy` is kept as a redirect to `/legal/privacy`

const LEGAL_PREFIX: &str = "legal";
const TUTORIAL_SEGMENT: &str = "tutorial";
const PRIVACY_SEGMENT: &str = "privacy";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Editor,
    Tutorial,
    /// Permanent redirect to another path.
    Redirect(String),
    Legal(String),
    Page(String),
    NotFound,
}

/// Which side of the site a store instance serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The admin surface: sole writer of the persisted draft.
    Editor,
    /// Every other route: readers that follow the latest saved draft.
    Public,
}

impl Route {
    /// Parse a navigation path into its route.
    pub fn parse(path: &str, editor_segment: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            [segment] if *segment == editor_segment => Route::Editor,
            [segment] if *segment == TUTORIAL_SEGMENT => Route::Tutorial,
            [segment] if *segment == PRIVACY_SEGMENT => {
                Route::Redirect(format!("/{LEGAL_PREFIX}/{PRIVACY_SEGMENT}"))
            }
            [slug] => Route::Page((*slug).to_string()),
            [prefix, slug] if *prefix == LEGAL_PREFIX => Route::Legal((*slug).to_string()),
            _ => Route::NotFound,
        }
    }

    /// Canonical path for this route.
    pub fn path(&self, editor_segment: &str) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Editor => format!("/{editor_segment}"),
            Route::Tutorial => format!("/{TUTORIAL_SEGMENT}"),
            Route::Redirect(_) => format!("/{PRIVACY_SEGMENT}"),
            Route::Legal(slug) => format!("/{LEGAL_PREFIX}/{slug}"),
            Route::Page(slug) => format!("/{slug}"),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn is_editor(&self) -> bool {
        matches!(self, Route::Editor)
    }

    pub fn mode(&self) -> Mode {
        if self.is_editor() {
            Mode::Editor
        } else {
            Mode::Public
        }
    }
}

impl Mode {
    pub fn from_path(path: &str, editor_segment: &str) -> Self {
        Route::parse(path, editor_segment).mode()
    }

    pub fn is_editor(self) -> bool {
        matches!(self, Mode::Editor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDITOR: &str = "panel-x7k9m2";

    #[test]
    fn parse_home() {
        assert_eq!(Route::parse("/", EDITOR), Route::Home);
        assert_eq!(Route::parse("", EDITOR), Route::Home);
        assert_eq!(Route::parse("/?utm=1", EDITOR), Route::Home);
    }

    #[test]
    fn parse_editor() {
        let route = Route::parse("/panel-x7k9m2", EDITOR);
        assert_eq!(route, Route::Editor);
        assert_eq!(route.mode(), Mode::Editor);
        assert_eq!(route.path(EDITOR), "/panel-x7k9m2");
        assert_eq!(Mode::from_path("/panel-x7k9m2/", EDITOR), Mode::Editor);
    }

    #[test]
    fn parse_pages_and_legal() {
        assert_eq!(
            Route::parse("/python-courses", EDITOR),
            Route::Page("python-courses".to_string())
        );
        assert_eq!(
            Route::parse("/legal/terms", EDITOR),
            Route::Legal("terms".to_string())
        );
        assert_eq!(Route::parse("/legal/terms", EDITOR).path(EDITOR), "/legal/terms");
        assert_eq!(Mode::from_path("/python-courses", EDITOR), Mode::Public);
    }

    #[test]
    fn parse_privacy_redirect_and_unknown() {
        assert_eq!(
            Route::parse("/privacy", EDITOR),
            Route::Redirect("/legal/privacy".to_string())
        );
        assert_eq!(Route::parse("/tutorial", EDITOR), Route::Tutorial);
        assert_eq!(Route::parse("/a/b/c", EDITOR), Route::NotFound);
        assert_eq!(Route::parse("/blog/post", EDITOR), Route::NotFound);
    }
}
