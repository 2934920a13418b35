//! Document navigation: request stamping and hash route resolution.
//!
//! Every document load is stamped with a [`Ticket`]. A response is applied
//! only if its ticket is still the latest one, so a slow earlier request can
//! never overwrite the document the user navigated to afterwards.

use leptos::logging::{log, warn};

use crate::core::error::FetchError;
use crate::core::source::ContentSource;
use crate::models::{ContentState, DocRoute, Document};
use crate::utils::markdown::render_markdown;

/// Stamp of a single document request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub path: String,
    seq: u64,
}

/// Tracks the desired document and what the content pane shows.
#[derive(Clone, Debug, Default)]
pub struct DocumentNavigator {
    seq: u64,
    desired: Option<String>,
    content: ContentState,
}

impl DocumentNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `path`: it becomes the desired document and the
    /// content pane switches to its loading placeholder.
    pub fn begin(&mut self, path: &str) -> Ticket {
        self.seq += 1;
        self.desired = Some(path.to_string());
        self.content = ContentState::Loading {
            path: path.to_string(),
        };
        Ticket {
            path: path.to_string(),
            seq: self.seq,
        }
    }

    /// Whether `ticket` belongs to the latest request.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.seq == self.seq
    }

    /// Apply a finished request. Returns `false` for stale tickets, which
    /// are discarded.
    pub fn finish(&mut self, ticket: &Ticket, result: Result<Document, FetchError>) -> bool {
        if !self.is_current(ticket) {
            log!("Discarding stale response for {}", ticket.path);
            return false;
        }
        self.content = match result {
            Ok(doc) => ContentState::Ready(doc),
            Err(err) => ContentState::Failed {
                message: format!("Unable to load: {}", err),
            },
        };
        true
    }

    /// Show an error unrelated to the current document (e.g. a listing).
    pub fn fail(&mut self, message: impl Into<String>) {
        self.content = ContentState::Failed {
            message: message.into(),
        };
    }

    /// The document most recently requested.
    pub fn desired(&self) -> Option<&str> {
        self.desired.as_deref()
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }
}

/// Fetch and render the document a ticket refers to.
pub async fn load_document<S: ContentSource>(
    source: &S,
    ticket: &Ticket,
) -> Result<Document, FetchError> {
    let text = source.fetch_document(&ticket.path).await?;
    let (html, headings) = render_markdown(&text, &ticket.path);
    Ok(Document {
        path: ticket.path.clone(),
        html,
        headings,
    })
}

// ============================================================================
// Route Resolution
// ============================================================================

/// What the router should do for a location fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteAction {
    /// Empty or undecodable fragment
    Nothing,
    /// Open a different document (without touching the route), then
    /// optionally scroll to a heading
    Open { path: String, heading: Option<String> },
    /// The document is already the desired one; only scroll
    Scroll(String),
}

/// Resolve a fragment against the currently desired document.
pub fn resolve_route(hash: &str, desired: Option<&str>) -> RouteAction {
    let route = match DocRoute::from_hash(hash) {
        Ok(Some(route)) => route,
        Ok(None) => return RouteAction::Nothing,
        Err(err) => {
            warn!("Ignoring route {}: {}", hash, err);
            return RouteAction::Nothing;
        }
    };

    if desired == Some(route.path.as_str()) {
        return match route.heading {
            Some(id) => RouteAction::Scroll(id),
            None => RouteAction::Nothing,
        };
    }

    RouteAction::Open {
        path: route.path,
        heading: route.heading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::mock::MockSource;

    fn doc(path: &str) -> Document {
        Document {
            path: path.to_string(),
            html: format!("<p>{}</p>", path),
            headings: vec![],
        }
    }

    #[test]
    fn test_latest_request_wins() {
        let mut nav = DocumentNavigator::new();
        let x1 = nav.begin("x");
        let y = nav.begin("y");
        let x2 = nav.begin("x");

        // x2 answers first, then the slower y and x1 responses arrive
        assert!(nav.finish(&x2, Ok(doc("x"))));
        assert!(!nav.finish(&y, Ok(doc("y"))));
        assert!(!nav.finish(&x1, Err(FetchError::HttpError(500))));

        assert_eq!(nav.content().document().map(|d| d.path.as_str()), Some("x"));
        assert_eq!(nav.desired(), Some("x"));
    }

    #[test]
    fn test_stale_response_does_not_replace_loading_state() {
        let mut nav = DocumentNavigator::new();
        let x = nav.begin("x");
        nav.begin("y");
        assert!(!nav.finish(&x, Ok(doc("x"))));
        assert_eq!(
            nav.content(),
            &ContentState::Loading {
                path: "y".to_string()
            }
        );
    }

    #[test]
    fn test_failure_renders_error() {
        let mut nav = DocumentNavigator::new();
        let t = nav.begin("x");
        nav.finish(&t, Err(FetchError::HttpError(404)));
        assert_eq!(
            nav.content(),
            &ContentState::Failed {
                message: "Unable to load: HTTP error: 404".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_load_document_collects_headings() {
        let source = MockSource::default().with_document(
            "w/a/README.md",
            "# Title\n\n## Intro\n\ntext\n\n### Step 1: Setup!!\n",
        );
        let mut nav = DocumentNavigator::new();
        let ticket = nav.begin("w/a/README.md");

        let doc = load_document(&source, &ticket).await.unwrap();
        let ids: Vec<_> = doc.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["intro", "step-1-setup"]);
        assert!(nav.finish(&ticket, Ok(doc)));
    }

    #[tokio::test]
    async fn test_load_document_always_hits_the_network() {
        let source = MockSource::default().with_document("a", "text");
        let mut nav = DocumentNavigator::new();
        for _ in 0..2 {
            let ticket = nav.begin("a");
            load_document(&source, &ticket).await.unwrap();
        }
        assert_eq!(source.document_requests.borrow().len(), 2);
    }

    #[test]
    fn test_resolve_route() {
        assert_eq!(resolve_route("", None), RouteAction::Nothing);
        assert_eq!(resolve_route("#", Some("x")), RouteAction::Nothing);
        assert_eq!(resolve_route("#%FF", None), RouteAction::Nothing);
        assert_eq!(
            resolve_route("#%zz", Some("w/README.md")),
            RouteAction::Nothing
        );
        assert_eq!(resolve_route("#a%2", None), RouteAction::Nothing);
        assert_eq!(
            resolve_route("#writeups%2Fa%2FREADME.md:intro", None),
            RouteAction::Open {
                path: "writeups/a/README.md".to_string(),
                heading: Some("intro".to_string()),
            }
        );
    }

    #[test]
    fn test_resolve_route_for_displayed_document() {
        let current = Some("writeups/a/README.md");
        // Setting the route to the displayed document does not reload it
        assert_eq!(
            resolve_route("#writeups%2Fa%2FREADME.md", current),
            RouteAction::Nothing
        );
        assert_eq!(
            resolve_route("#writeups%2Fa%2FREADME.md:intro", current),
            RouteAction::Scroll("intro".to_string())
        );
    }

    #[tokio::test]
    async fn test_footnote_link_stays_on_the_document() {
        let source = MockSource::default()
            .with_document("w/README.md", "See this[^1].\n\n[^1]: the note\n");
        let mut nav = DocumentNavigator::new();
        let ticket = nav.begin("w/README.md");
        let doc = load_document(&source, &ticket).await.unwrap();

        let start = doc.html.find("href=\"").unwrap() + "href=\"".len();
        let len = doc.html[start..].find('"').unwrap();
        let href = &doc.html[start..start + len];

        assert_eq!(
            resolve_route(href, nav.desired()),
            RouteAction::Scroll("fn-1".to_string())
        );
    }
}
