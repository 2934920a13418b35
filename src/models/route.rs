//! Hash-based routing for document deep links.
//!
//! URL format: `#<percent-encoded document path>[:<heading id>]`
//! (e.g. `#writeups%2Fpwn%2Fheap%2FREADME.md:exploit`).

use crate::core::error::RouteDecodeError;

/// A document location addressed by the URL fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocRoute {
    /// Document path relative to the repository root
    pub path: String,
    /// Heading to scroll to once the document is rendered
    pub heading: Option<String>,
}

impl DocRoute {
    pub fn document(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            heading: None,
        }
    }

    pub fn with_heading(path: impl Into<String>, heading: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            heading: Some(heading.into()),
        }
    }

    /// Parse a URL fragment (with or without the leading `#`).
    ///
    /// Returns `Ok(None)` when the fragment addresses no document.
    pub fn from_hash(hash: &str) -> Result<Option<Self>, RouteDecodeError> {
        let raw = hash.strip_prefix('#').unwrap_or(hash);
        if raw.is_empty() {
            return Ok(None);
        }

        let mut parts = raw.split(':');
        let file_part = parts.next().unwrap_or_default();
        let heading = parts.next().filter(|h| !h.is_empty()).map(String::from);

        if !escapes_are_well_formed(file_part) {
            return Err(RouteDecodeError::InvalidEncoding);
        }
        let path = urlencoding::decode(file_part).map_err(|_| RouteDecodeError::InvalidEncoding)?;
        if path.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            path: path.into_owned(),
            heading,
        }))
    }

    /// Convert to a URL fragment, including the leading `#`.
    pub fn to_hash(&self) -> String {
        let encoded = urlencoding::encode(&self.path);
        match &self.heading {
            Some(id) => format!("#{}:{}", encoded, id),
            None => format!("#{}", encoded),
        }
    }
}

/// Every `%` must start a two-digit hex escape.
fn escapes_are_well_formed(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parsing() {
        assert_eq!(DocRoute::from_hash(""), Ok(None));
        assert_eq!(DocRoute::from_hash("#"), Ok(None));
        assert_eq!(
            DocRoute::from_hash("#writeups%2Fa%2FREADME.md"),
            Ok(Some(DocRoute::document("writeups/a/README.md")))
        );
        assert_eq!(
            DocRoute::from_hash("#writeups%2Fa%2FREADME.md:intro"),
            Ok(Some(DocRoute::with_heading("writeups/a/README.md", "intro")))
        );
        // Unencoded slashes are accepted too
        assert_eq!(
            DocRoute::from_hash("writeups/b/README.md"),
            Ok(Some(DocRoute::document("writeups/b/README.md")))
        );
    }

    #[test]
    fn test_route_empty_heading_is_ignored() {
        assert_eq!(
            DocRoute::from_hash("#a%2FREADME.md:"),
            Ok(Some(DocRoute::document("a/README.md")))
        );
    }

    #[test]
    fn test_route_without_path() {
        assert_eq!(DocRoute::from_hash("#:intro"), Ok(None));
    }

    #[test]
    fn test_route_invalid_encoding() {
        assert_eq!(
            DocRoute::from_hash("#%FF%FE"),
            Err(RouteDecodeError::InvalidEncoding)
        );
    }

    #[test]
    fn test_route_malformed_escapes() {
        for hash in ["#%zz", "#a%2", "#a%", "#%zz:intro"] {
            assert_eq!(
                DocRoute::from_hash(hash),
                Err(RouteDecodeError::InvalidEncoding),
                "{}",
                hash
            );
        }
        // A literal percent sign arrives encoded
        assert_eq!(
            DocRoute::from_hash("#w%2F100%25%2FREADME.md"),
            Ok(Some(DocRoute::document("w/100%/README.md")))
        );
    }

    #[test]
    fn test_route_to_hash() {
        assert_eq!(
            DocRoute::document("writeups/a/README.md").to_hash(),
            "#writeups%2Fa%2FREADME.md"
        );
        assert_eq!(
            DocRoute::with_heading("writeups/My CTF/README.md", "setup").to_hash(),
            "#writeups%2FMy%20CTF%2FREADME.md:setup"
        );
    }

    #[test]
    fn test_route_survives_hash_encoding() {
        let route = DocRoute::with_heading("writeups/web: part 2/README.md", "xss");
        assert_eq!(DocRoute::from_hash(&route.to_hash()), Ok(Some(route)));
    }
}
