//! Link and image reference table for one render call.

use std::collections::HashMap;
use std::path::Path;

use crate::grammar::tree::{Definition, Destination};

/// Reference ids mapped to their destinations.
///
/// Ids are case-insensitive and whitespace-normalised; see
/// [`References::normalize_id`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    entries: HashMap<String, Destination>,
}

impl References {
    /// Lower-case `id` and collapse every whitespace run to one space.
    pub fn normalize_id(id: &str) -> String {
        id.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Build the table from parsed definitions. Later definitions of an id
    /// replace earlier ones.
    ///
    /// With a `document_path`, urls starting with `.` or `/` are resolved
    /// against the document's directory.
    pub fn from_definitions(definitions: &[Definition], document_path: Option<&Path>) -> Self {
        let base = document_path.and_then(Path::parent);
        let mut refs = Self::default();
        for def in definitions {
            let url = match base {
                Some(dir) => resolve(dir, &def.url),
                None => def.url.clone(),
            };
            refs.insert(
                &def.id,
                Destination {
                    url,
                    title: def.title.clone(),
                },
            );
        }
        refs
    }

    pub fn insert(&mut self, id: &str, destination: Destination) {
        self.entries.insert(Self::normalize_id(id), destination);
    }

    pub fn get(&self, id: &str) -> Option<&Destination> {
        self.entries.get(&Self::normalize_id(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Join a document-relative url onto `dir`.
fn resolve(dir: &Path, url: &str) -> String {
    if !(url.starts_with('.') || url.starts_with('/')) {
        return url.to_string();
    }
    let relative = url
        .strip_prefix("./")
        .or_else(|| url.strip_prefix('/'))
        .unwrap_or(url);
    dir.join(relative).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Span;
    use pretty_assertions::assert_eq;

    fn def(id: &str, url: &str) -> Definition {
        Definition {
            id: id.to_string(),
            url: url.to_string(),
            title: None,
            label_span: Span::default(),
            url_span: Span::default(),
            title_span: None,
        }
    }

    #[test]
    fn ids_are_case_and_space_insensitive() {
        let refs = References::from_definitions(&[def("Foo  Bar", "/x")], None);
        assert_eq!(refs.get("foo bar").map(|d| d.url.as_str()), Some("/x"));
        assert_eq!(refs.get("FOO\n bar").map(|d| d.url.as_str()), Some("/x"));
        assert!(refs.get("foobar").is_none());
    }

    #[test]
    fn document_path_resolves_relative_urls() {
        let refs = References::from_definitions(
            &[def("a", "./img.png"), def("b", "http://x.org"), def("c", "/abs.png")],
            Some(Path::new("/docs/guide/readme.md")),
        );
        let url = |id: &str| refs.get(id).map(|d| d.url.clone());
        assert_eq!(
            url("a"),
            Some(Path::new("/docs/guide").join("img.png").to_string_lossy().into_owned())
        );
        assert_eq!(url("b"), Some("http://x.org".to_string()));
        assert_eq!(
            url("c"),
            Some(Path::new("/docs/guide").join("abs.png").to_string_lossy().into_owned())
        );
    }

    #[test]
    fn later_definition_wins() {
        let refs = References::from_definitions(&[def("a", "/1"), def("A", "/2")], None);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs.get("a").map(|d| d.url.as_str()), Some("/2"));
    }
}
