use crate::error::DictationError;
use crate::scoring::word_count;
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

static TEXTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/catalog/texts");

/// File name of the catalog bundled with the binary.
pub const BUILTIN_FILE: &str = "grade2_q1.json";

/// A text to be dictated and transcribed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceText {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub body: String,
}

impl ReferenceText {
    pub fn word_count(&self) -> usize {
        word_count(&self.body)
    }
}

/// An ordered, validated set of reference texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    texts: Vec<ReferenceText>,
}

impl Catalog {
    pub fn builtin() -> Result<Self, DictationError> {
        let file = TEXTS_DIR.get_file(BUILTIN_FILE).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("bundled catalog {BUILTIN_FILE} is missing"),
            )
        })?;

        let contents = file.contents_utf8().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("bundled catalog {BUILTIN_FILE} is not valid utf-8"),
            )
        })?;

        Self::from_json(contents)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DictationError> {
        let path = path.as_ref();
        log::info!("loading catalog from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, DictationError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        log::debug!(
            "catalog '{}' loaded with {} texts",
            catalog.title,
            catalog.texts.len()
        );
        Ok(catalog)
    }

    /// Reject catalogs that could never be scored.
    fn validate(&self) -> Result<(), DictationError> {
        if self.texts.is_empty() {
            return Err(DictationError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for text in &self.texts {
            if !seen.insert(text.id) {
                return Err(DictationError::DuplicateTextId { id: text.id });
            }
            if text.word_count() == 0 {
                log::error!("reference text {} ('{}') has no words", text.id, text.title);
                return Err(DictationError::DegenerateReferenceText);
            }
        }

        Ok(())
    }

    pub fn texts(&self) -> &[ReferenceText] {
        &self.texts
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&ReferenceText> {
        self.texts.iter().find(|t| t.id == id)
    }

    pub fn require(&self, id: u32) -> Result<&ReferenceText, DictationError> {
        self.get(id).ok_or(DictationError::UnknownText { id })
    }

    pub fn position_of(&self, id: u32) -> Option<usize> {
        self.texts.iter().position(|t| t.id == id)
    }

    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&ReferenceText> {
        self.texts.choose(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn catalog_json(texts: &str) -> String {
        format!(r#"{{ "title": "test", "texts": [{texts}] }}"#)
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();

        assert_eq!(catalog.title, "Диктанты 2 класс");
        assert_eq!(catalog.subtitle, "1 четверть • Русский язык");
        assert_eq!(catalog.len(), 4);

        let ids: Vec<u32> = catalog.texts().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_builtin_word_counts() {
        let catalog = Catalog::builtin().unwrap();
        let counts: Vec<usize> = catalog.texts().iter().map(|t| t.word_count()).collect();
        assert_eq!(counts, vec![17, 19, 18, 18]);
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::builtin().unwrap();

        assert_eq!(catalog.get(2).unwrap().title, "Диктант №2 - В лесу");
        assert!(catalog.get(99).is_none());
        assert_matches!(catalog.require(99), Err(DictationError::UnknownText { id: 99 }));
        assert_eq!(catalog.position_of(3), Some(2));
    }

    #[test]
    fn test_subtitle_is_optional() {
        let json = catalog_json(r#"{ "id": 1, "title": "t", "description": "d", "body": "раз два" }"#);
        let catalog = Catalog::from_json(&json).unwrap();
        assert_eq!(catalog.subtitle, "");
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert_matches!(
            Catalog::from_json(&catalog_json("")),
            Err(DictationError::EmptyCatalog)
        );
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = catalog_json(
            r#"{ "id": 5, "title": "a", "description": "", "body": "раз" },
               { "id": 5, "title": "b", "description": "", "body": "два" }"#,
        );
        assert_matches!(
            Catalog::from_json(&json),
            Err(DictationError::DuplicateTextId { id: 5 })
        );
    }

    #[test]
    fn test_rejects_wordless_body() {
        let json = catalog_json(r#"{ "id": 1, "title": "a", "description": "", "body": "  " }"#);
        assert_matches!(
            Catalog::from_json(&json),
            Err(DictationError::DegenerateReferenceText)
        );
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert_matches!(Catalog::from_json("{ nope"), Err(DictationError::Json(_)));
    }

    #[test]
    fn test_from_path_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let builtin = Catalog::builtin().unwrap();
        fs::write(&path, serde_json::to_vec_pretty(&builtin).unwrap()).unwrap();

        assert_eq!(Catalog::from_path(&path).unwrap(), builtin);
    }

    #[test]
    fn test_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        assert_matches!(
            Catalog::from_path(dir.path().join("absent.json")),
            Err(DictationError::Io(_))
        );
    }

    #[test]
    fn test_random_pick_comes_from_catalog() {
        let catalog = Catalog::builtin().unwrap();
        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            let text = catalog.random(&mut rng).unwrap();
            assert!(catalog.get(text.id).is_some());
        }
    }
}
