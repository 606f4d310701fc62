//! Practice phrase built from a learning item.

use serde::Deserialize;

use crate::error::QuillError;

/// The parts of a learning item the practice games use.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LearningItem {
    pub word: String,
    pub explanation: Option<String>,
    pub association: Option<String>,
}

impl LearningItem {
    pub fn from_json(json: &str) -> Result<Self, QuillError> {
        serde_json::from_str(json).map_err(QuillError::Item)
    }

    /// `word - explanation - association`, skipping empty parts and an
    /// association that is only a link, with the first letter upper-cased.
    pub fn practice_phrase(&self) -> String {
        let association = self
            .association
            .as_deref()
            .filter(|a| !is_web_url(a));

        let joined = [Some(self.word.as_str()), self.explanation.as_deref(), association]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" - ");

        capitalize_first(&joined)
    }

    /// Parse an item and build its phrase. An item with nothing to write is
    /// rejected.
    pub fn phrase_from_json(json: &str) -> Result<String, QuillError> {
        let phrase = Self::from_json(json)?.practice_phrase();
        if phrase.is_empty() {
            return Err(QuillError::EmptyItem);
        }
        Ok(phrase)
    }
}

fn is_web_url(text: &str) -> bool {
    let text = text.trim();
    let rest = text
        .strip_prefix("https://")
        .or_else(|| text.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.contains(char::is_whitespace))
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_parts_and_capitalizes() {
        let item = LearningItem {
            word: "serendipity".into(),
            explanation: Some("finding something good without looking for it".into()),
            association: Some("lucky penny".into()),
        };
        assert_eq!(
            item.practice_phrase(),
            "Serendipity - finding something good without looking for it - lucky penny"
        );
    }

    #[test]
    fn url_association_is_skipped() {
        let item = LearningItem {
            word: "ubiquitous".into(),
            explanation: Some("found everywhere".into()),
            association: Some("https://example.com/img.png".into()),
        };
        assert_eq!(item.practice_phrase(), "Ubiquitous - found everywhere");
    }

    #[test]
    fn non_url_text_with_scheme_words_is_kept() {
        assert!(!is_web_url("http:// not a link"));
        assert!(!is_web_url("ftp://example.com"));
        assert!(is_web_url(" http://example.com "));
    }

    #[test]
    fn empty_parts_are_dropped() {
        let item = LearningItem {
            word: "cat".into(),
            explanation: Some("  ".into()),
            association: None,
        };
        assert_eq!(item.practice_phrase(), "Cat");
        assert_eq!(LearningItem::default().practice_phrase(), "");
    }

    #[test]
    fn parses_from_json() {
        let item = LearningItem::from_json(r#"{ "word": "present perfect" }"#).unwrap();
        assert_eq!(item.practice_phrase(), "Present perfect");
        assert!(matches!(LearningItem::from_json(r#"{ "word": 5 }"#), Err(QuillError::Item(_))));
        assert!(matches!(LearningItem::from_json("42"), Err(QuillError::Item(_))));
    }

    #[test]
    fn phrase_from_json_rejects_items_without_text() {
        assert_eq!(
            LearningItem::phrase_from_json(r#"{ "word": "cat", "explanation": "a pet" }"#).unwrap(),
            "Cat - a pet"
        );
        assert!(matches!(LearningItem::phrase_from_json("{}"), Err(QuillError::EmptyItem)));
        assert!(matches!(
            LearningItem::phrase_from_json(r#"{ "word": " ", "association": "https://example.com" }"#),
            Err(QuillError::EmptyItem)
        ));
        assert!(matches!(LearningItem::phrase_from_json("42"), Err(QuillError::Item(_))));
    }
}
