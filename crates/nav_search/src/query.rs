use crate::phonetic::PhoneticKey;

/// A parsed search query: the trimmed lowercase term plus its
/// whitespace-delimited tokens (never deduplicated)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
    tokens: Vec<String>,
}

impl SearchQuery {
    pub fn parse(raw: &str) -> Self {
        let term = raw.trim().to_lowercase();
        let tokens = term.split_whitespace().map(str::to_string).collect();
        Self { term, tokens }
    }

    /// Empty or whitespace-only input
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Every token is a substring of the lowercased text
    pub fn matches_tokens(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.tokens.iter().all(|token| text.contains(token.as_str()))
    }

    /// Raw text, transliteration, or initials match
    pub fn matches_text(&self, text: &str, phonetic: &PhoneticKey) -> bool {
        self.matches_tokens(text)
            || self.matches_tokens(&phonetic.full)
            || phonetic.initials.contains(self.term.as_str())
    }

    pub fn matches_url(&self, url: &str) -> bool {
        url.to_lowercase().contains(self.term.as_str())
    }
}
