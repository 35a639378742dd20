//! 拼音注解 (phonetic annotations)
//!
//! Han characters are transliterated to toneless pinyin; every other
//! character passes through unchanged. Both forms are lowercased.

use std::collections::{HashMap, HashSet};

use pinyin::ToPinyin;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneticKey {
    /// Full transliteration, e.g. "开发环境" -> "kaifahuanjing"
    pub full: String,
    /// First letter of each reading, e.g. "开发环境" -> "kfhj"
    pub initials: String,
}

impl PhoneticKey {
    pub fn of(text: &str) -> Self {
        let mut full = String::with_capacity(text.len() * 2);
        let mut initials = String::with_capacity(text.len());

        for ch in text.chars() {
            match ch.to_pinyin() {
                Some(reading) => {
                    full.push_str(reading.plain());
                    initials.push_str(reading.first_letter());
                }
                None => {
                    full.push(ch);
                    initials.push(ch);
                }
            }
        }

        Self {
            full: full.to_lowercase(),
            initials: initials.to_lowercase(),
        }
    }
}

/// Memoizes annotations by source text so unchanged names are not
/// transliterated again when the catalog changes
#[derive(Debug, Default)]
pub struct PhoneticCache {
    entries: HashMap<String, PhoneticKey>,
}

impl PhoneticCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_for(&mut self, text: &str) -> PhoneticKey {
        if let Some(key) = self.entries.get(text) {
            return key.clone();
        }
        let key = PhoneticKey::of(text);
        self.entries.insert(text.to_string(), key.clone());
        key
    }

    /// Drop entries whose text is no longer present
    pub fn retain_texts<'a>(&mut self, live: impl IntoIterator<Item = &'a str>) {
        let live: HashSet<&str> = live.into_iter().collect();
        self.entries.retain(|text, _| live.contains(text.as_str()));
    }

    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains_key(text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_han_text() {
        let key = PhoneticKey::of("开发环境");
        assert_eq!(key.full, "kaifahuanjing");
        assert_eq!(key.initials, "kfhj");
    }

    #[test]
    fn test_mixed_text_keeps_latin_runs() {
        let key = PhoneticKey::of("API文档");
        assert_eq!(key.full, "apiwendang");
        assert_eq!(key.initials, "apiwd");
    }

    #[test]
    fn test_latin_text_is_lowercased() {
        let key = PhoneticKey::of("GraphQL Playground");
        assert_eq!(key.full, "graphql playground");
        assert_eq!(key.initials, "graphql playground");
    }

    #[test]
    fn test_cache_reuses_and_evicts() {
        let mut cache = PhoneticCache::new();
        let first = cache.key_for("监控平台");
        let second = cache.key_for("监控平台");
        cache.key_for("日志平台");

        assert_eq!(first, second);
        assert_eq!(cache.len(), 2);

        cache.retain_texts(["日志平台"]);
        assert!(!cache.contains("监控平台"));
        assert!(cache.contains("日志平台"));
    }
}
