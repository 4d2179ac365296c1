use crate::models::{EventCard, ALL_LANGUAGES};

/// Distinct event languages in first-seen order, with per-language card counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageCatalog {
    entries: Vec<(String, usize)>,
}

impl LanguageCatalog {
    pub fn from_cards<'a>(cards: impl IntoIterator<Item = &'a EventCard>) -> Self {
        Self::from_languages(cards.into_iter().map(|card| card.language.as_str()))
    }

    pub fn from_languages<S: AsRef<str>>(languages: impl IntoIterator<Item = S>) -> Self {
        let mut catalog = Self::default();
        for language in languages {
            catalog.record(language.as_ref());
        }
        catalog
    }

    fn record(&mut self, language: &str) {
        match self.entries.iter_mut().find(|(name, _)| name == language) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((language.to_string(), 1)),
        }
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn count(&self, language: &str) -> usize {
        self.entries
            .iter()
            .find(|(name, _)| name == language)
            .map_or(0, |(_, count)| *count)
    }

    pub fn contains(&self, language: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == language)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selector options: `All` followed by each language.
    pub fn options(&self) -> Vec<String> {
        std::iter::once(ALL_LANGUAGES)
            .chain(self.languages())
            .map(str::to_string)
            .collect()
    }
}
