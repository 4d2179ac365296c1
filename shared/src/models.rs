use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::catalog::LanguageCatalog;
use crate::error::FilterError;
use crate::time::parse_timestamp;

/// Selector value that disables the language predicate.
pub const ALL_LANGUAGES: &str = "All";

/// One schedule entry as read from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    pub language: String,
    /// `None` when the timestamp was missing or did not parse.
    pub start: Option<DateTime<FixedOffset>>,
}

impl EventCard {
    pub fn new(language: impl Into<String>, start: Option<DateTime<FixedOffset>>) -> Self {
        Self {
            language: language.into(),
            start,
        }
    }

    /// Build a card from the raw `language` and `datetime` attribute values.
    pub fn from_attributes(language: Option<&str>, datetime: Option<&str>) -> Self {
        Self {
            language: language.unwrap_or_default().to_string(),
            start: datetime.and_then(parse_timestamp),
        }
    }
}

/// The page controls that make up a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Days,
    Start,
    End,
    Language,
}

impl Control {
    pub const ALL: [Control; 4] = [Control::Days, Control::Start, Control::End, Control::Language];

    /// Element id of the control on the page.
    pub fn id(&self) -> &'static str {
        match self {
            Control::Days => "days",
            Control::Start => "start",
            Control::End => "end",
            Control::Language => "language",
        }
    }
}

/// Filter state persisted across sessions.
///
/// Hours are viewer-local hour-of-day values. Nothing forces
/// `start_hour <= end_hour`; an inverted window simply matches no card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FilterConfig {
    #[validate(range(min = 0))]
    #[serde(deserialize_with = "lenient_i32")]
    pub days: i32,

    #[validate(range(min = 0, max = 23))]
    #[serde(rename = "start", deserialize_with = "lenient_i32")]
    pub start_hour: i32,

    #[validate(range(min = 0, max = 23))]
    #[serde(rename = "end", deserialize_with = "lenient_i32")]
    pub end_hour: i32,

    pub language: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            days: 14,
            start_hour: 7,
            end_hour: 22,
            language: ALL_LANGUAGES.to_string(),
        }
    }
}

impl FilterConfig {
    /// Decode and validate a persisted record.
    pub fn from_json(raw: &str) -> Result<Self, FilterError> {
        let config: FilterConfig = serde_json::from_str(raw)?;
        config.validated()
    }

    /// Check field ranges, handing the config back when they hold.
    pub fn validated(self) -> Result<Self, FilterError> {
        self.validate()?;
        Ok(self)
    }

    pub fn to_json(&self) -> Result<String, FilterError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn matches_all_languages(&self) -> bool {
        self.language == ALL_LANGUAGES
    }

    /// Text a control shows for this config.
    pub fn control_value(&self, control: Control) -> String {
        match control {
            Control::Days => self.days.to_string(),
            Control::Start => self.start_hour.to_string(),
            Control::End => self.end_hour.to_string(),
            Control::Language => self.language.clone(),
        }
    }

    /// Return a copy with one control replaced by its raw input text.
    pub fn with_control(&self, control: Control, raw: &str) -> Result<Self, FilterError> {
        let mut next = self.clone();
        match control {
            Control::Language => next.language = raw.to_string(),
            Control::Days => next.days = parse_control_number(control, raw)?,
            Control::Start => next.start_hour = parse_control_number(control, raw)?,
            Control::End => next.end_hour = parse_control_number(control, raw)?,
        }
        next.validate()?;
        Ok(next)
    }

    /// Drop a language the selector cannot offer back to `All`.
    pub fn reconciled(mut self, catalog: &LanguageCatalog) -> Self {
        if !self.matches_all_languages() && !catalog.contains(&self.language) {
            tracing::info!(
                "Restored language {:?} has no events, showing all languages",
                self.language
            );
            self.language = ALL_LANGUAGES.to_string();
        }
        self
    }
}

fn parse_control_number(control: Control, raw: &str) -> Result<i32, FilterError> {
    raw.trim().parse().map_err(|_| FilterError::InvalidNumber {
        control,
        raw: raw.to_string(),
    })
}

/// Accept both `14` and `"14"`: older records stored the raw input text.
fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Number(i32),
        Text(String),
    }

    match Lenient::deserialize(deserializer)? {
        Lenient::Number(n) => Ok(n),
        Lenient::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FilterConfig::default();
        assert_eq!(config.days, 14);
        assert_eq!(config.start_hour, 7);
        assert_eq!(config.end_hour, 22);
        assert_eq!(config.language, "All");
        assert!(config.matches_all_languages());
    }

    #[test]
    fn test_json_uses_short_field_names() {
        let json = FilterConfig::default().to_json().unwrap();
        assert_eq!(json, r#"{"days":14,"start":7,"end":22,"language":"All"}"#);
    }

    #[test]
    fn test_write_then_reload_is_identical() {
        let config = FilterConfig {
            days: 3,
            start_hour: 9,
            end_hour: 18,
            language: "Rust".to_string(),
        };
        let restored = FilterConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_legacy_string_numbers() {
        let restored =
            FilterConfig::from_json(r#"{"days":"30","start":8,"end":"20","language":"Python"}"#)
                .unwrap();
        assert_eq!(restored.days, 30);
        assert_eq!(restored.start_hour, 8);
        assert_eq!(restored.end_hour, 20);
        assert_eq!(restored.language, "Python");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let restored = FilterConfig::from_json(r#"{"days":5}"#).unwrap();
        assert_eq!(restored.days, 5);
        assert_eq!(restored.start_hour, 7);
        assert_eq!(restored.end_hour, 22);
        assert_eq!(restored.language, ALL_LANGUAGES);
    }

    #[test]
    fn test_malformed_record_is_rejected() {
        assert!(matches!(
            FilterConfig::from_json("not json"),
            Err(FilterError::Decode(_))
        ));
        assert!(matches!(
            FilterConfig::from_json(r#"{"days":"soon"}"#),
            Err(FilterError::Decode(_))
        ));
        assert!(matches!(
            FilterConfig::from_json(r#"{"start":31}"#),
            Err(FilterError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_inverted_window_is_valid() {
        let config = FilterConfig::from_json(r#"{"start":20,"end":6}"#).unwrap();
        assert_eq!(config.start_hour, 20);
        assert_eq!(config.end_hour, 6);
    }

    #[test]
    fn test_with_control() {
        let config = FilterConfig::default();

        let next = config.with_control(Control::Days, " 3 ").unwrap();
        assert_eq!(next.days, 3);

        let next = next.with_control(Control::Language, "Rust").unwrap();
        assert_eq!(next.language, "Rust");
        assert_eq!(next.days, 3);

        assert!(matches!(
            config.with_control(Control::Start, ""),
            Err(FilterError::InvalidNumber { control: Control::Start, .. })
        ));
        assert!(matches!(
            config.with_control(Control::End, "24"),
            Err(FilterError::InvalidConfig(_))
        ));
        assert!(matches!(
            config.with_control(Control::Days, "-1"),
            Err(FilterError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_control_value_round_trips_through_with_control() {
        let config = FilterConfig {
            days: 30,
            start_hour: 8,
            end_hour: 19,
            language: "Hebrew".to_string(),
        };
        let values: Vec<_> = Control::ALL.iter().map(|&c| config.control_value(c)).collect();
        assert_eq!(values, vec!["30", "8", "19", "Hebrew"]);

        let mut rebuilt = FilterConfig::default();
        for control in Control::ALL {
            rebuilt = rebuilt
                .with_control(control, &config.control_value(control))
                .unwrap();
        }
        assert_eq!(rebuilt, config);
    }

    #[test]
    fn test_reconciled_resets_unknown_language() {
        let catalog = LanguageCatalog::from_languages(["Rust", "Python"]);

        let known = FilterConfig {
            language: "Python".to_string(),
            ..FilterConfig::default()
        };
        assert_eq!(known.clone().reconciled(&catalog), known);

        let unknown = FilterConfig {
            language: "Perl".to_string(),
            ..FilterConfig::default()
        };
        assert_eq!(unknown.reconciled(&catalog).language, ALL_LANGUAGES);
    }

    #[test]
    fn test_card_from_attributes() {
        let card = EventCard::from_attributes(Some("Rust"), Some("2021-04-13T19:00:00+03:00"));
        assert_eq!(card.language, "Rust");
        assert!(card.start.is_some());

        let card = EventCard::from_attributes(None, Some("someday"));
        assert_eq!(card.language, "");
        assert!(card.start.is_none());
    }

    #[test]
    fn test_control_ids() {
        let ids: Vec<_> = Control::ALL.iter().map(Control::id).collect();
        assert_eq!(ids, vec!["days", "start", "end", "language"]);
    }
}
