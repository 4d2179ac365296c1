//! The filter engine: decides which cards are visible for a config and a moment in time.

use chrono::{DateTime, FixedOffset};

use crate::models::{EventCard, FilterConfig};
use crate::time::{day_difference, local_start_hour};

/// Why a card was hidden, in predicate order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideReason {
    Language,
    InvalidTimestamp,
    OutsideHours,
    Past,
    BeyondWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden(HideReason),
}

impl Visibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Shown)
    }
}

/// Counters shown next to the controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub total: usize,
    pub showing: usize,
}

impl FilterSummary {
    pub fn from_decisions(decisions: &[Visibility]) -> Self {
        Self {
            total: decisions.len(),
            showing: decisions.iter().filter(|v| v.is_visible()).count(),
        }
    }
}

/// Decide a single card. `now` carries both the current instant and the viewer's offset.
pub fn evaluate(card: &EventCard, config: &FilterConfig, now: &DateTime<FixedOffset>) -> Visibility {
    if !config.matches_all_languages() && card.language != config.language {
        return Visibility::Hidden(HideReason::Language);
    }

    let Some(start) = card.start.as_ref() else {
        return Visibility::Hidden(HideReason::InvalidTimestamp);
    };

    let hour = local_start_hour(start, now.offset());
    if hour < config.start_hour || hour > config.end_hour {
        return Visibility::Hidden(HideReason::OutsideHours);
    }

    let diff = day_difference(now, start);
    if diff < 0 {
        return Visibility::Hidden(HideReason::Past);
    }
    if diff > i64::from(config.days) {
        return Visibility::Hidden(HideReason::BeyondWindow);
    }

    Visibility::Shown
}

/// Decide every card, in page order.
pub fn compute_visibility(
    cards: &[EventCard],
    config: &FilterConfig,
    now: &DateTime<FixedOffset>,
) -> Vec<Visibility> {
    let decisions: Vec<Visibility> = cards
        .iter()
        .map(|card| {
            let decision = evaluate(card, config, now);
            tracing::trace!("{} {:?} -> {:?}", card.language, card.start, decision);
            decision
        })
        .collect();

    let summary = FilterSummary::from_decisions(&decisions);
    tracing::debug!(
        "filter days={} hours={}-{} language={} showing {}/{}",
        config.days,
        config.start_hour,
        config.end_hour,
        config.language,
        summary.showing,
        summary.total
    );

    decisions
}
