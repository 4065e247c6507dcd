//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::catalog::{Catalog, Topic};
use crate::feedback::{FeedbackRecord, FeedbackSubmitter, PromptConfig, SubmitOutcome};

/// A topic with only `id`, `order` and `category` set meaningfully.
pub fn topic(id: &str, order: i64, category: Option<&str>) -> Topic {
    Topic {
        id: id.to_string(),
        title: format!("Topic {id}"),
        subtitle: String::new(),
        description: String::new(),
        icon: String::new(),
        route: format!("/{id}"),
        order,
        category: category.map(str::to_string),
    }
}

/// A topic with explicit searchable text.
pub fn described(id: &str, title: &str, subtitle: &str, description: &str) -> Topic {
    Topic {
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        description: description.to_string(),
        ..topic(id, 0, None)
    }
}

/// Quran, Hadith and one uncategorized (Fiqh) topic.
pub fn sample_catalog() -> Catalog {
    let mut tajweed = described("tajweed", "Tajweed Rules", "تجوید", "Correct recitation");
    tajweed.order = 2;
    tajweed.category = Some("Quran".to_string());

    let mut basics = described("basics", "Quran Basics", "", "Arabic letters and reading");
    basics.order = 1;
    basics.category = Some("Quran".to_string());

    let mut hadith = described("hadith", "Hadith", "Sayings", "Selected ahadith");
    hadith.order = 3;
    hadith.category = Some("Hadith".to_string());

    let mut fiqh = described("fiqh", "Fiqh of Salah", "", "Rulings on prayer");
    fiqh.order = 4;
    fiqh.category = Some("Fiqh".to_string());

    Catalog::new("Directory", "Sub", "Desc", vec![tajweed, basics, hadith, fiqh])
        .expect("sample catalog ids are unique")
}

/// Short timers so flow tests finish quickly.
pub fn fast_prompt_config() -> PromptConfig {
    PromptConfig {
        auto_show: true,
        auto_show_delay: Duration::ZERO,
        auto_dismiss_after: Duration::from_millis(10),
        success_display: Duration::from_millis(10),
    }
}

/// A submitter that returns a fixed outcome and counts calls.
pub struct ScriptedSubmitter {
    outcome: SubmitOutcome,
    calls: AtomicUsize,
}

impl ScriptedSubmitter {
    pub fn new(outcome: SubmitOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn sent() -> Self {
        Self::new(SubmitOutcome::SentUnconfirmed {
            submitted_at: Utc::now(),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedbackSubmitter for ScriptedSubmitter {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn submit(&self, _record: &FeedbackRecord) -> SubmitOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
