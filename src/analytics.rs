//! Read-side projection over the idea list used by the analytics page.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::{Idea, Label};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analytics {
    pub category_counts: BTreeMap<String, usize>,
    pub best_ideas_count: usize,
    pub worst_ideas_count: usize,
    pub shared_ideas_count: usize,
    pub total_ideas: usize,
    /// Keyed by `YYYY-MM` of the UTC creation time.
    pub ideas_per_month: BTreeMap<String, usize>,
}

impl Analytics {
    pub fn from_ideas(ideas: &[Idea]) -> Self {
        let mut analytics = Analytics {
            total_ideas: ideas.len(),
            ..Default::default()
        };

        for idea in ideas {
            if let Some(category) = idea.category.as_deref().filter(|c| !c.is_empty()) {
                *analytics
                    .category_counts
                    .entry(category.to_string())
                    .or_insert(0) += 1;
            }

            match idea.label {
                Some(Label::Best) => analytics.best_ideas_count += 1,
                Some(Label::Worst) => analytics.worst_ideas_count += 1,
                None => {}
            }

            if idea.shared {
                analytics.shared_ideas_count += 1;
            }

            let month = idea.created_at.format("%Y-%m").to_string();
            *analytics.ideas_per_month.entry(month).or_insert(0) += 1;
        }

        analytics
    }

    pub fn unlabeled_count(&self) -> usize {
        self.total_ideas
            .saturating_sub(self.best_ideas_count + self.worst_ideas_count)
    }

    /// Monthly histogram in chronological order with short display names,
    /// e.g. `("Mar 2024", 4)`.
    pub fn monthly_trend(&self) -> Vec<(String, usize)> {
        self.ideas_per_month
            .iter()
            .map(|(key, count)| {
                let label = NaiveDate::parse_from_str(&format!("{}-01", key), "%Y-%m-%d")
                    .map(|d| d.format("%b %Y").to_string())
                    .unwrap_or_else(|_| key.clone());
                (label, *count)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IdeaDraft;
    use chrono::{TimeZone, Utc};

    fn idea(title: &str, category: Option<&str>, y: i32, m: u32) -> Idea {
        Idea::new(
            IdeaDraft {
                title: title.to_string(),
                category: category.map(str::to_string),
                ..Default::default()
            },
            Utc.with_ymd_and_hms(y, m, 10, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn three_idea_fixture() {
        let mut a = idea("one", Some("A"), 2024, 1);
        a.label = Some(Label::Best);
        let mut b = idea("two", Some("B"), 2024, 1);
        b.label = Some(Label::Worst);
        let mut c = idea("three", None, 2024, 2);
        c.shared = true;

        let analytics = Analytics::from_ideas(&[a, b, c]);

        assert_eq!(analytics.best_ideas_count, 1);
        assert_eq!(analytics.worst_ideas_count, 1);
        assert_eq!(analytics.shared_ideas_count, 1);
        assert_eq!(analytics.total_ideas, 3);
        assert_eq!(analytics.unlabeled_count(), 1);
        assert_eq!(
            analytics.category_counts,
            BTreeMap::from([("A".to_string(), 1), ("B".to_string(), 1)])
        );
        assert_eq!(
            analytics.ideas_per_month,
            BTreeMap::from([("2024-01".to_string(), 2), ("2024-02".to_string(), 1)])
        );
    }

    #[test]
    fn monthly_trend_is_chronological() {
        let ideas = vec![
            idea("late", None, 2024, 11),
            idea("early", None, 2023, 12),
            idea("mid", None, 2024, 3),
        ];
        let trend = Analytics::from_ideas(&ideas).monthly_trend();
        let labels: Vec<&str> = trend.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Dec 2023", "Mar 2024", "Nov 2024"]);
    }

    #[test]
    fn empty_list() {
        let analytics = Analytics::from_ideas(&[]);
        assert_eq!(analytics, Analytics::default());
        assert!(analytics.monthly_trend().is_empty());
    }
}
