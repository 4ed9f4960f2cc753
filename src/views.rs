//! Read models for the pages: filtering, tab partitions, badge counts.

use ratatui::style::Color;

use crate::model::{Idea, Label};

/// Search box plus category dropdown on the ideas page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaQuery {
    pub search: String,
    pub category: Option<String>,
}

impl IdeaQuery {
    pub fn matches(&self, idea: &Idea) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || idea.title.to_lowercase().contains(&needle)
            || idea.description.to_lowercase().contains(&needle);

        let matches_category = match &self.category {
            None => true,
            Some(category) => idea.category.as_ref() == Some(category),
        };

        matches_search && matches_category
    }

    pub fn apply<'a>(&self, ideas: &'a [Idea]) -> Vec<&'a Idea> {
        ideas.iter().filter(|i| self.matches(i)).collect()
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.category.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelTab {
    #[default]
    All,
    Best,
    Worst,
    Shared,
    Unlabeled,
}

impl LabelTab {
    pub const ALL: [LabelTab; 5] = [
        LabelTab::All,
        LabelTab::Best,
        LabelTab::Worst,
        LabelTab::Shared,
        LabelTab::Unlabeled,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            LabelTab::All => "All",
            LabelTab::Best => "Best",
            LabelTab::Worst => "Worst",
            LabelTab::Shared => "Shared",
            LabelTab::Unlabeled => "Unlabeled",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            LabelTab::All => Color::Cyan,
            LabelTab::Best => Label::Best.color(),
            LabelTab::Worst => Label::Worst.color(),
            LabelTab::Shared => Color::Blue,
            LabelTab::Unlabeled => Color::Gray,
        }
    }

    pub fn matches(&self, idea: &Idea) -> bool {
        match self {
            LabelTab::All => true,
            LabelTab::Best => idea.label == Some(Label::Best),
            LabelTab::Worst => idea.label == Some(Label::Worst),
            LabelTab::Shared => idea.shared,
            LabelTab::Unlabeled => idea.label.is_none(),
        }
    }

    /// Narrows an already filtered list down to this tab.
    pub fn select<'a>(&self, ideas: &[&'a Idea]) -> Vec<&'a Idea> {
        ideas.iter().copied().filter(|i| self.matches(i)).collect()
    }

    pub fn next(self) -> LabelTab {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> LabelTab {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Badge count for every tab over the filtered list.
pub fn tab_counts(filtered: &[&Idea]) -> Vec<(LabelTab, usize)> {
    LabelTab::ALL
        .iter()
        .map(|tab| (*tab, filtered.iter().filter(|i| tab.matches(i)).count()))
        .collect()
}

/// Options for the category dropdown: the categories ideas actually use, in
/// first-seen order.
pub fn filter_categories(ideas: &[Idea]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for category in ideas.iter().filter_map(|i| i.category.as_ref()) {
        if !category.is_empty() && !seen.contains(category) {
            seen.push(category.clone());
        }
    }
    seen
}

/// Steps the dropdown: All -> first category -> ... -> last -> All.
pub fn cycle_category(current: Option<&str>, options: &[String]) -> Option<String> {
    match current {
        None => options.first().cloned(),
        Some(cur) => match options.iter().position(|c| c == cur) {
            Some(idx) => options.get(idx + 1).cloned(),
            None => options.first().cloned(),
        },
    }
}

pub fn idea_count_label(count: usize) -> String {
    format!("{} {}", count, if count == 1 { "idea" } else { "ideas" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IdeaDraft;
    use chrono::Utc;

    fn idea(title: &str, description: &str, category: Option<&str>) -> Idea {
        Idea::new(
            IdeaDraft {
                title: title.to_string(),
                description: description.to_string(),
                category: category.map(str::to_string),
                template_id: None,
            },
            Utc::now(),
        )
    }

    fn fixture() -> Vec<Idea> {
        let mut best = idea("Rooftop Garden", "grow tomatoes", Some("Health"));
        best.label = Some(Label::Best);
        let mut worst = idea("Ice hotel", "in the desert", Some("Business"));
        worst.label = Some(Label::Worst);
        let mut shared = idea("Podcast", "weekly GARDEN tips", None);
        shared.shared = true;
        vec![best, worst, shared]
    }

    #[test]
    fn search_is_case_insensitive_on_title_or_description() {
        let ideas = fixture();
        let query = IdeaQuery {
            search: "garden".to_string(),
            category: None,
        };
        let titles: Vec<&str> = query.apply(&ideas).iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Rooftop Garden", "Podcast"]);
    }

    #[test]
    fn category_is_exact_match() {
        let ideas = fixture();
        let query = IdeaQuery {
            search: String::new(),
            category: Some("Health".to_string()),
        };
        assert_eq!(query.apply(&ideas).len(), 1);

        let query = IdeaQuery {
            search: String::new(),
            category: Some("health".to_string()),
        };
        assert!(query.apply(&ideas).is_empty());
        assert!(query.is_active());
        assert!(!IdeaQuery::default().is_active());
    }

    #[test]
    fn tabs_partition_the_filtered_list() {
        let ideas = fixture();
        let filtered = IdeaQuery::default().apply(&ideas);

        let counts = tab_counts(&filtered);
        assert_eq!(
            counts,
            vec![
                (LabelTab::All, 3),
                (LabelTab::Best, 1),
                (LabelTab::Worst, 1),
                (LabelTab::Shared, 1),
                (LabelTab::Unlabeled, 1),
            ]
        );

        let narrowed = IdeaQuery {
            search: "garden".to_string(),
            category: None,
        }
        .apply(&ideas);
        let best = LabelTab::Best.select(&narrowed);
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].title, "Rooftop Garden");
    }

    #[test]
    fn tab_cycling_wraps() {
        assert_eq!(LabelTab::All.next(), LabelTab::Best);
        assert_eq!(LabelTab::Unlabeled.next(), LabelTab::All);
        assert_eq!(LabelTab::All.prev(), LabelTab::Unlabeled);
    }

    #[test]
    fn category_dropdown() {
        let ideas = fixture();
        let options = filter_categories(&ideas);
        assert_eq!(options, vec!["Health".to_string(), "Business".to_string()]);

        let first = cycle_category(None, &options);
        assert_eq!(first.as_deref(), Some("Health"));
        let second = cycle_category(first.as_deref(), &options);
        assert_eq!(second.as_deref(), Some("Business"));
        assert_eq!(cycle_category(second.as_deref(), &options), None);
        assert_eq!(cycle_category(Some("Gone"), &options).as_deref(), Some("Health"));
    }

    #[test]
    fn pluralized_counts() {
        assert_eq!(idea_count_label(1), "1 idea");
        assert_eq!(idea_count_label(0), "0 ideas");
    }
}
