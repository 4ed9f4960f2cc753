// ============================================================================
// DATA STRUCTURES - Ideas, comments, notifications, templates
// ============================================================================
//
// Field names serialize in camelCase so saved documents keep the same shape
// as the browser build's local storage (createdAt, lastUpdated, templateId...).

use chrono::{DateTime, Utc};
use ratatui::style::Color;
use uuid::Uuid;

pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Best,
    Worst,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Best => "best",
            Label::Worst => "worst",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Label::Best => "Best Idea",
            Label::Worst => "Worst Idea",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Label::Best => Color::Yellow,
            Label::Worst => Color::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub idea_id: Uuid,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub label: Option<Label>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub shared: bool,
    #[serde(default)]
    pub collaborators: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub template_id: Option<Uuid>,
}

impl Idea {
    pub fn new(draft: IdeaDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            label: None,
            created_at: now,
            last_updated: Some(now),
            shared: false,
            collaborators: Vec::new(),
            comments: Vec::new(),
            template_id: draft.template_id,
        }
    }

    /// Applies every field present in the patch. An inner `None` clears an
    /// optional field, an outer `None` leaves it alone.
    pub fn apply(&mut self, patch: IdeaPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(label) = patch.label {
            self.label = label;
        }
        self.last_updated = Some(now);
    }
}

/// Fields supplied by the user when creating an idea.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdeaDraft {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub template_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdeaPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Option<String>>,
    pub label: Option<Option<Label>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Share,
    Comment,
    Update,
}

impl NotificationKind {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Share => "share",
            NotificationKind::Comment => "comment",
            NotificationKind::Update => "update",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            NotificationKind::Share => Color::Blue,
            NotificationKind::Comment => Color::Green,
            NotificationKind::Update => Color::LightRed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: String, kind: NotificationKind, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
            kind,
            read: false,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateDraft {
    pub name: String,
    pub description: String,
    pub default_category: Option<String>,
}

/// Human readable age, e.g. "5 minutes ago".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);
    let (value, unit) = match secs {
        0..=44 => return "less than a minute ago".to_string(),
        45..=3_599 => ((secs + 30) / 60, "minute"),
        3_600..=86_399 => ((secs + 1_800) / 3_600, "hour"),
        86_400..=2_591_999 => ((secs + 43_200) / 86_400, "day"),
        2_592_000..=31_535_999 => ((secs + 1_296_000) / 2_592_000, "month"),
        _ => (secs / 31_536_000, "year"),
    };
    let value = value.max(1);
    if value == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", value, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn idea_json_uses_browser_field_names() {
        let mut idea = Idea::new(
            IdeaDraft {
                title: "Solar kettle".to_string(),
                ..Default::default()
            },
            at(2024, 3, 1),
        );
        idea.label = Some(Label::Best);

        let json = serde_json::to_value(&idea).unwrap();
        assert_eq!(json["label"], "best");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("lastUpdated").is_some());
        assert!(json.get("templateId").is_some());
    }

    #[test]
    fn idea_without_optional_fields_deserializes() {
        let raw = r#"{"id":"7f2c3c5e-6a43-4a52-9d6c-2f0e0d9f8a11","title":"Old idea","createdAt":"2023-05-04T10:00:00.000Z"}"#;
        let idea: Idea = serde_json::from_str(raw).unwrap();
        assert_eq!(idea.title, "Old idea");
        assert!(idea.comments.is_empty());
        assert!(idea.collaborators.is_empty());
        assert!(!idea.shared);
        assert_eq!(idea.label, None);
        assert_eq!(idea.last_updated, None);
    }

    #[test]
    fn notification_kind_serializes_as_type() {
        let n = Notification::new("hi".to_string(), NotificationKind::Share, at(2024, 1, 1));
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "share");
        assert_eq!(json["read"], false);
    }

    #[test]
    fn patch_clears_category_and_bumps_timestamp() {
        let created = at(2024, 1, 1);
        let mut idea = Idea::new(
            IdeaDraft {
                title: "t".to_string(),
                category: Some("Art".to_string()),
                ..Default::default()
            },
            created,
        );
        let later = created + Duration::hours(2);
        idea.apply(
            IdeaPatch {
                category: Some(None),
                ..Default::default()
            },
            later,
        );
        assert_eq!(idea.category, None);
        assert_eq!(idea.title, "t");
        assert_eq!(idea.last_updated, Some(later));
        assert_eq!(idea.created_at, created);
    }

    #[test]
    fn time_ago_buckets() {
        let now = at(2024, 6, 1);
        assert_eq!(time_ago(now, now), "less than a minute ago");
        assert_eq!(time_ago(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(time_ago(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(time_ago(now - Duration::days(3), now), "3 days ago");
    }
}
