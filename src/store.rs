// ============================================================================
// STATE STORE - single owner of ideas, notifications, templates, categories
// ============================================================================
//
// Every mutation builds the new collection, writes it, and only then swaps it
// in, so memory never runs ahead of storage. Then it queues a feedback
// message for the UI. Reads never touch storage after load.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::analytics::Analytics;
use crate::clock::{Clock, SystemClock};
use crate::errors::StoreError;
use crate::model::{
    ANONYMOUS_AUTHOR, Comment, Idea, IdeaDraft, IdeaPatch, Label, Notification, NotificationKind,
    Template, TemplateDraft,
};
use crate::storage::{CATEGORIES_KEY, IDEAS_KEY, NOTIFICATIONS_KEY, Storage, TEMPLATES_KEY};
use crate::validate;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackLevel {
    Success,
    Info,
    Error,
}

/// Transient message for the user, shown as a popup by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub message: String,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FeedbackLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FeedbackLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FeedbackLevel::Error,
            message: message.into(),
        }
    }
}

pub struct IdeaStore<S: Storage, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    ideas: Vec<Idea>,
    notifications: Vec<Notification>,
    templates: Vec<Template>,
    categories: Vec<String>,
    feedback: Vec<Feedback>,
}

/// Reads one saved collection. `None` means the key was never written; a
/// document that fails to read or parse is logged and treated as empty.
fn load_collection<S: Storage, T: DeserializeOwned>(storage: &S, key: &str) -> Option<Vec<T>> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(key, "Failed to read saved {}: {:#}", key, err);
            return Some(Vec::new());
        }
    };

    match serde_json::from_str(&raw) {
        Ok(items) => Some(items),
        Err(err) => {
            tracing::warn!(key, "Failed to parse saved {}: {}", key, err);
            Some(Vec::new())
        }
    }
}

fn write_collection<S: Storage, T: Serialize>(
    storage: &mut S,
    key: &str,
    items: &[T],
) -> StoreResult<()> {
    let json = serde_json::to_string(items)?;
    storage.set_item(key, &json)?;
    Ok(())
}

/// Puts back a document that was already replaced; failures are only logged.
fn restore_collection<S: Storage, T: Serialize>(storage: &mut S, key: &str, items: &[T]) {
    if let Err(err) = write_collection(storage, key, items) {
        tracing::error!(key, "Failed to restore saved {}: {}", key, err);
    }
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn idea_not_found(id: Uuid) -> StoreError {
    tracing::debug!(%id, "idea lookup missed");
    StoreError::NotFound("Idea not found".to_string())
}

impl<S: Storage> IdeaStore<S, SystemClock> {
    pub fn load(storage: S) -> Self {
        Self::load_with_clock(storage, SystemClock)
    }
}

impl<S: Storage, C: Clock> IdeaStore<S, C> {
    /// Rehydrates every collection from storage.
    pub fn load_with_clock(storage: S, clock: C) -> Self {
        let ideas: Vec<Idea> = load_collection(&storage, IDEAS_KEY).unwrap_or_default();
        let notifications: Vec<Notification> =
            load_collection(&storage, NOTIFICATIONS_KEY).unwrap_or_default();
        let templates: Vec<Template> = load_collection(&storage, TEMPLATES_KEY).unwrap_or_default();

        // First run: seed the category list from whatever the ideas use
        let categories = load_collection(&storage, CATEGORIES_KEY).unwrap_or_else(|| {
            let mut seeded: Vec<String> = Vec::new();
            for category in ideas.iter().filter_map(|i| i.category.as_ref()) {
                if !category.is_empty() && !seeded.contains(category) {
                    seeded.push(category.clone());
                }
            }
            seeded
        });

        tracing::info!(
            ideas = ideas.len(),
            notifications = notifications.len(),
            templates = templates.len(),
            categories = categories.len(),
            "store loaded"
        );

        Self {
            storage,
            clock,
            ideas,
            notifications,
            templates,
            categories,
            feedback: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn idea(&self, id: Uuid) -> Option<&Idea> {
        self.ideas.iter().find(|i| i.id == id)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[cfg(test)]
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn analytics(&self) -> Analytics {
        Analytics::from_ideas(&self.ideas)
    }

    /// Drains queued feedback, oldest first.
    pub fn take_feedback(&mut self) -> Vec<Feedback> {
        std::mem::take(&mut self.feedback)
    }

    // ------------------------------------------------------------------
    // Ideas
    // ------------------------------------------------------------------

    pub fn add_idea(&mut self, draft: IdeaDraft) -> StoreResult<Uuid> {
        let title = validate::required(&draft.title, "Title").map_err(StoreError::Validation)?;
        let draft = IdeaDraft {
            title,
            description: draft.description.trim().to_string(),
            category: clean_optional(draft.category),
            template_id: draft.template_id,
        };

        let idea = Idea::new(draft, self.clock.now());
        let id = idea.id;
        let message = format!("New idea created: {}", idea.title);
        let mut ideas = self.ideas.clone();
        ideas.push(idea);
        self.commit_ideas(ideas)?;

        tracing::debug!(%id, "idea added");
        self.feedback.push(Feedback::success("Idea added successfully!"));
        self.notify(message, NotificationKind::Update);
        Ok(id)
    }

    pub fn update_idea(&mut self, id: Uuid, mut patch: IdeaPatch) -> StoreResult<()> {
        let idx = self.idea_index(id)?;
        if let Some(title) = patch.title.take() {
            patch.title =
                Some(validate::required(&title, "Title").map_err(StoreError::Validation)?);
        }
        if let Some(description) = patch.description.take() {
            patch.description = Some(description.trim().to_string());
        }
        if let Some(category) = patch.category.take() {
            patch.category = Some(clean_optional(category));
        }

        let now = self.clock.now();
        let mut ideas = self.ideas.clone();
        let old_title = ideas[idx].title.clone();
        ideas[idx].apply(patch, now);
        self.commit_ideas(ideas)?;

        self.feedback.push(Feedback::success("Idea updated successfully!"));
        self.notify(
            format!("Idea \"{}\" was updated", old_title),
            NotificationKind::Update,
        );
        Ok(())
    }

    pub fn delete_idea(&mut self, id: Uuid) -> StoreResult<Idea> {
        let idx = self.idea_index(id)?;
        let mut ideas = self.ideas.clone();
        let removed = ideas.remove(idx);
        self.commit_ideas(ideas)?;

        self.feedback.push(Feedback::success("Idea deleted successfully!"));
        self.notify(
            format!("Idea \"{}\" was deleted", removed.title),
            NotificationKind::Update,
        );
        Ok(removed)
    }

    /// Sets `label`, or clears it when the idea already carries it.
    pub fn set_label(&mut self, id: Uuid, label: Label) -> StoreResult<Option<Label>> {
        let idx = self.idea_index(id)?;
        let mut ideas = self.ideas.clone();
        let idea = &mut ideas[idx];
        idea.label = if idea.label == Some(label) {
            None
        } else {
            Some(label)
        };
        let result = idea.label;
        self.commit_ideas(ideas)?;

        self.feedback.push(match result {
            Some(l) => Feedback::success(format!("Idea marked as {}!", l.as_str())),
            None => Feedback::info("Label removed from idea"),
        });
        Ok(result)
    }

    /// Records a collaborator. Repeated emails are kept as given.
    pub fn share_idea(&mut self, id: Uuid, email: &str) -> StoreResult<()> {
        let email = validate::email(email).map_err(StoreError::Validation)?;
        let idx = self.idea_index(id)?;

        let mut ideas = self.ideas.clone();
        let idea = &mut ideas[idx];
        idea.shared = true;
        idea.collaborators.push(email.clone());
        let title = idea.title.clone();
        self.commit_ideas(ideas)?;

        self.feedback
            .push(Feedback::success(format!("Idea shared with {}!", email)));
        self.notify(
            format!("You shared \"{}\" with {}", title, email),
            NotificationKind::Share,
        );
        Ok(())
    }

    pub fn add_comment(&mut self, idea_id: Uuid, author: &str, content: &str) -> StoreResult<Uuid> {
        let content = validate::required(content, "Comment").map_err(StoreError::Validation)?;
        let idx = self.idea_index(idea_id)?;
        let author = match author.trim() {
            "" => ANONYMOUS_AUTHOR.to_string(),
            name => name.to_string(),
        };

        let comment = Comment {
            id: Uuid::new_v4(),
            idea_id,
            author,
            content,
            created_at: self.clock.now(),
        };
        let comment_id = comment.id;
        let mut ideas = self.ideas.clone();
        ideas[idx].comments.push(comment);
        let title = ideas[idx].title.clone();
        self.commit_ideas(ideas)?;

        self.feedback.push(Feedback::success("Comment added!"));
        self.notify(
            format!("New comment on \"{}\"", title),
            NotificationKind::Comment,
        );
        Ok(comment_id)
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    /// Side effect of a change that is already saved, so a failed write is
    /// logged and dropped rather than reported.
    fn notify(&mut self, message: String, kind: NotificationKind) {
        let mut notifications = self.notifications.clone();
        notifications.insert(0, Notification::new(message, kind, self.clock.now()));
        if let Err(err) = self.commit_notifications(notifications) {
            tracing::warn!(code = err.code(), "Notification dropped: {}", err.message());
        }
    }

    pub fn mark_notification_as_read(&mut self, id: Uuid) -> StoreResult<()> {
        let mut notifications = self.notifications.clone();
        let notification = notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| StoreError::NotFound("Notification not found".to_string()))?;
        notification.read = true;
        self.commit_notifications(notifications)
    }

    pub fn mark_all_notifications_as_read(&mut self) -> StoreResult<()> {
        let mut notifications = self.notifications.clone();
        for notification in &mut notifications {
            notification.read = true;
        }
        self.commit_notifications(notifications)
    }

    pub fn clear_notifications(&mut self) -> StoreResult<()> {
        self.commit_notifications(Vec::new())
    }

    // ------------------------------------------------------------------
    // Templates
    // ------------------------------------------------------------------

    pub fn add_template(&mut self, draft: TemplateDraft) -> StoreResult<Uuid> {
        let name = validate::required(&draft.name, "Template name").map_err(StoreError::Validation)?;
        let template = Template {
            id: Uuid::new_v4(),
            name,
            description: draft.description.trim().to_string(),
            default_category: clean_optional(draft.default_category),
        };
        let id = template.id;
        let mut templates = self.templates.clone();
        templates.push(template);
        self.commit_templates(templates)?;

        self.feedback
            .push(Feedback::success("Template added successfully!"));
        Ok(id)
    }

    pub fn delete_template(&mut self, id: Uuid) -> StoreResult<Template> {
        let idx = self
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound("Template not found".to_string()))?;
        let mut templates = self.templates.clone();
        let removed = templates.remove(idx);
        self.commit_templates(templates)?;

        self.feedback
            .push(Feedback::success("Template deleted successfully!"));
        Ok(removed)
    }

    /// Creates a new idea from a template's name, body and default category.
    pub fn instantiate_template(&mut self, id: Uuid) -> StoreResult<Uuid> {
        let template = self
            .templates
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("Template not found".to_string()))?;

        let idea_id = self.add_idea(IdeaDraft {
            title: format!("{} (from template)", template.name),
            description: template.description,
            category: template.default_category,
            template_id: Some(template.id),
        })?;

        self.feedback
            .push(Feedback::success("New idea created from template!"));
        Ok(idea_id)
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    /// Number of ideas filed under `category`.
    pub fn category_usage(&self, category: &str) -> usize {
        self.ideas
            .iter()
            .filter(|i| i.category.as_deref() == Some(category))
            .count()
    }

    pub fn add_category(&mut self, name: &str) -> StoreResult<()> {
        let name =
            validate::required(name, "Category name").map_err(StoreError::Validation)?;
        if self.categories.contains(&name) {
            return Err(StoreError::Duplicate("Category already exists!".to_string()));
        }
        let mut categories = self.categories.clone();
        categories.push(name.clone());
        self.commit_categories(categories)?;

        self.feedback
            .push(Feedback::success(format!("Category \"{}\" added!", name)));
        Ok(())
    }

    /// Refuses while any idea still uses the category.
    pub fn delete_category(&mut self, name: &str) -> StoreResult<()> {
        let idx = self
            .categories
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| StoreError::NotFound(format!("Category \"{}\" not found", name)))?;

        let in_use = self.category_usage(name);
        if in_use > 0 {
            return Err(StoreError::CategoryInUse {
                category: name.to_string(),
                count: in_use,
            });
        }

        let mut categories = self.categories.clone();
        categories.remove(idx);
        self.commit_categories(categories)?;

        self.feedback
            .push(Feedback::success(format!("Category \"{}\" deleted!", name)));
        Ok(())
    }

    /// Renames in place and re-files every idea and template default that
    /// used the old name.
    pub fn rename_category(&mut self, old: &str, new: &str) -> StoreResult<()> {
        let idx = self
            .categories
            .iter()
            .position(|c| c == old)
            .ok_or_else(|| StoreError::NotFound(format!("Category \"{}\" not found", old)))?;
        let new = validate::required(new, "Category name").map_err(StoreError::Validation)?;
        if new == old {
            return Ok(());
        }
        if self.categories.contains(&new) {
            return Err(StoreError::Duplicate(
                "This category already exists".to_string(),
            ));
        }

        let mut categories = self.categories.clone();
        categories[idx] = new.clone();
        let mut ideas = self.ideas.clone();
        let mut moved = 0;
        for idea in ideas
            .iter_mut()
            .filter(|i| i.category.as_deref() == Some(old))
        {
            idea.category = Some(new.clone());
            moved += 1;
        }
        let mut templates = self.templates.clone();
        for template in templates
            .iter_mut()
            .filter(|t| t.default_category.as_deref() == Some(old))
        {
            template.default_category = Some(new.clone());
        }

        // Three documents change together; a failed write puts back the ones
        // already replaced
        write_collection(&mut self.storage, IDEAS_KEY, &ideas)?;
        if let Err(err) = write_collection(&mut self.storage, TEMPLATES_KEY, &templates) {
            restore_collection(&mut self.storage, IDEAS_KEY, &self.ideas);
            return Err(err);
        }
        if let Err(err) = write_collection(&mut self.storage, CATEGORIES_KEY, &categories) {
            restore_collection(&mut self.storage, IDEAS_KEY, &self.ideas);
            restore_collection(&mut self.storage, TEMPLATES_KEY, &self.templates);
            return Err(err);
        }
        self.ideas = ideas;
        self.templates = templates;
        self.categories = categories;

        tracing::debug!(old, new = %new, moved, "category renamed");
        self.feedback.push(Feedback::success(format!(
            "Category \"{}\" renamed to \"{}\"",
            old, new
        )));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    fn idea_index(&self, id: Uuid) -> StoreResult<usize> {
        self.ideas
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| idea_not_found(id))
    }

    fn commit_ideas(&mut self, ideas: Vec<Idea>) -> StoreResult<()> {
        write_collection(&mut self.storage, IDEAS_KEY, &ideas)?;
        self.ideas = ideas;
        Ok(())
    }

    fn commit_notifications(&mut self, notifications: Vec<Notification>) -> StoreResult<()> {
        write_collection(&mut self.storage, NOTIFICATIONS_KEY, &notifications)?;
        self.notifications = notifications;
        Ok(())
    }

    fn commit_templates(&mut self, templates: Vec<Template>) -> StoreResult<()> {
        write_collection(&mut self.storage, TEMPLATES_KEY, &templates)?;
        self.templates = templates;
        Ok(())
    }

    fn commit_categories(&mut self, categories: Vec<String>) -> StoreResult<()> {
        write_collection(&mut self.storage, CATEGORIES_KEY, &categories)?;
        self.categories = categories;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::{FileStorage, FlakyStorage, MAX_FILE_SIZE, MemoryStorage};
    use chrono::{Duration, TimeZone};
    use std::rc::Rc;
    use tempfile::TempDir;

    type TestStore = IdeaStore<MemoryStorage, Rc<ManualClock>>;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
    }

    fn store() -> (TestStore, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new(start()));
        (
            IdeaStore::load_with_clock(MemoryStorage::new(), Rc::clone(&clock)),
            clock,
        )
    }

    fn draft(title: &str, category: Option<&str>) -> IdeaDraft {
        IdeaDraft {
            title: title.to_string(),
            description: format!("{} description", title),
            category: category.map(str::to_string),
            template_id: None,
        }
    }

    #[test]
    fn add_idea_initializes_fields() {
        let (mut store, _) = store();
        let id = store.add_idea(draft("T", None)).unwrap();

        let matching: Vec<&Idea> = store.ideas().iter().filter(|i| i.title == "T").collect();
        assert_eq!(matching.len(), 1);
        let idea = matching[0];
        assert_eq!(idea.id, id);
        assert_eq!(idea.created_at, start());
        assert_eq!(idea.last_updated, Some(idea.created_at));
        assert!(idea.comments.is_empty());
        assert_eq!(idea.label, None);

        let other = store.add_idea(draft("T2", None)).unwrap();
        assert_ne!(id, other);
    }

    #[test]
    fn add_idea_emits_update_notification_and_feedback() {
        let (mut store, _) = store();
        store.add_idea(draft("Bike lanes", None)).unwrap();

        assert_eq!(store.notifications().len(), 1);
        assert_eq!(store.notifications()[0].message, "New idea created: Bike lanes");
        assert_eq!(store.notifications()[0].kind, NotificationKind::Update);
        assert_eq!(store.unread_count(), 1);
        assert_eq!(
            store.take_feedback(),
            vec![Feedback::success("Idea added successfully!")]
        );
        assert!(store.take_feedback().is_empty());
    }

    #[test]
    fn add_idea_rejects_blank_title() {
        let (mut store, _) = store();
        let err = store.add_idea(draft("   ", None)).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.ideas().is_empty());
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn label_toggle_semantics() {
        let (mut store, _) = store();
        let id = store.add_idea(draft("T", None)).unwrap();

        assert_eq!(store.set_label(id, Label::Best).unwrap(), Some(Label::Best));
        assert_eq!(store.set_label(id, Label::Best).unwrap(), None);
        assert_eq!(store.idea(id).unwrap().label, None);

        store.set_label(id, Label::Best).unwrap();
        store.set_label(id, Label::Worst).unwrap();
        assert_eq!(store.idea(id).unwrap().label, Some(Label::Worst));
    }

    #[test]
    fn update_merges_and_refreshes_timestamp() {
        let (mut store, clock) = store();
        let id = store.add_idea(draft("Old", Some("Art"))).unwrap();
        clock.advance(Duration::minutes(10));

        store
            .update_idea(
                id,
                IdeaPatch {
                    title: Some("New".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let idea = store.idea(id).unwrap();
        assert_eq!(idea.title, "New");
        assert_eq!(idea.category.as_deref(), Some("Art"));
        assert_eq!(idea.created_at, start());
        assert_eq!(idea.last_updated, Some(start() + Duration::minutes(10)));
        assert_eq!(store.notifications()[0].message, "Idea \"Old\" was updated");
    }

    #[test]
    fn unknown_ids_are_not_found_and_change_nothing() {
        let (mut store, _) = store();
        store.add_idea(draft("Keep", None)).unwrap();
        let before = store.ideas().to_vec();
        let notifications = store.notifications().len();
        let ghost = Uuid::new_v4();

        assert!(matches!(store.delete_idea(ghost), Err(StoreError::NotFound(_))));
        assert!(matches!(
            store.update_idea(ghost, IdeaPatch::default()),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.share_idea(ghost, "a@b.co"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.add_comment(ghost, "", "hello"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.set_label(ghost, Label::Best),
            Err(StoreError::NotFound(_))
        ));

        assert_eq!(store.ideas(), before.as_slice());
        assert_eq!(store.notifications().len(), notifications);
    }

    #[test]
    fn delete_removes_from_collection_and_analytics() {
        let (mut store, _) = store();
        let keep = store.add_idea(draft("Keep", Some("A"))).unwrap();
        let gone = store.add_idea(draft("Gone", Some("B"))).unwrap();

        let removed = store.delete_idea(gone).unwrap();
        assert_eq!(removed.title, "Gone");
        assert!(store.idea(gone).is_none());
        assert!(store.idea(keep).is_some());

        let analytics = store.analytics();
        assert_eq!(analytics.total_ideas, 1);
        assert_eq!(analytics.category_counts.get("B"), None);
        assert_eq!(store.notifications()[0].message, "Idea \"Gone\" was deleted");
    }

    #[test]
    fn share_keeps_duplicate_collaborators() {
        let (mut store, _) = store();
        let id = store.add_idea(draft("T", None)).unwrap();

        store.share_idea(id, "ana@example.com").unwrap();
        store.share_idea(id, "ana@example.com").unwrap();

        let idea = store.idea(id).unwrap();
        assert!(idea.shared);
        assert_eq!(idea.collaborators, vec!["ana@example.com", "ana@example.com"]);
        assert_eq!(store.notifications()[0].kind, NotificationKind::Share);
        assert_eq!(
            store.notifications()[0].message,
            "You shared \"T\" with ana@example.com"
        );
    }

    #[test]
    fn share_rejects_malformed_email() {
        let (mut store, _) = store();
        let id = store.add_idea(draft("T", None)).unwrap();
        assert!(matches!(
            store.share_idea(id, "not-an-email"),
            Err(StoreError::Validation(_))
        ));
        assert!(!store.idea(id).unwrap().shared);
    }

    #[test]
    fn comments_default_to_anonymous() {
        let (mut store, _) = store();
        let id = store.add_idea(draft("T", None)).unwrap();

        store.add_comment(id, "  ", "First!").unwrap();
        store.add_comment(id, "Bea", "Second").unwrap();

        let comments = &store.idea(id).unwrap().comments;
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].author, "Anonymous");
        assert_eq!(comments[0].idea_id, id);
        assert_eq!(comments[1].author, "Bea");
        assert_eq!(store.notifications()[0].kind, NotificationKind::Comment);
        assert!(matches!(
            store.add_comment(id, "Bea", " "),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn notifications_newest_first_and_bulk_ops() {
        let (mut store, _) = store();
        store.add_idea(draft("One", None)).unwrap();
        store.add_idea(draft("Two", None)).unwrap();

        assert_eq!(store.notifications()[0].message, "New idea created: Two");
        let first = store.notifications()[1].id;
        store.mark_notification_as_read(first).unwrap();
        assert_eq!(store.unread_count(), 1);

        store.mark_all_notifications_as_read().unwrap();
        assert_eq!(store.unread_count(), 0);

        store.clear_notifications().unwrap();
        assert!(store.notifications().is_empty());
        assert!(matches!(
            store.mark_notification_as_read(first),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn category_delete_guarded_while_in_use() {
        let (mut store, _) = store();
        store.add_category("Art").unwrap();
        let id = store.add_idea(draft("Mural", Some("Art"))).unwrap();

        let err = store.delete_category("Art").unwrap_err();
        assert_eq!(
            err,
            StoreError::CategoryInUse {
                category: "Art".to_string(),
                count: 1
            }
        );
        assert_eq!(store.categories(), &["Art".to_string()]);

        store.delete_idea(id).unwrap();
        store.delete_category("Art").unwrap();
        assert!(store.categories().is_empty());
    }

    #[test]
    fn category_add_rejects_duplicates_case_sensitively() {
        let (mut store, _) = store();
        store.add_category("Art").unwrap();
        assert!(matches!(
            store.add_category("Art"),
            Err(StoreError::Duplicate(_))
        ));
        store.add_category("art").unwrap();
        assert_eq!(store.categories().len(), 2);
        assert!(matches!(
            store.add_category(" "),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn rename_category_refiles_ideas_and_templates() {
        let (mut store, _) = store();
        store.add_category("Biz").unwrap();
        store.add_category("Health").unwrap();
        let id = store.add_idea(draft("Shop", Some("Biz"))).unwrap();
        let tpl = store
            .add_template(TemplateDraft {
                name: "Pitch".to_string(),
                description: String::new(),
                default_category: Some("Biz".to_string()),
            })
            .unwrap();

        assert!(matches!(
            store.rename_category("Biz", "Health"),
            Err(StoreError::Duplicate(_))
        ));
        store.rename_category("Biz", "Business").unwrap();

        assert_eq!(store.categories(), &["Business".to_string(), "Health".to_string()]);
        assert_eq!(store.idea(id).unwrap().category.as_deref(), Some("Business"));
        let template = store.templates().iter().find(|t| t.id == tpl).unwrap();
        assert_eq!(template.default_category.as_deref(), Some("Business"));
    }

    #[test]
    fn template_instantiation() {
        let (mut store, _) = store();
        let tpl = store
            .add_template(TemplateDraft {
                name: "Project Proposal".to_string(),
                description: "## Goal\n- ?".to_string(),
                default_category: Some("Business".to_string()),
            })
            .unwrap();

        let id = store.instantiate_template(tpl).unwrap();
        let idea = store.idea(id).unwrap();
        assert_eq!(idea.title, "Project Proposal (from template)");
        assert_eq!(idea.description, "## Goal\n- ?");
        assert_eq!(idea.category.as_deref(), Some("Business"));
        assert_eq!(idea.template_id, Some(tpl));

        store.delete_template(tpl).unwrap();
        assert!(store.templates().is_empty());
        assert!(matches!(
            store.instantiate_template(tpl),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn rehydration_round_trips_timestamps() {
        let (mut store, clock) = store();
        let id = store.add_idea(draft("Persisted", Some("Art"))).unwrap();
        clock.advance(Duration::seconds(42));
        store.add_comment(id, "Cy", "nice").unwrap();
        store.add_category("Art").unwrap();
        store
            .add_template(TemplateDraft {
                name: "Tpl".to_string(),
                ..Default::default()
            })
            .unwrap();

        let snapshot = store.storage().clone();
        let original = store.idea(id).unwrap().clone();

        let reloaded = IdeaStore::load_with_clock(snapshot, ManualClock::new(start()));
        let idea = reloaded.idea(id).unwrap();
        assert_eq!(idea.created_at, original.created_at);
        assert_eq!(idea.comments[0].created_at, original.comments[0].created_at);
        assert_eq!(idea, &original);
        assert_eq!(reloaded.notifications(), store.notifications());
        assert_eq!(reloaded.templates(), store.templates());
        assert_eq!(reloaded.categories(), store.categories());
    }

    #[test]
    fn corrupt_collection_falls_back_to_empty() {
        let storage = MemoryStorage::new()
            .with_item(IDEAS_KEY, "{not json")
            .with_item(CATEGORIES_KEY, r#"["Art"]"#);
        let store = IdeaStore::load_with_clock(storage, ManualClock::new(start()));

        assert!(store.ideas().is_empty());
        assert_eq!(store.categories(), &["Art".to_string()]);
    }

    #[test]
    fn categories_seeded_from_ideas_when_never_saved() {
        let ideas = r#"[
            {"id":"0b8f3e52-5f55-4b2f-9b55-8d6f0f0d6f01","title":"a","category":"Tech","createdAt":"2024-01-01T00:00:00Z"},
            {"id":"0b8f3e52-5f55-4b2f-9b55-8d6f0f0d6f02","title":"b","category":"Art","createdAt":"2024-01-02T00:00:00Z"},
            {"id":"0b8f3e52-5f55-4b2f-9b55-8d6f0f0d6f03","title":"c","category":"Tech","createdAt":"2024-01-03T00:00:00Z"},
            {"id":"0b8f3e52-5f55-4b2f-9b55-8d6f0f0d6f04","title":"d","createdAt":"2024-01-04T00:00:00Z"}
        ]"#;
        let store = IdeaStore::load_with_clock(
            MemoryStorage::new().with_item(IDEAS_KEY, ideas),
            ManualClock::new(start()),
        );
        assert_eq!(store.categories(), &["Tech".to_string(), "Art".to_string()]);
    }

    #[test]
    fn every_mutation_rewrites_its_collection() {
        let (mut store, _) = store();
        store.add_category("Art").unwrap();
        let saved = store.storage().get_item(CATEGORIES_KEY).unwrap().unwrap();
        assert_eq!(saved, r#"["Art"]"#);

        let id = store.add_idea(draft("T", Some("Art"))).unwrap();
        let saved: Vec<Idea> =
            serde_json::from_str(&store.storage().get_item(IDEAS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, id);
    }

    fn flaky(failing_writes: Vec<&'static str>) -> IdeaStore<FlakyStorage, ManualClock> {
        let storage = FlakyStorage {
            failing_writes,
            ..Default::default()
        };
        IdeaStore::load_with_clock(storage, ManualClock::new(start()))
    }

    fn saved_ideas(store: &IdeaStore<FlakyStorage, ManualClock>) -> Option<Vec<Idea>> {
        store
            .storage()
            .inner
            .get_item(IDEAS_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[test]
    fn failed_write_leaves_memory_untouched() {
        let mut store = flaky(vec![IDEAS_KEY]);

        let err = store.add_idea(draft("Lost", None)).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert!(store.ideas().is_empty());
        assert_eq!(saved_ideas(&store), None);
        assert!(store.notifications().is_empty());
        assert!(store.take_feedback().is_empty());
    }

    #[test]
    fn failed_writes_keep_existing_ideas_as_saved() {
        let mut store = flaky(Vec::new());
        let id = store.add_idea(draft("Keep", None)).unwrap();
        store.storage_mut().failing_writes.push(IDEAS_KEY);

        assert!(store.delete_idea(id).is_err());
        assert!(store.set_label(id, Label::Best).is_err());
        assert!(store.share_idea(id, "ana@example.com").is_err());
        assert!(store.add_comment(id, "", "hi").is_err());

        let idea = store.idea(id).unwrap();
        assert_eq!(idea.label, None);
        assert!(!idea.shared);
        assert!(idea.comments.is_empty());
        assert_eq!(saved_ideas(&store).unwrap(), store.ideas());
    }

    #[test]
    fn failed_notification_write_does_not_fail_the_change() {
        let mut store = flaky(vec![NOTIFICATIONS_KEY]);

        store.add_idea(draft("One", None)).unwrap();
        store.add_idea(draft("Two", None)).unwrap();

        assert_eq!(store.ideas().len(), 2);
        assert_eq!(saved_ideas(&store).unwrap().len(), 2);
        assert!(store.notifications().is_empty());
        assert_eq!(store.take_feedback().len(), 2);
    }

    #[test]
    fn failed_rename_restores_every_document() {
        let mut store = flaky(Vec::new());
        store.add_category("Biz").unwrap();
        let id = store.add_idea(draft("Shop", Some("Biz"))).unwrap();
        store.storage_mut().failing_writes.push(CATEGORIES_KEY);

        assert!(store.rename_category("Biz", "Business").is_err());

        assert_eq!(store.categories(), &["Biz".to_string()]);
        assert_eq!(store.idea(id).unwrap().category.as_deref(), Some("Biz"));
        assert_eq!(
            saved_ideas(&store).unwrap()[0].category.as_deref(),
            Some("Biz")
        );
    }

    #[test]
    fn failed_read_empties_only_that_collection() {
        let storage = FlakyStorage {
            inner: MemoryStorage::new()
                .with_item(IDEAS_KEY, "[]")
                .with_item(CATEGORIES_KEY, r#"["Art"]"#),
            failing_reads: vec![IDEAS_KEY],
            ..Default::default()
        };
        let store = IdeaStore::load_with_clock(storage, ManualClock::new(start()));

        assert!(store.ideas().is_empty());
        assert_eq!(store.categories(), &["Art".to_string()]);
    }

    #[test]
    fn oversize_document_on_disk_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::open(dir.path()).unwrap();
        storage.set_item(CATEGORIES_KEY, r#"["Art"]"#).unwrap();
        let file = std::fs::File::create(dir.path().join("ideas.json")).unwrap();
        file.set_len(MAX_FILE_SIZE + 1).unwrap();

        let store = IdeaStore::load_with_clock(storage, ManualClock::new(start()));
        assert!(store.ideas().is_empty());
        assert_eq!(store.categories(), &["Art".to_string()]);
    }
}
