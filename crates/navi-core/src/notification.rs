//! Driver inbox: tips, news, alerts and account updates.

use serde::{Deserialize, Serialize};

use crate::types::{Cents, NotificationId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Tip,
    News,
    Alert,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    /// Tip amount, present only on tips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Cents>,
}

/// Inbox view selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    Tips,
    Alerts,
}

impl NotificationFilter {
    pub fn matches(self, notification: &Notification) -> bool {
        match self {
            Self::All => true,
            Self::Unread => !notification.read,
            Self::Tips => notification.kind == NotificationKind::Tip,
            Self::Alerts => notification.kind == NotificationKind::Alert,
        }
    }
}

/// Notifications in arrival order, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inbox {
    notifications: Vec<Notification>,
}

impl Inbox {
    pub const fn new(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }

    pub fn filter(&self, filter: NotificationFilter) -> impl Iterator<Item = &Notification> {
        self.notifications.iter().filter(move |n| filter.matches(n))
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Marks one notification read. Returns false if the id is unknown.
    pub fn mark_read(&mut self, id: &NotificationId) -> bool {
        match self.notifications.iter_mut().find(|n| &n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
    }

    /// Removes a notification. Returns false if the id is unknown.
    pub fn delete(&mut self, id: &NotificationId) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| &n.id != id);
        self.notifications.len() != before
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, kind: NotificationKind, read: bool) -> Notification {
        Notification {
            id: NotificationId::new(id).unwrap(),
            kind,
            title: format!("title {id}"),
            message: String::new(),
            read,
            amount: (kind == NotificationKind::Tip).then_some(Cents(500)),
        }
    }

    fn inbox() -> Inbox {
        Inbox::new(vec![
            note("1", NotificationKind::Tip, false),
            note("2", NotificationKind::Alert, false),
            note("3", NotificationKind::News, true),
            note("4", NotificationKind::Tip, true),
            note("5", NotificationKind::Update, true),
            note("6", NotificationKind::Alert, false),
        ])
    }

    fn ids<'a>(it: impl Iterator<Item = &'a Notification>) -> Vec<&'a str> {
        it.map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn filters_select_expected_notifications() {
        let inbox = inbox();
        assert_eq!(ids(inbox.filter(NotificationFilter::All)).len(), 6);
        assert_eq!(ids(inbox.filter(NotificationFilter::Unread)), ["1", "2", "6"]);
        assert_eq!(ids(inbox.filter(NotificationFilter::Tips)), ["1", "4"]);
        assert_eq!(ids(inbox.filter(NotificationFilter::Alerts)), ["2", "6"]);
    }

    #[test]
    fn mark_read_updates_unread_count() {
        let mut inbox = inbox();
        assert_eq!(inbox.unread_count(), 3);

        assert!(inbox.mark_read(&NotificationId::new("2").unwrap()));
        assert_eq!(inbox.unread_count(), 2);

        assert!(!inbox.mark_read(&NotificationId::new("99").unwrap()));

        inbox.mark_all_read();
        assert_eq!(inbox.unread_count(), 0);
    }

    #[test]
    fn delete_removes_only_matching() {
        let mut inbox = inbox();
        assert!(inbox.delete(&NotificationId::new("3").unwrap()));
        assert!(!inbox.delete(&NotificationId::new("3").unwrap()));
        assert_eq!(inbox.len(), 5);
    }
}
