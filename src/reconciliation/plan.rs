use crate::messages::{Locale, Messages};

/// How a single (locale, key) entry changes during an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    /// Present only in the incoming catalog
    Added { value: String },
    /// Present in both with different values
    Updated { previous: String, value: String },
    /// Present only in the existing catalog
    Removed { previous: String },
}

/// One entry of an import plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageChange {
    pub locale: Option<Locale>,
    pub key: String,
    pub kind: ChangeKind,
}

/// The changes that turn an existing catalog into an incoming one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportPlan {
    /// Ordered by locale, then key
    pub changes: Vec<MessageChange>,
}

impl ImportPlan {
    /// Diff `existing` against `incoming`.
    pub fn between(existing: &Messages, incoming: &Messages) -> Self {
        let mut changes = Vec::new();

        for (locale, key, value) in incoming.iter() {
            let kind = match existing.get_message(locale, key) {
                None => ChangeKind::Added {
                    value: value.to_string(),
                },
                Some(previous) if previous != value => ChangeKind::Updated {
                    previous: previous.to_string(),
                    value: value.to_string(),
                },
                Some(_) => continue,
            };
            changes.push(MessageChange {
                locale: locale.cloned(),
                key: key.to_string(),
                kind,
            });
        }

        for (locale, key, previous) in existing.iter() {
            if incoming.get_message(locale, key).is_none() {
                changes.push(MessageChange {
                    locale: locale.cloned(),
                    key: key.to_string(),
                    kind: ChangeKind::Removed {
                        previous: previous.to_string(),
                    },
                });
            }
        }

        changes.sort_by(|a, b| (&a.locale, &a.key).cmp(&(&b.locale, &b.key)));
        Self { changes }
    }

    /// Check if the catalogs were already equal
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn added(&self) -> usize {
        self.count(|k| matches!(k, ChangeKind::Added { .. }))
    }

    pub fn updated(&self) -> usize {
        self.count(|k| matches!(k, ChangeKind::Updated { .. }))
    }

    pub fn removed(&self) -> usize {
        self.count(|k| matches!(k, ChangeKind::Removed { .. }))
    }

    fn count(&self, predicate: impl Fn(&ChangeKind) -> bool) -> usize {
        self.changes.iter().filter(|c| predicate(&c.kind)).count()
    }

    /// Patch `messages` in place with every change of this plan.
    ///
    /// Applied to the catalog the plan was built from, the result equals the
    /// incoming catalog.
    pub fn apply_to(&self, messages: &mut Messages) {
        for change in &self.changes {
            match &change.kind {
                ChangeKind::Added { value } | ChangeKind::Updated { value, .. } => {
                    messages.add_message(change.locale.as_ref(), change.key.clone(), value.clone());
                }
                ChangeKind::Removed { .. } => {
                    messages.remove_message(change.locale.as_ref(), &change.key);
                }
            }
        }
    }
}
