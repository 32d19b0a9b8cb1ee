//! Local-change markers for sync conflict resolution.
//!
//! Records "this entity changed locally at time T", keyed by entity kind,
//! entity id, and namespace. The sync collaborator reads these when
//! resolving conflicts; nothing here resolves anything itself.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::namespace::Namespace;

/// What kind of entity a marker refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Task,
    Completion,
    Session,
    Prefs,
}

/// Marker key: one entity in one namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeKey {
    pub kind: EntityKind,
    pub id: Uuid,
    pub namespace: Namespace,
}

/// In-memory log of the latest local change time per entity.
#[derive(Debug, Default)]
pub struct ChangeLog {
    markers: HashMap<ChangeKey, DateTime<Utc>>,
}

impl ChangeLog {
    /// Stamp an entity with the current wall-clock time. A later change to
    /// the same entity replaces the stamp.
    pub fn record(&mut self, kind: EntityKind, id: Uuid, namespace: &Namespace) {
        self.record_at(kind, id, namespace, Utc::now());
    }

    /// Stamp an entity with an explicit time.
    pub fn record_at(
        &mut self,
        kind: EntityKind,
        id: Uuid,
        namespace: &Namespace,
        at: DateTime<Utc>,
    ) {
        let key = ChangeKey {
            kind,
            id,
            namespace: namespace.clone(),
        };
        self.markers.insert(key, at);
    }

    /// When the entity last changed locally, if it has.
    pub fn changed_at(
        &self,
        kind: EntityKind,
        id: Uuid,
        namespace: &Namespace,
    ) -> Option<DateTime<Utc>> {
        let key = ChangeKey {
            kind,
            id,
            namespace: namespace.clone(),
        };
        self.markers.get(&key).copied()
    }

    /// Drop every marker belonging to `namespace`, leaving the others
    /// alone.
    pub fn purge_namespace(&mut self, namespace: &Namespace) {
        self.markers.retain(|key, _| key.namespace != *namespace);
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_and_lookup() {
        let mut log = ChangeLog::default();
        let id = Uuid::new_v4();
        let guest = Namespace::Guest;
        assert!(log.changed_at(EntityKind::Task, id, &guest).is_none());

        let t1 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let t2 = Utc.timestamp_opt(1_700_000_100, 0).unwrap();
        log.record_at(EntityKind::Task, id, &guest, t1);
        log.record_at(EntityKind::Task, id, &guest, t2);
        assert_eq!(log.changed_at(EntityKind::Task, id, &guest), Some(t2));
        // Kind is part of the key.
        assert!(log.changed_at(EntityKind::Completion, id, &guest).is_none());
    }

    #[test]
    fn test_purge_is_namespace_scoped() {
        let mut log = ChangeLog::default();
        let id = Uuid::new_v4();
        let guest = Namespace::Guest;
        let user = Namespace::User("alice".into());
        log.record(EntityKind::Task, id, &guest);
        log.record(EntityKind::Task, id, &user);
        assert_eq!(log.len(), 2);

        log.purge_namespace(&guest);
        assert!(log.changed_at(EntityKind::Task, id, &guest).is_none());
        assert!(log.changed_at(EntityKind::Task, id, &user).is_some());
    }
}
