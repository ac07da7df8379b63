//! Landing-page content: field notes and testimonials.
//!
//! Plain CRUD, no cross-entity rules. One intentional asymmetry, kept from
//! the product behavior: listing field notes hides inactive ones, listing
//! testimonials returns everything.

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::content::{FieldNote, Testimonial};

#[derive(Debug, Clone, Deserialize)]
pub struct NewFieldNote {
    pub quote: String,
    pub author: String,
    pub active: Option<bool>,
}

/// Shallow merge: only provided fields change, plus an `updated_at` stamp.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldNotePatch {
    pub quote: Option<String>,
    pub author: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTestimonial {
    pub quote: String,
    pub author: String,
    pub role: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestimonialPatch {
    pub quote: Option<String>,
    pub author: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
}

impl Store {
    pub fn list_field_notes(&self) -> Vec<FieldNote> {
        let inner = self.read();
        inner
            .field_note_order
            .iter()
            .filter_map(|id| inner.field_notes.get(id))
            .filter(|note| note.active)
            .cloned()
            .collect()
    }

    pub fn add_field_note(&self, input: NewFieldNote) -> Result<FieldNote, StoreError> {
        let mut inner = self.write();
        let note = FieldNote {
            id: Uuid::new_v4(),
            quote: input.quote,
            author: input.author,
            active: input.active.unwrap_or(true),
            created_at: Utc::now(),
            updated_at: None,
            // Next slot after the current count. Deletions leave gaps; order
            // values of surviving notes are never rewritten.
            order: inner.field_note_order.len() as u32,
        };
        inner.field_note_order.push(note.id);
        inner.field_notes.insert(note.id, note.clone());
        self.persist(&inner)?;
        Ok(note)
    }

    pub fn update_field_note(
        &self,
        id: Uuid,
        patch: FieldNotePatch,
    ) -> Result<Option<FieldNote>, StoreError> {
        let mut inner = self.write();
        let Some(note) = inner.field_notes.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(quote) = patch.quote {
            note.quote = quote;
        }
        if let Some(author) = patch.author {
            note.author = author;
        }
        if let Some(active) = patch.active {
            note.active = active;
        }
        note.updated_at = Some(Utc::now());
        let record = note.clone();
        self.persist(&inner)?;
        Ok(Some(record))
    }

    pub fn delete_field_note(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.write();
        if inner.field_notes.remove(&id).is_none() {
            return Ok(false);
        }
        inner.field_note_order.retain(|other| *other != id);
        self.persist(&inner)?;
        Ok(true)
    }

    /// Unfiltered, unlike field notes.
    pub fn list_testimonials(&self) -> Vec<Testimonial> {
        let inner = self.read();
        inner
            .testimonial_order
            .iter()
            .filter_map(|id| inner.testimonials.get(id))
            .cloned()
            .collect()
    }

    pub fn add_testimonial(&self, input: NewTestimonial) -> Result<Testimonial, StoreError> {
        let mut inner = self.write();
        let testimonial = Testimonial {
            id: Uuid::new_v4(),
            quote: input.quote,
            author: input.author,
            role: input.role.unwrap_or_default(),
            active: input.active.unwrap_or(true),
            created_at: Utc::now(),
            updated_at: None,
        };
        inner.testimonial_order.push(testimonial.id);
        inner.testimonials.insert(testimonial.id, testimonial.clone());
        self.persist(&inner)?;
        Ok(testimonial)
    }

    pub fn update_testimonial(
        &self,
        id: Uuid,
        patch: TestimonialPatch,
    ) -> Result<Option<Testimonial>, StoreError> {
        let mut inner = self.write();
        let Some(testimonial) = inner.testimonials.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(quote) = patch.quote {
            testimonial.quote = quote;
        }
        if let Some(author) = patch.author {
            testimonial.author = author;
        }
        if let Some(role) = patch.role {
            testimonial.role = role;
        }
        if let Some(active) = patch.active {
            testimonial.active = active;
        }
        testimonial.updated_at = Some(Utc::now());
        let record = testimonial.clone();
        self.persist(&inner)?;
        Ok(Some(record))
    }

    pub fn delete_testimonial(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.write();
        if inner.testimonials.remove(&id).is_none() {
            return Ok(false);
        }
        inner.testimonial_order.retain(|other| *other != id);
        self.persist(&inner)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store() -> (Store, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Store::open(dir.path().join("store.json")).expect("open store");
        (store, dir)
    }

    fn note(store: &Store, quote: &str) -> FieldNote {
        store
            .add_field_note(NewFieldNote {
                quote: quote.to_string(),
                author: "Someone · Somewhere".to_string(),
                active: None,
            })
            .expect("add field note")
    }

    #[test]
    fn new_note_takes_the_next_order_slot() {
        let (store, _dir) = open_store();
        // 20 seeded notes occupy orders 0..=19.
        let added = note(&store, "fresh");
        assert_eq!(added.order, 20);
        assert!(added.active);
    }

    #[test]
    fn order_is_never_renumbered_on_delete() {
        let (store, _dir) = open_store();
        let a = note(&store, "a");
        let b = note(&store, "b");
        assert!(store.delete_field_note(a.id).expect("delete"));

        let listed = store.list_field_notes();
        let survivor = listed.iter().find(|n| n.id == b.id).expect("b survives");
        assert_eq!(survivor.order, b.order, "surviving orders must not shift");

        // The next note reuses the shrunken count, gaps and all.
        let c = note(&store, "c");
        assert_eq!(c.order, 21);
    }

    #[test]
    fn listing_field_notes_hides_inactive() {
        let (store, _dir) = open_store();
        let n = note(&store, "soon hidden");
        store
            .update_field_note(
                n.id,
                FieldNotePatch {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .expect("update")
            .expect("note exists");

        assert!(store.list_field_notes().iter().all(|x| x.id != n.id));
    }

    #[test]
    fn listing_testimonials_keeps_inactive() {
        let (store, _dir) = open_store();
        let t = store
            .add_testimonial(NewTestimonial {
                quote: "quote".to_string(),
                author: "author".to_string(),
                role: None,
                active: Some(false),
            })
            .expect("add testimonial");

        let listed = store.list_testimonials();
        assert!(listed.iter().any(|x| x.id == t.id && !x.active));
    }

    #[test]
    fn update_merges_only_provided_fields() {
        let (store, _dir) = open_store();
        let n = note(&store, "original quote");
        let updated = store
            .update_field_note(
                n.id,
                FieldNotePatch {
                    author: Some("New Author".to_string()),
                    ..Default::default()
                },
            )
            .expect("update")
            .expect("note exists");

        assert_eq!(updated.quote, "original quote");
        assert_eq!(updated.author, "New Author");
        assert!(updated.updated_at.is_some());
    }

    #[test]
    fn unknown_ids_are_sentinels_not_errors() {
        let (store, _dir) = open_store();
        let missing = Uuid::new_v4();
        assert!(store
            .update_field_note(missing, FieldNotePatch::default())
            .expect("update")
            .is_none());
        assert!(!store.delete_field_note(missing).expect("delete"));
        assert!(store
            .update_testimonial(missing, TestimonialPatch::default())
            .expect("update")
            .is_none());
        assert!(!store.delete_testimonial(missing).expect("delete"));
    }

    #[test]
    fn testimonial_role_defaults_to_empty() {
        let (store, _dir) = open_store();
        let t = store
            .add_testimonial(NewTestimonial {
                quote: "quote".to_string(),
                author: "author".to_string(),
                role: None,
                active: None,
            })
            .expect("add testimonial");
        assert_eq!(t.role, "");
        assert!(t.active);
    }
}
