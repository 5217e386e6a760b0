use parking_lot::RwLock;
use std::sync::Arc;

use crate::models::{InternshipRecord, RawListing};
use crate::models::domain::normalize_set;

const DEFAULT_COMPANY: &str = "Company";
const DEFAULT_TITLE: &str = "Internship";
const DEFAULT_FIELD: &str = "General";
const DEFAULT_LOCATION: &str = "Remote";
const APPLY_LINK_BASE: &str = "https://company.com/apply/";

/// In-memory table of internship listings
///
/// Built once from the dataset rows and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<InternshipRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<InternshipRecord>) -> Self {
        Self { records }
    }

    /// Normalize raw dataset rows into a store, keeping row order
    pub fn from_listings<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawListing>,
    {
        Self {
            records: rows.into_iter().map(normalize_listing).collect(),
        }
    }

    pub fn records(&self) -> &[InternshipRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Turn a raw row into a record, filling defaults for blank cells
pub fn normalize_listing(raw: RawListing) -> InternshipRecord {
    let title = non_blank(raw.internship_title, DEFAULT_TITLE);
    let apply_link = raw
        .apply_link
        .map(|link| link.trim().to_string())
        .filter(|link| !link.is_empty())
        .unwrap_or_else(|| apply_link_for(&title));

    InternshipRecord {
        company: non_blank(raw.company, DEFAULT_COMPANY),
        location: non_blank(raw.location, DEFAULT_LOCATION),
        skills: normalize_set(raw.skills.as_deref().unwrap_or_default().split(',')),
        field: non_blank(raw.field, DEFAULT_FIELD),
        apply_link,
        title,
    }
}

/// Synthesized application link for listings without one
pub fn apply_link_for(title: &str) -> String {
    format!("{}{}", APPLY_LINK_BASE, title.trim().replace(' ', "-"))
}

fn non_blank(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Shared handle to the current store
///
/// Readers take an `Arc` snapshot; a reload swaps the whole table at once,
/// so a query never observes a partially-built store.
#[derive(Debug)]
pub struct StoreHandle {
    current: RwLock<Arc<RecordStore>>,
}

impl StoreHandle {
    pub fn new(store: RecordStore) -> Self {
        Self {
            current: RwLock::new(Arc::new(store)),
        }
    }

    pub fn snapshot(&self) -> Arc<RecordStore> {
        Arc::clone(&self.current.read())
    }

    /// Install a new store, returning the previous one
    pub fn replace(&self, store: RecordStore) -> Arc<RecordStore> {
        let mut current = self.current.write();
        std::mem::replace(&mut *current, Arc::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(company: &str, title: &str, skills: &str, field: &str) -> RawListing {
        RawListing {
            company: Some(company.to_string()),
            internship_title: Some(title.to_string()),
            location: Some("NYC".to_string()),
            skills: Some(skills.to_string()),
            field: Some(field.to_string()),
            apply_link: None,
        }
    }

    #[test]
    fn test_normalize_skills() {
        let record = normalize_listing(raw("Acme", "Data Intern", " Python, SQL ,,machine   Learning, python", "Data Science"));

        let skills: Vec<&str> = record.skills.iter().map(String::as_str).collect();
        assert_eq!(skills, vec!["machine learning", "python", "sql"]);
    }

    #[test]
    fn test_defaults_for_blank_cells() {
        let record = normalize_listing(RawListing {
            company: Some("   ".to_string()),
            ..Default::default()
        });

        assert_eq!(record.company, "Company");
        assert_eq!(record.title, "Internship");
        assert_eq!(record.field, "General");
        assert_eq!(record.location, "Remote");
        assert!(record.skills.is_empty());
        assert_eq!(record.apply_link, "https://company.com/apply/Internship");
    }

    #[test]
    fn test_apply_link_synthesized_from_title() {
        let record = normalize_listing(raw("Acme", "Data Science Intern", "python", "Data Science"));
        assert_eq!(record.apply_link, "https://company.com/apply/Data-Science-Intern");
    }

    #[test]
    fn test_apply_link_kept_when_present() {
        let mut row = raw("Acme", "Intern", "python", "Data Science");
        row.apply_link = Some(" https://acme.io/jobs/1 ".to_string());

        assert_eq!(normalize_listing(row).apply_link, "https://acme.io/jobs/1");
    }

    #[test]
    fn test_store_keeps_row_order() {
        let store = RecordStore::from_listings(vec![
            raw("B", "Intern", "", "Backend"),
            raw("A", "Intern", "", "Backend"),
        ]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].company, "B");
        assert_eq!(store.records()[1].company, "A");
    }

    #[test]
    fn test_handle_swaps_whole_store() {
        let handle = StoreHandle::new(RecordStore::default());
        let before = handle.snapshot();

        let previous = handle.replace(RecordStore::from_listings(vec![raw("A", "Intern", "", "Backend")]));

        assert!(before.is_empty());
        assert!(previous.is_empty());
        assert_eq!(handle.snapshot().len(), 1);
    }
}
