use application::{DocumentStore, SearchRequest};
use domain::{Author, Document, Timestamp};
use infrastructure::{InMemoryDocumentRepository, UuidGenerator};
use std::sync::Arc;

fn new_store() -> DocumentStore {
    DocumentStore::new(
        Arc::new(InMemoryDocumentRepository::new()),
        Arc::new(UuidGenerator),
    )
}

fn ts(s: &str) -> Timestamp {
    s.parse().unwrap()
}

fn strings(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|v| v.to_string()).collect())
}

fn test_document() -> Document {
    Document::default()
        .with_title("Test Document")
        .with_content("This is a test document")
        .with_author(Author::new("1", "John Doe"))
}

fn java_doc() -> Document {
    Document::default()
        .with_title("Java Programming")
        .with_content("Learn Java programming")
        .with_author(Author::new("1", "John Doe"))
        .with_created(ts("2023-01-01T00:00:00Z"))
}

fn python_doc() -> Document {
    Document::default()
        .with_title("Python Basics")
        .with_content("Introduction to Python")
        .with_author(Author::new("2", "Jane Smith"))
        .with_created(ts("2023-02-01T00:00:00Z"))
}

#[test]
fn save_new_document_generates_id() {
    let store = new_store();
    let saved = store.save(&test_document());

    let id = saved.id.clone().expect("id assigned");
    assert!(!id.as_str().is_empty());
    assert_eq!(saved.title.as_deref(), Some("Test Document"));
    assert_eq!(saved.content.as_deref(), Some("This is a test document"));
    assert_eq!(saved.author_id(), Some("1"));
    assert_eq!(
        saved.author.as_ref().and_then(|a| a.name.as_deref()),
        Some("John Doe")
    );
    assert_eq!(store.find_by_id(id.as_str()), Some(saved));
}

#[test]
fn save_with_existing_id_keeps_it() {
    let store = new_store();
    let saved = store.save(&test_document().with_id("existing-id"));
    assert_eq!(saved.id.as_ref().map(|id| id.as_str()), Some("existing-id"));
}

#[test]
fn saved_ids_are_unique() {
    let store = new_store();
    let first = store.save(&test_document());
    let second = store.save(&test_document());
    assert_ne!(first.id, second.id);
    assert_eq!(store.count(), 2);
}

#[test]
fn find_existing_document_by_id() {
    let store = new_store();
    let saved = store.save(&test_document());
    let found = store.find_by_id(saved.id.as_ref().unwrap().as_str());
    assert_eq!(found, Some(saved));
}

#[test]
fn find_non_existent_document_returns_none() {
    let store = new_store();
    assert_eq!(store.find_by_id("non-existent-id"), None);
}

#[test]
fn mutating_original_after_save_does_not_change_stored_copy() {
    let store = new_store();
    let mut original = test_document().with_id("doc");
    let saved = store.save(&original);

    original.title = Some("Mutated".to_string());
    original.author.as_mut().unwrap().id = Some("99".to_string());

    let found = store.find_by_id("doc").unwrap();
    assert_eq!(found, saved);
    assert_eq!(found.title.as_deref(), Some("Test Document"));
    assert_eq!(found.author_id(), Some("1"));
}

#[test]
fn mutating_returned_copy_does_not_change_store() {
    let store = new_store();
    let mut saved = store.save(&test_document().with_id("doc"));
    saved.content = Some("Mutated".to_string());

    let mut found = store.find_by_id("doc").unwrap();
    assert_eq!(found.content.as_deref(), Some("This is a test document"));
    found.author = None;

    assert!(store.find_by_id("doc").unwrap().author.is_some());
}

#[test]
fn resave_does_not_touch_created() {
    let store = new_store();
    let saved = store.save(&java_doc());
    let resaved = store.save(&saved.clone().with_title("Java Programming, 2nd ed."));

    assert_eq!(resaved.id, saved.id);
    assert_eq!(resaved.created, Some(ts("2023-01-01T00:00:00Z")));
    assert_eq!(store.count(), 1);
}

#[test]
fn search_with_multiple_criteria() {
    let store = new_store();
    let doc1 = store.save(&java_doc());
    store.save(&python_doc());

    let request = SearchRequest {
        title_prefixes: strings(&["Java"]),
        contains_contents: strings(&["programming"]),
        author_ids: strings(&["1"]),
        created_from: Some(ts("2023-01-01T00:00:00Z")),
        created_to: Some(ts("2023-01-31T23:59:59Z")),
    };

    assert_eq!(store.search(&request), vec![doc1]);
}

#[test]
fn search_with_non_matching_criteria_is_empty() {
    let store = new_store();
    store.save(&java_doc());

    let request = SearchRequest {
        title_prefixes: strings(&["Python"]),
        ..Default::default()
    };
    assert!(store.search(&request).is_empty());
}

#[test]
fn empty_request_returns_everything() {
    let store = new_store();
    store.save(&java_doc());
    store.save(&python_doc());
    store.save(&Document::default());

    assert_eq!(store.search(&SearchRequest::default()).len(), 3);

    let empty_lists = SearchRequest {
        title_prefixes: Some(vec![]),
        contains_contents: Some(vec![]),
        author_ids: Some(vec![]),
        ..Default::default()
    };
    assert_eq!(store.search(&empty_lists).len(), 3);
}

#[test]
fn document_without_created_never_matches_date_bounds() {
    let store = new_store();
    store.save(&Document::default().with_title("Undated"));

    let from_only = SearchRequest {
        created_from: Some(ts("2000-01-01T00:00:00Z")),
        ..Default::default()
    };
    let to_only = SearchRequest {
        created_to: Some(ts("2100-01-01T00:00:00Z")),
        ..Default::default()
    };
    assert!(store.search(&from_only).is_empty());
    assert!(store.search(&to_only).is_empty());
}

#[test]
fn prefix_is_any_of_but_contents_is_all_of() {
    let store = new_store();
    let doc1 = store.save(&java_doc());
    let doc2 = store.save(&python_doc());

    let either_prefix = SearchRequest {
        title_prefixes: strings(&["Java", "Python"]),
        ..Default::default()
    };
    let mut hits = store.search(&either_prefix);
    hits.sort_by(|a, b| a.title.cmp(&b.title));
    assert_eq!(hits, vec![doc1, doc2]);

    let both_fragments = SearchRequest {
        contains_contents: strings(&["Java", "Python"]),
        ..Default::default()
    };
    assert!(store.search(&both_fragments).is_empty());
}

#[test]
fn batch_save_then_search_by_author() {
    let store = new_store();
    let saved = store.save_batch(&[java_doc(), python_doc()]);
    assert_eq!(saved.len(), 2);

    let request = SearchRequest {
        author_ids: strings(&["2"]),
        ..Default::default()
    };
    assert_eq!(store.search(&request), vec![saved[1].clone()]);
}

#[test]
fn empty_string_id_is_stored_verbatim() {
    let store = new_store();
    let saved = store.save(&test_document().with_id(""));

    assert_eq!(saved.id.as_ref().map(|id| id.as_str()), Some(""));
    assert_eq!(store.find_by_id(""), Some(saved));
}

#[test]
fn absent_fields_never_satisfy_empty_string_constraints() {
    let store = new_store();
    store.save(&Document::default().with_author(Author {
        id: None,
        name: Some("Nameless".to_string()),
    }));

    let empty_author_id = SearchRequest {
        author_ids: strings(&[""]),
        ..Default::default()
    };
    let empty_prefix = SearchRequest {
        title_prefixes: strings(&[""]),
        ..Default::default()
    };
    assert!(store.search(&empty_author_id).is_empty());
    assert!(store.search(&empty_prefix).is_empty());
    assert_eq!(store.search(&SearchRequest::default()).len(), 1);
}
