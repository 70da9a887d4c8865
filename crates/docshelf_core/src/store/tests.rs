//! Local store integration tests.

#[cfg(test)]
mod store_tests {
    use super::super::*;
    use crate::models::Document;
    use bytes::Bytes;
    use tempfile::TempDir;

    fn setup_test_store() -> (Store, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let store = Store::open(db_path.to_str().unwrap()).unwrap();
        (store, temp_dir)
    }

    fn sample_docs() -> Vec<Document> {
        vec![
            Document::local("b.txt".to_string(), 20, "text/plain".to_string()),
            Document::local("a.txt".to_string(), 10, "text/plain".to_string()),
        ]
    }

    #[test]
    fn test_meta_cache_round_trips_ordered_list() {
        let (store, _temp) = setup_test_store();
        let docs = sample_docs();

        store.meta.write_all(&docs).unwrap();
        let reloaded = store.meta.read_all().unwrap();

        assert_eq!(reloaded, docs);
    }

    #[test]
    fn test_meta_cache_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let docs = sample_docs();

        {
            let store = Store::open(db_path.to_str().unwrap()).unwrap();
            store.meta.write_all(&docs).unwrap();
            store.flush().unwrap();
        }

        let store = Store::open(db_path.to_str().unwrap()).unwrap();
        assert_eq!(store.meta.read_all().unwrap(), docs);
    }

    #[test]
    fn test_meta_cache_rewrite_replaces_previous_list() {
        let (store, _temp) = setup_test_store();
        let docs = sample_docs();

        store.meta.write_all(&docs).unwrap();
        store.meta.write_all(&docs[..1]).unwrap();

        let reloaded = store.meta.read_all().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].name, "b.txt");
    }

    #[test]
    fn test_meta_cache_empty_before_first_write() {
        let (store, _temp) = setup_test_store();
        assert!(store.meta.read_all().unwrap().is_empty());

        store.meta.write_all(&sample_docs()).unwrap();
        store.meta.clear().unwrap();
        assert!(store.meta.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_blob_store_put_get_remove() {
        let (store, _temp) = setup_test_store();
        let bytes = Bytes::from_static(b"file content");

        store.blobs.put("doc-1", &bytes).unwrap();
        assert_eq!(store.blobs.get("doc-1").unwrap(), Some(bytes));

        assert!(store.blobs.remove("doc-1").unwrap());
        assert_eq!(store.blobs.get("doc-1").unwrap(), None);
        // Removing again is a miss, not an error.
        assert!(!store.blobs.remove("doc-1").unwrap());
    }

    #[test]
    fn test_blob_store_clear_leaves_meta_untouched() {
        let (store, _temp) = setup_test_store();
        let docs = sample_docs();

        store.meta.write_all(&docs).unwrap();
        store.blobs.put(&docs[0].id, &Bytes::from_static(b"x")).unwrap();
        store.blobs.clear().unwrap();

        assert_eq!(store.blobs.get(&docs[0].id).unwrap(), None);
        assert_eq!(store.meta.read_all().unwrap(), docs);
    }
}
