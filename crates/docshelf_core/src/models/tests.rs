#[cfg(test)]
mod model_tests {
    use super::super::*;
    use bytes::Bytes;

    #[test]
    fn test_local_document_gets_unique_ids() {
        let a = Document::local("a.txt".to_string(), 10, "text/plain".to_string());
        let b = Document::local("b.txt".to_string(), 20, "text/plain".to_string());

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_blank_mime_falls_back_to_octet_stream() {
        let doc = Document::local("mystery".to_string(), 1, "".to_string());
        assert_eq!(doc.mime, FALLBACK_MIME);

        let file = NewFile::new("mystery", "  ", Bytes::from_static(b"x"));
        assert_eq!(file.mime, FALLBACK_MIME);
    }

    #[test]
    fn test_synchronized_document_keeps_store_id() {
        let doc = Document::synchronized(
            "remote-42".to_string(),
            "report.pdf".to_string(),
            1024,
            "application/pdf".to_string(),
        );
        assert_eq!(doc.id, "remote-42");
        assert_eq!(doc.mime, "application/pdf");
    }

    #[test]
    fn test_document_serializes_mime_as_type() {
        let doc = Document::local("a.txt".to_string(), 10, "text/plain".to_string());
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["type"], "text/plain");
        assert!(value.get("mime").is_none());
    }

    #[test]
    fn test_new_file_size_matches_bytes() {
        let file = NewFile::new("a.bin", "application/octet-stream", Bytes::from(vec![0u8; 7]));
        assert_eq!(file.size(), 7);
    }
}
