//! Analysis record lifecycle: decode, store, extract, persist.

use bytes::Bytes;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::analysis::keywords::extract_keywords;
use crate::analysis::repo::AnalysisRepo;
use crate::documents::{DocumentDecoder, DocumentKind};
use crate::errors::AppError;
use crate::models::analysis::AnalysisRecordRow;
use crate::storage::ObjectStore;

/// Parameters for creating a new analysis record.
pub struct CreateAnalysisParams {
    pub bytes: Bytes,
    pub kind: DocumentKind,
    /// Already-decoded text, when the caller has it. Skips the decoder.
    pub source_text: Option<String>,
    /// Submitter metadata, recorded as-is.
    pub origin: Option<String>,
}

/// Creates an analysis record. Steps, in order:
///
/// 1. decode the document to text (unless `source_text` is supplied);
/// 2. store the original bytes, obtaining the document key;
/// 3. extract keywords from the text;
/// 4. insert the record — the sole commit point.
///
/// A decode or storage failure aborts before step 4, so no record can
/// exist without a stored document. A stored object without a record
/// (insert failed after upload) is harmless and left to retention
/// tooling.
///
/// Returns the persisted record together with the decoded text.
pub async fn create_analysis(
    decoder: &dyn DocumentDecoder,
    store: &dyn ObjectStore,
    repo: &dyn AnalysisRepo,
    params: CreateAnalysisParams,
) -> Result<(AnalysisRecordRow, String), AppError> {
    let text = match params.source_text {
        Some(t) => t,
        None => decoder.decode(&params.bytes, params.kind)?,
    };

    let key = document_key(params.kind);
    store
        .put(&key, params.bytes, params.kind.content_type())
        .await?;

    let keywords = extract_keywords(&text);

    let record = AnalysisRecordRow {
        id: Uuid::new_v4(),
        keywords: keywords.into(),
        document_key: key,
        content_type: params.kind.content_type().to_string(),
        origin: params.origin,
        created_at: Utc::now(),
    };
    repo.insert(&record).await?;

    info!(
        "Created analysis {} ({} keywords, document {})",
        record.id,
        record.keywords.len(),
        record.document_key
    );
    Ok((record, text))
}

/// Fetches an analysis record and resolves a signed URL for its stored
/// document. The URL has an explicit TTL and is computed on every read.
pub async fn get_analysis(
    repo: &dyn AnalysisRepo,
    store: &dyn ObjectStore,
    id: Uuid,
    ttl_secs: u64,
) -> Result<(AnalysisRecordRow, String), AppError> {
    let record = repo
        .fetch(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;

    let url = store.signed_url(&record.document_key, ttl_secs).await?;
    Ok((record, url))
}

/// Builds the object-store key: date prefix plus a random UUID. The
/// user-supplied filename never participates, so keys cannot collide
/// or be forged across uploads.
fn document_key(kind: DocumentKind) -> String {
    format!(
        "resumes/{}/{}.{}",
        Utc::now().format("%Y/%m/%d"),
        Uuid::new_v4(),
        kind.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    struct MockDecoder {
        text: &'static str,
        fail: bool,
        calls: AtomicUsize,
    }

    impl MockDecoder {
        fn returning(text: &'static str) -> Self {
            Self {
                text,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                text: "",
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl DocumentDecoder for MockDecoder {
        fn decode(&self, _bytes: &[u8], _kind: DocumentKind) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Decode("simulated decoder failure".to_string()));
            }
            Ok(self.text.to_string())
        }
    }

    #[derive(Default)]
    struct MockStore {
        fail_put: bool,
        puts: Mutex<Vec<String>>,
    }

    impl MockStore {
        fn failing() -> Self {
            Self {
                fail_put: true,
                puts: Mutex::new(Vec::new()),
            }
        }

        fn stored_keys(&self) -> Vec<String> {
            self.puts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ObjectStore for MockStore {
        async fn put(&self, key: &str, _bytes: Bytes, _content_type: &str) -> Result<(), AppError> {
            if self.fail_put {
                return Err(AppError::Storage("simulated storage failure".to_string()));
            }
            self.puts.lock().unwrap().push(key.to_string());
            Ok(())
        }

        async fn signed_url(&self, key: &str, ttl_secs: u64) -> Result<String, AppError> {
            Ok(format!("https://storage.test/{key}?expires={ttl_secs}"))
        }
    }

    #[derive(Default)]
    struct MockRepo {
        rows: Mutex<HashMap<Uuid, AnalysisRecordRow>>,
    }

    impl MockRepo {
        fn count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AnalysisRepo for MockRepo {
        async fn insert(&self, record: &AnalysisRecordRow) -> Result<(), AppError> {
            self.rows
                .lock()
                .unwrap()
                .insert(record.id, record.clone());
            Ok(())
        }

        async fn fetch(&self, id: Uuid) -> Result<Option<AnalysisRecordRow>, AppError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }
    }

    fn params(kind: DocumentKind) -> CreateAnalysisParams {
        CreateAnalysisParams {
            bytes: Bytes::from_static(b"%fake-document%"),
            kind,
            source_text: None,
            origin: Some("127.0.0.1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_persists_extracted_keywords() {
        let decoder = MockDecoder::returning("Experienced Python developer with Docker skills");
        let store = MockStore::default();
        let repo = MockRepo::default();

        let (record, text) = create_analysis(&decoder, &store, &repo, params(DocumentKind::Pdf))
            .await
            .unwrap();

        assert_eq!(text, "Experienced Python developer with Docker skills");
        assert_eq!(
            record.keywords,
            vec!["developer", "docker", "experienced", "python", "skills"]
        );
        assert!(record.document_key.starts_with("resumes/"));
        assert!(record.document_key.ends_with(".pdf"));
        assert_eq!(record.content_type, "application/pdf");
        assert_eq!(record.origin.as_deref(), Some("127.0.0.1"));

        // Retrievable afterwards.
        let fetched = repo.fetch(record.id).await.unwrap().unwrap();
        assert_eq!(fetched.document_key, record.document_key);
    }

    #[tokio::test]
    async fn test_storage_failure_leaves_no_record() {
        let decoder = MockDecoder::returning("Python developer");
        let store = MockStore::failing();
        let repo = MockRepo::default();

        let result = create_analysis(&decoder, &store, &repo, params(DocumentKind::Pdf)).await;

        assert!(matches!(result, Err(AppError::Storage(_))));
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn test_decode_failure_aborts_before_storage() {
        let decoder = MockDecoder::failing();
        let store = MockStore::default();
        let repo = MockRepo::default();

        let result = create_analysis(&decoder, &store, &repo, params(DocumentKind::Docx)).await;

        assert!(matches!(result, Err(AppError::Decode(_))));
        assert!(store.stored_keys().is_empty());
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn test_supplied_source_text_skips_decoder() {
        let decoder = MockDecoder::failing(); // would fail if consulted
        let store = MockStore::default();
        let repo = MockRepo::default();

        let (record, _) = create_analysis(
            &decoder,
            &store,
            &repo,
            CreateAnalysisParams {
                bytes: Bytes::from_static(b"%fake-document%"),
                kind: DocumentKind::Docx,
                source_text: Some("Kubernetes operator experience".to_string()),
                origin: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(decoder.calls.load(Ordering::SeqCst), 0);
        assert_eq!(record.keywords, vec!["experience", "kubernetes", "operator"]);
        assert!(record.document_key.ends_with(".docx"));
    }

    #[tokio::test]
    async fn test_document_keys_are_unique_across_creates() {
        let decoder = MockDecoder::returning("Python");
        let store = MockStore::default();
        let repo = MockRepo::default();

        let (first, _) = create_analysis(&decoder, &store, &repo, params(DocumentKind::Pdf))
            .await
            .unwrap();
        let (second, _) = create_analysis(&decoder, &store, &repo, params(DocumentKind::Pdf))
            .await
            .unwrap();

        assert_ne!(first.document_key, second.document_key);
        assert_ne!(first.id, second.id);
        assert_eq!(store.stored_keys().len(), 2);
    }

    #[tokio::test]
    async fn test_unparseable_text_degrades_to_empty_keyword_set() {
        // Decoded text with no significant words yields an empty set, not
        // an error: the record is still created and matches nothing.
        let decoder = MockDecoder::returning("--- 2024 --- !!");
        let store = MockStore::default();
        let repo = MockRepo::default();

        let (record, _) = create_analysis(&decoder, &store, &repo, params(DocumentKind::Pdf))
            .await
            .unwrap();
        assert!(record.keywords.is_empty());
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let store = MockStore::default();
        let repo = MockRepo::default();

        let result = get_analysis(&repo, &store, Uuid::new_v4(), 900).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_resolves_signed_url_with_ttl() {
        let decoder = MockDecoder::returning("Python developer");
        let store = MockStore::default();
        let repo = MockRepo::default();

        let (record, _) = create_analysis(&decoder, &store, &repo, params(DocumentKind::Pdf))
            .await
            .unwrap();

        let (fetched, url) = get_analysis(&repo, &store, record.id, 900).await.unwrap();
        assert_eq!(fetched.id, record.id);
        assert!(url.contains(&record.document_key));
        assert!(url.contains("expires=900"));
    }
}
