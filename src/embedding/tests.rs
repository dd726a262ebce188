use super::http::{EmbeddingDatum, EmbeddingRequest, EmbeddingResponse, collect_vectors};
use super::*;
use crate::constants::DEFAULT_EMBEDDING_DIM;

#[tokio::test]
async fn test_stub_dimension_and_determinism() {
    let embedder = StubEmbedder::new();

    let a = embedder.embed("Miso: glutamic acid").await.unwrap();
    let b = embedder.embed("Miso: glutamic acid").await.unwrap();
    let c = embedder.embed("Kombu (Kelp): mannitol").await.unwrap();

    assert_eq!(a.len(), DEFAULT_EMBEDDING_DIM);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(embedder.is_stub());
}

#[tokio::test]
async fn test_stub_vectors_are_normalized() {
    let embedder = StubEmbedder::with_dim(64);
    let v = embedder.embed("Soy Sauce").await.unwrap();
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-4);
    assert_eq!(embedder.embedding_dim(), 64);
}

#[tokio::test]
async fn test_default_batch_preserves_order() {
    let embedder = StubEmbedder::new();
    let texts = vec!["a".to_string(), "b".to_string(), "c".to_string()];

    let batch = embedder.embed_batch(&texts).await.unwrap();
    assert_eq!(batch.len(), 3);
    for (text, vector) in texts.iter().zip(&batch) {
        assert_eq!(vector, &embedder.vector_for(text));
    }
}

#[tokio::test]
async fn test_mock_records_calls_and_fails_on_demand() {
    let embedder = MockEmbedder::new();
    embedder.embed("Miso").await.unwrap();
    assert_eq!(embedder.calls(), vec!["Miso".to_string()]);

    embedder.set_failing(true);
    let err = embedder.embed("Miso").await.unwrap_err();
    assert!(matches!(err, EmbeddingError::RequestFailed { .. }));
    assert_eq!(embedder.call_count(), 2);
}

#[test]
fn test_validate_embedding_dim() {
    assert!(validate_embedding_dim(&[0.0; 4], 4).is_ok());
    let err = validate_embedding_dim(&[0.0; 3], 4).unwrap_err();
    assert!(matches!(
        err,
        EmbeddingError::InvalidDimension {
            expected: 4,
            actual: 3
        }
    ));
}

#[test]
fn test_http_config_validation() {
    assert!(HttpEmbedderConfig::new("http://localhost:8080/v1/embeddings")
        .validate()
        .is_ok());

    assert!(HttpEmbedderConfig::new("localhost:8080").validate().is_err());
    assert!(HttpEmbedderConfig::new("https://api.example.com/v1/embeddings")
        .model("  ")
        .validate()
        .is_err());
    assert!(HttpEmbedderConfig::new("https://api.example.com/v1/embeddings")
        .embedding_dim(0)
        .validate()
        .is_err());
}

#[test]
fn test_http_embedder_rejects_invalid_config() {
    let result = HttpEmbedder::new(HttpEmbedderConfig::new("ftp://nope"));
    assert!(matches!(result, Err(EmbeddingError::InvalidConfig { .. })));
}

#[test]
fn test_http_embedder_reports_dimension() {
    let embedder = HttpEmbedder::new(
        HttpEmbedderConfig::new("http://localhost:9/v1/embeddings").embedding_dim(768),
    )
    .unwrap();
    assert_eq!(embedder.embedding_dim(), 768);
    assert!(!embedder.is_stub());
}

#[test]
fn test_request_shape() {
    let input = vec!["Miso: glutamic acid".to_string()];
    let body = serde_json::to_value(EmbeddingRequest {
        model: "bge-small-en-v1.5",
        input: &input,
    })
    .unwrap();

    assert_eq!(
        body,
        serde_json::json!({"model": "bge-small-en-v1.5", "input": ["Miso: glutamic acid"]})
    );
}

#[test]
fn test_collect_vectors_orders_by_index() {
    let response: EmbeddingResponse = serde_json::from_value(serde_json::json!({
        "object": "list",
        "data": [
            {"object": "embedding", "index": 1, "embedding": [0.0, 1.0]},
            {"object": "embedding", "index": 0, "embedding": [1.0, 0.0]}
        ],
        "model": "bge-small-en-v1.5"
    }))
    .unwrap();

    let vectors = collect_vectors(response, 2, 2).unwrap();
    assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
}

#[test]
fn test_collect_vectors_count_mismatch() {
    let response = EmbeddingResponse {
        data: vec![EmbeddingDatum {
            index: 0,
            embedding: vec![1.0, 0.0],
        }],
    };
    let err = collect_vectors(response, 2, 2).unwrap_err();
    assert!(matches!(err, EmbeddingError::MalformedResponse { .. }));
}

#[test]
fn test_collect_vectors_dimension_mismatch() {
    let response = EmbeddingResponse {
        data: vec![EmbeddingDatum {
            index: 0,
            embedding: vec![1.0, 0.0, 0.0],
        }],
    };
    let err = collect_vectors(response, 1, 2).unwrap_err();
    assert!(matches!(err, EmbeddingError::InvalidDimension { .. }));
}
