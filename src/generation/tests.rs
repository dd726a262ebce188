use super::*;
use crate::generation::client::CANNED_EXPLANATION;

#[tokio::test]
async fn test_canned_generator_is_constant() {
    let generator = CannedGenerator::new();

    let first = generator.generate("a", 10).await.unwrap();
    let second = generator.generate("something else", 500).await.unwrap();

    assert_eq!(first, CANNED_EXPLANATION);
    assert_eq!(first, second);
    assert_eq!(generator.model(), CannedGenerator::MODEL);
}

#[tokio::test]
async fn test_mock_generator_records_prompts() {
    let generator = MockGenerator::new();

    let reply = generator.generate("hello", 256).await.unwrap();
    assert_eq!(reply, "explanation #1");

    let reply = generator.generate("again", 64).await.unwrap();
    assert_eq!(reply, "explanation #2");

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0], ("hello".to_string(), 256));
    assert_eq!(prompts[1].1, 64);
}

#[tokio::test]
async fn test_mock_generator_failure() {
    let generator = MockGenerator::failing();

    let result = generator.generate("hello", 256).await;
    assert!(matches!(result, Err(GenerationError::Provider(_))));
    assert_eq!(generator.call_count(), 1);

    generator.set_failing(false);
    assert!(generator.generate("hello", 256).await.is_ok());
}

#[test]
fn test_genai_generator_model_name() {
    let generator = GenaiGenerator::new("gpt-4o-mini");
    assert_eq!(generator.model(), "gpt-4o-mini");
}
