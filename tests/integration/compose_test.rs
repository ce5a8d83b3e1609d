//! Compose flow integration tests
//!
//! Covers credential gating before any network activity, payload parsing for
//! both platforms, and the settings-to-credential wiring.

use redraft::{
    AppConfig, AppError, ComposerService, ConfigService, CredentialStore, GenAiError, Platform,
    SettingsUpdate,
};
use redraft_genai::parse_post;

fn isolated_service(config: &AppConfig) -> ComposerService {
    ComposerService::with_credentials(config, CredentialStore::with_env_vars(Vec::new()))
}

/// A payload shaped like the provider's reply for the ramen scenario.
const RAMEN_PAYLOAD: &str = r#"{
    "title": "🍜 巷口新開的拉麵店也太神！",
    "content": "姐妹們！今天路過市中心新開的拉麵店，湯頭濃到不行 😭✨\n\n真的一口入魂，排隊也值得！",
    "hashtags": ["拉麵", "美食推薦", "台北美食", "巷弄美食", "排隊美食", "湯頭", "日式料理", "吃貨日常", "美食地圖", "深夜食堂", "開箱", "今天吃什麼"],
    "imagePrompt": "steaming bowl of tonkotsu ramen, rich broth, cozy shop lighting"
}"#;

#[tokio::test]
async fn test_missing_credential_blocks_before_any_network_call() {
    let service = isolated_service(&AppConfig::default());
    assert!(!service.has_credential());

    let err = service
        .compose("Just tried the new ramen place downtown, incredible broth", Platform::Xiaohongshu)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Generation(GenAiError::MissingApiKey)
    ));

    // The blocking message is the one that reopens the settings surface
    let notice = ComposerService::notice_for(&err);
    assert!(ComposerService::is_credential_error(&notice.message));
}

#[test]
fn test_ramen_payload_meets_the_prompt_contract() {
    let post = parse_post(RAMEN_PAYLOAD).unwrap();
    assert!(!post.content.trim().is_empty());
    assert!(post.title.is_some());
    assert!(
        (10..=15).contains(&post.hashtags.len()),
        "expected 10-15 hashtags, got {}",
        post.hashtags.len()
    );
    assert!(post.image_prompt.is_some());
    assert!(post.image_url.is_none());
}

#[test]
fn test_partial_payload_never_yields_a_partial_post() {
    // A reply missing the required content field fails as a whole
    let err = parse_post(r#"{"title": "only a title", "hashtags": ["a"]}"#).unwrap_err();
    assert!(matches!(err, GenAiError::MalformedResponse(_)));
}

#[test]
fn test_persisted_api_key_flows_into_the_session() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("config.json");

    let mut configs = ConfigService::at(path).unwrap();
    configs
        .update_config(SettingsUpdate {
            api_key: Some("sk-from-settings".to_string()),
            ..Default::default()
        })
        .unwrap();

    let service = isolated_service(configs.get_config());
    assert!(service.has_credential());

    // Editing the key between calls takes effect immediately
    service.clear_api_key();
    assert!(!service.has_credential());
    service.set_api_key("sk-replacement");
    assert!(service.has_credential());
}

#[tokio::test]
async fn test_topic_fetch_never_fails() {
    let service = isolated_service(&AppConfig::default());
    // No credential configured: the fallback sentence comes back instead of an error
    let topic = service.fetch_topic(redraft::TopicCategory::Tech).await;
    assert_eq!(topic, redraft_genai::TOPIC_UNAVAILABLE);
}
