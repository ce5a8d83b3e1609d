//! Image variant chain integration tests
//!
//! Exercises the request-shape fallback with scripted attempts: ordering,
//! soft misses, exhaustion classification, and the post staying intact when
//! no variant ever yields an image.

use serde_json::json;

use redraft::{ImageErrorKind, Post};
use redraft_genai::{extract_image, request_variants, ImageReference, VariantChain};

fn chain() -> VariantChain {
    VariantChain::new(request_variants("steaming ramen bowl", 0.7))
}

#[test]
fn test_variants_attempted_in_declared_order_until_the_nth_succeeds() {
    let c = chain();
    let mut attempted: Vec<&'static str> = Vec::new();

    let result = c.run_sync(|variant| {
        attempted.push(variant.name);
        if attempted.len() < 3 {
            Err(format!("variant {} unsupported", variant.name))
        } else {
            Ok(Some(ImageReference::inline("image/png", "Zm9v")))
        }
    });

    assert_eq!(
        attempted,
        vec!["modal-config", "bare-contents", "snake-case-config"]
    );
    assert_eq!(result.unwrap().as_str(), "data:image/png;base64,Zm9v");
}

#[test]
fn test_success_short_circuits_remaining_variants() {
    let c = chain();
    let mut calls = 0;
    let result = c.run_sync(|_| {
        calls += 1;
        Ok(Some(ImageReference::ready("https://img.example/ok.png")))
    });
    assert_eq!(calls, 1);
    assert!(result.is_ok());
}

#[test]
fn test_extraction_runs_against_real_envelopes_through_the_chain() {
    let c = chain();
    // First variant's response carries no parts; the second returns inline bytes
    let responses = [
        json!({ "candidates": [{ "content": { "parts": [] } }] }),
        json!({ "candidates": [{ "content": { "parts": [
            { "inline_data": { "mime_type": "image/webp", "data": "d2Vi" } }
        ]}}]}),
    ];
    let mut index = 0;

    let result = c.run_sync(|_| {
        let response = &responses[index.min(responses.len() - 1)];
        index += 1;
        Ok(extract_image(response))
    });

    assert_eq!(index, 2);
    assert_eq!(
        result.unwrap().as_str(),
        "data:image/webp;base64,d2Vi"
    );
}

#[test]
fn test_exhaustion_classifies_the_last_captured_error() {
    let c = chain();
    let err = c
        .run_sync(|variant| match variant.name {
            "snake-case-config" => Err("caller does not have permission".to_string()),
            _ => Err("transient transport failure".to_string()),
        })
        .unwrap_err();
    assert_eq!(err.kind, ImageErrorKind::PermissionDenied);

    let err = c
        .run_sync(|_| Err("quota exhausted, enable billing".to_string()))
        .unwrap_err();
    assert_eq!(err.kind, ImageErrorKind::QuotaOrBilling);

    let err = c
        .run_sync(|_| Err("some totally novel failure".to_string()))
        .unwrap_err();
    assert_eq!(err.kind, ImageErrorKind::Unknown);
    assert_eq!(err.message, "some totally novel failure");
}

#[test]
fn test_empty_parts_on_every_variant_leaves_the_post_untouched() {
    let c = chain();
    let post = Post {
        title: Some("🍜 巷口新開的拉麵店也太神！".to_string()),
        content: "姐妹們！湯頭濃到不行 😭✨".to_string(),
        hashtags: vec!["拉麵".to_string()],
        image_prompt: Some("steaming ramen bowl".to_string()),
        image_url: None,
    };

    let empty = json!({ "candidates": [{ "content": { "parts": [] } }] });
    let mut calls = 0;
    let result = c.run_sync(|_| {
        calls += 1;
        Ok(extract_image(&empty))
    });

    // Every variant was tried, all soft-missed, and the call failed as a whole
    assert_eq!(calls, 3);
    let err = result.unwrap_err();
    assert_eq!(err.kind, ImageErrorKind::Unknown);

    // The caller keeps the prompt for a manual retry; the post gains no image
    assert_eq!(post.image_prompt.as_deref(), Some("steaming ramen bowl"));
    assert!(post.image_url.is_none());
}

#[tokio::test]
async fn test_async_chain_behaves_like_the_sync_twin() {
    let c = chain();
    let mut attempted: Vec<&'static str> = Vec::new();

    let result = c
        .run(|variant| {
            attempted.push(variant.name);
            let name = variant.name;
            async move {
                if name == "bare-contents" {
                    Ok(Some(ImageReference::ready("https://img.example/async.png")))
                } else {
                    Ok(None)
                }
            }
        })
        .await;

    assert_eq!(attempted, vec!["modal-config", "bare-contents"]);
    assert_eq!(result.unwrap().as_str(), "https://img.example/async.png");
}
