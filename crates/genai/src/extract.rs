//! Image Response Extraction
//!
//! The image-capable endpoint has returned inconsistent payload shapes across
//! versions and regions. Extraction is an ordered list of pure strategies
//! tried against every part of the first candidate, followed by a text
//! salvage pass; the first hit wins. Adding a shape is a one-line change to
//! [`PART_EXTRACTORS`].

use serde_json::Value;

use crate::types::ImageReference;

type PartExtractor = fn(&Value) -> Option<ImageReference>;

/// Ordered extraction strategies, applied per part in declared order.
pub const PART_EXTRACTORS: &[(&str, PartExtractor)] = &[
    ("inlineData", inline_data_camel),
    ("inline_data", inline_data_snake),
    ("imageUrl", image_url_camel),
    ("image_url", image_url_snake),
    ("fileData", file_data),
    ("image", bare_image),
];

/// Extract a displayable image reference from a response envelope, or `None`
/// when the response carries no recognizable image.
pub fn extract_image(response: &Value) -> Option<ImageReference> {
    let candidates = candidates_of(response)?;
    let first = candidates.first()?;
    let content = first.get("content").unwrap_or(first);
    let parts = content
        .get("parts")
        .or_else(|| content.get("data").and_then(|d| d.get("parts")))
        .and_then(Value::as_array);

    if let Some(parts) = parts {
        for part in parts {
            for (_, extractor) in PART_EXTRACTORS {
                if let Some(reference) = extractor(part) {
                    return Some(reference);
                }
            }
        }
    }

    text_salvage(response, parts)
}

fn candidates_of(response: &Value) -> Option<&Vec<Value>> {
    let list = response
        .get("candidates")
        .or_else(|| response.get("data").and_then(|d| d.get("candidates")))?
        .as_array()?;
    if list.is_empty() {
        None
    } else {
        Some(list)
    }
}

/// Inline base64 bytes, camelCase field names.
fn inline_data_camel(part: &Value) -> Option<ImageReference> {
    let inline = part.get("inlineData")?;
    let data = inline.get("data")?.as_str()?;
    let mime = inline
        .get("mimeType")
        .and_then(Value::as_str)
        .unwrap_or("image/png");
    Some(ImageReference::inline(mime, data))
}

/// Inline base64 bytes, snake_case field names (either casing for the mime).
fn inline_data_snake(part: &Value) -> Option<ImageReference> {
    let inline = part.get("inline_data")?;
    let data = inline.get("data")?.as_str()?;
    let mime = inline
        .get("mime_type")
        .or_else(|| inline.get("mimeType"))
        .and_then(Value::as_str)
        .unwrap_or("image/png");
    Some(ImageReference::inline(mime, data))
}

/// Hosted URL under `imageUrl` (either an object with `url` or a bare string).
fn image_url_camel(part: &Value) -> Option<ImageReference> {
    hosted_url(part.get("imageUrl")?)
}

/// Hosted URL under `image_url`.
fn image_url_snake(part: &Value) -> Option<ImageReference> {
    hosted_url(part.get("image_url")?)
}

fn hosted_url(value: &Value) -> Option<ImageReference> {
    let url = value
        .get("url")
        .and_then(Value::as_str)
        .or_else(|| value.as_str())?;
    Some(ImageReference::ready(url))
}

/// File-reference URI under `fileData`.
fn file_data(part: &Value) -> Option<ImageReference> {
    let file = part.get("fileData")?;
    let uri = file
        .get("fileUri")
        .or_else(|| file.get("uri"))
        .and_then(Value::as_str)?;
    Some(ImageReference::ready(uri))
}

/// A bare `image` field: a string (raw base64 or a finished data URL) or an
/// object carrying `data` and an optional mime type.
fn bare_image(part: &Value) -> Option<ImageReference> {
    let image = part.get("image")?;
    if let Some(text) = image.as_str() {
        if text.starts_with("data:") {
            return Some(ImageReference::ready(text));
        }
        return Some(ImageReference::inline("image/png", text));
    }
    let data = image.get("data")?.as_str()?;
    let mime = image
        .get("mimeType")
        .and_then(Value::as_str)
        .unwrap_or("image/png");
    Some(ImageReference::inline(mime, data))
}

/// Last resort: a data URL or a bare base64 payload misplaced in a text
/// field, either at the top level of the envelope or inside a part.
fn text_salvage(response: &Value, parts: Option<&Vec<Value>>) -> Option<ImageReference> {
    let top_level = response
        .get("text")
        .or_else(|| response.get("data").and_then(|d| d.get("text")))
        .and_then(Value::as_str);
    if let Some(reference) = top_level.and_then(salvage_text) {
        return Some(reference);
    }

    for part in parts.into_iter().flatten() {
        if let Some(reference) = part
            .get("text")
            .and_then(Value::as_str)
            .and_then(salvage_text)
        {
            return Some(reference);
        }
    }
    None
}

fn salvage_text(text: &str) -> Option<ImageReference> {
    if text.starts_with("data:image") {
        return Some(ImageReference::ready(text));
    }
    if looks_like_base64(text) {
        return Some(ImageReference::inline("image/png", text));
    }
    None
}

/// Heuristic for a misplaced base64 payload: long and drawn purely from the
/// base64 alphabet. Ordinary prose fails the charset check via spaces and
/// punctuation.
fn looks_like_base64(text: &str) -> bool {
    text.len() > 100
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(part: Value) -> Value {
        json!({ "candidates": [{ "content": { "parts": [part] } }] })
    }

    #[test]
    fn test_inline_data_camel_case() {
        let response = envelope(json!({
            "inlineData": { "mimeType": "image/jpeg", "data": "Zm9v" }
        }));
        let reference = extract_image(&response).unwrap();
        assert_eq!(reference.as_str(), "data:image/jpeg;base64,Zm9v");
    }

    #[test]
    fn test_inline_data_snake_case_defaults_mime() {
        let response = envelope(json!({
            "inline_data": { "data": "YmFy" }
        }));
        let reference = extract_image(&response).unwrap();
        assert_eq!(reference.as_str(), "data:image/png;base64,YmFy");
    }

    #[test]
    fn test_image_url_object_and_bare_string() {
        let object = envelope(json!({ "imageUrl": { "url": "https://img.example/a.png" } }));
        assert_eq!(
            extract_image(&object).unwrap().as_str(),
            "https://img.example/a.png"
        );

        let bare = envelope(json!({ "image_url": "https://img.example/b.png" }));
        assert_eq!(
            extract_image(&bare).unwrap().as_str(),
            "https://img.example/b.png"
        );
    }

    #[test]
    fn test_file_data_uri_variants() {
        let file_uri = envelope(json!({ "fileData": { "fileUri": "https://files.example/c" } }));
        assert_eq!(
            extract_image(&file_uri).unwrap().as_str(),
            "https://files.example/c"
        );

        let uri = envelope(json!({ "fileData": { "uri": "https://files.example/d" } }));
        assert_eq!(
            extract_image(&uri).unwrap().as_str(),
            "https://files.example/d"
        );
    }

    #[test]
    fn test_bare_image_string_wraps_raw_base64() {
        let response = envelope(json!({ "image": "QUJD" }));
        assert_eq!(
            extract_image(&response).unwrap().as_str(),
            "data:image/png;base64,QUJD"
        );

        let finished = envelope(json!({ "image": "data:image/webp;base64,QUJD" }));
        assert_eq!(
            extract_image(&finished).unwrap().as_str(),
            "data:image/webp;base64,QUJD"
        );
    }

    #[test]
    fn test_text_salvage_of_misplaced_base64() {
        let payload = "A".repeat(120);
        let response = envelope(json!({ "text": payload }));
        let reference = extract_image(&response).unwrap();
        assert_eq!(
            reference.as_str(),
            format!("data:image/png;base64,{}", payload)
        );
    }

    #[test]
    fn test_text_salvage_ignores_prose() {
        let response = envelope(json!({
            "text": "Here is a lovely description of an image, but sadly no image at all. It rambles on for quite a while to pass the length check."
        }));
        assert_eq!(extract_image(&response), None);
    }

    #[test]
    fn test_part_shapes_win_over_text_salvage() {
        let response = json!({ "candidates": [{ "content": { "parts": [
            { "text": "B".repeat(120) },
            { "inlineData": { "mimeType": "image/gif", "data": "R0lG" } }
        ]}}]});
        // The declared shape list runs over every part before salvage kicks in
        assert_eq!(
            extract_image(&response).unwrap().as_str(),
            "data:image/gif;base64,R0lG"
        );
    }

    #[test]
    fn test_candidates_nested_under_data() {
        let response = json!({ "data": { "candidates": [{ "content": { "parts": [
            { "inlineData": { "data": "eHl6" } }
        ]}}]}});
        assert!(extract_image(&response).is_some());
    }

    #[test]
    fn test_candidate_without_content_wrapper() {
        let response = json!({ "candidates": [{ "parts": [
            { "inlineData": { "data": "cXdl" } }
        ]}]});
        assert!(extract_image(&response).is_some());
    }

    #[test]
    fn test_empty_candidates_and_empty_parts_miss() {
        assert_eq!(extract_image(&json!({ "candidates": [] })), None);
        assert_eq!(
            extract_image(&json!({ "candidates": [{ "content": { "parts": [] } }] })),
            None
        );
        assert_eq!(extract_image(&json!({})), None);
    }
}
