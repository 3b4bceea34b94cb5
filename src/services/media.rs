//! Image resolution.
//!
//! Turns opaque image references into displayable handles. Image content is
//! embedded as data URIs; anything that cannot be fetched becomes the
//! placeholder so no broken image element is ever displayed.

use crate::models::carousel::ImageHandle;
use crate::services::backend::{ImageBlob, MatchBackend};
use base64::{engine::general_purpose::STANDARD, Engine};
use futures::future::join_all;

/// Encode image content as a data URI.
pub fn data_uri(content_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(data))
}

impl From<ImageBlob> for ImageHandle {
    fn from(blob: ImageBlob) -> Self {
        let data_uri = data_uri(&blob.content_type, &blob.data);
        ImageHandle::Blob {
            content_type: blob.content_type,
            data_uri,
        }
    }
}

/// Resolve one image reference.
///
/// An absent or empty reference yields the placeholder without a request.
/// A failed fetch, or one that returns no content, also yields the placeholder.
pub async fn resolve_image<B: MatchBackend + ?Sized>(
    backend: &B,
    reference: Option<&str>,
) -> ImageHandle {
    let key = match reference {
        Some(key) if !key.is_empty() => key,
        _ => return ImageHandle::Placeholder,
    };

    match backend.image_blob(key).await {
        Ok(blob) if !blob.data.is_empty() => blob.into(),
        Ok(_) => {
            log::warn!("[media] Image {} has no content, using placeholder", key);
            ImageHandle::Placeholder
        }
        Err(e) => {
            log::warn!("[media] Image {} failed to load, using placeholder: {}", key, e);
            ImageHandle::Placeholder
        }
    }
}

/// Resolve the set references among `refs` concurrently, keeping their order.
///
/// Empty entries are unset slots and are dropped, so the result has one
/// handle per non-empty reference.
pub async fn resolve_images<B: MatchBackend + ?Sized>(
    backend: &B,
    refs: &[String],
) -> Vec<ImageHandle> {
    let pending = refs
        .iter()
        .filter(|key| !key.is_empty())
        .map(|key| resolve_image(backend, Some(key.as_str())));

    join_all(pending).await
}
