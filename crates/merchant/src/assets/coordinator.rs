//! Order-preserving resolution of mixed local/remote asset lists.

use copperpot_core::AssetRef;
use futures::future;
use tracing::{debug, instrument};

use super::{AssetError, AssetHost};

/// Resolve an asset list to remote URLs, uploading only the local entries.
///
/// The result has the same length and order as the input: output order is
/// fixed by slot index, never by upload completion order. Remote entries pass
/// through without touching the host. Oversized local entries fail their slot
/// before any upload is attempted, without cancelling sibling uploads; once
/// every slot has settled, the first failure (in slot order) fails the call.
///
/// # Errors
///
/// Returns the first slot's [`AssetError`] if any slot failed.
#[instrument(skip(host, assets), fields(total = assets.len()))]
pub async fn resolve<H>(host: &H, assets: &[AssetRef]) -> Result<Vec<String>, AssetError>
where
    H: AssetHost + ?Sized,
{
    let pending = assets.iter().filter(|a| a.needs_upload()).count();
    debug!(pending, "resolving asset list");

    let slots = assets.iter().map(|asset| resolve_slot(host, asset));
    future::join_all(slots).await.into_iter().collect()
}

/// [`resolve`] over a list where some slots legitimately have no asset.
///
/// Used for the parent-type image list, which is positional and parallel to
/// the parent type list; a type without an image stays `None`.
///
/// # Errors
///
/// Returns the first slot's [`AssetError`] if any slot failed.
#[instrument(skip(host, assets), fields(total = assets.len()))]
pub async fn resolve_optional<H>(
    host: &H,
    assets: &[Option<AssetRef>],
) -> Result<Vec<Option<String>>, AssetError>
where
    H: AssetHost + ?Sized,
{
    let slots = assets.iter().map(|slot| async move {
        match slot {
            Some(asset) => resolve_slot(host, asset).await.map(Some),
            None => Ok(None),
        }
    });
    future::join_all(slots).await.into_iter().collect()
}

async fn resolve_slot<H>(host: &H, asset: &AssetRef) -> Result<String, AssetError>
where
    H: AssetHost + ?Sized,
{
    match asset {
        AssetRef::Remote(url) => Ok(url.clone()),
        AssetRef::Local(local) => {
            if local.oversized() {
                return Err(AssetError::Oversized {
                    filename: local.filename.clone(),
                    size: local.bytes.len(),
                });
            }
            host.upload(local).await
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use copperpot_core::{LocalAsset, MAX_ASSET_BYTES};

    use super::*;

    /// Records every upload attempt; never actually uploads anywhere.
    #[derive(Default)]
    struct RecordingHost {
        attempted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AssetHost for RecordingHost {
        async fn upload(&self, asset: &LocalAsset) -> Result<String, AssetError> {
            self.attempted
                .lock()
                .unwrap()
                .push(asset.filename.clone());
            Ok(format!("https://cdn.example.com/{}", asset.filename))
        }
    }

    fn local(name: &str, len: usize) -> AssetRef {
        AssetRef::Local(LocalAsset {
            filename: name.to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![0u8; len],
        })
    }

    #[tokio::test]
    async fn test_remote_entries_pass_through_without_upload() {
        let host = RecordingHost::default();
        let assets = [
            AssetRef::Remote("https://cdn.example.com/kept.jpg".to_string()),
            local("new.jpg", 100),
        ];
        let resolved = resolve(&host, &assets).await.unwrap();
        assert_eq!(
            resolved,
            ["https://cdn.example.com/kept.jpg", "https://cdn.example.com/new.jpg"]
        );
        assert_eq!(*host.attempted.lock().unwrap(), ["new.jpg"]);
    }

    #[tokio::test]
    async fn test_oversized_slot_fails_without_aborting_siblings() {
        let host = RecordingHost::default();
        let assets = [
            local("ok.jpg", 100),
            local("huge.jpg", MAX_ASSET_BYTES + 1),
            local("alsook.jpg", 100),
        ];
        let err = resolve(&host, &assets).await.unwrap_err();
        assert!(matches!(err, AssetError::Oversized { size, .. } if size == MAX_ASSET_BYTES + 1));
        // Both healthy siblings were still attempted.
        let attempted = host.attempted.lock().unwrap();
        assert!(attempted.contains(&"ok.jpg".to_string()));
        assert!(attempted.contains(&"alsook.jpg".to_string()));
    }

    #[tokio::test]
    async fn test_optional_slots_stay_none() {
        let host = RecordingHost::default();
        let assets = [
            Some(local("red.jpg", 50)),
            None,
            Some(AssetRef::Remote("https://cdn.example.com/blue.jpg".to_string())),
        ];
        let resolved = resolve_optional(&host, &assets).await.unwrap();
        assert_eq!(
            resolved,
            [
                Some("https://cdn.example.com/red.jpg".to_string()),
                None,
                Some("https://cdn.example.com/blue.jpg".to_string()),
            ]
        );
    }
}
