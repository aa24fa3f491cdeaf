//! Upload coordination under realistic timing.
//!
//! The coordinator fans out every slot concurrently; these tests skew
//! completion order with injected latency and verify that the resolved list
//! still follows slot order, and that one slot's failure neither cancels nor
//! reorders its siblings.

use copperpot_core::{AssetRef, LocalAsset, MAX_ASSET_BYTES};
use copperpot_integration_tests::{MockAssetHost, hosted_url, local_asset};
use copperpot_merchant::assets::{AssetError, resolve, resolve_optional};

#[tokio::test]
async fn test_resolved_order_ignores_completion_order() {
    // Slot b is slow, slot c is fast: c completes first, b second.
    let host = MockAssetHost::new()
        .with_delay("b.jpg", 60)
        .with_delay("c.jpg", 5);
    let assets = [
        AssetRef::Remote("https://cdn.copperpot.test/a.jpg".to_string()),
        local_asset("b.jpg"),
        local_asset("c.jpg"),
        AssetRef::Remote("https://cdn.copperpot.test/d.jpg".to_string()),
    ];

    let resolved = resolve(&host, &assets).await.unwrap();

    assert_eq!(host.completion_order(), ["c.jpg", "b.jpg"]);
    assert_eq!(
        resolved,
        [
            "https://cdn.copperpot.test/a.jpg".to_string(),
            hosted_url("b.jpg"),
            hosted_url("c.jpg"),
            "https://cdn.copperpot.test/d.jpg".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_failed_slot_does_not_cancel_siblings() {
    let host = MockAssetHost::new()
        .with_failure("bad.jpg")
        .with_delay("slow.jpg", 40);
    let assets = [
        local_asset("bad.jpg"),
        local_asset("slow.jpg"),
        local_asset("fine.jpg"),
    ];

    let err = resolve(&host, &assets).await.unwrap_err();
    assert!(matches!(err, AssetError::Rejected { .. }));

    // Every sibling still ran to completion, including the slow one.
    let completed = host.completion_order();
    assert!(completed.contains(&"slow.jpg".to_string()));
    assert!(completed.contains(&"fine.jpg".to_string()));
}

#[tokio::test]
async fn test_oversized_slot_fails_before_any_bytes_move() {
    let host = MockAssetHost::new();
    let assets = [
        AssetRef::Local(LocalAsset {
            filename: "huge.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![0u8; MAX_ASSET_BYTES + 1],
        }),
        local_asset("ok.jpg"),
    ];

    let err = resolve(&host, &assets).await.unwrap_err();
    assert!(
        matches!(err, AssetError::Oversized { filename, size } if filename == "huge.jpg" && size == MAX_ASSET_BYTES + 1)
    );
    // The oversized file never reached the host; the sibling did.
    assert_eq!(host.completion_order(), ["ok.jpg"]);
}

#[tokio::test]
async fn test_optional_slots_resolve_positionally() {
    let host = MockAssetHost::new().with_delay("red.jpg", 30);
    let slots = [
        Some(local_asset("red.jpg")),
        None,
        Some(AssetRef::Remote("https://cdn.copperpot.test/blue.jpg".to_string())),
        None,
    ];

    let resolved = resolve_optional(&host, &slots).await.unwrap();
    assert_eq!(
        resolved,
        [
            Some(hosted_url("red.jpg")),
            None,
            Some("https://cdn.copperpot.test/blue.jpg".to_string()),
            None,
        ]
    );
}
