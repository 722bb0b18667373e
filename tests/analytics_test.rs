use std::sync::Arc;

use melody_syncer::{
    management::{AnalyticsSink, AnalyticsStore, JsonDocumentStore},
    types::AnalyticsCounters,
};
use tempfile::tempdir;

#[test]
fn test_counter_deltas() {
    assert_eq!(
        AnalyticsCounters::song(),
        AnalyticsCounters {
            iso_total_calls: 5,
            meso_total_calls: 1,
            meso_songs_converted: 1,
            meso_playlists_converted: 0,
        }
    );
    assert_eq!(
        AnalyticsCounters::playlist(12),
        AnalyticsCounters {
            iso_total_calls: 60,
            meso_total_calls: 1,
            meso_songs_converted: 12,
            meso_playlists_converted: 1,
        }
    );
}

#[test]
fn test_counters_use_document_field_names() {
    let json = serde_json::to_value(AnalyticsCounters::song()).unwrap();
    assert_eq!(json["ISOtotalCalls"], 5);
    assert_eq!(json["MESOtotalCalls"], 1);
    assert_eq!(json["MESOsongsConverted"], 1);
    assert_eq!(json["MESOplaylistsConverted"], 0);
}

#[tokio::test]
async fn test_store_starts_empty() {
    let dir = tempdir().unwrap();
    let store = JsonDocumentStore::new(dir.path().join("analytics.json"));

    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_store_accumulates_increments() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("analytics.json");
    let store = JsonDocumentStore::new(&path);

    store.increment(&AnalyticsCounters::song()).await.unwrap();
    store.increment(&AnalyticsCounters::playlist(3)).await.unwrap();

    let counters = store.load().await.unwrap().unwrap();
    assert_eq!(counters.iso_total_calls, 20);
    assert_eq!(counters.meso_total_calls, 2);
    assert_eq!(counters.meso_songs_converted, 4);
    assert_eq!(counters.meso_playlists_converted, 1);
    assert!(path.is_file());
}

#[tokio::test]
async fn test_store_rejects_corrupt_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("analytics.json");
    std::fs::write(&path, "not json").unwrap();

    let store = JsonDocumentStore::new(&path);
    assert!(store.load().await.is_err());
}

#[tokio::test]
async fn test_sink_concurrent_records_are_not_lost() {
    let dir = tempdir().unwrap();
    let store = Arc::new(JsonDocumentStore::new(dir.path().join("analytics.json")));
    let sink = AnalyticsSink::new(store.clone());

    let handles: Vec<_> = (0..10)
        .filter_map(|_| sink.record(AnalyticsCounters::song()))
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let counters = sink.snapshot().await.unwrap().unwrap();
    assert_eq!(counters.meso_songs_converted, 10);
    assert_eq!(counters.iso_total_calls, 50);
}

#[tokio::test]
async fn test_disabled_sink() {
    let sink = AnalyticsSink::disabled();

    assert!(!sink.is_enabled());
    assert!(sink.record(AnalyticsCounters::song()).is_none());
    assert!(sink.snapshot().await.is_err());
}

#[tokio::test]
async fn test_corrupt_document_names_its_location() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("analytics.json");
    std::fs::write(&path, "{ broken").unwrap();

    let store = JsonDocumentStore::new(&path);
    let location = store.location();
    assert_eq!(location, path.display().to_string());

    let err = store
        .increment(&AnalyticsCounters::song())
        .await
        .unwrap_err();
    assert!(err.to_string().contains(&location));
}

#[tokio::test]
async fn test_sink_swallows_store_failures() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("analytics.json");
    std::fs::write(&path, "{ broken").unwrap();

    let sink = AnalyticsSink::new(Arc::new(JsonDocumentStore::new(&path)));
    sink.record(AnalyticsCounters::song())
        .unwrap()
        .await
        .unwrap();

    // the document is left as it was
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ broken");
}
