use passdns_application::ports::PtrStore;
use passdns_application::services::PassiveCache;
use passdns_infrastructure::store::RedbPtrStore;
use std::sync::Arc;

#[tokio::test]
async fn test_records_survive_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("passdns.redb");

    {
        let store = RedbPtrStore::open(&path).unwrap();
        store
            .put("4.3.2.1.in-addr.arpa.", "host.example.com.")
            .await
            .unwrap();
        store
            .put("8.8.8.8.in-addr.arpa.", "dns.google.")
            .await
            .unwrap();
    }

    let store = RedbPtrStore::open(&path).unwrap();
    let mut records = store.load_all().await.unwrap();
    records.sort();

    assert_eq!(
        records,
        vec![
            ("4.3.2.1.in-addr.arpa.".to_string(), "host.example.com.".to_string()),
            ("8.8.8.8.in-addr.arpa.".to_string(), "dns.google.".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_put_overwrites_existing_mapping() {
    let tmp = tempfile::tempdir().unwrap();
    let store = RedbPtrStore::open(tmp.path().join("passdns.redb")).unwrap();

    store.put("4.3.2.1.in-addr.arpa.", "old.example.").await.unwrap();
    store.put("4.3.2.1.in-addr.arpa.", "new.example.").await.unwrap();

    assert_eq!(
        store.load_all().await.unwrap(),
        vec![("4.3.2.1.in-addr.arpa.".to_string(), "new.example.".to_string())]
    );
}

#[tokio::test]
async fn test_passive_cache_warms_from_store() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("passdns.redb");

    {
        let cache = PassiveCache::with_store(Arc::new(RedbPtrStore::open(&path).unwrap()));
        cache
            .remember("4.3.2.1.in-addr.arpa.", "host.example.com.")
            .await
            .unwrap();
    }

    let cache = PassiveCache::with_store(Arc::new(RedbPtrStore::open(&path).unwrap()));
    assert_eq!(cache.load().await.unwrap(), 1);
    assert_eq!(
        cache.lookup("4.3.2.1.in-addr.arpa.").as_deref(),
        Some("host.example.com.")
    );
}

#[test]
fn test_open_in_missing_directory_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let result = RedbPtrStore::open(tmp.path().join("missing").join("passdns.redb"));
    assert!(result.is_err());
}
