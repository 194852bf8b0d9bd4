//! Integration tests for the file-backed channel source.

use std::path::PathBuf;

use anyhow::Result;
use surge_source::FileSource;
use surge_store::ChannelStore;

const FIRST_DUMP: &str = r#"{
    "channels": [
        {
            "active": true,
            "remote_pubkey": "0270685ca81a8e4d4d01beec5781f4cc924684072ae52c507f8ebe9daf0caaab7b",
            "chan_id": "124244814004224",
            "capacity": "1000000",
            "local_balance": "600000",
            "remote_balance": "400000",
            "uptime": "950",
            "lifetime": "1000"
        },
        {
            "active": false,
            "remote_pubkey": "03c3d14714b78f03fd6ea4997c2b540a4139258249ea1d625c03b68bb82f85d0ea",
            "chan_id": "124244814004225",
            "capacity": "500000",
            "local_balance": "100000",
            "remote_balance": "400000",
            "uptime": "100",
            "lifetime": "1000"
        }
    ]
}"#;

const SECOND_DUMP: &str = r#"{
    "channels": [
        {
            "active": true,
            "remote_pubkey": "0270685ca81a8e4d4d01beec5781f4cc924684072ae52c507f8ebe9daf0caaab7b",
            "chan_id": "124244814004224",
            "capacity": "1000000",
            "local_balance": "250000",
            "remote_balance": "750000",
            "uptime": "990",
            "lifetime": "1040"
        }
    ]
}"#;

fn dump_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("surge-{}-{}.json", name, std::process::id()))
}

#[tokio::test]
async fn test_file_source_drives_full_cycle() -> Result<()> {
    println!("\nTesting fetch/reconcile from a channel dump on disk...");

    let path = dump_path("cycle");
    std::fs::write(&path, FIRST_DUMP)?;

    let mut store = ChannelStore::new(Box::new(FileSource::new(path.clone())));

    println!("  - First refresh...");
    let summary = store.refresh().await?;
    assert_eq!(summary.inserted, 2);
    assert_eq!(store.total_outbound(), 700_000);
    assert_eq!(store.total_inbound(), 800_000);
    assert_eq!(store.get("124244814004224").unwrap().uptime_percent, 95.0);

    println!("  - Second refresh after the dump changed...");
    std::fs::write(&path, SECOND_DUMP)?;
    let summary = store.refresh().await?;
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.removed, 1);
    assert_eq!(store.collection().len(), 1);
    assert_eq!(store.get("124244814004224").unwrap().local_balance, 250_000);

    std::fs::remove_file(&path).ok();
    println!("  ✓ dump-driven cycles reconciled");
    Ok(())
}

#[tokio::test]
async fn test_missing_dump_surfaces_an_error() -> Result<()> {
    println!("\nTesting a missing channel dump...");

    let path = dump_path("missing");
    let mut store = ChannelStore::new(Box::new(FileSource::new(path)));

    assert!(store.refresh().await.is_err());
    assert!(store.collection().is_empty());

    println!("  ✓ refresh failed without corrupting state");
    Ok(())
}
