use std::fs;

use tempfile::TempDir;

use localqa_core::embedder::HashEmbedder;
use localqa_core::store::{load_txt_directory, MemoryStore};
use localqa_core::traits::{DocumentStore, Embedder};
use localqa_core::types::{Document, DocumentId};

fn doc(id: &str, content: &str) -> Document {
    let now = chrono::Utc::now();
    Document {
        id: DocumentId::new(id),
        title: id.to_string(),
        content: content.to_string(),
        created_at: now,
        updated_at: now,
        summary: None,
    }
}

#[test]
fn load_txt_directory_reads_nested_files() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("a.txt"), "alpha bravo").unwrap();
    fs::create_dir(dir.join("sub")).unwrap();
    fs::write(dir.join("sub").join("b.txt"), "charlie delta").unwrap();
    fs::write(dir.join("ignored.md"), "not a corpus file").unwrap();

    let docs = load_txt_directory(dir).expect("load");

    assert_eq!(docs.len(), 2, "only .txt files become documents");
    let titles: Vec<&str> = docs.iter().map(|d| d.title.as_str()).collect();
    assert!(titles.contains(&"a"));
    assert!(titles.contains(&"b"));
}

#[tokio::test]
async fn memory_store_last_write_wins() {
    let store = MemoryStore::new();
    store.insert(doc("notes", "first version")).unwrap();
    store.insert(doc("notes", "second version")).unwrap();

    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].content, "second version");

    let fetched = store
        .get_by_id(&DocumentId::new("notes"))
        .await
        .unwrap()
        .expect("present");
    assert_eq!(fetched.content, "second version");

    store.remove(&DocumentId::new("notes")).unwrap();
    assert!(store.is_empty());
}

#[tokio::test]
async fn hash_embedder_is_deterministic_and_fixed_dim() {
    let embedder = HashEmbedder::new(64);
    let a = embedder.embed("the capital of France").await.unwrap();
    let b = embedder.embed("the capital of France").await.unwrap();
    assert_eq!(a, b, "identical input embeds identically");
    assert_eq!(a.len(), embedder.dim());

    let other = embedder.embed("completely different text").await.unwrap();
    assert_eq!(other.len(), embedder.dim());
    assert_ne!(a, other);
}

#[tokio::test]
async fn hash_embedder_output_is_normalized() {
    let embedder = HashEmbedder::new(32);
    let v = embedder.embed("some sample sentence here").await.unwrap();
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-3, "norm was {norm}");
}

#[test]
fn expand_path_passes_plain_paths_through() {
    let p = localqa_core::config::expand_path("relative/dir");
    assert_eq!(p, std::path::PathBuf::from("relative/dir"));

    let base = std::path::Path::new("/base");
    let resolved = localqa_core::config::resolve_with_base(base, "sub/file.txt");
    assert_eq!(resolved, std::path::PathBuf::from("/base/sub/file.txt"));
    let absolute = localqa_core::config::resolve_with_base(base, "/abs/file.txt");
    assert_eq!(absolute, std::path::PathBuf::from("/abs/file.txt"));
}
