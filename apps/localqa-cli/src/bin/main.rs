use std::env;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use indicatif::ProgressBar;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use localqa_answer::{generate_follow_ups, RecentQuestions};
use localqa_chat::{ResponderConfig, StreamingResponder};
use localqa_core::cancel::CancelToken;
use localqa_core::config::{expand_path, Config};
use localqa_core::embedder::HashEmbedder;
use localqa_core::store::{load_txt_directory, MemoryStore};
use localqa_core::traits::DocumentStore;
use localqa_core::types::AnswerEvent;
use localqa_hybrid::HybridRetriever;
use localqa_vector::EmbeddingIndex;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {prog} <ingest|ask> [args...]");
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn corpus_dir(config: &Config, arg: Option<&String>) -> PathBuf {
    match arg {
        Some(dir) => expand_path(dir),
        None => expand_path(config.get_or("data.corpus_dir", "./corpus".to_string())),
    }
}

/// Load every `.txt` document under `dir` and index it.
async fn build_retriever(dir: &PathBuf, show_progress: bool) -> anyhow::Result<Arc<HybridRetriever>> {
    let docs = load_txt_directory(dir)?;
    let store = Arc::new(MemoryStore::new());
    let retriever = Arc::new(HybridRetriever::new(
        Arc::clone(&store) as Arc<dyn DocumentStore>,
        Arc::new(HashEmbedder::default()),
        Arc::new(EmbeddingIndex::new()),
    ));

    let pb = if show_progress {
        Some(ProgressBar::new(docs.len() as u64))
    } else {
        None
    };
    let mut total_chunks = 0usize;
    for doc in &docs {
        store.insert(doc.clone())?;
        total_chunks += retriever.ingest_document(doc).await?;
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
        println!(
            "Indexed {} documents into {} chunks from {}",
            docs.len(),
            total_chunks,
            dir.display()
        );
    }
    Ok(retriever)
}

async fn ask(retriever: Arc<HybridRetriever>, query: &str) -> anyhow::Result<()> {
    let (escalation_tx, mut escalations) = mpsc::unbounded_channel();
    let responder = StreamingResponder::with_config(retriever, ResponderConfig::default())
        .with_escalation_channel(escalation_tx);

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let mut stream = responder.stream(query, cancel);
    let mut answered = false;
    let mut answer = String::new();
    while let Some(event) = stream.next_event().await {
        match event {
            AnswerEvent::Fragment(text) => {
                answered = true;
                print!("{text} ");
                std::io::stdout().flush()?;
                answer.push_str(&text);
                answer.push(' ');
            }
            AnswerEvent::NeedsExternalSearch => {
                if let Ok(request) = escalations.try_recv() {
                    println!("No local answer found. Try a web search for: {}", request.query);
                } else {
                    println!("No local answer found.");
                }
            }
            AnswerEvent::Cancelled => {
                println!("\n[cancelled]");
            }
        }
    }

    if answered {
        println!();
        let mut recent = RecentQuestions::new(64);
        let follow_ups = generate_follow_ups(query, &answer, &mut recent);
        if !follow_ups.is_empty() {
            println!("\nYou could also ask:");
            for q in follow_ups {
                println!("  - {q}");
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "ingest" => {
            let dir = corpus_dir(&config, args.first());
            println!("Ingesting from {}", dir.display());
            build_retriever(&dir, true).await?;
        }
        "ask" => {
            let query = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: localqa ask \"<query>\" [corpus-dir]");
                std::process::exit(1)
            });
            let dir = corpus_dir(&config, args.get(1));
            let retriever = build_retriever(&dir, false).await?;
            ask(retriever, &query).await?;
        }
        _ => {
            eprintln!("Unknown command: {cmd}");
            std::process::exit(1);
        }
    }
    Ok(())
}
