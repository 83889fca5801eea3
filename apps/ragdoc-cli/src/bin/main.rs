use std::env;
use std::fs;
use std::sync::Arc;

use ragdoc_core::config::{expand_path, Config};
use ragdoc_core::types::{QueryParams, SplitConfig};
use ragdoc_llm::{embedder_from_env, generator_from_env};
use ragdoc_pipeline::RagSession;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <chunks|ask> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn split_config(config: &Config, args: &[String]) -> anyhow::Result<SplitConfig> {
    let chunk_size = match args.first() {
        Some(raw) => raw.parse()?,
        None => config.get("chunking.chunk_size").unwrap_or(1024),
    };
    let chunk_overlap = match args.get(1) {
        Some(raw) => raw.parse()?,
        None => config.get("chunking.chunk_overlap").unwrap_or(20),
    };
    Ok(SplitConfig::new(chunk_size, chunk_overlap)?)
}

fn query_params(config: &Config) -> QueryParams {
    QueryParams {
        top_k: config.get("query.top_k").unwrap_or(2),
        temperature: config.get("query.temperature").unwrap_or(0.1),
        top_p: config.get("query.top_p").unwrap_or(1.0),
    }
}

fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > 80 {
        let cut: String = flat.chars().take(77).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "chunks" => {
            let file = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: ragdoc chunks <file> [chunk_size] [chunk_overlap]");
                std::process::exit(1)
            });
            let document = fs::read_to_string(expand_path(&file))?;
            let cfg = split_config(&config, &args[1..])?;
            let chunks = ragdoc_chunk::split(&document, &cfg)?;
            for c in &chunks {
                println!("[{}] tokens {}..{}: {}", c.id, c.token_start, c.token_end, preview(&c.text));
            }
            println!("{} chunks (size {}, overlap {})", chunks.len(), cfg.chunk_size, cfg.chunk_overlap);
        }
        "ask" => {
            let file = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: ragdoc ask <file> \"<query>\"");
                std::process::exit(1)
            });
            let question = args.get(1).cloned().unwrap_or_else(|| {
                eprintln!("Usage: ragdoc ask <file> \"<query>\"");
                std::process::exit(1)
            });
            let document = fs::read_to_string(expand_path(&file))?;
            let cfg = split_config(&config, &args[2..])?;
            let params = query_params(&config);

            let embedder: Arc<dyn ragdoc_core::traits::Embedder> =
                Arc::from(embedder_from_env(&config)?);
            let generator: Arc<dyn ragdoc_core::traits::Generator> =
                Arc::from(generator_from_env(&config)?);
            let session = RagSession::new(embedder, generator);

            let n = session.build(&document, &cfg)?;
            println!("Indexed {} chunks", n);
            let answer = session.query(&question, &params)?;
            println!("{}", answer);
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}
