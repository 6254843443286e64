//! SEMCACHE CLI
//!
//! Interactive shell over an in-process semantic cache.

use anyhow::Context;
use clap::Parser;
use semcache::{
    CacheConfig, HashingEmbedder, Lookup, MatchPolicy, SemanticCache, TtlSweeper,
};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// SEMCACHE CLI - Interactive Semantic Cache Shell
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Embedding model name
    #[arg(long, env = "SEMCACHE_EMBEDDING_MODEL", default_value = "hashing-256")]
    embedding_model: String,

    /// Embedding dimension for the hashing embedder
    #[arg(long, env = "SEMCACHE_DIMENSION", default_value_t = 256)]
    dimension: usize,

    /// Minimum similarity for a cache hit, in (0, 1]
    #[arg(short, long, env = "SEMCACHE_SIMILARITY_THRESHOLD", default_value_t = 0.90)]
    threshold: f32,

    /// Entry time-to-live in seconds
    #[arg(long, env = "SEMCACHE_TTL", default_value_t = 3600.0)]
    ttl: f64,

    /// Match selection: first or best
    #[arg(long, env = "SEMCACHE_MATCH_POLICY", default_value = "first")]
    policy: String,

    /// Maximum number of entries (0 = unlimited)
    #[arg(long, env = "SEMCACHE_MAX_ENTRIES", default_value_t = 0)]
    max_entries: usize,

    /// Background sweep interval in seconds
    #[arg(long, env = "SEMCACHE_SWEEP_INTERVAL", default_value_t = 60)]
    sweep_interval: u64,
}

impl Args {
    fn to_config(&self) -> anyhow::Result<CacheConfig> {
        let policy: MatchPolicy = self.policy.parse()?;
        let mut config = CacheConfig::default()
            .with_embedding_model(&self.embedding_model)
            .with_threshold(self.threshold)
            .with_ttl_secs(self.ttl)?
            .with_match_policy(policy)
            .with_sweep_interval(Duration::from_secs(self.sweep_interval));
        if self.max_entries > 0 {
            config = config.with_max_entries(self.max_entries);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Parsed shell command
#[derive(Debug, PartialEq)]
enum Command {
    Get { query: String },
    Set { query: String, response: String },
    Embed { query: String },
    Stats,
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("semcache=info".parse()?))
        .init();

    let args = Args::parse();
    let config = args.to_config().context("invalid cache configuration")?;

    let embedder = HashingEmbedder::new(&config.embedding_model, args.dimension);
    let cache = Arc::new(SemanticCache::new(Arc::new(embedder), config)?);
    let sweeper = TtlSweeper::spawn(cache.clone());

    info!(
        "SEMCACHE ready: model={} threshold={} ttl={:?}",
        cache.model_name(),
        cache.config().similarity_threshold,
        cache.config().ttl
    );
    println!("Type 'help' for available commands, 'quit' to exit.\n");

    loop {
        print!("semcache> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            println!("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("help") {
            print_help();
            continue;
        }

        match parse_command(input) {
            Ok(cmd) => {
                if let Err(e) = execute(&cache, cmd) {
                    eprintln!("Error: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
    }

    sweeper.abort();
    Ok(())
}

fn execute(cache: &SemanticCache, cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Get { query } => {
            let started = Instant::now();
            let lookup = cache.get(&query)?;
            let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
            match lookup {
                Lookup::Hit {
                    response,
                    similarity,
                    matched_query,
                } => {
                    println!("HIT (similarity: {:.2}, matched: {:?})", similarity, matched_query);
                    println!("{}", response);
                }
                Lookup::Miss => println!("MISS"),
            }
            println!("Latency: {:.2}ms", latency_ms);
        }
        Command::Set { query, response } => {
            cache.set(&query, &response)?;
            println!("OK");
        }
        Command::Embed { query } => {
            let embedding = cache.get_embedding(&query)?;
            let preview: Vec<String> = embedding.iter().take(10).map(|x| format!("{:.4}", x)).collect();
            println!("[{}] ({} dims)", preview.join(", "), embedding.len());
        }
        Command::Stats => println!("{}", cache.stats()),
        Command::Clear => {
            cache.clear();
            println!("OK");
        }
    }
    Ok(())
}

fn parse_command(input: &str) -> anyhow::Result<Command> {
    let (cmd, rest) = match input.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (input, ""),
    };
    let cmd = cmd.to_uppercase();

    match cmd.as_str() {
        "GET" => {
            if rest.is_empty() {
                anyhow::bail!("GET requires a query: GET <query>");
            }
            Ok(Command::Get {
                query: rest.to_string(),
            })
        }

        "SET" => {
            let Some((query, response)) = rest.split_once("=>") else {
                anyhow::bail!("SET requires query and response: SET <query> => <response>");
            };
            let (query, response) = (query.trim(), response.trim());
            if query.is_empty() || response.is_empty() {
                anyhow::bail!("SET requires query and response: SET <query> => <response>");
            }
            Ok(Command::Set {
                query: query.to_string(),
                response: response.to_string(),
            })
        }

        "EMBED" => {
            if rest.is_empty() {
                anyhow::bail!("EMBED requires a query: EMBED <query>");
            }
            Ok(Command::Embed {
                query: rest.to_string(),
            })
        }

        "STATS" => Ok(Command::Stats),
        "CLEAR" => Ok(Command::Clear),

        _ => anyhow::bail!("Unknown command: {}. Type 'help' for available commands.", cmd),
    }
}

fn print_help() {
    println!(
        r#"
Available commands:

  GET <query>                 - Look up a semantically similar cached response
  SET <query> => <response>   - Cache a response for a query
  EMBED <query>               - Show the first 10 embedding components
  STATS                       - Show hit/miss statistics
  CLEAR                       - Remove all entries (statistics are kept)

  help                        - Show this help
  quit / exit                 - Exit the CLI

Examples:
  SET capital of France => Paris
  GET what is the capital of France?
  STATS
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set() {
        assert_eq!(
            parse_command("set capital of France => Paris, France").unwrap(),
            Command::Set {
                query: "capital of France".to_string(),
                response: "Paris, France".to_string(),
            }
        );
        assert!(parse_command("SET no arrow here").is_err());
        assert!(parse_command("SET => Paris").is_err());
    }

    #[test]
    fn test_parse_get_keeps_whole_query() {
        assert_eq!(
            parse_command("GET what is the capital of France?").unwrap(),
            Command::Get {
                query: "what is the capital of France?".to_string(),
            }
        );
        assert!(parse_command("GET").is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("stats").unwrap(), Command::Stats);
        assert_eq!(parse_command("CLEAR").unwrap(), Command::Clear);
        assert!(parse_command("FLUSHALL").is_err());
    }

    #[test]
    fn test_args_to_config() {
        let args = Args::parse_from([
            "semcache-cli",
            "--threshold",
            "0.85",
            "--ttl",
            "90",
            "--policy",
            "best",
            "--max-entries",
            "100",
        ]);
        let config = args.to_config().unwrap();
        assert!((config.similarity_threshold - 0.85).abs() < 1e-6);
        assert_eq!(config.ttl, Duration::from_secs(90));
        assert_eq!(config.match_policy, MatchPolicy::Best);
        assert_eq!(config.max_entries, Some(100));
    }

    #[test]
    fn test_args_reject_bad_threshold() {
        let args = Args::parse_from(["semcache-cli", "--threshold", "1.5"]);
        assert!(args.to_config().is_err());
    }
}
