use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid_value::{Coding, KeyedArchive, UuidValue};

#[derive(Parser)]
#[command(name = "uuid-value")]
#[command(about = "Generate, parse and archive 128-bit identifiers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random version-4 identifiers
    Generate {
        /// How many identifiers to print
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Parse a hyphenated identifier and print its canonical form and raw bytes
    Parse {
        /// Identifier in 8-4-4-4-12 hex form (either case)
        text: String,
    },
    /// Encode an identifier into a keyed JSON archive
    Encode {
        /// Identifier in 8-4-4-4-12 hex form (either case)
        text: String,
    },
    /// Decode an identifier from a keyed JSON archive
    Decode {
        /// Archive JSON as produced by `encode`
        json: String,
    },
}

/// Command-line entry point.
///
/// Reads `.env` if present, then configures logging from `RUST_LOG` with `uuid_value=info`
/// as the default directive. Logs go to stderr so stdout carries only results.
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("uuid_value=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { count } => {
            for _ in 0..count {
                println!("{}", UuidValue::generate());
            }
        }
        Commands::Parse { text } => {
            let uuid = UuidValue::parse(&text)?;
            let bytes: Vec<String> = uuid
                .as_bytes()
                .iter()
                .map(|b| format!("0x{:02X}", b))
                .collect();
            println!("{}", uuid);
            println!("[{}]", bytes.join(", "));
        }
        Commands::Encode { text } => {
            let uuid = UuidValue::parse(&text)?;
            let mut archive = KeyedArchive::new();
            uuid.encode(&mut archive);
            println!("{}", archive.to_json()?);
        }
        Commands::Decode { json } => {
            let archive = KeyedArchive::from_json(&json)?;
            let uuid = UuidValue::decode(&archive)?;
            tracing::debug!(%uuid, "decoded identifier");
            println!("{}", uuid);
        }
    }

    Ok(())
}
