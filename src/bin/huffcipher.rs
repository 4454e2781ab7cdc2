//! huffcipher - encode and decode phrases with a deterministic Huffman code.
//!
//!   huffcipher encode "go go gophers"
//!   huffcipher decode --binary 0001101... --original "go go gophers"
//!   huffcipher tree "go go gophers"
//!   huffcipher stats "go go gophers"
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use huffcipher::messages::{DecodeRequest, EncodeRequest, ErrorResponse};
use huffcipher::{FrequencyTable, HuffmanCodec, HuffmanError, HuffmanTree};

#[derive(Parser)]
#[command(name = "huffcipher", version, about = "Huffman phrase encoder")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "HUFFCIPHER_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a phrase and print the bitstring, codebook and tree as JSON
    Encode {
        phrase: String,
        #[arg(long)]
        pretty: bool,
    },
    /// Decode a bitstring using the phrase it was encoded from
    Decode {
        #[arg(long)]
        binary: String,
        #[arg(long)]
        original: String,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the tree built from a phrase as an indented outline
    Tree { phrase: String },
    /// Print per-symbol counts, codes and bit totals
    Stats { phrase: String },
}

fn init_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: tracing subscriber already installed");
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}

fn stats(phrase: &str) -> Result<String, HuffmanError> {
    let frequencies = FrequencyTable::from_phrase(phrase)?;
    let codec = HuffmanCodec::new(HuffmanTree::from_frequencies(&frequencies)?);
    let codebook = codec.codebook();

    let mut out = String::new();
    out.push_str("SYMBOL    COUNT  CODE              BITS\n");
    for (symbol, count) in frequencies.iter() {
        let code = codebook.get(symbol).unwrap_or("");
        out.push_str(&format!(
            "{:<8}  {:>5}  {:<16}  {:>4}\n",
            format!("{:?}", symbol),
            count,
            code,
            code.len() * count
        ));
    }
    let bits = codebook.encoded_len(&frequencies);
    let fixed = frequencies.total() * 8;
    out.push_str(&format!(
        "\n{} symbols, {} distinct, {} bits encoded ({} bits at 8 bits/symbol)\n",
        frequencies.total(),
        frequencies.len(),
        bits,
        fixed
    ));
    Ok(out)
}

fn run(cmd: Command) -> Result<String, HuffmanError> {
    match cmd {
        Command::Encode { phrase, pretty } => {
            let response = EncodeRequest { phrase }.handle()?;
            Ok(to_json(&response, pretty))
        }
        Command::Decode {
            binary,
            original,
            pretty,
        } => {
            let response = DecodeRequest { binary, original }.handle()?;
            Ok(to_json(&response, pretty))
        }
        Command::Tree { phrase } => Ok(HuffmanTree::from_phrase(&phrase)?.to_string()),
        Command::Stats { phrase } => stats(&phrase),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli.cmd) {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!(kind = err.kind(), "request failed");
            eprintln!("{}", to_json(&ErrorResponse::from(&err), false));
            ExitCode::FAILURE
        }
    }
}
