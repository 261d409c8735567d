mod cli;

use clap::Parser;
use cli::{Args, Command};
use magnet_cipher::{Conversion, Converter, InfoHash};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn converter(seed: Option<u64>) -> Converter {
    match seed {
        Some(seed) => Converter::from_seed(seed),
        None => Converter::new(),
    }
}

fn print_conversion(conversion: &Conversion) {
    println!("Detected: {}", conversion.kind);
    println!("\nMagnet:");
    println!("{}", conversion.magnet);
    println!("\nSurnames:");
    println!("{}", conversion.cipher);
    println!("\nCore values:");
    println!("{}", conversion.phrase);
}

/// One line failure report, using the error's `Display` form
fn error_message(err: &dyn std::error::Error) -> String {
    format!("Error: {}", err)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args.command) {
        eprintln!("{}", error_message(e.as_ref()));
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Convert { input, json, seed } => {
            let mut converter = converter(seed);
            // A bare hash is accepted as shorthand for its magnet link
            let conversion = match InfoHash::from_str(input.trim()) {
                Ok(hash) => converter.encode_hash(&hash)?,
                Err(_) => converter.try_convert(&input)?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&conversion)?);
            } else {
                print_conversion(&conversion);
            }
        }
        Command::Detect { input } => {
            println!("{}", magnet_cipher::detect_type(&input));
        }
        Command::EncodeText { text, seed } => {
            let rendering = converter(seed).encode_text(&text)?;
            println!("Surnames:");
            println!("{}", rendering.cipher);
            println!("\nCore values:");
            println!("{}", rendering.phrase);
        }
        Command::DecodeText { input } => {
            // Decoding draws no randomness, any seed will do
            let text = Converter::from_seed(0).decode_text(&input)?;
            println!("{}", text);
        }
    }

    Ok(())
}
