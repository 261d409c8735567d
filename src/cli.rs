use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Magnet link cipher tools")]
pub struct Args {
    /// Command to execute
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub enum Command {
    /// Convert a magnet link, surname cipher, phrase or bare hash into all three forms
    Convert {
        /// The value to convert (kind is detected)
        input: String,

        /// Print the result as JSON
        #[clap(long)]
        json: bool,

        /// Seed for the phrase escape choices (random when omitted)
        #[clap(long, short)]
        seed: Option<u64>,
    },
    /// Report which form an input is
    Detect {
        /// The value to inspect
        input: String,
    },
    /// Render free text as surname cipher and phrase
    EncodeText {
        /// The text to encode
        text: String,

        /// Seed for the phrase escape choices (random when omitted)
        #[clap(long, short)]
        seed: Option<u64>,
    },
    /// Recover free text from a surname cipher or phrase
    DecodeText {
        /// The cipher or phrase to decode
        input: String,
    },
}
