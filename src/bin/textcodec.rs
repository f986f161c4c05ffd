use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use textcodec::compression::{analyze, decode_lz77_text, AnalyzeOptions, SplitStrategy};

#[derive(Parser, Debug)]
#[command(about = "Run classic text compression algorithms on a string", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the BWT, RLE, Huffman, Shannon-Fano and LZ77 encodings of TEXT.
    Encode {
        text: String,

        /// LZ77 search window.
        #[arg(long, default_value_t = 100)]
        window: usize,

        /// BWT sentinel; must not occur in TEXT.
        #[arg(long, default_value_t = '$')]
        sentinel: char,

        /// Shannon-Fano split rule.
        #[arg(long, value_enum, default_value_t = Split::Midpoint)]
        split: Split,

        /// Run the codecs one after another instead of in parallel.
        #[arg(long)]
        sequential: bool,
    },
    /// Replay an LZ77 token list such as "[(0, 0, 'b'), (0, 0, 'a'), (0, 0, 'n'), (2, 3, '')]".
    Decode { tokens: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Split {
    Midpoint,
    Balanced,
}

impl From<Split> for SplitStrategy {
    fn from(split: Split) -> Self {
        match split {
            Split::Midpoint => SplitStrategy::Midpoint,
            Split::Balanced => SplitStrategy::BalancedMass,
        }
    }
}

pub fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Command::Encode {
            text,
            window,
            sentinel,
            split,
            sequential,
        } => {
            if text.is_empty() {
                bail!("please enter a string to encode");
            }
            let options = AnalyzeOptions {
                window_size: window,
                sentinel,
                split: split.into(),
                parallel: !sequential,
            };
            let analysis = analyze(&text, &options).context("encoding failed")?;
            println!("{analysis}");
        }
        Command::Decode { tokens } => {
            if tokens.trim().is_empty() {
                bail!("please enter a token list to decode");
            }
            let decoded = decode_lz77_text(&tokens)
                .context("expected a list of (offset, length, 'literal') tokens")?;
            println!("Decoded String: {decoded}");
        }
    }

    Ok(())
}
