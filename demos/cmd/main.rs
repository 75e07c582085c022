use clap::Parser;
use textseal::{open_text, seal_text, EngineConfig, DEFAULT_PADDING_LENGTH};

/// Seal a piece of text and open it again.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The text to seal and open.
    text: String,

    /// Frame width the text is padded to before sealing.
    #[arg(long, default_value_t = DEFAULT_PADDING_LENGTH)]
    padding_length: usize,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    println!("Original text: {}", args.text);

    let config = EngineConfig::default();
    let result = seal_text(&args.text, args.padding_length, &config).and_then(
        |(ciphertext, mut context)| {
            println!("Text sealed.");
            open_text(&ciphertext, &mut context)
        },
    );

    match result {
        Ok(text) => println!("Opened text: {}", text),
        Err(e) => {
            eprintln!("An error occurred: {e}");
            eprintln!("Please check the padding length and engine configuration.");
            std::process::exit(1);
        }
    }
}
