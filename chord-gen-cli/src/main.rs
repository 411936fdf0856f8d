use std::path::PathBuf;

use chord_gen_core::model::generation_config::GenerationConfig;
use chord_gen_core::model::generator::DatasetGenerator;
use chord_gen_core::model::syllabifier::{HyphenationDictionary, SingleSyllable, Syllabifier};
use chord_gen_core::model::vocabulary::Vocabulary;
use clap::Parser;
use env_logger::Env;
use log::{LevelFilter, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Generates a chord-to-word training dataset.
#[derive(Parser, Debug)]
#[clap(name = "chord-gen", version)]
struct Cli {
    /// Frequency-ranked word list, one word per line (most frequent first)
    #[clap(long)]
    vocab: PathBuf,

    /// Hyphenation dictionary (`clas-si-fi-ca-tion` per line).
    /// Without it every word is a single syllable.
    #[clap(long)]
    syllables: Option<PathBuf>,

    /// JSON configuration file (keys such as `NOISE_RATE`)
    #[clap(long)]
    config: Option<PathBuf>,

    /// Output CSV file (OUTPUT_FILE)
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Master random seed (SEED)
    #[clap(long)]
    seed: Option<u64>,

    /// Number of vocabulary words (TARGET_VOCAB_SIZE)
    #[clap(long)]
    vocab_size: Option<usize>,

    /// Probability that a noisy draw corrupts the variant (NOISE_RATE)
    #[clap(long)]
    noise_rate: Option<f64>,

    /// Per-syllable key substitution probability (KEY_SUB_PROB)
    #[clap(long)]
    key_sub_prob: Option<f64>,

    /// Per-syllable missing letter probability (MISSING_LETTER_PROB)
    #[clap(long)]
    missing_letter_prob: Option<f64>,

    /// Per-syllable extra letter probability (EXTRA_LETTER_PROB)
    #[clap(long)]
    extra_letter_prob: Option<f64>,

    /// Clean syllabification variants per word (CLEAN_VARIANTS_PER_WORD)
    #[clap(long)]
    clean_variants: Option<usize>,

    /// Number of random rows printed after generation
    #[clap(long, default_value_t = 10)]
    preview: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    match verbose {
        0 => (),
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

/// Builds the configuration: defaults, then the JSON file, then CLI flags.
///
/// Every override goes through a checked setter, so an invalid value stops
/// the program before any generation.
fn build_config(cli: &Cli) -> Result<GenerationConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => GenerationConfig::from_json_file(path)?,
        None => GenerationConfig::default(),
    };

    if let Some(output) = &cli.output {
        config.set_output_file(output);
    }
    if let Some(seed) = cli.seed {
        config.set_seed(seed);
    }
    if let Some(size) = cli.vocab_size {
        config.set_target_vocab_size(size)?;
    }
    if let Some(rate) = cli.noise_rate {
        config.set_noise_rate(rate)?;
    }
    if let Some(p) = cli.key_sub_prob {
        config.set_key_sub_prob(p)?;
    }
    if let Some(p) = cli.missing_letter_prob {
        config.set_missing_letter_prob(p)?;
    }
    if let Some(p) = cli.extra_letter_prob {
        config.set_extra_letter_prob(p)?;
    }
    if let Some(n) = cli.clean_variants {
        config.set_clean_variants_per_word(n)?;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = build_config(&cli)?;
    info!("Configuration: {:?}", config);

    // Ranked vocabulary, filtered to alphabetic words of the configured length
    let vocabulary = Vocabulary::from_file(&cli.vocab, &config)?;

    // Canonical syllabification source
    let syllabifier: Box<dyn Syllabifier> = match &cli.syllables {
        Some(path) => Box::new(HyphenationDictionary::from_file(path)?),
        None => {
            info!("No hyphenation dictionary given, every word is a single syllable");
            Box::new(SingleSyllable)
        }
    };

    let generator = DatasetGenerator::new(config)?;
    let dataset = generator.run(&vocabulary, syllabifier.as_ref());
    dataset.write_csv(generator.config().output_file())?;

    println!("\nDataset written to: {}", generator.config().output_file().display());
    println!("{}", dataset.summary());

    if cli.preview > 0 {
        // Preview draws from its own stream so the dataset itself is unaffected
        let mut rng = StdRng::seed_from_u64(generator.config().seed().wrapping_add(1));
        println!("\nSample rows:");
        for example in dataset.sample(cli.preview, &mut rng) {
            println!("  {:<40} -> {}", example.chords, example.target_word);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_defaults() {
        let cli = Cli::parse_from(["chord-gen", "--vocab", "words.txt", "--noise-rate", "0.2", "--seed", "7"]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.noise_rate(), 0.2);
        assert_eq!(config.seed(), 7);
        assert_eq!(config.clean_variants_per_word(), 3);
    }

    #[test]
    fn test_cli_rejects_invalid_probability() {
        let cli = Cli::parse_from(["chord-gen", "--vocab", "words.txt", "--key-sub-prob", "1.5"]);
        assert!(build_config(&cli).is_err());
    }

    #[test]
    fn test_cli_rejects_zero_clean_variants() {
        let cli = Cli::parse_from(["chord-gen", "--vocab", "words.txt", "--clean-variants", "0"]);
        assert!(build_config(&cli).is_err());
    }
}
