use std::collections::{HashMap, HashSet};
use std::fs;

use chord_gen_core::model::generation_config::GenerationConfig;
use chord_gen_core::model::generator::DatasetGenerator;
use chord_gen_core::model::syllabifier::HyphenationDictionary;
use chord_gen_core::model::vocabulary::Vocabulary;

const WORDS: &str = "\
the\t5000
classification 120
example 300
table 250
don't 240
banana 90
it 80
broken 70
";

const HYPHENATION: &str = "\
clas-si-fi-ca-tion
ex-am-ple
ta-ble
ba-na-na
broken\tbro-kn
";

fn setup(dir: &std::path::Path) -> (Vocabulary, HyphenationDictionary, GenerationConfig) {
	let vocab_path = dir.join("words.txt");
	let hyph_path = dir.join("hyphenation.txt");
	fs::write(&vocab_path, WORDS).unwrap();
	fs::write(&hyph_path, HYPHENATION).unwrap();

	let mut config = GenerationConfig::default();
	config.set_output_file(dir.join("out").join("chord_dataset.csv"));
	let vocabulary = Vocabulary::from_file(&vocab_path, &config).unwrap();
	let dictionary = HyphenationDictionary::from_file(&hyph_path).unwrap();
	(vocabulary, dictionary, config)
}

#[test]
fn full_run_writes_csv() {
	let dir = tempfile::tempdir().unwrap();
	let (vocabulary, dictionary, config) = setup(dir.path());
	assert_eq!(vocabulary.words(), &["the", "classification", "example", "table", "banana", "broken"]);

	let generator = DatasetGenerator::new(config.clone()).unwrap();
	let dataset = generator.run(&vocabulary, &dictionary);
	dataset.write_csv(config.output_file()).unwrap();

	let contents = fs::read_to_string(config.output_file()).unwrap();
	let mut lines = contents.lines();
	assert_eq!(lines.next(), Some("chords,target_word"));

	let mut per_word: HashMap<String, HashSet<String>> = HashMap::new();
	let mut count = 0;
	for line in lines {
		let (chords, word) = line.split_once(',').unwrap();
		assert!(chords.chars().all(|c| c.is_ascii_lowercase() || c == '-'));
		assert!(per_word.entry(word.to_owned()).or_default().insert(chords.to_owned()), "duplicate {chords} for {word}");
		count += 1;
	}
	assert_eq!(count, dataset.summary().total_examples);

	// "broken" has a split that does not spell it
	assert_eq!(dataset.summary().skipped_words, 1);
	assert!(!per_word.contains_key("broken"));

	for (word, chords) in &per_word {
		assert!(chords.len() <= config.max_examples_per_word(), "{word} has {} rows", chords.len());
		let spelled: Vec<String> = word.chars().map(String::from).collect();
		assert!(chords.contains(&spelled.join("-")), "missing letter spelling of {word}");
	}

	let classification = &per_word["classification"];
	assert!(classification.contains("acls-is-fi-ac-inot"));
	assert!(classification.contains("acl-is-fi-ac-inot"));
	assert!(per_word["the"].contains("eht"));
}

#[test]
fn same_seed_same_file() {
	let dir = tempfile::tempdir().unwrap();
	let (vocabulary, dictionary, config) = setup(dir.path());

	let first = dir.path().join("first.csv");
	let second = dir.path().join("second.csv");
	DatasetGenerator::new(config.clone()).unwrap().run(&vocabulary, &dictionary).write_csv(&first).unwrap();
	DatasetGenerator::new(config.clone()).unwrap().run(&vocabulary, &dictionary).write_csv(&second).unwrap();
	assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());

	let mut other = config.clone();
	other.set_seed(config.seed() + 1);
	let third = dir.path().join("third.csv");
	DatasetGenerator::new(other).unwrap().run(&vocabulary, &dictionary).write_csv(&third).unwrap();
	assert_ne!(fs::read(&first).unwrap(), fs::read(&third).unwrap());
}

#[test]
fn noise_free_run_has_only_clean_rows() {
	let dir = tempfile::tempdir().unwrap();
	let (vocabulary, dictionary, mut config) = setup(dir.path());
	config.set_noise_rate(0.0).unwrap();
	config.set_clean_variants_per_word(1).unwrap();

	let dataset = DatasetGenerator::new(config).unwrap().run(&vocabulary, &dictionary);
	// letter spelling + canonical chord for each of the five usable words
	assert_eq!(dataset.summary().total_examples, 10);
	assert_eq!(dataset.summary().unique_words, 5);
	assert!((dataset.summary().average_per_word() - 2.0).abs() < f64::EPSILON);
	assert_eq!(dataset.summary().noisy_examples, 0);
}

#[test]
fn forced_noise_reaches_csv() {
	let dir = tempfile::tempdir().unwrap();
	let (vocabulary, dictionary, mut config) = setup(dir.path());
	config.set_noise_rate(1.0).unwrap();
	config.set_key_sub_prob(0.0).unwrap();
	config.set_missing_letter_prob(1.0).unwrap();
	config.set_extra_letter_prob(0.0).unwrap();
	config.set_clean_variants_per_word(1).unwrap();

	let dataset = DatasetGenerator::new(config.clone()).unwrap().run(&vocabulary, &dictionary);
	dataset.write_csv(config.output_file()).unwrap();
	let contents = fs::read_to_string(config.output_file()).unwrap();

	// Every multi-letter syllable loses a letter, so "table" only has these noisy forms
	let noisy_table: Vec<&str> = contents
		.lines()
		.filter_map(|line| line.strip_suffix(",table"))
		.filter(|chords| *chords != "t-a-b-l-e" && *chords != "at-bel")
		.collect();
	assert!(!noisy_table.is_empty());
	for chords in noisy_table {
		let (first, second) = chords.split_once('-').unwrap();
		assert!(["a", "t"].contains(&first) && ["el", "be", "bl"].contains(&second), "{chords}");
	}
	assert_eq!(dataset.summary().noisy_examples, dataset.summary().total_examples - 10);
}
