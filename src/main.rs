//! Demo driver for `treap-collections`.
//!
//! Without arguments it runs a fixed set of scenarios against fresh treaps and prints the results.
//! With `--keys` it builds a treap from the given keys and applies the requested operations.
//! Set `TREAP_LOG` (for example `TREAP_LOG=trace`) to see the library's log records.

use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use log::debug;
use std::fmt::Display;
use std::num::ParseIntError;
use thiserror::Error;
use treap_collections::Treap;

#[derive(Debug, Error)]
#[error("invalid key '{input}'")]
struct KeyError {
    input: String,
    #[source]
    source: ParseIntError,
}

fn parse_key(input: &str) -> Result<i64, KeyError> {
    input.trim().parse::<i64>().map_err(|source| KeyError {
        input: input.to_string(),
        source,
    })
}

fn make_parser() -> Command {
    Command::new("treap-demo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Exercises a treap with literal inputs and prints the results")
        .arg(
            Arg::new("keys")
                .short('k')
                .long("keys")
                .value_name("LIST")
                .help("Comma separated keys to insert into a fresh treap"),
        )
        .arg(
            Arg::new("search")
                .short('s')
                .long("search")
                .value_name("KEY")
                .help("Key to look up"),
        )
        .arg(
            Arg::new("remove")
                .short('r')
                .long("remove")
                .value_name("KEY")
                .help("Key to remove before splitting and range queries"),
        )
        .arg(
            Arg::new("split")
                .long("split")
                .value_name("KEY")
                .help("Split the treap into keys <= KEY and keys > KEY"),
        )
        .arg(
            Arg::new("range")
                .long("range")
                .num_args(2)
                .value_names(["LOW", "HIGH"])
                .help("Print the keys in the inclusive range [LOW, HIGH]"),
        )
}

fn join<'a, T: 'a + Display>(keys: impl IntoIterator<Item = &'a T>) -> String {
    keys.into_iter()
        .map(|key| key.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

// Inserts every valid key from `inputs`, reporting the ones that are not integers.
fn insert_inputs<'a>(treap: &mut Treap<i64>, inputs: impl IntoIterator<Item = &'a str>) {
    for input in inputs {
        match parse_key(input) {
            Ok(key) => {
                treap.insert(key);
            },
            Err(err) => println!("Skipping insert: {}", err),
        }
    }
}

fn run_operations(matches: &ArgMatches) -> Result<()> {
    let mut treap = Treap::new();
    if let Some(list) = matches.get_one::<String>("keys") {
        insert_inputs(&mut treap, list.split(','));
    }
    println!("Treap keys: {}", join(&treap));

    if let Some(input) = matches.get_one::<String>("search") {
        let key = parse_key(input)?;
        println!("Search {} -> {}", key, treap.contains(&key));
    }

    if let Some(input) = matches.get_one::<String>("remove") {
        let key = parse_key(input)?;
        println!("Remove {} -> {}", key, treap.remove(&key));
    }

    if let Some(mut bounds) = matches.get_many::<String>("range") {
        let low = parse_key(bounds.next().map(String::as_str).unwrap_or_default())?;
        let high = parse_key(bounds.next().map(String::as_str).unwrap_or_default())?;
        println!("Range [{}, {}] -> {}", low, high, join(treap.range(&low, &high)));
    }

    if let Some(input) = matches.get_one::<String>("split") {
        let key = parse_key(input)?;
        let (left, right) = treap.split(&key);
        println!("Split at {}: left (<= {}) -> {}", key, key, join(&left));
        println!("Split at {}: right (> {}) -> {}", key, key, join(&right));
    }

    Ok(())
}

fn from_keys(keys: &[i64]) -> Treap<i64> {
    keys.iter().cloned().collect()
}

fn run_scenarios() {
    let keys = [50, 20, 70, 10, 30, 60, 80];

    println!("-- Insert and search --");
    let treap = from_keys(&keys);
    println!("Inserted keys: {}", join(&keys));
    println!("Search 50 (expect true) -> {}", treap.contains(&50));
    println!("Search 60 (expect true) -> {}", treap.contains(&60));
    println!("Search 99 (expect false) -> {}", treap.contains(&99));

    println!("-- Remove --");
    let mut treap = from_keys(&keys);
    println!("Remove 10 (expect true) -> {}", treap.remove(&10));
    println!("Search 10 (expect false) -> {}", treap.contains(&10));
    println!("Remove 20 (expect true) -> {}", treap.remove(&20));
    println!("Search 20 (expect false) -> {}", treap.contains(&20));
    println!("Remove 999 (expect false) -> {}", treap.remove(&999));

    println!("-- Split --");
    let (left, right) = from_keys(&keys).split(&40);
    println!("Left (<= 40) -> {}", join(&left));
    println!("Right (> 40) -> {}", join(&right));

    println!("-- Merge --");
    let merged = Treap::merge(from_keys(&[10, 20, 30]), from_keys(&[50, 60, 70]));
    println!("Merged (expect 10, 20, 30, 50, 60, 70) -> {}", join(&merged));

    println!("-- Range query --");
    let treap = from_keys(&[50, 20, 70, 10, 30, 60, 80, 25, 35, 65]);
    println!(
        "Range [25, 60] (expect 25, 30, 35, 50, 60) -> {}",
        join(treap.range(&25, &60))
    );

    println!("-- Empty treap --");
    let mut treap: Treap<i64> = Treap::new();
    println!("Remove 10 (expect false) -> {}", treap.remove(&10));
    println!("Search 10 (expect false) -> {}", treap.contains(&10));
    println!("Range [0, 100] (expect 0 keys) -> {}", treap.range(&0, &100).len());
    let (left, right) = treap.split(&50);
    println!("Split halves empty -> {} {}", left.is_empty(), right.is_empty());

    println!("-- Invalid input --");
    let mut treap = Treap::new();
    insert_inputs(&mut treap, vec!["$", "6.7", "wow", "", "S"]);
    for input in &["john", ";*", "why", "@"] {
        if let Err(err) = parse_key(input) {
            println!("Skipping lookup: {}", err);
        }
    }
    println!("Keys after invalid input (expect none) -> [{}]", join(&treap));
}

fn main() -> Result<()> {
    let env = env_logger::Env::new()
        .filter("TREAP_LOG")
        .write_style("TREAP_LOG_STYLE");
    env_logger::init_from_env(env);

    let matches = make_parser().get_matches();
    if matches.args_present() {
        debug!("running operations from the command line");
        run_operations(&matches)
    } else {
        debug!("running built-in scenarios");
        run_scenarios();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{make_parser, parse_key};

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("42").ok(), Some(42));
        assert_eq!(parse_key(" -7 ").ok(), Some(-7));
        assert!(parse_key("6.7").is_err());
        assert!(parse_key("").is_err());
        assert_eq!(
            parse_key("wow").err().map(|err| err.to_string()),
            Some(String::from("invalid key 'wow'")),
        );
    }

    #[test]
    fn test_parse_range_args() {
        let matches = make_parser()
            .try_get_matches_from(vec!["treap-demo", "--keys", "1,2", "--range", "1", "5"])
            .unwrap();
        let bounds = matches
            .get_many::<String>("range")
            .unwrap()
            .map(String::as_str)
            .collect::<Vec<&str>>();
        assert_eq!(bounds, vec!["1", "5"]);
    }

    #[test]
    fn test_parse_missing_range_bound() {
        let matches = make_parser().try_get_matches_from(vec!["treap-demo", "--range", "1"]);
        assert!(matches.is_err());
    }
}
