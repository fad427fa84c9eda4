//! gbfetch CLI - fetch, filter, and chart GenBank nucleotide records
//!
//! A linear pipeline over NCBI Entrez: resolve a TaxID, search the
//! nucleotide database with history enabled, fetch one batch of GenBank
//! records, keep those inside a length range, then write a CSV summary
//! and a PNG length chart.
//!
//! # Usage
//!
//! ```bash
//! # Fully scripted
//! gbfetch --email me@example.org --api-key KEY --taxid 9606 \
//!         --min-len 600 --max-len 1300
//!
//! # Interactive: any omitted value is prompted for
//! gbfetch
//! ```

use std::env;
use std::io::{self, Cursor, Write};
use std::process;

use gbfetch::entrez::{EntrezClient, EntrezConfig, DEFAULT_FETCH_CAP};
use gbfetch::formats::GenBankParser;
use gbfetch::plot::DEFAULT_PLOT_PATH;
use gbfetch::report::{self, DEFAULT_CSV_PATH};
use gbfetch::summary::filter_by_length;

struct Options {
    email: Option<String>,
    api_key: Option<String>,
    taxid: Option<String>,
    min_len: Option<u64>,
    max_len: Option<u64>,
    csv_path: String,
    plot_path: String,
    max_fetch: usize,
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut options = Options {
        email: None,
        api_key: None,
        taxid: None,
        min_len: None,
        max_len: None,
        csv_path: DEFAULT_CSV_PATH.to_string(),
        plot_path: DEFAULT_PLOT_PATH.to_string(),
        max_fetch: DEFAULT_FETCH_CAP,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--email" => options.email = Some(take_value(&args, &mut i)),
            "--api-key" => options.api_key = Some(take_value(&args, &mut i)),
            "--taxid" => options.taxid = Some(take_value(&args, &mut i)),
            "--min-len" => {
                let value = take_value(&args, &mut i);
                options.min_len = Some(parse_length("--min-len", &value));
            }
            "--max-len" => {
                let value = take_value(&args, &mut i);
                options.max_len = Some(parse_length("--max-len", &value));
            }
            "--csv" => options.csv_path = take_value(&args, &mut i),
            "--plot" => options.plot_path = take_value(&args, &mut i),
            "--max-fetch" => {
                let value = take_value(&args, &mut i);
                options.max_fetch = parse_length("--max-fetch", &value) as usize;
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            "--version" | "-V" => {
                println!("gbfetch {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            other => {
                eprintln!("Error: Unknown option '{}'", other);
                eprintln!("Run 'gbfetch --help' to see all available options.");
                process::exit(1);
            }
        }
    }

    // Original prompt order: email, api key, TaxID, min length, max length
    let email = options.email.unwrap_or_else(|| prompt("Enter email: "));
    let api_key = options.api_key.unwrap_or_else(|| prompt("Enter api_key: "));
    let taxid = options.taxid.unwrap_or_else(|| prompt("Enter TaxID: "));
    let min_len = options
        .min_len
        .unwrap_or_else(|| prompt_length("Minimum sequence length: "));
    let max_len = options
        .max_len
        .unwrap_or_else(|| prompt_length("Maximum sequence length: "));

    let result = run(
        email,
        api_key,
        taxid,
        min_len,
        max_len,
        options.max_fetch,
        &options.csv_path,
        &options.plot_path,
    );

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn run(
    email: String,
    api_key: String,
    taxid: String,
    min_len: u64,
    max_len: u64,
    max_fetch: usize,
    csv_path: &str,
    plot_path: &str,
) -> gbfetch::Result<()> {
    let client = EntrezClient::new(EntrezConfig::new(email, api_key))?;

    let taxon = client.resolve_taxon(&taxid)?;
    println!("Organism: {} (TaxID: {})", taxon.scientific_name, taxid);

    let session = client.search_nucleotide(&taxid)?;
    println!("Found {} records.", session.count);
    if session.count == 0 {
        return Ok(());
    }

    let text = client.fetch_genbank_batch(&session, max_fetch)?;
    let parser = GenBankParser::new(Cursor::new(text));
    let filtered = filter_by_length(parser, min_len, max_len)?;
    println!(
        "Filtered {} records in range [{}, {}].",
        filtered.len(),
        min_len,
        max_len
    );

    if report::export_summary(&filtered, csv_path, plot_path)? {
        println!("Saved CSV to {}", csv_path);
        println!("Saved plot to {}", plot_path);
    } else {
        println!("No records matched the length criteria.");
    }

    Ok(())
}

/// Consume the value following a flag, or exit with a message
fn take_value(args: &[String], i: &mut usize) -> String {
    let flag = &args[*i];
    if *i + 1 >= args.len() {
        eprintln!("Error: {} requires a value", flag);
        process::exit(1);
    }
    let value = args[*i + 1].clone();
    *i += 2;
    value
}

/// Parse a non-negative integer flag value, or exit with a message
fn parse_length(flag: &str, value: &str) -> u64 {
    match value.trim().parse::<u64>() {
        Ok(parsed) => parsed,
        Err(_) => {
            eprintln!(
                "Error: {} expects a non-negative integer, got '{}'",
                flag, value
            );
            process::exit(1);
        }
    }
}

/// Blocking stdin prompt
fn prompt(label: &str) -> String {
    print!("{}", label);
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => {
            eprintln!("Error: stdin closed while reading input");
            process::exit(1);
        }
        Ok(_) => line.trim().to_string(),
        Err(e) => {
            eprintln!("Error: failed to read input: {}", e);
            process::exit(1);
        }
    }
}

/// Blocking stdin prompt for a non-negative integer
fn prompt_length(label: &str) -> u64 {
    let raw = prompt(label);
    match raw.parse::<u64>() {
        Ok(parsed) => parsed,
        Err(_) => {
            eprintln!("Error: expected a non-negative integer, got '{}'", raw);
            process::exit(1);
        }
    }
}

fn print_help() {
    println!("gbfetch {}", env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("USAGE:");
    println!("    gbfetch [OPTIONS]");
    println!();
    println!("    Any of the five primary values not given as a flag is collected");
    println!("    by an interactive prompt.");
    println!();
    println!("OPTIONS:");
    println!("    --email <ADDRESS>     Registered contact email, sent with every request");
    println!("    --api-key <KEY>       NCBI API key");
    println!("    --taxid <ID>          Taxonomic ID to search for");
    println!("    --min-len <N>         Minimum sequence length (inclusive)");
    println!("    --max-len <N>         Maximum sequence length (inclusive)");
    println!("    --csv <PATH>          CSV output path (default: output.csv)");
    println!("    --plot <PATH>         Chart output path (default: plot.png)");
    println!("    --max-fetch <N>       Records requested in the single batch");
    println!("                          (default: 100, hard ceiling: 500)");
    println!("    --help, -h            Show this help message");
    println!("    --version, -V         Show version");
}
