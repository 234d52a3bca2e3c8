use std::io::Write;
use std::{
    env,
    fs::{self, OpenOptions},
};

use anyhow::Context;
use clozebook::exam::{check_items, ContentStore, ExamItem};
use clozebook::handout::{item_slug, serialize_handout};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const DEFAULT_OUTPUT_DIR: &str = "output/handouts";

pub struct Config {
    pub content_path: String,
    pub output_dir: String,
}

impl Config {
    pub fn new(content_path: String, output_dir: &str) -> Self {
        Self {
            content_path,
            output_dir: output_dir.to_string(),
        }
    }
}

fn parse_config(mut args: impl Iterator<Item = String>) -> anyhow::Result<Config> {
    let content_path = args
        .next()
        .context("content file is required, e.g. content/items.json")?;
    let output_dir = args.next().unwrap_or(DEFAULT_OUTPUT_DIR.to_string());

    Ok(Config::new(content_path, &output_dir))
}

fn main() -> anyhow::Result<()> {
    let args = env::args().skip(1);

    let config = match parse_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Usage: cargo run --bin make_handout <content.json> [output_dir]");
            return Err(e);
        }
    };

    let store = ContentStore::from_file(&config.content_path).context(format!(
        "could not load content from {}",
        config.content_path
    ))?;

    let report = check_items(store.items());
    if report.issue_count > 0 {
        eprintln!(
            "content check found {BOLD}{}{RESET} issues across {} items",
            report.issue_count, report.total_items
        );
        for item in report.items.iter().filter(|i| !i.issues.is_empty()) {
            eprintln!("  {}", item.title);
            for issue in &item.issues {
                eprintln!("    - {}", issue);
            }
        }
    }

    create_output_dir(&config.output_dir).context("failed to create output directory")?;

    let mut slugger = github_slugger::Slugger::default();
    for (order, item) in store.items().iter().enumerate() {
        let slug = item_slug(&mut slugger, item, order);
        if let Err(e) = create_handout(item, &slug, order, &config.output_dir) {
            eprintln!("Error writing handout {}: {}", slug, e);
            return Err(e);
        }
    }

    println!(
        "created {BOLD}{}{RESET} handouts in {BOLD}{}{RESET}",
        store.len(),
        &config.output_dir
    );

    Ok(())
}

fn create_handout(
    item: &ExamItem,
    slug: &str,
    order: usize,
    output_dir: &str,
) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(format!("{}/{}.md", output_dir, slug))
        .context(format!("failed to open file for {}", slug))?;

    let content = serialize_handout(item, slug, order).context("failed to serialize handout")?;
    write!(file, "{}", content).context("failed to write handout")?;

    Ok(())
}

fn create_output_dir(output_dir: &str) -> anyhow::Result<()> {
    if fs::metadata(output_dir).is_ok() {
        fs::remove_dir_all(output_dir)?;
    }

    fs::create_dir_all(output_dir)?;
    Ok(())
}
