use std::env;

use anyhow::{Context, Result};
use clozebook::catalog::categorize;
use clozebook::exam::ContentStore;
use clozebook::highlight::Segment;
use clozebook::render::{render_item, RenderData, RenderOptions};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(anyhow::anyhow!(
            "Usage: cargo run <content.json> [item_index] [--reveal] [--student]"
        ));
    }

    let store = ContentStore::from_file(&args[1]).context("failed to load content")?;

    let index: Option<usize> = args.get(2).and_then(|arg| arg.parse().ok());
    let reveal = args.iter().any(|arg| arg == "--reveal");
    let student = args.iter().any(|arg| arg == "--student");

    match index {
        Some(index) => show_item(&store, index, reveal, student),
        None => list_items(&store),
    }

    Ok(())
}

fn list_items(store: &ContentStore) {
    let catalog = categorize(store.items());
    for (grade, entries) in catalog.sections() {
        println!("{BOLD}{}{RESET}", grade.label());
        for entry in entries {
            let year = entry.year.map(|y| y.to_string()).unwrap_or_default();
            match &entry.english_title {
                Some(english) => {
                    println!("  [{}] {} {} — {}", entry.index, year, entry.compact_title, english)
                }
                None => println!("  [{}] {} {}", entry.index, year, entry.compact_title),
            }
        }
        println!();
    }
}

fn show_item(store: &ContentStore, index: usize, reveal: bool, student: bool) {
    let item = store.select(index);
    let data = render_item(
        item,
        &RenderOptions {
            active_sentence: None,
            reveal,
        },
    );

    println!("{BOLD}{}{RESET}", data.heading);
    if let Some(sub) = &data.sub_heading {
        println!("{}", sub);
    }
    if !student && !data.question_numbers.is_empty() {
        let nav: Vec<String> = data
            .question_numbers
            .iter()
            .map(|n| format!("({})", n))
            .collect();
        println!("{}", nav.join(" "));
    }
    println!();

    if let Some(raw) = &data.raw_passage {
        println!("{}", raw);
        return;
    }

    print_paragraphs(&data);

    if student {
        return;
    }

    if let Some(panel) = &data.active {
        if let Some(japanese) = &panel.japanese {
            println!("日本語訳: {}", japanese);
        }
        if reveal {
            for note in &panel.notes {
                println!("  {}", note);
            }
            if let Some(question) = &panel.question {
                println!();
                println!("{BOLD}({}){RESET}", question.number);
                for choice in &question.choices {
                    let mark = if choice.correct { " ✓" } else { "" };
                    println!("  {}. {}{}", choice.index, choice.text, mark);
                }
                if let Some(explanation) = &question.explanation {
                    println!("{}", explanation);
                }
            }
        }
    }
}

fn print_paragraphs(data: &RenderData) {
    for paragraph in &data.paragraphs {
        let mut line = String::new();
        for view in paragraph {
            for segment in &view.segments {
                match segment {
                    Segment::Text(text) => line.push_str(text),
                    Segment::Blank(token) => line.push_str(token),
                    Segment::Verb(text) | Segment::Answer { text, .. } => {
                        line.push_str(BOLD);
                        line.push_str(text);
                        line.push_str(RESET);
                    }
                }
            }
            line.push(' ');
        }
        println!("{}", line.trim_end());
        println!();
    }
}
