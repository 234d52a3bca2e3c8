use std::cmp::Ordering;

use regex::Regex;

use crate::exam::ExamItem;

/// Exam grades recognized in item titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    PreGrade1,
    Grade2,
    PreGrade2,
}

impl Grade {
    pub fn label(&self) -> &'static str {
        match self {
            Grade::PreGrade1 => "英検準1級",
            Grade::Grade2 => "英検2級",
            Grade::PreGrade2 => "英検準2級",
        }
    }
}

/// One index-view row. `index` is the item's position in the loaded
/// collection, kept so selection still addresses the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub index: usize,
    pub title: String,
    pub english_title: Option<String>,
    pub compact_title: String,
    pub year: Option<u32>,
    pub grade: Grade,
}

#[derive(Debug, Default)]
pub struct Catalog {
    pub pre_grade1: Vec<CatalogEntry>,
    pub grade2: Vec<CatalogEntry>,
    pub pre_grade2: Vec<CatalogEntry>,
}

impl Catalog {
    /// Grade sections in display order, skipping empty ones.
    pub fn sections(&self) -> Vec<(Grade, &[CatalogEntry])> {
        [
            (Grade::PreGrade1, self.pre_grade1.as_slice()),
            (Grade::Grade2, self.grade2.as_slice()),
            (Grade::PreGrade2, self.pre_grade2.as_slice()),
        ]
        .into_iter()
        .filter(|(_, entries)| !entries.is_empty())
        .collect()
    }
}

/// Categorize items by grade and order each category newest-first:
/// year descending, then session descending, then section ascending.
pub fn categorize(items: &[ExamItem]) -> Catalog {
    let mut catalog = Catalog::default();
    for (index, item) in items.iter().enumerate() {
        let title = item.label();
        let grade = classify(title);
        let entry = CatalogEntry {
            index,
            title: title.to_string(),
            english_title: item.english_title.clone(),
            compact_title: compact_title(title),
            year: year_of(title),
            grade,
        };
        match grade {
            Grade::PreGrade1 => catalog.pre_grade1.push(entry),
            Grade::Grade2 => catalog.grade2.push(entry),
            Grade::PreGrade2 => catalog.pre_grade2.push(entry),
        }
    }

    catalog.pre_grade1.sort_by(newest_first);
    catalog.grade2.sort_by(newest_first);
    catalog.pre_grade2.sort_by(newest_first);
    catalog
}

fn newest_first(a: &CatalogEntry, b: &CatalogEntry) -> Ordering {
    let year = |e: &CatalogEntry| e.year.unwrap_or(0);
    let session = |e: &CatalogEntry| session_of(&e.title).unwrap_or(0);
    year(b)
        .cmp(&year(a))
        .then_with(|| session(b).cmp(&session(a)))
        .then_with(|| section_of(&a.title).cmp(&section_of(&b.title)))
}

fn classify(title: &str) -> Grade {
    if title.contains("2級") && !title.contains('準') {
        Grade::Grade2
    } else if title.contains("準1級") {
        Grade::PreGrade1
    } else {
        Grade::PreGrade2
    }
}

fn year_of(title: &str) -> Option<u32> {
    capture_number(title, r"(\d{4})年度")
}

fn session_of(title: &str) -> Option<u32> {
    capture_number(title, r"第(\d+)回")
}

/// Ordering key for a problem section: the letter of `大問2A`-style
/// titles or the digit of `大問2-1`-style titles, empty otherwise.
fn section_of(title: &str) -> String {
    let lettered = Regex::new(r"大問2([A-Z])").unwrap();
    if let Some(caps) = lettered.captures(title) {
        return caps[1].to_string();
    }
    let numbered = Regex::new(r"大問2-(\d+)").unwrap();
    if let Some(caps) = numbered.captures(title) {
        return caps[1].to_string();
    }
    String::new()
}

/// Short row title: session and section when they can be extracted,
/// the full title otherwise.
pub fn compact_title(title: &str) -> String {
    let session = session_of(title);
    let numbered = Regex::new(r"大問2-(\d+)").unwrap();
    let lettered = Regex::new(r"大問(\d+[A-Z])").unwrap();

    match (session, numbered.captures(title), lettered.captures(title)) {
        (Some(session), Some(caps), _) => format!("第{}回-2-{}", session, &caps[1]),
        (Some(session), None, None) => format!("第{}回", session),
        (Some(session), None, Some(caps)) => format!("第{}回-{}", session, &caps[1]),
        _ => title.to_string(),
    }
}

fn capture_number(title: &str, pattern: &str) -> Option<u32> {
    let re = Regex::new(pattern).unwrap();
    re.captures(title).and_then(|caps| caps[1].parse().ok())
}
