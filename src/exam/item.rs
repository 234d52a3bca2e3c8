use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamItem {
    /// item title, e.g. "2023年度 第1回 英検2級 大問2A"
    pub title: String,

    /// english passage title, shown as the main heading when present
    pub english_title: Option<String>,

    /// source document name, used when the title is empty
    pub filename: Option<String>,

    /// raw passage text; literal `\n` sequences and real newlines both
    /// mark line breaks
    #[serde(default)]
    pub passage: String,

    #[serde(default)]
    pub sentences: Vec<Sentence>,

    #[serde(default)]
    pub questions: Vec<Question>,
}

impl ExamItem {
    /// Title to categorize and display by, falling back to the filename.
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            self.filename.as_deref().unwrap_or_default()
        } else {
            &self.title
        }
    }

    /// Heading for the passage view: the english title when present.
    pub fn heading(&self) -> &str {
        self.english_title.as_deref().unwrap_or(&self.title)
    }

    pub fn question(&self, number: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.number == number)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    /// unique within the item; identity key for active-sentence selection
    pub id: u32,

    pub english: String,

    pub japanese: Option<String>,

    /// newline-delimited study notes
    pub notes: Option<String>,

    /// comma-delimited verb forms to emphasize while the sentence is active
    pub main_verb: Option<String>,

    #[serde(default)]
    pub related_questions: Vec<u32>,

    pub related_q: Option<u32>,

    /// authored paragraph-end override; computed from the passage when absent
    pub is_paragraph_end: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub number: u32,

    #[serde(default)]
    pub choices: Vec<Choice>,

    /// index of the correct choice
    pub correct_answer: u32,

    pub explanation: Option<String>,

    pub nuance_explanation: Option<String>,
}

impl Question {
    pub fn correct_choice(&self) -> Option<&Choice> {
        self.choices.iter().find(|c| c.index == self.correct_answer)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub text: String,
}
