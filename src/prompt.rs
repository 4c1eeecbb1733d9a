//! Questions the editor asks the user, and the answers it gets back.
//!
//! A [`Prompter`] may answer on the spot (native file dialogs, scripted
//! answers) or defer with [`Prompt::Pending`]. A deferred question is kept by
//! the editor as a [`PendingPrompt`] and blocks pointer input until
//! `Editor::resolve_prompt` delivers the [`PromptAnswer`].

use std::collections::VecDeque;
use std::path::PathBuf;

use egui::{Color32, Pos2};

/// The reply to a single question.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt<T> {
    Answered(T),
    Cancelled,
    /// The answer will arrive later through `Editor::resolve_prompt`
    Pending,
}

/// The user-facing dialogs the editor depends on.
pub trait Prompter {
    fn pick_color(&mut self, label: &str, current: Color32) -> Prompt<Color32>;

    /// Callers reject non-positive answers themselves.
    fn ask_integer(&mut self, label: &str, current: i64) -> Prompt<i64>;

    fn ask_text(&mut self, label: &str) -> Prompt<String>;

    fn open_path(&mut self) -> Prompt<PathBuf>;

    /// Extension filtering is advisory only.
    fn save_path(&mut self) -> Prompt<PathBuf>;
}

/// A question the editor is blocked on.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingPrompt {
    /// Text for a text drawable released at `position`
    Text { position: Pos2 },
    BrushColor,
    BrushSize,
    OutlineColor,
    OutlineSize,
    OpenPath,
    SavePath,
}

impl PendingPrompt {
    pub fn title(&self) -> &'static str {
        match self {
            PendingPrompt::Text { .. } => "Text Input",
            PendingPrompt::BrushColor => "Brush Color",
            PendingPrompt::BrushSize => "Brush Size",
            PendingPrompt::OutlineColor => "Outline Color",
            PendingPrompt::OutlineSize => "Outline Size",
            PendingPrompt::OpenPath => "Open",
            PendingPrompt::SavePath => "Save",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PendingPrompt::Text { .. } => "Enter text:",
            PendingPrompt::BrushColor | PendingPrompt::OutlineColor => "Pick a color:",
            PendingPrompt::BrushSize => "Enter brush size:",
            PendingPrompt::OutlineSize => "Enter outline size:",
            PendingPrompt::OpenPath => "Image to open:",
            PendingPrompt::SavePath => "Save image as:",
        }
    }
}

/// A deferred answer.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptAnswer {
    Color(Color32),
    Integer(i64),
    Text(String),
    Path(PathBuf),
    Cancelled,
}

/// Answers questions from a queue, in order. An exhausted queue cancels.
///
/// Useful for headless sessions and tests.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<PromptAnswer>,
    /// Labels of the questions asked so far
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answers(answers: impl IntoIterator<Item = PromptAnswer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    pub fn push(&mut self, answer: PromptAnswer) {
        self.answers.push_back(answer);
    }

    fn next(&mut self, label: &str) -> PromptAnswer {
        self.asked.push(label.to_owned());
        self.answers.pop_front().unwrap_or(PromptAnswer::Cancelled)
    }
}

impl Prompter for ScriptedPrompter {
    fn pick_color(&mut self, label: &str, _current: Color32) -> Prompt<Color32> {
        match self.next(label) {
            PromptAnswer::Color(color) => Prompt::Answered(color),
            _ => Prompt::Cancelled,
        }
    }

    fn ask_integer(&mut self, label: &str, _current: i64) -> Prompt<i64> {
        match self.next(label) {
            PromptAnswer::Integer(value) => Prompt::Answered(value),
            _ => Prompt::Cancelled,
        }
    }

    fn ask_text(&mut self, label: &str) -> Prompt<String> {
        match self.next(label) {
            PromptAnswer::Text(text) => Prompt::Answered(text),
            _ => Prompt::Cancelled,
        }
    }

    fn open_path(&mut self) -> Prompt<PathBuf> {
        match self.next("open") {
            PromptAnswer::Path(path) => Prompt::Answered(path),
            _ => Prompt::Cancelled,
        }
    }

    fn save_path(&mut self) -> Prompt<PathBuf> {
        match self.next("save") {
            PromptAnswer::Path(path) => Prompt::Answered(path),
            _ => Prompt::Cancelled,
        }
    }
}

/// Defers every question. Pair with `Editor::resolve_prompt`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeferredPrompter;

impl Prompter for DeferredPrompter {
    fn pick_color(&mut self, _label: &str, _current: Color32) -> Prompt<Color32> {
        Prompt::Pending
    }

    fn ask_integer(&mut self, _label: &str, _current: i64) -> Prompt<i64> {
        Prompt::Pending
    }

    fn ask_text(&mut self, _label: &str) -> Prompt<String> {
        Prompt::Pending
    }

    fn open_path(&mut self) -> Prompt<PathBuf> {
        Prompt::Pending
    }

    fn save_path(&mut self) -> Prompt<PathBuf> {
        Prompt::Pending
    }
}
