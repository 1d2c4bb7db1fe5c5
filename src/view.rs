//! Display state and rendering.
//!
//! Both panels share one state shape, [`LoadState`]. The generation panel adds a
//! submit guard on top ([`GenerationView`]); the recent panel is rebuilt from
//! scratch on every activation. Rendering produces Markdown.

use chrono::{DateTime, Locale, TimeZone, Utc};
use std::fmt::{Display, Write};

use crate::client::{
    config::DisplaySettings,
    error::ChefError,
    types::{GenerationRequest, RecipeRecord, RecipeResult},
};

pub const ELLIPSIS: char = '…';

const KO_DATE_TIME: &str = "%Y. %-m. %-d. %p %-I:%M:%S";
const DEFAULT_DATE_TIME: &str = "%x %X";

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Success(T),
    /// Finished without error but with nothing to show
    Empty,
    Error(ChefError),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&ChefError> {
        match self {
            LoadState::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl LoadState<Vec<RecipeRecord>> {
    /// Terminal state of a recent-list fetch.
    pub fn from_rows(outcome: Result<Vec<RecipeRecord>, ChefError>) -> Self {
        match outcome {
            Ok(rows) if rows.is_empty() => LoadState::Empty,
            Ok(rows) => LoadState::Success(rows),
            Err(e) => LoadState::Error(e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    BlankTitle,
    Pending,
}

impl SubmitRejected {
    pub fn notice(&self) -> &'static str {
        match self {
            SubmitRejected::BlankTitle => "Enter a dish name first.",
            SubmitRejected::Pending => "A recipe is already being generated. Please wait.",
        }
    }
}

/// The generation panel.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationView {
    state: LoadState<RecipeResult>,
}

impl Default for GenerationView {
    fn default() -> Self {
        Self {
            state: LoadState::Idle,
        }
    }
}

impl GenerationView {
    pub fn state(&self) -> &LoadState<RecipeResult> {
        &self.state
    }

    /// Whether the submit control is enabled for `title`.
    pub fn can_submit(&self, title: &str) -> bool {
        !self.state.is_loading() && !title.trim().is_empty()
    }

    /// Clears the previous result and enters `Loading`.
    pub fn begin(&mut self, title: &str) -> Result<GenerationRequest, SubmitRejected> {
        if self.state.is_loading() {
            return Err(SubmitRejected::Pending);
        }
        let request = GenerationRequest::new(title).ok_or(SubmitRejected::BlankTitle)?;
        self.state = LoadState::Loading;
        Ok(request)
    }

    pub fn finish(&mut self, outcome: Result<RecipeResult, ChefError>) {
        self.state = match outcome {
            Ok(result) => LoadState::Success(result),
            Err(e) => LoadState::Error(e),
        };
    }

    /// Drops an unfinished request. No-op unless `Loading`.
    pub fn abandon(&mut self) {
        if self.state.is_loading() {
            self.state = LoadState::Idle;
        }
    }
}

/// Collapses every whitespace run into one space and cuts the text to
/// `budget` characters.
///
/// Runs at either end also become a single space. `…` is appended only when
/// characters were dropped.
pub fn preview_body(text: &str, budget: usize) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                normalized.push(' ');
            }
            in_run = true;
        } else {
            normalized.push(c);
            in_run = false;
        }
    }

    let mut chars = normalized.chars();
    let mut preview: String = chars.by_ref().take(budget).collect();
    if chars.next().is_some() {
        preview.push(ELLIPSIS);
    }
    preview
}

/// Human-readable creation time in `locale`, shown in `tz`.
pub fn format_created_at<Tz>(created_at: &DateTime<Utc>, tz: &Tz, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let pattern = match locale {
        Locale::ko_KR => KO_DATE_TIME,
        _ => DEFAULT_DATE_TIME,
    };
    created_at
        .with_timezone(tz)
        .format_localized(pattern, locale)
        .to_string()
}

pub fn render_recipe(result: &RecipeResult) -> String {
    let mut out = format!("## {}\n\n{}\n", result.title, result.recipe);
    if let Some(url) = result.image() {
        let _ = write!(out, "\n![{}]({})\n", result.title, url);
    }
    out
}

pub fn render_generation(state: &LoadState<RecipeResult>) -> String {
    match state {
        LoadState::Idle | LoadState::Empty => {
            "No recipe yet. Enter a dish name to generate one.".to_string()
        }
        LoadState::Loading => "Generating...".to_string(),
        LoadState::Success(result) => render_recipe(result),
        LoadState::Error(e) => e.notice(),
    }
}

pub fn render_record<Tz>(record: &RecipeRecord, settings: &DisplaySettings, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    if let Some(url) = record.image() {
        let _ = writeln!(out, "![{}]({})", record.title, url);
    }
    let _ = writeln!(out, "### {}", record.title);
    let _ = writeln!(out, "{}", preview_body(record.body(), settings.preview_chars));
    let _ = writeln!(
        out,
        "_{}_",
        format_created_at(&record.created_at, tz, settings.locale)
    );
    out
}

pub fn render_recent<Tz>(
    state: &LoadState<Vec<RecipeRecord>>,
    settings: &DisplaySettings,
    tz: &Tz,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match state {
        LoadState::Idle | LoadState::Loading => "Loading recent recipes...".to_string(),
        LoadState::Error(e) => e.notice(),
        LoadState::Empty => "No recipes yet.".to_string(),
        LoadState::Success(records) => records
            .iter()
            .map(|record| render_record(record, settings, tz))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
