//! Terminal output for CLI handlers.
//!
//! Every printed record goes through [`emit`], which picks one of three
//! renderings from the process-wide [`Mode`]: indented colored text, nothing
//! (quiet, except alerts), or one `{"type", "payload"}` JSON object per line.

use std::fmt::Display;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};

/// How handlers render their output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Human,
    /// Human rendering limited to warnings and errors.
    Quiet,
    /// Line-delimited JSON on stdout.
    Json,
}

impl Mode {
    /// Resolve the global `--json`/`--quiet` flags. `--json` wins.
    #[must_use]
    pub const fn from_flags(json: bool, quiet: bool) -> Self {
        match (json, quiet) {
            (true, _) => Self::Json,
            (false, true) => Self::Quiet,
            (false, false) => Self::Human,
        }
    }
}

static MODE: RwLock<Mode> = parking_lot::const_rwlock(Mode::Human);

/// Whether a record is still shown in quiet mode.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Importance {
    Normal,
    Alert,
}

pub fn configure(mode: Mode) {
    *MODE.write() = mode;
}

fn mode() -> Mode {
    *MODE.read()
}

#[must_use]
pub fn is_json() -> bool {
    mode() == Mode::Json
}

#[must_use]
pub fn is_quiet() -> bool {
    mode() == Mode::Quiet
}

fn envelope(kind: &str, payload: Value) -> Value {
    json!({ "type": kind, "payload": payload })
}

fn emit(kind: &str, payload: Value, importance: Importance, human: impl FnOnce()) {
    match mode() {
        Mode::Json => println!("{}", envelope(kind, payload)),
        Mode::Quiet if importance == Importance::Normal => {}
        Mode::Human | Mode::Quiet => human(),
    }
}

/// Labeled value, aligned in a column.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        json!({ "label": label, "value": value }),
        Importance::Normal,
        || println!("  {:<14} {}", label.dimmed(), value),
    );
}

pub fn success(message: &str) {
    emit(
        "success",
        json!({ "message": message }),
        Importance::Normal,
        || println!("  {} {}", "✓".green(), message),
    );
}

pub fn warning(message: &str) {
    emit(
        "warning",
        json!({ "message": message }),
        Importance::Alert,
        || println!("  {} {}", "!".yellow().bold(), message),
    );
}

/// Errors go to stderr in every mode so stdout stays parseable.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", envelope("error", json!({ "message": message })));
    } else {
        eprintln!("  {} {}", "×".red(), message);
    }
}

pub fn section(title: &str) {
    emit("section", json!({ "title": title }), Importance::Normal, || {
        println!();
        println!("{}", title.bold());
    });
}

pub fn note(message: &str) {
    emit(
        "note",
        json!({ "message": message }),
        Importance::Normal,
        || println!("  {}", message.dimmed()),
    );
}

/// Pre-rendered block such as a table, indented line by line.
pub fn lines(content: &str) {
    emit(
        "lines",
        json!({ "content": content }),
        Importance::Normal,
        || content.lines().for_each(|line| println!("  {line}")),
    );
}

fn tint(value: impl Display, paint: impl FnOnce(&str) -> String) -> String {
    let text = value.to_string();
    if is_json() {
        text
    } else {
        paint(&text)
    }
}

#[must_use]
pub fn positive(value: impl Display) -> String {
    tint(value, |s| s.green().to_string())
}

#[must_use]
pub fn negative(value: impl Display) -> String {
    tint(value, |s| s.red().to_string())
}

#[must_use]
pub fn highlight(value: impl Display) -> String {
    tint(value, |s| s.cyan().to_string())
}

/// Print a command's own JSON document, bypassing the envelope.
pub fn json_output(value: Value) {
    println!("{value}");
}
