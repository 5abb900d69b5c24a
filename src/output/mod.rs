use anyhow::{Context, Result};
use lazy_static::lazy_static;
use log::info;
use regex::Regex;
use serde::Deserialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::quiz::Quiz;

#[cfg(test)]
pub mod mock;
pub mod render;

pub use render::{render_html, render_text, timestamp};

lazy_static! {
    static ref FORBIDDEN_FILE_NAME_CHARACTERS_REGEX: Regex =
        Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).unwrap();
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Html,
    Text,
}

impl Default for Format {
    fn default() -> Self {
        Format::Html
    }
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Text => "txt",
        }
    }

    pub fn render(self, title: &str, quiz: &Quiz) -> String {
        match self {
            Format::Html => render_html(title, quiz, &timestamp()),
            Format::Text => render_text(title, quiz),
        }
    }
}

pub trait QuizOutput {
    fn publish(&mut self, title: &str, quiz: &Quiz) -> Result<()>;
}

pub struct ConsoleOutput<W> {
    writer: W,
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(writer: W) -> Self {
        ConsoleOutput { writer }
    }
}

impl<W: Write> QuizOutput for ConsoleOutput<W> {
    fn publish(&mut self, title: &str, quiz: &Quiz) -> Result<()> {
        writeln!(self.writer, "{}", render_text(title, quiz))?;
        Ok(())
    }
}

pub fn sanitize_file_name(title: &str) -> String {
    FORBIDDEN_FILE_NAME_CHARACTERS_REGEX
        .replace_all(title, "")
        .trim()
        .to_owned()
}

/// Writes each quiz to `<directory>/<title>.<extension>`. Existing files are never
/// overwritten.
pub struct FileOutput {
    directory: PathBuf,
    format: Format,
}

impl FileOutput {
    pub fn new(directory: PathBuf, format: Format) -> Self {
        FileOutput { directory, format }
    }
}

impl QuizOutput for FileOutput {
    fn publish(&mut self, title: &str, quiz: &Quiz) -> Result<()> {
        let mut path = self.directory.clone();
        path.push(format!(
            "{}.{}",
            sanitize_file_name(title),
            self.format.extension()
        ));
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .with_context(|| format!("Could not create {}", path.display()))?;
        file.write_all(self.format.render(title, quiz).as_bytes())
            .with_context(|| format!("Could not write {}", path.display()))?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

/// Publishes a batch as `<title> #1`, `<title> #2`, ... followed by the optional
/// standalone backup set as `<title> Backups`.
pub fn publish_batch<O: QuizOutput + ?Sized>(
    output: &mut O,
    title: &str,
    quizzes: &[Quiz],
    backup_set: Option<&Quiz>,
) -> Result<()> {
    for (index, quiz) in quizzes.iter().enumerate() {
        output.publish(&format!("{} #{}", title, index + 1), quiz)?;
    }
    if let Some(backup_set) = backup_set {
        output.publish(&format!("{} Backups", title), backup_set)?;
    }
    Ok(())
}
