//! Operator I/O: one blocking line of text per prompt.

use anyhow::{Context, Result};
use log::warn;
use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::engine::tools::{file_stem_caption, truncate_chars};

/// Asks the operator something and returns the answer without its trailing newline.
/// Answers longer than `max_len` characters are cut to `max_len` with a warning.
pub trait Operator: Send {
    fn prompt(&mut self, message: &str, max_len: usize) -> Result<String>;

    /// Caption default when the operator gives none. Only [`AutoOperator`] fills one in.
    fn default_caption(&self, _path: &str) -> Option<String> {
        None
    }
}

/// Read one line from `input`, strip `\n` / `\r\n`, and cap it at `max_len` characters.
/// EOF yields an empty string. Bytes that are not valid UTF-8 are replaced with U+FFFD.
pub fn read_bounded_line<R: BufRead>(input: &mut R, max_len: usize) -> Result<String> {
    let mut raw = Vec::new();
    input
        .read_until(b'\n', &mut raw)
        .context("read operator input")?;
    let mut line = match String::from_utf8(raw) {
        Ok(line) => line,
        Err(e) => {
            warn!("input is not valid UTF-8; invalid bytes were replaced");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    if truncate_chars(&mut line, max_len) {
        warn!("input longer than {} characters was truncated", max_len);
    }
    Ok(line)
}

/// Prompts on stdout, reads from stdin.
#[derive(Default)]
pub struct StdinOperator;

impl Operator for StdinOperator {
    fn prompt(&mut self, message: &str, max_len: usize) -> Result<String> {
        let mut out = std::io::stdout().lock();
        write!(out, "{message}: ").context("write prompt")?;
        out.flush().context("flush prompt")?;
        drop(out);
        read_bounded_line(&mut std::io::stdin().lock(), max_len)
    }
}

/// Answers from a fixed script, in order; empty answers once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedOperator {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompt messages seen so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Operator for ScriptedOperator {
    fn prompt(&mut self, message: &str, max_len: usize) -> Result<String> {
        self.asked.push(message.to_string());
        let mut answer = self.answers.pop_front().unwrap_or_default();
        if truncate_chars(&mut answer, max_len) {
            warn!("input longer than {} characters was truncated", max_len);
        }
        Ok(answer)
    }
}

/// Non-interactive: never rotates, caption is the file stem.
#[derive(Debug, Default)]
pub struct AutoOperator;

impl Operator for AutoOperator {
    fn prompt(&mut self, _message: &str, _max_len: usize) -> Result<String> {
        Ok(String::new())
    }

    fn default_caption(&self, path: &str) -> Option<String> {
        Some(file_stem_caption(path))
    }
}
