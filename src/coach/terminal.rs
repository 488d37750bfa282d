use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::*;

use super::types::{CoachContext, Conversation};

/// Coach Bot surface rendered on the controlling terminal.
pub struct TerminalCoach {
    course_root: PathBuf,
    thinking: AtomicBool,
}

impl TerminalCoach {
    pub fn new(course_root: impl Into<PathBuf>) -> Self {
        Self {
            course_root: course_root.into(),
            thinking: AtomicBool::new(false),
        }
    }

    fn clear_thinking_line(&self) {
        if self.thinking.swap(false, Ordering::SeqCst) {
            print!("\r\x1b[2K");
            let _ = io::stdout().flush();
        }
    }
}

#[async_trait]
impl Conversation for TerminalCoach {
    fn write(&self, message: &str) {
        self.clear_thinking_line();
        println!("{}", message);
    }

    fn show_thinking(&self) {
        if !self.thinking.swap(true, Ordering::SeqCst) {
            print!("{}", "💭 thinking...".dimmed());
            let _ = io::stdout().flush();
        }
    }

    fn hide_thinking(&self) {
        self.clear_thinking_line();
    }

    async fn input(&self, prompt: &str, placeholder: Option<&str>) -> Result<Option<String>> {
        self.clear_thinking_line();
        match placeholder {
            Some(hint) => print!("{} {} ", prompt.bold(), format!("({hint})").dimmed()),
            None => print!("{} ", prompt.bold()),
        }
        io::stdout().flush()?;

        let mut input = String::new();
        let read = io::stdin()
            .read_line(&mut input)
            .context("Failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }

        Ok(Some(input.trim().to_string()))
    }

    async fn context(&self) -> Result<CoachContext> {
        let workspace = std::fs::canonicalize(&self.course_root)
            .unwrap_or_else(|_| self.course_root.clone());
        Ok(CoachContext {
            workspace: Some(workspace.display().to_string()),
            open_files: Vec::new(),
        })
    }

    fn show_menu(&self) {
        self.clear_thinking_line();
        println!();
        println!("{}", "🤖 Coach Bot".bold().cyan());
    }

    fn hide_menu(&self) {
        println!();
    }
}
