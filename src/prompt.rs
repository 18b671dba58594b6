//! Interactive confirmation.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{theme::ColorfulTheme, Input};

use crate::error::Result;

/// Asks the operator a question and returns the raw answer.
pub trait Prompter {
    fn ask(&self, question: &str) -> Result<String>;
}

/// Reads answers from the terminal, or a line of standard input when it is
/// not a terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&self, question: &str) -> Result<String> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            let mut stdout = io::stdout();
            write!(stdout, "{} ", question)?;
            stdout.flush()?;
            return read_answer(stdin.lock());
        }

        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }
}

/// One answer line from `reader`, without its line ending. End of input is
/// an empty answer.
pub fn read_answer(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// An answer declines when it starts with `n` or `N`. Anything else,
/// including an empty answer, accepts.
pub fn is_decline(answer: &str) -> bool {
    answer
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'n'))
}
