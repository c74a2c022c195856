//! Interactive selection between a list of options.
//!
//! `Prompter` is the only place the resolver can block. Two
//! implementations ship with the crate:
//! - `TerminalPrompter`: an arrow-key menu on stderr (dialoguer)
//! - `ReaderPrompter`: reads one answer line from any reader, for piped
//!   stdin and tests

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;

use crate::errors::PromptError;

/// Ask the operator to pick one of `options`.
///
/// Implementations must keep the order of `options` and return one of
/// them verbatim.
pub trait Prompter {
    fn select(
        &mut self,
        title: &str,
        description: &str,
        options: &[String],
    ) -> Result<String, PromptError>;
}

impl<P: Prompter + ?Sized> Prompter for Box<P> {
    fn select(
        &mut self,
        title: &str,
        description: &str,
        options: &[String],
    ) -> Result<String, PromptError> {
        (**self).select(title, description, options)
    }
}

/// Arrow-key menu rendered on stderr.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(
        &mut self,
        title: &str,
        description: &str,
        options: &[String],
    ) -> Result<String, PromptError> {
        if options.is_empty() {
            return Err(PromptError::NoOptions);
        }

        let picked = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{title} ({description})"))
            .items(options)
            .default(0)
            .interact_opt()
            .map_err(|e| PromptError::Terminal(e.to_string()))?;

        match picked {
            Some(index) => Ok(options[index].clone()),
            None => Err(PromptError::Cancelled),
        }
    }
}

/// Line-based selection: prints numbered options to `echo` and reads a
/// single line from `input`.
///
/// The answer may be an option verbatim or its 1-based number. End of
/// input is `PromptError::Closed`; there are no retries.
pub struct ReaderPrompter<R, W> {
    input: R,
    echo: W,
}

impl<R: BufRead, W: Write> ReaderPrompter<R, W> {
    pub fn new(input: R, echo: W) -> Self {
        Self { input, echo }
    }
}

impl<R: BufRead, W: Write> Prompter for ReaderPrompter<R, W> {
    fn select(
        &mut self,
        title: &str,
        description: &str,
        options: &[String],
    ) -> Result<String, PromptError> {
        if options.is_empty() {
            return Err(PromptError::NoOptions);
        }

        writeln!(self.echo, "{title}")?;
        writeln!(self.echo, "{description}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.echo, "  {}) {option}", i + 1)?;
        }
        write!(self.echo, "> ")?;
        self.echo.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        let answer = line.trim();

        if let Some(exact) = options.iter().find(|o| o.as_str() == answer) {
            return Ok(exact.clone());
        }

        match answer.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => Ok(options[n - 1].clone()),
            _ => Err(PromptError::InvalidChoice(answer.to_string())),
        }
    }
}

/// Pick the prompter for this process: a terminal menu when stdin is a
/// TTY, otherwise a line read from stdin with the menu echoed to `echo`.
pub fn for_stdin(echo: Box<dyn Write>) -> Box<dyn Prompter> {
    if io::stdin().is_terminal() {
        Box::new(TerminalPrompter)
    } else {
        Box::new(ReaderPrompter::new(io::stdin().lock(), echo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["all".into(), "key1".into(), "key2".into()]
    }

    fn select(input: &str) -> (Result<String, PromptError>, String) {
        let mut echo = Vec::new();
        let result =
            ReaderPrompter::new(input.as_bytes(), &mut echo).select("Pick", "one of", &options());
        (result, String::from_utf8(echo).unwrap())
    }

    #[test]
    fn selects_by_name() {
        let (result, _) = select("key2\n");
        assert_eq!(result.unwrap(), "key2");
    }

    #[test]
    fn selects_by_number() {
        let (result, _) = select("1\n");
        assert_eq!(result.unwrap(), "all");
    }

    #[test]
    fn tolerates_crlf_and_spaces() {
        let (result, _) = select("  key1 \r\n");
        assert_eq!(result.unwrap(), "key1");
    }

    #[test]
    fn closed_input_is_an_error() {
        let (result, _) = select("");
        assert!(matches!(result, Err(PromptError::Closed)));
    }

    #[test]
    fn unknown_answer_is_rejected() {
        let (result, _) = select("nope\n");
        assert!(matches!(result, Err(PromptError::InvalidChoice(a)) if a == "nope"));
        let (result, _) = select("4\n");
        assert!(matches!(result, Err(PromptError::InvalidChoice(_))));
    }

    #[test]
    fn menu_keeps_option_order() {
        let (_, echo) = select("1\n");
        assert_eq!(echo, "Pick\none of\n  1) all\n  2) key1\n  3) key2\n> ");
    }

    #[test]
    fn empty_options_fail() {
        let mut prompter = ReaderPrompter::new("x\n".as_bytes(), io::sink());
        assert!(matches!(
            prompter.select("t", "d", &[]),
            Err(PromptError::NoOptions)
        ));
    }
}
