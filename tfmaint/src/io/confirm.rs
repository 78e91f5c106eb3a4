//! Yes/no confirmation before destructive actions.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

/// Asks the operator a yes/no question.
pub trait Confirmer {
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Any `Fn(&str) -> bool` is a confirmer, so callers can stub the prompt.
impl<F> Confirmer for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> Result<bool> {
        Ok(self(prompt))
    }
}

/// Confirmer used for `--yes`: every question is answered "yes".
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        debug!(prompt, "confirmation skipped (--yes)");
        Ok(true)
    }
}

/// Line-oriented prompt over a reader/writer pair.
///
/// Accepts `y`/`yes` and `n`/`no` (case-insensitive); anything else re-asks.
/// End of input counts as "no".
pub struct TerminalConfirmer<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl TerminalConfirmer<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, read answers from stdin.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }
}

impl<R: BufRead, W: Write> Confirmer for TerminalConfirmer<R, W> {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        let mut input = self.input.borrow_mut();
        let mut output = self.output.borrow_mut();
        loop {
            write!(output, "{prompt} [y/n]: ").context("write prompt")?;
            output.flush().context("flush prompt")?;

            let mut line = String::new();
            let n = input.read_line(&mut line).context("read answer")?;
            if n == 0 {
                writeln!(output).context("write prompt")?;
                debug!("end of input at confirmation prompt; treating as no");
                return Ok(false);
            }
            match parse_answer(&line) {
                Some(answer) => return Ok(answer),
                None => {
                    writeln!(output, "Please enter y or n.").context("write prompt")?;
                }
            }
        }
    }
}

fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
