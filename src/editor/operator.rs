use std::io::{self, BufRead, Write};

use super::types::Confirmation;

pub const DEFAULT_ABORT_TOKEN: &str = "q";

const RULE: &str =
    "-------------------------------------------------------------------------------";

/// The human in the loop: answers prompts while the editor waits.
pub trait Operator {
    /// Show `prompt` and block until the operator confirms or aborts.
    fn acknowledge(&mut self, prompt: &str) -> io::Result<Confirmation>;
}

/// Prompts on a text stream and reads one line per answer.
///
/// Any line other than the abort token confirms. End of input aborts, so a
/// closed stdin never lets a destructive step through.
pub struct ConsoleOperator<R, W> {
    input: R,
    output: W,
    abort_token: String,
}

impl ConsoleOperator<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(abort_token: impl Into<String>) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), abort_token)
    }
}

impl<R: BufRead, W: Write> ConsoleOperator<R, W> {
    /// Answers are compared trimmed, so the token is trimmed once here too.
    pub fn new(input: R, output: W, abort_token: impl Into<String>) -> Self {
        let abort_token: String = abort_token.into();
        Self {
            input,
            output,
            abort_token: abort_token.trim().to_string(),
        }
    }
}

impl<R: BufRead, W: Write> Operator for ConsoleOperator<R, W> {
    fn acknowledge(&mut self, prompt: &str) -> io::Result<Confirmation> {
        writeln!(self.output, "{RULE}")?;
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(Confirmation::Abort);
        }

        if answer.trim() == self.abort_token {
            Ok(Confirmation::Abort)
        } else {
            Ok(Confirmation::Confirmed)
        }
    }
}
