//! Line-based operator over a reader and a writer

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use stream_manager_core::Operator;

/// Prompts on `output` and reads answers line by line from `input`
///
/// End of input (or a read error) answers `None`.
pub struct ConsoleOperator<R, W> {
    input: R,
    output: W,
}

impl ConsoleOperator<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleOperator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Operator for ConsoleOperator<R, W> {
    fn ask(&mut self, prompt: &str) -> Option<String> {
        write!(self.output, "{}: ", prompt).ok()?;
        self.output.flush().ok()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn notify(&mut self, message: &str) {
        let _ = writeln!(self.output, "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_answers_then_end_of_input() {
        let mut output = Vec::new();
        let mut console = ConsoleOperator::new(Cursor::new("one piece\r\n\n"), &mut output);

        assert_eq!(console.ask("Anime name"), Some("one piece".to_string()));
        assert_eq!(console.ask("Episode"), Some(String::new()));
        assert_eq!(console.ask("Quality"), None);
        console.notify("done");

        let written = String::from_utf8(output).unwrap();
        assert_eq!(written, "Anime name: Episode: Quality: done\n");
    }
}
