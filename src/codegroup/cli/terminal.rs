use super::print::write_message;
use codegroup::api::CmdMessage;
use codegroup::editor::open_in_editor;
use codegroup::error::Result;
use codegroup::interaction::Interaction;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// [`Interaction`] over a line-based reader and writer.
///
/// Menus are numbered lists answered by number; an empty line or end of
/// input cancels. Documents open in the configured editor, or are only
/// announced by path when there is none.
pub struct Terminal<R: BufRead, W: Write> {
    input: R,
    out: W,
    editor: Option<String>,
}

impl Terminal<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(editor: Option<String>) -> Self {
        Terminal::new(io::stdin().lock(), io::stdout(), editor)
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, out: W, editor: Option<String>) -> Self {
        Self { input, out, editor }
    }

    /// Reads one line without its line ending; `None` at end of input.
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        self.prompt_line(&format!("{}: ", prompt))
    }

    /// Writes `prompt` as-is and reads the answer.
    pub fn prompt_line(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.out, "{}", prompt);
        let _ = self.out.flush();
        self.read_line()
    }

    pub fn println(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
    }

    #[cfg(test)]
    pub(super) fn written(&self) -> &W {
        &self.out
    }
}

impl<R: BufRead, W: Write> Interaction for Terminal<R, W> {
    fn input(&mut self, prompt: &str) -> Option<String> {
        self.ask(prompt)
    }

    fn pick(&mut self, prompt: &str, options: &[String]) -> Option<usize> {
        if options.is_empty() {
            return None;
        }
        let _ = writeln!(self.out, "{}", prompt);
        for (i, option) in options.iter().enumerate() {
            let _ = writeln!(self.out, "  {:>2}) {}", i + 1, option);
        }

        loop {
            let answer = self.ask(&format!("Choose [1-{}]", options.len()))?;
            let answer = answer.trim();
            if answer.is_empty() {
                return None;
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Some(n - 1),
                _ => {
                    let _ = writeln!(self.out, "Not a choice: {}", answer);
                }
            }
        }
    }

    fn pick_file(&mut self, prompt: &str) -> Option<PathBuf> {
        self.ask(prompt)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    fn notify(&mut self, message: &CmdMessage) {
        let _ = write_message(&mut self.out, message);
    }

    fn open_document(&mut self, path: &Path) -> Result<()> {
        match &self.editor {
            Some(editor) => open_in_editor(editor, path),
            None => {
                let _ = writeln!(self.out, "Saved to {}", path.display());
                Ok(())
            }
        }
    }
}
