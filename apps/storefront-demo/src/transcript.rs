//! # Transcript
//!
//! Ordered line sink shared by the scenario runner and the product
//! out-of-stock listeners, so both end up in one sequence.
//!
//! Cloning a `Transcript` yields another handle to the same lines.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Rc<RefCell<Vec<String>>>,
    echo: bool,
}

impl Transcript {
    /// A transcript that only records.
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript that also prints every line to stdout as it arrives.
    pub fn echoing() -> Self {
        Transcript {
            lines: Rc::default(),
            echo: true,
        }
    }

    pub fn line(&self, line: impl Into<String>) {
        let line = line.into();
        if self.echo {
            println!("{}", line);
        }
        self.lines.borrow_mut().push(line);
    }

    pub fn blank(&self) {
        self.line(String::new());
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_lines() {
        let transcript = Transcript::new();
        let handle = transcript.clone();

        transcript.line("first");
        handle.blank();
        handle.line("second");

        assert_eq!(transcript.lines(), vec!["first", "", "second"]);
    }
}
