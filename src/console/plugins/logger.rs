use std::cell::RefCell;

use super::printer::Printer;

/// Keeps the output in memory instead of printing it.
pub struct Logger {
    output: RefCell<String>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: RefCell::new(String::new()),
        }
    }

    pub fn log(&self) -> String {
        self.output.borrow().clone()
    }
}

impl Printer for Logger {
    fn println(&self, output: &str) {
        let mut captured = self.output.borrow_mut();
        captured.push_str(output);
        captured.push('\n');
    }
}
