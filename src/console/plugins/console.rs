use super::printer::Printer;

/// Prints to `stdout`, which the monitoring system reads.
pub struct Console {}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

impl Printer for Console {
    fn println(&self, output: &str) {
        println!("{}", &output);
    }
}
