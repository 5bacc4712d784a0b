/// Where the status line goes.
pub trait Printer {
    fn println(&self, output: &str);
}
