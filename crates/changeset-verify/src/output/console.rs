use changeset_operations::traits::Reporter;

/// Prints progress lines to stdout.
pub(crate) struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    pub(crate) fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }
}
