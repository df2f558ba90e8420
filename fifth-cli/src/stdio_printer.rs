use std::io::Write;

/// Writes interpreter results to an output stream (stdout unless told
/// otherwise) and diagnostics to stderr.
///
/// Results are written a whole line at a time, and the output is flushed
/// before anything goes to stderr, so the two streams interleave in the
/// order the lines were produced.
pub struct StdioPrinter {
    out: Box<dyn Write>,
}

impl Default for StdioPrinter {
    fn default() -> Self {
        StdioPrinter::with_output(Box::new(std::io::stdout()))
    }
}

impl StdioPrinter {
    pub fn with_output(out: Box<dyn Write>) -> Self {
        StdioPrinter { out }
    }

    /// Print the given string followed by a newline.
    pub fn println<T: AsRef<str>>(&mut self, value: T) {
        // A closed stdout (e.g. piping into `head`) isn't worth crashing over.
        let _ = self.out.write_all(value.as_ref().as_bytes());
        let _ = self.out.write_all(b"\n");
    }

    /// Flush the output, then write the given string to stderr followed by
    /// a newline.
    pub fn eprintln<T: AsRef<str>>(&mut self, value: T) {
        let _ = self.out.flush();
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(value.as_ref().as_bytes());
        let _ = stderr.write_all(b"\n");
    }
}
