// util.rs

use std::io::Write;

/// Writes one line, treating a closed reader on the other end as success.
pub fn writeln_ignore_broken_pipe<W: Write + ?Sized, S: AsRef<str>>(w: &mut W, s: S) -> std::io::Result<()> {
    match writeln!(w, "{}", s.as_ref()) {
        Err(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Shortest round-trip rendering of a double: `5.0`, `0.3333333333333333`.
pub fn render_float(value: f64) -> String {
    format!("{:?}", value)
}
