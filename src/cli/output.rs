//! Colored terminal output helpers.
//!
//! Notices go to the info sink handed in by the caller, so `--quiet`
//! can swap it for a discard sink. Decoded values never pass through
//! here.

use std::io::{self, Write};

use console::style;

/// Print a red error message to stderr: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold().for_stderr(), msg);
}

/// Write a blue info notice: "info_sign {msg}"
pub fn info(sink: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(sink, "{} {}", style("\u{2139}").blue().bold().for_stderr(), msg)
}

/// Write a dim tip/hint: "arrow {msg}"
pub fn tip(sink: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(
        sink,
        "{} {}",
        style("\u{2192}").dim().for_stderr(),
        style(msg).dim().for_stderr()
    )
}
