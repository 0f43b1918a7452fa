//! Interactive destination chooser for sideways migration.

use crate::error::Result;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Check if stdin is a terminal.
pub fn stdin_is_tty() -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::io::AsRawFd;
        unsafe { libc::isatty(std::io::stdin().as_raw_fd()) != 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

/// Ask on the terminal which of `candidates` to use.
///
/// Returns `None` without prompting when stdin is not a terminal.
pub fn choose_on_terminal(candidates: &[PathBuf]) -> Result<Option<PathBuf>> {
    if !stdin_is_tty() {
        tracing::warn!("stdin is not a terminal, cannot ask for a destination");
        return Ok(None);
    }
    let stdin = std::io::stdin();
    let mut stderr = std::io::stderr();
    pick(candidates, &mut stdin.lock(), &mut stderr)
}

/// Print a numbered list of `candidates` to `out` and read the answer from `input`.
///
/// The answer is either a number from the list or a note path as listed.
/// Anything else, including an empty line, picks nothing.
pub fn pick<R: BufRead, W: Write>(candidates: &[PathBuf], input: &mut R, out: &mut W) -> Result<Option<PathBuf>> {
    if candidates.is_empty() {
        return Ok(None);
    }

    for (i, path) in candidates.iter().enumerate() {
        writeln!(out, "{:>3}  {}", i + 1, path.display())?;
    }
    write!(out, "Destination: ")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();

    if let Ok(n) = answer.parse::<usize>() {
        return Ok(n.checked_sub(1).and_then(|i| candidates.get(i)).cloned());
    }

    Ok(candidates
        .iter()
        .find(|p| p.as_path() == Path::new(answer) || p.with_extension("") == Path::new(answer))
        .cloned())
}
