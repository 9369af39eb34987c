//! Subcommand implementations. Each returns the process exit code.

pub mod classify;
pub mod generate;

/// Run a command body, printing its error to stderr and mapping the outcome
/// to a process exit code.
pub fn run_command<F>(f: F) -> i32
where
    F: FnOnce() -> crate::error::Result<()>,
{
    match f() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}
