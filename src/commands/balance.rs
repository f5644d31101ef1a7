use anyhow::Result;

use objj::balance::balance_line;

/// Print the replacement snippet with no trailing newline, ready to insert
pub fn execute(line: &str, column: usize) -> Result<()> {
    print!("{}", balance_line(line, column));
    Ok(())
}
