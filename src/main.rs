use std::io;

use anyhow::Result;
use tracing::info;

use ferz_console::Session;

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with the board on stdout.
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    info!("ferz starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(stdin.lock(), stdout.lock()).run()?;
    Ok(())
}
