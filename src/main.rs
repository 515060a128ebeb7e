use std::io;

use anyhow::Result;
use tracing::info;

use arbiter_cli::Session;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!("arbiter starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new();
    let outcome = session.run(stdin.lock(), stdout.lock())?;

    info!(?outcome, "game over");
    Ok(())
}
