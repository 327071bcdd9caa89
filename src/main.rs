//! folio - render the portfolio in the current terminal.

use std::io;

use clap::Parser;

use folio_tui::app::{self, AppOptions};
use folio_tui::content;
use folio_tui::state::typewriter::DEFAULT_TYPE_MS;
use folio_tui::theme::Mode;

#[derive(Parser)]
#[command(name = "folio", about = "Reactive single-page terminal portfolio", version)]
struct Cli {
    /// Theme mode at startup (dark|light)
    #[arg(long, default_value = "dark")]
    theme: Mode,

    /// Hero typewriter duration in milliseconds (0 reveals immediately)
    #[arg(long = "type-ms", default_value_t = DEFAULT_TYPE_MS)]
    type_ms: u64,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let handle = app::mount(
        content::portfolio(),
        AppOptions {
            mode: cli.theme,
            type_ms: cli.type_ms,
        },
    )?;
    app::run(&handle)?;
    app::unmount(handle)
}
