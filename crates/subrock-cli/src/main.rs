mod cli;

use crate::cli::Cli;

fn main() {
    // Parse CLI and dispatch. Per-target failures are reported, not turned into exit codes.
    Cli::parse_args().run();
}
