use anyhow::Result;
use formkit::cli::build_cli;

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    formkit::cli::handlers::dispatch(&matches)
}
