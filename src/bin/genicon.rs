use std::path::Path;
use std::process::ExitCode;

use loops_assets::icon::{self, DEFAULT_SIZES, IconStyle};
use loops_assets::logger;

fn main() -> ExitCode {
    logger::init(false);
    let out_dir = Path::new("icons");
    match icon::generate_icon_set(out_dir, &DEFAULT_SIZES, IconStyle::Loop) {
        Ok(paths) => {
            println!("Wrote {} files to {}", paths.len(), out_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            logger::log_error("failed to generate icons", &e);
            ExitCode::FAILURE
        }
    }
}
