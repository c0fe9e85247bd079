//! rclinic main entrypoint.

use rclinic::run;
use rclinic::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
