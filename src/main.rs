//! rtoil main entrypoint.

use rtoil::run;
use rtoil::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
