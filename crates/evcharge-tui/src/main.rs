#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = evcharge_tui::run_from_env() {
        eprintln!("evcharge: {error}");
        std::process::exit(error.exit_code());
    }
}
