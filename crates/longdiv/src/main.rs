#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = longdiv::run_from_env() {
        eprintln!("longdiv: {error}");
        std::process::exit(error.exit_code());
    }
}
