use spin::cli;

fn main() {
    // Logging is initialized inside process_cli, once --log-level is known.
    let code = cli::process_cli();
    if code != 0 {
        std::process::exit(code);
    }
}
