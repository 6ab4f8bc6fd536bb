use mailroom_core::cli;

fn main() {
    mailroom_core::init();
    if let Err(err) = cli::run_cli() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
