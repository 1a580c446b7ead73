use xtabs_core::init_logging;

mod app;
mod commands;

fn main() {
    let app = app::build_cli();
    let matches = app.get_matches();

    let quiet = matches.get_flag("quiet");
    let verbose = matches.get_flag("verbose");
    init_logging(quiet, verbose);

    if let Err(e) = commands::run_command(&matches) {
        eprintln!("xtabs: {}", e);
        std::process::exit(1);
    }
}
