use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("xtabs")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Embed X11 windows as tabs inside one container window")
        .long_about("xtabs opens a container window, prints its window id on stdout, and embeds every program launched into it as a tab. Launch programs with the id (e.g. 'xterm -into <id>') or press 'n' in the container. The commands of embedded programs are saved to a session file and relaunched next time the session is opened.")
        .arg(
            Arg::new("session")
                .help("Session name (defaults to the configured session name)")
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Configuration file (default: ~/.xtabs/config.toml)"),
        )
}
