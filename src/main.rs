use clap::Parser;
use samurai::cli::commands::Cli;
use samurai::cli::launch::launch;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = launch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
