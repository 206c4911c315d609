use clap::Parser;
use langfuse_cli::{Cli, run};
use langfuse_types::exit_code;

fn main() {
    // Reset SIGPIPE to default behavior to prevent panic on broken pipe
    // (e.g., when piping to `head` or `less` that exits early)
    #[cfg(unix)]
    reset_sigpipe();

    if let Err(e) = ctrlc::set_handler(|| {
        std::process::exit(exit_code::CANCELLED);
    }) {
        eprintln!("Warning: could not install interrupt handler: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(e.exit_code());
    }
}

#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
