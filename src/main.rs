use clap::Parser;
use inventory::cli::{Cli, Commands};
use miette::Result;

fn main() -> Result<()> {
    // Terminate quietly on a closed pipe (`inventory part list | head`)
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Part(cmd) => inventory::cli::commands::part::run(cmd, &global),
        Commands::Product(cmd) => inventory::cli::commands::product::run(cmd, &global),
        Commands::WhereUsed(args) => inventory::cli::commands::where_used::run(args, &global),
        Commands::Shell(args) => inventory::cli::commands::shell::run(args, &global),
        Commands::Completions(args) => inventory::cli::commands::completions::run(args),
    }
}
