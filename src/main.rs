use clap::Parser;
use passvault::cli::commands;
use passvault::cli::{Cli, Commands};
use passvault::errors::Result;

fn main() {
    let cli = Cli::parse();

    passvault::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli),
        Commands::Add {
            ref service,
            ref username,
            ref category,
            ref notes,
            generate,
        } => commands::add::execute(
            &cli,
            service,
            username,
            category.as_deref(),
            notes.as_deref(),
            generate,
        ),
        Commands::List {
            favorites,
            ref category,
        } => commands::list::execute(&cli, favorites, category.as_deref()),
        Commands::Find { ref query } => commands::find::execute(&cli, query),
        Commands::Reveal { ref id, copy } => commands::reveal::execute(&cli, id, copy),
        Commands::Remove { ref id, force } => commands::remove::execute(&cli, id, force),
        Commands::Favorite { ref id } => commands::update::favorite(&cli, id),
        Commands::Category { ref id, ref name } => commands::update::category(&cli, id, name),
        Commands::Notes { ref id, ref text } => commands::update::notes(&cli, id, text),
        Commands::Categories => commands::categories::execute(&cli),
        Commands::RotateKey => commands::rotate::execute(&cli),
        Commands::Generate {
            length,
            no_digits,
            no_upper,
            no_special,
        } => commands::generate::execute(&cli, length, no_digits, no_upper, no_special),
        Commands::Audit { last, ref since } => audit(&cli, last, since.as_deref()),
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

#[cfg(feature = "audit-log")]
fn audit(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    commands::audit_cmd::execute(cli, last, since)
}

#[cfg(not(feature = "audit-log"))]
fn audit(_cli: &Cli, _last: usize, _since: Option<&str>) -> Result<()> {
    Err(passvault::errors::PassVaultError::CommandFailed(
        "this build was compiled without the audit-log feature".into(),
    ))
}
