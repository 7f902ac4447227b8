use clap::Parser;
use miette::Result;
use decal::cli::{init_tracing, Cli, Commands};
use decal::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let printer = Printer::new();
    let lang = cli.lang.as_deref();

    match cli.command {
        Commands::Compose(args) => decal::cli::compose::run(args, lang, &printer)?,
        Commands::Key(args) => decal::cli::key::run(args, &printer)?,
        Commands::Init(args) => decal::cli::init::run(args, &printer)?,
        Commands::Validate(args) => decal::cli::validate::run(args, &printer)?,
        Commands::Completions(args) => decal::cli::completions::run(args)?,
    }

    Ok(())
}
