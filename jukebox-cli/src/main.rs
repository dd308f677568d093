use anyhow::Context;
use clap::{ArgAction, Parser};
use jukebox_cli::{logging, App};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jukebox")]
#[command(about = "Line-oriented jukebox command interpreter")]
struct Cli {
    /// Command file to execute; reads from stdin when omitted.
    input: Option<PathBuf>,

    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, global = true, default_value_t = false)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let app = App::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.input {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("opening command file {}", path.display()))?;
            app.run(BufReader::new(file), &mut out)?;
        }
        None => {
            let stdin = io::stdin();
            app.run(stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}
