use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use env_logger::Env;

use mail_threader::loader::load_messages;
use mail_threader::render::{render_json, render_text};
use mail_threader::{Threader, ThreadingConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "mail-threader",
    about = "Arrange mail messages into conversation threads"
)]
struct Args {
    /// Message files, directories of message files, or maildirs.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Do not merge root threads that share a subject.
    #[arg(long)]
    no_subject_gathering: bool,

    /// Keep sibling lists newest-first.
    #[arg(long)]
    no_reverse: bool,

    /// Print threading statistics to stderr.
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    let mut config = ThreadingConfig::from_env();
    if args.no_subject_gathering {
        config.gather_subjects = false;
    }
    if args.no_reverse {
        config.reverse_children = false;
    }

    let loaded = load_messages(&args.paths);
    if loaded.messages.is_empty() && !loaded.errors.is_empty() {
        writeln!(io::stderr(), "error: no readable messages")?;
        std::process::exit(1);
    }

    let threader = Threader::new(config);
    log::debug!("threading with {:?}", threader.config());
    let (head, stats) = threader.thread_with_stats(loaded.messages);

    let rendered = match args.format {
        OutputFormat::Text => render_text(head.as_ref()),
        OutputFormat::Json => render_json(head.as_ref())? + "\n",
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    if args.stats {
        writeln!(io::stderr(), "{}", serde_json::to_string_pretty(&stats)?)?;
    }

    Ok(())
}
