#[macro_use]
extern crate log;

mod cat;
mod dump;
mod error;
mod info;
mod list;
mod partition;

use clap::Parser;
use fat12::io::std::FileIO;
use fat12::Volume;

use error::Error;

#[derive(Debug, clap::Args)]
struct List {
    /// Specify path to list, only root directory supported
    #[clap(default_value = "/")]
    path: String,
}

#[derive(Debug, clap::Args)]
struct Cat {
    /// Specify 8.3 file name in root directory
    name: String,
}

#[derive(Debug, clap::Args)]
struct Dump {
    /// Specify 8.3 file name in root directory
    name: String,
    /// Start offset in bytes
    #[clap(short, long, default_value_t = 0)]
    offset: u64,
    /// Number of bytes to dump, default to rest of file
    #[clap(short, long)]
    length: Option<usize>,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// Show boot sector and volume layout
    Info,
    /// List file and directory in specified path
    #[clap(name = "ls")]
    List(List),
    /// Concatenate file and print on the standard output
    Cat(Cat),
    /// Hex dump part of file
    Dump(Dump),
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long)]
    quiet: bool,
    #[clap(short, action = clap::ArgAction::Count)]
    verbosity: u8,
    /// block device or image file that formatted with FAT12
    #[clap(short, long)]
    device: String,
    /// MBR partition index, whole device is the volume if not specified
    #[clap(short, long)]
    partition: Option<usize>,
    #[clap(subcommand)]
    action: Action,
}

fn run(args: Args) -> Result<(), Error> {
    let start_sector = match args.partition {
        Some(index) => partition::start_sector(&args.device, index)?,
        None => 0,
    };
    let io = FileIO::open(&args.device)?;
    let volume = Volume::mount(io, start_sector)?;
    match args.action {
        Action::Info => info::info(&volume),
        Action::List(args) => list::list(&volume, &args.path),
        Action::Cat(args) => cat::cat(&volume, &args.name),
        Action::Dump(args) => dump::dump(&volume, &args.name, args.offset, args.length),
    }
}

fn main() {
    let args = Args::parse();
    let level = match (args.quiet, args.verbosity) {
        (true, _) => log::LevelFilter::Off,
        (_, 0) => log::LevelFilter::Info,
        (_, 1) => log::LevelFilter::Debug,
        (_, _) => log::LevelFilter::Trace,
    };
    log::set_max_level(level);
    env_logger::builder().filter(None, level).target(env_logger::Target::Stdout).init();

    if let Err(error) = run(args) {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}
