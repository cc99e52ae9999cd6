use anyhow::Context;
use hoststorage::{Dataport, HostEntropy, HostStorage, Storage, StorageConfig};
use log::{debug, LevelFilter};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "hoststorage", about = "Inspect and modify an emulated storage device")]
struct Opt {
    /// Directory holding the backing file.
    #[structopt(long, default_value = ".", parse(from_os_str))]
    dir: PathBuf,

    /// Backing file name.
    #[structopt(long, default_value = "nvm_06")]
    file: String,

    /// Device size in bytes.
    #[structopt(long, default_value = "1048576")]
    size: u64,

    #[structopt(long, default_value = "1")]
    block_size: usize,

    /// Transfer buffer capacity in bytes.
    #[structopt(long, default_value = "4096")]
    dataport: usize,

    /// Raise log verbosity, may be repeated.
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(StructOpt)]
enum Command {
    /// Show device geometry and backing file state.
    Info,
    /// Hex dump a range of the device.
    Read { offset: u64, size: usize },
    /// Write hex encoded bytes at an offset.
    Write { offset: u64, hex: String },
    /// Erase a range of the device.
    Erase { offset: u64, size: u64 },
    /// Print random bytes from the host entropy device.
    Random { len: usize },
}

fn decode_hex(txt: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let txt: String = txt.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(txt)
}

fn dump(offset: u64, data: &[u8]) {
    for (i, line) in data.chunks(16).enumerate() {
        let bytes: Vec<String> = line.iter().map(|b| format!("{:02x}", b)).collect();
        println!("{:08x}: {}", offset + (i * 16) as u64, bytes.join(" "));
    }
}

fn run(opt: Opt) -> anyhow::Result<()> {
    let config = StorageConfig::default()
        .with_dir(&opt.dir)
        .with_file_name(&opt.file)
        .with_file_size(opt.size)
        .with_block_size(opt.block_size);
    debug!("Using {:?}", config);

    match opt.cmd {
        Command::Info => {
            let storage = HostStorage::with_dataport(config, Dataport::new(opt.dataport));
            println!("file:       {}", storage.path().display());
            println!("size:       {}", storage.size());
            println!("block size: {}", storage.block_size());
            println!("dataport:   {}", storage.dataport().size());
            println!("state:      {:?}", storage.file_state());
        }
        Command::Read { offset, size } => {
            let mut storage = HostStorage::with_dataport(config, Dataport::new(opt.dataport));
            let rd = storage
                .read(offset, size)
                .with_context(|| format!("reading {} bytes at {}", size, offset))?;
            dump(offset, &storage.dataport().buf()[..rd]);
        }
        Command::Write { offset, hex } => {
            let data = decode_hex(&hex).with_context(|| format!("decoding '{}'", hex))?;
            let mut storage = HostStorage::with_dataport(config, Dataport::new(opt.dataport));
            storage.dataport_mut().load(&data);
            let wr = storage
                .write(offset, data.len())
                .with_context(|| format!("writing {} bytes at {}", data.len(), offset))?;
            println!("wrote {} bytes at {}", wr, offset);
        }
        Command::Erase { offset, size } => {
            let mut storage = HostStorage::with_dataport(config, Dataport::new(opt.dataport));
            let er = storage
                .erase(offset, size)
                .with_context(|| format!("erasing {} bytes at {}", size, offset))?;
            println!("erased {} bytes at {}", er, offset);
        }
        Command::Random { len } => {
            let mut entropy = HostEntropy::new(Dataport::new(opt.dataport));
            let rd = entropy.read(len);
            dump(0, &entropy.dataport().buf()[..rd]);
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();

    let mut builder = env_logger::builder();
    builder.format_timestamp_nanos();
    match opt.verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        2 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();

    run(opt)
}
