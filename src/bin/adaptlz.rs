use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use adaptlz::{
    decompress_frame, is_frame, read_frame, CompressionConfig, Encoder, MatchStrategy,
    DEFAULT_BASE_WINDOW_SIZE, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_WINDOW_SIZE,
};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "adaptlz")]
#[command(about = "LZ77 compression with repetitiveness-adaptive windows")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file into an adaptlz frame
    Compress(CompressArgs),
    /// Decompress an adaptlz frame
    Decompress(DecompressArgs),
    /// Print frame metadata and exit (0=frame, 1=not a frame, 2=error)
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct CompressArgs {
    /// Input file (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Output frame (use - for stdout)
    #[arg(short, long)]
    output: PathBuf,

    /// Search window for ordinary input
    #[arg(long, default_value_t = DEFAULT_BASE_WINDOW_SIZE)]
    base_window: usize,

    /// Largest window used for highly repetitive input
    #[arg(long, default_value_t = DEFAULT_MAX_WINDOW_SIZE)]
    max_window: usize,

    /// Bytes per independently compressed chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Number of threads (0 = auto, 1 = single-threaded)
    #[arg(short = 't', long, default_value = "1")]
    threads: usize,

    /// Match search strategy
    #[arg(long, value_enum, default_value_t = Strategy::ByteIndex)]
    strategy: Strategy,

    /// Show verbose statistics
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct DecompressArgs {
    /// Input frame (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (use - for stdout)
    #[arg(short, long)]
    output: PathBuf,

    /// Show verbose statistics
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Input frame (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    BruteForce,
    ByteIndex,
}

impl From<Strategy> for MatchStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::BruteForce => MatchStrategy::BruteForce,
            Strategy::ByteIndex => MatchStrategy::ByteIndex,
        }
    }
}

/// Exit codes for inspect mode
const EXIT_IS_FRAME: u8 = 0;
const EXIT_NOT_FRAME: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run() -> Result<u8, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Compress(args) => run_compress(&args),
        Command::Decompress(args) => run_decompress(&args),
        Command::Inspect(args) => run_inspect(&args),
    }
}

fn run_compress(args: &CompressArgs) -> Result<u8, Box<dyn std::error::Error>> {
    let config = CompressionConfig {
        base_window_size: args.base_window,
        max_window_size: args.max_window,
        chunk_size: args.chunk_size,
        num_threads: args.threads,
        match_strategy: args.strategy.into(),
        ..Default::default()
    };
    // Fail on a bad configuration before touching any files
    let encoder = Encoder::with_config(config)?;

    let input = read_input(&args.input)?;
    let mut output = open_output(&args.output)?;

    let start = std::time::Instant::now();
    let stats = encoder.compress_to_writer(&input, &mut output)?;
    output.flush()?;
    let elapsed = start.elapsed();

    if args.verbose {
        eprintln!("Compression complete:");
        eprintln!("  Input bytes:      {}", stats.input_bytes);
        eprintln!("  Chunks:           {}", stats.chunks);
        eprintln!("  Expanded windows: {}", stats.expanded_windows);
        eprintln!("  Tokens:           {}", stats.tokens);
        eprintln!("  Literals:         {}", stats.literals);
        eprintln!("  Matches:          {}", stats.matches);
        eprintln!("  Matched bytes:    {}", stats.matched_bytes);
        eprintln!("  Time:             {:.2?}", elapsed);
        eprintln!(
            "  Throughput:       {:.1} MB/s",
            stats.input_bytes as f64 / elapsed.as_secs_f64() / 1_000_000.0
        );
    }

    Ok(0)
}

fn run_decompress(args: &DecompressArgs) -> Result<u8, Box<dyn std::error::Error>> {
    let mut input = open_input(&args.input)?;

    let start = std::time::Instant::now();
    let data = decompress_frame(&mut input)?;
    let elapsed = start.elapsed();

    let mut output = open_output(&args.output)?;
    output.write_all(&data)?;
    output.flush()?;

    if args.verbose {
        eprintln!("Decompression complete:");
        eprintln!("  Output bytes:     {}", data.len());
        eprintln!("  Time:             {:.2?}", elapsed);
    }

    Ok(0)
}

fn run_inspect(args: &InspectArgs) -> Result<u8, Box<dyn std::error::Error>> {
    let raw = read_input(&args.input)?;

    if !is_frame(&mut raw.as_slice())? {
        eprintln!("Frame: no");
        return Ok(EXIT_NOT_FRAME);
    }

    let frame = read_frame(&mut raw.as_slice())?;
    let matches = frame.tokens.iter().filter(|t| !t.is_literal()).count();

    eprintln!("Frame: yes");
    eprintln!("Version: {}", frame.header.version);
    eprintln!("Original size: {} bytes", frame.header.original_size);
    eprintln!("Frame size: {} bytes", raw.len());
    eprintln!("Tokens: {} ({} matches)", frame.header.token_count, matches);
    eprintln!("CRC32: 0x{:08x}", frame.crc32);

    Ok(EXIT_IS_FRAME)
}

fn is_stdio(path: &Path) -> bool {
    path.to_str() == Some("-")
}

fn open_input(path: &Path) -> io::Result<Box<dyn Read>> {
    if is_stdio(path) {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    open_input(path)?.read_to_end(&mut data)?;
    Ok(data)
}

fn open_output(path: &Path) -> io::Result<Box<dyn Write>> {
    if is_stdio(path) {
        Ok(Box::new(io::stdout().lock()))
    } else {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}
