use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use freq_rs::common::io::read_file;
use freq_rs::common::{io_error_msg, reset_sigpipe};
use freq_rs::report::{top_chars, top_words, TOP_K};
use freq_rs::{job, report};

#[derive(Parser)]
#[command(
    name = "ffreq",
    about = "Report the most frequent characters and words in FILE using parallel segment scanners"
)]
struct Cli {
    /// Input file
    file: String,

    /// Number of scan workers (defaults to the available CPU parallelism)
    #[arg(short = 'w', long = "workers", value_name = "N")]
    workers: Option<usize>,

    /// Print only the table rows, no headers
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    reset_sigpipe();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("ffreq: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let start = Instant::now();

    let workers = cli
        .workers
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
        .max(1);

    let data = read_file(Path::new(&cli.file))
        .map_err(|e| anyhow::anyhow!("{}", io_error_msg(&e)))
        .with_context(|| cli.file.clone())?;

    let global = job::run(&data, workers)?;

    let mut out = BufWriter::with_capacity(64 * 1024, io::stdout().lock());
    print_char_table(&mut out, &top_chars(&global.histogram, TOP_K), cli.quiet)?;
    print_word_table(&mut out, &top_words(&global.words, TOP_K), cli.quiet)?;

    let elapsed = start.elapsed().as_secs_f64();
    writeln!(out, "Total execution time: {:.6} seconds", elapsed)?;
    out.flush()?;
    Ok(())
}

fn print_char_table(out: &mut impl Write, ranked: &[(u8, u64)], quiet: bool) -> io::Result<()> {
    if !quiet {
        writeln!(out, "\n========= Top {} Characters =========", TOP_K)?;
        writeln!(out, "Ch\tFreq")?;
        writeln!(out, "-------------------------------------")?;
    }
    for &(ch, freq) in ranked {
        writeln!(out, "{}\t{}", ch as char, freq)?;
    }
    Ok(())
}

fn print_word_table(
    out: &mut impl Write,
    ranked: &[report::RankedWord],
    quiet: bool,
) -> io::Result<()> {
    if !quiet {
        writeln!(out, "\n=========== Top {} Words ============", TOP_K)?;
        writeln!(out, "{:<15}\tID\tFreq", "Word")?;
        writeln!(out, "-------------------------------------")?;
    }
    for row in ranked {
        writeln!(out, "{:<15}\t{}\t{}", row.word, row.id, row.freq)?;
    }
    Ok(())
}
