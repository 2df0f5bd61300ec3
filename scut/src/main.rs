mod args;
mod error;
mod extract;
mod logging;
mod reader;
mod selection;

use std::io::{self, BufRead, BufWriter, Write};
use std::process::exit;

use tracing::{debug, warn};

use args::Args;
use error::Error;
use reader::{LineReader, LineStatus};

fn main() {
    logging::init();

    let args = match Args::build(std::env::args_os()) {
        Ok(args) => args,
        // --help and --version
        Err(Error::Usage(e)) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprintln!("Error : {}", e);
            exit(e.exit_code());
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    match run(&args, stdin.lock(), BufWriter::new(stdout.lock())) {
        Ok(_) => exit(0),
        Err(e) if e.is_broken_pipe() => exit(0),
        Err(e) => {
            eprintln!("Error : {}", e);
            exit(e.exit_code());
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    lines: usize,
    truncated: usize,
}

fn run<R: BufRead, W: Write>(args: &Args, input: R, mut output: W) -> Result<Summary, Error> {
    let mut reader = LineReader::new(input, args.max_line_bytes);
    let mut line = Vec::new();
    let mut out = Vec::new();
    let mut summary = Summary::default();

    while let Some(status) = reader.read_line(&mut line)? {
        summary.lines += 1;
        if let LineStatus::Truncated { dropped } = status {
            summary.truncated += 1;
            warn!(
                line = summary.lines,
                dropped,
                limit = args.max_line_bytes,
                "line too long, truncated"
            );
        }

        out.clear();
        extract::extract(args.mode, &line, &args.columns, &mut out);
        output.write_all(&out)?;
    }
    output.flush()?;

    debug!(lines = summary.lines, truncated = summary.truncated, "done");
    Ok(summary)
}
