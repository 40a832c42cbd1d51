#![forbid(unsafe_code)]
use std::io::Write;
use std::path::PathBuf;
use std::{env, ffi, fs, io, process};

use lzw12::stream::AllResult;
use lzw12::{decode, encode};

fn main() -> CodingResult {
    CodingResult::catch_panic(|| {
        let flags = Flags::from_args(env::args_os()).unwrap_or_else(|ParamError| explain());
        run_coding(flags)
    })
}

fn run_coding(flags: Flags) -> Result<(), io::Error> {
    let input = flags.file.unwrap_or_else(explain);
    let operation = flags.operation.unwrap_or(Operation::Compress);

    let result = match flags.output {
        Some(path) => {
            let file = fs::File::create(path)?;
            let writer = io::BufWriter::with_capacity(1 << 20, file);
            run_streams(operation, input, writer)?
        }
        None => {
            let out = io::stdout();
            let writer = io::BufWriter::with_capacity(1 << 20, out.lock());
            run_streams(operation, input, writer)?
        }
    };

    result.status?;
    if flags.verbose {
        eprintln!(
            "bytes read = {} , bytes written = {}",
            result.bytes_read, result.bytes_written
        );
    }
    Ok(())
}

fn run_streams(
    operation: Operation,
    input: Input,
    mut writer: impl Write,
) -> Result<AllResult, io::Error> {
    let result = match (input, operation) {
        (Input::File(file), Operation::Compress) => {
            let data = fs::File::open(file)?;
            let file = io::BufReader::with_capacity(1 << 20, data);
            encode::Encoder::new().encode(file, &mut writer)
        }
        (Input::Stdin, Operation::Compress) => {
            let stdin = io::stdin();
            let input = io::BufReader::with_capacity(1 << 20, stdin.lock());
            encode::Encoder::new().encode(input, &mut writer)
        }
        (Input::File(file), Operation::Decompress) => {
            let data = fs::File::open(file)?;
            let file = io::BufReader::with_capacity(1 << 20, data);
            decode::Decoder::new().decode(file, &mut writer)
        }
        (Input::Stdin, Operation::Decompress) => {
            let stdin = io::stdin();
            let input = io::BufReader::with_capacity(1 << 20, stdin.lock());
            decode::Decoder::new().decode(input, &mut writer)
        }
    };
    writer.flush()?;
    Ok(result)
}

struct Flags {
    file: Option<Input>,
    output: Option<PathBuf>,
    operation: Option<Operation>,
    verbose: bool,
}

struct ParamError;

#[derive(Debug)]
enum Input {
    File(PathBuf),
    Stdin,
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Compress,
    Decompress,
}

fn explain<T>() -> T {
    println!(
        "Usage: lzw12 [-c|-d] [-o <out>] <file>\n\
        Arguments:\n\
        -c\t operation compress (default)\n\
        -d\t operation decompress\n\
        -o\t output filepath (default stdout)\n\
        -v\t report byte totals on stderr\n\
        <file>\tfilepath or '-' for stdin"
    );
    process::exit(1);
}

impl Default for Flags {
    fn default() -> Flags {
        Flags {
            file: None,
            output: None,
            operation: None,
            verbose: false,
        }
    }
}

fn command() -> clap::Command<'static> {
    clap::Command::new("lzw12")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compress and decompress 12-bit LZW binary data")
        .arg(
            clap::Arg::new("compress")
                .short('c')
                .long("--compress")
                .takes_value(false),
        )
        .arg(
            clap::Arg::new("decompress")
                .short('d')
                .long("--decompress")
                .takes_value(false),
        )
        .group(
            clap::ArgGroup::new("operation")
                .args(&["compress", "decompress"])
                .multiple(false)
                .required(false),
        )
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("--output")
                .takes_value(true)
                .value_parser(clap::builder::ValueParser::path_buf()),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("--verbose")
                .takes_value(false),
        )
        .arg(
            clap::Arg::new("file")
                .default_value("-")
                .value_parser(clap::builder::ValueParser::path_buf()),
        )
}

impl Flags {
    fn from_args(mut args: impl Iterator<Item = ffi::OsString>) -> Result<Self, ParamError> {
        let mut flags = Flags::default();
        let matches = command().get_matches_from(args.by_ref());

        if matches.contains_id("decompress") {
            flags.operation = Some(Operation::Decompress);
        } else if matches.contains_id("compress") {
            flags.operation = Some(Operation::Compress);
        }

        flags.verbose = matches.contains_id("verbose");
        flags.output = matches.get_one::<PathBuf>("output").cloned();

        match matches.get_one::<PathBuf>("file") {
            None => flags.file = Some(Input::Stdin),
            Some(p) if *p == PathBuf::from("-") => flags.file = Some(Input::Stdin),
            Some(p) => flags.file = Some(Input::File(p.clone())),
        }

        Ok(flags)
    }
}

enum CodingResult {
    Ok,
    Err(io::Error),
    Panic,
}

impl CodingResult {
    fn catch_panic(op: fn() -> Result<(), io::Error>) -> Self {
        std::panic::catch_unwind(|| match op() {
            Ok(()) => CodingResult::Ok,
            Err(err) => CodingResult::Err(err),
        })
        .unwrap_or(CodingResult::Panic)
    }
}

impl std::process::Termination for CodingResult {
    fn report(self) -> std::process::ExitCode {
        match self {
            CodingResult::Ok => std::process::ExitCode::SUCCESS,
            CodingResult::Err(err) => {
                eprintln!("{}", err);
                std::process::ExitCode::FAILURE
            }
            CodingResult::Panic => {
                eprintln!(
                    "The process failed irrecoverably! This should never happen and is a bug."
                );
                std::process::ExitCode::from(128)
            }
        }
    }
}
