// Copyright 2024 Karpeles Lab Inc.
// yalz compression command-line tool

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, Write};
use yalz::{Encoder, Reader, Writer, DEFAULT_BLOCKSIZE, DEFAULT_SEARCHLEN};

/// Hash table modulus for small mode
const SMALL_BLOCKSIZE: usize = 4096;

/// Uncompressed payload per emitted message
const MESSAGE_SIZE: usize = 10 * 1024 * 1024;

/// Message payload in small mode
const SMALL_MESSAGE_SIZE: usize = 100 * 1024;

#[derive(Parser)]
#[command(name = "yalz")]
#[command(about = "LZ77 compression tool; input is stdin, output is stdout", long_about = None)]
#[command(version)]
struct Args {
    /// Compress
    #[arg(short = 'c')]
    compress: bool,

    /// Decompress
    #[arg(short = 'd')]
    decompress: bool,

    /// Fast mode: much faster compression, worse ratio
    #[arg(short = '1')]
    fast: bool,

    /// Small mode: smaller hash tables and buffers, for small inputs
    #[arg(short = '2')]
    small: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match (args.compress, args.decompress) {
        (true, false) => compress_stdio(&args),
        (false, true) => decompress_stdio(),
        _ => bail!("exactly one of -c (compress) or -d (decompress) is required"),
    }
}

fn compress_stdio(args: &Args) -> Result<()> {
    let searchlen = if args.fast { 1 } else { DEFAULT_SEARCHLEN };
    let blocksize = if args.small {
        SMALL_BLOCKSIZE
    } else {
        DEFAULT_BLOCKSIZE
    };
    let message_size = if args.small {
        SMALL_MESSAGE_SIZE
    } else {
        MESSAGE_SIZE
    };

    let stdin = io::stdin();
    let stdout = io::stdout();

    let encoder = Encoder::with_params(searchlen, blocksize);
    let mut writer = Writer::with_encoder(stdout.lock(), encoder, message_size);

    io::copy(&mut stdin.lock(), &mut writer).context("compression failed")?;
    writer.flush().context("compression failed")?;

    Ok(())
}

fn decompress_stdio() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut reader = Reader::new(stdin.lock());
    let mut writer = stdout.lock();

    io::copy(&mut reader, &mut writer).context("decompression failed")?;
    writer.flush().context("decompression failed")?;

    Ok(())
}
