use clap::{crate_version, Parser, Subcommand};
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sharesplit::codec::{decode_shares, encode_shares};
use sharesplit::config::Settings;
use sharesplit::sss::{combine, refresh_shares, split, Share};
use sharesplit::util::read_input;

#[derive(Debug, Subcommand)]
enum CliArgument {
    /// Split a secret into shares.
    Split {
        /// Number of parts to split into.
        #[clap(long, short)]
        parts: Option<usize>,

        /// Number of parts needed to restore.
        #[clap(long, short)]
        threshold: Option<usize>,

        /// Print a summary to stderr.
        #[clap(long, short)]
        verbose: bool,

        /// File holding the secret, stdin if omitted.
        file: Option<PathBuf>,
    },
    /// Restore a secret from shares, one hex share per line.
    ///
    /// Shares must be hex as printed by `split`. Base64 share files from
    /// other Shamir tools are not accepted.
    #[command(alias = "restore")]
    Combine {
        /// File holding the shares, stdin if omitted.
        file: Option<PathBuf>,
    },
    /// Re-randomize a share set without changing its secret.
    Refresh {
        /// Threshold the shares were split with.
        #[clap(long, short)]
        threshold: usize,

        /// File holding the shares, stdin if omitted.
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Parser)]
#[command(name = "sharesplit")]
#[command(version = crate_version!())]
#[command(
    about = "Split a secret into threshold shares and restore it",
    long_about = "sharesplit divides a secret into N shares using Shamir's Secret Sharing over GF(256). Any K of the shares restore the secret, fewer reveal nothing about it. Input is read from the named file, or from stdin when it is a pipe. Shares are printed one per line as hex. Restoring does not verify the result: too few shares, or shares from different splits, produce garbage without an error. Defaults for --parts and --threshold come from <config>/conf.toml and SHARESPLIT_PARTS / SHARESPLIT_THRESHOLD"
)]
struct Opt {
    /// Directory holding conf.toml.
    #[clap(long, short, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[clap(subcommand)]
    argument: CliArgument,
}

fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let opt = Opt::parse();
    let mut stdout = io::stdout().lock();

    match opt.argument {
        CliArgument::Split {
            parts,
            threshold,
            verbose,
            file,
        } => {
            let settings = Settings::load(opt.config.as_deref())?;
            let parts = parts.unwrap_or(settings.parts);
            let threshold = threshold.unwrap_or(settings.threshold);
            debug!("Using parts: {}, threshold: {}", parts, threshold);

            let secret = read_input(file.as_deref())?;
            let shares = split(&secret, parts, threshold)?;
            stdout.write_all(encode_shares(&shares).as_bytes())?;

            if verbose {
                eprintln!("✂️  Secret has been split.");
                eprintln!("    parts: {}", parts);
                eprintln!("    threshold: {}", threshold);
                eprintln!("    share length: {} bytes", secret.len() + 1);
            }
        }

        CliArgument::Combine { file } => {
            let text = read_input(file.as_deref())?;
            let shares = decode_shares(&String::from_utf8(text)?)?;
            debug!("Combining {} shares", shares.len());

            let secret = combine(&shares)?;
            stdout.write_all(&secret)?;
        }

        CliArgument::Refresh { threshold, file } => {
            let text = read_input(file.as_deref())?;
            let mut shares = decode_shares(&String::from_utf8(text)?)?
                .iter()
                .map(|bytes| Share::from_bytes(bytes))
                .collect::<Result<Vec<_>, _>>()?;
            debug!("Refreshing {} shares", shares.len());

            refresh_shares(&mut shares, threshold, &mut rand::rngs::OsRng)?;
            let refreshed: Vec<Vec<u8>> = shares.iter().map(Share::to_bytes).collect();
            stdout.write_all(encode_shares(&refreshed).as_bytes())?;
            eprintln!("🔄 Refreshed {} shares", refreshed.len());
        }
    }

    stdout.flush()?;
    Ok(())
}
