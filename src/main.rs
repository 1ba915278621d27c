use std::env;
use std::fs::File;
use std::io::BufReader;

use anyhow::Context;
use modcheck::report::Reporter;
use modcheck::verifier::TraceVerifier;

/// Where the library under test leaves its trace when no path is given.
const DEFAULT_TRACE_PATH: &str = "img/bignum_test.out";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_TRACE_PATH.to_string());
    log::info!("opening trace {path}");
    let file = File::open(&path).with_context(|| format!("failed to open trace {path}"))?;

    let mut reporter = Reporter::stdout();
    let outcome = TraceVerifier::new(BufReader::new(file))
        .run(&mut reporter)
        .context("malformed trace")?;
    reporter.summary(&outcome)?;

    // Mismatches are reported, not signaled: the exit status stays zero even
    // when the tally is not.
    Ok(())
}
