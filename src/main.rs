use clap::Parser;
use std::process;

use stopwords::cli::{Args, usage_error};
use stopwords::config::CONFIG;
use stopwords::pipeline::Pipeline;

fn main() -> anyhow::Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match usage_error(&e) {
            None => e.exit(),
            Some(err) => {
                e.print()?;
                process::exit(err.exit_code());
            }
        },
    };

    // Bridge log crate -> tracing (so log::info! etc. work)
    tracing_log::LogTracer::init()?;
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let pipeline = Pipeline::new(args.language_source(&CONFIG)).with_fallback_notice(
        |requested, used| {
            eprintln!("Warning: language '{requested}' not supported, using '{used}'");
        },
    );

    if args.languages {
        match pipeline.languages() {
            Ok(languages) => {
                for language in languages {
                    println!("{language}");
                }
                return Ok(());
            }
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(e.exit_code());
            }
        }
    }

    let config = args.filter_config(&CONFIG);
    match pipeline.run(&config) {
        Ok(output) => {
            if !output.text.is_empty() {
                println!("{}", output.text);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(e.exit_code());
        }
    }
}
