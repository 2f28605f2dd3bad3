use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossword_csp::picture::{is_image_path, load_font, save_image};
use crossword_csp::{render_grid, solve, Crossword, FillFailure, SolverOptions, Structure, WordList};
use instant::Duration;
use log::{error, info, warn, LevelFilter};

/// Fill a crossword structure with words from a word list.
#[derive(Parser, Debug)]
#[command(name = "crossword", version, about)]
struct Cli {
    /// Structure file: `_` marks a letter cell, anything else a block.
    structure: PathBuf,

    /// Word list file, one word per line.
    words: PathBuf,

    /// Also write the solved grid to this file: an image if the extension names one (`.png`),
    /// otherwise the text rendering.
    output: Option<PathBuf>,

    /// Font used to draw letters in image output.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Skip arc consistency after each tentative assignment.
    #[arg(long, default_value_t = false)]
    no_inference: bool,

    /// Give up after this many seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Log solver progress. `RUST_LOG` takes precedence.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn })
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err);
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> crossword_csp::Result<ExitCode> {
    let structure = Structure::from_file(&cli.structure)?;
    let words = WordList::from_file(&cli.words)?;
    info!(
        "Loaded a {}x{} structure and {} words",
        structure.height(),
        structure.width(),
        words.len()
    );

    let crossword = Crossword::new(structure, words);
    let options = SolverOptions {
        inference: !cli.no_inference,
        deadline: cli.timeout.map(Duration::from_secs),
    };

    match solve(&crossword, options) {
        Ok(result) => {
            info!("{:?}", result.statistics);

            let display_grid = render_grid(&crossword, &result.assignment);
            println!("{}", display_grid);

            if let Some(output) = &cli.output {
                if is_image_path(output) {
                    let font = cli.font.as_ref().map(load_font).transpose()?;
                    if font.is_none() {
                        warn!("No --font given, so {} will have no letters", output.display());
                    }
                    save_image(&crossword, &result.assignment, font.as_ref(), output)?;
                } else {
                    fs::write(output, format!("{}\n", display_grid))?;
                }
                info!("Wrote {}", output.display());
            }

            Ok(ExitCode::SUCCESS)
        }
        Err(FillFailure::DeadlineExceeded) => {
            println!("No solution found before the deadline.");
            Ok(ExitCode::FAILURE)
        }
        Err(failure) => {
            info!("{:?}", failure);
            println!("No solution.");
            Ok(ExitCode::SUCCESS)
        }
    }
}
