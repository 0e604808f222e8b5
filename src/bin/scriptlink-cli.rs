use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use scriptlink::project::{encode_report, encode_sections};
use scriptlink::{DataLayout, LinkOpts, MatchOpts, Opts, OutputType, Project, SegmentOpts};

fn main() -> Result<()> {
    scriptlink::init_logging();
    let params = Params::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match params.command {
        Command::Sections(args) => {
            let project = args.data.project(Opts {
                link: LinkOpts {
                    url_prefix: args.url_prefix,
                },
                output_type: args.output_type,
                ..Opts::default()
            });
            let sections = project.sections().context("failed to build sections")?;
            encode_sections(&sections, args.output_type, &mut out)?;
        }
        Command::Match(args) => {
            let project = args.data.project(Opts {
                matching: MatchOpts {
                    threshold: args.threshold,
                    sample_size: args.sample,
                },
                output_type: args.output_type,
                ..Opts::default()
            });
            let report = project
                .diagnostics()
                .context("failed to run quote diagnostics")?;
            encode_report(&report, args.output_type, &mut out)?;
        }
        Command::Segments(args) => {
            let project = args.data.project(Opts::default());
            let segments = project.segments().context("failed to segment script")?;
            serde_json::to_writer_pretty(&mut out, &segments)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "scriptlink")]
#[command(about = "Link a script to recorded audio takes")]
struct Params {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Group linked clips by script section.
    Sections(SectionsArgs),

    /// Check how well sheet quotes match the script.
    Match(MatchArgs),

    /// Print the parsed script segments as JSON.
    Segments(SegmentsArgs),
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Directory holding `script.txt` and `metadata.json`.
    #[arg(short = 'd', long = "data-dir", default_value = "data")]
    data_dir: PathBuf,

    /// Directory holding the downloaded audio files.
    #[arg(short = 'a', long = "audio-dir", default_value = "static/audio")]
    audio_dir: PathBuf,

    /// Section header keyword (repeatable). Defaults to SCENE, SECTION and INTRO.
    #[arg(long = "section-marker")]
    section_markers: Vec<String>,
}

impl DataArgs {
    fn project(self, opts: Opts) -> Project {
        let layout = DataLayout {
            data_dir: self.data_dir,
            audio_dir: self.audio_dir,
        };
        let opts = Opts {
            segment: segment_opts(self.section_markers),
            ..opts
        };
        Project::new(layout, opts)
    }
}

#[derive(Args, Debug)]
struct SectionsArgs {
    #[command(flatten)]
    data: DataArgs,

    #[arg(
        short = 'o',
        long = "output-type",
        value_enum,
        default_value_t = OutputType::Text
    )]
    output_type: OutputType,

    /// Prefix for each clip's linked path.
    #[arg(long = "url-prefix", default_value = scriptlink::linker::DEFAULT_URL_PREFIX)]
    url_prefix: String,
}

#[derive(Args, Debug)]
struct MatchArgs {
    #[command(flatten)]
    data: DataArgs,

    #[arg(
        short = 'o',
        long = "output-type",
        value_enum,
        default_value_t = OutputType::Text
    )]
    output_type: OutputType,

    /// Fuzzy acceptance threshold in [0, 1].
    #[arg(short = 't', long = "threshold", default_value_t = scriptlink::DEFAULT_THRESHOLD, value_parser = parse_threshold)]
    threshold: f64,

    /// Number of missed quotes to print.
    #[arg(long = "sample", default_value_t = scriptlink::opts::DEFAULT_SAMPLE_SIZE)]
    sample: usize,
}

#[derive(Args, Debug)]
struct SegmentsArgs {
    #[command(flatten)]
    data: DataArgs,
}

fn segment_opts(markers: Vec<String>) -> SegmentOpts {
    if markers.is_empty() {
        SegmentOpts::default()
    } else {
        SegmentOpts {
            section_markers: markers,
        }
    }
}

fn parse_threshold(raw: &str) -> std::result::Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("threshold must be between 0 and 1, got {value}"))
    }
}
