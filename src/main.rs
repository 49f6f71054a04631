use anyhow::{Context, Result};
use clap::Parser;
use cosechar::{
    cli::{Cli, OutputFormat},
    collect, csv_output,
    json_output::{JsonReport, JsonVersion},
    pattern, plot, table_output,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Aggregate and reduce every requested version into the report
fn build_report(args: &Cli) -> Result<JsonReport> {
    let config = collect::FieldConfig {
        missed_field: args.missed_field.clone(),
        pkt_field: args.pkt_field.clone(),
        extension: args.extension.clone(),
    };

    let mut versions = Vec::new();
    for version in &args.versions {
        let pattern = pattern::ResultPattern::new(version)?;
        let data = collect::collect_results(&args.data_dir, &pattern, &config)
            .with_context(|| format!("aggregation failed for version {}", version))?;
        tracing::debug!(version = %version, runs = data.run_count(), "collected result tree");
        versions.push(JsonVersion::build(
            version,
            table_output::version_label(version),
            &data,
            args.confidence,
            args.intervals,
        ));
    }

    Ok(JsonReport {
        confidence: args.confidence,
        versions,
    })
}

fn render_report(report: &JsonReport, format: OutputFormat, intervals: bool) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for version in &report.versions {
                print!("{}", table_output::render_version(version));
            }
        }
        OutputFormat::Json => {
            println!("{}", report.render()?);
        }
        OutputFormat::Csv => {
            print!("{}", csv_output::CsvOutput::new(intervals).to_csv(report));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.confidence <= 0.0 || args.confidence >= 1.0 {
        anyhow::bail!(
            "Invalid value for --confidence: {} (must be in (0, 1))",
            args.confidence
        );
    }

    init_tracing(args.verbose);

    let report = build_report(&args)?;
    render_report(&report, args.format, args.intervals)?;

    if let Some(plot_path) = &args.plot {
        let opts = plot::PlotOptions {
            log_x: args.log_x,
            log_y: args.log_y,
            annotate: args.annotate,
            ..plot::PlotOptions::default()
        };
        plot::render_chart(&report, plot_path, &opts)?;
        eprintln!("chart written to {}", plot_path.display());
    }

    Ok(())
}
