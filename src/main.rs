use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use credit_report_pdf::{Error, RecordOrder, RenderOptions, convert_json_to_pdf};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Order {
    /// Highest credit first
    Value,
    /// Oldest document first
    Date,
    /// Input order
    Input,
}

impl From<Order> for RecordOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Value => RecordOrder::CreditValueDesc,
            Order::Date => RecordOrder::IssueDateAsc,
            Order::Input => RecordOrder::AsProvided,
        }
    }
}

/// Render a tax credit recovery report from its JSON data.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Report data as JSON
    input: PathBuf,

    /// Output file, or a directory to write the suggested file name into
    /// (defaults to the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// PNG or JPEG logo for the cover page
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Rows shown per category table
    #[arg(long, default_value_t = 40)]
    max_rows: usize,

    /// Rows shown in the traceability annex
    #[arg(long, default_value_t = 10_000)]
    annex_cap: usize,

    /// Row order of the category tables
    #[arg(long, value_enum, default_value_t = Order::Value)]
    order: Order,

    /// Report id (derived from the tax id and period when omitted)
    #[arg(long)]
    report_id: Option<String>,
}

fn run(args: Args) -> Result<PathBuf, Error> {
    let mut options = RenderOptions::default()
        .with_max_category_rows(args.max_rows)
        .with_annex_row_cap(args.annex_cap)
        .with_record_order(args.order.into());
    if let Some(id) = args.report_id {
        options = options.with_report_id(id);
    }
    if let Some(path) = &args.logo {
        match std::fs::read(path) {
            Ok(bytes) => options = options.with_logo(bytes),
            Err(e) => log::warn!("Cannot read logo {}: {e}", path.display()),
        }
    }

    let output = args.output.unwrap_or_else(|| PathBuf::from("."));
    convert_json_to_pdf(&args.input, &output, &options)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("credit_report_pdf=info"),
    )
    .init();

    match run(Args::parse()) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
