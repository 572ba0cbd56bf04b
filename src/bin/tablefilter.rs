/// TableFilter command-line front end
///
/// Reads a JSON array of records and an optional JSON filter mapping, applies
/// the filters and writes the resulting records to stdout.

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use tablefilter::{apply_filters, records_from_json, FilterMapping};

#[derive(Parser, Debug)]
#[command(name = "tablefilter", version, about = "Filter and sort JSON records by per-column filter state")]
struct Args {
    /// JSON array of records, or `-` for stdin
    records: String,

    /// JSON object of column filter states, or `-` for stdin
    filters: Option<String>,

    /// Pretty-print the output
    #[arg(long, env = "TABLEFILTER_PRETTY")]
    pretty: bool,
}

fn read_json(path: &str) -> Result<serde_json::Value, String> {
    let text = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read '{}': {}", path, e))?
    };
    serde_json::from_str(&text).map_err(|e| format!("Invalid JSON in '{}': {}", path, e))
}

fn run(args: &Args) -> Result<String, String> {
    if args.records == "-" && args.filters.as_deref() == Some("-") {
        return Err("Records and filters cannot both be read from stdin".to_string());
    }

    let records = records_from_json(&read_json(&args.records)?)?;
    let filters = match &args.filters {
        Some(path) => FilterMapping::from_json(&read_json(path)?)?,
        None => FilterMapping::new(),
    };
    log::info!(
        "filtering {} records through {} column filters ({} active)",
        records.len(),
        filters.len(),
        filters.active_columns().len()
    );

    let rows = apply_filters(&records, &filters);
    log::info!("{} records left after filtering", rows.len());

    let output = if args.pretty {
        serde_json::to_string_pretty(&rows)
    } else {
        serde_json::to_string(&rows)
    };
    output.map_err(|e| format!("Failed to encode output: {}", e))
}

fn main() -> ExitCode {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Args::parse();
    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(message) => {
            log::error!("{}", message);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_positional_paths_and_pretty_flag() {
        let args = Args::try_parse_from(["tablefilter", "rows.json", "filters.json", "--pretty"]).unwrap();
        assert_eq!(args.records, "rows.json");
        assert_eq!(args.filters.as_deref(), Some("filters.json"));
        assert!(args.pretty);

        let args = Args::try_parse_from(["tablefilter", "-"]).unwrap();
        assert_eq!(args.records, "-");
        assert!(args.filters.is_none());

        assert!(Args::try_parse_from(["tablefilter"]).is_err());
    }

    #[test]
    fn test_both_inputs_from_stdin_rejected() {
        let args = Args::try_parse_from(["tablefilter", "-", "-"]).unwrap();
        let err = run(&args).unwrap_err();
        assert!(err.contains("stdin"));
    }
}
