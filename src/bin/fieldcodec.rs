//! fieldcodec CLI - apply a base64 codec to one field of NDJSON log records
//!
//! Reads records from a file or stdin, transforms the configured field, and
//! writes the records back out as NDJSON. Logs go to stderr.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use fieldcodec::{
    CodecConfig, CodecRegistry, FieldValue, NdjsonReader, NdjsonWriter, RecordTransformer,
};

#[derive(Parser)]
#[command(name = "fieldcodec")]
#[command(version, about = "Apply a base64 codec to one field of NDJSON log records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform NDJSON records
    ///
    /// Decoded values that are not valid UTF-8 are written as JSON arrays of
    /// byte values. Those arrays are read back as lists, not bytes, so piping
    /// such output into an encode codec yields the error value.
    Run {
        /// Path to YAML codec configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: ConfigOverrides,

        /// Input file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short = 'O', long = "out")]
        out: Option<PathBuf>,
    },

    /// Validate a YAML codec configuration
    Validate {
        /// Path to YAML codec configuration
        #[arg(short, long, default_value = "codec.yaml")]
        config: PathBuf,
    },

    /// List registered codecs
    Codecs,

    /// Apply a codec to a single value and print the result
    Apply {
        /// Codec name
        #[arg(short, long)]
        codec: String,

        /// Value to transform
        value: String,
    },
}

/// Settings that override the config file (CLI > config file > defaults)
#[derive(clap::Args, Debug, Default)]
struct ConfigOverrides {
    /// Source field name
    #[arg(short, long)]
    field: Option<String>,

    /// Output field name (default: the source field)
    #[arg(short, long)]
    output_field: Option<String>,

    /// Codec name
    #[arg(long)]
    codec: Option<String>,

    /// Value written when the codec fails
    #[arg(short, long)]
    error_value: Option<String>,
}

impl ConfigOverrides {
    fn apply_to(self, mut config: CodecConfig) -> CodecConfig {
        if self.field.is_some() {
            config.field = self.field;
        }
        if self.output_field.is_some() {
            config.output_field = self.output_field;
        }
        if self.codec.is_some() {
            config.codec = self.codec;
        }
        if let Some(error_value) = self.error_value {
            config.error_value = error_value;
        }
        config
    }
}

fn main() {
    dotenv::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, overrides, input, out } => run(config, overrides, input, out),
        Commands::Validate { config } => validate_config(config),
        Commands::Codecs => list_codecs(),
        Commands::Apply { codec, value } => apply_codec(codec, value),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for NDJSON output.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Transform NDJSON records from input to output.
///
/// Malformed input lines are logged and skipped. Binary decode results are
/// written as arrays of byte values (see `fieldcodec run --help`).
fn run(
    config: Option<PathBuf>,
    overrides: ConfigOverrides,
    input: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<(), String> {
    let base = match &config {
        Some(path) => CodecConfig::load_from_file(path).map_err(|e| e.to_string())?,
        None => CodecConfig::default(),
    };
    let codec_config = overrides.apply_to(base);

    let transformer =
        RecordTransformer::new(&codec_config).map_err(|e| format!("Invalid configuration: {}", e))?;

    let reader: Box<dyn BufRead> = match &input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).map_err(|e| format!("Failed to open {}: {}", path.display(), e))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let writer: Box<dyn Write> = match &out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|e| format!("Failed to create {}: {}", path.display(), e))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut writer = NdjsonWriter::new(writer);
    let mut processed = 0usize;
    let mut skipped = 0usize;

    for result in NdjsonReader::new(reader) {
        match result {
            Ok(mut record) => {
                transformer.transform(&mut record);
                writer.write(&record).map_err(|e| e.to_string())?;
                processed += 1;
            }
            Err(e) => {
                tracing::warn!("Skipping input: {}", e);
                skipped += 1;
            }
        }
    }

    writer.flush().map_err(|e| e.to_string())?;
    tracing::info!(processed, skipped, "Finished");

    Ok(())
}

/// Validate a YAML configuration without processing records
fn validate_config(config: PathBuf) -> Result<(), String> {
    let codec_config = CodecConfig::load_from_file(&config).map_err(|e| e.to_string())?;
    let settings = codec_config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    println!("✓ {} is valid", config.display());
    println!("  field:        {}", settings.source_field());
    println!("  output_field: {}", settings.output_field());
    println!("  codec:        {}", settings.codec());
    println!("  error_value:  {:?}", settings.error_value());

    Ok(())
}

fn list_codecs() -> Result<(), String> {
    for name in CodecRegistry::builtin().list_codecs() {
        println!("{}", name);
    }
    Ok(())
}

/// Apply one codec to one value; codec failures are reported, not replaced
fn apply_codec(codec: String, value: String) -> Result<(), String> {
    let codec = CodecRegistry::builtin()
        .lookup(&codec)
        .ok_or_else(|| format!("Unknown codec: {}", codec))?;

    let output = codec.apply(value.as_bytes()).map_err(|e| e.to_string())?;

    match FieldValue::from_bytes(output) {
        FieldValue::Bytes(bytes) => io::stdout()
            .write_all(&bytes)
            .map_err(|e| format!("Failed to write output: {}", e))?,
        other => println!("{}", other),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config() -> CodecConfig {
        CodecConfig::new("payload", "base64-decode")
            .with_output_field("decoded")
            .with_error_value("<invalid>")
    }

    #[test]
    fn test_flag_overrides_config_file() {
        let overrides = ConfigOverrides {
            field: Some("msg".to_string()),
            codec: Some("urlsafe64-decode".to_string()),
            ..ConfigOverrides::default()
        };

        let config = overrides.apply_to(file_config());

        assert_eq!(config.field.as_deref(), Some("msg"));
        assert_eq!(config.codec.as_deref(), Some("urlsafe64-decode"));
    }

    #[test]
    fn test_unset_flags_keep_config_file_values() {
        let config = ConfigOverrides::default().apply_to(file_config());

        assert_eq!(config, file_config());
    }

    #[test]
    fn test_empty_error_value_flag_overrides_config_file() {
        let overrides = ConfigOverrides {
            error_value: Some(String::new()),
            ..ConfigOverrides::default()
        };

        let config = overrides.apply_to(file_config());

        assert_eq!(config.error_value, "");
        assert_eq!(config.output_field.as_deref(), Some("decoded"));
    }

    #[test]
    fn test_run_skips_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("codec.yaml");
        let input_path = dir.path().join("in.ndjson");
        let out_path = dir.path().join("out.ndjson");

        std::fs::write(&config_path, "field: payload\ncodec: base64-decode\nerror_value: bad\n")
            .unwrap();
        std::fs::write(
            &input_path,
            "{\"payload\":\"Tmljb2xhcyBDYWdl\"}\nnot json\n{\"payload\":\"YmFkdmFsdWU\"}\n",
        )
        .unwrap();

        let overrides = ConfigOverrides {
            output_field: Some("text".to_string()),
            ..ConfigOverrides::default()
        };
        run(Some(config_path), overrides, Some(input_path), Some(out_path.clone())).unwrap();

        let output = std::fs::read_to_string(&out_path).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"payload":"Tmljb2xhcyBDYWdl","text":"Nicolas Cage"}"#,
                r#"{"payload":"YmFkdmFsdWU","text":"bad"}"#,
            ]
        );
    }

    #[test]
    fn test_run_fails_on_invalid_configuration() {
        let overrides = ConfigOverrides {
            field: Some("payload".to_string()),
            codec: Some("rot13".to_string()),
            ..ConfigOverrides::default()
        };

        let err = run(None, overrides, None, None).unwrap_err();
        assert!(err.contains("rot13"));
    }

    #[test]
    fn test_run_fails_on_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = ConfigOverrides {
            field: Some("payload".to_string()),
            codec: Some("base64-decode".to_string()),
            ..ConfigOverrides::default()
        };

        let err = run(
            None,
            overrides,
            Some(dir.path().join("missing.ndjson")),
            Some(dir.path().join("out.ndjson")),
        )
        .unwrap_err();
        assert!(err.contains("Failed to open"));
    }

    #[test]
    fn test_run_on_directory_input_terminates() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("out.ndjson");
        let overrides = ConfigOverrides {
            field: Some("payload".to_string()),
            codec: Some("base64-decode".to_string()),
            ..ConfigOverrides::default()
        };

        let input = dir.path().to_path_buf();
        run(None, overrides, Some(input), Some(out_path.clone())).unwrap();

        assert_eq!(std::fs::read_to_string(&out_path).unwrap(), "");
    }
}
