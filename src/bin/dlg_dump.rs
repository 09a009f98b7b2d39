use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use indoc::indoc;
use log::{Level, LevelFilter, debug, info};
use simplelog::{Config, WriteLogger};

use dlgres::utils::hexdump;
use dlgres::{AnyDialogTemplate, DecodeSettings};

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DlgOutputFormat {
    Text,
    Json,
    Hex,
}

enum Input {
    Stdin,
    File(PathBuf),
}

struct DlgDump {
    decode_settings: DecodeSettings,
    input: Input,
    output_format: DlgOutputFormat,
    output: Box<dyn Write>,
    check_roundtrip: bool,
    verbosity_level: Option<Level>,
}

impl DlgDump {
    pub fn from_cli_matches(matches: &ArgMatches) -> Result<Self> {
        let input = match matches
            .get_one::<String>("INPUT")
            .map(String::as_str)
            .context("An input path is required")?
        {
            "-" => Input::Stdin,
            path => Input::File(PathBuf::from(path)),
        };

        let output_format = match matches
            .get_one::<String>("output-format")
            .map(String::as_str)
            .unwrap_or("text")
        {
            "json" => DlgOutputFormat::Json,
            "hex" => DlgOutputFormat::Hex,
            _ => DlgOutputFormat::Text,
        };

        let verbosity_level = match matches.get_count("verbose") {
            0 => None,
            1 => Some(Level::Info),
            2 => Some(Level::Debug),
            3 => Some(Level::Trace),
            _ => {
                eprintln!("using more than -vvv does not affect verbosity level");
                Some(Level::Trace)
            }
        };

        let output: Box<dyn Write> = match matches.get_one::<String>("output-target") {
            Some(path) => Box::new(
                Self::create_output_file(path, matches.get_flag("overwrite")).with_context(
                    || format!("An error occurred while creating output file at `{}`", path),
                )?,
            ),
            None => Box::new(io::stdout()),
        };

        Ok(DlgDump {
            decode_settings: DecodeSettings::new()
                .strict_utf16(matches.get_flag("strict-utf16"))
                .allow_trailing_data(!matches.get_flag("no-trailing-data")),
            input,
            output_format,
            output,
            check_roundtrip: matches.get_flag("check-roundtrip"),
            verbosity_level,
        })
    }

    /// Main entry point for `DlgDump`
    pub fn run(&mut self) -> Result<()> {
        self.try_to_initialize_logging();

        let data = self.read_input()?;
        info!("Read {} bytes of dialog template data", data.len());

        if self.output_format == DlgOutputFormat::Hex {
            write!(self.output, "{}", hexdump(&data, 0))?;
            self.output.flush()?;
            return Ok(());
        }

        let template = AnyDialogTemplate::from_bytes_with_settings(&data, &self.decode_settings)
            .context("Failed to decode dialog template")?;
        debug!("Decoded template - {:?}", template);

        if self.check_roundtrip {
            Self::verify_roundtrip(&template, &data)?;
        }

        if self.output_format == DlgOutputFormat::Json {
            serde_json::to_writer_pretty(&mut self.output, &template)?;
            writeln!(self.output)?;
        } else {
            write!(self.output, "{}", template)?;
        }

        self.output.flush()?;
        Ok(())
    }

    fn read_input(&self) -> Result<Vec<u8>> {
        let mut data = vec![];
        match &self.input {
            Input::Stdin => {
                io::stdin()
                    .lock()
                    .read_to_end(&mut data)
                    .context("Failed to read from stdin")?;
            }
            Input::File(path) => {
                File::open(path)
                    .and_then(|mut f| f.read_to_end(&mut data))
                    .with_context(|| format!("Failed to open file {}", path.display()))?;
            }
        }
        Ok(data)
    }

    /// Re-encodes the template and compares it with the input bytes.
    ///
    /// Trailing bytes the decoder was allowed to skip are not part of the comparison.
    fn verify_roundtrip(template: &AnyDialogTemplate, data: &[u8]) -> Result<()> {
        let encoded = template
            .to_bytes()
            .context("Failed to re-encode dialog template")?;

        if data.get(..encoded.len()) != Some(&encoded[..]) {
            let first_difference = encoded
                .iter()
                .zip(data)
                .position(|(a, b)| a != b)
                .unwrap_or(encoded.len().min(data.len()));

            bail!(
                "Round-trip mismatch at offset {} (input {} bytes, re-encoded {} bytes)",
                first_difference,
                data.len(),
                encoded.len()
            );
        }

        info!("Round-trip check passed ({} bytes)", encoded.len());
        Ok(())
    }

    fn create_output_file(path: impl AsRef<Path>, overwrite: bool) -> Result<File> {
        let p = path.as_ref();

        if p.is_dir() {
            bail!(
                "There is a directory at {}, refusing to overwrite",
                p.display()
            );
        }

        if p.exists() && !overwrite {
            bail!(
                "Output file {} already exists, pass `--overwrite` to replace it",
                p.display()
            );
        }

        if let Some(parent) = p.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(File::create(p)?)
    }

    fn try_to_initialize_logging(&self) {
        if let Some(level) = self.verbosity_level {
            if let Err(e) = WriteLogger::init(level.to_level_filter(), Config::default(), io::stderr())
            {
                eprintln!("Failed to initialize logging: {:?}", e);
            }
        } else {
            log::set_max_level(LevelFilter::Off);
        }
    }
}

fn command() -> Command {
    Command::new("dlg_dump")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Utility to decode Windows dialog box resource templates (RT_DIALOG)")
        .long_about(indoc!(r#"
            Utility to decode Windows dialog box resource templates (RT_DIALOG).

            INPUT is the raw resource data of a single dialog, as extracted from the
            resource section of an EXE/DLL. Both DLGTEMPLATE and DLGTEMPLATEEX layouts
            are supported; the layout is detected from the template signature.
        "#))
        .arg(
            Arg::new("INPUT")
                .required(true)
                .help("Path of the template file, or `-` to read from stdin."),
        )
        .arg(
            Arg::new("output-format")
                .short('o')
                .long("format")
                .value_parser(["text", "json", "hex"])
                .default_value("text")
                .help("Sets the output format")
                .long_help(indoc!(r#"
                    Sets the output format:
                        "text" - prints the dialog in a resource-script like layout.
                        "json" - prints the decoded template as JSON.
                        "hex"  - prints a canonical hex dump of the input, without decoding.
                "#)),
        )
        .arg(
            Arg::new("output-target")
                .long("output")
                .short('f')
                .value_name("PATH")
                .help(indoc!("Writes output to the file specified instead of stdout, errors will still be printed to stderr. \
                       Refuses to overwrite existing files unless `--overwrite` is passed. \
                       Will create parent directories if needed.")),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .action(ArgAction::SetTrue)
                .help("When set, an existing output file is replaced."),
        )
        .arg(
            Arg::new("check-roundtrip")
                .long("check-roundtrip")
                .action(ArgAction::SetTrue)
                .help("Re-encodes the decoded template and fails if the bytes differ from the input."),
        )
        .arg(
            Arg::new("strict-utf16")
                .long("strict-utf16")
                .action(ArgAction::SetTrue)
                .help("Fails on invalid UTF-16 in string fields instead of replacing it."),
        )
        .arg(
            Arg::new("no-trailing-data")
                .long("no-trailing-data")
                .action(ArgAction::SetTrue)
                .help("Fails when bytes remain after the last control."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("-v - info, -vv - debug, -vvv - trace"),
        )
}

fn main() -> Result<()> {
    let matches = command().get_matches();

    let mut app = DlgDump::from_cli_matches(&matches)?;
    app.run()
}
