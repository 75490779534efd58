use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::io::{self, Write};

use clap::{ArgAction, Parser};
use reftable::{DynRecord, Formats, LoadOptions, Table, TypeDesc};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reftable", version, about = "Load a reference table and print it as JSON")]
struct Args {
    /// Data file; the extension selects the row reader. Use '-' for CSV on stdin.
    input: String,

    /// Record field as name:type, e.g. price:uint32 or tags:list<string>. Repeatable.
    #[arg(short, long = "field", value_name = "name:type", value_parser = parse_field, required = true)]
    fields: Vec<(String, TypeDesc)>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Cell delimiter: , (comma), \\t (tab), | (pipe), ; (semicolon).
    #[arg(long, value_name = "char", value_parser = parse_delimiter)]
    delimiter: Option<reftable::Delimiter>,

    /// Skip rows starting with this character.
    #[arg(long, value_name = "char")]
    comment: Option<char>,

    /// Print only the record with this identifier.
    #[arg(long, value_name = "id")]
    id: Option<String>,

    /// JSON indentation size; 0 prints compact JSON.
    #[arg(long, value_name = "number", default_value_t = 2)]
    indent: usize,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let target = TypeDesc::Record(
        args.fields
            .iter()
            .map(|(name, desc)| (name.as_str().into(), desc.clone()))
            .collect(),
    );
    let options = load_options(args)?;
    let table = load(&args.input, &target, &options)?;
    let document = render(&table, args.id.as_deref())?;

    with_output_writer(args.output.as_deref(), |writer| {
        write_json(writer, &document, args.indent)
    })?;
    if let Some(path) = args.output.as_deref().filter(|path| *path != "-") {
        println!("✔ Loaded {} records from {} → {path}", table.len(), args.input);
    }
    Ok(())
}

fn load_options(args: &Args) -> Result<LoadOptions, Box<dyn Error>> {
    let mut options = LoadOptions::new();
    if let Some(delimiter) = args.delimiter {
        options = options.with_delimiter(delimiter);
    }
    if let Some(comment) = args.comment {
        let byte = u8::try_from(comment)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| format!("comment character must be ASCII, got {comment:?}"))?;
        options = options.with_comment(Some(byte));
    }
    Ok(options)
}

fn load(
    input: &str,
    target: &TypeDesc,
    options: &LoadOptions,
) -> Result<Table<DynRecord>, Box<dyn Error>> {
    if input == "-" {
        let stdin = io::stdin();
        return Ok(reftable::from_reader_dynamic_with_options(
            stdin.lock(),
            target,
            options,
        )?);
    }
    Ok(reftable::load_path_dynamic(
        input,
        target,
        options,
        &Formats::default(),
    )?)
}

fn render(table: &Table<DynRecord>, id: Option<&str>) -> Result<Value, Box<dyn Error>> {
    if let Some(id) = id {
        let record = table
            .get(id)
            .ok_or_else(|| format!("no record with identifier \"{id}\""))?;
        return Ok(record.to_json());
    }
    let sorted: BTreeMap<&str, Value> = table
        .iter()
        .map(|(id, record)| (id.as_str(), record.to_json()))
        .collect();
    Ok(serde_json::to_value(sorted)?)
}

fn parse_field(raw: &str) -> Result<(String, TypeDesc), String> {
    let Some((name, ty)) = raw.split_once(':') else {
        return Err(format!("Invalid field \"{raw}\". Expected name:type"));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Invalid field \"{raw}\". Field name is empty"));
    }
    Ok((name.to_string(), TypeDesc::parse(ty)))
}

fn parse_delimiter(raw: &str) -> Result<reftable::Delimiter, String> {
    let delimiter = match raw {
        "\\t" => Some(reftable::Delimiter::Tab),
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => reftable::Delimiter::from_char(c),
                _ => None,
            }
        }
    };
    delimiter.ok_or_else(|| {
        format!(
            "Invalid delimiter \"{raw}\". Valid delimiters are: comma (,), tab (\\t), pipe (|), semicolon (;)"
        )
    })
}

fn with_output_writer<F>(path: Option<&str>, f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Box<dyn Error>>,
{
    match path {
        Some(path) if path != "-" => {
            let mut file = fs::File::create(path)?;
            f(&mut file)
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            f(&mut handle)
        }
    }
}

fn write_json(writer: &mut dyn Write, value: &Value, indent: usize) -> Result<(), Box<dyn Error>> {
    if indent == 0 {
        serde_json::to_writer(&mut *writer, value)?;
    } else {
        let indent_bytes = vec![b' '; indent];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
        let mut serializer = serde_json::Serializer::with_formatter(&mut *writer, formatter);
        value.serialize(&mut serializer)?;
    }
    writer.write_all(b"\n")?;
    Ok(())
}
