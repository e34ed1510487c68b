use clap::{Args as ClapArgs, Parser, Subcommand};
use jpu_core::{Outcome, Path as JsonPath};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{Level, error, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "jpu",
    about = "Read and update JSON documents by path expression ($.a[0].b, $[\"a\"][0])",
    version
)]
struct Cli {
    /// Log path resolution details to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Show how a path expression is parsed
    Parse(ParseArgs),
    /// Get value at path
    Get(ReadArgs),
    /// Show the editable (scalar) fields of the node at path
    Fields(ReadArgs),
    /// Set value (raw JSON or typed text) at path; prints or writes with --out / --in-place
    Set(SetArgs),
    /// Shallow-merge edited fields into the node at path
    Merge(MergeArgs),
}

#[derive(ClapArgs, Debug)]
struct ParseArgs {
    /// Path expression, e.g. $.fruits[0].name
    expr: String,
}

#[derive(ClapArgs, Debug)]
struct ReadArgs {
    /// JSON file to load
    file: PathBuf,
    /// Path expression, e.g. $["fruits"][0]
    #[arg(long, default_value = "$")]
    path: String,
}

#[derive(ClapArgs, Debug)]
struct SetArgs {
    /// JSON file to load
    file: PathBuf,
    /// Path expression, e.g. $["fruits"][0]["name"]
    #[arg(long)]
    path: String,
    /// New value as raw JSON (e.g., 123, true, "str", {"a":1})
    #[arg(long, required_unless_present = "text", conflicts_with = "text")]
    value: Option<String>,
    /// New value as typed text: JSON literals are parsed, anything else is kept as a string
    #[arg(long)]
    text: Option<String>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(ClapArgs, Debug)]
struct MergeArgs {
    /// JSON file to load
    file: PathBuf,
    /// Path expression, e.g. $["fruits"][0]
    #[arg(long)]
    path: String,
    /// Edited fields as a raw JSON object (e.g., {"name":"Pear"})
    #[arg(long, required_unless_present = "fields", conflicts_with = "fields")]
    value: Option<String>,
    /// One edited field as typed text; repeatable (e.g., --field name=Pear --field qty=3)
    #[arg(long = "field", value_name = "KEY=TEXT", value_parser = parse_field_arg)]
    fields: Vec<(String, String)>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(ClapArgs, Debug)]
struct OutputArgs {
    /// Optional output .json path to write; otherwise prints to stdout
    #[arg(long, conflicts_with = "in_place")]
    out: Option<PathBuf>,
    /// Overwrite the input file
    #[arg(long, default_value_t = false)]
    in_place: bool,
    /// With --in-place, keep a timestamped copy of the original
    #[arg(long, default_value_t = false, requires = "in_place")]
    backup: bool,
    /// Fail instead of silently returning an unchanged document
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn parse_field_arg(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("expected KEY=TEXT, got {:?}", raw)),
    }
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Cmd::Parse(a) => cmd_parse(a),
        Cmd::Get(a) => cmd_get(a),
        Cmd::Fields(a) => cmd_fields(a),
        Cmd::Set(a) => cmd_set(a),
        Cmd::Merge(a) => cmd_merge(a),
    }
}

fn fail(code: i32, msg: impl std::fmt::Display) -> ! {
    error!("{}", msg);
    std::process::exit(code);
}

fn load(file: &std::path::Path) -> Value {
    jpu_core::load_document(file).unwrap_or_else(|e| fail(2, e))
}

fn print_json(v: &Value) {
    match jpu_core::render_document(v) {
        Ok(s) => print!("{}", s),
        Err(e) => fail(5, e),
    }
}

fn cmd_parse(args: ParseArgs) {
    let path = jpu_core::parse(&args.expr);
    println!("{}", path);
    for seg in &path {
        match seg {
            jpu_core::Seg::Key(k) => println!("key\t{}", k),
            jpu_core::Seg::Index(i) => println!("index\t{}", i),
        }
    }
}

fn cmd_get(args: ReadArgs) {
    let root = load(&args.file);
    let path = jpu_core::parse(&args.path);
    match jpu_core::get(&root, &path) {
        Some(v) => print_json(v),
        None => fail(3, format!("not found: {}", path)),
    }
}

fn cmd_fields(args: ReadArgs) {
    let root = load(&args.file);
    let path = jpu_core::parse(&args.path);
    let fields = jpu_core::get(&root, &path).and_then(jpu_core::editable_fields);
    match fields {
        Some(v) => print_json(&v),
        None => fail(3, format!("no editable fields at {}", path)),
    }
}

fn cmd_set(args: SetArgs) {
    let root = load(&args.file);
    let path = jpu_core::parse(&args.path);
    let new_val = match (&args.value, &args.text) {
        (Some(raw), _) => parse_value(raw),
        (None, Some(text)) => jpu_core::parse_field_text(text),
        (None, None) => fail(3, "one of --value or --text is required"),
    };
    let (updated, outcome) = jpu_core::update_with_outcome(&root, &path, new_val);
    report(&path, outcome, args.output.strict);
    emit(&args.file, &args.output, &updated);
}

fn cmd_merge(args: MergeArgs) {
    let root = load(&args.file);
    let path = jpu_core::parse(&args.path);
    let edited = match &args.value {
        Some(raw) => parse_value(raw),
        None => jpu_core::fields_from_text(args.fields.iter().map(|(k, t)| (k.as_str(), t))),
    };
    if !edited.is_object() {
        fail(3, "--value for merge must be a JSON object");
    }
    let (updated, outcome) = jpu_core::merge_with_outcome(&root, &path, &edited);
    report(&path, outcome, args.output.strict);
    emit(&args.file, &args.output, &updated);
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| fail(3, format!("invalid --value JSON: {}", e)))
}

fn report(path: &JsonPath, outcome: Outcome, strict: bool) {
    if outcome.is_applied() {
        info!(%path, "updated");
        return;
    }
    if strict {
        fail(4, format!("path did not resolve: {} ({:?})", path, outcome));
    }
    warn!(%path, ?outcome, "document unchanged");
}

fn emit(file: &std::path::Path, output: &OutputArgs, value: &Value) {
    let target = if output.in_place {
        if output.backup {
            match jpu_core::backup_file(file) {
                Ok(p) => info!(backup = %p.display(), "backup written"),
                Err(e) => fail(5, e),
            }
        }
        Some(file)
    } else {
        output.out.as_deref()
    };
    match target {
        Some(out) => {
            if let Err(e) = jpu_core::write_document(out, value) {
                fail(5, format!("error writing: {}", e));
            }
        }
        None => print_json(value),
    }
}
