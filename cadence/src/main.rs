use cadence::{run, Input, Source, Value};
use std::env;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{fmt, EnvFilter};

/// Parses a `name=value` argument. Values are numbers, `true`/`false`, comma-separated
/// lists in brackets, or text.
fn parse_binding(arg: &str) -> Option<(String, Value)> {
    let (name, raw) = arg.split_once('=')?;
    Some((name.trim().to_string(), parse_value(raw.trim())))
}

fn parse_value(raw: &str) -> Value {
    if let Some(items) = raw.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        if items.trim().is_empty() {
            return Value::List(Vec::new());
        }
        return items.split(',').map(|item| parse_value(item.trim())).collect();
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => raw
            .parse::<f64>()
            .map(Value::Number)
            .unwrap_or_else(|_| Value::Text(raw.to_string())),
    }
}

fn main() -> io::Result<()> {
    // Use CADENCE_LOG to control the log level, default to WARN if not set
    let filter = EnvFilter::try_from_env("CADENCE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let mut input = Input::new();
    for arg in env::args().skip(1) {
        match parse_binding(&arg) {
            Some((name, value)) => {
                input.insert(name, value);
            }
            None => eprintln!("ignoring argument {:?}, expected name=value", arg),
        }
    }

    let mut stdout = io::stdout();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        match run(&line, &input) {
            Ok(Some(value)) => println!("{:?}", value),
            Ok(None) => {}
            Err(err) => match err.position() {
                Some(position) => {
                    let (line_no, column) = Source::new(&line).line_col(position);
                    eprintln!("ERROR: {} (line {}, column {})", err, line_no, column);
                }
                None => eprintln!("ERROR: {}", err),
            },
        }
    }

    Ok(())
}
