//! Command-line argument parsing

use std::path::PathBuf;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub path: PathBuf,
    pub log_file: Option<PathBuf>,
    pub history_limit: Option<usize>,
}

pub fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse(&args) {
        Ok(Some(options)) => options,
        Ok(None) => print_help(),
        Err(message) => {
            eprintln!("arcnav: {message}");
            eprintln!("Try 'arcnav --help' for more information.");
            std::process::exit(2);
        }
    }
}

/// `Ok(None)` means help was requested
fn parse(args: &[String]) -> Result<Option<Options>, String> {
    let mut path = None;
    let mut log_file = None;
    let mut history_limit = None;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(None),
            "-l" | "--log" => {
                i += 1;
                let value = args.get(i).ok_or("--log needs a file")?;
                log_file = Some(PathBuf::from(value));
            }
            "-n" | "--history" => {
                i += 1;
                let value = args.get(i).ok_or("--history needs a number")?;
                let limit = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| format!("history limit must be a positive integer, got '{value}'"))?;
                history_limit = Some(limit);
            }
            arg if arg.starts_with('-') => return Err(format!("unknown option '{arg}'")),
            arg => {
                if path.is_some() {
                    return Err("only one directory can be browsed".to_string());
                }
                path = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    let path = path.ok_or("missing directory to browse")?;
    Ok(Some(Options {
        path,
        log_file,
        history_limit,
    }))
}

fn print_help() -> ! {
    eprintln!("Usage: arcnav [OPTIONS] <DIR>");
    eprintln!();
    eprintln!("Browse an extracted archive directory.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -l, --log FILE     Write a debug log to FILE");
    eprintln!("  -n, --history N    Keep at most N back/forward entries");
    eprintln!("  -h, --help         Show this help message");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  ls                List the current folder");
    eprintln!("  cd NAME           Enter a folder (cd .. goes up)");
    eprintln!("  open NAME         Enter a folder or show file details");
    eprintln!("  up                Go to the parent folder");
    eprintln!("  back / fwd        Move through history");
    eprintln!("  tree              Show the folder tree");
    eprintln!("  pwd               Print the current folder");
    eprintln!("  q                 Quit");
    std::process::exit(0);
}
