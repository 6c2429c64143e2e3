use std::{
    fs,
    io::{self, BufRead, Write},
};

use clap::Parser;
use slate::{Value, interpret_in, make_global_env};

/// slate is a small, expression-oriented scripting language with
/// first-class functions and lexical scoping.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat CONTENTS as a path to a script file instead of inline source.
    #[arg(short, long)]
    file: bool,

    /// Print the value of the last evaluated statement before exiting.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Inline source text, or a script path when --file is given. Starts an
    /// interactive prompt when omitted.
    contents: Option<String>,
}

fn main() {
    let args = Args::parse();

    let Some(contents) = args.contents else {
        repl();
        return;
    };

    let (file_name, source) = if args.file {
        let source = fs::read_to_string(&contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
            std::process::exit(1);
        });
        (contents, source)
    } else {
        ("<script>".to_string(), contents)
    };

    match interpret_in(&source, &make_global_env()) {
        Ok(value) => {
            if args.pipe_mode && value != Value::Null {
                println!("{}", value.repr());
            }
        },
        Err(error) => {
            eprintln!("{}", error.report(&file_name, &source));
            std::process::exit(1);
        },
    }
}

/// Reads lines from standard input and evaluates each as a complete
/// program, keeping definitions alive between lines.
///
/// Results echo in their quoted representation; a `Null` result prints
/// nothing. Errors print their full diagnostic and the prompt continues.
fn repl() {
    let env = make_global_env();
    let stdin = io::stdin();

    loop {
        print!("slate > ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {},
        }

        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }

        match interpret_in(line, &env) {
            Ok(Value::Null) => {},
            Ok(value) => println!("{}", value.repr()),
            Err(error) => eprintln!("{}", error.report("<stdin>", line)),
        }
    }
}
