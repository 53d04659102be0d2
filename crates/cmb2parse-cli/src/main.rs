use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cmb2parse_lib::{Grammar, GrammarError, render_json_string, render_text};

#[derive(Parser)]
#[command(name = "cmb2parse", version, about = "Parse inputs with a PEG-style grammar definition")]
struct Args {
    /// Syntax definition file
    #[arg(short = 'd', long = "definition", value_name = "FILE")]
    definition: PathBuf,

    /// Input file to parse; `-` reads lines interactively
    #[arg(short = 'i', long = "input", value_name = "FILE", default_value = "-")]
    input: PathBuf,

    /// Output the parse tree as JSON
    #[arg(short = 'j', long = "json")]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let definition_path = args.definition.display().to_string();

    let grammar_source = match fs::read_to_string(&args.definition) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("cmb2parse: error: failed to open file {definition_path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut grammar = match cmb2parse_lib::load_grammar(&grammar_source) {
        Ok(grammar) => grammar,
        Err(GrammarError::Meta(err)) => {
            eprintln!("cmb2parse: error: failed to parse grammar");
            eprint!("{}", err.render(&grammar_source, &definition_path));
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("cmb2parse: error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if args.input.as_os_str() == "-" {
        interactive_loop(&mut grammar, args.json);
        return ExitCode::SUCCESS;
    }

    let input_path = args.input.display().to_string();
    let input = match fs::read_to_string(&args.input) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("cmb2parse: error: failed to open file {input_path}: {err}");
            return ExitCode::FAILURE;
        }
    };
    if parse_and_print(&mut grammar, &input, &input_path, args.json) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// One parse per prompted line; an empty line or end of input ends the
/// session.
fn interactive_loop(grammar: &mut Grammar, json: bool) {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            break;
        }
        parse_and_print(grammar, trimmed, "<stdin>", json);
    }
}

fn parse_and_print(grammar: &mut Grammar, input: &str, origin: &str, json: bool) -> bool {
    match grammar.parse(input) {
        Ok(tree) => {
            if json {
                println!("{}", render_json_string(grammar.description(), &tree));
            } else {
                print!("{}", render_text(grammar.description(), &tree));
            }
            true
        }
        Err(err) => {
            eprintln!("cmb2parse: error: failed to parse input");
            eprint!("{}", err.render(input, origin));
            false
        }
    }
}
