use std::{fs, process};

use clap::{ArgAction, Parser};
use kestrel::{
    Runtime, RuntimeConfig, config::DEFAULT_MAX_CALL_DEPTH, error::Error, interpreter::lexer::Token,
    parse, render, run, tokenize,
};
use tracing_subscriber::EnvFilter;

/// kestrel is a small dynamically typed scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat the contents as the path of a script file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode prints the value of the last statement after running the
    /// script.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Print the canonical form of the script instead of running it.
    #[arg(short, long, conflicts_with = "tokens")]
    render: bool,

    /// Print the tokens of the script instead of running it.
    #[arg(short, long)]
    tokens: bool,

    /// Maximum nesting of function calls.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    /// Maximum number of loop iterations plus function calls.
    #[arg(long)]
    max_steps: Option<u64>,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    contents: String,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(args.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    } else {
        args.contents.clone()
    };

    let result = if args.tokens {
        print_tokens(&script)
    } else if args.render {
        print_render(&script)
    } else {
        execute(&script, &args)
    };

    if let Err(e) = result {
        report(&e);
        process::exit(1);
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "kestrel=warn",
        1 => "kestrel=info",
        2 => "kestrel=debug",
        _ => "kestrel=trace",
    }
}

fn execute(script: &str, args: &Args) -> Result<(), Error> {
    let config = RuntimeConfig { max_call_depth: args.max_depth,
                                 max_steps: args.max_steps,
                                 ..RuntimeConfig::default() };
    let mut runtime = Runtime::with_config(config);

    let result = run(script, &mut runtime);

    // Output produced before a runtime error is still shown.
    for line in runtime.take_output() {
        println!("{line}");
    }

    let value = result?;
    if args.pipe_mode {
        println!("{value}");
    }

    Ok(())
}

fn print_tokens(script: &str) -> Result<(), Error> {
    for token in tokenize(script)? {
        print_token(&token);
    }
    Ok(())
}

fn print_token(token: &Token) {
    println!("{}\t{:?}\t{token}", token.span(), token.kind);
}

fn print_render(script: &str) -> Result<(), Error> {
    let tokens = tokenize(script)?;
    let (program, diagnostics) = parse(&tokens);
    if !diagnostics.is_empty() {
        return Err(Error::Parse(diagnostics));
    }

    println!("{}", render(&program));
    Ok(())
}

fn report(error: &Error) {
    match error {
        Error::Parse(diagnostics) => diagnostics.iter().for_each(|d| eprintln!("{d}")),
        _ => eprintln!("{error}"),
    }
}
