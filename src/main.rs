use std::{fs::read_to_string, path::PathBuf, process, time::Instant};

use clap::{Parser as ClapParser, ValueEnum};
use minilang::{
    ast::printer::Printer,
    display_error,
    lexer::lexer::tokenize,
    parser::{
        parser::{parse_source, ParserConfig},
        symbols::ScopeMode,
    },
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scoping {
    /// One namespace for the whole program
    Flat,
    /// Braced bodies and loops open nested scopes
    Lexical,
}

impl From<Scoping> for ScopeMode {
    fn from(scoping: Scoping) -> Self {
        match scoping {
            Scoping::Flat => ScopeMode::Flat,
            Scoping::Lexical => ScopeMode::Lexical,
        }
    }
}

/// Parse and check a minilang program.
#[derive(ClapParser, Debug)]
#[command(name = "minilang", version, about)]
struct Args {
    /// Source file to parse
    file: PathBuf,

    /// How declarations are scoped
    #[arg(long, value_enum, default_value_t = Scoping::Flat)]
    scoping: Scoping,

    /// Print the program back as canonical source
    #[arg(long)]
    print: bool,

    /// Print the syntax tree
    #[arg(long)]
    dump_ast: bool,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging();

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.to_string_lossy().into_owned());

    let source = match read_to_string(&args.file) {
        Ok(source) => source,
        Err(err) => {
            error!(file = %args.file.display(), "failed to read source: {}", err);
            process::exit(1);
        }
    };

    let start = Instant::now();

    if args.tokens {
        match tokenize(source.clone(), Some(file_name.clone())) {
            Ok(tokens) => tokens.iter().for_each(|token| token.debug()),
            Err(err) => {
                display_error(&err);
                process::exit(1);
            }
        }
        info!("Tokenized in {:?}", start.elapsed());
    }

    let config = ParserConfig {
        scope_mode: args.scoping.into(),
    };

    let parse_start = Instant::now();
    let (parser, result) = parse_source(source, Some(file_name), config);

    let program = match result {
        Ok(program) => program,
        Err(err) => {
            display_error(&err);
            process::exit(1);
        }
    };

    info!(
        variables = parser.symbols().len(),
        "Parsed in {:?}",
        parse_start.elapsed()
    );

    if args.dump_ast {
        println!("{:#?}", program);
    }

    if args.print {
        print!("{}", Printer::print_program(&program));
    }

    info!("Total time: {:?}", start.elapsed());
}
