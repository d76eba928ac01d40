mod test_runner;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::EnvFilter;

use blockweb::manifest::{ManifestError, ManifestParser};
use blockweb::{Catalog, Category, Composition};
use composer::{CompositeDocument, MergeConfig, generate_from_composition, persist};

const DEFAULT_CONFIG: &str = "blockweb.toml";

#[derive(Parser)]
#[command(name = "blockweb", version, about = "Block-based web page composer")]
struct Cli {
    /// Disable colored diagnostics
    #[arg(long, global = true)]
    no_color: bool,

    /// Log merge decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Merge configuration file (default: ./blockweb.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the block catalog
    Catalog(CatalogArgs),

    /// Render a single block
    Render(RenderArgs),

    /// Merge a composition manifest into a document
    Generate(GenerateArgs),

    /// Add missing style/script/body anchors to an HTML file
    Scaffold(FileArgs),

    /// Print the HTML, CSS and JS buffers of a saved file
    Split(FileArgs),

    /// Print the page a preview renderer would show
    Preview(FileArgs),

    /// Run .case.html fixture files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct CatalogArgs {
    /// Only list this category (structure, style, interaction)
    #[arg(short, long)]
    category: Option<String>,
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Element type, e.g. heading or shadow
    element_type: String,

    /// Parameter edits as name=value. Repeatable.
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Composition manifest (TOML)
    manifest: PathBuf,

    /// Saved document to merge into (default: a new document)
    #[arg(short, long)]
    document: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip fragments already present in any buffer
    #[arg(long)]
    idempotent: bool,

    /// Route fragments by block category instead of by their text
    #[arg(long)]
    by_category: bool,
}

#[derive(clap::Args)]
struct FileArgs {
    /// HTML file
    file: PathBuf,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .case.html file or directory containing them
    path: String,

    /// Run only fixtures in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match cli.command {
        Command::Catalog(args) => do_catalog(args),
        Command::Render(args) => do_render(args),
        Command::Generate(args) => {
            let config = load_config(cli.config.as_deref());
            do_generate(args, config, color_choice(cli.no_color))
        }
        Command::Scaffold(args) => {
            let html = read_or_exit(&args.file);
            println!("{}", composer::scaffold::scaffold_html(&html));
            0
        }
        Command::Split(args) => {
            let document = persist::load(&read_or_exit(&args.file));
            println!("=== html ===\n{}", document.html);
            println!("=== css ===\n{}", document.css);
            println!("=== js ===\n{}", document.js);
            0
        }
        Command::Preview(args) => {
            let document = persist::load(&read_or_exit(&args.file));
            println!("{}", persist::preview_html(&document));
            0
        }
        Command::Test(args) => {
            let path = Path::new(&args.path);
            if args.list_categories {
                test_runner::list_categories(path);
                0
            } else {
                test_runner::run_tests(path, cli.no_color, &args.category)
            }
        }
    };
    process::exit(code);
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn color_choice(no_color: bool) -> ColorChoice {
    if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

fn read_or_exit(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}

/// `--config` must exist; the implicit `blockweb.toml` is optional.
fn load_config(explicit: Option<&Path>) -> MergeConfig {
    let path = match explicit {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG).is_file() => Path::new(DEFAULT_CONFIG),
        None => return MergeConfig::default(),
    };
    match MergeConfig::load(path) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), ?config, "loaded merge config");
            config
        }
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn do_catalog(args: CatalogArgs) -> i32 {
    let categories: Vec<Category> = match args.category.as_deref() {
        None => Category::ALL.to_vec(),
        Some(name) => match Category::parse(name) {
            Some(category) => vec![category],
            None => {
                eprintln!("error: unknown category '{}'", name);
                return 1;
            }
        },
    };

    let catalog = Catalog::builtin();
    for category in categories {
        println!("{} ({})", category, category.color());
        for definition in catalog.list_by_category(category) {
            println!("  {:<14} {}", definition.element_type, definition.name);
        }
    }
    0
}

fn do_render(args: RenderArgs) -> i32 {
    let catalog = Catalog::builtin();
    let mut block = match catalog.instantiate(&args.element_type) {
        Ok(block) => block,
        Err(e) => {
            eprintln!("error: {}", e);
            return 1;
        }
    };

    for edit in &args.set {
        let Some((name, value)) = edit.split_once('=') else {
            eprintln!("error: expected NAME=VALUE, got '{}'", edit);
            return 1;
        };
        if let Err(e) = block.set_parameter_checked(name.trim(), value) {
            eprintln!("error: {}", e);
            return 1;
        }
    }

    println!("{}", block.render());
    0
}

fn do_generate(args: GenerateArgs, mut config: MergeConfig, color: ColorChoice) -> i32 {
    if args.idempotent {
        config = config.idempotent();
    }
    if args.by_category {
        config = config.by_category();
    }

    let source = read_or_exit(&args.manifest);
    let mut files = SimpleFiles::new();
    let file_id = files.add(args.manifest.display().to_string(), source.clone());

    let writer = StandardStream::stderr(color);
    let emit = |diagnostics: &[ManifestError]| {
        let term_config = term::Config::default();
        for error in diagnostics {
            let diagnostic = error.to_diagnostic();
            let _ =
                term::emit_to_write_style(&mut writer.lock(), &term_config, &files, &diagnostic);
        }
    };

    let manifest = match ManifestParser::new(source, file_id).parse() {
        Ok(manifest) => manifest,
        Err(errors) => {
            emit(&errors);
            return 1;
        }
    };
    let mut composition: Composition = match manifest.build(&Catalog::builtin()) {
        Ok((composition, warnings)) => {
            emit(&warnings);
            composition
        }
        Err(errors) => {
            emit(&errors);
            return 1;
        }
    };

    let mut document = match &args.document {
        Some(path) => match persist::load_from_path(path) {
            Ok(document) => document,
            Err(e) => {
                eprintln!("error: {}", e);
                return 1;
            }
        },
        None => CompositeDocument::default(),
    };

    if let Err(e) = generate_from_composition(&mut composition, &mut document, &config) {
        eprintln!("error: {}", e);
        return 1;
    }

    match &args.output {
        Some(path) => match persist::save_to_path(&document, path) {
            Ok(()) => {
                eprintln!("ok: wrote {}", path.display());
                0
            }
            Err(e) => {
                eprintln!("error: {}", e);
                1
            }
        },
        None => {
            println!("{}", persist::save(&document));
            0
        }
    }
}
