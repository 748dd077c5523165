use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use stagetext_config::Config;
use stagetext_engine::codec::{decode_str, encode_pretty, encode_string};
use stagetext_engine::fragment::{DEFAULT_MAX_LENGTH, DEFAULT_MAX_TOKENS};
use stagetext_engine::text::{book_text_events, plain_text_events};
use stagetext_engine::{
    Document, FragmentEngine, OutlineEvent, ParseTree, Strategy, TreeBank, build_document,
};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "stagetext")]
#[command(about = "Rebuild document outlines and break sentences into staged fragments", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/stagetext/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Indent JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a document from a JSON array of outline events
    Outline {
        /// Events file, or - for stdin
        events: PathBuf,
    },
    /// Build a document from a plain-text file
    Text {
        /// Text file, or - for stdin
        file: PathBuf,
        #[arg(long)]
        title: String,
        /// Join hard-wrapped lines, as found in e-book text
        #[arg(long)]
        book: bool,
    },
    /// Fill in the fragments of every sentence in a document
    Fragment {
        /// Document JSON, or - for stdin
        document: PathBuf,
        #[command(flatten)]
        layout: LayoutArgs,
        /// Bracketed parse trees for the tree strategies
        #[arg(long, value_name = "FILE")]
        treebank: Option<PathBuf>,
    },
    /// Print each sentence of a document as indented fragments
    Show {
        /// Document JSON, or - for stdin
        document: PathBuf,
    },
    /// Fragment a single bracketed parse tree
    Tree {
        /// e.g. "(S (NP (DT A) (NN train)) (VP (VBZ moves)) (. .))"
        tree: String,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Print the effective configuration
    Config {
        /// Save it to the config path as well
        #[arg(long)]
        write: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyKind {
    WholeSentence,
    FixedWidth,
    TreeDepth,
    HeightBucket,
    LengthFilter,
}

impl From<Strategy> for StrategyKind {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::WholeSentence => StrategyKind::WholeSentence,
            Strategy::FixedWidth { .. } => StrategyKind::FixedWidth,
            Strategy::TreeDepth { .. } => StrategyKind::TreeDepth,
            Strategy::HeightBucket { .. } => StrategyKind::HeightBucket,
            Strategy::LengthFilter { .. } => StrategyKind::LengthFilter,
        }
    }
}

/// Strategy flags; anything left unset falls back to the config file.
#[derive(Args, Debug, Default)]
struct LayoutArgs {
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,
    /// Tokens per fragment (fixed-width, tree-depth)
    #[arg(long)]
    max_tokens: Option<NonZeroUsize>,
    /// Only this subtree height (height-bucket)
    #[arg(long)]
    height: Option<usize>,
    /// Smallest leaf count kept (length-filter)
    #[arg(long)]
    min_length: Option<usize>,
    /// Largest leaf count kept (length-filter)
    #[arg(long)]
    max_length: Option<usize>,
}

impl LayoutArgs {
    fn resolve(&self, configured: Strategy) -> Strategy {
        let (max_tokens, height, min_length, max_length) = match configured {
            Strategy::FixedWidth { max_tokens } | Strategy::TreeDepth { max_tokens } => {
                (max_tokens, None, 0, DEFAULT_MAX_LENGTH)
            }
            Strategy::HeightBucket { height } => (DEFAULT_MAX_TOKENS, height, 0, DEFAULT_MAX_LENGTH),
            Strategy::LengthFilter {
                min_length,
                max_length,
            } => (DEFAULT_MAX_TOKENS, None, min_length, max_length),
            Strategy::WholeSentence => (DEFAULT_MAX_TOKENS, None, 0, DEFAULT_MAX_LENGTH),
        };

        let max_tokens = self.max_tokens.unwrap_or(max_tokens);
        match self.strategy.unwrap_or(configured.into()) {
            StrategyKind::WholeSentence => Strategy::WholeSentence,
            StrategyKind::FixedWidth => Strategy::FixedWidth { max_tokens },
            StrategyKind::TreeDepth => Strategy::TreeDepth { max_tokens },
            StrategyKind::HeightBucket => Strategy::HeightBucket {
                height: self.height.or(height),
            },
            StrategyKind::LengthFilter => Strategy::LengthFilter {
                min_length: self.min_length.unwrap_or(min_length),
                max_length: self.max_length.unwrap_or(max_length),
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config, cli.verbose)?;
    log::debug!("Using {config:?}");

    match cli.command {
        Command::Outline { events } => {
            let content = read_input(&events)?;
            let events: Vec<OutlineEvent> = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse events from {}", events.display()))?;
            let document = build_document(events).context("Failed to build outline")?;
            emit(&document, cli.pretty)
        }
        Command::Text { file, title, book } => {
            let content = read_input(&file)?;
            let events = if book {
                book_text_events(&title, &content)
            } else {
                plain_text_events(&title, &content)
            };
            let document = build_document(events).context("Failed to build outline")?;
            emit(&document, cli.pretty)
        }
        Command::Fragment {
            document,
            layout,
            treebank,
        } => {
            let mut parsed = read_document(&document)?;
            let strategy = layout.resolve(config.fragments);
            let bank = match treebank.or(config.treebank) {
                Some(path) if strategy.requires_tree() => Some(load_treebank(&path)?),
                _ => None,
            };

            let mut engine = FragmentEngine::new(strategy);
            if let Some(bank) = &bank {
                engine = engine.with_parser(bank);
            }
            engine.fragment_document(&mut parsed).with_context(|| {
                format!(
                    "Failed to fragment {} (tree strategies need --treebank or a treebank in config)",
                    document.display()
                )
            })?;
            emit(&parsed, cli.pretty)
        }
        Command::Show { document } => {
            let parsed = read_document(&document)?;
            print!("{}", render(&parsed));
            Ok(())
        }
        Command::Tree { tree, layout } => {
            let tree = ParseTree::from_bracketed(&tree).context("Failed to read parse tree")?;
            let strategy = layout.resolve(config.fragments);
            let fragments = strategy.format(&tree.leaves().join(" "), Some(&tree))?;
            for fragment in fragments {
                println!("{fragment}");
            }
            Ok(())
        }
        Command::Config { write } => {
            print!("{}", toml::to_string_pretty(&config)?);
            if write {
                let path = cli.config.unwrap_or_else(Config::config_path);
                config.save_to_path(&path)?;
                log::info!("Config saved to {}", path.display());
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
            .with_context(|| format!("No config file at {}", path.display()))?,
        None => Config::load()
            .context("Failed to load config")?
            .unwrap_or_default(),
    };
    Ok(loaded)
}

fn init_logging(config: &Config, verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => config.level_filter()?,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG is applied last so it wins over config and flags
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        return std::io::read_to_string(std::io::stdin()).context("Failed to read stdin");
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_document(path: &Path) -> Result<Document> {
    let content = read_input(path)?;
    decode_str(&content).with_context(|| format!("Failed to decode document {}", path.display()))
}

fn load_treebank(path: &Path) -> Result<TreeBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tree bank {}", path.display()))?;
    let bank = TreeBank::from_bracketed(&content)
        .with_context(|| format!("Failed to parse tree bank {}", path.display()))?;
    log::debug!("Loaded {} trees from {}", bank.len(), path.display());
    Ok(bank)
}

fn emit(document: &Document, pretty: bool) -> Result<()> {
    let json = if pretty {
        encode_pretty(document)?
    } else {
        encode_string(document)?
    };
    println!("{json}");
    Ok(())
}

/// Fragments one per line with a blank line between sentences; unfragmented
/// sentences are printed as-is.
fn render(document: &Document) -> String {
    let mut out = String::new();
    for sentence in document.sentences() {
        match &sentence.fragments {
            Some(fragments) => {
                for fragment in fragments {
                    out.push_str(&format!("{fragment}\n"));
                }
            }
            None => out.push_str(&format!("{}\n", sentence.text)),
        }
        out.push('\n');
    }
    out
}
