use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use depscope::closure::Depth;
use depscope::config::AnalysisConfig;
use depscope::cycles::CycleDetector;
use depscope::export::{self, export_cycles, ExportFormat, GraphDocument, ReportOptions};
use depscope::graph::NodeFactory;
use depscope::loader;
use depscope::selection::{ComprehensiveTraversalStrategy, SortedTraversalStrategy};
use depscope::transform::{FeatureResolver, GraphCopier, GraphSummarizer, GraphTransform, LinkMaximizer, LinkMinimizer};
use depscope::visitor::{BasicTraversal, GraphStats};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "depscope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Dependency graph engine: selective copies, roll-ups, cycles and transitive closures", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every command that reads a graph
#[derive(Args)]
struct GraphArgs {
    /// JSON graph document to read
    #[arg(short, long)]
    input: PathBuf,

    /// JSON configuration file (defaults apply when absent)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: xml, json or text
    #[arg(short, long, default_value_t = ExportFormat::Text)]
    format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the nodes in scope and their edges into the filter
    Show(GraphArgs),
    /// Copy the nodes in scope and their edges into the filter
    Copy(GraphArgs),
    /// Roll edges up onto the nodes scope and filter select
    Summarize(GraphArgs),
    /// Add every implied edge between containers
    Maximize(GraphArgs),
    /// Keep only the most specific edges
    Minimize(GraphArgs),
    /// Add edges from callers to the inherited features they may reach
    Resolve(GraphArgs),
    /// List dependency cycles, shortest first
    Cycles {
        #[command(flatten)]
        graph: GraphArgs,

        /// Longest cycle to report
        #[arg(long)]
        maximum_length: Option<usize>,
    },
    /// Slice the graph around the start nodes
    Closure {
        #[command(flatten)]
        graph: GraphArgs,

        /// Inbound layers to follow: a number or 'unbounded'
        #[arg(long)]
        inbound_depth: Option<Depth>,

        /// Outbound layers to follow: a number or 'unbounded'
        #[arg(long)]
        outbound_depth: Option<Depth>,
    },
    /// Show version information
    Version,
}

struct Session {
    graph: NodeFactory,
    config: AnalysisConfig,
    format: ExportFormat,
    output: Option<PathBuf>,
}

impl Session {
    fn open(args: GraphArgs) -> Result<Self> {
        let graph = loader::load_file(&args.input)
            .with_context(|| format!("Failed to load graph from {}", args.input.display()))?;
        let config = match &args.config {
            Some(path) => AnalysisConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => AnalysisConfig::default(),
        };
        let mut traversal = BasicTraversal::new(GraphStats::default());
        traversal.traverse_nodes(&graph, graph.package_ids());
        let stats = traversal.into_inner();
        info!(
            packages = stats.packages,
            classes = stats.classes,
            features = stats.features,
            confirmed = stats.confirmed_packages + stats.confirmed_classes + stats.confirmed_features,
            dependencies = stats.dependencies(),
            "graph loaded"
        );
        Ok(Self {
            graph,
            config,
            format: args.format,
            output: args.output,
        })
    }

    fn writer(&self) -> Result<Box<dyn Write>> {
        Ok(match &self.output {
            Some(path) => Box::new(BufWriter::new(
                File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
            )),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        })
    }

    /// Prints all of `graph`.
    fn print_graph(&self, graph: &NodeFactory, options: ReportOptions) -> Result<()> {
        let strategy = SortedTraversalStrategy::new(ComprehensiveTraversalStrategy);
        let document = GraphDocument::build(graph, strategy, graph.package_ids(), options);
        self.print_document(&document)
    }

    fn print_document(&self, document: &GraphDocument) -> Result<()> {
        let mut writer = self.writer()?;
        export::export(self.format, document, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,depscope=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn transform_in_place(args: GraphArgs, transform: impl GraphTransform) -> Result<()> {
    let mut session = Session::open(args)?;
    let changed = transform.apply(&mut session.graph);
    info!(edges = changed, "transform applied");
    session.print_graph(&session.graph, session.config.report_options())
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Show(args) => {
            let session = Session::open(args)?;
            let strategy = session.config.strategy()?;
            let document = GraphDocument::build(
                &session.graph,
                strategy,
                session.graph.package_ids(),
                session.config.report_options(),
            );
            session.print_document(&document)
        }
        Commands::Copy(args) => {
            let session = Session::open(args)?;
            let mut copier = GraphCopier::new(session.config.strategy()?);
            copier.traverse_nodes(&session.graph, session.graph.package_ids());
            session.print_graph(copier.factory(), session.config.report_options())
        }
        Commands::Summarize(args) => {
            let session = Session::open(args)?;
            let mut summarizer = GraphSummarizer::new(
                session.config.scope.to_criteria()?,
                session.config.filter.to_criteria()?,
            );
            summarizer.traverse_nodes(&session.graph, session.graph.package_ids());
            session.print_graph(summarizer.factory(), session.config.report_options())
        }
        Commands::Maximize(args) => transform_in_place(args, LinkMaximizer),
        Commands::Minimize(args) => transform_in_place(args, LinkMinimizer),
        Commands::Resolve(args) => transform_in_place(args, FeatureResolver),
        Commands::Cycles { graph, maximum_length } => {
            let session = Session::open(graph)?;
            let mut detector = match maximum_length {
                Some(length) => CycleDetector::with_maximum_cycle_length(length),
                None => session.config.cycle_detector(),
            };
            detector.traverse_nodes(&session.graph, session.graph.package_ids());
            info!(cycles = detector.cycles().len(), "cycle detection finished");

            let mut writer = session.writer()?;
            export_cycles(session.format, &session.graph, detector.cycles(), &mut writer)?;
            writer.flush()?;
            Ok(())
        }
        Commands::Closure {
            graph,
            inbound_depth,
            outbound_depth,
        } => {
            let session = Session::open(graph)?;
            let mut closure = session.config.transitive_closure()?;
            if let Some(depth) = inbound_depth {
                closure.set_maximum_inbound_depth(depth);
            }
            if let Some(depth) = outbound_depth {
                closure.set_maximum_outbound_depth(depth);
            }
            let slice = closure.compute(&session.graph, session.graph.package_ids());
            session.print_graph(&slice, session.config.report_options())
        }
        Commands::Version => {
            println!("depscope v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(command) => run(command),
        None => {
            println!("depscope - Dependency Graph Engine");
            println!("Run 'depscope show --input graph.json' to print a graph");
            println!("Run 'depscope --help' for more information");
            Ok(())
        }
    }
}
