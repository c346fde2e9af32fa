//! class-closure CLI: transitive closure of an ontology's class hierarchy.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::Result;

use class_closure::closure::ClosureMethod;
use class_closure::config::EngineConfig;
use class_closure::engine::Engine;
use class_closure::error::QueryError;
use class_closure::export::labelled_pairs;
use class_closure::verify::Discrepancy;

#[derive(Parser)]
#[command(name = "class-closure", version, about = "Transitive closure of OWL class hierarchies")]
struct Cli {
    /// Closure method: 0 none, 1 union of powers, 2 Warshall, 3 OWL reasoning.
    #[arg(long, global = true)]
    method: Option<ClosureMethod>,

    /// Union the identity relation into the result.
    #[arg(long, global = true)]
    reflexive: bool,

    /// TOML configuration file. Flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the closure and print a summary.
    Closure {
        /// Ontology file (Turtle, RDF/XML, N-Triples, ...).
        ontology: PathBuf,

        /// List every related pair by short name.
        #[arg(long)]
        pairs: bool,
    },

    /// Longest simple path from one or more sources to a target.
    Path {
        ontology: PathBuf,

        /// Source entities (comma-separated IRIs or short names).
        #[arg(long, value_delimiter = ',')]
        from: Vec<String>,

        /// Target entity (IRI or short name).
        #[arg(long)]
        to: String,
    },

    /// Enumerate simple cycles of the result relation.
    Cycles {
        ontology: PathBuf,

        /// Stop after this many cycles.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Export the result relation as JSON.
    Export {
        ontology: PathBuf,

        /// Output file. Prints to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Cross-check the closure against OWL class-membership reasoning.
    Verify { ontology: PathBuf },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(method) = cli.method {
        config.closure_method = method;
    }
    if cli.reflexive {
        config.include_reflexivity = true;
    }

    match cli.command {
        Commands::Closure { ontology, pairs } => {
            let engine = Engine::load(&ontology, config)?;
            let (matrix, entities) = engine.results();
            println!("Entities:        {}", entities.len());
            println!("Asserted pairs:  {}", engine.asserted().count_nonzero());
            println!("Result pairs:    {}", matrix.count_nonzero());
            println!("Method:          {}", engine.config().closure_method);
            if let Some(stats) = engine.power_union_stats() {
                println!(
                    "Powers computed: {} ({:?})",
                    stats.max_power, stats.stop_reason
                );
            }
            if engine.alert() {
                println!("ALERT: union of powers changed after repeating; re-check with --method 2");
            }
            let reflexive = matrix.diagonal();
            if !engine.config().include_reflexivity && !reflexive.is_empty() {
                println!("Cycle-induced reflexive entities: {}", reflexive.len());
            }
            if pairs {
                for pair in labelled_pairs(engine.catalog(), matrix) {
                    println!("  {} -> {}", pair.child_label, pair.parent_label);
                }
            }
        }

        Commands::Path { ontology, from, to } => {
            let engine = Engine::load(&ontology, config)?;
            let sources = from
                .iter()
                .map(|name| resolve_name(&engine, name))
                .collect::<Result<Vec<_>, _>>()?;
            let target = resolve_name(&engine, &to)?;
            let path = engine.longest_path(&sources, &target)?;
            if path.length == 0 {
                println!("No path to {to}.");
            } else {
                println!("Longest path ({} edges):", path.length);
                for index in &path.indices {
                    println!("  {}", engine.catalog().short_name(*index).unwrap_or_default());
                }
            }
        }

        Commands::Cycles { ontology, limit } => {
            let engine = Engine::load(&ontology, config)?;
            let mut count = 0usize;
            for cycle in engine.simple_cycles().take(limit.unwrap_or(usize::MAX)) {
                count += 1;
                let names: Vec<&str> = cycle
                    .iter()
                    .filter_map(|&i| engine.catalog().short_name(i))
                    .collect();
                println!("  [{}]", names.join(", "));
            }
            println!("{count} simple cycle(s).");
        }

        Commands::Export { ontology, output } => {
            let engine = Engine::load(&ontology, config)?;
            let snapshot = engine.snapshot();
            match output {
                Some(path) => {
                    snapshot.write_json(&path)?;
                    println!("Exported {} pairs to {}", snapshot.pairs.len(), path.display());
                }
                None => println!("{}", snapshot.to_json()?),
            }
        }

        Commands::Verify { ontology } => {
            let engine = Engine::load(&ontology, config)?;
            let report = engine.verify_against_reasoner()?;
            let catalog = engine.catalog();
            let short = move |i: usize| catalog.short_name(i).unwrap_or_default();
            println!("Individuals checked:   {}", report.individuals);
            println!("Inferred memberships:  {}", report.inferred_memberships);
            for &i in &report.induced_reflexivity {
                println!("  reflexive via cycle: {}", short(i));
            }
            for discrepancy in &report.discrepancies {
                match *discrepancy {
                    Discrepancy::MatrixOnly { child, parent } => {
                        println!("  matrix only:   {} -> {}", short(child), short(parent))
                    }
                    Discrepancy::ReasonerOnly { child, parent } => {
                        println!("  reasoner only: {} -> {}", short(child), short(parent))
                    }
                }
            }
            if report.is_consistent() {
                println!("Closure agrees with the reasoner.");
            } else {
                println!("{} discrepancies.", report.discrepancies.len());
            }
        }
    }

    Ok(())
}

/// Accept a full entity name or, failing that, a unique short name.
fn resolve_name(engine: &Engine, name: &str) -> Result<String, QueryError> {
    let catalog = engine.catalog();
    if catalog.contains(name) {
        return Ok(name.to_string());
    }
    let mut matches = (0..catalog.len()).filter(|&i| catalog.short_name(i) == Some(name));
    match (matches.next(), matches.next()) {
        (Some(i), None) => Ok(catalog.name(i).unwrap_or_default().to_string()),
        _ => Err(QueryError::UnknownEntity {
            name: name.to_string(),
        }),
    }
}
