mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use resonance_core::{
    MatchReport, NetworkGraph, Snapshot, build_network, classify, compare, export_roster,
    import_roster, import_snapshot, network_coherence, seed_roster,
};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "resonance", about = "Resonance compatibility scoring CLI")]
struct Cli {
    /// Scoring policy TOML (falls back to $RESONANCE_CONFIG, then defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two snapshot files
    Score {
        left: PathBuf,
        right: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank a roster against one of its members
    Network {
        /// Roster JSON file
        roster: PathBuf,

        /// Id of the center snapshot
        #[arg(long)]
        center: String,

        /// Minimum overall score to keep a connection
        #[arg(long)]
        min: Option<f64>,

        /// Maximum number of connections
        #[arg(long)]
        max: Option<usize>,

        /// Print the graph as JSON
        #[arg(long)]
        json: bool,
    },

    /// Map an overall score to its recommendation
    Classify {
        #[arg(allow_negative_numbers = true)]
        overall: f64,
    },

    /// Gate resonance bonus for two gate ids (1-64)
    Gate {
        #[arg(allow_negative_numbers = true)]
        left: i64,
        #[arg(allow_negative_numbers = true)]
        right: i64,
    },

    /// Validate a snapshot file and summarize its fields
    Inspect { path: PathBuf },

    /// Write a random roster for demos
    Seed {
        /// Output file path
        out: PathBuf,

        #[arg(long, default_value_t = 5)]
        count: usize,

        /// RNG seed for a reproducible roster
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Score { left, right, json } => cmd_score(&cli, left, right, *json),
        Commands::Network {
            roster,
            center,
            min,
            max,
            json,
        } => cmd_network(&cli, roster, center, *min, *max, *json),
        Commands::Classify { overall } => cmd_classify(*overall),
        Commands::Gate { left, right } => cmd_gate(&cli, *left, *right),
        Commands::Inspect { path } => cmd_inspect(path),
        Commands::Seed { out, count, seed } => cmd_seed(out, *count, *seed),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    Config::load(cli.config.as_deref()).context("failed to load config")
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let snapshot =
        import_snapshot(&content).with_context(|| format!("invalid snapshot {}", path.display()))?;
    tracing::debug!("loaded snapshot '{}' from {}", snapshot.id(), path.display());
    Ok(snapshot)
}

fn print_report(report: &MatchReport) {
    let r = &report.result;
    println!("pair:           {} <-> {}", report.left_id, report.right_id);
    println!("ci_similarity:  {:.4}", r.ci_similarity);
    println!("synchrony:      {:.4}", r.field_synchrony);
    println!("overall:        {:.4}", r.overall);
    println!("recommendation: {}", r.recommendation);
    println!(
        "gate:           {} (bonus {:.2})",
        if report.gate_resonance { "resonant" } else { "-" },
        report.gate_bonus
    );
    println!("interaction:    {:?}", report.interaction);
    for (name, s) in &report.field_synergy {
        println!("  {name:<10} {s:.4}");
    }
}

fn cmd_score(cli: &Cli, left: &Path, right: &Path, json: bool) -> Result<()> {
    let config = load_config(cli)?;
    let a = load_snapshot(left)?;
    let b = load_snapshot(right)?;

    let report = compare(&a, &b, &config.policy())
        .with_context(|| format!("failed to score '{}' against '{}'", a.id(), b.id()))?;
    tracing::info!(
        "scored {} vs {}: overall={:.4}",
        a.id(),
        b.id(),
        report.result.overall
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_graph(graph: &NetworkGraph) {
    println!("center: {}", graph.center_id);
    if graph.edges.is_empty() {
        println!("(no connections)");
        return;
    }
    for (edge, node) in graph.edges.iter().zip(graph.nodes.iter().skip(1)) {
        let gate = node
            .dominant_gate
            .map(|g| g.to_string())
            .unwrap_or_else(|| "-".to_string());
        let recommendation = node
            .recommendation
            .map(|r| r.to_string())
            .unwrap_or_default();
        println!(
            "  {:<36} {:.4}  gate {:>2}  {}",
            edge.target, edge.weight, gate, recommendation
        );
    }
}

fn cmd_network(
    cli: &Cli,
    roster_path: &Path,
    center: &str,
    min: Option<f64>,
    max: Option<usize>,
    json: bool,
) -> Result<()> {
    let config = load_config(cli)?;
    let content = std::fs::read_to_string(roster_path)
        .with_context(|| format!("failed to read {}", roster_path.display()))?;
    let roster = import_roster(&content)
        .with_context(|| format!("invalid roster {}", roster_path.display()))?;

    let Some(center_snapshot) = roster.iter().find(|s| s.id() == center) else {
        bail!("center '{center}' not found in roster");
    };

    let mut options = config.network_options();
    if let Some(min) = min {
        options.min_compatibility = min;
    }
    if let Some(max) = max {
        options.max_connections = max;
    }

    let graph = build_network(center_snapshot, &roster, &config.policy(), &options)
        .context("failed to build network")?;
    tracing::info!(
        "network for '{center}': {} of {} kept",
        graph.edges.len(),
        roster.len().saturating_sub(1)
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&graph)?);
    } else {
        print_graph(&graph);
    }
    Ok(())
}

fn cmd_classify(overall: f64) -> Result<()> {
    if !overall.is_finite() {
        bail!("overall must be a finite number");
    }
    if !(0.0..=1.0).contains(&overall) {
        tracing::warn!("overall {overall} outside [0, 1]");
    }
    println!("{}", classify(overall));
    Ok(())
}

fn cmd_gate(cli: &Cli, left: i64, right: i64) -> Result<()> {
    let config = load_config(cli)?;
    let bonus = config.policy().gate.bonus(left, right)?;
    println!("{bonus}");
    Ok(())
}

fn cmd_inspect(path: &Path) -> Result<()> {
    let snapshot = load_snapshot(path)?;

    println!("id:         {}", snapshot.id());
    println!(
        "gate:       {}",
        snapshot
            .dominant_gate()
            .map(|g| g.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    if let Some(profile) = snapshot.profile() {
        println!("profile:    {profile}");
    }
    println!("fields:     {}/9", snapshot.fields().len());
    match network_coherence(snapshot.fields()) {
        Some(c) => println!("coherence:  {c:.4}"),
        None => println!("coherence:  -"),
    }
    for (name, state) in snapshot.fields() {
        println!(
            "  {:<10} amp={:.2} freq={:.2}Hz phase={:.3} coh={:.2}",
            name,
            state.amplitude,
            state.frequency,
            state.phase.radians(),
            state.coherence
        );
    }
    Ok(())
}

fn cmd_seed(out: &Path, count: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_os_rng(),
    };
    let roster = seed_roster(count, &mut rng);
    let json = export_roster(&roster).context("failed to serialize roster")?;
    std::fs::write(out, &json).with_context(|| format!("failed to write {}", out.display()))?;

    println!("seeded {} snapshots to {}", roster.len(), out.display());
    for s in &roster {
        println!("  {}", s.id());
    }
    Ok(())
}
