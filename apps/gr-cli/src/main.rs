use clap::{Parser, Subcommand};
use gr_connection::{Connection, ConnectionError, EnumerationConfig};
use gr_core::timing;
use gr_metric::{MetricError, MetricKind, PhysicalConstants, Spacetime};
use gr_symbolic::{Expr, SymbolicError, simplify};
use tracing::info;

#[derive(Parser)]
#[command(name = "gr-cli")]
#[command(about = "Christoffel symbols of predefined spacetime metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the predefined metrics and their coordinate bases
    Metrics,
    /// Print every nonzero Christoffel symbol of a metric
    Christoffel {
        /// Metric name (newton, weak-field, schwarzschild)
        metric: String,
        /// Only the independent symbols (k <= l)
        #[arg(long)]
        unique: bool,
        /// Evaluate index triples in parallel
        #[arg(long)]
        parallel: bool,
        /// Write r_s as 2GM/c^2
        #[arg(long)]
        expand_rs: bool,
        /// Print wall-clock timings
        #[arg(long)]
        timing: bool,
    },
    /// Print a single coefficient Γ^i_{k l}, zero included
    Coefficient {
        /// Metric name (newton, weak-field, schwarzschild)
        metric: String,
        /// Upper index
        i: usize,
        /// First lower index
        k: usize,
        /// Second lower index
        l: usize,
        /// Write r_s as 2GM/c^2
        #[arg(long)]
        expand_rs: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Metric(#[from] MetricError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Symbolic(#[from] SymbolicError),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let constants = PhysicalConstants::new();

    match cli.command {
        Commands::Metrics => cmd_metrics(&constants),
        Commands::Christoffel {
            metric,
            unique,
            parallel,
            expand_rs,
            timing,
        } => {
            if timing {
                timing::enable_timing();
            }
            let config = EnumerationConfig {
                parallel,
                lower_symmetric_only: unique,
            };
            cmd_christoffel(&constants, &metric, &config, expand_rs)
        }
        Commands::Coefficient {
            metric,
            i,
            k,
            l,
            expand_rs,
        } => cmd_coefficient(&constants, &metric, (i, k, l), expand_rs),
    }
}

fn load(constants: &PhysicalConstants, name: &str) -> CliResult<Spacetime> {
    let kind: MetricKind = name.parse()?;
    Ok(kind.build(constants))
}

/// Optionally rewrite `r_s` in terms of G, M and c.
fn present(constants: &PhysicalConstants, value: Expr, expand_rs: bool) -> CliResult<Expr> {
    if expand_rs && value.depends_on(&constants.r_s) {
        Ok(simplify(&constants.expand_schwarzschild_radius(&value))?)
    } else {
        Ok(value)
    }
}

fn cmd_metrics(constants: &PhysicalConstants) -> CliResult<()> {
    println!("Available metrics:");
    for kind in MetricKind::ALL {
        let st = kind.build(constants);
        println!("  {:<14} {} {}", kind.name(), st.basis, kind.description());
        for n in 0..gr_core::DIM {
            let g = st.metric.component(n, n).map_err(MetricError::from)?;
            println!("      g_{n}{n} = {g}");
        }
    }
    Ok(())
}

fn cmd_christoffel(
    constants: &PhysicalConstants,
    name: &str,
    config: &EnumerationConfig,
    expand_rs: bool,
) -> CliResult<()> {
    let st = load(constants, name)?;
    info!(metric = %st.kind, basis = %st.basis, "computing christoffel symbols");
    let connection = Connection::from_spacetime(&st)?;
    let entries = connection.christoffel_symbols(config)?;

    println!("Nonzero Christoffel symbols of {} in {}:", st.kind, st.basis);
    for mut entry in entries {
        entry.value = present(constants, entry.value, expand_rs)?;
        println!("  {entry}");
    }
    Ok(())
}

fn cmd_coefficient(
    constants: &PhysicalConstants,
    name: &str,
    (i, k, l): (usize, usize, usize),
    expand_rs: bool,
) -> CliResult<()> {
    let st = load(constants, name)?;
    let value = gr_connection::compute_christoffel(&st.metric, &st.basis, i, k, l)?;
    let value = present(constants, value, expand_rs)?;
    let [ci, ck, cl] = [i, k, l].map(|n| st.basis.symbols()[n].name());
    println!("Γ^{{{ci}}}_{{{ck} {cl}}} = {value}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_christoffel_flags() {
        let cli = Cli::try_parse_from([
            "gr-cli",
            "christoffel",
            "schwarzschild",
            "--unique",
            "--expand-rs",
        ])
        .unwrap();
        match cli.command {
            Commands::Christoffel {
                metric,
                unique,
                parallel,
                expand_rs,
                timing,
            } => {
                assert_eq!(metric, "schwarzschild");
                assert!(unique && expand_rs);
                assert!(!parallel && !timing);
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn parses_coefficient_indices() {
        let cli = Cli::try_parse_from(["gr-cli", "coefficient", "newton", "1", "0", "0"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Coefficient { i: 1, k: 0, l: 0, expand_rs: false, .. }
        ));
        assert!(Cli::try_parse_from(["gr-cli", "coefficient", "newton", "1", "x", "0"]).is_err());
    }

    #[test]
    fn unknown_metric_is_reported() {
        let err = load(&PhysicalConstants::new(), "kerr").unwrap_err();
        assert!(err.to_string().contains("kerr"));
    }

    #[test]
    fn expansion_drops_r_s() {
        let k = PhysicalConstants::new();
        let value = k.r_s.expr() / Expr::symbol("r");
        let shown = present(&k, value.clone(), true).unwrap();
        assert!(!shown.depends_on(&k.r_s));
        assert_eq!(present(&k, value.clone(), false).unwrap(), value);
    }
}
