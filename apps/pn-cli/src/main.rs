use clap::{Parser, Subcommand};
use pn_core::PipeId;
use pn_project::{Case, ProjectError, SolutionReport, load_case, save_report_json};
use pn_solver::{
    EQUATION_LABELS, FlowVector, IterationEvent, NewtonConfig, SolverError, max_jacobian_deviation,
    offsets, residual, solve, solve_with_progress, sweep, unit_flows,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pn-cli")]
#[command(about = "pipenet CLI - steady flows in the eight-pipe network", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a case and print the pipe flows
    Solve {
        /// Path to the case file (YAML, or JSON by extension)
        case_path: PathBuf,
        /// Write a JSON report to this path
        #[arg(long)]
        json: Option<PathBuf>,
        /// Print residual and step norm for every Newton step
        #[arg(short, long)]
        verbose: bool,
    },
    /// Validate case file syntax and values
    Validate {
        /// Path to the case file
        case_path: PathBuf,
    },
    /// Solve over a range of resistance offsets p in parallel
    Sweep {
        /// First offset
        #[arg(long, default_value_t = 0.0)]
        from: f64,
        /// Last offset
        #[arg(long, default_value_t = 100.0)]
        to: f64,
        /// Number of offsets, both ends included
        #[arg(long, default_value_t = 11)]
        steps: usize,
        /// Case whose initial flows and solver settings are used
        #[arg(long)]
        case_path: Option<PathBuf>,
    },
    /// Compare the analytic Jacobian with central differences at the initial guess
    CheckJacobian {
        /// Path to the case file
        case_path: PathBuf,
        /// Relative finite difference step
        #[arg(long, default_value_t = 1e-6)]
        epsilon: f64,
    },
    /// Print the reference case as YAML
    Template,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Did not converge within {iterations} iterations (residual norm {residual_norm:e})")]
    NotConverged {
        iterations: usize,
        residual_norm: f64,
    },
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            case_path,
            json,
            verbose,
        } => cmd_solve(&case_path, json.as_deref(), verbose),
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Sweep {
            from,
            to,
            steps,
            case_path,
        } => cmd_sweep(from, to, steps, case_path.as_deref()),
        Commands::CheckJacobian { case_path, epsilon } => cmd_check_jacobian(&case_path, epsilon),
        Commands::Template => cmd_template(),
    }
}

fn cmd_solve(case_path: &Path, json: Option<&Path>, verbose: bool) -> CliResult<()> {
    let case = load_case(case_path)?;
    tracing::debug!(path = %case_path.display(), name = %case.name, "Loaded case");
    let problem = case.to_problem()?;
    let config = case.newton_config();
    println!("Solving case: {}", case.name);

    let start = Instant::now();
    let result = if verbose {
        solve_with_progress(&problem, &config, &mut |event: IterationEvent| {
            println!(
                "  iter {:>3}: |F| = {:.6e}, |dQ| = {:.6e}",
                event.iteration, event.residual_norm, event.step_norm
            );
        })?
    } else {
        solve(&problem, &config)?
    };
    let elapsed = start.elapsed();

    if result.converged {
        println!("✓ Converged in {} iterations", result.iterations);
    } else {
        println!("✗ Did not converge within max iterations");
    }
    print_flows(&result.flows);
    println!("  Residual norm: {:.3e}", result.residual_norm);
    println!("  Solve time: {:.3} ms", elapsed.as_secs_f64() * 1e3);

    if verbose {
        let f = residual(&result.flows, &problem.resistances);
        for (label, value) in EQUATION_LABELS.iter().zip(f.iter()) {
            println!("  {label:>6}: {value:+.3e}");
        }
    }

    if let Some(path) = json {
        let report = SolutionReport::new(&case.name, &problem, &result);
        save_report_json(path, &report)?;
        println!("  Report written to {}", path.display());
    }

    if !result.converged {
        return Err(CliError::NotConverged {
            iterations: result.iterations,
            residual_norm: result.residual_norm,
        });
    }
    Ok(())
}

fn cmd_validate(case_path: &Path) -> CliResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = load_case(case_path)?;
    case.to_problem()?;
    println!("✓ Case is valid");
    Ok(())
}

fn cmd_sweep(from: f64, to: f64, steps: usize, case_path: Option<&Path>) -> CliResult<()> {
    let (initial_flows, config) = match case_path {
        Some(path) => {
            let case = load_case(path)?;
            let problem = case.to_problem()?;
            (problem.initial_flows, case.newton_config())
        }
        None => (unit_flows(), NewtonConfig::default()),
    };

    let points = sweep(&offsets(from, to, steps), &initial_flows, &config);
    tracing::info!(points = points.len(), from, to, "Sweep finished");

    let header: Vec<String> = PipeId::all().map(|id| format!("{:>10}", id.to_string())).collect();
    println!("{:>10} {:>5} {}", "p", "iter", header.join(" "));
    for point in &points {
        match &point.result {
            Ok(result) => {
                let flows: Vec<String> = result.flows.iter().map(|q| format!("{q:>10.6}")).collect();
                let iterations = if result.converged {
                    result.iterations.to_string()
                } else {
                    "-".to_string()
                };
                println!("{:>10.3} {:>5} {}", point.offset, iterations, flows.join(" "));
            }
            Err(e) => println!("{:>10.3} failed: {e}", point.offset),
        }
    }
    Ok(())
}

fn cmd_check_jacobian(case_path: &Path, epsilon: f64) -> CliResult<()> {
    let case = load_case(case_path)?;
    let problem = case.to_problem()?;
    let deviation =
        max_jacobian_deviation(&problem.initial_flows, &problem.resistances, epsilon)?;
    println!("Max |J_analytic - J_fd| at initial guess: {deviation:.3e}");
    Ok(())
}

fn cmd_template() -> CliResult<()> {
    print!("{}", serde_yaml::to_string(&Case::reference())?);
    Ok(())
}

fn print_flows(flows: &FlowVector) {
    println!("Flow in each pipe:");
    for id in PipeId::all() {
        println!("  {id}: {:.6}", flows[id.index()]);
    }
}
