mod os_signal_termination;
mod result;

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use clap::ValueEnum;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use result::SaplingError;
use result::SaplingResult;
use sapling_solver::core::branching::branchers::FirstFail;
use sapling_solver::core::branching::branchers::LimitedDiscrepancy;
use sapling_solver::core::branching::branchers::MaxMarginalStrength;
use sapling_solver::core::branching::Brancher;
use sapling_solver::core::convert_case::Case;
use sapling_solver::core::engine::variables::DomainId;
use sapling_solver::core::engine::DomainContext;
use sapling_solver::core::engine::MAX_DOMAIN_SIZE;
use sapling_solver::core::search::DepthFirstSearch;
use sapling_solver::core::state::CellStrategy;
use sapling_solver::core::statistics::configure_statistic_logging;
use sapling_solver::core::termination::NodeBudget;
use sapling_solver::core::termination::SolutionBudget;
use sapling_solver::core::termination::TerminationCondition;
use sapling_solver::core::termination::TimeBudget;
use sapling_solver::core::SearchStatistics;
use sapling_solver::models::Binary;
use sapling_solver::models::Queens;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The problem to search over.
    ///  - 'queens' places n non-attacking queens on an n x n board,
    ///  - 'binary' enumerates all assignments of n 0/1 variables.
    #[arg(value_enum, verbatim_doc_comment)]
    problem: Problem,

    /// The size of the problem.
    ///
    /// Possible values: usize
    #[arg(default_value_t = 8, verbatim_doc_comment)]
    n: usize,

    /// The branching heuristic.
    ///
    /// - "first-fail" branches on the leftmost unfixed variable and its smallest value
    /// - "max-marginal" branches on the value whose marginal stands out most from a uniform
    ///   distribution over its domain
    #[arg(long, value_enum, default_value_t)]
    strategy: Strategy,

    /// Restricts the search to paths which deviate from the heuristic at most this many times.
    ///
    /// Possible values: u32
    #[arg(long, verbatim_doc_comment)]
    discrepancy: Option<u32>,

    /// Stops the search after this many nodes.
    ///
    /// Possible values: u64
    #[arg(long, verbatim_doc_comment)]
    node_limit: Option<u64>,

    /// Stops the search after this many solutions.
    ///
    /// Possible values: u64
    #[arg(long, verbatim_doc_comment)]
    solution_limit: Option<u64>,

    /// The time budget for the search, in milliseconds.
    ///
    /// Possible values: u64
    #[arg(short = 't', long = "time-limit", verbatim_doc_comment)]
    time_limit: Option<u64>,

    /// How reversible cells save their prior values.
    ///
    /// - "trail" records a cell at most once per checkpoint
    /// - "copy" records a cell on every write
    #[arg(long, value_enum, default_value_t)]
    cell_strategy: CellStrategy,

    /// Prints every solution which is found.
    ///
    /// Possible values: bool
    #[arg(long = "print-solutions", verbatim_doc_comment)]
    print_solutions: bool,

    /// Enables log message output from the search.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,

    /// Enables logging of statistics from the search.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", verbatim_doc_comment)]
    log_statistics: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Problem {
    Queens,
    Binary,
}

#[derive(Debug, Default, Clone, Copy, ValueEnum)]
enum Strategy {
    #[default]
    FirstFail,
    MaxMarginal,
}

fn configure_logging(verbose: bool, log_statistics: bool) -> std::io::Result<()> {
    if log_statistics {
        configure_statistic_logging("%% stat:", Some("%% stat-end"), Some(Case::Camel), None);
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> SaplingResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics)?;

    if sapling_solver::core::asserts::SAPLING_ASSERT_LEVEL_DEFINITION
        >= sapling_solver::core::asserts::SAPLING_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the Sapling assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.",
            sapling_solver::core::asserts::SAPLING_ASSERT_LEVEL_DEFINITION
        );
    };

    if args.n == 0 {
        return Err(SaplingError::InvalidSize {
            problem: format!("{:?}", args.problem).to_lowercase(),
            minimum: 1,
            size: args.n,
        });
    }
    if !u32::try_from(args.n).is_ok_and(|n| n <= MAX_DOMAIN_SIZE) {
        return Err(SaplingError::SizeTooLarge(args.n));
    }

    match args.problem {
        Problem::Queens => {
            let model = Queens::new(args.n, args.cell_strategy);
            let queens = model.queens().to_vec();
            search(model, &queens, &args)
        }
        Problem::Binary => {
            let model = Binary::new(args.n, args.cell_strategy);
            let variables = model.variables().to_vec();
            search(model, &variables, &args)
        }
    }
}

fn search<Ctx: DomainContext + 'static>(
    mut model: Ctx,
    variables: &[DomainId],
    args: &Args,
) -> SaplingResult<()> {
    let heuristic: Box<dyn Brancher<Ctx>> = match args.strategy {
        Strategy::FirstFail => Box::new(FirstFail::new(variables)),
        Strategy::MaxMarginal => Box::new(MaxMarginalStrength::new(variables)),
    };
    let brancher: Box<dyn Brancher<Ctx>> = match args.discrepancy {
        Some(budget) => Box::new(LimitedDiscrepancy::new(
            model.state_manager_mut(),
            heuristic,
            budget,
        )),
        None => heuristic,
    };

    let mut search = DepthFirstSearch::new(model, brancher);
    if args.print_solutions {
        search.on_solution(|model: &Ctx, statistics| {
            if let Some(values) = model.domains().solution() {
                let values = values
                    .iter()
                    .map(|value| value.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("solution {}: {values}", statistics.num_solutions());
            }
        });
    }

    let mut os_signal = OsSignal::install()?;
    let mut node_budget = args.node_limit.map(NodeBudget::new);
    let mut solution_budget = args.solution_limit.map(SolutionBudget::new);
    let mut time_budget = args
        .time_limit
        .map(|time_limit| TimeBudget::starting_now(Duration::from_millis(time_limit)));
    let mut termination = |statistics: &SearchStatistics| {
        os_signal.should_stop(statistics)
            || node_budget
                .as_mut()
                .is_some_and(|budget| budget.should_stop(statistics))
            || solution_budget
                .as_mut()
                .is_some_and(|budget| budget.should_stop(statistics))
            || time_budget
                .as_mut()
                .is_some_and(|budget| budget.should_stop(statistics))
    };

    let statistics = search.solve(&mut termination);

    println!(
        "{} solutions, {} failures, {} nodes",
        statistics.num_solutions(),
        statistics.num_failures(),
        statistics.num_nodes()
    );
    if statistics.is_completed() {
        println!("==========");
    } else {
        println!("=====UNKNOWN=====");
    }

    search.log_statistics();
    Ok(())
}
