use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pace_core::dates::{parse_weekday, week_dates, weekday_index, weekday_name};
use pace_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pace")]
#[command(about = "Deadline pacing and weekly progress planner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Spread remaining work over the days before a deadline
    Plan {
        /// Units left to do
        #[arg(long, conflicts_with_all = ["total", "goal"])]
        remaining: Option<u32>,

        /// Total units of the goal (use with --done)
        #[arg(long, conflicts_with = "goal")]
        total: Option<u32>,

        /// Units already done (only with --total)
        #[arg(long, default_value_t = 0, requires = "total")]
        done: u32,

        /// Read the goal from a JSON file
        #[arg(long)]
        goal: Option<PathBuf>,

        /// Deadline (YYYY-MM-DD); the plan stops the day before
        #[arg(long)]
        deadline: Option<NaiveDate>,

        /// Plan as if today were this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// linear or exponential
        #[arg(long)]
        distribution: Option<Distribution>,

        /// Curve intensity between 0 and 1
        #[arg(long)]
        intensity: Option<f64>,

        /// Weekdays to skip, as 0-6 (0 = Sunday) or names, comma separated
        #[arg(long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,

        /// Also write the plan to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show progress against the weekly goal table
    Week {
        /// Any date in the week to report (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Goal table JSON (defaults to <data-dir>/goals.json)
        #[arg(long)]
        goals: Option<PathBuf>,

        /// Work log CSV (defaults to <data-dir>/worklog.csv)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Print progress as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Where the plan's quantity comes from
struct PlanSource {
    title: Option<String>,
    unit: String,
    remaining: u32,
    deadline: NaiveDate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        pace_core::logging::init_with_level("debug");
    } else {
        pace_core::logging::init();
    }

    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }

    // Read the clock once per invocation
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Plan {
            remaining,
            total,
            done,
            goal,
            deadline,
            today: today_override,
            distribution,
            intensity,
            exclude,
            csv,
            json,
        } => {
            let source = resolve_source(remaining, total, done, goal, deadline)?;

            let excluded = match exclude {
                Some(names) => parse_excluded(&names)?,
                None => config.planner.excluded_weekdays.clone(),
            };

            let request = AllocationRequest::new(
                source.remaining,
                today_override.unwrap_or(today),
                source.deadline,
            )
            .with_distribution(distribution.unwrap_or(config.planner.distribution))
            .with_intensity(intensity.unwrap_or(config.planner.intensity))
            .with_excluded_weekdays(excluded);

            cmd_plan(&request, &source, csv, json)
        }
        Commands::Week {
            date,
            goals,
            log,
            json,
        } => {
            let goals_path = goals.unwrap_or_else(|| config.data.goals_path());
            let log_path = log.unwrap_or_else(|| config.data.worklog_path());
            cmd_week(
                date.unwrap_or(today),
                goals_path,
                log_path,
                config.weekly.week_starts_on,
                json,
            )
        }
    }
}

fn resolve_source(
    remaining: Option<u32>,
    total: Option<u32>,
    done: u32,
    goal: Option<PathBuf>,
    deadline: Option<NaiveDate>,
) -> Result<PlanSource> {
    if let Some(path) = goal {
        let goal = load_goal(&path)?;
        tracing::debug!("Planning from goal file {:?}", path);
        return Ok(PlanSource {
            remaining: goal.remaining(),
            deadline: deadline.unwrap_or(goal.deadline),
            title: Some(goal.title),
            unit: goal.unit,
        });
    }

    let deadline = deadline.ok_or_else(|| {
        Error::InvalidInput("--deadline is required unless --goal is given".into())
    })?;

    let remaining = match (remaining, total) {
        (Some(remaining), _) => remaining,
        (None, Some(total)) => total.saturating_sub(done),
        (None, None) => {
            return Err(Error::InvalidInput(
                "one of --remaining, --total or --goal is required".into(),
            ))
        }
    };

    tracing::debug!("Planning {} units due {}", remaining, deadline);

    Ok(PlanSource {
        title: None,
        unit: "units".into(),
        remaining,
        deadline,
    })
}

fn parse_excluded(names: &[String]) -> Result<Vec<u8>> {
    names
        .iter()
        .filter(|n| !n.trim().is_empty())
        .map(|n| {
            parse_weekday(n)
                .ok_or_else(|| Error::InvalidInput(format!("unknown weekday '{}'", n)))
        })
        .collect()
}

fn cmd_plan(
    request: &AllocationRequest,
    source: &PlanSource,
    csv: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let plan = allocate(request);

    if let Some(path) = csv {
        let rows = write_plan_csv(&plan, &path)?;
        if !json {
            println!("✓ Wrote {} days to {}", rows, path.display());
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    display_plan(&plan, source);
    Ok(())
}

fn display_plan(plan: &AllocationPlan, source: &PlanSource) {
    println!("\n╭─────────────────────────────────────────╮");
    match source.title {
        Some(ref title) => println!("│  PLAN: {} ({} {} left)", title, plan.remaining_quantity, source.unit),
        None => println!("│  PLAN: {} {} left", plan.remaining_quantity, source.unit),
    }
    println!("╰─────────────────────────────────────────╯");
    println!();

    if plan.is_expired {
        println!("  Deadline {} has passed, nothing to plan.", plan.deadline);
        return;
    }

    if plan.is_complete() {
        println!("  ✓ Goal already complete.");
        return;
    }

    if plan.is_blocked() {
        println!(
            "  All days before {} are excluded; {} {} left unallocated.",
            plan.deadline, plan.total_allocated, source.unit
        );
        return;
    }

    match plan.distribution {
        Distribution::Linear => println!("  Linear distribution"),
        Distribution::Exponential => {
            println!("  Exponential distribution, intensity {:.2}", plan.intensity)
        }
    }
    println!(
        "  {} days, {} effective, {:.1} {} per day on average",
        plan.days.len(),
        plan.effective_day_count,
        plan.average_per_effective_day,
        source.unit
    );
    println!();

    println!(
        "  {:<12}{:<11}{:>8}{:>8}{:>7}",
        "Date", "Day", "Amount", "Total", "%avg"
    );
    for day in &plan.days {
        if day.is_excluded {
            println!("  {:<12}{:<11}{:>8}", day.date.to_string(), day.weekday_name, "-");
        } else {
            println!(
                "  {:<12}{:<11}{:>8}{:>8}{:>6}%",
                day.date.to_string(),
                day.weekday_name,
                day.allocated,
                day.cumulative_allocated,
                day.percent_of_average
            );
        }
    }

    if !plan.phases.is_empty() {
        println!();
        println!("  Phases");
        for phase in &plan.phases {
            println!(
                "  {:<10} days {:>3}-{:<3} avg {:>6.1}  total {:>5}  {}",
                phase.label(),
                phase.start_day_index,
                phase.end_day_index,
                phase.average_per_day,
                phase.total_allocated,
                phase.percent_range_label
            );
        }
    }

    println!();
    match plan.today_allocation() {
        Some(day) if day.is_excluded => println!("  Today: rest day"),
        Some(day) => match plan.current_phase() {
            Some(phase) => println!("  Today: {} {} ({})", day.allocated, source.unit, phase.label()),
            None => println!("  Today: {} {}", day.allocated, source.unit),
        },
        None => {}
    }
    println!();
}

fn cmd_week(
    date: NaiveDate,
    goals_path: PathBuf,
    log_path: PathBuf,
    week_start: WeekStart,
    json: bool,
) -> Result<()> {
    let table = WeeklyGoalTable::load(&goals_path)?;
    let log = WorkLog::load(&log_path)?;

    let week = week_dates(date, week_start);
    let progress = week_progress(&week, &table, &log);

    if json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
        return Ok(());
    }

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  WEEK OF {}", week[0]);
    println!("╰─────────────────────────────────────────╯");
    println!();

    for day in &progress.days {
        let name = weekday_name(weekday_index(day.date));
        if day.target_minutes == 0 {
            println!("  {:<11}{}   no goals", name, day.date);
        } else {
            println!(
                "  {:<11}{}   {:>4}/{:<4} min  {:>3}%",
                name, day.date, day.completed_minutes, day.target_minutes, day.percentage
            );
        }
    }

    println!();
    println!(
        "  Week: {}/{} min ({}%)",
        progress.completed_minutes, progress.target_minutes, progress.percentage
    );
    println!();

    Ok(())
}
