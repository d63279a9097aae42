use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use pacematch_core::analysis::analyze_workout_with;
use pacematch_core::metrics::calculate_planned_metrics_with;
use pacematch_core::resolver::activities_in_window;
use pacematch_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pacematch")]
#[command(about = "Match recorded runs against structured workout plans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct PlanSource {
    /// Plan file (.json or .toml)
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Built-in template id (see `pacematch templates`)
    #[arg(long)]
    template: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the flattened step sequence of a plan
    Steps {
        #[command(flatten)]
        source: PlanSource,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show planned distance, duration and objective of a plan
    Metrics {
        #[command(flatten)]
        source: PlanSource,

        #[arg(long)]
        json: bool,
    },

    /// Match a plan against recorded activities
    Analyze(AnalyzeArgs),

    /// Check a plan's structure
    Validate {
        #[command(flatten)]
        source: PlanSource,
    },

    /// List built-in plan templates
    Templates,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        pacematch_core::logging::init_with_level("debug");
    } else {
        pacematch_core::logging::init();
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Steps { source, json } => cmd_steps(&source, json),
        Commands::Metrics { source, json } => cmd_metrics(&source, json, &config),
        Commands::Analyze(args) => cmd_analyze(args, &config),
        Commands::Validate { source } => cmd_validate(&source),
        Commands::Templates => cmd_templates(),
    }
}

fn load_source(source: &PlanSource) -> Result<WorkoutPlan> {
    match (&source.plan, &source.template) {
        (Some(path), _) => load_plan(path),
        (None, Some(id)) => get_template(id)
            .cloned()
            .ok_or_else(|| Error::Other(format!("Unknown template: {}", id))),
        (None, None) => Err(Error::Other("Either --plan or --template is required".into())),
    }
}

/// Load a plan and refuse it if it fails validation
fn load_valid_plan(source: &PlanSource) -> Result<WorkoutPlan> {
    let plan = load_source(source)?;
    let errors = validate_plan(&plan);
    if !errors.is_empty() {
        eprintln!("Plan validation errors:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::InvalidPlan(format!(
            "{} problem(s) in plan '{}'",
            errors.len(),
            plan.id
        )));
    }
    Ok(plan)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_steps(source: &PlanSource, json: bool) -> Result<()> {
    let plan = load_valid_plan(source)?;
    let steps = flatten_workout(&plan.blocks);

    if json {
        return print_json(&steps);
    }

    println!("{} ({} steps)", plan_title(&plan), steps.len());
    println!();
    for step in &steps {
        println!(
            "  {:>3}  {:<28} {}{}",
            step.step_index,
            step.label,
            format_target(step.target_type, step.target_value),
            format_intensity(step.intensity.as_ref())
        );
    }

    Ok(())
}

fn cmd_metrics(source: &PlanSource, json: bool, config: &Config) -> Result<()> {
    let plan = load_valid_plan(source)?;
    let planned = calculate_planned_metrics_with(&plan.blocks, &config.metrics);
    let objective = objective_type(&plan);

    if json {
        return print_json(&serde_json::json!({
            "plan_id": plan.id,
            "objective_type": objective,
            "planned": planned,
        }));
    }

    println!("{}", plan_title(&plan));
    println!();
    println!(
        "  Distance:  {}",
        format_target(TargetType::Distance, planned.planned_distance_meters)
    );
    println!(
        "  Duration:  {}",
        format_target(TargetType::Duration, planned.planned_duration_seconds)
    );
    println!("  Objective: {:?}", objective);

    Ok(())
}

#[derive(Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    source: PlanSource,

    /// JSON array of recorded activities
    #[arg(long)]
    activities: PathBuf,

    /// Scheduled date (YYYY-MM-DD); only activities around it are candidates
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Days either side of --date to search (defaults to config)
    #[arg(long, requires = "date")]
    window_days: Option<u32>,

    /// Link this activity id instead of auto-selecting
    #[arg(long)]
    activity_id: Option<String>,

    /// CSV of laps for the selected activity (replaces its laps)
    #[arg(long)]
    laps: Option<PathBuf>,

    /// Write the matched laps to this CSV file
    #[arg(long)]
    export_laps: Option<PathBuf>,

    /// Append the analysis to the report log
    #[arg(long)]
    log: bool,

    /// Report log location (defaults to config)
    #[arg(long)]
    log_path: Option<PathBuf>,

    #[arg(long)]
    json: bool,
}

fn cmd_analyze(args: AnalyzeArgs, config: &Config) -> Result<()> {
    let plan = load_valid_plan(&args.source)?;
    let all_activities = load_activities(&args.activities)?;

    let mut candidates = match args.date {
        Some(date) => {
            let window = args.window_days.unwrap_or(config.resolver.window_days);
            activities_in_window(&all_activities, date, window)
        }
        None => all_activities,
    };
    tracing::debug!("{} candidate activities", candidates.len());

    let selection = match args.activity_id {
        Some(id) => ActivitySelection::Manual(id),
        None => ActivitySelection::Auto,
    };

    if let Some(laps_path) = &args.laps {
        attach_laps(&mut candidates, &plan, &selection, laps_path, config)?;
    }

    let analysis = analyze_workout_with(&plan, &candidates, &selection, config);

    if let Some(export_path) = &args.export_laps {
        let count = export_matched_laps_csv(&analysis.laps, export_path)?;
        eprintln!("Exported {} laps to {}", count, export_path.display());
    }

    if args.log {
        let log_path = args
            .log_path
            .clone()
            .unwrap_or_else(|| config.data.log_path.clone());
        let report = AnalysisReport::new(analysis.clone());
        let mut sink = JsonlReportSink::new(&log_path);
        sink.append(&report)?;
        eprintln!("Logged report {} to {}", report.id, log_path.display());
    }

    if args.json {
        return print_json(&analysis);
    }

    display_analysis(&plan, &analysis);
    Ok(())
}

/// Replace the laps of whichever activity the plan resolves to
fn attach_laps(
    candidates: &mut [RecordedActivity],
    plan: &WorkoutPlan,
    selection: &ActivitySelection,
    laps_path: &Path,
    config: &Config,
) -> Result<()> {
    let laps = load_laps_csv(laps_path)?;
    let planned = calculate_planned_metrics_with(&plan.blocks, &config.metrics);

    let Some(chosen_id) = select_activity(candidates, &planned, selection).map(|a| a.id.clone())
    else {
        return Err(Error::Activity(
            "--laps given but no activity matched the plan".into(),
        ));
    };

    if let Some(activity) = candidates.iter_mut().find(|a| a.id == chosen_id) {
        activity.laps = laps;
    }
    Ok(())
}

fn cmd_validate(source: &PlanSource) -> Result<()> {
    let plan = load_valid_plan(source)?;
    println!("✓ Plan '{}' is valid ({} blocks)", plan.id, plan.blocks.len());
    Ok(())
}

fn cmd_templates() -> Result<()> {
    for plan in pacematch_core::catalog::templates() {
        println!("  {:<16} {}", plan.id, plan.name);
    }
    Ok(())
}

fn plan_title(plan: &WorkoutPlan) -> String {
    if plan.name.is_empty() {
        plan.id.clone()
    } else {
        format!("{} [{}]", plan.name, plan.id)
    }
}

fn format_target(target_type: TargetType, value: f64) -> String {
    match target_type {
        TargetType::Distance => format!("{:.0} m", value),
        TargetType::Duration => format_pace(value.round().max(0.0) as u32),
    }
}

fn format_intensity(target: Option<&IntensityTarget>) -> String {
    match target {
        Some(IntensityTarget::Pace { min, max }) => match (min, max) {
            (Some(min), Some(max)) => format!("  @ {}-{}/km", min, max),
            (Some(p), None) | (None, Some(p)) => format!("  @ {}/km", p),
            (None, None) => String::new(),
        },
        Some(IntensityTarget::HeartRate { min, max }) => match (min, max) {
            (Some(min), Some(max)) => format!("  @ {}-{} bpm", min, max),
            (Some(hr), None) | (None, Some(hr)) => format!("  @ {} bpm", hr),
            (None, None) => String::new(),
        },
        // already part of the step label
        Some(IntensityTarget::Rpe { .. }) | None => String::new(),
    }
}

fn display_analysis(plan: &WorkoutPlan, analysis: &WorkoutAnalysis) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", plan_title(plan));
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Planned: {} / {} ({} steps, objective {:?})",
        format_target(TargetType::Distance, analysis.planned.planned_distance_meters),
        format_target(TargetType::Duration, analysis.planned.planned_duration_seconds),
        analysis.steps.len(),
        analysis.objective_type
    );

    let (Some(activity_id), Some(quality)) = (&analysis.activity_id, &analysis.quality) else {
        println!();
        println!("  No matching activity found.");
        println!();
        return;
    };

    println!("  Activity: {}", activity_id);
    println!();
    println!("  Match score: {}/100", quality.overall_score);
    println!("  Objective match: {}/100", quality.objective_match_score);
    println!(
        "  Distance: {} m actual vs {} m planned ({:+.1}%)",
        quality.actual_distance, quality.planned_distance, quality.distance_percent_delta
    );
    println!(
        "  Duration: {} actual vs {} planned ({:+.1}%)",
        format_pace(quality.actual_duration.max(0) as u32),
        format_pace(quality.planned_duration.max(0) as u32),
        quality.duration_percent_delta
    );

    if let Some(summary) = &analysis.lap_summary {
        println!();
        println!(
            "  Laps: {}/{} steps matched ({:.1}%), {} unmatched, {} extra",
            summary.matched_steps,
            summary.total_steps,
            summary.completion_percent,
            summary.unmatched_laps,
            summary.extra_laps
        );
        println!();
        for lap in &analysis.laps {
            let mark = if lap.matched { "✓" } else { "✗" };
            println!(
                "  {} lap {:>2}  {:<24} {:>3}%  {:+.1}%",
                mark, lap.lap_index, lap.step_label, lap.confidence, lap.variance_percent
            );
        }
    }

    println!();
}
