//! DnD Game Rolls widget CLI
//!
//! Drives the dice widget without a window: roll the d6/d20 at a fixed frame
//! rate and apply multipliers, or sample many rolls and check them against a
//! fair die.

use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use dndgamerolls_widget::dice3d::{
    chi_square_critical_999, result_caption, DiceType, DiceWidget, MultiplierOverlay,
    OutcomeHistogram, RollEvent, RollPhase, WidgetConfig, MULTIPLIER_FACTORS,
};

/// Frame step used when driving the widget (60 Hz)
const FRAME: Duration = Duration::from_micros(16_667);

/// Upper bound on frames per roll; a roll normally resolves in ~100.
const MAX_FRAMES_PER_ROLL: u32 = 10_000;

/// DnD Game Rolls - headless dice widget
#[derive(Parser)]
#[command(name = "dndwidget")]
#[command(
    author,
    version,
    about = "DnD Game Rolls - drive the d6/d20 roll widget from the command line"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll the die and optionally scale the result
    Roll {
        /// Die to roll (d6 or d20)
        #[arg(short, long, value_parser = parse_die_arg)]
        die: Option<DiceType>,

        /// Number of rolls
        #[arg(short, long, default_value = "1")]
        times: u32,

        /// Multiplier to apply to the last result (2-6). Can be repeated.
        #[arg(short, long, value_parser = parse_factor_arg)]
        multiply: Vec<u32>,

        /// Undo the multipliers afterwards
        #[arg(short, long)]
        reset: bool,

        /// Seed for a reproducible sequence
        #[arg(short, long)]
        seed: Option<u64>,

        /// Path to a RON widget config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },

    /// Sample many rolls and test them against a fair die
    Stats {
        /// Die to sample (d6 or d20)
        #[arg(short, long, value_parser = parse_die_arg, default_value = "d6")]
        die: DiceType,

        /// Number of rolls to sample
        #[arg(short = 'n', long, default_value = "10000")]
        samples: u32,

        /// Seed for a reproducible sample
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
}

fn parse_die_arg(s: &str) -> Result<DiceType, String> {
    DiceType::parse(s).ok_or_else(|| format!("Unknown die '{}': expected d6 or d20", s))
}

fn parse_factor_arg(s: &str) -> Result<u32, String> {
    let factor: u32 = s
        .trim()
        .trim_start_matches(['x', 'X'])
        .parse()
        .map_err(|_| format!("Invalid multiplier '{}'", s))?;
    if MULTIPLIER_FACTORS.contains(&factor) {
        Ok(factor)
    } else {
        Err(format!(
            "Unsupported multiplier '{}': expected one of {:?}",
            s, MULTIPLIER_FACTORS
        ))
    }
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

// ============================================================================
// Roll
// ============================================================================

#[derive(Debug, Serialize)]
struct RollRecord {
    outcome: u32,
    caption: String,
    frames: u32,
}

#[derive(Debug, Serialize)]
struct RollReport {
    die: DiceType,
    rolls: Vec<RollRecord>,
    multipliers: Vec<u32>,
    reset: bool,
    display_value: Option<u64>,
    multiplier: u64,
}

/// Click once and step frames until the die is at rest.
fn roll_once(
    widget: &mut DiceWidget,
    overlay: &mut MultiplierOverlay,
    rng: &mut StdRng,
) -> Result<RollRecord, String> {
    if !widget.click() {
        return Err("a roll is already in flight".to_string());
    }

    let mut outcome = None;
    for frame in 1..=MAX_FRAMES_PER_ROLL {
        for event in widget.advance(FRAME, rng) {
            if let RollEvent::Completed { outcome: o, .. } = event {
                overlay.on_roll_complete(o);
                outcome = Some(o);
            }
        }
        if widget.engine().phase() == RollPhase::Resolved {
            let outcome = outcome.ok_or("die settled without reporting an outcome")?;
            return Ok(RollRecord {
                outcome,
                caption: result_caption(widget.active_die(), outcome),
                frames: frame,
            });
        }
    }
    Err(format!(
        "die did not settle within {} frames",
        MAX_FRAMES_PER_ROLL
    ))
}

fn load_config(path: Option<&PathBuf>) -> Result<WidgetConfig, String> {
    match path {
        Some(path) => WidgetConfig::load(path).map_err(|e| e.to_string()),
        None => Ok(WidgetConfig::bundled()),
    }
}

fn run_roll(
    die: Option<DiceType>,
    times: u32,
    multiply: &[u32],
    reset: bool,
    seed: Option<u64>,
    config: Option<&PathBuf>,
) -> Result<RollReport, String> {
    let mut config = load_config(config)?;
    if let Some(die) = die {
        config.default_die = die;
    }
    let seed = seed.or(config.seed);

    let mut widget = DiceWidget::from_config(&config);
    let mut overlay = MultiplierOverlay::default();
    let mut rng = rng_from_seed(seed);

    let mut rolls = Vec::new();
    for _ in 0..times.max(1) {
        rolls.push(roll_once(&mut widget, &mut overlay, &mut rng)?);
    }

    for &factor in multiply {
        if !overlay.multiply(factor) {
            return Err(format!("could not apply x{} multiplier", factor));
        }
    }
    if reset {
        overlay.reset_multiplier();
    }

    Ok(RollReport {
        die: widget.active_die(),
        rolls,
        multipliers: multiply.to_vec(),
        reset,
        display_value: overlay.display_value(),
        multiplier: overlay.multiplier(),
    })
}

fn print_roll_report(report: &RollReport) {
    println!("\n{}", "═══════════════════════════════════════".cyan());
    println!("{} {}", "Rolling:".bold().white(), report.die.name().yellow().bold());

    for (i, roll) in report.rolls.iter().enumerate() {
        let caption = match (report.die, roll.outcome) {
            (DiceType::D20, 20) => roll.caption.bright_green().bold(),
            (DiceType::D20, 1) => roll.caption.bright_red().bold(),
            _ => roll.caption.white().bold(),
        };
        println!(
            "  #{:<3} {} {}",
            i + 1,
            caption,
            format!("({} frames)", roll.frames).dimmed()
        );
    }

    if !report.multipliers.is_empty() {
        let factors: Vec<String> = report.multipliers.iter().map(|f| format!("x{}", f)).collect();
        println!("{} {}", "Multipliers:".bold().white(), factors.join(" ").cyan());
        if report.reset {
            println!("{} {}", "Reset:".bold().white(), "yes".cyan());
        }
    }

    if let Some(value) = report.display_value {
        let shown = if report.multiplier > 1 {
            format!("{} (x{})", value, report.multiplier)
        } else {
            value.to_string()
        };
        println!("{} {}", "Value:".bold().white(), shown.bright_green().bold());
    }
    println!("{}", "═══════════════════════════════════════".cyan());
}

// ============================================================================
// Stats
// ============================================================================

#[derive(Debug, Serialize)]
struct StatsReport {
    die: DiceType,
    samples: u64,
    counts: Vec<u64>,
    chi_square: f64,
    critical_999: f64,
    uniform: bool,
}

fn run_stats(die: DiceType, samples: u32, seed: Option<u64>) -> Result<StatsReport, String> {
    let config = WidgetConfig {
        default_die: die,
        ..WidgetConfig::default()
    };
    let mut widget = DiceWidget::from_config(&config);
    let mut rng = rng_from_seed(seed);
    let mut histogram = OutcomeHistogram::new(die);

    // A single step of the full roll duration resolves and settles the die.
    let step = config.roll_duration();
    for _ in 0..samples {
        if !widget.click() {
            return Err("a roll is already in flight".to_string());
        }
        for event in widget.advance(step, &mut rng) {
            if let RollEvent::Completed { outcome, .. } = event {
                histogram.record(outcome);
            }
        }
    }

    Ok(StatsReport {
        die,
        samples: histogram.total(),
        counts: histogram.iter().map(|(_, count)| count).collect(),
        chi_square: histogram.chi_square(),
        critical_999: chi_square_critical_999(die),
        uniform: histogram.looks_uniform(),
    })
}

fn print_stats_report(report: &StatsReport) {
    println!("\n{}", "═══════════════════════════════════════".cyan());
    println!(
        "{} {} x {}",
        "Sampled:".bold().white(),
        report.die.name().yellow().bold(),
        report.samples
    );

    let max = report.counts.iter().copied().max().unwrap_or(0).max(1);
    for (i, count) in report.counts.iter().enumerate() {
        let bar = "█".repeat((count * 40 / max) as usize);
        println!("  {:>2} {:>6} {}", i + 1, count, bar.green());
    }

    let verdict = if report.uniform {
        "consistent with a fair die".bright_green().bold()
    } else {
        "NOT consistent with a fair die".bright_red().bold()
    };
    println!(
        "{} {:.3} (p=0.001 threshold {:.3}) {}",
        "Chi-square:".bold().white(),
        report.chi_square,
        report.critical_999,
        verdict
    );
    println!("{}", "═══════════════════════════════════════".cyan());
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", text);
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roll {
            die,
            times,
            multiply,
            reset,
            seed,
            config,
            json,
        } => run_roll(die, times, &multiply, reset, seed, config.as_ref()).and_then(|report| {
            if json {
                print_json(&report)
            } else {
                print_roll_report(&report);
                Ok(())
            }
        }),
        Commands::Stats {
            die,
            samples,
            seed,
            json,
        } => run_stats(die, samples, seed).and_then(|report| {
            if json {
                print_json(&report)
            } else {
                print_stats_report(&report);
                Ok(())
            }
        }),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_factor_arg() {
        assert_eq!(parse_factor_arg("2"), Ok(2));
        assert_eq!(parse_factor_arg("x6"), Ok(6));
        assert!(parse_factor_arg("7").is_err());
        assert!(parse_factor_arg("1").is_err());
        assert!(parse_factor_arg("abc").is_err());
    }

    #[test]
    fn test_parse_die_arg() {
        assert_eq!(parse_die_arg("d6"), Ok(DiceType::D6));
        assert_eq!(parse_die_arg("D20"), Ok(DiceType::D20));
        assert!(parse_die_arg("d8").is_err());
    }

    #[test]
    fn test_roll_is_reproducible_with_seed() {
        let a = run_roll(Some(DiceType::D20), 5, &[], false, Some(9), None).unwrap();
        let b = run_roll(Some(DiceType::D20), 5, &[], false, Some(9), None).unwrap();
        let outcomes = |r: &RollReport| r.rolls.iter().map(|x| x.outcome).collect::<Vec<_>>();
        assert_eq!(outcomes(&a), outcomes(&b));
        assert_eq!(a.rolls.len(), 5);
        assert_eq!(a.die, DiceType::D20);
    }

    #[test]
    fn test_roll_with_multipliers_and_reset() {
        let report = run_roll(Some(DiceType::D6), 1, &[2, 3], false, Some(1), None).unwrap();
        let outcome = report.rolls[0].outcome as u64;
        assert_eq!(report.display_value, Some(outcome * 6));
        assert_eq!(report.multiplier, 6);

        let report = run_roll(Some(DiceType::D6), 1, &[2, 3], true, Some(1), None).unwrap();
        assert_eq!(report.display_value, Some(outcome));
        assert_eq!(report.multiplier, 1);
    }

    #[test]
    fn test_roll_resolves_after_roll_duration() {
        let report = run_roll(Some(DiceType::D20), 1, &[], false, Some(3), None).unwrap();
        // 1500 ms at 60 Hz
        assert_eq!(report.rolls[0].frames, 90);
    }

    #[test]
    fn test_stats_counts_every_sample() {
        let report = run_stats(DiceType::D6, 600, Some(5)).unwrap();
        assert_eq!(report.samples, 600);
        assert_eq!(report.counts.len(), 6);
        assert_eq!(report.counts.iter().sum::<u64>(), 600);
        assert_eq!(report.die, DiceType::D6);
    }

    #[test]
    fn test_json_report_names_die() {
        let report = run_roll(Some(DiceType::D6), 1, &[], false, Some(2), None).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["die"], "d6");
    }
}
