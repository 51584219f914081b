use clap::{Parser, Subcommand};
use sgt_core::{degf, psia};
use sgt_secondary::{DrainPhase, Regime, SecondaryConfig, SecondarySide, TickInputs};
use sgt_water::CorrelationTables;

#[derive(Parser)]
#[command(name = "sgt-cli")]
#[command(about = "sgtherm CLI - steam generator secondary heatup driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a plant heatup against the secondary-side model
    Heatup {
        /// Simulated duration in hours
        #[arg(long, default_value_t = 12.0)]
        hours: f64,
        /// Timestep in seconds
        #[arg(long, default_value_t = 10.0)]
        dt: f64,
        /// Reactor coolant pumps running
        #[arg(long, default_value_t = 4)]
        pumps: u32,
        /// Primary heatup ramp in degF per hour
        #[arg(long, default_value_t = 50.0)]
        ramp_f_per_hr: f64,
        /// Initial primary and secondary temperature in degF
        #[arg(long, default_value_t = 100.0)]
        start_f: f64,
        /// No-load primary temperature cap in degF
        #[arg(long, default_value_t = 557.0)]
        no_load_f: f64,
        /// Begin secondary draining when the primary crosses this, degF
        #[arg(long)]
        drain_at_f: Option<f64>,
        /// Isolate the secondary when the primary crosses this, degF
        #[arg(long)]
        isolate_at_f: Option<f64>,
        /// Emit one JSON line per tick instead of periodic summaries
        #[arg(long)]
        json: bool,
        /// Seconds of simulated time between diagnostic summaries
        #[arg(long, default_value_t = 1_800.0)]
        report_every: f64,
    },
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Heatup {
            hours,
            dt,
            pumps,
            ramp_f_per_hr,
            start_f,
            no_load_f,
            drain_at_f,
            isolate_at_f,
            json,
            report_every,
        } => cmd_heatup(HeatupArgs {
            hours,
            dt,
            pumps,
            ramp_f_per_hr,
            start_f,
            no_load_f,
            drain_at_f,
            isolate_at_f,
            json,
            report_every,
        }),
    };
    std::process::exit(exit_code);
}

struct HeatupArgs {
    hours: f64,
    dt: f64,
    pumps: u32,
    ramp_f_per_hr: f64,
    start_f: f64,
    no_load_f: f64,
    drain_at_f: Option<f64>,
    isolate_at_f: Option<f64>,
    json: bool,
    report_every: f64,
}

fn cmd_heatup(args: HeatupArgs) -> i32 {
    if args.hours <= 0.0 || args.dt <= 0.0 {
        eprintln!("error: --hours and --dt must be positive");
        return 2;
    }

    let model = match SecondarySide::new(SecondaryConfig::default()) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: configuration rejected: {e}");
            return 2;
        }
    };
    let tables = match CorrelationTables::new() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: property tables: {e}");
            return 2;
        }
    };

    if !args.json {
        println!(
            "sgtherm heatup  {}  start {:.0} F, ramp {:.0} F/hr to {:.0} F, {} pumps, dt {:.0} s",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            args.start_f,
            args.ramp_f_per_hr,
            args.no_load_f,
            args.pumps,
            args.dt
        );
    }

    let mut state = model.init_state(&tables, degf(args.start_f));
    let ticks = (args.hours * 3_600.0 / args.dt).ceil() as u64;
    let mut next_report = 0.0_f64;
    let mut peak_heat_mw = 0.0_f64;
    let mut boiling_onset_s: Option<f64> = None;

    for i in 0..ticks {
        let t_s = i as f64 * args.dt;
        let primary_f = (args.start_f + args.ramp_f_per_hr * t_s / 3_600.0).min(args.no_load_f);

        if let Some(threshold) = args.drain_at_f {
            if primary_f >= threshold {
                model.begin_draining(&mut state, t_s);
            }
        }
        if let Some(threshold) = args.isolate_at_f {
            if primary_f >= threshold && !state.isolated {
                model.set_isolation(&mut state, true);
                if !args.json {
                    println!("-- isolating secondary at primary {primary_f:.0} F --");
                }
            }
        }

        let inputs = TickInputs {
            primary_temp: degf(primary_f),
            pumps_active: args.pumps,
            primary_pressure: psia(400.0),
            sim_time_s: t_s,
        };
        let result = model.update(&tables, &mut state, &inputs, args.dt);

        peak_heat_mw = peak_heat_mw.max(result.heat_total_mw);
        if boiling_onset_s.is_none() && result.regime == Regime::Boiling {
            boiling_onset_s = Some(t_s);
        }

        if args.json {
            match serde_json::to_string(&result) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    eprintln!("error: serializing tick result: {e}");
                    return 1;
                }
            }
        } else if t_s >= next_report {
            println!("t = {:7.0} s ({:5.2} hr)", t_s, t_s / 3_600.0);
            print!("{}", model.diagnostic_summary(&state, degf(primary_f)));
            next_report = t_s + args.report_every;
        }
    }

    if !args.json {
        println!("✓ Heatup run complete ({ticks} ticks)");
        println!("  peak heat removal: {peak_heat_mw:.2} MW");
        match boiling_onset_s {
            Some(t) => println!("  boiling onset: {:.2} hr", t / 3_600.0),
            None => println!("  boiling onset: not reached"),
        }
        println!(
            "  final pressure: {:.1} psia ({:?}), mass {:.0} lbm, vaporized {:.0} lbm",
            state.pressure_psia,
            state.pressure_source,
            state.secondary_mass_lbm,
            state.vaporized_total_lbm
        );
        if state.drain.phase != DrainPhase::Idle {
            println!(
                "  drained: {:.0} lbm ({:?})",
                state.drain.drained_lbm, state.drain.phase
            );
        }
    }
    0
}
