use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use threadpool::ThreadPool;

use chart_server::{load_route, BroadcastServer, ServerError, DEFAULT_PORT};
use geodesy::{to_lat_string, to_lon_string};
use logger::{Color, Logger};
use vessel_sim::{NavSink, SimConfig, Simulator, Timer};

fn print_help() {
    println!("Available commands:");
    println!("  status          Show the current vessel state");
    println!("  pause           Pause the simulation");
    println!("  resume          Resume the simulation");
    println!("  set-rate <ms>   Change the tick interval in milliseconds");
    println!("  close           Stop the simulation and exit");
}

fn show_status(sim: &Simulator, server: &BroadcastServer) -> Result<(), ServerError> {
    let state = sim.state()?;
    println!(
        "Position:  {} {}",
        to_lat_string(state.position.lat),
        to_lon_string(state.position.lon)
    );
    println!("COG/HDG:   {:.1}°", state.course_over_ground);
    println!("Speed:     {:.2} m/s", state.speed_mps);
    println!(
        "Waypoint:  {} ({}), steering to {}",
        state.active_waypoint,
        state.direction.as_str(),
        state.target_index()
    );
    println!("Clients:   {}", server.subscriber_count());
    Ok(())
}

fn route_file(args: &[String]) -> PathBuf {
    if let Some(path) = args.get(2) {
        return PathBuf::from(path);
    }
    let project_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    Path::new(&project_dir).join("routes").join("patrol.csv")
}

fn main() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();
    let port: u16 = match args.get(1) {
        Some(arg) => arg
            .parse()
            .map_err(|_| ServerError::InvalidArgument(format!("invalid port '{}'", arg)))?,
        None => DEFAULT_PORT,
    };

    let logger = Logger::new(Path::new("logs"), port)?;
    let route = load_route(&route_file(&args))?;
    logger.info(
        &format!("Loaded patrol route with {} waypoints", route.len()),
        Color::Green,
        true,
    )?;

    let pool = Arc::new(ThreadPool::new(4));
    let server = Arc::new(BroadcastServer::new(logger.clone())?);
    server.start(port, Arc::clone(&pool))?;

    let config = SimConfig::default();
    let timer = Timer::new(config.tick_interval_ms);
    let sink: Arc<dyn NavSink> = server.clone();
    let sim = Arc::new(Simulator::new(route, config, sink)?);

    {
        let sim = Arc::clone(&sim);
        let logger = logger.clone();
        Arc::clone(&timer).start(move |_tick_count| {
            if let Err(e) = sim.tick() {
                logger.error(&format!("Tick failed: {}", e), true).ok();
            }
        })?;
    }

    loop {
        println!("Enter command (type '-h' or '--help' for options): ");
        let mut command = String::new();
        io::stdin().read_line(&mut command)?;
        io::stdout().flush()?;

        let args: Vec<&str> = command.split_whitespace().collect();
        if args.is_empty() {
            continue;
        }

        match args[0] {
            "status" => {
                if let Err(e) = show_status(&sim, &server) {
                    println!("{}", e);
                }
            }

            "pause" => {
                timer.pause();
                logger.info("Simulation paused", Color::Yellow, true).ok();
            }

            "resume" => {
                timer.resume();
                logger.info("Simulation resumed", Color::Green, true).ok();
            }

            "set-rate" => match args.get(1).and_then(|ms| ms.parse().ok()) {
                Some(ms) => {
                    if let Err(e) = timer.set_interval(ms) {
                        println!("{}", e);
                    }
                }
                None => println!("Usage: set-rate <milliseconds>"),
            },

            "close" => {
                timer.stop();
                logger.info("Shutting down", Color::Red, true).ok();
                break;
            }

            "-h" | "--help" => print_help(),

            other => {
                println!("Unknown command '{}'. Type '-h' for options.", other);
            }
        }
    }

    Ok(())
}
