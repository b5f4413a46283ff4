use std::io::{self, Write};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use logger::Logger;
use simulator::types::catalog::Catalog;
use simulator::types::config::SimConfig;
use simulator::types::flight::Flight;
use simulator::types::flight_phase::FlightPhase;
use simulator::types::map_bounds::MapBounds;
use simulator::types::marker_cache::MarkerCache;
use simulator::types::sim_error::SimError;
use simulator::types::simulation::Simulation;

const DISPLAY_REFRESH_MILLIS: u64 = 2000;

fn clean_scr() {
    print!("\x1B[2J\x1B[1;1H");
    io::stdout().flush().ok();
}

fn prompt_input(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Failed to read input");
    input.trim().to_string()
}

fn main() -> Result<(), SimError> {
    let logger = Logger::new(Path::new("logs"), "simulator")
        .map_err(|e| SimError::LoggerError(e.to_string()))?;

    let catalog = Arc::new(Catalog::builtin());
    let sim = Simulation::new(Arc::clone(&catalog), SimConfig::default(), logger)?;
    sim.start()?;

    loop {
        println!("Enter command (type '-h' or '--help' for options): ");
        let mut command = String::new();
        io::stdin()
            .read_line(&mut command)
            .expect("Failed to read input");

        let args: Vec<&str> = command.split_whitespace().collect();
        if args.is_empty() {
            continue;
        }

        match args[0] {
            "list-flights" => {
                display_flights(&sim);
            }

            "list-airports" => {
                list_airports(&catalog);
            }

            "select" => {
                if args.len() < 2 {
                    println!("Usage: select <CALLSIGN>");
                    continue;
                }
                match sim.select(args[1]) {
                    Ok(()) => println!("Tracking {}", args[1]),
                    Err(e) => println!("{}", e),
                }
            }

            "deselect" => {
                if sim.deselect().is_ok() {
                    println!("Selection cleared");
                }
            }

            "trail" => {
                if show_trail(&sim).is_err() {
                    println!("{}", SimError::InvalidInput);
                }
            }

            "viewport" => {
                clean_scr();
                if set_viewport(&sim).is_err() {
                    println!("{}", SimError::InvalidInput);
                }
            }

            "clear-viewport" => {
                if sim.set_viewport(None).is_ok() {
                    println!("Viewport cleared");
                }
            }

            "background" => {
                if sim.set_background(true).is_ok() {
                    println!("Refresh cadences slowed to background rates");
                }
            }

            "foreground" => {
                if sim.set_background(false).is_ok() {
                    println!("Refresh cadences restored to foreground rates");
                }
            }

            "pause" => {
                sim.pause();
                println!("Simulation paused");
            }

            "resume" => {
                sim.resume();
                println!("Simulation resumed");
            }

            "-h" | "--help" | "help" => print_help(),

            "exit" => break,

            _ => eprintln!("Invalid command. Use -h for help."),
        }
    }

    sim.stop();
    Ok(())
}

/// Live table of the pool, refreshed until the user presses Enter.
fn display_flights(sim: &Simulation) {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let mut buffer = String::new();
        if io::stdin().read_line(&mut buffer).is_ok() {
            tx.send(()).ok();
        }
    });

    let mut markers: MarkerCache<String> = MarkerCache::new();

    loop {
        let (flights, selected) = match (sim.snapshot(), sim.selected()) {
            (Ok(flights), Ok(selected)) => (flights, selected),
            _ => {
                eprintln!("Failed to read flights. Skipping this refresh.");
                (Vec::new(), None)
            }
        };

        clean_scr();
        println!(
            "\n{:<9} {:<5} {:<20} {:<12} {:<8} {:>6} {:>8} {:>6} {:>10} {:>10}",
            "Callsign", "Dir", "Aircraft", "Route", "Phase", "Prog", "Alt", "Speed", "Latitude",
            "Longitude"
        );
        for flight in &flights {
            let is_selected = selected.as_deref() == Some(flight.callsign.as_str());
            let glyph = markers
                .get_or_insert_with(flight.track, is_selected, heading_glyph)
                .clone();
            println!(
                "{:<9} {:<5} {:<20} {:<12} {:<8} {:>5.0}% {:>8} {:>6} {:>10.4} {:>10.4}",
                flight.callsign,
                glyph,
                flight.aircraft_model,
                route_label(flight),
                FlightPhase::from_progress(flight.progress).as_str(),
                flight.progress * 100.0,
                flight.altitude_ft,
                flight.ground_speed_kts,
                flight.latitude,
                flight.longitude
            );
        }
        println!("\nPress Enter to exit list-flights mode");

        if rx.try_recv().is_ok() {
            break;
        }

        thread::sleep(Duration::from_millis(DISPLAY_REFRESH_MILLIS));
    }
}

fn route_label(flight: &Flight) -> String {
    let dest = flight.destination.iata_code.as_deref().unwrap_or("---");
    format!("{} -> {}", flight.origin.iata_code, dest)
}

/// Console marker: an eight-way arrow for the heading bucket, bracketed for
/// the selected flight.
fn heading_glyph(bucket: i32, selected: bool) -> String {
    const ARROWS: [char; 8] = ['↑', '↗', '→', '↘', '↓', '↙', '←', '↖'];
    let idx = ((bucket as f64 / 45.0).round() as usize) % 8;
    if selected {
        format!("[{}]", ARROWS[idx])
    } else {
        format!(" {} ", ARROWS[idx])
    }
}

fn list_airports(catalog: &Catalog) {
    println!("\n{:<10} {:<26} {:<8} {:>9} {:>10}", "IATA Code", "Airport Name", "Country", "Latitude", "Longitude");
    for airport in &catalog.airports {
        println!(
            "{:<10} {:<26} {:<8} {:>9.3} {:>10.3}",
            airport.iata_code, airport.name, airport.country, airport.latitude, airport.longitude
        );
    }
}

fn show_trail(sim: &Simulation) -> Result<(), SimError> {
    let Some(callsign) = sim.selected()? else {
        println!("No flight selected.");
        return Ok(());
    };
    let trail = sim.trail()?;
    if trail.is_empty() {
        println!("No trail recorded yet for {}.", callsign);
        return Ok(());
    }
    println!("Trail for {} ({} positions, oldest first):", callsign, trail.len());
    for (lat, lon) in trail {
        println!("  {:>10.4}, {:>10.4}", lat, lon);
    }
    Ok(())
}

fn set_viewport(sim: &Simulation) -> Result<(), SimError> {
    let min_lat: f64 = prompt_input("Enter the minimum latitude: ")
        .parse()
        .map_err(|_| SimError::InvalidInput)?;
    let max_lat: f64 = prompt_input("Enter the maximum latitude: ")
        .parse()
        .map_err(|_| SimError::InvalidInput)?;
    let min_lon: f64 = prompt_input("Enter the minimum longitude: ")
        .parse()
        .map_err(|_| SimError::InvalidInput)?;
    let max_lon: f64 = prompt_input("Enter the maximum longitude: ")
        .parse()
        .map_err(|_| SimError::InvalidInput)?;

    if min_lat > max_lat || min_lon > max_lon {
        return Err(SimError::InvalidInput);
    }

    sim.set_viewport(Some(MapBounds::new(min_lat, max_lat, min_lon, max_lon)))?;
    println!("Viewport set");
    Ok(())
}

fn print_help() {
    clean_scr();
    println!("Available commands:");
    println!("  list-flights");
    println!("    Show the live flight pool, refreshing until Enter is pressed.");
    println!("  list-airports");
    println!("    Show the airport catalog.");
    println!("  select <CALLSIGN>");
    println!("    Track a flight at the fastest cadence and record its trail.");
    println!("  deselect");
    println!("    Stop tracking the selected flight.");
    println!("  trail");
    println!("    Print the recorded trail of the selected flight.");
    println!("  viewport");
    println!("    Set the visible map bounds used for refresh culling.");
    println!("  clear-viewport");
    println!("    Forget the map bounds (in-view refreshes become no-ops).");
    println!("  background / foreground");
    println!("    Switch the refresh cadences between hidden and visible rates.");
    println!("  pause / resume");
    println!("    Pause or resume all refresh timers.");
    println!("  exit");
    println!("    Closes this application.");
}
