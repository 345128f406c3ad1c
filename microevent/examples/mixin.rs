//! Granting the emitter capability to a type and to a single value.
//!
//! The emitter's own trace records are printed alongside the output.

use std::sync::Mutex;

use microevent::*;

// Every Thermostat gets on / off / trigger
#[derive(Default, Emittable)]
struct Thermostat {
    target: Mutex<f64>,
    #[emitter]
    events: Emitter<Thermostat, f64, Reading>,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Label)]
enum Reading {
    Temperature,
    Humidity,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let thermostat = Thermostat::default();
    *thermostat.target.lock().unwrap_or_else(|e| e.into_inner()) = 21.0;

    thermostat.on(
        Reading::Temperature,
        Handler::new(|t: &Thermostat, celsius: &f64| {
            let target = *t.target.lock().unwrap_or_else(|e| e.into_inner());
            if *celsius < target {
                println!("{celsius:.1}°C is below {target:.1}°C, heating");
            }
            Ok(())
        }),
    );
    thermostat.on(
        Reading::Humidity,
        Handler::new(|_: &Thermostat, percent: &f64| {
            println!("humidity at {percent:.0}%");
            Ok(())
        }),
    );

    thermostat.trigger(Reading::Temperature, 18.5)?;
    thermostat.trigger(Reading::Humidity, 40.0)?;

    // Only this one value gains the capability
    let log = grant(Vec::<String>::new());
    log.on(
        "line",
        Handler::new(|log: &Granted<Vec<String>>, args: &Args| {
            println!("{} line(s) buffered, got {:?}", log.len(), args);
            Ok(())
        }),
    );
    log.trigger("line", args!["boot", 1])?;
    Ok(())
}
