use microevent::*;

fn main() -> Result<()> {
    let events: MicroEvent = MicroEvent::new();

    // Handlers get the emitter itself and the emitted arguments
    let greet = Handler::new(|_: &MicroEvent, args: &Args| {
        let name = args.first().and_then(Value::as_str).unwrap_or("stranger");
        println!("Hello, {name}!");
        Ok(())
    });

    events.on("hello", greet.clone());
    events.trigger("hello", args!["World"])?;

    // Once removed, the handler is no longer called
    events.off("hello", &greet);
    events.trigger("hello", args!["nobody"])?;
    Ok(())
}
