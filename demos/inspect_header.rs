// demos/inspect_header.rs
use intan_selector::{read_header, RhdStream, SignalStream};
use std::env;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <path_to_rhd_file>", args[0]);
        std::process::exit(1);
    }

    let path = &args[1];
    let header = read_header(path)?;

    println!("File version: {}", header.version);
    println!("Sample rate: {} Hz", header.sample_rate);
    println!("Duration: {:.3} seconds", header.duration());

    for note in [&header.notes.note1, &header.notes.note2, &header.notes.note3] {
        if !note.is_empty() {
            println!("Note: {}", note);
        }
    }

    for stream in SignalStream::ALL {
        let channels = stream.channels(&header);
        println!("{}: {} channel{}", stream, channels.len(), if channels.len() != 1 { "s" } else { "" });
        for (i, channel) in channels.iter().enumerate().take(5) {
            println!(
                "  {}: {} ({})",
                i, channel.custom_channel_name, channel.native_channel_name
            );
        }
        if channels.len() > 5 {
            println!("  ... and {} more", channels.len() - 5);
        }
    }

    if header.data_present() && !header.amplifier_channels.is_empty() {
        let mut stream = RhdStream::open(path, SignalStream::Amplifier.name())?;
        let gaps = stream.timestamp_gaps()?;
        println!("\nTimestamp gaps: {}", gaps);
    }

    Ok(())
}
