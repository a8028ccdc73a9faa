// demos/select_window.rs
use intan_selector::{Catalog, IntanLoader, SampleStream, SelectorConfig, SignalSelector};
use std::env;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!(
            "Usage: {} <rhd_directory> <t1> <t2> [stream_name] [config.toml]",
            args[0]
        );
        std::process::exit(1);
    }

    let directory = &args[1];
    let t1: f64 = args[2].parse()?;
    let t2: f64 = args[3].parse()?;
    let stream_name = args
        .get(4)
        .map(String::as_str)
        .unwrap_or("RHD2000 amplifier channel");
    let config = match args.get(5) {
        Some(path) => SelectorConfig::load(path)?,
        None => SelectorConfig::default(),
    };

    let catalog = Catalog::build_with(directory, &config)?;
    println!("Catalog of {}: {} files", directory, catalog.len());
    for segment in &catalog {
        println!(
            "  {:<12} [{}, {}]  {}",
            segment.prefix,
            segment.start_time,
            segment.end_time,
            segment.path.display()
        );
    }
    for skipped in catalog.skipped() {
        println!("  skipped {}: {}", skipped.path.display(), skipped.reason);
    }

    let selector = SignalSelector::with_loader(catalog, IntanLoader, config);
    let mut recording = match selector.choose_and_concat(t1, t2, stream_name) {
        Ok(recording) => recording,
        Err(e) => {
            eprintln!("\n✗ Selection failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n✓ Window [{}, {}] of '{}'", t1, t2, stream_name);
    for segment in recording.timeline().segments() {
        println!(
            "  frames {:>10}..{:<10} from {}",
            segment.offset,
            segment.end(),
            segment.file.path.display()
        );
    }
    let (start, end) = recording.frame_range();
    println!("  Window frames: {}..{}", start, end);
    println!("  Sample rate: {} Hz", recording.sample_rate());
    println!("  Channels: {}", recording.num_channels());
    println!("  Duration: {:.3} seconds", recording.duration());

    let preview = recording.num_samples().min(5);
    if preview > 0 && recording.num_channels() > 0 {
        let data = recording.read(0, preview)?;
        println!("\n  First channel ({}), first {} samples:", recording.channel_ids()[0], preview);
        for (i, value) in data.row(0).iter().enumerate() {
            println!("    {}: {:.3}", i, value);
        }
    }

    Ok(())
}
