use clap::Parser;

use busticket::cli::Args;
use busticket::schema::BUS_COLORS;
use busticket::{init_tracing, run};

fn show_colors() {
    for (i, color) in BUS_COLORS.iter().enumerate() {
        println!("{}: {}", i + 1, color);
    }
}

fn main() {
    let args = Args::parse();

    if args.list_colors {
        show_colors();
        return;
    }

    init_tracing();

    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
