use clap::{Parser, ValueEnum};
use idx_bitmap::IndexBitmap;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Free every index right after allocating it
    Cycle,
    /// Keep allocated indices, freeing a fixed one periodically
    Hold,
}

/// Exercise an index bitmap with allocation/free cycles
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of indices in the bitmap
    #[arg(long, default_value_t = 32)]
    size: usize,
    #[arg(long, value_enum, default_value_t = Mode::Cycle)]
    mode: Mode,
    /// In hold mode, free an index every this many iterations
    #[arg(long, default_value_t = 10)]
    free_every: usize,
    /// In hold mode, the index to free
    #[arg(long, default_value_t = 5)]
    free_index: usize,
    /// Print the bitmap before destroying it
    #[arg(long)]
    dump: bool,
    #[arg(long, default_value_t = LevelFilter::Off)]
    log_level: LevelFilter,
}

fn logger_init(level: LevelFilter) {
    SimpleLogger::new().init().unwrap();
    log::set_max_level(level);
}

fn cycle_test(bitmap: &mut IndexBitmap, rounds: usize) {
    for _ in 0..rounds {
        let Some(bit_id) = bitmap.alloc() else {
            println!("No free bit available.");
            break;
        };
        println!("Allocated bit {}", bit_id);
        bitmap.free(bit_id);
        println!("Freed bit {}", bit_id);
    }
}

fn hold_test(bitmap: &mut IndexBitmap, rounds: usize, free_every: usize, free_index: usize) {
    for i in 0..rounds {
        match bitmap.alloc() {
            Some(bit_id) => println!("Allocated bit {}", bit_id),
            None => println!("No free bit available."),
        }
        if free_every > 0 && i > 0 && i % free_every == 0 {
            bitmap.free(free_index);
            println!("Freed bit {}", free_index);
        }
    }
}

fn main() {
    let args = Args::parse();
    logger_init(args.log_level);

    let mut bitmap = match IndexBitmap::new(args.size) {
        Ok(bitmap) => bitmap,
        Err(e) => {
            eprintln!("Failed to initialize bitmap.");
            info!("{:?}", e);
            std::process::exit(1);
        }
    };

    println!("Allocating and freeing bits...");
    match args.mode {
        Mode::Cycle => cycle_test(&mut bitmap, args.size),
        Mode::Hold => hold_test(&mut bitmap, args.size, args.free_every, args.free_index),
    }

    if args.dump {
        print!("{}", bitmap);
    }
    bitmap.destroy();
}
