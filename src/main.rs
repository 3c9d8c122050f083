// =============================================================================
// SHADER DUMP - Embed compiled SPIR-V into a C translation unit
// =============================================================================
//
// Build-time helper. Reads a compiled shader and writes a C file with the
// bytes as a static array plus its size, so the native side can do:
//
//   extern const uint8_t spirv_random_roll_data[];
//   extern const uint32_t spirv_random_roll_size;
//
// FLOW:
// 1. Parse --input / --output / --var_name (usage error -> exit 2)
// 2. Load the optional --config file, start logging
// 3. Check the input exists (missing -> exit -1, nothing written)
// 4. Read, render, write once
//
// =============================================================================

mod cli;
mod config;
mod dump;

use cli::{Command, USAGE};
use config::Config;
use dump::InputNotFound;

/// Exit status when the input file is missing
const EXIT_INPUT_NOT_FOUND: i32 = -1;
/// Exit status for bad command lines
const EXIT_USAGE: i32 = 2;
/// Exit status for any other failure
const EXIT_FAILURE: i32 = 1;

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() {
    let args = match Command::parse() {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return;
        }
        Err(e) => {
            eprintln!("{}", USAGE);
            eprintln!("shader-dump: error: {}", e);
            std::process::exit(EXIT_USAGE);
        }
    };

    let (config, notes) = Config::load(args.config.as_deref());
    init_logging(&config);
    for (level, note) in &notes {
        log::log!(*level, "{}", note);
    }

    if !dump::is_c_identifier(&args.var_name) {
        log::warn!(
            "var_name '{}' is not a valid C identifier, generated code will not compile",
            args.var_name
        );
    }

    log::info!("Dumping {:?} -> {:?} as '{}'", args.input, args.output, args.var_name);

    match dump::dump_file(&args.input, &args.output, &args.var_name) {
        Ok(stats) => {
            log::info!(
                "Wrote {} bytes ({} rows) to {:?}",
                stats.bytes,
                stats.rows,
                args.output
            );
        }
        Err(e) => {
            if let Some(missing) = e.downcast_ref::<InputNotFound>() {
                eprintln!("{}", missing);
                std::process::exit(EXIT_INPUT_NOT_FOUND);
            }
            log::error!("{:#}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}

/// Initialize logging. RUST_LOG overrides the configured level.
fn init_logging(config: &Config) {
    use env_logger::{Builder, Env};

    let level = config.level_filter();

    let mut builder = Builder::new();
    builder.filter_level(level.unwrap_or(log::LevelFilter::Info));
    builder.parse_env(Env::default());
    builder.init();

    if level.is_none() {
        log::warn!("Unknown log level '{}', defaulting to info", config.log.level);
    }
}
