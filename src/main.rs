use convert_mipl_mesh::config::{parse_config, ConfigError};
use log::{error, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};
use std::{error::Error as _, process};

fn main() {
    let opt = match parse_config(std::env::args_os()) {
        Ok(opt) => opt,
        // prints usage or help, exits 1 or 0 respectively
        Err(ConfigError::Clap(err)) => err.exit(),
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        },
    };

    let level = if opt.debug { LevelFilter::Debug } else { LevelFilter::Info };
    let logging = match TermLogger::init(level, Config::default(), TerminalMode::Mixed) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("Couldn't set up logging: {}", err);
            false
        },
    };

    if let Err(err) = convert_mipl_mesh::run(&opt) {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(&format!(": {}", cause));
            source = cause.source();
        }
        if logging {
            error!("{}", message);
        } else {
            eprintln!("error: {}", message);
        }
        process::exit(err.exit_code());
    }
}
