use std::env;
use std::process::ExitCode;

use scel2pyim::builder::{BuilderConfig, PyimBuilder};
use scel2pyim::utils::is_directory;

fn usage(program: &str) -> ExitCode {
    eprintln!("Usage : {} /path/to/ /path/to/NAME.pyim [--config <config.json>]", program);
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("scel2pyim");

    let mut positional = Vec::new();
    let mut config_path = None;
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            match iter.next() {
                Some(path) => config_path = Some(path.clone()),
                None => {
                    eprintln!("ERROR: --config flag requires an argument.");
                    return usage(program);
                }
            }
        } else {
            positional.push(arg.clone());
        }
    }
    if positional.len() != 2 {
        return usage(program);
    }

    let mut config = match config_path {
        Some(path) => match BuilderConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Could not load config \"{}\": {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => BuilderConfig::default(),
    };
    config.input_path = positional[0].clone();
    config.output_file = positional[1].clone();

    if !is_directory(&config.input_path) {
        eprintln!("{} is not a directory!", config.input_path);
        return ExitCode::FAILURE;
    }

    match PyimBuilder::build_with_config(&config, None) {
        Ok(report) => {
            println!(
                "{} files converted, {} truncated, {} skipped; {} lines written to {}",
                report.files_converted,
                report.files_truncated,
                report.files_skipped,
                report.merge.lines_written,
                report.output_file.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Conversion failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
