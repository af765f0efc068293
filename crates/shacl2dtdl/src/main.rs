// SPDX-FileCopyrightText: 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

#![allow(unused_crate_dependencies)]

use cli_utils::logging;
use cli_utils::BoxResult;
use shacl2dtdl::cli;
use tracing::metadata::LevelFilter;

fn main() -> BoxResult<()> {
    let log_reload_handle = logging::setup(clap::crate_name!())?;

    let cli_args = cli::parse().unwrap_or_else(|err| err.exit());

    let log_level = if cli_args.verbose {
        LevelFilter::DEBUG
    } else if cli_args.quiet {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    };
    logging::set_log_level_tracing(&log_reload_handle, log_level)?;

    let report = shacl2dtdl::generate(&cli_args.config)?;
    for skipped in &report.skipped {
        tracing::warn!("Skipped '{}': {}", skipped.shape, skipped.reason);
    }

    Ok(())
}
