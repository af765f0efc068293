// SPDX-FileCopyrightText: 2021 - 2024 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::PathBuf;

use clap::{command, value_parser, Arg, ArgAction, ArgGroup, Command, ValueHint};
use const_format::formatcp;
use url::Url;

use crate::config::{Config, IgnoreList, OntologySource};

pub const A_S_VERSION: char = 'V';
pub const A_L_VERSION: &str = "version";
pub const A_S_QUIET: char = 'q';
pub const A_L_QUIET: &str = "quiet";
pub const A_S_VERBOSE: char = 'v';
pub const A_L_VERBOSE: &str = "verbose";
pub const A_S_FILE_PATH: char = 'f';
pub const A_L_FILE_PATH: &str = "file-path";
pub const A_S_URI_PATH: char = 'u';
pub const A_L_URI_PATH: &str = "uri-path";
pub const A_S_OUTPUT_PATH: char = 'o';
pub const A_L_OUTPUT_PATH: &str = "output-path";
pub const A_S_IGNORE_FILE: char = 'i';
pub const A_L_IGNORE_FILE: &str = "ignorefile";
pub const A_S_ONTOLOGY_SOURCE: char = 's';
pub const A_L_ONTOLOGY_SOURCE: &str = "ontology-source";
pub const A_S_NO_IMPORTS: char = 'n';
pub const A_L_NO_IMPORTS: &str = "no-imports";
pub const A_S_MERGED_OUTPUT: char = 'm';
pub const A_L_MERGED_OUTPUT: &str = "merged-output";

const G_SOURCE: &str = "source";

fn arg_version() -> Arg {
    Arg::new(A_L_VERSION)
        .help(formatcp!(
            "Print version information and exit. \
May be combined with -{A_S_QUIET},--{A_L_QUIET}, \
to really only output the version string."
        ))
        .short(A_S_VERSION)
        .long(A_L_VERSION)
        .action(ArgAction::SetTrue)
}

fn arg_quiet() -> Arg {
    Arg::new(A_L_QUIET)
        .help("Minimize or suppress output to stderr")
        .long_help("Minimize or suppress output to stderr; stdout is never used by this program, with or without this option set.")
        .action(ArgAction::SetTrue)
        .short(A_S_QUIET)
        .long(A_L_QUIET)
        .conflicts_with(A_L_VERBOSE)
}

fn arg_verbose() -> Arg {
    Arg::new(A_L_VERBOSE)
        .help("more verbose output (useful for debugging)")
        .short(A_S_VERBOSE)
        .long(A_L_VERBOSE)
        .action(ArgAction::SetTrue)
}

fn arg_file_path() -> Arg {
    Arg::new(A_L_FILE_PATH)
        .help("The local ontology file to translate")
        .long_help(formatcp!(
            "The local ontology file to translate; \
the RDF format is guessed from the file extension, defaulting to Turtle. \
Conflicts with -{A_S_URI_PATH},--{A_L_URI_PATH}."
        ))
        .short(A_S_FILE_PATH)
        .long(A_L_FILE_PATH)
        .action(ArgAction::Set)
        .value_parser(value_parser!(std::path::PathBuf))
        .value_hint(ValueHint::FilePath)
        .value_name("ONTOLOGY_FILE")
}

fn arg_uri_path() -> Arg {
    Arg::new(A_L_URI_PATH)
        .help("The URI of a remote ontology to translate")
        .long_help(formatcp!(
            "The URI of a remote ontology to translate; \
it is fetched fresh, bypassing caches. \
Conflicts with -{A_S_FILE_PATH},--{A_L_FILE_PATH}."
        ))
        .short(A_S_URI_PATH)
        .long(A_L_URI_PATH)
        .action(ArgAction::Set)
        .value_parser(value_parser!(Url))
        .value_hint(ValueHint::Url)
        .value_name("ONTOLOGY_URI")
}

fn arg_output_path() -> Arg {
    Arg::new(A_L_OUTPUT_PATH)
        .help("The output directory, where the DTDL Interface documents get written to")
        .short(A_S_OUTPUT_PATH)
        .long(A_L_OUTPUT_PATH)
        .action(ArgAction::Set)
        .value_parser(value_parser!(std::path::PathBuf))
        .value_hint(ValueHint::DirPath)
        .value_name("OUT_DIR")
        .required_unless_present(A_L_VERSION)
}

fn arg_ignore_file() -> Arg {
    Arg::new(A_L_IGNORE_FILE)
        .help("A file listing classes not to translate")
        .long_help(
            "A file listing classes not to translate; \
one entry per line, of which only the first ';'-separated field is used. \
Every class whose IRI contains an entry is skipped.",
        )
        .short(A_S_IGNORE_FILE)
        .long(A_L_IGNORE_FILE)
        .action(ArgAction::Set)
        .value_parser(value_parser!(std::path::PathBuf))
        .value_hint(ValueHint::FilePath)
        .value_name("IGNORE_FILE")
}

fn arg_ontology_source() -> Arg {
    Arg::new(A_L_ONTOLOGY_SOURCE)
        .help("Replaces the source part of all generated DTMIs, e.g. 'digitaltwins:myorg'")
        .short(A_S_ONTOLOGY_SOURCE)
        .long(A_L_ONTOLOGY_SOURCE)
        .action(ArgAction::Set)
        .value_hint(ValueHint::Other)
        .value_name("SOURCE")
}

fn arg_no_imports() -> Arg {
    Arg::new(A_L_NO_IMPORTS)
        .help("Do not warn about owl:imports; they are never followed")
        .short(A_S_NO_IMPORTS)
        .long(A_L_NO_IMPORTS)
        .action(ArgAction::SetTrue)
}

fn arg_merged_output() -> Arg {
    Arg::new(A_L_MERGED_OUTPUT)
        .help("Write all Interfaces into a single document (not implemented)")
        .short(A_S_MERGED_OUTPUT)
        .long(A_L_MERGED_OUTPUT)
        .action(ArgAction::SetTrue)
}

#[must_use]
pub fn args_matcher() -> Command {
    command!()
        .about(clap::crate_description!())
        .bin_name(clap::crate_name!())
        .help_expected(true)
        .disable_version_flag(true)
        .arg(arg_version())
        .arg(arg_quiet())
        .arg(arg_verbose())
        .arg(arg_file_path())
        .arg(arg_uri_path())
        .arg(arg_output_path())
        .arg(arg_ignore_file())
        .arg(arg_ontology_source())
        .arg(arg_no_imports())
        .arg(arg_merged_output())
        .group(
            ArgGroup::new(G_SOURCE)
                .args([A_L_FILE_PATH, A_L_URI_PATH])
                .multiple(false)
                .required(false),
        )
}

#[allow(clippy::print_stdout)]
fn print_version_and_exit(quiet: bool) {
    if !quiet {
        print!("{} ", clap::crate_name!());
    }
    println!("{}", crate::VERSION);
    std::process::exit(0);
}

#[derive(Clone, Debug)]
pub struct Args {
    pub quiet: bool,
    pub verbose: bool,
    pub config: Config,
}

/// Parses the command line arguments,
/// including verification.
///
/// # Errors
///
/// - Neither an ontology file nor URI was supplied
/// - The ignore file can not be read
///
/// # Panics
///
/// - The output directory was not supplied
pub fn parse() -> Result<Args, clap::Error> {
    let args = args_matcher().get_matches();

    let quiet = args.get_flag(A_L_QUIET);
    let version = args.get_flag(A_L_VERSION);
    if version {
        print_version_and_exit(quiet);
    }

    let verbose = args.get_flag(A_L_VERBOSE);
    let source = if let Some(file) = args.get_one::<PathBuf>(A_L_FILE_PATH) {
        OntologySource::File(file.clone())
    } else if let Some(uri) = args.get_one::<Url>(A_L_URI_PATH) {
        OntologySource::Uri(uri.clone())
    } else {
        return Err(args_matcher().error(
            clap::error::ErrorKind::MissingRequiredArgument,
            formatcp!("Either --{A_L_FILE_PATH} or --{A_L_URI_PATH} is required"),
        ));
    };
    let out_dir = args
        .get_one::<PathBuf>(A_L_OUTPUT_PATH)
        .cloned()
        .expect("The output directory is required");
    let ignore = match args.get_one::<PathBuf>(A_L_IGNORE_FILE) {
        Some(path) => IgnoreList::from_file(path).map_err(|err| {
            args_matcher().error(
                clap::error::ErrorKind::Io,
                format!("Failed to read ignore file '{}': {err}", path.display()),
            )
        })?,
        None => IgnoreList::default(),
    };

    let mut config = Config::new(source, out_dir);
    config.ignore = ignore;
    config.ontology_source = args.get_one::<String>(A_L_ONTOLOGY_SOURCE).cloned();
    config.no_imports = args.get_flag(A_L_NO_IMPORTS);
    config.merged_output = args.get_flag(A_L_MERGED_OUTPUT);

    Ok(Args {
        quiet,
        verbose,
        config,
    })
}
