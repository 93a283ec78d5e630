//! Argument definitions

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

/// Build the `cckit` command
#[must_use]
pub fn build_cli() -> Command {
    Command::new("cckit")
        .version(crate::VERSION)
        .about("Cocos Creator project toolkit")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log progress to stderr (-v info, -vv debug)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("root-type")
                .long("root-type")
                .global(true)
                .help("Type tag of the node tree root [default: cc.Node]"),
        )
        .arg(
            Arg::new("sequential")
                .long("sequential")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Decode documents on a single thread"),
        )
        .subcommand(
            Command::new("findref")
                .about("Find references of the given resources in prefab documents")
                .arg(
                    Arg::new("resources")
                        .required(true)
                        .num_args(1..)
                        .value_name("RESOURCE")
                        .help("Resource or .meta files to search for"),
                )
                .arg(
                    Arg::new("scope")
                        .short('s')
                        .long("scope")
                        .action(ArgAction::Append)
                        .default_value(".")
                        .help("File, directory or glob to search"),
                )
                .arg(
                    Arg::new("exclude")
                        .long("exclude")
                        .action(ArgAction::Append)
                        .help("Glob of paths to skip inside directory scopes"),
                )
                .arg(
                    Arg::new("keep-going")
                        .long("keep-going")
                        .action(ArgAction::SetTrue)
                        .help("Skip documents that fail to decode instead of stopping"),
                ),
        )
        .subcommand(
            Command::new("lsnode")
                .about("List root-to-leaf node paths of prefab documents")
                .arg(
                    Arg::new("files")
                        .required(true)
                        .num_args(1..)
                        .value_name("FILE")
                        .help("Prefab documents to list"),
                )
                .arg(
                    Arg::new("cut-head")
                        .long("cut-head")
                        .alias("cuthead")
                        .default_value("1")
                        .value_parser(value_parser!(usize))
                        .help("Remove N levels from the root"),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn findref_defaults_to_current_directory() {
        let matches = build_cli()
            .try_get_matches_from(["cckit", "findref", "hero.png"])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "findref");
        let scopes: Vec<_> = args.get_many::<String>("scope").unwrap().collect();
        assert_eq!(scopes, vec!["."]);
        assert!(!args.get_flag("keep-going"));
    }

    #[test]
    fn scopes_accumulate() {
        let matches = build_cli()
            .try_get_matches_from(["cckit", "findref", "a.png", "b.png", "-s", "x", "--scope", "y"])
            .unwrap();
        let args = matches.subcommand_matches("findref").unwrap();
        assert_eq!(args.get_many::<String>("resources").unwrap().count(), 2);
        let scopes: Vec<_> = args.get_many::<String>("scope").unwrap().collect();
        assert_eq!(scopes, vec!["x", "y"]);
    }

    #[test]
    fn cut_head_defaults_to_one() {
        let matches = build_cli()
            .try_get_matches_from(["cckit", "lsnode", "a.prefab"])
            .unwrap();
        let args = matches.subcommand_matches("lsnode").unwrap();
        assert_eq!(args.get_one::<usize>("cut-head"), Some(&1));

        let matches = build_cli()
            .try_get_matches_from(["cckit", "lsnode", "a.prefab", "--cuthead", "0"])
            .unwrap();
        let args = matches.subcommand_matches("lsnode").unwrap();
        assert_eq!(args.get_one::<usize>("cut-head"), Some(&0));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(["cckit", "lsnode", "a.prefab", "-vv", "--sequential"])
            .unwrap();
        assert_eq!(matches.get_count("verbose"), 2);
        assert!(matches.get_flag("sequential"));
    }

    #[test]
    fn resources_are_required() {
        assert!(build_cli().try_get_matches_from(["cckit", "findref"]).is_err());
        assert!(build_cli().try_get_matches_from(["cckit", "lsnode"]).is_err());
    }
}
