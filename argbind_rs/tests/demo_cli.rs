//! End-to-end tests for the argbind-demo binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn demo() -> Command {
    cargo_bin_cmd!("argbind-demo")
}

mod help_screen {
    use super::*;

    #[test]
    fn shows_help() {
        demo()
            .arg("-help")
            .assert()
            .success()
            .stdout(predicate::str::contains("-execute"))
            .stdout(predicate::str::contains("Shows this help screen"))
            .stdout(predicate::str::contains("The path of the file to execute"));
    }

    #[test]
    fn help_alias_works() {
        demo()
            .arg("-?")
            .assert()
            .success()
            .stdout(predicate::str::contains("Shows this help screen"));
    }

    #[test]
    fn localized_descriptions_win_over_fallbacks() {
        demo()
            .arg("-help")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Waits for enter before the process exits",
            ));
    }
}

mod commands {
    use super::*;

    #[test]
    fn executes_the_named_command() {
        demo()
            .args(["execute", "-path=some.txt"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Executing 'some.txt'"));
    }

    #[test]
    fn command_alias_works_and_quotes_are_trimmed() {
        demo()
            .args(["e", "-path=\"some file.txt\""])
            .assert()
            .success()
            .stdout(predicate::str::contains("Executing 'some file.txt'"));
    }

    #[test]
    fn silent_flag_suppresses_the_banner() {
        demo()
            .args(["execute", "-path=some.txt", "-silent"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Executing").not());
    }

    #[test]
    fn arguments_without_a_command_fall_back_to_execute() {
        demo()
            .arg("-path=some.txt")
            .assert()
            .success()
            .stdout(predicate::str::contains("Executing 'some.txt'"));
    }

    #[test]
    fn empty_input_falls_back_to_version() {
        demo()
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn json_flag_reports_the_outcome() {
        demo()
            .args(["version", "-json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"command_executed\": true"));
    }
}

mod failures {
    use super::*;

    #[test]
    fn missing_required_argument_prints_argument_help() {
        demo()
            .arg("execute")
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "The required argument 'path' was not specified.",
            ))
            .stdout(predicate::str::contains("[ARGUMENT HELP]"));
    }

    #[test]
    fn flag_with_value_is_rejected() {
        demo()
            .args(["version", "-json=true"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "The option 'json' was specified with a value. This is not allowed for option.",
            ));
    }

    #[test]
    fn leftover_arguments_warn_with_a_suggestion() {
        demo()
            .args(["version", "-wiat"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Unknown argument 'wiat'"))
            .stderr(predicate::str::contains("did you mean '-wait'?"));
    }
}
