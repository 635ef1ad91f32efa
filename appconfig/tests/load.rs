//! Layered resolution behaviour: source precedence, control capture, the
//! config-file overlay, and the loading façade.

use std::collections::HashMap;
use std::fs;

use appconfig::{
    load_from, AppConfig, ConfigBase, ConfigError, ConfigInfo, Source, Sources, StopCause,
    ValueError, DEFAULT_ORDER,
};
use rstest::rstest;
use tempfile::tempdir;

fn sources(args: &[&str], vars: &[(&str, &str)]) -> Sources {
    Sources::new(
        args.iter().map(|arg| (*arg).to_owned()).collect(),
        vars.iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect::<HashMap<_, _>>(),
    )
}

#[derive(Debug, Default, Clone, PartialEq, AppConfig)]
struct Single {
    #[conf(default = "d", env = "val", flag = "val")]
    value: String,
}

#[derive(Debug, Default, Clone, PartialEq, AppConfig)]
struct SubCfg {
    ratio: f64,
    #[conf(flag = "label")]
    label: String,
}

#[derive(Debug, Default, Clone, PartialEq, AppConfig)]
struct WithBase {
    #[conf(flatten)]
    base: ConfigBase,
    #[conf(default = "1", flag = "value")]
    value: i64,
    #[conf(nested)]
    sub: SubCfg,
}

#[rstest]
#[case(&[], &[], "d")]
#[case(&["--val=f"], &[], "f")]
#[case(&[], &[("T_VAL", "e")], "e")]
#[case(&["--val=f"], &[("T_VAL", "e")], "e")]
#[case(&["--val=f"], &[("T_VAL", "")], "f")]
fn default_order_lets_the_last_present_source_win(
    #[case] args: &[&str],
    #[case] vars: &[(&str, &str)],
    #[case] expected: &str,
) {
    let info = ConfigInfo::<Single>::new("T");
    let mut cfg = Single::default();
    info.load_in_order(&mut cfg, DEFAULT_ORDER, &sources(args, vars))
        .expect("resolution must succeed");
    assert_eq!(cfg.value, expected);
}

#[test]
fn custom_source_order_reverses_precedence() {
    let info = ConfigInfo::<Single>::new("T");
    let mut cfg = Single::default();
    let order = [Source::Env, Source::Flags, Source::Defaults];
    info.load_in_order(&mut cfg, &order, &sources(&["--val=f"], &[("T_VAL", "e")]))
        .expect("resolution must succeed");
    assert_eq!(cfg.value, "d", "defaults come last, so they win");
}

#[test]
fn file_source_inside_an_order_is_inert() {
    let info = ConfigInfo::<Single>::new("T");
    let mut cfg = Single::default();
    info.load_in_order(&mut cfg, &[Source::File], &sources(&[], &[]))
        .expect("resolution must succeed");
    assert_eq!(cfg.value, "");
}

#[test]
fn one_config_info_serves_many_instances() {
    let info = ConfigInfo::<Single>::new("T");
    let mut first = Single::default();
    let mut second = Single::default();
    info.load_in_order(&mut first, DEFAULT_ORDER, &sources(&["--val=x"], &[]))
        .expect("resolution must succeed");
    info.load_in_order(&mut second, DEFAULT_ORDER, &sources(&[], &[("T_VAL", "y")]))
        .expect("resolution must succeed");
    assert_eq!(first.value, "x");
    assert_eq!(second.value, "y");
}

#[test]
fn bare_flag_presence_sets_booleans() {
    #[derive(Debug, Default, AppConfig)]
    struct Toggles {
        #[conf(flag = "enable")]
        enable: bool,
        #[conf(flag = "verbose", default = "true")]
        verbose: bool,
    }

    let info = ConfigInfo::<Toggles>::new("");
    let mut cfg = Toggles::default();
    info.load_in_order(
        &mut cfg,
        DEFAULT_ORDER,
        &sources(&["--enable", "--verbose=off"], &[]),
    )
    .expect("resolution must succeed");
    assert!(cfg.enable);
    assert!(!cfg.verbose, "explicit value overrides the default");
}

#[test]
fn flag_parse_failure_names_parameter_raw_value_and_source() {
    #[derive(Debug, Default, AppConfig)]
    struct Counted {
        #[conf(flag = "count")]
        count: u8,
    }

    let info = ConfigInfo::<Counted>::new("");
    let mut cfg = Counted::default();
    let err = info
        .load_in_order(&mut cfg, DEFAULT_ORDER, &sources(&["--count=300"], &[]))
        .expect_err("300 does not fit a u8");
    match err {
        ConfigError::Parse {
            path, raw, origin, ..
        } => {
            assert_eq!(path, "count");
            assert_eq!(raw, "300");
            assert_eq!(origin, Source::Flags);
        }
        other => panic!("expected a parse error, got {other}"),
    }
    assert_eq!(cfg.count, 0);
}

#[test]
fn bare_flag_on_a_numeric_field_fails_to_parse() {
    #[derive(Debug, Default, AppConfig)]
    struct Counted {
        #[conf(flag = "count")]
        count: u32,
    }

    let info = ConfigInfo::<Counted>::new("");
    let mut cfg = Counted::default();
    let err = info
        .load_in_order(&mut cfg, DEFAULT_ORDER, &sources(&["--count"], &[]))
        .expect_err("presence without a value is an empty string");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn malformed_default_aborts_before_later_parameters() {
    #[derive(Debug, Default, AppConfig)]
    struct TwoDefaults {
        #[conf(default = "abc")]
        first: i64,
        #[conf(default = "5")]
        second: i64,
    }

    let info = ConfigInfo::<TwoDefaults>::new("");
    let mut cfg = TwoDefaults::default();
    let err = info
        .load_in_order(&mut cfg, DEFAULT_ORDER, &sources(&[], &[]))
        .expect_err("abc is not an integer");
    match err {
        ConfigError::Parse { path, origin, .. } => {
            assert_eq!(path, "first");
            assert_eq!(origin, Source::Defaults);
        }
        other => panic!("expected a parse error, got {other}"),
    }
    assert_eq!(cfg.second, 0, "resolution stops at the first failure");
}

#[test]
fn earlier_writes_survive_a_later_failure() {
    #[derive(Debug, Default, AppConfig)]
    struct Pair {
        #[conf(flag = "a")]
        a: String,
        #[conf(flag = "b")]
        b: u8,
    }

    let info = ConfigInfo::<Pair>::new("");
    let mut cfg = Pair::default();
    let err = info
        .load_in_order(&mut cfg, DEFAULT_ORDER, &sources(&["--a=x", "--b=bad"], &[]))
        .expect_err("bad is not a u8");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(cfg.a, "x", "no rollback of already-written fields");
}

#[test]
fn duplicate_control_markers_keep_the_last_field() {
    #[derive(Debug, Default, AppConfig)]
    struct TwoHelps {
        #[conf(flag = "first", show_help)]
        first: bool,
        #[conf(flag = "second", show_help)]
        second: bool,
    }

    let info = ConfigInfo::<TwoHelps>::new("");
    let mut cfg = TwoHelps::default();
    let controls = info
        .load_in_order(&mut cfg, DEFAULT_ORDER, &sources(&["--first"], &[]))
        .expect("resolution must succeed");
    assert!(!controls.help_requested, "the first marker was overridden");

    let controls = info
        .load_in_order(&mut cfg, DEFAULT_ORDER, &sources(&["--second"], &[]))
        .expect("resolution must succeed");
    assert!(controls.help_requested);
}

#[test]
fn control_marker_on_a_mismatched_kind_is_ignored() {
    #[derive(Debug, Default, AppConfig)]
    struct BadMarker {
        #[conf(flag = "cfgish", config_file)]
        cfgish: bool,
    }

    let info = ConfigInfo::<BadMarker>::new("");
    let mut cfg = BadMarker::default();
    let controls = info
        .load(&mut cfg, &sources(&["--cfgish"], &[]))
        .expect("no file overlay is attempted");
    assert!(cfg.cfgish);
    assert!(controls.config_file.is_empty());
}

#[test]
fn help_flag_prints_and_requests_a_stop() {
    let mut cfg = WithBase::default();
    let err = load_from(&mut cfg, "T", &sources(&["--help"], &[]))
        .expect_err("help must stop the load");
    assert!(err.is_stop_request());
    assert_eq!(err.stop_cause(), Some(StopCause::HelpShown));
    assert!(cfg.base.show_help);
    assert_eq!(cfg.value, 1, "defaults are still applied");
}

#[test]
fn example_flag_prints_and_requests_a_stop() {
    let mut cfg = WithBase::default();
    let err = load_from(&mut cfg, "T", &sources(&["--example", "--value=99"], &[]))
        .expect_err("example must stop the load");
    assert_eq!(err.stop_cause(), Some(StopCause::ExampleShown));
    assert_eq!(cfg.value, 99);
}

#[test]
fn help_outranks_example_when_both_fire() {
    let mut cfg = WithBase::default();
    let err = load_from(&mut cfg, "T", &sources(&["--help", "--example"], &[]))
        .expect_err("both controls must stop the load");
    assert_eq!(err.stop_cause(), Some(StopCause::HelpShown));
}

#[test]
fn config_file_overlay_has_the_highest_precedence() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("app.yaml");
    fs::write(&path, "value: 2\nsub:\n  ratio: 100.5\nunknown: 3\n")?;

    let mut cfg = WithBase::default();
    let config_arg = format!("--config={}", path.display());
    load_from(
        &mut cfg,
        "T",
        &sources(&[config_arg.as_str(), "--value=1"], &[]),
    )?;

    assert_eq!(cfg.value, 2, "the file overrides the flag");
    assert!((cfg.sub.ratio - 100.5).abs() < f64::EPSILON);
    assert_eq!(cfg.sub.label, "", "keys absent from the file stay untouched");
    assert_eq!(cfg.base.config_file, path.display().to_string());
    Ok(())
}

#[test]
fn overlay_ignores_control_fields_marked_skip_file() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("app.yaml");
    fs::write(&path, "base:\n  show_help: true\nvalue: 7\n")?;

    let mut cfg = WithBase::default();
    let config_arg = format!("--config={}", path.display());
    load_from(&mut cfg, "T", &sources(&[config_arg.as_str()], &[]))?;
    assert!(!cfg.base.show_help, "skip_file keeps controls out of reach");
    assert_eq!(cfg.value, 7);
    Ok(())
}

#[test]
fn missing_config_file_is_a_read_error() {
    let mut cfg = WithBase::default();
    let err = load_from(
        &mut cfg,
        "T",
        &sources(&["--config=definitely_not_here.yaml"], &[]),
    )
    .expect_err("the file does not exist");
    assert!(matches!(err, ConfigError::FileRead { .. }));
}

#[test]
fn malformed_config_file_is_a_format_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "value: [\n").expect("write bad.yaml");

    let mut cfg = WithBase::default();
    let config_arg = format!("--config={}", path.display());
    let err = load_from(&mut cfg, "T", &sources(&[config_arg.as_str()], &[]))
        .expect_err("unparseable yaml");
    assert!(matches!(err, ConfigError::FileFormat { .. }));
}

#[test]
fn non_scalar_file_value_for_a_leaf_is_a_parse_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("shape.yaml");
    fs::write(&path, "value: [1, 2]\n").expect("write config");

    let mut cfg = WithBase::default();
    let config_arg = format!("--config={}", path.display());
    let err = load_from(&mut cfg, "T", &sources(&[config_arg.as_str()], &[]))
        .expect_err("a sequence cannot fill an i64");
    match err {
        ConfigError::Parse {
            path: param_path,
            origin,
            reason,
            ..
        } => {
            assert_eq!(param_path, "value");
            assert_eq!(origin, Source::File);
            assert!(matches!(reason, ValueError::NotScalar));
        }
        other => panic!("expected a parse error, got {other}"),
    }
}

#[test]
fn example_round_trips_through_the_file_overlay() -> anyhow::Result<()> {
    let info = ConfigInfo::<WithBase>::new("T");
    let mut cfg = WithBase::default();
    info.load_in_order(
        &mut cfg,
        DEFAULT_ORDER,
        &sources(&["--sub-label=hello", "--sub-ratio=2.5"], &[]),
    )?;

    let example = info.render_example(&cfg)?;
    assert!(
        !example.contains("show_help"),
        "control fields stay out of the document"
    );
    assert!(example.contains("label: hello"));

    let dir = tempdir()?;
    let path = dir.path().join("example.yaml");
    fs::write(&path, &example)?;

    let mut reloaded = WithBase::default();
    info.try_load_config_file(&mut reloaded, &path.display().to_string())?;
    assert_eq!(reloaded, cfg);
    Ok(())
}
