// tests/kitchen.rs

//! End-to-end cook tests: resolve, build, install and stage with fake tools.

mod common;

use common::{
    ADDONS, FakeRunner, FixedLocator, MissingLocator, fail, file_names, setup_source_tree,
    simulate_build,
};
use cppcheck_formula::Error;
use cppcheck_formula::recipe::{Kitchen, KitchenConfig, OptionSet};
use std::path::PathBuf;
use std::sync::Arc;

fn kitchen(runner: Arc<FakeRunner>) -> Kitchen {
    let config = KitchenConfig {
        jobs: 2,
        ..Default::default()
    };
    let mut kitchen = Kitchen::with_runner(config, runner);
    kitchen.set_locator(Arc::new(FixedLocator {
        root: PathBuf::from("/usr/local/opt"),
    }));
    kitchen
}

#[test]
fn test_default_cook() {
    let (_temp, source, layout) = setup_source_tree();
    let runner = FakeRunner::new(simulate_build);

    let result = kitchen(runner.clone())
        .cook(&OptionSet::default(), &layout, &source)
        .unwrap();

    let prefix = layout.prefix.display().to_string();
    assert_eq!(
        runner.command_lines(),
        vec![
            format!("make HAVE_RULES=yes CFGDIR={prefix}/cfg"),
            format!("make DESTDIR={prefix} BIN={prefix}/bin CFGDIR=/cfg install"),
        ]
    );

    let calls = runner.calls();
    assert_eq!(calls[0].current_dir.as_deref(), Some(source.as_path()));
    assert!(calls[0].env.contains(&("MAKEFLAGS".to_string(), "-j2".to_string())));
    assert!(
        calls[0]
            .env
            .contains(&("CXX".to_string(), "/usr/local/opt/cxx11 -std=c++11".to_string()))
    );

    // Addons moved out of bin/
    assert_eq!(file_names(&layout.addons_dir()), ADDONS.to_vec());
    assert_eq!(file_names(&layout.bin_dir), vec!["cppcheck"]);
    assert!(layout.build_config_dir().join("std.cfg").is_file());

    assert_eq!(result.staged.addons.len(), ADDONS.len());
    assert!(result.staged.gui_bundle.is_none());
    assert_eq!(result.steps.len(), 2);
    assert!(result.log.contains("=== primary-build ==="));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_cook_without_rules() {
    let (_temp, source, layout) = setup_source_tree();
    let runner = FakeRunner::new(simulate_build);
    let options = OptionSet::from_flags(["no-rules"]).unwrap();

    let result = kitchen(runner.clone()).cook(&options, &layout, &source).unwrap();

    let lines = runner.command_lines();
    assert!(lines[0].starts_with("make HAVE_RULES=no CFGDIR="));
    assert!(lines[1].contains(" CFGDIR=/cfg install"));
    assert!(result.dependencies.iter().all(|d| d.name != "pcre"));
}

#[test]
fn test_cook_with_gui_and_rules() {
    let (_temp, source, layout) = setup_source_tree();
    let runner = FakeRunner::new(simulate_build);
    let options = OptionSet::from_flags(["with-qt5"]).unwrap();

    let result = kitchen(runner.clone()).cook(&options, &layout, &source).unwrap();

    let lines = runner.command_lines();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[2],
        "qmake HAVE_RULES=yes INCLUDEPATH+=/usr/local/opt/pcre/include LIBS+=-L/usr/local/opt/pcre/lib"
    );
    assert_eq!(lines[3], "make");

    let calls = runner.calls();
    assert_eq!(calls[2].current_dir, Some(source.join("gui")));
    assert_eq!(calls[3].current_dir, Some(source.join("gui")));

    assert_eq!(result.staged.gui_bundle, Some(layout.gui_bundle()));
    assert!(layout.gui_bundle().join("Contents/MacOS/cppcheck-gui").is_file());
}

#[test]
fn test_cook_with_gui_without_rules() {
    let (_temp, source, layout) = setup_source_tree();
    let runner = FakeRunner::new(simulate_build);
    let options = OptionSet::from_flags(["with-qt", "without-rules"]).unwrap();

    kitchen(runner.clone()).cook(&options, &layout, &source).unwrap();

    assert_eq!(runner.command_lines()[2], "qmake HAVE_RULES=no");
}

#[test]
fn test_missing_dependency_fails_before_building() {
    let (_temp, source, layout) = setup_source_tree();
    let runner = FakeRunner::new(simulate_build);
    let mut kitchen = Kitchen::with_runner(KitchenConfig::default(), runner.clone());
    kitchen.set_locator(Arc::new(MissingLocator { missing: "qt" }));

    let options = OptionSet::from_flags(["with-qt"]).unwrap();
    let err = kitchen.cook(&options, &layout, &source).unwrap_err();

    assert!(matches!(err, Error::MissingDependency(ref m) if m.contains("qt")));
    assert!(runner.calls().is_empty());
}

#[test]
fn test_install_failure_skips_staging() {
    let (_temp, source, layout) = setup_source_tree();
    let runner = FakeRunner::new(|cmd| {
        if cmd.args.iter().any(|a| a == "install") {
            fail(2, "install: cannot create directory '/cfg': Permission denied")
        } else {
            simulate_build(cmd)
        }
    });

    let err = kitchen(runner.clone())
        .cook(&OptionSet::default(), &layout, &source)
        .unwrap_err();

    match err {
        Error::BuildFailure {
            step,
            command,
            code,
            output,
        } => {
            assert_eq!(step, "install-step");
            assert!(command.ends_with("CFGDIR=/cfg install"));
            assert_eq!(code, Some(2));
            assert!(output.contains("Permission denied"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!layout.addons_dir().exists());
}

#[test]
fn test_gui_build_failure_is_reported() {
    let (_temp, source, layout) = setup_source_tree();
    let runner = FakeRunner::new(|cmd| {
        if cmd.program == "qmake" {
            fail(3, "Project ERROR: Unknown module(s) in QT: widgets")
        } else {
            simulate_build(cmd)
        }
    });
    let options = OptionSet::from_flags(["with-qt"]).unwrap();

    let err = kitchen(runner.clone())
        .cook(&options, &layout, &source)
        .unwrap_err();
    assert!(matches!(err, Error::BuildFailure { ref step, .. } if step == "secondary-gui-build"));
    // Primary and install ran before the GUI step
    assert_eq!(runner.calls().len(), 3);
}

#[test]
fn test_missing_gui_bundle_is_a_staging_failure() {
    let (_temp, source, layout) = setup_source_tree();
    // GUI make succeeds but produces nothing
    let runner = FakeRunner::new(|cmd| {
        if cmd.args.is_empty() {
            common::ok("")
        } else {
            simulate_build(cmd)
        }
    });
    let options = OptionSet::from_flags(["with-qt"]).unwrap();

    let err = kitchen(runner).cook(&options, &layout, &source).unwrap_err();
    assert!(matches!(err, Error::StagingFailure(_)));
}

#[test]
fn test_restaging_populated_prefix() {
    // Re-staging into a populated prefix is not a supported operation. This
    // only records that a second cook warns; its outcome is not asserted.
    let (_temp, source, layout) = setup_source_tree();
    let runner = FakeRunner::new(simulate_build);
    let kitchen = kitchen(runner);

    kitchen.cook(&OptionSet::default(), &layout, &source).unwrap();
    if let Ok(second) = kitchen.cook(&OptionSet::default(), &layout, &source) {
        assert!(!second.warnings.is_empty());
    }
}
