// src/acceptance/checks.rs

//! Acceptance check definitions and their pass/fail rules

use super::fixtures;
use crate::error::{Error, Result};
use crate::recipe::kitchen::ProcessOutput;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use strum_macros::Display;

/// The three checks, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum CheckKind {
    Smoke,
    DefectDetection,
    AddonIntegration,
}

/// What a passing invocation looks like
///
/// Every expectation also requires a zero exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    Success,
    /// Combined stdout and stderr contains the text
    OutputContains(String),
    /// The invocation produced a file, relative to the working directory
    FileExists(PathBuf),
    /// The sample addon printed these function names and token count
    AddonReport { functions: String, token_count: usize },
}

/// Which installed program an invocation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    Analyzer,
    Python,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: Program,
    pub args: Vec<String>,
    pub expect: Expectation,
}

impl Invocation {
    fn new(program: Program, args: &[&str], expect: Expectation) -> Self {
        Self {
            program,
            args: args.iter().map(|a| a.to_string()).collect(),
            expect,
        }
    }
}

/// One acceptance check: fixtures to write, then invocations to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptanceCheck {
    pub kind: CheckKind,
    /// File name to contents, written into the working directory
    pub fixture_files: BTreeMap<String, String>,
    pub invocations: Vec<Invocation>,
}

impl AcceptanceCheck {
    /// Analyze a well-formed program; it must simply succeed
    pub fn smoke() -> Self {
        Self {
            kind: CheckKind::Smoke,
            fixture_files: BTreeMap::from([(
                fixtures::TEST_CPP_NAME.to_string(),
                fixtures::TEST_CPP.to_string(),
            )]),
            invocations: vec![Invocation::new(
                Program::Analyzer,
                &[fixtures::TEST_CPP_NAME],
                Expectation::Success,
            )],
        }
    }

    /// Analyze a program with a seeded out-of-bounds write
    pub fn defect_detection() -> Self {
        Self {
            kind: CheckKind::DefectDetection,
            fixture_files: BTreeMap::from([(
                fixtures::TESTCHECK_CPP_NAME.to_string(),
                fixtures::TESTCHECK_CPP.to_string(),
            )]),
            invocations: vec![Invocation::new(
                Program::Analyzer,
                &[fixtures::TESTCHECK_CPP_NAME],
                Expectation::OutputContains(fixtures::OUT_OF_BOUNDS.to_string()),
            )],
        }
    }

    /// Dump the smoke program and read it back through the installed addon module
    pub fn addon_integration(addons_dir: &Path) -> Self {
        let dump_name = format!("{}.dump", fixtures::TEST_CPP_NAME);
        Self {
            kind: CheckKind::AddonIntegration,
            fixture_files: BTreeMap::from([
                (
                    fixtures::TEST_CPP_NAME.to_string(),
                    fixtures::TEST_CPP.to_string(),
                ),
                (
                    fixtures::SAMPLE_ADDON_NAME.to_string(),
                    fixtures::sample_addon(addons_dir),
                ),
            ]),
            invocations: vec![
                Invocation::new(
                    Program::Analyzer,
                    &["--dump", fixtures::TEST_CPP_NAME],
                    Expectation::FileExists(PathBuf::from(&dump_name)),
                ),
                Invocation::new(
                    Program::Python,
                    &[fixtures::SAMPLE_ADDON_NAME, dump_name.as_str()],
                    Expectation::AddonReport {
                        functions: fixtures::EXPECTED_FUNCTIONS.to_string(),
                        token_count: fixtures::EXPECTED_TOKEN_COUNT,
                    },
                ),
            ],
        }
    }
}

fn failure(kind: CheckKind, message: String) -> Error {
    Error::AssertionFailure {
        check: kind.to_string(),
        message,
    }
}

/// Decide whether one invocation's output meets its expectation
///
/// `workdir` resolves [`Expectation::FileExists`] paths. An addon that could
/// not parse the dump is reported separately from one that printed the
/// wrong report.
pub fn evaluate(
    kind: CheckKind,
    expect: &Expectation,
    output: &ProcessOutput,
    workdir: &Path,
) -> Result<()> {
    let combined = output.combined();

    if let Expectation::AddonReport { .. } = expect {
        if combined.contains(&fixtures::parse_failure_message()) {
            return Err(failure(
                kind,
                "addon could not parse the dump file".to_string(),
            ));
        }
    }

    if !output.success() {
        return Err(failure(
            kind,
            format!("exited with code {:?}:\n{}", output.exit_code, combined),
        ));
    }

    match expect {
        Expectation::Success => Ok(()),
        Expectation::OutputContains(needle) => {
            if combined.contains(needle.as_str()) {
                Ok(())
            } else {
                Err(failure(
                    kind,
                    format!("expected output to contain '{}', got:\n{}", needle, combined),
                ))
            }
        }
        Expectation::FileExists(path) => {
            let path = workdir.join(path);
            if path.exists() {
                Ok(())
            } else {
                Err(failure(kind, format!("{} was not created", path.display())))
            }
        }
        Expectation::AddonReport {
            functions,
            token_count,
        } => {
            if has_addon_report(&output.stdout, functions, *token_count) {
                Ok(())
            } else {
                Err(failure(
                    kind,
                    format!(
                        "expected addon report '{}\\n{}', got:\n{}",
                        functions, token_count, combined
                    ),
                ))
            }
        }
    }
}

/// Whether two consecutive stdout lines are exactly the function list and
/// the token count
fn has_addon_report(stdout: &str, functions: &str, token_count: usize) -> bool {
    let lines: Vec<&str> = stdout.lines().map(str::trim_end).collect();
    lines.windows(2).any(|pair| {
        pair[0] == functions && pair[1].parse::<usize>().is_ok_and(|n| n == token_count)
    })
}
