// src/acceptance/fixtures.rs

//! Fixture sources written into the scratch directory

use crate::formula;
use std::path::Path;

/// Small program with a function, a class and a constructor
pub const TEST_CPP: &str = r#"#include <iostream>
using namespace std;

int main()
{
  cout << "Hello World!" << endl;
  return 0;
}

class Example
{
  public:
    int GetNumber() const;
    explicit Example(int initialNumber);
  private:
    int number;
};

Example::Example(int initialNumber)
{
  number = initialNumber;
}
"#;

/// Program with an out-of-bounds array write
pub const TESTCHECK_CPP: &str = r#"int main()
{
char a[10];
a[10] = 0;
return 0;
}
"#;

pub const TEST_CPP_NAME: &str = "test.cpp";
pub const TESTCHECK_CPP_NAME: &str = "testcheck.cpp";
pub const SAMPLE_ADDON_NAME: &str = "sampleaddon.py";

/// Text the analyzer prints for the seeded defect
pub const OUT_OF_BOUNDS: &str = "out of bounds";

/// Functions declared in [`TEST_CPP`], in dump order
pub const EXPECTED_FUNCTIONS: &str = "main,GetNumber,Example";

/// Tokens in the simplified token list of [`TEST_CPP`]
pub const EXPECTED_TOKEN_COUNT: usize = 55;

const SAMPLE_ADDON_TEMPLATE: &str = r#"#!/usr/bin/env python3
"""A simple test addon for @NAME@, prints function names and token count"""
import importlib.util
import os
import sys

# Load the '@MODULE@' module from the installed addons directory
MODULE_PATH = os.path.join(@ADDONS_DIR@, "@MODULE@.py")
SPEC = importlib.util.spec_from_file_location("@MODULE@", MODULE_PATH)
CPPCHECKDATA = importlib.util.module_from_spec(SPEC)
SPEC.loader.exec_module(CPPCHECKDATA)

for arg in sys.argv[1:]:
    # Parse the dump file generated by @NAME@
    try:
        parsed = CPPCHECKDATA.parsedump(arg)
    except Exception:
        parsed = None
    if parsed is None or len(parsed.configurations) == 0:
        sys.exit("@PARSE_ERROR@")
    config = parsed.configurations[0]
    # Function names joined by ',' on the first line, token count on the second
    detected_functions = ','.join(fn.name for fn in config.functions)
    detected_token_count = len(config.tokenlist)
    print("%s\n%s" % (detected_functions, detected_token_count))
"#;

/// Message the addon exits with when the dump cannot be parsed
pub fn parse_failure_message() -> String {
    format!(
        "Error: {}: failed: can't parse the {} dump.",
        SAMPLE_ADDON_NAME,
        formula::NAME
    )
}

/// Render the sample addon, loading the data module from `addons_dir`
pub fn sample_addon(addons_dir: &Path) -> String {
    SAMPLE_ADDON_TEMPLATE
        .replace("@NAME@", formula::NAME)
        .replace("@MODULE@", &formula::addon_module())
        .replace("@ADDONS_DIR@", &python_string(&addons_dir.to_string_lossy()))
        .replace("@PARSE_ERROR@", &parse_failure_message())
}

/// Quote a value as a Python string literal
fn python_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
