// Copyright 2023 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io::Write;

use goldenfile::Mint;
use jsonkit::keypath::parse_key_path;

#[test]
fn test_key_path() {
    let mut mint = Mint::new("tests/it/testdata");
    let mut file = mint.new_goldenfile("key_path.txt").unwrap();
    let cases = &["a", "a.b.c", "a..b", "", "键.值"];

    for case in cases {
        let key_path = parse_key_path(case);

        writeln!(file, "---------- Input ----------").unwrap();
        writeln!(file, "{case}").unwrap();
        writeln!(file, "---------- Output ---------").unwrap();
        writeln!(file, "{key_path}").unwrap();
        writeln!(file, "---------- AST ------------").unwrap();
        writeln!(file, "{key_path:#?}").unwrap();
        writeln!(file, "\n").unwrap();
    }
}

#[test]
fn test_key_path_split() {
    let cases: &[(&str, &str, &[&str])] = &[
        ("a", "a", &[]),
        ("a.b", "b", &["a"]),
        ("x.y.z", "z", &["x", "y"]),
        ("x.", "", &["x"]),
        (".", "", &[""]),
    ];

    for (input, leaf, parents) in cases {
        let key_path = parse_key_path(input);
        assert_eq!(key_path.split_last(), (*leaf, *parents), "path {input:?}");
    }
}
