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

use jsonkit::parse_value_with_options;
use jsonkit::Error;
use jsonkit::JsonOption;
use jsonkit::JsonOptions;
use jsonkit::DEFAULT_DEPTH_LIMIT;

#[test]
fn test_options_from_str() {
    let cases = [
        ("", ""),
        ("R", "R"),
        ("NR", "RN"),
        ("CCC", "C"),
        ("EILUPNKCR", "RCKNPULIE"),
    ];
    for (input, canonical) in cases {
        let options: JsonOptions = input.parse().unwrap();
        assert_eq!(options.to_string(), canonical);
        assert_eq!(options.depth_limit, DEFAULT_DEPTH_LIMIT);
        assert_eq!(canonical.parse::<JsonOptions>().unwrap(), options);
    }
}

#[test]
fn test_options_invalid_letter() {
    let err = "RCx".parse::<JsonOptions>().unwrap_err();
    assert_eq!(err, Error::InvalidOption('x'));
    assert_eq!(err.to_string(), "unrecognized option flag 'x'");

    let err = "R C".parse::<JsonOptions>().unwrap_err();
    assert_eq!(err, Error::InvalidOption(' '));
}

#[test]
#[should_panic(expected = "invalid json options \"K?\"")]
fn test_options_parse_panics() {
    JsonOptions::parse("K?");
}

#[test]
fn test_formatter_flags_do_not_change_parsing() {
    let input = r#"{"text": "é", "n": 1.5, "list": [1, 2]}"#.as_bytes();
    let plain = parse_value_with_options(input, JsonOptions::default()).unwrap();
    let decorated = parse_value_with_options(input, JsonOptions::parse("PULIE")).unwrap();
    assert_eq!(plain, decorated);
    assert!(parse_value_with_options(b"[1,]", JsonOptions::parse("PULIE")).is_err());
}

#[test]
fn test_each_parse_flag() {
    let cases: [(&[u8], JsonOption); 3] = [
        (b"[1,]", JsonOption::AllowTrailingCommas),
        (br#"{"a":1,"a":2}"#, JsonOption::UniqueKeys),
        (b"[Infinity]", JsonOption::EnableInfNaN),
    ];
    for (input, option) in cases {
        let without = parse_value_with_options(input, JsonOptions::default());
        let with = parse_value_with_options(input, JsonOptions::default().with(option));
        if option == JsonOption::UniqueKeys {
            assert!(without.is_ok());
            assert!(with.is_err());
        } else {
            assert!(without.is_err());
            assert!(with.is_ok());
        }
    }
}
