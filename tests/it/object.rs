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

use jsonkit::EmptyHandling;
use jsonkit::Error;
use jsonkit::JsonObject;
use jsonkit::JsonOptions;
use jsonkit::JsonType;
use jsonkit::JsonValue;

fn object(input: &str) -> JsonObject<'static> {
    JsonObject::parse(input.as_bytes(), JsonOptions::default())
        .unwrap()
        .into_owned()
}

#[test]
fn test_parse_object_root() {
    let obj = object(r#"{"b": 2, "a": 1, "c": {"d": [true]}}"#);
    assert_eq!(obj.len(), 3);
    let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "b", "c"]);
    assert_eq!(obj["a"], JsonValue::Integer(1));
    assert_eq!(obj.try_get_as::<u8>("b"), Some(2));
    assert_eq!(obj.try_get_as::<bool>("b"), None);
    assert!(obj.try_get_object("c").is_some());
    assert!(obj.try_get_array("c").is_none());

    let err = JsonObject::parse(b"[]", JsonOptions::default()).unwrap_err();
    assert_eq!(err, Error::UnexpectedRootType {
        expected: JsonType::Object,
        found: JsonType::Array,
    });
}

#[test]
fn test_set_and_remove() {
    let mut obj = JsonObject::new();
    assert_eq!(obj.set("k", 1), None);
    assert_eq!(obj.set("k", "v"), Some(JsonValue::Integer(1)));
    assert_eq!(obj.len(), 1);
    assert_eq!(obj.try_remove("k"), Some(JsonValue::from("v")));
    assert_eq!(obj.try_remove("k"), None);
    assert!(obj.is_empty());

    obj.set("", JsonValue::Null);
    assert!(obj.contains_key(""));
    obj.clear();
    assert!(!obj.contains_key(""));
}

#[test]
#[should_panic(expected = "key \"missing\" not found in json object")]
fn test_get_missing_key() {
    let obj = object(r#"{"present": 1}"#);
    obj.get("missing");
}

#[test]
fn test_set_with_path() {
    let mut obj = JsonObject::new();
    obj.set_with_path("a.b", 1);
    assert_eq!(obj.get_with_path("a.b"), &JsonValue::Integer(1));
    assert!(obj.try_get("a.b").is_none());
    assert!(obj.get("a").is_object());

    obj.set_with_path("a.c.d", "deep");
    assert_eq!(obj.to_string(), r#"{"a":{"b":1,"c":{"d":"deep"}}}"#);

    // a plain key containing the separator is a different entry
    obj.set("a.b", 2);
    assert_eq!(obj.get("a.b"), &JsonValue::Integer(2));
    assert_eq!(obj.get_with_path("a.b"), &JsonValue::Integer(1));

    // single segment behaves like set
    obj.set_with_path("top", false);
    assert_eq!(obj["top"], JsonValue::Boolean(false));
}

#[test]
fn test_set_with_path_replaces_non_object() {
    let mut obj = object(r#"{"a": 5, "x": {"y": [1, 2]}}"#);
    obj.set_with_path("a.b", true);
    assert_eq!(obj.to_string(), r#"{"a":{"b":true},"x":{"y":[1,2]}}"#);

    obj.set_with_path("x.y.z", 0);
    assert_eq!(obj.to_string(), r#"{"a":{"b":true},"x":{"y":{"z":0}}}"#);
}

#[test]
fn test_get_with_path() {
    let obj = object(r#"{"server": {"port": 8080, "hosts": ["a"], "tls": {}}, "name": "n"}"#);
    assert_eq!(obj.try_get_as_with_path::<u16>("server.port"), Some(8080));
    assert_eq!(obj.try_get_as_with_path::<u8>("server.port"), None);
    assert_eq!(obj.try_get_as_with_path::<&str>("name"), Some("n"));
    assert_eq!(
        obj.try_get_array_with_path("server.hosts").map(|a| a.len()),
        Some(1)
    );
    assert!(obj.try_get_object_with_path("server.tls").unwrap().is_empty());
    assert!(obj.try_get_object_with_path("server.hosts").is_none());

    // misses never panic
    assert!(obj.try_get_with_path("server.missing").is_none());
    assert!(obj.try_get_with_path("name.x").is_none());
    assert!(obj.try_get_with_path("server.port.x").is_none());
    assert!(obj.try_get_with_path("nope.port").is_none());
}

#[test]
#[should_panic(expected = "key \"server.missing\" not found in json object")]
fn test_get_with_path_missing() {
    let obj = object(r#"{"server": {}}"#);
    obj.get_with_path("server.missing");
}

#[test]
fn test_get_mut_with_path() {
    let mut obj = object(r#"{"a": {"list": []}}"#);
    obj.get_mut_with_path("a.list").as_array_mut().add(1);
    if let Some(list) = obj.try_get_mut_with_path("a.list") {
        list.as_array_mut().add(2);
    }
    assert!(obj.try_get_mut_with_path("a.list.x").is_none());
    assert_eq!(obj.to_string(), r#"{"a":{"list":[1,2]}}"#);
}

#[test]
fn test_remove_with_path_leave_empty() {
    let mut obj = object(r#"{"a": {"b": {"c": 1}}, "z": 0}"#);
    let removed = obj.try_remove_with_path("a.b.c", EmptyHandling::LeaveEmpty);
    assert_eq!(removed, Some(JsonValue::Integer(1)));
    assert_eq!(obj.to_string(), r#"{"a":{"b":{}},"z":0}"#);

    assert_eq!(
        obj.try_remove_with_path("a.b.c", EmptyHandling::LeaveEmpty),
        None
    );
    assert_eq!(
        obj.try_remove_with_path("z.q", EmptyHandling::LeaveEmpty),
        None
    );
    assert_eq!(obj.to_string(), r#"{"a":{"b":{}},"z":0}"#);
}

#[test]
fn test_remove_with_path_erase_empty() {
    let mut obj = object(r#"{"a": {"b": {"c": 1}, "keep": {"d": 2, "e": 3}}}"#);
    let removed = obj.try_remove_with_path("a.b.c", EmptyHandling::EraseEmpty);
    assert_eq!(removed, Some(JsonValue::Integer(1)));
    assert_eq!(obj.to_string(), r#"{"a":{"keep":{"d":2,"e":3}}}"#);

    obj.try_remove_with_path("a.keep.d", EmptyHandling::EraseEmpty);
    assert_eq!(obj.to_string(), r#"{"a":{"keep":{"e":3}}}"#);

    // erasing cascades up to, but never including, the receiver
    obj.try_remove_with_path("a.keep.e", EmptyHandling::EraseEmpty);
    assert!(obj.is_empty());

    // a failed removal leaves empty intermediates alone
    let mut obj = object(r#"{"a": {}}"#);
    assert_eq!(
        obj.try_remove_with_path("a.b", EmptyHandling::EraseEmpty),
        None
    );
    assert_eq!(obj.to_string(), r#"{"a":{}}"#);
}

#[test]
fn test_iterate_sorted() {
    let mut obj: JsonObject = vec![("b", JsonValue::Integer(2)), ("a", JsonValue::Integer(1))]
        .into_iter()
        .collect();
    for (_, value) in obj.iter_mut() {
        *value = JsonValue::Integer(value.as_integer() + 1);
    }
    let pairs: Vec<(String, i64)> = (&obj)
        .into_iter()
        .map(|(k, v)| (k.clone(), v.as_integer()))
        .collect();
    assert_eq!(pairs, [("a".to_string(), 2), ("b".to_string(), 3)]);

    let values: Vec<&JsonValue> = obj.values().collect();
    assert_eq!(values, [&JsonValue::Integer(2), &JsonValue::Integer(3)]);

    let owned: Vec<String> = obj.into_iter().map(|(k, _)| k).collect();
    assert_eq!(owned, ["a", "b"]);
}
