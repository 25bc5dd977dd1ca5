// Copyright 2025 Eric Jingryd (tidynest@proton.me)
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

use crate::core::library::{LibraryError, MacroLibrary};
use crate::core::types::Macro;

/// Helper to build test macros
fn test_macro(name: &str, definition: &str) -> Macro {
    Macro::new(name, definition).unwrap()
}

#[test]
fn test_insert_and_get() {
    let mut library = MacroLibrary::new();
    library.insert(test_macro("greet", "hi\\E")).unwrap();

    assert_eq!(library.get("greet").unwrap().definition(), "hi\\E");
    assert!(library.get("other").is_none());
    assert_eq!(library.len(), 1);
}

#[test]
fn test_insert_rejects_duplicate_name() {
    let mut library = MacroLibrary::new();
    library.insert(test_macro("greet", "hi")).unwrap();

    let result = library.insert(test_macro("greet", "bye"));
    assert_eq!(result, Err(LibraryError::DuplicateName("greet".to_string())));

    // The original entry is untouched.
    assert_eq!(library.get("greet").unwrap().definition(), "hi");
    assert_eq!(library.len(), 1);
}

#[test]
fn test_remove() {
    let mut library = MacroLibrary::new();
    library.insert(test_macro("a", "x")).unwrap();
    library.insert(test_macro("b", "y")).unwrap();

    library.remove("a").unwrap();
    assert!(library.get("a").is_none());
    assert_eq!(library.len(), 1);
}

#[test]
fn test_remove_unknown_name_errors() {
    let mut library = MacroLibrary::new();
    assert_eq!(
        library.remove("ghost"),
        Err(LibraryError::UnknownName("ghost".to_string()))
    );
}

#[test]
fn test_bulk_load_keeps_duplicates_and_flags_them() {
    let library = MacroLibrary::from_macros(vec![
        test_macro("a", "x"),
        test_macro("b", "y"),
        test_macro("a", "z"),
        test_macro("a", "w"),
    ]);

    assert_eq!(library.len(), 4);
    assert_eq!(library.duplicate_names(), vec!["a".to_string()]);
}

#[test]
fn test_remove_drops_every_entry_with_the_name() {
    let mut library = MacroLibrary::from_macros(vec![
        test_macro("a", "x"),
        test_macro("a", "z"),
        test_macro("b", "y"),
    ]);

    library.remove("a").unwrap();
    assert_eq!(library.len(), 1);
    assert!(library.get("a").is_none());
}

#[test]
fn test_get_first_match_wins() {
    let library = MacroLibrary::from_macros(vec![
        test_macro("a", "first"),
        test_macro("a", "second"),
    ]);

    assert_eq!(library.get("a").unwrap().definition(), "first");
}

#[test]
fn test_insertion_order_preserved() {
    let mut library = MacroLibrary::new();
    library.insert(test_macro("c", "1")).unwrap();
    library.insert(test_macro("a", "2")).unwrap();
    library.insert(test_macro("b", "3")).unwrap();

    let names: Vec<&str> = library.macros().iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn test_empty_library() {
    let library = MacroLibrary::new();
    assert!(library.is_empty());
    assert!(library.duplicate_names().is_empty());
}
