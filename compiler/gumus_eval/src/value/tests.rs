use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::heap::Heap;

#[test]
fn truthiness() {
    assert!(!Value::Bool(false).is_truthy());
    assert!(!Value::Int(0).is_truthy());
    assert!(!Value::Nil.is_truthy());
    assert!(Value::Int(-1).is_truthy());
    assert!(Value::Float(0.0).is_truthy());
    assert!(Value::string("").is_truthy());
}

#[test]
fn heap_values_have_handles() {
    let mut heap = Heap::new();
    let list = heap.alloc_list(Vec::new());
    assert!(list.handle().is_some());
    assert_eq!(Value::Int(1).handle(), None);
    assert_eq!(Value::string("a").handle(), None);
}

#[test]
fn accessors() {
    assert_eq!(Value::Int(4).as_int(), Some(4));
    assert_eq!(Value::Float(4.0).as_int(), None);
    assert_eq!(Value::string("x").as_str(), Some("x"));
    assert_eq!(Value::from("y"), Value::string("y"));
    assert_eq!(Value::from(true), Value::Bool(true));
}

#[test]
fn float_formatting() {
    assert_eq!(format_float(1.5), "1.5");
    assert_eq!(format_float(2.0), "2");
    assert_eq!(format_float(1.0 / 3.0), "0.333333");
    assert_eq!(format_float(1e20), "1e+20");
    assert_eq!(format_float(123_456.0), "123456");
    assert_eq!(format_float(1_234_567.0), "1.23457e+06");
    assert_eq!(format_float(0.0001), "0.0001");
    assert_eq!(format_float(0.000_012_5), "1.25e-05");
    assert_eq!(format_float(-2.5), "-2.5");
    assert_eq!(format_float(999_999.5), "1e+06");
    assert_eq!(format_float(f64::INFINITY), "inf");
}

#[test]
fn display_of_nested_containers() {
    let mut heap = Heap::new();
    let inner = heap.alloc_list(vec![Value::Int(1), Value::Float(2.5)]);
    let mut entries = BTreeMap::new();
    entries.insert("z".to_owned(), Value::Nil);
    entries.insert("a".to_owned(), inner);
    let map = heap.alloc_map(entries);
    assert_eq!(heap.display(&map), "{\"a\": [1, 2.5], \"z\": nil}");
}

#[test]
fn display_stops_at_cycles() {
    let mut heap = Heap::new();
    let map = heap.alloc_map(BTreeMap::new());
    let Value::Map(handle) = map else {
        panic!("expected a map");
    };
    if let Ok(entries) = heap.map_mut(handle) {
        entries.insert("oz".to_owned(), map.clone());
    }
    assert_eq!(heap.display(&map), "{\"oz\": {...}}");
}

#[test]
fn sibling_references_are_not_cycles() {
    let mut heap = Heap::new();
    let shared = heap.alloc_list(vec![Value::Int(1)]);
    let outer = heap.alloc_list(vec![shared.clone(), shared]);
    assert_eq!(heap.display(&outer), "[[1], [1]]");
}

#[test]
fn object_sizes_grow_with_contents() {
    let small = HeapObject::List(vec![Value::Int(1)]);
    let large = HeapObject::List(vec![Value::Int(1); 10]);
    assert!(large.size_estimate() > small.size_estimate());
    assert_eq!(small.kind_name(), "Liste");
}

proptest! {
    #[test]
    fn format_float_matches_integers(n in -100_000i64..100_000) {
        prop_assert_eq!(format_float(crate::operators::int_to_float(n)), n.to_string());
    }

    #[test]
    fn format_float_never_has_trailing_zeros(x in -1.0e9f64..1.0e9) {
        let text = format_float(x);
        if text.contains('.') && !text.contains('e') {
            prop_assert!(!text.ends_with('0'));
        }
    }
}
