use pretty_assertions::assert_eq;

use crate::heap::Heap;
use crate::value::Value;

#[test]
fn define_get_and_assign() {
    let mut heap = Heap::new();
    let env = heap.new_env("Global", None);
    assert_eq!(heap.define(env, "a", Value::Int(1)), Ok(()));

    let Ok(frame) = heap.env_mut(env) else {
        panic!("frame missing");
    };
    assert!(frame.assign("a", Value::Int(2)));
    assert!(!frame.assign("b", Value::Int(3)));
    assert_eq!(frame.get("a"), Some(&Value::Int(2)));
    assert_eq!(frame.len(), 1);
    assert!(!frame.contains("b"));
}

#[test]
fn distance_walks_parents() {
    let mut heap = Heap::new();
    let global = heap.new_env("Global", None);
    let block = heap.new_env("Blok", Some(global));
    let inner = heap.new_env("Fonksiyon:f", Some(block));
    assert_eq!(heap.define(global, "x", Value::Int(1)), Ok(()));
    assert_eq!(heap.define(block, "x", Value::Int(2)), Ok(()));

    assert_eq!(heap.get_at(inner, 1, "x"), Ok(Some(Value::Int(2))));
    assert_eq!(heap.get_at(inner, 2, "x"), Ok(Some(Value::Int(1))));
    assert_eq!(heap.get_at(inner, 0, "x"), Ok(None));
    assert!(heap.get_at(inner, 3, "x").is_err());

    assert_eq!(heap.assign_at(inner, 2, "x", Value::Int(9)), Ok(()));
    assert_eq!(heap.get_at(block, 1, "x"), Ok(Some(Value::Int(9))));
    assert_eq!(heap.env_chain(inner), vec![inner, block, global]);
}

#[test]
fn json_dump_of_root_and_child() {
    let mut heap = Heap::new();
    let global = heap.new_env("Global", None);
    let block = heap.new_env("Blok", Some(global));
    assert_eq!(heap.define(block, "s", Value::string("a\"b")), Ok(()));

    assert_eq!(
        heap.env_json(global),
        format!(r#"{{"scope":"Global","id":"{global}","variables":{{}},"parent":null}}"#)
    );
    assert_eq!(
        heap.env_json(block),
        format!(
            r#"{{"scope":"Blok","id":"{block}","variables":{{"s":{{"type":"Metin","value":"a\"b"}}}},"parent_id":"{global}"}}"#
        )
    );
}
