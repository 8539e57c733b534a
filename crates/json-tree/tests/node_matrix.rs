//! Tree API: container operations, copies, validation and printing.

use json_tree::{parse, Node, NodeError, NodeType, PrintOptions};

// ---------------------------------------------------------------------------
// objects
// ---------------------------------------------------------------------------

#[test]
fn object_insertion_order_with_update() {
    let mut node = Node::empty_object();
    node.set("a", 1).unwrap();
    node.set("b", 2).unwrap();
    node.set("a", 3).unwrap();
    assert_eq!(node.keys().unwrap().collect::<Vec<_>>(), ["a", "b"]);
    let values: Vec<i32> = node.values().unwrap().map(|v| v.as_i32().unwrap()).collect();
    assert_eq!(values, [3, 2]);
}

#[test]
fn object_remove_then_readd_moves_to_end() {
    let mut node = Node::object_from([("a", 1), ("b", 2), ("c", 3)]);
    assert_eq!(node.remove("a").unwrap(), Node::from(1));
    node.set("a", 4).unwrap();
    assert_eq!(node.keys().unwrap().collect::<Vec<_>>(), ["b", "c", "a"]);
    assert_eq!(node.remove("zzz"), Err(NodeError::MissingKey("zzz".into())));
}

#[test]
fn object_entries_and_has() {
    let node = Node::object_from([("x", Node::TRUE), ("y", Node::NULL)]);
    assert!(node.has("y").unwrap());
    assert!(!node.has("z").unwrap());
    let entries: Vec<(String, NodeType)> = node
        .entries()
        .unwrap()
        .map(|(k, v)| (k.to_string(), v.node_type()))
        .collect();
    assert_eq!(
        entries,
        [("x".to_string(), NodeType::Bool), ("y".to_string(), NodeType::Null)]
    );
}

// ---------------------------------------------------------------------------
// arrays
// ---------------------------------------------------------------------------

#[test]
fn negative_index_matrix() {
    let node = Node::array_from([10, 20, 30]);
    let cases: [(i64, Option<i32>); 8] = [
        (0, Some(10)),
        (2, Some(30)),
        (3, None),
        (-1, Some(30)),
        (-3, Some(10)),
        (-4, None),
        (i64::MAX, None),
        (i64::MIN, None),
    ];
    for (index, expected) in cases {
        match expected {
            Some(value) => assert_eq!(node.get(index).unwrap().as_i32().unwrap(), value),
            None => assert_eq!(
                node.get(index),
                Err(NodeError::IndexOutOfBounds { index, size: 3 }),
                "{index}"
            ),
        }
    }
}

#[test]
fn array_mutation_matrix() {
    let mut node = Node::empty_array();
    node.add(1).unwrap().add("two").unwrap().add(Node::NULL).unwrap();
    node.insert(0, 0).unwrap();
    node.insert(4, 4).unwrap();
    assert_eq!(node.to_string(), r#"[0,1,"two",null,4]"#);

    node.set(-2, 3).unwrap();
    assert_eq!(node.to_string(), r#"[0,1,"two",3,4]"#);
    assert!(node.set(5, 0).is_err());
    assert!(node.insert(6, 0).is_err());

    assert_eq!(node.remove(-1).unwrap(), Node::from(4));
    assert_eq!(node.remove(1usize).unwrap(), Node::from(1));
    assert_eq!(node.to_string(), r#"[0,"two",3]"#);
}

#[test]
fn get_mut_edits_in_place() {
    let mut node = parse(r#"{"list":[{"n":1}]}"#).unwrap();
    node.get_mut("list")
        .unwrap()
        .get_mut(0)
        .unwrap()
        .set("n", 2)
        .unwrap();
    assert_eq!(node.to_string(), r#"{"list":[{"n":2}]}"#);
}

// ---------------------------------------------------------------------------
// type errors
// ---------------------------------------------------------------------------

#[test]
fn wrong_variant_matrix() {
    let scalars = [Node::NULL, Node::TRUE, Node::from(1), Node::string("s")];
    for scalar in scalars {
        let actual = scalar.node_type();
        let mut node = scalar.clone();
        assert!(matches!(node.get(0), Err(NodeError::IncorrectType { actual: a, .. }) if a == actual));
        assert!(matches!(node.get("k"), Err(NodeError::IncorrectType { .. })));
        assert!(matches!(node.set("k", 1), Err(NodeError::IncorrectType { .. })));
        assert!(matches!(node.add(1), Err(NodeError::IncorrectType { .. })));
        assert!(matches!(node.remove(0), Err(NodeError::IncorrectType { .. })));
        assert!(matches!(node.size(), Err(NodeError::IncorrectType { .. })));
        assert!(matches!(node.keys(), Err(NodeError::IncorrectType { .. })));
        assert!(matches!(node.values(), Err(NodeError::IncorrectType { .. })));
        assert!(matches!(node.has("k"), Err(NodeError::IncorrectType { .. })));
        assert!(matches!(node.clear(), Err(NodeError::IncorrectType { .. })));
        assert_eq!(node, scalar);
    }

    let mut array = Node::empty_array();
    assert_eq!(
        array.get("k"),
        Err(NodeError::IncorrectType {
            expected: vec![NodeType::Object],
            actual: NodeType::Array,
        })
    );
    assert!(array.merge(&Node::empty_object()).is_err());
    let mut object = Node::empty_object();
    assert!(object.add(1).is_err());
    assert!(object.append(&Node::empty_array()).is_err());
}

// ---------------------------------------------------------------------------
// copies
// ---------------------------------------------------------------------------

#[test]
fn shallow_copy_never_aliases() {
    let original = parse(r#"{"inner":{"v":1},"list":[1]}"#).unwrap();
    let mut copy = original.shallow_copy();
    copy.get_mut("inner").unwrap().set("v", 2).unwrap();
    copy.get_mut("list").unwrap().add(2).unwrap();
    copy.set("extra", true).unwrap();

    assert_eq!(original.to_string(), r#"{"inner":{"v":1},"list":[1]}"#);
    assert_eq!(copy.to_string(), r#"{"inner":{"v":2},"list":[1,2],"extra":true}"#);
}

#[test]
fn inserting_a_subtree_takes_a_copy() {
    let child = Node::object_from([("k", 1)]);
    let mut a = Node::empty_array();
    let mut b = Node::empty_array();
    a.add(child.clone()).unwrap();
    b.add(child.deep_copy()).unwrap();
    a.get_mut(0).unwrap().set("k", 2).unwrap();
    assert_eq!(child.get("k").unwrap().as_i32().unwrap(), 1);
    assert_eq!(b.get(0).unwrap().get("k").unwrap().as_i32().unwrap(), 1);
}

#[test]
fn equality_is_structural() {
    assert_eq!(
        parse(r#"{"a":1,"b":[1,2]}"#).unwrap(),
        parse(r#"{"b":[1,2.0],"a":0x1}"#).unwrap()
    );
    assert_ne!(parse("[1,2]").unwrap(), parse("[2,1]").unwrap());
    assert_ne!(parse(r#"{"a":null}"#).unwrap(), parse("{}").unwrap());
    assert_ne!(Node::from(1), Node::string("1"));
}

// ---------------------------------------------------------------------------
// validation
// ---------------------------------------------------------------------------

#[test]
fn require_size_matrix() {
    let five = Node::array_from([1, 2, 3, 4, 5]);
    assert_eq!(
        five.require_size(1, 3).unwrap_err(),
        NodeError::IncorrectSize { min: 1, max: 3, actual: 5 }
    );
    let two = Node::array_from([1, 2]);
    assert!(std::ptr::eq(two.require_size(1, 3).unwrap(), &two));
    assert!(two.require_min_size(3).is_err());
    assert!(two.require_max_size(1).is_err());
    assert!(Node::object_from([("a", 1)]).require_size(1, 1).is_ok());
}

#[test]
fn require_chains() {
    let doc = parse(r#"{"user":{"name":"x","roles":["a"]}}"#).unwrap();
    let user = doc
        .require_object()
        .unwrap()
        .require_has_type("user", NodeType::Object)
        .unwrap()
        .get("user")
        .unwrap();
    user.require_has("name")
        .unwrap()
        .require_has_type("roles", NodeType::Array)
        .unwrap()
        .get("roles")
        .unwrap()
        .require_min_size(1)
        .unwrap();
    assert_eq!(
        user.require_has("age").unwrap_err().to_string(),
        "missing key `age`"
    );
}

#[test]
fn require_type_matrix() {
    let nodes = [
        Node::NULL,
        Node::FALSE,
        Node::ZERO,
        Node::EMPTY_STRING,
        Node::empty_array(),
        Node::empty_object(),
    ];
    for node in &nodes {
        for kind in NodeType::ALL {
            assert_eq!(node.require(kind).is_ok(), node.node_type() == kind);
            assert_eq!(node.require_not(kind).is_ok(), node.node_type() != kind);
        }
        assert_eq!(node.require_primitive().is_ok(), node.is_primitive());
        assert_eq!(node.require_container().is_ok(), node.is_container());
    }
    assert!(Node::ZERO
        .require_any(&[NodeType::String, NodeType::Number])
        .is_ok());
}

// ---------------------------------------------------------------------------
// printing
// ---------------------------------------------------------------------------

#[test]
fn printer_options() {
    let node = parse(r#"{"a":[],"b":{"c":"\n"}}"#).unwrap();
    assert_eq!(node.to_string_with(&PrintOptions::compact()), node.to_string());
    assert_eq!(
        node.to_string_with(&PrintOptions::default().indent(4)),
        "{\n    \"a\": [],\n    \"b\": {\n        \"c\": \"\\n\"\n    }\n}"
    );
}
