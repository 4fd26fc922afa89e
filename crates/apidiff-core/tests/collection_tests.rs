//! Collection and extension merge tests
//!
//! ## Scenarios Covered
//!
//! 1. Conformance-only extension merges into its primary declaration
//! 2. Extension without a primary becomes the canonical entry
//! 3. Extension members land under the target, module prefix stripped
//! 4. Visibility filtering of names, modifiers and subtrees
//! 5. Overloads share one slot
//! 6. Syntax trees decoded from JSON

mod common;

use std::collections::BTreeSet;

use apidiff_core::syntax::role;
use apidiff_core::{
    collect_declarations, compare_declaration_sets, surface_digest, DeclNode, DeclarationIdentifier,
    DeclarationMap, ExErrorKind, SyntaxNode,
};
use common::*;

fn collect(statements: Vec<SyntaxNode>) -> DeclarationMap {
    let tree = source_file(statements);
    collect_declarations(DeclNode::parse_source_file(&tree).unwrap(), MODULE).unwrap()
}

fn keys(map: &DeclarationMap) -> Vec<String> {
    map.keys().map(ToString::to_string).collect()
}

fn rendered(map: &DeclarationMap, identifier: &DeclarationIdentifier) -> Vec<String> {
    map.get(identifier)
        .map(|nodes| nodes.iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}

#[test]
fn test_extension_conformance_merges_into_primary() {
    // GIVEN `public struct Foo: A` and `extension Foo: B {}`
    let map = collect(vec![
        structure("Foo").with(role::INHERITED_TYPE, simple_type("A")),
        extension(simple_type("Foo")).with(role::INHERITED_TYPE, simple_type("B")),
    ]);

    // THEN Foo carries {A, B} and no separate extension entry remains
    let foo = DeclarationIdentifier::type_path(["Foo"]);
    assert_eq!(keys(&map), vec!["Foo"]);
    assert_eq!(rendered(&map, &foo), vec!["public struct Foo: A, B"]);
}

#[test]
fn test_merge_keeps_first_seen_order_without_duplicates() {
    let map = collect(vec![
        extension(simple_type("Foo")).with(role::INHERITED_TYPE, simple_type("A")),
        structure("Foo")
            .with(role::INHERITED_TYPE, simple_type("Codable"))
            .with(role::INHERITED_TYPE, simple_type("A")),
    ]);

    let foo = DeclarationIdentifier::type_path(["Foo"]);
    assert_eq!(rendered(&map, &foo), vec!["public struct Foo: Codable, A"]);
}

#[test]
fn test_extension_without_primary_is_kept() {
    // An external type made to conform inside this module
    let map = collect(vec![
        extension(simple_type("String")).with(role::INHERITED_TYPE, simple_type("Identifiable")),
    ]);

    let string = DeclarationIdentifier::type_path(["String"]);
    assert_eq!(rendered(&map, &string), vec!["extension String: Identifiable"]);
}

#[test]
fn test_extension_members_use_target_path() {
    let map = collect(vec![
        extension(member_type(member_type(simple_type(MODULE), "Outer"), "Inner"))
            .with(role::MEMBER, function("run"))
            .with(role::MEMBER, function_with("internal", "hidden")),
    ]);

    assert_eq!(keys(&map), vec!["Outer.Inner.run()"]);
}

#[test]
fn test_member_extension_with_conformance_is_parked_after_members() {
    let map = collect(vec![
        structure("Foo"),
        extension(simple_type("Foo"))
            .with(role::INHERITED_TYPE, simple_type("Hashable"))
            .with(role::MEMBER, function("hash")),
    ]);

    assert_eq!(keys(&map), vec!["Foo", "Foo.hash()"]);
    let foo = DeclarationIdentifier::type_path(["Foo"]);
    assert_eq!(rendered(&map, &foo), vec!["public struct Foo: Hashable"]);
}

#[test]
fn test_visibility_filter() {
    let map = collect(vec![
        function("visible"),
        function("_underscored"),
        function_with("internal", "internal"),
        function_with("open", "overridable"),
        structure_with("internal", "Hidden").with(role::MEMBER, function("inner")),
        structure("_Private").with(role::MEMBER, function("inner")),
        extension(simple_type("_Storage")).with(role::MEMBER, function("inner")),
    ]);

    assert_eq!(keys(&map), vec!["overridable()", "visible()"]);
}

#[test]
fn test_overloads_collected_as_one_slot() {
    let map = collect(vec![
        function("load").with(role::RETURN_TYPE, simple_type("Int")),
        function("load").with(role::RETURN_TYPE, simple_type("String")),
        function("load").with(role::PARAMETER, parameter(Some("from"), "URL")),
    ]);

    assert_eq!(keys(&map), vec!["load()", "load(from:)"]);
    let load = DeclarationIdentifier::Function {
        path: Vec::new(),
        name: "load".to_string(),
        labels: Vec::new(),
        is_static: false,
    };
    assert_eq!(map[&load].len(), 2);

    // Removing one overload leaves only that one in the modification
    let reduced = collect(vec![
        function("load").with(role::RETURN_TYPE, simple_type("Int")),
        function("load").with(role::PARAMETER, parameter(Some("from"), "URL")),
    ]);
    let modifications = compare_declaration_sets(&map, &reduced);
    assert_eq!(modifications.len(), 1);
    assert_eq!(modifications[0].identifier, load);
    assert!(modifications[0].added.is_empty());
    let removed: Vec<String> = modifications[0].removed.iter().map(ToString::to_string).collect();
    assert_eq!(removed, vec!["public func load() -> String"]);
}

#[test]
fn test_collection_is_deterministic() {
    let statements = vec![
        structure("Foo")
            .with(role::INHERITED_TYPE, simple_type("Equatable"))
            .with(role::MEMBER, variable("count", "Int", &[]))
            .with(role::MEMBER, initializer(vec![parameter(None, "Int")])),
        extension(simple_type("Foo")).with(role::INHERITED_TYPE, simple_type("Hashable")),
    ];

    let first = collect(statements.clone());
    let second = collect(statements);
    assert_eq!(first, second);
    assert_eq!(surface_digest(&first).unwrap(), surface_digest(&second).unwrap());
}

#[test]
fn test_source_file_from_json() {
    let json = r#"{
        "kind": "SourceFile",
        "children": [
            {"role": "statement", "node": {
                "kind": "FunctionDecl",
                "children": [
                    {"role": "modifier", "node": {"kind": "DeclModifier", "children": [
                        {"role": "name", "node": {"kind": "Token", "text": "public"}}
                    ]}},
                    {"role": "name", "node": {"kind": "Token", "text": "foo"}}
                ]
            }}
        ]
    }"#;

    let tree = SyntaxNode::from_json(json).unwrap();
    let map = collect_declarations(DeclNode::parse_source_file(&tree).unwrap(), MODULE).unwrap();
    assert_eq!(keys(&map), vec!["foo()"]);
    assert_eq!(tree, source_file(vec![function("foo")]));
}

#[test]
fn test_invalid_json_is_serialization_error() {
    let err = SyntaxNode::from_json("{ not json").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Serialization);
}

#[test]
fn test_non_identifier_variable_is_skipped() {
    let tuple_binding = SyntaxNode::new(apidiff_core::syntax::kind::VARIABLE_DECL)
        .with(role::MODIFIER, SyntaxNode::modifier("public"))
        .with_token(role::LET_OR_VAR, "let")
        .with(
            role::BINDING,
            SyntaxNode::new(apidiff_core::syntax::kind::PATTERN_BINDING).with(
                role::PATTERN,
                SyntaxNode::new(apidiff_core::syntax::kind::WILDCARD_PATTERN),
            ),
        );

    let map = collect(vec![tuple_binding, variable("kept", "Int", &[])]);
    assert_eq!(keys(&map), vec!["kept"]);
    assert_eq!(
        map.values().map(BTreeSet::len).sum::<usize>(),
        1
    );
}
