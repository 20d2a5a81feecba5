//! Internal invariant violations abort lowering

use vil_ast::{
    Ast, BraceStmt, Decl, DeclKind, Expr, Pattern, PatternBindingDecl, Stmt, Type,
};
use vil_common::SourceSpan;
use vil_emit::{lower, EmitOptions};

#[test]
#[should_panic(expected = "internal compiler error: cannot lower import declaration 'std'")]
fn test_import_at_top_level() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    ast.add_import(module, "std");

    lower(&ast, module, EmitOptions::default());
}

#[test]
#[should_panic(expected = "internal compiler error: cannot lower top-level pattern binding")]
fn test_pattern_binding_at_top_level() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let binding = PatternBindingDecl {
        is_member: false,
        is_mutable: false,
        pattern: Pattern::Wildcard,
        initializer: Some(Expr::int(1)),
    };
    ast.push_member(Decl {
        name: "_".to_string(),
        kind: DeclKind::PatternBinding(binding),
        ty: Type::int(),
        parent: Some(module),
        span: SourceSpan::dummy(),
    });

    lower(&ast, module, EmitOptions::default());
}

#[test]
#[should_panic(expected = "internal compiler error: cannot lower destructuring pattern binding")]
fn test_destructuring_binding() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let pair = ast.add_function(module, "pair", vec![], Type::Unit);
    let a = ast.add_pattern_var(pair, "a", Type::int());
    let b = ast.add_pattern_var(pair, "b", Type::int());
    let pattern = Pattern::Tuple(vec![Pattern::Named(a), Pattern::Named(b)]);
    let binding = ast.add_local_binding(pair, pattern, Type::Error, Some(Expr::error()));
    ast.set_body(pair, BraceStmt::new(vec![Stmt::Decl(binding)]));

    lower(&ast, module, EmitOptions::default());
}

#[test]
#[should_panic(expected = "internal compiler error: cannot lower initializer of member 'x'")]
fn test_member_initializer() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let point = ast.add_product_type(module, "Point");
    ast.add_stored_property(point, "x", Type::int());
    let binding = ast.decl(point).members()[0];
    if let DeclKind::PatternBinding(member) = &mut ast.decl_mut(binding).kind {
        member.initializer = Some(Expr::int(0));
    }

    lower(&ast, module, EmitOptions::default());
}

#[test]
#[should_panic(expected = "internal compiler error: cannot emit witness tables for type alias 'Id'")]
fn test_type_alias_conformance() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let hashable = ast.add_view(module, "Hashable");
    let id = ast.add_alias(module, "Id", Type::int());
    ast.add_conformance(id, hashable, vec![]);

    lower(&ast, module, EmitOptions::default());
}

#[test]
#[should_panic(expected = "internal compiler error")]
fn test_lowering_a_function_as_module() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let main = ast.add_function(module, "main", vec![], Type::Unit);

    lower(&ast, main, EmitOptions::default());
}
