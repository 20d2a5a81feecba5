//! End-to-end tests for function, statement and expression lowering

use pretty_assertions::assert_eq;
use vil_ast::{Ast, BraceStmt, DeclId, Expr, Param, Pattern, ReturnStmt, Stmt, Type};
use vil_common::{Severity, SourceSpan};
use vil_emit::{lower, EmitOptions, Lowered};
use vil_ir::{Function, Module};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn lower_module(ast: &Ast, module: DeclId) -> Lowered {
    init_logger();
    lower(ast, module, EmitOptions::default())
}

fn function<'m>(module: &'m Module, name: &str) -> &'m Function {
    module
        .get_function(name)
        .unwrap_or_else(|| panic!("no function named '{name}' in:\n{module}"))
}

fn opcodes(function: &Function) -> Vec<&'static str> {
    function.instructions().map(|instr| instr.opcode()).collect()
}

fn ret(value: Option<Expr>) -> Stmt {
    Stmt::Return(ReturnStmt::new(value))
}

/// Every block of every defined function ends with exactly one terminator.
fn assert_terminated(module: &Module) {
    for function in module.functions.iter().filter(|f| !f.is_declaration()) {
        for block in &function.blocks {
            assert_eq!(block.terminator_count(), 1, "in @{}:\n{block}", function.name);
            assert!(
                block.instructions.last().is_some_and(|instr| instr.is_terminator()),
                "in @{}:\n{block}",
                function.name
            );
        }
    }
}

#[test]
fn test_hello_world() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let print = ast.add_builtin_function("print", vec![Type::string()], Type::Unit);
    let main = ast.add_function(module, "main", vec![], Type::Unit);
    let call = ast.call_expr(ast.ref_expr(print), vec![Expr::string("Hello, World!")]);
    ast.set_body(main, BraceStmt::new(vec![Stmt::Expr(call)]));

    let lowered = lower_module(&ast, module);
    assert!(lowered.diagnostics.is_empty());
    assert_eq!(lowered.module.functions.len(), 1);

    let main = function(&lowered.module, "main");
    assert!(main.signature.params.is_empty());
    assert_eq!(
        main.to_string(),
        "fun @main : () -> Unit {\n\
         bb0:\n  \
         %0 = apply @builtin.print(\"Hello, World!\") : Unit\n  \
         ret unit\n\
         }\n"
    );
}

#[test]
fn test_memberwise_constructor() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let point = ast.add_product_type(module, "Point");
    ast.add_stored_property(point, "x", Type::int());
    ast.add_stored_property(point, "y", Type::int());
    ast.add_memberwise_ctor(point);

    let lowered = lower_module(&ast, module);
    assert!(lowered.diagnostics.is_empty());

    let init = function(&lowered.module, "Point.init");
    assert_eq!(init.signature.to_string(), "(Int, Int) -> Point");
    assert_eq!(
        opcodes(init),
        vec![
            "alloc_stack",
            "record_member_addr",
            "store",
            "record_member_addr",
            "store",
            "load",
            "ret",
        ]
    );
    assert_eq!(
        init.to_string(),
        "fun @Point.init : (Int, Int) -> Point {\n\
         bb0(%0 : Int, %1 : Int):\n  \
         %2 = alloc_stack Point\n  \
         %3 = record_member_addr %2, x : *Int\n  \
         store %0, %3\n  \
         %4 = record_member_addr %2, y : *Int\n  \
         store %1, %4\n  \
         %5 = load %2 : Point\n  \
         ret %5\n\
         }\n"
    );
}

#[test]
fn test_missing_return_value() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let answer = ast.add_function(module, "answer", vec![], Type::int());
    let body_span = SourceSpan::on_line("main.val", 1, 22, 24);
    ast.set_body(answer, BraceStmt::new(vec![]).with_span(body_span.clone()));

    let lowered = lower_module(&ast, module);
    let diagnostics: Vec<_> = lowered.diagnostics.iter().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].message, "missing return value in non-unit function");
    assert_eq!(diagnostics[0].span, body_span.end_point());

    // No return is fabricated.
    let answer = function(&lowered.module, "answer");
    assert!(opcodes(answer).is_empty());
    assert!(lowered.into_result().is_err());
}

#[test]
fn test_never_returning_function_halts() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let fail = ast.add_function(module, "fail", vec![], Type::Nothing);
    ast.set_body(fail, BraceStmt::new(vec![]));

    let lowered = lower_module(&ast, module);
    assert!(lowered.diagnostics.is_empty());
    assert_eq!(opcodes(function(&lowered.module, "fail")), vec!["halt"]);
}

#[test]
fn test_code_after_return() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let print = ast.add_builtin_function("print", vec![Type::string()], Type::Unit);
    let f = ast.add_function(module, "f", vec![], Type::Unit);
    let dead_span = SourceSpan::on_line("main.val", 3, 3, 17);
    let dead = ast
        .call_expr(ast.ref_expr(print), vec![Expr::string("unreachable")])
        .with_span(dead_span.clone());
    ast.set_body(f, BraceStmt::new(vec![ret(None), Stmt::Expr(dead)]));

    let lowered = lower_module(&ast, module);
    let diagnostics: Vec<_> = lowered.diagnostics.iter().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].message, "code after return is never executed");
    assert_eq!(diagnostics[0].span, dead_span);

    assert_eq!(opcodes(function(&lowered.module, "f")), vec!["ret"]);
    assert_terminated(&lowered.module);

    let options = EmitOptions { diagnose_unreachable_code: false, ..EmitOptions::default() };
    let quiet = lower(&ast, module, options);
    assert!(quiet.diagnostics.is_empty());
    assert_eq!(opcodes(function(&quiet.module, "f")), vec!["ret"]);
}

#[test]
fn test_return_in_nested_block() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let f = ast.add_function(module, "f", vec![], Type::int());
    let nested = BraceStmt::new(vec![ret(Some(Expr::int(1)))]);
    ast.set_body(f, BraceStmt::new(vec![Stmt::Brace(nested), ret(Some(Expr::int(2)))]));

    let lowered = lower_module(&ast, module);
    assert_eq!(lowered.diagnostics.warning_count(), 1);
    assert_eq!(lowered.diagnostics.error_count(), 0);
    assert_eq!(function(&lowered.module, "f").to_string(), "fun @f : () -> Int {\nbb0:\n  ret 1\n}\n");
}

#[test]
fn test_unreachable_code_is_reported_once() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let f = ast.add_function(module, "f", vec![], Type::Unit);
    let inner_dead = SourceSpan::on_line("main.val", 2, 1, 2);
    let outer_dead = SourceSpan::on_line("main.val", 3, 1, 2);
    let nested = BraceStmt::new(vec![ret(None), Stmt::Expr(Expr::int(1).with_span(inner_dead.clone()))]);
    ast.set_body(
        f,
        BraceStmt::new(vec![Stmt::Brace(nested), Stmt::Expr(Expr::int(2).with_span(outer_dead))]),
    );

    let lowered = lower_module(&ast, module);
    let diagnostics: Vec<_> = lowered.diagnostics.iter().collect();
    assert_eq!(diagnostics.len(), 1, "{}", lowered.diagnostics.rendered());
    assert_eq!(diagnostics[0].message, "code after return is never executed");
    assert_eq!(diagnostics[0].span, inner_dead);
    assert_eq!(opcodes(function(&lowered.module, "f")), vec!["ret"]);
}

#[test]
fn test_local_type_is_lowered_like_a_top_level_one() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let f = ast.add_function(module, "f", vec![], Type::Unit);
    let local = ast.add_product_type(f, "P");
    ast.add_stored_property(local, "x", Type::int());
    ast.add_memberwise_ctor(local);
    let (binding, _) = ast.add_local_var(f, "n", Type::int(), Some(Expr::int(3)));
    ast.set_body(f, BraceStmt::new(vec![Stmt::Decl(local), Stmt::Decl(binding)]));

    let lowered = lower_module(&ast, module);
    assert!(lowered.diagnostics.is_empty(), "{}", lowered.diagnostics.rendered());

    let init = function(&lowered.module, "f.P.init");
    assert_eq!(init.signature.to_string(), "(Int) -> P");
    assert_eq!(opcodes(init), vec!["alloc_stack", "record_member_addr", "store", "load", "ret"]);

    // The enclosing function resumes where it left off.
    assert_eq!(
        function(&lowered.module, "f").to_string(),
        "fun @f : () -> Unit {\n\
         bb0:\n  \
         %0 = alloc_stack Int\n  \
         store 3, %0\n  \
         ret unit\n\
         }\n"
    );
    assert_terminated(&lowered.module);
}

#[test]
fn test_one_allocation_per_local() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let f = ast.add_function(module, "f", vec![], Type::int());
    let (a_binding, a) = ast.add_local_var(f, "a", Type::int(), Some(Expr::int(1)));
    let (b_binding, b) = ast.add_local_var(f, "b", Type::int(), Some(ast.ref_expr(a)));
    let (c_binding, _) = ast.add_local_var(f, "c", Type::bool(), None);
    ast.set_body(
        f,
        BraceStmt::new(vec![
            Stmt::Decl(a_binding),
            Stmt::Decl(b_binding),
            Stmt::Decl(c_binding),
            ret(Some(ast.ref_expr(b))),
        ]),
    );

    let lowered = lower_module(&ast, module);
    assert!(lowered.diagnostics.is_empty());

    let f = function(&lowered.module, "f");
    let allocations = opcodes(f).into_iter().filter(|op| *op == "alloc_stack").count();
    assert_eq!(allocations, 3);
    assert_eq!(
        f.to_string(),
        "fun @f : () -> Int {\n\
         bb0:\n  \
         %0 = alloc_stack Int\n  \
         store 1, %0\n  \
         %1 = alloc_stack Int\n  \
         %2 = load %0 : Int\n  \
         store %2, %1\n  \
         %3 = alloc_stack Bool\n  \
         %4 = load %1 : Int\n  \
         ret %4\n\
         }\n"
    );
}

#[test]
fn test_constructor_epilogue() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let point = ast.add_product_type(module, "Point");
    let x = ast.add_stored_property(point, "x", Type::int());
    let init = ast.add_ctor(point, vec![Param::new("v", Type::int())]);
    let self_decl = ast.self_decl(init).unwrap();
    let v = ast.param(init, 0);
    let target = ast.member_expr(ast.ref_expr(self_decl), x);
    let assign = Expr::assign(target, ast.ref_expr(v));
    ast.set_body(init, BraceStmt::new(vec![Stmt::Expr(assign), ret(None)]));

    let lowered = lower_module(&ast, module);
    assert!(lowered.diagnostics.is_empty());

    let init = function(&lowered.module, "Point.init");
    assert_eq!(
        opcodes(init),
        vec!["alloc_stack", "record_member_addr", "store", "load", "ret"]
    );
    assert_terminated(&lowered.module);
}

#[test]
fn test_method_calls() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let point = ast.add_product_type(module, "Point");
    let x = ast.add_stored_property(point, "x", Type::int());
    ast.add_stored_property(point, "y", Type::int());
    let init = ast.add_memberwise_ctor(point);

    let norm = ast.add_method(point, "norm", vec![], Type::int(), false);
    let norm_self = ast.self_decl(norm).unwrap();
    let norm_x = ast.member_expr(ast.ref_expr(norm_self), x);
    ast.set_body(norm, BraceStmt::new(vec![ret(Some(norm_x))]));

    let reset = ast.add_method(point, "reset", vec![], Type::Unit, true);
    let reset_self = ast.self_decl(reset).unwrap();
    let reset_x = ast.member_expr(ast.ref_expr(reset_self), x);
    ast.set_body(reset, BraceStmt::new(vec![Stmt::Expr(Expr::assign(reset_x, Expr::int(0)))]));

    let main = ast.add_function(module, "main", vec![], Type::int());
    let make = ast.call_expr(ast.ref_expr(init), vec![Expr::int(1), Expr::int(2)]);
    let (binding, p) = ast.add_local_var(main, "p", ast.declared_type(point), Some(make));
    let call_reset = ast.call_expr(ast.member_expr(ast.ref_expr(p), reset), vec![]);
    let call_norm = ast.call_expr(ast.member_expr(ast.ref_expr(p), norm), vec![]);
    ast.set_body(
        main,
        BraceStmt::new(vec![Stmt::Decl(binding), Stmt::Expr(call_reset), ret(Some(call_norm))]),
    );

    let lowered = lower_module(&ast, module);
    assert!(lowered.diagnostics.is_empty(), "{}", lowered.diagnostics.rendered());
    assert_terminated(&lowered.module);

    assert_eq!(
        function(&lowered.module, "main").to_string(),
        "fun @main : () -> Int {\n\
         bb0:\n  \
         %0 = alloc_stack Point\n  \
         %1 = apply @Point.init(1, 2) : Point\n  \
         store %1, %0\n  \
         %2 = apply @Point.reset(%0) : Unit\n  \
         %3 = load %0 : Point\n  \
         %4 = apply @Point.norm(%3) : Int\n  \
         ret %4\n\
         }\n"
    );

    // A by-value receiver is spilled before its member is read.
    assert_eq!(
        opcodes(function(&lowered.module, "Point.norm")),
        vec!["alloc_stack", "store", "record_member_addr", "load", "ret"]
    );
    assert_eq!(function(&lowered.module, "Point.reset").signature.to_string(), "(*Point) -> Unit");
    assert_eq!(
        opcodes(function(&lowered.module, "Point.reset")),
        vec!["record_member_addr", "store", "ret"]
    );
}

#[test]
fn test_capturing_local_function() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let outer = ast.add_function(module, "outer", vec![], Type::int());
    let (binding, n) = ast.add_local_var(outer, "n", Type::int(), Some(Expr::int(1)));
    let inner = ast.add_function(outer, "inner", vec![], Type::int());
    ast.set_body(inner, BraceStmt::new(vec![ret(Some(ast.ref_expr(n)))]));
    let call_inner = ast.call_expr(ast.ref_expr(inner), vec![]);
    ast.set_body(
        outer,
        BraceStmt::new(vec![Stmt::Decl(binding), Stmt::Decl(inner), ret(Some(call_inner))]),
    );

    let lowered = lower_module(&ast, module);
    assert!(lowered.diagnostics.is_empty(), "{}", lowered.diagnostics.rendered());
    assert_terminated(&lowered.module);

    let inner = function(&lowered.module, "outer.inner");
    assert_eq!(inner.signature.to_string(), "(Int) -> Int");
    assert_eq!(inner.to_string(), "fun @outer.inner : (Int) -> Int {\nbb0(%0 : Int):\n  ret %0\n}\n");

    assert_eq!(
        function(&lowered.module, "outer").to_string(),
        "fun @outer : () -> Int {\n\
         bb0:\n  \
         %0 = alloc_stack Int\n  \
         store 1, %0\n  \
         %1 = load %0 : Int\n  \
         %2 = alloc_stack () -> Int\n  \
         %3 = partial_apply @outer.inner(%1) : () -> Int\n  \
         store %3, %2\n  \
         %4 = load %2 : () -> Int\n  \
         %5 = apply %4() : Int\n  \
         ret %5\n\
         }\n"
    );
}

#[test]
fn test_capturing_function_refers_to_itself() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let outer = ast.add_function(module, "outer", vec![Param::new("n", Type::int())], Type::Unit);
    let n = ast.param(outer, 0);
    let again = ast.add_function(outer, "again", vec![], Type::int());
    let recurse = ast.call_expr(ast.ref_expr(again), vec![]);
    ast.set_body(again, BraceStmt::new(vec![Stmt::Expr(recurse), ret(Some(ast.ref_expr(n)))]));
    ast.set_body(outer, BraceStmt::new(vec![Stmt::Decl(again)]));

    let lowered = lower_module(&ast, module);
    assert!(lowered.diagnostics.is_empty(), "{}", lowered.diagnostics.rendered());
    assert_eq!(
        opcodes(function(&lowered.module, "outer.again")),
        vec!["partial_apply", "apply", "ret"]
    );
}

#[test]
fn test_existential_argument_is_packed() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let shape = ast.add_view(module, "Shape");
    let square = ast.add_product_type(module, "Square");
    let shape_type = ast.declared_type(shape);
    let square_type = ast.declared_type(square);
    let describe = ast.add_builtin_function("describe", vec![shape_type.clone()], Type::Unit);

    let main = ast.add_function(module, "main", vec![], Type::Unit);
    let (binding, sq) = ast.add_local_var(main, "sq", square_type, None);
    let (any_binding, any) = ast.add_local_var(main, "any", shape_type, None);
    let describe_sq = ast.call_expr(ast.ref_expr(describe), vec![ast.ref_expr(sq)]);
    let describe_any = ast.call_expr(ast.ref_expr(describe), vec![ast.ref_expr(any)]);
    ast.set_body(
        main,
        BraceStmt::new(vec![
            Stmt::Decl(binding),
            Stmt::Decl(any_binding),
            Stmt::Expr(describe_sq),
            Stmt::Expr(describe_any),
        ]),
    );

    let lowered = lower_module(&ast, module);
    assert!(lowered.diagnostics.is_empty(), "{}", lowered.diagnostics.rendered());
    assert_eq!(
        function(&lowered.module, "main").to_string(),
        "fun @main : () -> Unit {\n\
         bb0:\n  \
         %0 = alloc_stack Square\n  \
         %1 = alloc_stack Shape\n  \
         %2 = alloc_stack Shape\n  \
         %3 = load %0 : Square\n  \
         %4 = alloc_existential %2, Square\n  \
         store %3, %4\n  \
         %5 = load %2 : Shape\n  \
         %6 = apply @builtin.describe(%5) : Unit\n  \
         %7 = load %1 : Shape\n  \
         %8 = apply @builtin.describe(%7) : Unit\n  \
         ret unit\n\
         }\n"
    );
}

#[test]
fn test_assigning_between_existentials() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let shape = ast.add_view(module, "Shape");
    let drawable = ast.add_view(module, "Drawable");
    let f = ast.add_function(module, "f", vec![], Type::Unit);
    let (a_binding, a) = ast.add_local_var(f, "a", ast.declared_type(shape), None);
    let (b_binding, b) = ast.add_local_var(f, "b", ast.declared_type(drawable), None);
    let (c_binding, _) = ast.add_local_var(f, "c", ast.declared_type(shape), Some(ast.ref_expr(a)));
    let assign = Expr::assign(ast.ref_expr(a), ast.ref_expr(b));
    ast.set_body(
        f,
        BraceStmt::new(vec![
            Stmt::Decl(a_binding),
            Stmt::Decl(b_binding),
            Stmt::Decl(c_binding),
            Stmt::Expr(assign),
        ]),
    );

    let lowered = lower_module(&ast, module);
    assert!(lowered.diagnostics.is_empty(), "{}", lowered.diagnostics.rendered());
    assert_eq!(
        function(&lowered.module, "f").to_string(),
        "fun @f : () -> Unit {\n\
         bb0:\n  \
         %0 = alloc_stack Shape\n  \
         %1 = alloc_stack Drawable\n  \
         %2 = alloc_stack Shape\n  \
         copy_addr %0 to %2\n  \
         %3 = unsafe_cast_addr %1 to *Shape\n  \
         copy_addr %3 to %0\n  \
         ret unit\n\
         }\n"
    );
}

#[test]
fn test_error_typed_local() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let print = ast.add_builtin_function("print", vec![Type::string()], Type::Unit);
    let f = ast.add_function(module, "f", vec![], Type::Unit);
    let (binding, broken) = ast.add_local_var(f, "broken", Type::Error, Some(Expr::error()));
    let use_broken = ast.call_expr(ast.ref_expr(print), vec![ast.ref_expr(broken)]);
    ast.set_body(f, BraceStmt::new(vec![Stmt::Decl(binding), Stmt::Expr(use_broken)]));

    let lowered = lower_module(&ast, module);
    assert!(lowered.diagnostics.is_empty(), "{}", lowered.diagnostics.rendered());
    assert_eq!(
        function(&lowered.module, "f").to_string(),
        "fun @f : () -> Unit {\n\
         bb0:\n  \
         %0 = apply @builtin.print(<error>) : Unit\n  \
         ret unit\n\
         }\n"
    );
}

#[test]
fn test_unlowerable_expressions_are_reported() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let f = ast.add_function(module, "f", vec![Param::new("x", Type::int())], Type::Unit);
    let x = ast.param(f, 0);
    let assign_span = SourceSpan::on_line("main.val", 2, 3, 4);
    let assign = Expr::assign(ast.ref_expr(x).with_span(assign_span.clone()), Expr::int(2));
    let call = Expr::call(Expr::int(1), vec![], Type::int());
    ast.set_body(f, BraceStmt::new(vec![Stmt::Expr(assign), Stmt::Expr(call)]));

    let lowered = lower_module(&ast, module);
    let messages: Vec<_> = lowered.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "cannot lower expression: expression of type Int does not denote a location",
            "cannot lower expression: value of type Int is not callable",
        ]
    );
    assert_eq!(lowered.diagnostics.iter().next().map(|d| &d.span), Some(&assign_span));

    // Lowering went on and terminated the function.
    assert_eq!(opcodes(function(&lowered.module, "f")), vec!["ret"]);
    assert!(lowered.into_result().is_err());
}

#[test]
fn test_inout_argument() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let bump = ast.add_builtin_function("bump", vec![Type::inout(Type::int())], Type::Unit);
    let f = ast.add_function(module, "f", vec![], Type::Unit);
    let (binding, counter) = ast.add_local_var(f, "counter", Type::int(), Some(Expr::int(0)));
    let call = ast.call_expr(ast.ref_expr(bump), vec![Expr::addr_of(ast.ref_expr(counter))]);
    ast.set_body(f, BraceStmt::new(vec![Stmt::Decl(binding), Stmt::Expr(call)]));

    let lowered = lower_module(&ast, module);
    assert!(lowered.diagnostics.is_empty(), "{}", lowered.diagnostics.rendered());
    assert_eq!(
        opcodes(function(&lowered.module, "f")),
        vec!["alloc_stack", "store", "apply", "ret"]
    );
    let apply = function(&lowered.module, "f").instructions().nth(2).map(|i| i.to_string());
    assert_eq!(apply.as_deref(), Some("%1 = apply @builtin.bump(%0) : Unit"));
}

#[test]
fn test_functions_of_several_scopes() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let point = ast.add_product_type(module, "Point");
    ast.add_stored_property(point, "x", Type::int());
    let extension = ast.add_extension(module, point);
    let scaled = ast.add_method(extension, "scaled", vec![Param::new("k", Type::int())], ast.declared_type(point), false);
    let self_decl = ast.self_decl(scaled).unwrap();
    ast.set_body(scaled, BraceStmt::new(vec![ret(Some(ast.ref_expr(self_decl)))]));
    let declared = ast.add_function(module, "external", vec![], Type::Unit);

    let lowered = lower_module(&ast, module);
    assert!(lowered.diagnostics.is_empty(), "{}", lowered.diagnostics.rendered());

    let scaled = function(&lowered.module, "Point.scaled");
    assert_eq!(scaled.signature.to_string(), "(Point, Int) -> Point");
    assert_eq!(opcodes(scaled), vec!["ret"]);

    // Bodiless functions are only declared.
    assert!(function(&lowered.module, &ast.decl(declared).name).is_declaration());
    assert_terminated(&lowered.module);
}

#[test]
fn test_wildcard_binding_discards_initializer() {
    let mut ast = Ast::new();
    let module = ast.add_module("main");
    let tick = ast.add_builtin_function("tick", vec![], Type::int());
    let f = ast.add_function(module, "f", vec![], Type::Unit);
    let call = ast.call_expr(ast.ref_expr(tick), vec![]);
    let binding = ast.add_local_binding(f, Pattern::Wildcard, Type::int(), Some(call));
    ast.set_body(f, BraceStmt::new(vec![Stmt::Decl(binding)]));

    let lowered = lower_module(&ast, module);
    assert!(lowered.diagnostics.is_empty(), "{}", lowered.diagnostics.rendered());
    assert_eq!(opcodes(function(&lowered.module, "f")), vec!["apply", "ret"]);
}
