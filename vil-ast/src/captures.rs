//! Capture computation for local functions

use crate::{Ast, BraceStmt, DeclId, DeclKind, Expr, ExprKind, Stmt};

impl Ast {
    /// Declarations of enclosing functions that `fun` refers to
    ///
    /// References made by functions nested inside `fun` count too, since their
    /// closures are built from `fun`'s own activation. The result is ordered by
    /// first reference and holds no duplicates.
    pub fn captures(&self, fun: DeclId) -> Vec<DeclId> {
        let mut captures = Vec::new();
        self.collect_in_fun(fun, fun, &mut captures);
        captures
    }

    fn collect_in_fun(&self, root: DeclId, fun: DeclId, out: &mut Vec<DeclId>) {
        if let Some(body) = self.fun(fun).and_then(|f| f.body.as_ref()) {
            self.collect_in_brace(root, body, out);
        }
    }

    fn collect_in_brace(&self, root: DeclId, brace: &BraceStmt, out: &mut Vec<DeclId>) {
        for stmt in &brace.stmts {
            match stmt {
                Stmt::Decl(decl) => match &self.decl(*decl).kind {
                    DeclKind::PatternBinding(binding) => {
                        if let Some(init) = &binding.initializer {
                            self.collect_in_expr(root, init, out);
                        }
                    }
                    DeclKind::Fun(_) => self.collect_in_fun(root, *decl, out),
                    _ => {}
                },
                Stmt::Brace(inner) => self.collect_in_brace(root, inner, out),
                Stmt::Return(ret) => {
                    if let Some(value) = &ret.value {
                        self.collect_in_expr(root, value, out);
                    }
                }
                Stmt::Expr(expr) => self.collect_in_expr(root, expr, out),
            }
        }
    }

    fn collect_in_expr(&self, root: DeclId, expr: &Expr, out: &mut Vec<DeclId>) {
        expr.walk(&mut |e| {
            if let ExprKind::DeclRef(decl) = e.kind {
                if self.is_captured_by(root, decl) && !out.contains(&decl) {
                    out.push(decl);
                }
            }
        });
    }

    fn is_captured_by(&self, fun: DeclId, decl: DeclId) -> bool {
        if decl == fun {
            return false;
        }
        let capturable = match &self.decl(decl).kind {
            DeclKind::Var(_) | DeclKind::FunParam(_) => true,
            DeclKind::Fun(f) => !f.is_builtin(),
            _ => false,
        };
        if !capturable {
            return false;
        }
        match self.enclosing_function(decl) {
            Some(owner) => owner != fun && self.is_strict_ancestor(owner, fun),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Ast, BraceStmt, Param, Stmt, Type};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_captures_in_first_reference_order() {
        let mut ast = Ast::new();
        let module = ast.add_module("main");
        let outer = ast.add_function(module, "outer", vec![Param::new("n", Type::int())], Type::Unit);
        let n = ast.param(outer, 0);
        let (_, x) = ast.add_local_var(outer, "x", Type::int(), None);
        let inner = ast.add_function(outer, "inner", vec![Param::new("y", Type::int())], Type::Unit);
        let y = ast.param(inner, 0);

        let body = BraceStmt::new(vec![
            Stmt::Expr(ast.ref_expr(x)),
            Stmt::Expr(ast.ref_expr(y)),
            Stmt::Expr(ast.ref_expr(n)),
            Stmt::Expr(ast.ref_expr(x)),
        ]);
        ast.set_body(inner, body);

        assert_eq!(ast.captures(inner), vec![x, n]);
        assert!(ast.captures(outer).is_empty());
    }

    #[test]
    fn test_captures_through_nested_functions() {
        let mut ast = Ast::new();
        let module = ast.add_module("main");
        let outer = ast.add_function(module, "outer", vec![], Type::Unit);
        let (_, x) = ast.add_local_var(outer, "x", Type::int(), None);
        let middle = ast.add_function(outer, "middle", vec![], Type::Unit);
        let inner = ast.add_function(middle, "inner", vec![], Type::Unit);
        let global = ast.add_function(module, "global", vec![], Type::Unit);

        let inner_body = BraceStmt::new(vec![
            Stmt::Expr(ast.ref_expr(x)),
            Stmt::Expr(ast.ref_expr(global)),
        ]);
        ast.set_body(inner, inner_body);
        ast.set_body(middle, BraceStmt::new(vec![Stmt::Decl(inner)]));

        assert_eq!(ast.captures(middle), vec![x]);
        assert_eq!(ast.captures(inner), vec![x]);
    }
}
