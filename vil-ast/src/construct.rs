//! Construction API for typed ASTs
//!
//! The type checker, and tests standing in for it, build the typed AST
//! through these helpers. Each one creates declarations with their resolved
//! types and wires them into their declaration space.

use vil_common::SourceSpan;
use crate::{
    Ast, AliasTypeDecl, BraceStmt, Conformance, ConformanceEntry, Decl, DeclId, DeclKind, Expr,
    FunDecl, FunKind, FunParamDecl, GenericEnv, ModuleDecl, Pattern, PatternBindingDecl,
    ProductTypeDecl, Type, TypeExtnDecl, VarDecl, ViewTypeDecl,
};

/// Formal parameter of a function being declared
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub label: Option<String>,
    pub name: String,
    pub ty: Type,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self { label: None, name: name.into(), ty }
    }

    pub fn labeled(label: impl Into<String>, name: impl Into<String>, ty: Type) -> Self {
        Self { label: Some(label.into()), name: name.into(), ty }
    }
}

fn decl(name: impl Into<String>, kind: DeclKind, ty: Type, parent: Option<DeclId>) -> Decl {
    Decl {
        name: name.into(),
        kind,
        ty,
        parent,
        span: SourceSpan::dummy(),
    }
}

impl Ast {
    pub fn add_module(&mut self, name: &str) -> DeclId {
        self.push(decl(name, DeclKind::Module(ModuleDecl::default()), Type::Unit, None))
    }

    pub fn add_import(&mut self, parent: DeclId, name: &str) -> DeclId {
        self.push_member(decl(name, DeclKind::Import, Type::Unit, Some(parent)))
    }

    pub fn add_product_type(&mut self, parent: DeclId, name: &str) -> DeclId {
        let id = self.push_member(decl(
            name,
            DeclKind::ProductType(ProductTypeDecl::default()),
            Type::Error,
            Some(parent),
        ));
        self.decl_mut(id).ty = self.declared_type(id);
        id
    }

    pub fn add_view(&mut self, parent: DeclId, name: &str) -> DeclId {
        let id = self.push_member(decl(
            name,
            DeclKind::ViewType(ViewTypeDecl::default()),
            Type::Error,
            Some(parent),
        ));
        self.decl_mut(id).ty = self.declared_type(id);
        id
    }

    pub fn add_abstract_type(&mut self, parent: DeclId, name: &str) -> DeclId {
        let id = self.push_member(decl(name, DeclKind::AbstractType, Type::Error, Some(parent)));
        self.decl_mut(id).ty = self.declared_type(id);
        id
    }

    pub fn add_alias(&mut self, parent: DeclId, name: &str, aliased: Type) -> DeclId {
        let kind = DeclKind::AliasType(AliasTypeDecl { aliased: aliased.clone(), conformances: Vec::new() });
        self.push_member(decl(name, kind, aliased, Some(parent)))
    }

    pub fn add_generic_param(&mut self, parent: DeclId, name: &str) -> DeclId {
        let id = self.push(decl(name, DeclKind::GenericParam, Type::Error, Some(parent)));
        self.decl_mut(id).ty = self.declared_type(id);
        id
    }

    pub fn add_extension(&mut self, parent: DeclId, extended: DeclId) -> DeclId {
        let name = self.decl(extended).name.clone();
        let ty = self.declared_type(extended);
        let kind = DeclKind::TypeExtension(TypeExtnDecl { extended, members: Vec::new() });
        self.push_member(decl(name, kind, ty, Some(parent)))
    }

    /// Declares `var name: ty` as a stored member; returns the variable.
    pub fn add_stored_property(&mut self, type_decl: DeclId, name: &str, ty: Type) -> DeclId {
        let var = self.push(decl(
            name,
            DeclKind::Var(VarDecl { has_storage: true }),
            ty.clone(),
            Some(type_decl),
        ));
        let binding = PatternBindingDecl {
            is_member: true,
            is_mutable: true,
            pattern: Pattern::Named(var),
            initializer: None,
        };
        self.push_member(decl(name, DeclKind::PatternBinding(binding), ty, Some(type_decl)));
        var
    }

    /// Declares a free function (module-level or nested in another function).
    pub fn add_function(&mut self, parent: DeclId, name: &str, params: Vec<Param>, ret: Type) -> DeclId {
        self.add_fun(parent, name, FunKind::Regular, params, ret, None)
    }

    /// Declares a runtime-provided function outside of any module.
    pub fn add_builtin_function(&mut self, name: &str, params: Vec<Type>, ret: Type) -> DeclId {
        let ty = Type::function(params, ret);
        let fun = FunDecl {
            kind: FunKind::Builtin,
            params: Vec::new(),
            body: None,
            self_decl: None,
            is_member: false,
            is_mutating: false,
            is_synthesized: false,
            generic_env: GenericEnv::default(),
        };
        self.push(decl(name, DeclKind::Fun(fun), ty, None))
    }

    /// Declares an instance method of a type, extension or view.
    pub fn add_method(
        &mut self,
        parent: DeclId,
        name: &str,
        params: Vec<Param>,
        ret: Type,
        is_mutating: bool,
    ) -> DeclId {
        let receiver = self.declared_type(parent);
        let self_ty = if is_mutating { Type::inout(receiver) } else { receiver };
        self.add_fun(parent, name, FunKind::Regular, params, ret, Some(self_ty))
    }

    pub fn add_ctor(&mut self, type_decl: DeclId, params: Vec<Param>) -> DeclId {
        let receiver = self.declared_type(type_decl);
        let self_ty = Type::inout(receiver.clone());
        self.add_fun(type_decl, "init", FunKind::Ctor, params, receiver, Some(self_ty))
    }

    /// Declares the synthesized memberwise constructor of a product type.
    pub fn add_memberwise_ctor(&mut self, type_decl: DeclId) -> DeclId {
        let params = self
            .stored_vars(type_decl)
            .into_iter()
            .map(|var| {
                let var = self.decl(var);
                Param::labeled(var.name.clone(), var.name.clone(), var.ty.clone())
            })
            .collect();
        let ctor = self.add_ctor(type_decl, params);
        if let Some(fun) = self.decl_mut(ctor).as_fun_mut() {
            fun.is_synthesized = true;
        }
        ctor
    }

    fn add_fun(
        &mut self,
        parent: DeclId,
        name: &str,
        kind: FunKind,
        params: Vec<Param>,
        ret: Type,
        self_ty: Option<Type>,
    ) -> DeclId {
        let ty = Type::function(params.iter().map(|p| p.ty.clone()).collect(), ret);
        let is_mutating = matches!(self_ty, Some(Type::Inout(_))) && kind != FunKind::Ctor;
        let fun = FunDecl {
            kind,
            params: Vec::new(),
            body: None,
            self_decl: None,
            is_member: self_ty.is_some() && kind != FunKind::Ctor,
            is_mutating,
            is_synthesized: false,
            generic_env: GenericEnv::default(),
        };
        let id = self.push_member(decl(name, DeclKind::Fun(fun), ty, Some(parent)));

        let self_decl = self_ty.map(|ty| {
            self.push(decl("self", DeclKind::Var(VarDecl { has_storage: true }), ty, Some(id)))
        });
        let param_decls: Vec<DeclId> = params
            .into_iter()
            .map(|p| {
                let kind = DeclKind::FunParam(FunParamDecl { label: p.label });
                self.push(decl(p.name, kind, p.ty, Some(id)))
            })
            .collect();

        if let Some(fun) = self.decl_mut(id).as_fun_mut() {
            fun.self_decl = self_decl;
            fun.params = param_decls;
        }
        id
    }

    pub fn set_body(&mut self, fun: DeclId, body: BraceStmt) {
        if let Some(f) = self.decl_mut(fun).as_fun_mut() {
            f.body = Some(body);
        }
    }

    pub fn set_generic_env(&mut self, fun: DeclId, env: GenericEnv) {
        if let Some(f) = self.decl_mut(fun).as_fun_mut() {
            f.generic_env = env;
        }
    }

    /// Declares a local `var name: ty [= initializer]` inside `fun`.
    ///
    /// Returns the binding declaration (to be used as a statement) and the
    /// variable it introduces.
    pub fn add_local_var(
        &mut self,
        fun: DeclId,
        name: &str,
        ty: Type,
        initializer: Option<Expr>,
    ) -> (DeclId, DeclId) {
        let var = self.push(decl(name, DeclKind::Var(VarDecl { has_storage: true }), ty.clone(), Some(fun)));
        let binding = self.add_local_binding(fun, Pattern::Named(var), ty, initializer);
        (binding, var)
    }

    /// Declares a local binding with an arbitrary pattern.
    pub fn add_local_binding(
        &mut self,
        fun: DeclId,
        pattern: Pattern,
        ty: Type,
        initializer: Option<Expr>,
    ) -> DeclId {
        let name = pattern
            .named_decls()
            .first()
            .map(|var| self.decl(*var).name.clone())
            .unwrap_or_else(|| "_".to_string());
        let binding = PatternBindingDecl {
            is_member: false,
            is_mutable: true,
            pattern,
            initializer,
        };
        self.push(decl(name, DeclKind::PatternBinding(binding), ty, Some(fun)))
    }

    /// Declares a variable for use in a hand-built pattern.
    pub fn add_pattern_var(&mut self, fun: DeclId, name: &str, ty: Type) -> DeclId {
        self.push(decl(name, DeclKind::Var(VarDecl { has_storage: true }), ty, Some(fun)))
    }

    pub fn add_conformance(&mut self, type_decl: DeclId, view: DeclId, entries: Vec<(DeclId, DeclId)>) {
        let conformance = Conformance {
            view,
            entries: entries
                .into_iter()
                .map(|(requirement, implementation)| ConformanceEntry { requirement, implementation })
                .collect(),
            span: self.decl(type_decl).span.clone(),
        };
        match &mut self.decl_mut(type_decl).kind {
            DeclKind::ProductType(product) => product.conformances.push(conformance),
            DeclKind::AliasType(alias) => alias.conformances.push(conformance),
            _ => {}
        }
    }

    pub fn self_decl(&self, fun: DeclId) -> Option<DeclId> {
        self.fun(fun).and_then(|f| f.self_decl)
    }

    pub fn param(&self, fun: DeclId, index: usize) -> DeclId {
        self.fun(fun).map(|f| f.params[index]).unwrap_or(fun)
    }

    /// A reference to `decl` typed as the value it denotes
    pub fn ref_expr(&self, decl: DeclId) -> Expr {
        Expr::decl_ref(decl, self.decl(decl).ty.base().clone())
    }

    /// `base.member`, typed as the member's value
    pub fn member_expr(&self, base: Expr, member: DeclId) -> Expr {
        let ty = self.decl(member).ty.base().clone();
        Expr::member(base, member, ty)
    }

    /// `callee(args)`, typed with the callee's return type
    pub fn call_expr(&self, callee: Expr, args: Vec<Expr>) -> Expr {
        let ty = callee
            .ty
            .as_function()
            .map(|f| (*f.ret).clone())
            .unwrap_or(Type::Error);
        Expr::call(callee, args, ty)
    }
}
