//! Declaration traversal
//!
//! The [`Emitter`] walks declarations in source order and lowers each one:
//! functions get a VIL function, product types get a witness table per
//! conformance and their members lowered, extensions get their members
//! lowered. Views and abstract types produce no IR.

mod function_gen;
mod synthesized;
mod witness_gen;

pub(crate) use synthesized::emit_synthesized_body;

use log::debug;
use vil_ast::{Ast, DeclId, DeclKind, PatternBindingDecl};
use vil_common::DiagnosticSet;
use vil_ir::{Builder, WitnessTable};
use crate::{EmitOptions, LoweringDiagnostic, Mangler};

/// Lowers the declarations of a typed AST into a [`Builder`]'s module
pub struct Emitter<'ast> {
    pub ast: &'ast Ast,
    pub options: EmitOptions,
    pub(crate) mangler: Mangler,
    diagnostics: DiagnosticSet,
}

impl<'ast> Emitter<'ast> {
    pub fn new(ast: &'ast Ast, options: EmitOptions) -> Self {
        Self {
            ast,
            options,
            mangler: Mangler::new(),
            diagnostics: DiagnosticSet::new(),
        }
    }

    pub fn diagnostics(&self) -> &DiagnosticSet {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> DiagnosticSet {
        self.diagnostics
    }

    pub fn report(&mut self, diagnostic: LoweringDiagnostic) {
        debug!("{}: {diagnostic}", diagnostic.span());
        self.diagnostics.insert(diagnostic.into());
    }

    /// Lowers every member of a module declaration, in source order.
    pub fn emit_module(&mut self, builder: &mut Builder, module: DeclId) {
        let ast = self.ast;
        let decl = ast.decl(module);
        if !matches!(decl.kind, DeclKind::Module(_)) {
            fatal!("'{}' is a {}, not a module", decl.name, decl.kind_name());
        }

        debug!("lowering module '{}'", decl.name);
        for member in decl.members() {
            self.emit_top_level(builder, *member);
        }
    }

    /// Lowers a declaration appearing at the top level of a module, or a
    /// type declaration nested in a function body.
    pub fn emit_top_level(&mut self, builder: &mut Builder, decl: DeclId) {
        let ast = self.ast;
        let node = ast.decl(decl);
        match &node.kind {
            DeclKind::Module(_) => self.emit_module(builder, decl),
            DeclKind::Import => fatal!("cannot lower import declaration '{}'", node.name),
            DeclKind::PatternBinding(_) => {
                fatal!("cannot lower top-level pattern binding '{}'", node.name)
            }
            DeclKind::Fun(fun) if fun.is_builtin() => {}
            DeclKind::Fun(_) => self.emit_function(builder, decl),
            DeclKind::ProductType(_) => self.emit_product_type(builder, decl),
            DeclKind::TypeExtension(_) => self.emit_type_extension(builder, decl),
            DeclKind::ViewType(_) | DeclKind::AbstractType => {}
            DeclKind::AliasType(alias) => {
                if !alias.conformances.is_empty() {
                    fatal!("cannot emit witness tables for type alias '{}'", node.name);
                }
            }
            DeclKind::Var(_) | DeclKind::FunParam(_) | DeclKind::GenericParam => {
                fatal!("unexpected {} '{}' in declaration space", node.kind_name(), node.name)
            }
        }
    }

    fn emit_member(&mut self, builder: &mut Builder, decl: DeclId) {
        let ast = self.ast;
        match &ast.decl(decl).kind {
            DeclKind::PatternBinding(binding) => self.emit_property(decl, binding),
            _ => self.emit_top_level(builder, decl),
        }
    }

    /// Member pattern bindings are plain stored fields and produce no IR.
    fn emit_property(&self, decl: DeclId, binding: &PatternBindingDecl) {
        let ast = self.ast;
        if !binding.is_member {
            fatal!("pattern binding '{}' is not a member", ast.decl(decl).name);
        }
        for var in binding.pattern.named_decls() {
            match &ast.decl(var).kind {
                DeclKind::Var(v) if v.has_storage => {}
                _ => fatal!("cannot lower computed property '{}'", ast.decl(var).name),
            }
        }
        if binding.initializer.is_some() {
            fatal!("cannot lower initializer of member '{}'", ast.decl(decl).name);
        }
    }

    fn emit_product_type(&mut self, builder: &mut Builder, decl: DeclId) {
        let ast = self.ast;
        let DeclKind::ProductType(product) = &ast.decl(decl).kind else {
            fatal!("'{}' is not a product type", ast.decl(decl).name);
        };
        debug!("lowering product type '{}'", ast.decl(decl).name);

        let instance_type = ast.declared_type(decl);
        for conformance in &product.conformances {
            let mut table = WitnessTable::new(instance_type.clone(), ast.nominal(conformance.view));
            for entry in &conformance.entries {
                if ast.fun(entry.requirement).is_none() {
                    continue;
                }
                let thunk = self.emit_witness(builder, entry.implementation, entry.requirement);
                table.add_entry(entry.requirement, ast.decl(entry.requirement).name.clone(), thunk);
            }
            debug!("witness table {}: {} with {} entries", table.ty, table.view, table.entries.len());
            builder.module_mut().add_witness_table(table);
        }

        for member in &product.members {
            self.emit_member(builder, *member);
        }
    }

    fn emit_type_extension(&mut self, builder: &mut Builder, decl: DeclId) {
        let ast = self.ast;
        for member in ast.decl(decl).members() {
            self.emit_member(builder, *member);
        }
    }
}
