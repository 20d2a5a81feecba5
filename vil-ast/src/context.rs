//! The declaration arena and the queries the lowering pass needs

use serde::{Deserialize, Serialize};
use crate::{Decl, DeclId, DeclKind, FunDecl, FunType, NominalType, Type};

/// Arena owning every declaration of a compilation unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ast {
    decls: Vec<Decl>,
}

impl Ast {
    pub fn new() -> Self {
        Self { decls: Vec::new() }
    }

    /// Adds a declaration without registering it in its parent's members.
    pub fn push(&mut self, decl: Decl) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(decl);
        id
    }

    /// Adds a declaration and appends it to its parent's members.
    pub fn push_member(&mut self, decl: Decl) -> DeclId {
        let parent = decl.parent;
        let id = self.push(decl);
        if let Some(members) = parent.and_then(|p| self.decl_mut(p).members_mut()) {
            members.push(id);
        }
        id
    }

    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.0 as usize]
    }

    pub fn decl_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Decl)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, decl)| (DeclId(i as u32), decl))
    }

    pub fn fun(&self, id: DeclId) -> Option<&FunDecl> {
        self.decl(id).as_fun()
    }

    pub fn nominal(&self, id: DeclId) -> NominalType {
        NominalType::new(id, self.decl(id).name.clone())
    }

    /// The instance type declared by a product type, view or extension
    pub fn declared_type(&self, id: DeclId) -> Type {
        match &self.decl(id).kind {
            DeclKind::ProductType(_) => Type::Product(self.nominal(id)),
            DeclKind::ViewType(_) => Type::Existential(vec![self.nominal(id)]),
            DeclKind::GenericParam | DeclKind::AbstractType => Type::GenericParam(self.nominal(id)),
            DeclKind::AliasType(alias) => alias.aliased.clone(),
            DeclKind::TypeExtension(extension) => self.declared_type(extension.extended),
            _ => Type::Error,
        }
    }

    /// Nearest function whose activation owns the declaration
    pub fn enclosing_function(&self, id: DeclId) -> Option<DeclId> {
        let mut current = self.decl(id).parent;
        while let Some(scope) = current {
            match &self.decl(scope).kind {
                DeclKind::Fun(_) => return Some(scope),
                DeclKind::Module(_)
                | DeclKind::ProductType(_)
                | DeclKind::ViewType(_)
                | DeclKind::TypeExtension(_) => return None,
                _ => current = self.decl(scope).parent,
            }
        }
        None
    }

    /// Whether `ancestor` is one of the declaration spaces enclosing `id`
    pub fn is_strict_ancestor(&self, ancestor: DeclId, id: DeclId) -> bool {
        let mut current = self.decl(id).parent;
        while let Some(scope) = current {
            if scope == ancestor {
                return true;
            }
            current = self.decl(scope).parent;
        }
        false
    }

    /// Stored properties of a product type, in declaration order
    pub fn stored_vars(&self, type_decl: DeclId) -> Vec<DeclId> {
        self.decl(type_decl)
            .members()
            .iter()
            .filter_map(|member| match &self.decl(*member).kind {
                DeclKind::PatternBinding(binding) if binding.is_member => {
                    Some(binding.pattern.named_decls())
                }
                _ => None,
            })
            .flatten()
            .filter(|var| matches!(&self.decl(*var).kind, DeclKind::Var(v) if v.has_storage))
            .collect()
    }

    /// Signature of the function with its receiver made explicit
    ///
    /// Instance members take their receiver first (`inout` when mutating).
    /// Constructors allocate their receiver, so their signature is the
    /// applied one.
    pub fn unapplied_type(&self, fun: DeclId) -> FunType {
        let decl = self.decl(fun);
        let applied = match decl.ty.as_function() {
            Some(applied) => applied.clone(),
            None => FunType::new(Vec::new(), Type::Error),
        };

        match decl.as_fun() {
            Some(f) if f.is_member => {
                let receiver = f
                    .self_decl
                    .map(|s| self.decl(s).ty.clone())
                    .unwrap_or(Type::Error);
                let mut params = Vec::with_capacity(applied.params.len() + 1);
                params.push(receiver);
                params.extend(applied.params);
                FunType { params, ret: applied.ret }
            }
            _ => applied,
        }
    }

    /// Names of the declaration spaces leading to `id`, module excluded
    pub fn qualified_path(&self, id: DeclId) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(decl_id) = current {
            let decl = self.decl(decl_id);
            match &decl.kind {
                DeclKind::Module(_) => break,
                DeclKind::TypeExtension(extension) => {
                    path.push(self.decl(extension.extended).name.clone())
                }
                DeclKind::Fun(f) if f.is_ctor() => path.push("init".to_string()),
                _ => path.push(decl.name.clone()),
            }
            current = decl.parent;
        }
        path.reverse();
        path
    }
}
