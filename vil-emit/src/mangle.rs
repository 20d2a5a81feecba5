//! Function names
//!
//! A function is named after the path of declaration spaces leading to it
//! (`main`, `Point.init`, `outer.inner`). Functions sharing a path get a
//! `.N` suffix in the order they are first named. Witness thunks append the
//! requirement they satisfy to the implementation's name.

use std::collections::HashMap;
use vil_ast::{Ast, DeclId};

#[derive(Debug, Clone, Default)]
pub struct Mangler {
    assigned: HashMap<DeclId, String>,
    uses: HashMap<String, usize>,
}

impl Mangler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the VIL function lowering `decl`; stable across calls
    pub fn function_name(&mut self, ast: &Ast, decl: DeclId) -> String {
        if let Some(name) = self.assigned.get(&decl) {
            return name.clone();
        }

        let name = self.unique(ast.qualified_path(decl).join("."));
        self.assigned.insert(decl, name.clone());
        name
    }

    /// Name of the thunk forwarding `requirement` to `implementation`
    pub fn witness_name(&mut self, ast: &Ast, implementation: DeclId, requirement: DeclId) -> String {
        let implementation = self.function_name(ast, implementation);
        let requirement = ast.qualified_path(requirement).join(".");
        format!("{implementation}$witness${requirement}")
    }

    fn unique(&mut self, path: String) -> String {
        let count = self.uses.entry(path.clone()).or_insert(0);
        let name = match *count {
            0 => path,
            n => format!("{path}.{n}"),
        };
        *count += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vil_ast::{Param, Type};

    #[test]
    fn test_paths_and_disambiguation() {
        let mut ast = Ast::new();
        let module = ast.add_module("main");
        let point = ast.add_product_type(module, "Point");
        let init = ast.add_ctor(point, vec![]);
        let f_int = ast.add_function(module, "f", vec![Param::new("x", Type::int())], Type::Unit);
        let f_str = ast.add_function(module, "f", vec![Param::new("x", Type::string())], Type::Unit);

        let mut mangler = Mangler::new();
        assert_eq!(mangler.function_name(&ast, init), "Point.init");
        assert_eq!(mangler.function_name(&ast, f_str), "f");
        assert_eq!(mangler.function_name(&ast, f_int), "f.1");
        assert_eq!(mangler.function_name(&ast, f_str), "f");
    }

    #[test]
    fn test_witness_name() {
        let mut ast = Ast::new();
        let module = ast.add_module("main");
        let shape = ast.add_view(module, "Shape");
        let area_req = ast.add_method(shape, "area", vec![], Type::double(), false);
        let square = ast.add_product_type(module, "Square");
        let area = ast.add_method(square, "area", vec![], Type::double(), false);

        let mut mangler = Mangler::new();
        assert_eq!(
            mangler.witness_name(&ast, area, area_req),
            "Square.area$witness$Shape.area"
        );
    }
}
