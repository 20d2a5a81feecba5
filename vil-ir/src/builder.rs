//! IR Builder
//!
//! Cursor-based construction of VIL. The builder owns the module being
//! built and an insertion point naming the function and block that
//! instructions are appended to. Every `build_*` operation appends one
//! instruction at the insertion point and returns its result value.

use log::trace;
use std::ops::{Deref, DerefMut};
use vil_ast::{DeclId, Type};
use vil_common::{LabelId, TempId};
use crate::{
    BasicBlock, BuilderError, Function, Instruction, Module, Signature, Value, VilType,
};

/// Function and block receiving new instructions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionPoint {
    pub function: String,
    pub block: LabelId,
}

/// Builder for constructing IR
pub struct Builder {
    module: Module,
    insertion_point: Option<InsertionPoint>,
}

impl Builder {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module: Module::new(module_name.into()),
            insertion_point: None,
        }
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn module_mut(&mut self) -> &mut Module {
        &mut self.module
    }

    pub fn finish(self) -> Module {
        self.module
    }

    /// Returns a reference to the function named `name`, creating it first
    /// if the module has no such function.
    ///
    /// Requesting an existing function with another signature is an error.
    pub fn get_or_create_function(&mut self, name: &str, signature: Signature) -> Result<Value, BuilderError> {
        match self.module.get_function(name) {
            Some(existing) if existing.signature != signature => {
                return Err(BuilderError::SignatureMismatch {
                    name: name.to_string(),
                    existing: existing.signature.to_string(),
                    requested: signature.to_string(),
                });
            }
            Some(_) => {}
            None => {
                trace!("creating function @{name} : {signature}");
                self.module.add_function(Function::new(name.to_string(), signature.clone()));
            }
        }
        Ok(Value::function(name, signature.fun_type()))
    }

    /// Reference to a function already in the module
    pub fn function_ref(&self, name: &str) -> Result<Value, BuilderError> {
        self.module
            .get_function(name)
            .map(|f| Value::function(name, f.signature.fun_type()))
            .ok_or_else(|| BuilderError::UnknownFunction(name.to_string()))
    }

    /// Appends a block with the given parameters to `function` and returns
    /// its label together with the parameter values.
    pub fn create_basic_block(
        &mut self,
        function: &str,
        params: Vec<VilType>,
    ) -> Result<(LabelId, Vec<Value>), BuilderError> {
        let function = self
            .module
            .get_function_mut(function)
            .ok_or_else(|| BuilderError::UnknownFunction(function.to_string()))?;

        let label = function.new_label();
        let params: Vec<(TempId, VilType)> = params
            .into_iter()
            .map(|ty| (function.new_temp(), ty))
            .collect();
        let block = BasicBlock::new(label, params);
        let values = block.param_values();
        trace!("@{}: created bb{label} with {} parameter(s)", function.name, values.len());
        function.add_block(block);
        Ok((label, values))
    }

    pub fn insertion_point(&self) -> Option<&InsertionPoint> {
        self.insertion_point.as_ref()
    }

    pub fn set_insertion_point(&mut self, point: Option<InsertionPoint>) {
        self.insertion_point = point;
    }

    pub fn position_at_end(&mut self, function: &str, block: LabelId) {
        self.insertion_point = Some(InsertionPoint {
            function: function.to_string(),
            block,
        });
    }

    /// Saves the insertion point; it is restored when the guard is dropped,
    /// including during unwinding.
    pub fn scoped(&mut self) -> CursorGuard<'_> {
        let saved = self.insertion_point.clone();
        CursorGuard { builder: self, saved }
    }

    pub fn current_block(&self) -> Result<&BasicBlock, BuilderError> {
        let point = self.insertion_point.as_ref().ok_or(BuilderError::NoInsertionPoint)?;
        let function = self
            .module
            .get_function(&point.function)
            .ok_or_else(|| BuilderError::UnknownFunction(point.function.clone()))?;
        function.get_block(point.block).ok_or_else(|| BuilderError::UnknownBlock {
            function: point.function.clone(),
            block: point.block,
        })
    }

    pub fn current_block_is_terminated(&self) -> bool {
        self.current_block().is_ok_and(BasicBlock::has_terminator)
    }

    fn current_function_mut(&mut self) -> Result<&mut Function, BuilderError> {
        let point = self.insertion_point.as_ref().ok_or(BuilderError::NoInsertionPoint)?;
        self.module
            .get_function_mut(&point.function)
            .ok_or_else(|| BuilderError::UnknownFunction(point.function.clone()))
    }

    fn new_temp(&mut self) -> Result<TempId, BuilderError> {
        Ok(self.current_function_mut()?.new_temp())
    }

    fn append(&mut self, instr: Instruction) -> Result<(), BuilderError> {
        let point = self.insertion_point.as_ref().ok_or(BuilderError::NoInsertionPoint)?;
        let function = self
            .module
            .get_function_mut(&point.function)
            .ok_or_else(|| BuilderError::UnknownFunction(point.function.clone()))?;
        let block = function
            .get_block_mut(point.block)
            .ok_or_else(|| BuilderError::UnknownBlock {
                function: point.function.clone(),
                block: point.block,
            })?;

        if block.has_terminator() {
            return Err(BuilderError::BlockTerminated {
                function: point.function.clone(),
                block: point.block,
            });
        }
        trace!("@{} bb{}: {instr}", point.function, point.block);
        block.add_instruction(instr);
        Ok(())
    }

    /// Error placeholders are accepted wherever an address is expected.
    fn require_address(opcode: &'static str, value: &Value) -> Result<(), BuilderError> {
        if value.is_address() || value.is_error() {
            Ok(())
        } else {
            Err(BuilderError::NotAnAddress { opcode, operand: value.to_string() })
        }
    }

    pub fn build_alloc_stack(&mut self, alloc_type: Type) -> Result<Value, BuilderError> {
        let result = self.new_temp()?;
        let ty = VilType::address(alloc_type.clone());
        self.append(Instruction::AllocStack { result, alloc_type })?;
        Ok(Value::temp(result, ty))
    }

    pub fn build_alloc_existential(&mut self, container: Value, witness_type: Type) -> Result<Value, BuilderError> {
        Self::require_address("alloc_existential", &container)?;
        let result = self.new_temp()?;
        let ty = VilType::address(witness_type.clone());
        self.append(Instruction::AllocExistential { result, container, witness_type })?;
        Ok(Value::temp(result, ty))
    }

    pub fn build_load(&mut self, location: Value) -> Result<Value, BuilderError> {
        Self::require_address("load", &location)?;
        let result = self.new_temp()?;
        let result_type = location.ty.as_object();
        self.append(Instruction::Load { result, location, result_type: result_type.clone() })?;
        Ok(Value::temp(result, result_type))
    }

    pub fn build_store(&mut self, value: Value, location: Value) -> Result<(), BuilderError> {
        Self::require_address("store", &location)?;
        self.append(Instruction::Store { value, location })
    }

    pub fn build_copy_addr(&mut self, source: Value, dest: Value) -> Result<(), BuilderError> {
        Self::require_address("copy_addr", &source)?;
        Self::require_address("copy_addr", &dest)?;
        self.append(Instruction::CopyAddr { source, dest })
    }

    pub fn build_unsafe_cast_addr(&mut self, source: Value, target: Type) -> Result<Value, BuilderError> {
        Self::require_address("unsafe_cast_addr", &source)?;
        let result = self.new_temp()?;
        let result_type = VilType::address(target);
        self.append(Instruction::UnsafeCastAddr { result, source, result_type: result_type.clone() })?;
        Ok(Value::temp(result, result_type))
    }

    pub fn build_record_member_addr(
        &mut self,
        record: Value,
        member: DeclId,
        member_name: &str,
        member_type: Type,
    ) -> Result<Value, BuilderError> {
        Self::require_address("record_member_addr", &record)?;
        let result = self.new_temp()?;
        let result_type = VilType::address(member_type);
        self.append(Instruction::RecordMemberAddr {
            result,
            record,
            member,
            member_name: member_name.to_string(),
            result_type: result_type.clone(),
        })?;
        Ok(Value::temp(result, result_type))
    }

    pub fn build_apply(&mut self, function: Value, args: Vec<Value>, result_type: VilType) -> Result<Value, BuilderError> {
        let result = self.new_temp()?;
        self.append(Instruction::Apply { result, function, args, result_type: result_type.clone() })?;
        Ok(Value::temp(result, result_type))
    }

    pub fn build_partial_apply(&mut self, function: Value, args: Vec<Value>, result_type: Type) -> Result<Value, BuilderError> {
        let result = self.new_temp()?;
        let result_type = VilType::object(result_type);
        self.append(Instruction::PartialApply { result, function, args, result_type: result_type.clone() })?;
        Ok(Value::temp(result, result_type))
    }

    pub fn build_open_existential(&mut self, container: Value, as_type: Type) -> Result<Value, BuilderError> {
        let result = self.new_temp()?;
        let result_type = VilType::object(as_type);
        self.append(Instruction::OpenExistential { result, container, result_type: result_type.clone() })?;
        Ok(Value::temp(result, result_type))
    }

    pub fn build_open_existential_addr(&mut self, container: Value, as_type: Type) -> Result<Value, BuilderError> {
        Self::require_address("open_existential_addr", &container)?;
        let result = self.new_temp()?;
        let result_type = VilType::address(as_type);
        self.append(Instruction::OpenExistentialAddr { result, container, result_type: result_type.clone() })?;
        Ok(Value::temp(result, result_type))
    }

    pub fn build_ret(&mut self, value: Value) -> Result<(), BuilderError> {
        self.append(Instruction::Ret(value))
    }

    pub fn build_halt(&mut self) -> Result<(), BuilderError> {
        self.append(Instruction::Halt)
    }
}

/// Restores the builder's insertion point when dropped
pub struct CursorGuard<'b> {
    builder: &'b mut Builder,
    saved: Option<InsertionPoint>,
}

impl Deref for CursorGuard<'_> {
    type Target = Builder;

    fn deref(&self) -> &Builder {
        self.builder
    }
}

impl DerefMut for CursorGuard<'_> {
    fn deref_mut(&mut self) -> &mut Builder {
        self.builder
    }
}

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        self.builder.insertion_point = self.saved.take();
    }
}
