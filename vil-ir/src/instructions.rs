//! IR Instructions
//!
//! Defines all instruction types available in VIL.

use vil_common::TempId;
use serde::{Deserialize, Serialize};
use std::fmt;
use vil_ast::{DeclId, Type};
use crate::{Value, VilType};

/// IR Instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Allocate a stack slot: result = alloc_stack T
    AllocStack {
        result: TempId,
        alloc_type: Type,
    },

    /// Prepare an existential container to hold a value of `witness_type`
    /// and return the address where that value must be stored.
    AllocExistential {
        result: TempId,
        container: Value,
        witness_type: Type,
    },

    /// Load from memory: result = load location
    Load {
        result: TempId,
        location: Value,
        result_type: VilType,
    },

    /// Store to memory: store value, location
    Store {
        value: Value,
        location: Value,
    },

    /// Copy the value at `source` into `dest`
    CopyAddr {
        source: Value,
        dest: Value,
    },

    /// Reinterpret an address as the address of another type
    UnsafeCastAddr {
        result: TempId,
        source: Value,
        result_type: VilType,
    },

    /// Address of a stored member: result = record_member_addr record, member
    RecordMemberAddr {
        result: TempId,
        record: Value,
        member: DeclId,
        member_name: String,
        result_type: VilType,
    },

    /// Function application: result = apply function(args...)
    Apply {
        result: TempId,
        function: Value,
        args: Vec<Value>,
        result_type: VilType,
    },

    /// Closure formation: binds the leading arguments of `function`
    PartialApply {
        result: TempId,
        function: Value,
        args: Vec<Value>,
        result_type: VilType,
    },

    /// Extract the value packed in an existential container, as `result_type`
    OpenExistential {
        result: TempId,
        container: Value,
        result_type: VilType,
    },

    /// Address of the value packed in an existential container
    OpenExistentialAddr {
        result: TempId,
        container: Value,
        result_type: VilType,
    },

    /// Return: ret value
    Ret(Value),

    /// Abort execution; terminates functions that never return
    Halt,
}

impl Instruction {
    /// Temporary defined by the instruction, if any
    pub fn result(&self) -> Option<TempId> {
        match self {
            Instruction::AllocStack { result, .. }
            | Instruction::AllocExistential { result, .. }
            | Instruction::Load { result, .. }
            | Instruction::UnsafeCastAddr { result, .. }
            | Instruction::RecordMemberAddr { result, .. }
            | Instruction::Apply { result, .. }
            | Instruction::PartialApply { result, .. }
            | Instruction::OpenExistential { result, .. }
            | Instruction::OpenExistentialAddr { result, .. } => Some(*result),
            Instruction::Store { .. }
            | Instruction::CopyAddr { .. }
            | Instruction::Ret(_)
            | Instruction::Halt => None,
        }
    }

    pub fn operands(&self) -> Vec<&Value> {
        match self {
            Instruction::AllocStack { .. } | Instruction::Halt => Vec::new(),
            Instruction::AllocExistential { container, .. }
            | Instruction::OpenExistential { container, .. }
            | Instruction::OpenExistentialAddr { container, .. } => vec![container],
            Instruction::Load { location, .. } => vec![location],
            Instruction::Store { value, location } => vec![value, location],
            Instruction::CopyAddr { source, dest } => vec![source, dest],
            Instruction::UnsafeCastAddr { source, .. } => vec![source],
            Instruction::RecordMemberAddr { record, .. } => vec![record],
            Instruction::Apply { function, args, .. }
            | Instruction::PartialApply { function, args, .. } => {
                std::iter::once(function).chain(args.iter()).collect()
            }
            Instruction::Ret(value) => vec![value],
        }
    }

    pub fn is_terminator(&self) -> bool {
        matches!(self, Instruction::Ret(_) | Instruction::Halt)
    }

    /// Mnemonic used in listings
    pub fn opcode(&self) -> &'static str {
        match self {
            Instruction::AllocStack { .. } => "alloc_stack",
            Instruction::AllocExistential { .. } => "alloc_existential",
            Instruction::Load { .. } => "load",
            Instruction::Store { .. } => "store",
            Instruction::CopyAddr { .. } => "copy_addr",
            Instruction::UnsafeCastAddr { .. } => "unsafe_cast_addr",
            Instruction::RecordMemberAddr { .. } => "record_member_addr",
            Instruction::Apply { .. } => "apply",
            Instruction::PartialApply { .. } => "partial_apply",
            Instruction::OpenExistential { .. } => "open_existential",
            Instruction::OpenExistentialAddr { .. } => "open_existential_addr",
            Instruction::Ret(_) => "ret",
            Instruction::Halt => "halt",
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Value]) -> fmt::Result {
    write!(f, "(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 { write!(f, ", ")?; }
        write!(f, "{arg}")?;
    }
    write!(f, ")")
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::AllocStack { result, alloc_type } => {
                write!(f, "%{result} = alloc_stack {alloc_type}")
            }
            Instruction::AllocExistential { result, container, witness_type } => {
                write!(f, "%{result} = alloc_existential {container}, {witness_type}")
            }
            Instruction::Load { result, location, result_type } => {
                write!(f, "%{result} = load {location} : {result_type}")
            }
            Instruction::Store { value, location } => write!(f, "store {value}, {location}"),
            Instruction::CopyAddr { source, dest } => write!(f, "copy_addr {source} to {dest}"),
            Instruction::UnsafeCastAddr { result, source, result_type } => {
                write!(f, "%{result} = unsafe_cast_addr {source} to {result_type}")
            }
            Instruction::RecordMemberAddr { result, record, member_name, result_type, .. } => {
                write!(f, "%{result} = record_member_addr {record}, {member_name} : {result_type}")
            }
            Instruction::Apply { result, function, args, result_type } => {
                write!(f, "%{result} = apply {function}")?;
                write_args(f, args)?;
                write!(f, " : {result_type}")
            }
            Instruction::PartialApply { result, function, args, result_type } => {
                write!(f, "%{result} = partial_apply {function}")?;
                write_args(f, args)?;
                write!(f, " : {result_type}")
            }
            Instruction::OpenExistential { result, container, result_type } => {
                write!(f, "%{result} = open_existential {container} as {result_type}")
            }
            Instruction::OpenExistentialAddr { result, container, result_type } => {
                write!(f, "%{result} = open_existential_addr {container} as {result_type}")
            }
            Instruction::Ret(value) => write!(f, "ret {value}"),
            Instruction::Halt => write!(f, "halt"),
        }
    }
}
