//! Raw stack values and typed reinterpretation.

use std::fmt;

/// The value types a stack slot can be read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    I32,
    I64,
    F32,
    F64,
    V128,
}

impl ValueType {
    /// Parse a type suffix as it appears in the `print` grammar.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "i32" => Some(ValueType::I32),
            "i64" => Some(ValueType::I64),
            "f32" => Some(ValueType::F32),
            "f64" => Some(ValueType::F64),
            "v128" => Some(ValueType::V128),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
            ValueType::V128 => "v128",
        };
        f.write_str(name)
    }
}

/// A raw 128-bit stack slot. Values narrower than 16 bytes occupy the low
/// bytes, little-endian; reinterpretation never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackValue(pub [u8; 16]);

impl StackValue {
    pub fn from_i32(v: i32) -> Self {
        let mut raw = [0u8; 16];
        raw[..4].copy_from_slice(&v.to_le_bytes());
        StackValue(raw)
    }

    pub fn from_i64(v: i64) -> Self {
        let mut raw = [0u8; 16];
        raw[..8].copy_from_slice(&v.to_le_bytes());
        StackValue(raw)
    }

    pub fn from_f32(v: f32) -> Self {
        let mut raw = [0u8; 16];
        raw[..4].copy_from_slice(&v.to_le_bytes());
        StackValue(raw)
    }

    pub fn from_f64(v: f64) -> Self {
        let mut raw = [0u8; 16];
        raw[..8].copy_from_slice(&v.to_le_bytes());
        StackValue(raw)
    }

    pub fn as_i32(&self) -> i32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.0[..4]);
        i32::from_le_bytes(bytes)
    }

    pub fn as_i64(&self) -> i64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.0[..8]);
        i64::from_le_bytes(bytes)
    }

    pub fn as_f32(&self) -> f32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.0[..4]);
        f32::from_le_bytes(bytes)
    }

    pub fn as_f64(&self) -> f64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.0[..8]);
        f64::from_le_bytes(bytes)
    }

    pub fn as_u128(&self) -> u128 {
        u128::from_le_bytes(self.0)
    }

    /// Format the slot reinterpreted as `ty`, in `type:value` form.
    pub fn format(&self, ty: ValueType) -> String {
        match ty {
            ValueType::I32 => format!("i32:{}", self.as_i32()),
            ValueType::I64 => format!("i64:{}", self.as_i64()),
            ValueType::F32 => format!("f32:{}", self.as_f32()),
            ValueType::F64 => format!("f64:{}", self.as_f64()),
            ValueType::V128 => format!("v128:0x{:032x}", self.as_u128()),
        }
    }
}
