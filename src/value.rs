//! tagged element values and the closed set of VTK data type names

/// A single element of a data series.
///
/// Every series element carries an explicit kind tag so that type inference
/// can distinguish integer data from floating point data without inspecting
/// value magnitudes. A floating value that happens to be integral
/// (`Value::Float(1.0)`) is still floating kind and will force a float
/// data type for its series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    pub(crate) fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub(crate) fn is_non_negative_int(&self) -> bool {
        matches!(self, Value::Int(x) if *x >= 0)
    }

    /// append the ascii rendering of this value to an output buffer
    ///
    /// floats go through `ryu` so that integral floats keep their
    /// fractional marker (`1.0` renders as `"1.0"`, not `"1"`)
    pub(crate) fn push_ascii(&self, out: &mut String) {
        match self {
            Value::Int(x) => out.push_str(&x.to_string()),
            Value::Float(x) => {
                let mut buffer = ryu::Buffer::new();
                out.push_str(buffer.format(*x));
            }
        }
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Int(x)
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Int(x as i64)
    }
}

impl From<u32> for Value {
    fn from(x: u32) -> Self {
        Value::Int(x as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x as f64)
    }
}

/// The closed set of VTK data type names that can appear in a `DataArray`
/// `type` attribute. Never extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    UInt32,
    UInt64,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl DataType {
    /// the exact attribute string consumed by paraview
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::UInt32 => "UInt32",
            DataType::UInt64 => "UInt64",
            DataType::Int32 => "Int32",
            DataType::Int64 => "Int64",
            DataType::Float32 => "Float32",
            DataType::Float64 => "Float64",
        }
    }

    pub(crate) fn is_unsigned(&self) -> bool {
        matches!(self, DataType::UInt32 | DataType::UInt64)
    }

    pub(crate) fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::UInt32 | DataType::UInt64 | DataType::Int32 | DataType::Int64
        )
    }
}

/// Value string width for a writer instance, fixed at construction.
///
/// Selects between the 32 and 64 bit members of [`DataType`] whenever a
/// type is inferred instead of supplied by the caller. Defaults to 32 bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BitWidth {
    #[default]
    Bit32,
    Bit64,
}

impl BitWidth {
    pub(crate) fn unsigned(self) -> DataType {
        match self {
            BitWidth::Bit32 => DataType::UInt32,
            BitWidth::Bit64 => DataType::UInt64,
        }
    }

    pub(crate) fn signed(self) -> DataType {
        match self {
            BitWidth::Bit32 => DataType::Int32,
            BitWidth::Bit64 => DataType::Int64,
        }
    }

    pub(crate) fn float(self) -> DataType {
        match self {
            BitWidth::Bit32 => DataType::Float32,
            BitWidth::Bit64 => DataType::Float64,
        }
    }
}
